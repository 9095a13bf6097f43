//! Value types shared by the CLI flags.

use clap::ValueEnum;

use crate::task::Task;

/// Which missions a listing shows.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    /// Whether `task` passes this filter.
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_split_on_completed_flag() {
        let open = Task::new(1, "open");
        let mut done = Task::new(2, "done");
        done.completed = true;

        assert!(StatusFilter::All.matches(&open) && StatusFilter::All.matches(&done));
        assert!(StatusFilter::Pending.matches(&open) && !StatusFilter::Pending.matches(&done));
        assert!(!StatusFilter::Completed.matches(&open) && StatusFilter::Completed.matches(&done));
    }
}
