//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    /// Moving through the mission list.
    Browse,
    /// Typing a new mission.
    Compose,
    /// Editing one mission in place.
    Editing,
    Help,
}

impl AppState {
    /// Key hints shown in the status bar for this state.
    pub fn hints(self) -> &'static str {
        match self {
            AppState::Browse => {
                "a new  space done  e edit  d delete  m sound  h help  q quit"
            }
            AppState::Compose => "Enter accept  Esc back to list",
            AppState::Editing => "Enter save  Esc cancel",
            AppState::Help => "Press any key to return",
        }
    }
}
