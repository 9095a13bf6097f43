//! Sound cues.
//!
//! Cues are fire-and-forget: a sink that fails to play logs the problem and
//! moves on, so a broken terminal never gets in the way of a mission update.

use std::io::{self, Write};

/// Something worth a sound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A mission was accepted.
    Click,
    /// A mission was removed.
    Delete,
    /// Input was rejected.
    Error,
}

/// Destination for sound cues.
pub trait CueSink {
    fn play(&mut self, cue: Cue);
}

/// Rings the terminal bell for deletions and rejected input.
pub struct TerminalBell<W: Write> {
    out: W,
}

impl TerminalBell<io::Stdout> {
    pub fn stdout() -> Self {
        TerminalBell { out: io::stdout() }
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn new(out: W) -> Self {
        TerminalBell { out }
    }
}

impl<W: Write> CueSink for TerminalBell<W> {
    fn play(&mut self, cue: Cue) {
        tracing::trace!(?cue, "cue");
        if cue == Cue::Click {
            return;
        }
        if let Err(e) = self.out.write_all(b"\x07").and_then(|()| self.out.flush()) {
            tracing::debug!(?cue, "cue playback failed: {e}");
        }
    }
}

/// Plays nothing.
pub struct Muted;

impl CueSink for Muted {
    fn play(&mut self, cue: Cue) {
        tracing::trace!(?cue, "cue muted");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "gone"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn bell_rings_for_delete_and_error_only() {
        let mut bell = TerminalBell::new(Vec::new());
        bell.play(Cue::Click);
        bell.play(Cue::Delete);
        bell.play(Cue::Error);
        assert_eq!(bell.out, b"\x07\x07".to_vec());
    }

    #[test]
    fn playback_failure_is_swallowed() {
        let mut bell = TerminalBell::new(BrokenPipe);
        bell.play(Cue::Error);
    }

    #[test]
    fn muted_sink_accepts_every_cue() {
        let mut sink: Box<dyn CueSink> = Box::new(Muted);
        for cue in [Cue::Click, Cue::Delete, Cue::Error] {
            sink.play(cue);
        }
    }
}
