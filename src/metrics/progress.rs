use std::io::{IsTerminal, Write};

use crossterm::{
    cursor, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};

use super::Progress;

const SPINNER: [char; 4] = ['-', '\\', '|', '/'];

/// Side effect run on every recorded outcome, under the statistics lock.
pub trait ProgressReporter: Send {
    fn report(&mut self, progress: Progress);

    fn finish(&mut self) {}
}

/// Discards progress updates.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&mut self, _progress: Progress) {}
}

/// Spinner plus completion percentage on stderr, rewritten in place.
#[derive(Debug)]
pub struct TerminalProgress {
    frame: usize,
    no_color: bool,
    enabled: bool,
}

impl TerminalProgress {
    #[must_use]
    pub fn new(no_color: bool) -> Self {
        Self {
            frame: 0,
            no_color,
            enabled: std::io::stderr().is_terminal(),
        }
    }
}

impl ProgressReporter for TerminalProgress {
    fn report(&mut self, progress: Progress) {
        if !self.enabled {
            return;
        }
        let spinner = SPINNER.get(self.frame).copied().unwrap_or('-');
        self.frame = self.frame.saturating_add(1).checked_rem(SPINNER.len()).unwrap_or(0);

        let line = build_progress_line(spinner, progress);
        if render_progress_line(&line, self.no_color).is_err() {
            self.enabled = false;
        }
    }

    fn finish(&mut self) {
        if !self.enabled {
            return;
        }
        let mut out = std::io::stderr();
        if out.write_all(b"\n").and_then(|()| out.flush()).is_err() {
            self.enabled = false;
        }
    }
}

pub(super) fn build_progress_line(spinner: char, progress: Progress) -> String {
    let percent_x100 = percent_x100(progress.finished, progress.total);
    format!(
        "{} hitting {}.{:02}%",
        spinner,
        percent_x100.checked_div(100).unwrap_or(0),
        percent_x100.checked_rem(100).unwrap_or(0)
    )
}

pub(super) fn percent_x100(finished: u64, total: u64) -> u128 {
    u128::from(finished)
        .saturating_mul(10_000)
        .checked_div(u128::from(total))
        .unwrap_or(0)
}

fn render_progress_line(line: &str, no_color: bool) -> Result<(), std::io::Error> {
    let mut out = std::io::stderr();
    queue!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine))?;
    if no_color {
        queue!(out, Print(line))?;
    } else {
        queue!(out, SetForegroundColor(Color::Green), Print(line), ResetColor)?;
    }
    queue!(out, Print('\r'))?;
    out.flush()?;
    Ok(())
}
