//! Terminal presenter.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{QueueableCommand, cursor, style, terminal};
use flyby_engine::RunSummary;
use flyby_engine::present::{Diagnostic, Presenter, StatusUpdate};
use log::warn;

/// Presenter that keeps a live status line and prints the summary below it.
///
/// The status line is rewritten in place at most once per `refresh` of run
/// time so fast runs don't spend their frames on the terminal.
pub struct ConsolePresenter<W: Write> {
    out: W,
    refresh: Duration,
    last_status: Option<Duration>,
    status_shown: bool,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout(refresh: Duration) -> Self {
        Self::new(io::stdout(), refresh)
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, refresh: Duration) -> Self {
        Self {
            out,
            refresh,
            last_status: None,
            status_shown: false,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn due(&self, elapsed: Duration) -> bool {
        match self.last_status {
            None => true,
            Some(last) => elapsed < last || elapsed - last >= self.refresh,
        }
    }

    fn write_status(&mut self, status: &StatusUpdate) -> io::Result<()> {
        self.out
            .queue(cursor::MoveToColumn(0))?
            .queue(terminal::Clear(terminal::ClearType::CurrentLine))?
            .queue(style::Print(status))?;
        self.out.flush()
    }

    // Move off the status line before printing anything permanent.
    fn end_status_line(&mut self) -> io::Result<()> {
        if self.status_shown {
            self.out.queue(style::Print("\n"))?;
            self.status_shown = false;
        }
        Ok(())
    }

    fn write_summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        self.end_status_line()?;
        let text = summary.to_string();
        let (title, body) = text.split_once('\n').unwrap_or((text.as_str(), ""));
        self.out
            .queue(style::SetAttribute(style::Attribute::Bold))?
            .queue(style::Print(title))?
            .queue(style::SetAttribute(style::Attribute::Reset))?
            .queue(style::Print("\n"))?;
        for line in body.lines() {
            self.out.queue(style::Print(line))?.queue(style::Print("\n"))?;
        }
        self.out.flush()
    }

    fn write_diagnostic(&mut self, diagnostic: &Diagnostic) -> io::Result<()> {
        self.end_status_line()?;
        let color = if diagnostic.is_error() {
            style::Color::Red
        } else {
            style::Color::Yellow
        };
        self.out
            .queue(style::SetForegroundColor(color))?
            .queue(style::Print(diagnostic))?
            .queue(style::ResetColor)?
            .queue(style::Print("\n"))?;
        self.out.flush()
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn status(&mut self, status: &StatusUpdate) {
        if !self.due(status.elapsed) {
            return;
        }
        self.last_status = Some(status.elapsed);
        match self.write_status(status) {
            Ok(()) => self.status_shown = true,
            Err(err) => warn!("Failed to draw status line: {err}"),
        }
    }

    fn summary(&mut self, summary: &RunSummary) {
        if let Err(err) = self.write_summary(summary) {
            warn!("Failed to print summary: {err}");
        }
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        if let Err(err) = self.write_diagnostic(diagnostic) {
            warn!("Failed to print diagnostic: {err}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flyby_engine::sampler::FpsStats;

    fn status(fps: f32, elapsed_ms: u64) -> StatusUpdate {
        StatusUpdate {
            fps: Some(fps),
            memory: None,
            elapsed: Duration::from_millis(elapsed_ms),
        }
    }

    fn output(presenter: ConsolePresenter<Vec<u8>>) -> String {
        String::from_utf8(presenter.into_inner()).unwrap()
    }

    #[test]
    fn status_is_throttled_by_run_time() {
        let mut presenter = ConsolePresenter::new(Vec::new(), Duration::from_millis(100));
        presenter.status(&status(10.0, 0));
        presenter.status(&status(20.0, 50));
        presenter.status(&status(30.0, 150));
        let text = output(presenter);
        assert!(text.contains("Current FPS: 10.00"));
        assert!(!text.contains("Current FPS: 20.00"));
        assert!(text.contains("Current FPS: 30.00"));
    }

    #[test]
    fn summary_follows_status_on_its_own_line() {
        let mut presenter = ConsolePresenter::new(Vec::new(), Duration::ZERO);
        presenter.status(&status(60.0, 0));

        let mut fps = FpsStats::new();
        fps.record(60.0);
        presenter.summary(&RunSummary::new(&fps, Duration::from_secs(1)));

        let text = output(presenter);
        let status_at = text.find("Current FPS: 60.00").unwrap();
        let title_at = text.find("Benchmark Completed").unwrap();
        assert!(status_at < title_at);
        assert!(text[status_at..title_at].contains('\n'));
        assert!(text.contains("Duration: 1.00 seconds\n"));
    }

    #[test]
    fn diagnostics_are_printed() {
        let mut presenter = ConsolePresenter::new(Vec::new(), Duration::ZERO);
        presenter.diagnostic(&Diagnostic::ProbeFailed("statm missing".into()));
        let text = output(presenter);
        assert!(text.contains("Memory probe failed: statm missing"));
    }
}
