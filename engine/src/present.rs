//! Presentation sinks.
//!
//! The run never renders anything itself. Every tick it hands a
//! [`StatusUpdate`] to its [`Presenter`], once at the end a
//! [`RunSummary`], and whenever something went wrong but the run carried on,
//! a [`Diagnostic`].

use std::fmt;
use std::time::Duration;

use crossbeam::channel::{Receiver, Sender, unbounded};
use log::{debug, error, info, warn};

use crate::run::RunSummary;
use crate::sampler::MemorySnapshot;

/// Live readout emitted on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StatusUpdate {
    pub fps: Option<f32>,
    pub memory: Option<MemorySnapshot>,
    /// Run time measured so far.
    pub elapsed: Duration,
}

impl StatusUpdate {
    pub fn fps_text(&self) -> String {
        match self.fps {
            Some(fps) => format!("Current FPS: {fps:.2}"),
            None => "Current FPS: --".to_string(),
        }
    }

    pub fn memory_text(&self) -> String {
        match self.memory {
            Some(memory) => memory.to_string(),
            None => "RAM: -- | Reserved: --".to_string(),
        }
    }
}

impl fmt::Display for StatusUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {}", self.fps_text(), self.memory_text())
    }
}

/// A recovered problem worth surfacing to whoever watches the run.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// `start` refused the configuration; the run stayed idle.
    Rejected(String),
    /// The memory probe could not be read this tick.
    ProbeFailed(String),
}

impl Diagnostic {
    pub fn is_error(&self) -> bool {
        matches!(self, Diagnostic::Rejected(_))
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Rejected(reason) => write!(f, "Benchmark not started: {reason}"),
            Diagnostic::ProbeFailed(reason) => write!(f, "Memory probe failed: {reason}"),
        }
    }
}

/// Receives everything a run wants displayed.
pub trait Presenter {
    fn status(&mut self, status: &StatusUpdate);
    fn summary(&mut self, summary: &RunSummary);
    fn diagnostic(&mut self, diagnostic: &Diagnostic);
}

/// Presenter that writes to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn status(&mut self, status: &StatusUpdate) {
        debug!("{status}");
    }

    fn summary(&mut self, summary: &RunSummary) {
        for line in summary.to_string().lines() {
            info!("{line}");
        }
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        if diagnostic.is_error() {
            error!("{diagnostic}");
        } else {
            warn!("{diagnostic}");
        }
    }
}

/// Everything a [`ChannelPresenter`] forwards.
#[derive(Debug, Clone, PartialEq)]
pub enum PresentEvent {
    Status(StatusUpdate),
    Summary(RunSummary),
    Diagnostic(Diagnostic),
}

/// Presenter forwarding events over a channel, for hosts that render elsewhere.
pub struct ChannelPresenter {
    sender: Sender<PresentEvent>,
}

impl ChannelPresenter {
    pub fn new(sender: Sender<PresentEvent>) -> Self {
        Self { sender }
    }

    pub fn with_receiver() -> (Self, Receiver<PresentEvent>) {
        let (sender, receiver) = unbounded();
        (Self::new(sender), receiver)
    }

    fn send(&self, event: PresentEvent) {
        // A host that dropped its receiver no longer wants updates.
        let _ = self.sender.try_send(event);
    }
}

impl Presenter for ChannelPresenter {
    fn status(&mut self, status: &StatusUpdate) {
        self.send(PresentEvent::Status(*status));
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.send(PresentEvent::Summary(summary.clone()));
    }

    fn diagnostic(&mut self, diagnostic: &Diagnostic) {
        self.send(PresentEvent::Diagnostic(diagnostic.clone()));
    }
}
