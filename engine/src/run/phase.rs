use super::Mode;

/// Enumeration of the lifecycle phases a run can be in.
#[derive(PartialEq, Eq)]
#[derive(Debug)]
#[derive(Copy, Clone)]
pub enum Phase {
    /// Never started, cancelled, or rejected at start
    Idle,
    /// Accepting ticks
    Running(Mode),
    /// Summary published; needs `start` or `restart` to run again
    Finished,
}

impl Phase {
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running(_))
    }

    pub fn is_finished(&self) -> bool {
        *self == Phase::Finished
    }
}
