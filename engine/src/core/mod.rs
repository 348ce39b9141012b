pub mod log;
pub mod runner;
pub mod time;
pub mod timer;

pub use runner::{RunResult, SimLoop};
pub use time::{Clock, ManualClock, Stopwatch, SystemClock, Time};
pub use timer::{TimerId, TimerQueue};
