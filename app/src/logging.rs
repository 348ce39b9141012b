use std::io::Write;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError};
use flyby_engine::core::log::{ChannelLogger, LogMessage};
use log::LevelFilter;

/// Background thread copying records from the channel logger to stderr.
pub struct LogPump {
    receiver: Receiver<LogMessage>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl LogPump {
    /// Install a [`ChannelLogger`] at `filter` and start draining it.
    pub fn install(filter: LevelFilter) -> anyhow::Result<Self> {
        let (logger, receiver) = ChannelLogger::with_receiver(filter);
        logger.install()?;

        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let receiver = receiver.clone();
            let stop = Arc::clone(&stop);
            thread::Builder::new()
                .name("log-pump".into())
                .spawn(move || pump(&receiver, &stop))?
        };
        Ok(Self {
            receiver,
            stop,
            handle: Some(handle),
        })
    }

    /// Stop the thread and write out whatever is still queued.
    pub fn finish(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
        let mut stderr = std::io::stderr().lock();
        for message in self.receiver.try_iter() {
            let _ = writeln!(stderr, "{}", format_message(&message));
        }
    }
}

impl Drop for LogPump {
    fn drop(&mut self) {
        self.shutdown();
    }
}

fn pump(receiver: &Receiver<LogMessage>, stop: &AtomicBool) {
    while !stop.load(Ordering::Relaxed) {
        match receiver.recv_timeout(Duration::from_millis(50)) {
            Ok(message) => eprintln!("{}", format_message(&message)),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

fn format_message(message: &LogMessage) -> String {
    format!("[{:<5} {}] {}", message.level, message.target, message.message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Level;

    #[test]
    fn messages_are_prefixed_with_level_and_target() {
        let message = LogMessage {
            level: Level::Warn,
            target: "flyby_engine::sampler".into(),
            message: "Skipping FPS sample".into(),
        };
        assert_eq!(
            format_message(&message),
            "[WARN  flyby_engine::sampler] Skipping FPS sample"
        );
    }
}
