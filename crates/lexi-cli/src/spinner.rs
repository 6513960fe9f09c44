//! Terminal spinner shown while a draft is in flight

use std::io::{IsTerminal, Write};
use std::time::Duration;
use tokio::task::JoinHandle;

/// Spinner animation frames
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

const FRAME_DURATION: Duration = Duration::from_millis(80);

/// Animated spinner on stderr. Does nothing when stderr is not a terminal.
pub struct Spinner {
    task: Option<JoinHandle<()>>,
}

impl Spinner {
    /// Start spinning with a label
    pub fn start(label: impl Into<String>) -> Self {
        if !std::io::stderr().is_terminal() {
            return Self { task: None };
        }

        let label = label.into();
        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(FRAME_DURATION);
            let mut frame_index = 0usize;
            loop {
                interval.tick().await;
                let mut stderr = std::io::stderr();
                let _ = write!(stderr, "\r{} {}", frame(frame_index), label);
                let _ = stderr.flush();
                frame_index = frame_index.wrapping_add(1);
            }
        });
        Self { task: Some(task) }
    }

    /// Stop and clear the line
    pub fn stop(mut self) {
        self.clear();
    }

    fn clear(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            let mut stderr = std::io::stderr();
            let _ = write!(stderr, "\r\x1b[2K");
            let _ = stderr.flush();
        }
    }
}

impl Drop for Spinner {
    fn drop(&mut self) {
        self.clear();
    }
}

fn frame(index: usize) -> &'static str {
    SPINNER_FRAMES[index % SPINNER_FRAMES.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frames_wrap() {
        assert_eq!(frame(0), "⠋");
        assert_eq!(frame(SPINNER_FRAMES.len()), "⠋");
        assert_eq!(frame(SPINNER_FRAMES.len() + 1), "⠙");
    }
}
