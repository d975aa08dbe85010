//! Loading indicator for terminal UI

/// Simple ASCII loading indicator with rotating animation
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    message: String,
    frame: usize,
    frames: [&'static str; 4],
}

impl LoadingIndicator {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            frame: 0,
            frames: ["|", "/", "-", "\\"],
        }
    }

    pub fn current_frame(&self) -> &str {
        self.frames[self.frame]
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn next_frame(&mut self) {
        self.frame = (self.frame + 1) % self.frames.len();
    }

    /// Frame and message as one line, e.g. `| Loading...`
    pub fn line(&self) -> String {
        format!("{} {}", self.current_frame(), self.message)
    }
}
