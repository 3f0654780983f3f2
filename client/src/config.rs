use std::time::Duration;

pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_LOG_CHUNK_SIZE: usize = 1024 * 1024;

/// Polling parameters of a step view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewConfig {
    refresh_interval: Duration,
    log_chunk_size: usize,
}

impl ViewConfig {
    pub fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    pub fn log_chunk_size(&self) -> usize {
        self.log_chunk_size
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    /// A zero size would never read past the cursor, so it is raised to one.
    pub fn with_log_chunk_size(mut self, size: usize) -> Self {
        self.log_chunk_size = size.max(1);
        self
    }
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            log_chunk_size: DEFAULT_LOG_CHUNK_SIZE,
        }
    }
}
