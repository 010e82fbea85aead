//! Environment and run-loop configuration.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default interval of the periodic liveness redraw.
pub const DEFAULT_REDRAW_INTERVAL: Duration = Duration::from_secs(60);

/// Default capacity of each of the event and update queues.
pub const DEFAULT_QUEUE_CAPACITY: usize = 255;

#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub clear_always: bool,
    pub redraw_interval: Option<Duration>,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

impl EnvConfig {
    pub fn from_env() -> Self {
        Self {
            clear_always: env_flag("TILE_CLEAR_ALWAYS"),
            redraw_interval: env_string_opt("TILE_REDRAW_MS")
                .and_then(|value| value.trim().parse::<u64>().ok())
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis),
            log_file: env_string_opt("TILE_LOG_FILE").map(PathBuf::from),
            debug: env_flag("TILE_DEBUG"),
        }
    }
}

/// Settings for an [`Application`](crate::runtime::Application).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub redraw_interval: Duration,
    pub clear_always: bool,
    pub queue_capacity: usize,
    /// Stop the loop gracefully on SIGINT/SIGTERM.
    pub handle_signals: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            redraw_interval: DEFAULT_REDRAW_INTERVAL,
            clear_always: false,
            queue_capacity: DEFAULT_QUEUE_CAPACITY,
            handle_signals: true,
        }
    }
}

impl AppConfig {
    /// Defaults overridden by [`EnvConfig::from_env`].
    pub fn from_env() -> Self {
        Self::default().with_env(&EnvConfig::from_env())
    }

    pub fn with_env(mut self, env: &EnvConfig) -> Self {
        self.clear_always |= env.clear_always;
        if let Some(interval) = env.redraw_interval {
            self.redraw_interval = interval;
        }
        self
    }

    pub fn redraw_interval(mut self, interval: Duration) -> Self {
        self.redraw_interval = interval;
        self
    }

    pub fn clear_always(mut self, clear_always: bool) -> Self {
        self.clear_always = clear_always;
        self
    }

    /// Capacity of each queue; zero is raised to one.
    pub fn queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = capacity.max(1);
        self
    }

    pub fn handle_signals(mut self, handle_signals: bool) -> Self {
        self.handle_signals = handle_signals;
        self
    }
}

fn env_flag(key: &str) -> bool {
    env::var(key).map(|value| value == "1").unwrap_or(false)
}

fn env_string_opt(key: &str) -> Option<String> {
    env::var(key).ok().and_then(|value| {
        if value.trim().is_empty() {
            None
        } else {
            Some(value)
        }
    })
}
