use std::thread;
use std::time::Duration;

use log::warn;
use thiserror::Error;

/// Raised when a retried operation exhausts its attempts; carries the last
/// underlying failure.
#[derive(Debug, Error)]
#[error("all {attempts} attempts failed")]
pub struct PipelineError {
    pub attempts: u32,
    #[source]
    pub cause: Box<dyn std::error::Error + Send + Sync>,
}

/// Bounded retry policy for hardening a single fallible call.
#[derive(Debug, Clone, Copy)]
pub struct Retry {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for Retry {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
        }
    }
}

impl Retry {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn run<T, E, F>(&self, op: F) -> Result<T, PipelineError>
    where
        F: FnMut() -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
    {
        self.run_with(op, |_, _| {})
    }

    /// Like [`run`](Retry::run), additionally invoking `on_error(error,
    /// attempt)` after each failed attempt.
    pub fn run_with<T, E, F, C>(&self, mut op: F, mut on_error: C) -> Result<T, PipelineError>
    where
        F: FnMut() -> Result<T, E>,
        E: std::error::Error + Send + Sync + 'static,
        C: FnMut(&E, u32),
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            attempt += 1;
            match op() {
                Ok(value) => return Ok(value),
                Err(err) => {
                    warn!("attempt {attempt}/{max_attempts} failed: {err}");
                    on_error(&err, attempt);
                    if attempt >= max_attempts {
                        return Err(PipelineError {
                            attempts: max_attempts,
                            cause: Box::new(err),
                        });
                    }
                    thread::sleep(self.delay);
                }
            }
        }
    }
}
