use std::time::{Duration, Instant};

use colored::Colorize;

/// Logs the time spent in a scope when debug logging is enabled.
pub struct Profile {
  start: Instant,
  name:  String
}

impl Profile {
  pub fn new(name: impl Into<String>) -> Self {
    Self { start: Instant::now(), name: name.into() }
  }

  pub fn elapsed(&self) -> Duration {
    self.start.elapsed()
  }
}

impl Drop for Profile {
  fn drop(&mut self) {
    if log::log_enabled!(log::Level::Debug) {
      log::debug!("{}: {:.2?}", self.name.blue(), self.elapsed());
    }
  }
}

/// Times the rest of the enclosing scope.
#[macro_export]
macro_rules! profile {
  ($name:expr) => {
    let _profile_guard = $crate::profiling::Profile::new($name);
  };
}
