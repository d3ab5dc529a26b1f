//! Wall-clock port

use chrono::{Local, NaiveDateTime};

/// Source of the current local time
///
/// Scheduling works on naive local time, matching how users type times.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Clock backed by the operating system's local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}
