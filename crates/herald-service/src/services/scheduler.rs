//! Announcement scheduler
//!
//! Pending announcements keyed by their fire time. At most one announcement
//! per minute; scheduling onto an occupied minute replaces the earlier entry.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use herald_core::{Announcement, DomainError, ScheduleTime};
use parking_lot::Mutex;

/// Time-keyed store of undelivered announcements
#[derive(Debug, Default)]
pub struct AnnouncementScheduler {
    pending: Mutex<BTreeMap<ScheduleTime, Announcement>>,
}

impl AnnouncementScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an announcement for delivery at `time`
    ///
    /// `time` must be strictly after `now`. Returns the announcement that was
    /// previously scheduled for the same minute, if any.
    pub fn schedule(
        &self,
        time: ScheduleTime,
        announcement: Announcement,
        now: NaiveDateTime,
    ) -> Result<Option<Announcement>, DomainError> {
        if !time.is_after(now) {
            return Err(DomainError::TimeNotInFuture(time));
        }

        Ok(self.pending.lock().insert(time, announcement))
    }

    /// Remove the announcement scheduled for exactly `time`
    pub fn cancel(&self, time: ScheduleTime) -> Result<Announcement, DomainError> {
        self.pending
            .lock()
            .remove(&time)
            .ok_or(DomainError::AnnouncementNotFound(time))
    }

    /// Detach every announcement due at `now`, earliest first
    ///
    /// The returned entries are no longer pending whatever the caller does
    /// with them.
    pub fn take_due(&self, now: NaiveDateTime) -> Vec<(ScheduleTime, Announcement)> {
        let mut pending = self.pending.lock();

        let due: Vec<ScheduleTime> = pending
            .keys()
            .take_while(|time| time.is_due(now))
            .copied()
            .collect();

        due.into_iter()
            .filter_map(|time| pending.remove(&time).map(|a| (time, a)))
            .collect()
    }

    /// Pending fire times in ascending order
    pub fn pending(&self) -> Vec<ScheduleTime> {
        self.pending.lock().keys().copied().collect()
    }

    pub fn get(&self, time: ScheduleTime) -> Option<Announcement> {
        self.pending.lock().get(&time).cloned()
    }

    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }
}
