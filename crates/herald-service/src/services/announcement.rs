//! Announcement service
//!
//! Immediate and scheduled delivery of embed announcements, plus the sweep
//! that fires scheduled ones.

use chrono::NaiveDateTime;
use herald_core::{Announcement, DomainError, ScheduleTime};
use tracing::{info, instrument, warn};
use validator::Validate;

use crate::dto::AnnouncementRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Acknowledgement for a scheduled announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledAck {
    pub time: ScheduleTime,
    /// An earlier announcement for the same minute was discarded
    pub replaced: bool,
}

/// Outcome of one sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SweepReport {
    pub delivered: usize,
    pub failed: usize,
}

impl SweepReport {
    pub fn total(&self) -> usize {
        self.delivered + self.failed
    }
}

/// Announcement service
pub struct AnnouncementService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AnnouncementService<'a> {
    /// Create a new AnnouncementService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Reject announcements aimed outside the configured announcement channel
    pub fn ensure_channel_allowed(&self, request: &AnnouncementRequest) -> ServiceResult<()> {
        match self.ctx.settings().announcement_channel_id {
            Some(allowed) if allowed != request.channel_id => {
                Err(DomainError::ChannelNotAllowed { allowed }.into())
            }
            _ => Ok(()),
        }
    }

    /// Post an announcement right away
    #[instrument(skip(self, request), fields(channel_id = %request.channel_id))]
    pub async fn announce_now(&self, request: AnnouncementRequest) -> ServiceResult<Announcement> {
        self.ensure_channel_allowed(&request)?;
        request.validate()?;

        let announcement = request.into_announcement();
        self.ctx
            .platform()
            .send_message(announcement.channel_id, &announcement.render())
            .await?;

        info!(title = %announcement.title, "Announcement posted");
        Ok(announcement)
    }

    /// Schedule an announcement for a `YYYY-MM-DD HH:MM` local time
    #[instrument(skip(self, request), fields(channel_id = %request.channel_id))]
    pub async fn schedule_announcement(
        &self,
        request: AnnouncementRequest,
        time: &str,
    ) -> ServiceResult<ScheduledAck> {
        self.ensure_channel_allowed(&request)?;
        let time = ScheduleTime::parse(time).map_err(DomainError::from)?;
        request.validate()?;

        let announcement = request.into_announcement();
        let now = self.ctx.clock().now();
        let replaced = self.ctx.scheduler().schedule(time, announcement, now)?;

        if let Some(previous) = &replaced {
            warn!(
                time = %time,
                previous_title = %previous.title,
                "Replaced announcement already scheduled for this time"
            );
        }
        info!(time = %time, pending = self.ctx.scheduler().len(), "Announcement scheduled");

        Ok(ScheduledAck {
            time,
            replaced: replaced.is_some(),
        })
    }

    /// Cancel the announcement scheduled for exactly `time`
    #[instrument(skip(self))]
    pub async fn cancel_announcement(&self, time: &str) -> ServiceResult<ScheduleTime> {
        let time = ScheduleTime::parse(time).map_err(DomainError::from)?;
        self.ctx.scheduler().cancel(time)?;

        info!(time = %time, "Scheduled announcement canceled");
        Ok(time)
    }

    /// Deliver every announcement due at `now`
    ///
    /// Due entries are removed before sending. A failed send is logged and
    /// dropped; it does not stop the rest of the batch.
    pub async fn sweep(&self, now: NaiveDateTime) -> SweepReport {
        let mut report = SweepReport::default();

        for (time, announcement) in self.ctx.scheduler().take_due(now) {
            match self
                .ctx
                .platform()
                .send_message(announcement.channel_id, &announcement.render())
                .await
            {
                Ok(()) => {
                    info!(time = %time, channel_id = %announcement.channel_id, "Scheduled announcement delivered");
                    report.delivered += 1;
                }
                Err(e) => {
                    warn!(
                        time = %time,
                        channel_id = %announcement.channel_id,
                        error = %e,
                        "Failed to deliver scheduled announcement"
                    );
                    report.failed += 1;
                }
            }
        }

        report
    }
}
