//! # herald-service
//!
//! Application layer: the invite registry and attribution engine, the
//! announcement scheduler, the prefix-command front end, and the background
//! loops that keep them fed.

pub mod dto;
pub mod services;

pub use dto::{AnnouncementRequest, CreateInviteRequest, HealthResponse, IncomingMessage};
pub use services::{
    AnnouncementScheduler, AnnouncementService, Attribution, AttributionEngine, BackgroundTasks,
    BotSettings, Command, CommandService, InviteRegistry, InviteService, InviteSyncService,
    ScheduledAck, ServiceContext, ServiceContextBuilder, ServiceError, ServiceResult,
    SweepReport, SyncReport,
};
