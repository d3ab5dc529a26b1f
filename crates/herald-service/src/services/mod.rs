//! Business logic services
//!
//! State stores (`InviteRegistry`, `AnnouncementScheduler`) hold the
//! in-memory maps; the services borrow a `ServiceContext` and orchestrate
//! platform calls around them.

pub mod announcement;
pub mod attribution;
pub mod command;
pub mod context;
pub mod error;
pub mod help;
pub mod invite;
pub mod registry;
pub mod scheduler;
pub mod sync;
pub mod tasks;

// Re-export all services for convenience
pub use announcement::{AnnouncementService, ScheduledAck, SweepReport};
pub use attribution::{Attribution, AttributionEngine};
pub use command::{Command, CommandService};
pub use context::{BotSettings, ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invite::InviteService;
pub use registry::InviteRegistry;
pub use scheduler::AnnouncementScheduler;
pub use sync::{InviteSyncService, SyncReport};
pub use tasks::BackgroundTasks;
