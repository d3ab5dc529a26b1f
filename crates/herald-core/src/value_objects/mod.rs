//! Value objects - immutable types that represent domain concepts

mod permissions;
mod schedule_time;
mod snowflake;

pub use permissions::Permissions;
pub use schedule_time::{ScheduleTime, ScheduleTimeError};
pub use snowflake::{Snowflake, SnowflakeParseError};
