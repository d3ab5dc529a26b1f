//! Data transfer objects
//!
//! Inputs handed to the services by the command front end and the gateway,
//! and the health summary served over HTTP.

mod requests;
mod responses;

pub use requests::{
    first_validation_message, AnnouncementRequest, CreateInviteRequest, IncomingMessage,
};
pub use responses::HealthResponse;
