mod auth_session;
mod booking;
mod eticket;
mod event;
mod message;

pub use auth_session::*;
pub use booking::*;
pub use eticket::*;
pub use event::*;
pub use message::*;
