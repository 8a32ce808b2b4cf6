mod bookings_repository;
mod bookings_repository_impl;
mod dto;
mod entity;
mod error;
mod events_repository;
mod events_repository_impl;
mod users_repository;
mod users_repository_impl;

pub use bookings_repository::*;
pub use bookings_repository_impl::*;
pub use dto::*;
pub use error::*;
pub use events_repository::*;
pub use events_repository_impl::*;
pub use users_repository::*;
pub use users_repository_impl::*;
