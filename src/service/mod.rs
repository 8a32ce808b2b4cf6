pub mod accounts_service;
pub mod bookings_service;
pub mod eticket_service;
pub mod events_service;
pub mod mailer_service;
pub mod recommendations_service;
