pub mod admin;
pub mod agents;
pub mod auth;
pub mod buyers;
pub mod contracts;
pub mod documents;
pub mod inquiries;
pub mod notifications;
pub mod properties;
pub mod sos;
pub mod users;
