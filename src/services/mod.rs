pub mod assistant_service;
pub mod auth_service;
pub mod inquiry_service;
pub mod notification_service;
pub mod sos_service;

pub use assistant_service::*;
pub use auth_service::*;
pub use inquiry_service::*;
pub use notification_service::*;
pub use sos_service::*;
