pub mod contract;
pub mod file;
pub mod inquiry;
pub mod notification;
pub mod property;
pub mod sos;
pub mod user;

pub use contract::*;
pub use file::*;
pub use inquiry::*;
pub use notification::*;
pub use property::*;
pub use sos::*;
pub use user::*;
