pub mod contract_repo;
pub mod file_repo;
pub mod inquiry_repo;
pub mod notification_repo;
pub mod property_repo;
pub mod sos_repo;
pub mod user_repo;

pub use contract_repo::*;
pub use file_repo::*;
pub use inquiry_repo::*;
pub use notification_repo::*;
pub use property_repo::*;
pub use sos_repo::*;
pub use user_repo::*;
