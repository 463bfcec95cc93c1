pub mod entity;
pub mod errors;
pub mod memory;
pub mod password;
pub mod repo;

pub use entity::User;
pub use errors::{RepoError, UserError};
pub use memory::MemoryUserRepository;
pub use repo::{PgUserRepository, UserRepository};
