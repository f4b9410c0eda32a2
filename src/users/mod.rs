//! The user model: hashing, normalization, validation and persistence.

pub mod dto;
pub mod normalize;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod services;
pub mod validate;

pub use dto::{LoginRequest, ResponseUser};
pub use repo::MAX_LISTED_USERS;
pub use repo_types::User;
pub use validate::ValidationMode;
