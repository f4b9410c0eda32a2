pub mod config;
pub mod error;
pub mod images;
pub mod state;
pub mod storage;
pub mod users;

pub use error::{UserError, UserResult};
