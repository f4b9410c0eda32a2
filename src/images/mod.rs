pub mod services;

pub use services::{upload_profile_picture, UploadMeta};
