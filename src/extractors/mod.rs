//! Request extractors that report rejections as `AppError`

pub mod json;
pub mod path;

pub use json::AppJson;
pub use path::AppPath;
