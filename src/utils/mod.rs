pub mod error;
pub mod snapshot;

pub use error::{AppError, AppResult};
