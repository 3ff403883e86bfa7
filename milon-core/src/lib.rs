pub mod config;
pub mod error;
pub mod model;
pub mod slug;

pub use config::ImporterConfig;
pub use error::{Error, Result};
pub use model::{ImageCandidate, ImportRow, WordEntry};
pub use slug::normalize;
