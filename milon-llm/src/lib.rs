//! milon-llm: English-to-Hebrew translation adapter
//!
//! Stateless request/response wrapper around an external text service. The
//! engine only sees the [`Translator`] trait; providers can be swapped
//! without touching workflow state.

pub mod clean;
pub mod error;
pub mod providers;

pub use error::TranslateError;
pub use providers::{build_translator, LibreTranslator, OllamaTranslator, Translator};
