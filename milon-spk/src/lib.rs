//! milon-spk: pronunciation clips for vocabulary entries
//!
//! Text-to-speech behind a narrow [`SpeechEngine`] trait, with a fixed set
//! of voice accents each mapping to a language code and a regional endpoint
//! variant.

pub mod accent;
pub mod engines;
pub mod error;

pub use accent::VoiceAccent;
pub use engines::{build_engine, ApiTtsEngine, GtransEngine, SpeechEngine};
pub use error::SpeechError;
