//! milon-engine: the import workflow
//!
//! A pure state-transition core ([`session::WorkflowSession`]) plus an
//! imperative shell ([`importer::ImportEngine`]) that owns the adapters and
//! the store. Adapter failures clear their pending latch and leave the rest
//! of the session untouched; commit happens exactly once per id.

pub mod importer;
pub mod session;

pub use importer::ImportEngine;
pub use session::{AssetState, AudioClip, WorkflowSession};
