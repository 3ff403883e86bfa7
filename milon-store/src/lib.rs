//! milon-store: persisted word collection and import feed
//!
//! Owns the store file (read at session start, fully rewritten on commit),
//! the read-only source row feed, and the queue resolver that decides which
//! row the operator sees next.

pub mod feed;
pub mod resolver;
pub mod words;

pub use feed::load_import_rows;
pub use resolver::next_unresolved;
pub use words::{upsert, WordFile};
