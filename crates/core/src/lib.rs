//! Prosodic analysis and constraint-driven refinement pipeline for lyric
//! parody generation.
//!
//! Modules are listed leaf-first: [`token`] and [`syllable`]/[`rhyme`] have
//! no dependency on the rest of the crate; [`engine`] wires everything
//! together around an injected [`completer::TextCompleter`].

pub mod cache;
pub mod completer;
pub mod engine;
pub mod error;
pub mod keyword;
pub mod prompt;
pub mod rhyme;
pub mod style;
pub mod syllable;
pub mod token;
pub mod types;

pub use completer::TextCompleter;
pub use engine::{generate, ParodyConfig, RunHooks};
pub use error::{CompleterError, KeywordError, ParodyError};
pub use types::{KeywordMap, ParodyContext};
