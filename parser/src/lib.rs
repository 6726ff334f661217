//! Token-stream parser for the argot command-line parsing engine.
//!
//! Given an immutable [`GlobalMetadata`](argot_core::GlobalMetadata) graph
//! from `argot-core`, [`Parser`] consumes a sequence of raw string tokens
//! following the grammar
//!
//! ```text
//! global-options* group? group-options* (command (command-options* arg | "--" arg*)*)?
//! ```
//!
//! and returns the final [`ParseState`](argot_core::ParseState), or the first
//! [`ParseError`](argot_core::ParseError) encountered. Option tokens are
//! recognized by three strategies tried in fixed order — the simple form
//! (`--opt value`), the long GNU form (`--opt=value`) and the classic
//! bundled short form (`-abc`) — with positional and default-option
//! fallbacks for whatever they decline. Group and command names resolve
//! exactly, or by unique prefix when abbreviation is enabled.
//!
//! # Example
//!
//! ```
//! use argot_core::*;
//! use argot_parser::parse;
//! use std::sync::Arc;
//!
//! let global = Arc::new(
//!     GlobalMetadata::new()
//!         .with_option(OptionMetadata::flag("verbose", &["--verbose"]))
//!         .with_command(
//!             CommandMetadata::new("copy")
//!                 .with_option(OptionMetadata::flag("force", &["-f", "--force"]))
//!                 .with_arguments(
//!                     ArgumentsMetadata::new(&["src", "dst"], ValueType::Path).with_arity(2),
//!                 ),
//!         ),
//! );
//!
//! let state = parse(&global, ["--verbose", "copy", "-f", "a.txt", "b.txt"]).unwrap();
//! assert!(state.flag("verbose"));
//! assert!(state.flag("force"));
//! assert_eq!(state.parsed_arguments().len(), 2);
//! ```

mod cursor;
pub mod finder;
mod matchers;
mod parse;

pub use parse::{Parser, parse};
