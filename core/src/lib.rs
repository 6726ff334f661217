//! Core model for the argot command-line parsing engine.
//!
//! This crate defines everything the token-stream parser consumes and
//! produces, without any parsing logic of its own:
//!
//! - [`GlobalMetadata`], [`CommandGroupMetadata`], [`CommandMetadata`],
//!   [`OptionMetadata`], [`ArgumentsMetadata`] — the immutable description
//!   of a program's options, groups, commands and positional arguments.
//! - [`ParseState`] — the incrementally-extended, immutable record of a
//!   parse in progress and its final result.
//! - [`ValueConverter`] / [`DefaultConverter`] — raw-token to typed-value
//!   conversion behind a pluggable trait.
//! - [`Restriction`] and the common restrictions ([`Required`],
//!   [`OccurrenceLimit`], [`MutuallyExclusiveWith`], [`ScopedRestriction`])
//!   — per-option/per-argument validators with pre/post checkpoints.
//! - [`validate_global`] — structural validation of a metadata graph.
//! - [`ParseError`] — the complete parse-failure taxonomy.
//!
//! The metadata graph is built once with the builder constructors, shared
//! freely (nodes are `Arc`s) and never mutated during parsing. One graph may
//! serve any number of concurrent parses as long as each parse owns its own
//! [`ParseState`].
//!
//! # Example
//!
//! ```
//! use argot_core::*;
//!
//! let global = GlobalMetadata::new()
//!     .with_option(OptionMetadata::flag("verbose", &["-v", "--verbose"]))
//!     .with_command(
//!         CommandMetadata::new("copy")
//!             .with_option(OptionMetadata::single("name", &["-n", "--name"], ValueType::String))
//!             .with_arguments(
//!                 ArgumentsMetadata::new(&["src", "dst"], ValueType::Path).with_arity(2),
//!             ),
//!     );
//!
//! assert!(validate_global(&global).is_empty());
//! ```

mod convert;
mod error;
mod metadata;
mod restriction;
mod state;
mod types;
mod validate;

pub use convert::{ConversionError, DefaultConverter, ValueConverter};
pub use error::{ParseError, Result};
pub use metadata::{
    ArgumentsMetadata, CommandGroupMetadata, CommandMetadata, GlobalMetadata, OptionMetadata,
    find_option,
};
pub use restriction::{
    MutuallyExclusiveWith, OccurrenceLimit, Required, Restriction, ScopedRestriction,
};
pub use state::{ParseContext, ParseState, ParsedOption};
pub use types::{Value, ValueType};
pub use validate::{MetadataError, validate_command, validate_global, validate_group};
