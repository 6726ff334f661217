//! Parse-error taxonomy.
//!
//! Every variant is terminal for the current parse: the engine aborts
//! immediately and propagates the error with full context (field identity,
//! offending token, violated constraint). Tokens that simply match nothing
//! are *not* errors; they accumulate as unparsed input on the parse state.

use thiserror::Error;

use crate::convert::ConversionError;

/// Errors raised while parsing a token stream.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A value token could not be converted to the declared target type.
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// A value token is not a member of the option's allowed-value set.
    #[error("{title}: value \"{value}\" is not in the list of allowed values: {allowed:?}")]
    IllegalValue {
        title: String,
        value: String,
        allowed: Vec<String>,
    },

    /// The positional-argument arity limit was exceeded.
    #[error(
        "too many arguments, at most {limit} arguments are permitted \
         but extra argument {token} was encountered"
    )]
    TooManyArguments { limit: usize, token: String },

    /// An option was invoked through a syntax its arity cannot support
    /// (e.g. a multi-value option inside a bundled short form).
    #[error("short option style can not be used with option {title} (arity {arity})")]
    UnsupportedSyntax { title: String, arity: usize },

    /// A required option never occurred.
    #[error("required option {title} is missing")]
    MissingRequiredOption { title: String },

    /// A required positional-argument spec received no values.
    #[error("required arguments {title} are missing")]
    MissingRequiredArguments { title: String },

    /// An option occurred more often than its restriction permits.
    #[error("option {title} may occur at most {limit} time(s)")]
    TooManyOccurrences { title: String, limit: usize },

    /// Two mutually exclusive options were both present.
    #[error("option {title} can not be used together with {conflicts_with}")]
    ConflictingOptions {
        title: String,
        conflicts_with: String,
    },
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
