//! Restriction engine: validators attached to options and arguments.
//!
//! Restrictions enforce constraints beyond type and arity. Each one may hook
//! two checkpoints:
//!
//! - **pre-validate** — called with the raw token before a value is accepted
//!   into the parse state;
//! - **post-validate** — called once the owning scope (global, group or
//!   command) has finished parsing.
//!
//! Both default to no-ops so implementations opt into only the checkpoints
//! they need. Restrictions must be stateless or hold only immutable
//! configuration; they are shared read-only across concurrent parses.

use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

use crate::error::{ParseError, Result};
use crate::metadata::{ArgumentsMetadata, OptionMetadata};
use crate::state::ParseState;

/// A validator attached to an option or arguments spec.
///
/// All methods default to accepting; override the checkpoints you need.
///
/// The pre-checkpoints run per *value* token. Flags (arity 0) carry no
/// value and never reach `pre_validate_option`; constraints that must also
/// cover flags belong in `post_validate_option`, which runs for every
/// option of the scope regardless of arity.
pub trait Restriction: fmt::Debug + Send + Sync {
    /// Called before an option value is accepted into state.
    ///
    /// Only invoked for valued occurrences, never for flags.
    fn pre_validate_option(
        &self,
        _state: &ParseState,
        _option: &OptionMetadata,
        _raw: &str,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the option's owning scope finished parsing.
    fn post_validate_option(&self, _state: &ParseState, _option: &OptionMetadata) -> Result<()> {
        Ok(())
    }

    /// Called before a positional value is accepted into state.
    fn pre_validate_arguments(
        &self,
        _state: &ParseState,
        _arguments: &ArgumentsMetadata,
        _raw: &str,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after the command scope finished parsing.
    fn post_validate_arguments(
        &self,
        _state: &ParseState,
        _arguments: &ArgumentsMetadata,
    ) -> Result<()> {
        Ok(())
    }
}

/// Requires at least one occurrence of the target.
///
/// # Examples
///
/// ```
/// use argot_core::{OptionMetadata, Required};
///
/// let opt = OptionMetadata::flag("force", &["-f"]).with_restriction(Required);
/// assert_eq!(opt.restrictions.len(), 1);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Required;

impl Restriction for Required {
    fn post_validate_option(&self, state: &ParseState, option: &OptionMetadata) -> Result<()> {
        if state.count_occurrences(option) == 0 {
            return Err(ParseError::MissingRequiredOption {
                title: option.title.clone(),
            });
        }
        Ok(())
    }

    fn post_validate_arguments(
        &self,
        state: &ParseState,
        arguments: &ArgumentsMetadata,
    ) -> Result<()> {
        if state.parsed_arguments().is_empty() {
            return Err(ParseError::MissingRequiredArguments {
                title: arguments.title().to_string(),
            });
        }
        Ok(())
    }
}

/// Caps the number of occurrences of an option.
///
/// Valued options are rejected at the pre-checkpoint, before the excess
/// value is accepted. Flags carry no value and never reach that checkpoint,
/// so the limit is re-checked at post-validation.
#[derive(Debug, Clone, Copy)]
pub struct OccurrenceLimit {
    limit: usize,
}

impl OccurrenceLimit {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }
}

impl Restriction for OccurrenceLimit {
    fn pre_validate_option(
        &self,
        state: &ParseState,
        option: &OptionMetadata,
        _raw: &str,
    ) -> Result<()> {
        if state.count_occurrences(option) >= self.limit {
            return Err(ParseError::TooManyOccurrences {
                title: option.title.clone(),
                limit: self.limit,
            });
        }
        Ok(())
    }

    fn post_validate_option(&self, state: &ParseState, option: &OptionMetadata) -> Result<()> {
        if state.count_occurrences(option) > self.limit {
            return Err(ParseError::TooManyOccurrences {
                title: option.title.clone(),
                limit: self.limit,
            });
        }
        Ok(())
    }
}

/// Rejects the target when any of the named options is also present.
///
/// Valued options fail fast at the pre-checkpoint; flags are caught by the
/// post-validation sweep once the scope has finished parsing.
#[derive(Debug, Clone)]
pub struct MutuallyExclusiveWith {
    titles: Vec<String>,
}

impl MutuallyExclusiveWith {
    /// `titles` are the option titles this target conflicts with.
    pub fn new(titles: &[&str]) -> Self {
        Self {
            titles: titles.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn find_conflict<'a>(&self, state: &'a ParseState) -> Option<&'a str> {
        state
            .parsed_options()
            .iter()
            .find(|parsed| self.titles.contains(&parsed.option.title))
            .map(|parsed| parsed.option.title.as_str())
    }
}

impl Restriction for MutuallyExclusiveWith {
    fn pre_validate_option(
        &self,
        state: &ParseState,
        option: &OptionMetadata,
        _raw: &str,
    ) -> Result<()> {
        if let Some(conflict) = self.find_conflict(state) {
            return Err(ParseError::ConflictingOptions {
                title: option.title.clone(),
                conflicts_with: conflict.to_string(),
            });
        }
        Ok(())
    }

    fn post_validate_option(&self, state: &ParseState, option: &OptionMetadata) -> Result<()> {
        if state.count_occurrences(option) == 0 {
            return Ok(());
        }
        if let Some(conflict) = self.find_conflict(state) {
            return Err(ParseError::ConflictingOptions {
                title: option.title.clone(),
                conflicts_with: conflict.to_string(),
            });
        }
        Ok(())
    }
}

/// Applies an inner restriction only at specific occurrence indices.
///
/// The current zero-based occurrence index is derived from the parse state:
/// for options, the number of identical-option occurrences already recorded;
/// for arguments, the number of positional values already recorded.
///
/// Checkpoint rules:
///
/// - **pre** fires when the index of the *pending* occurrence (i.e. the
///   count before the value is added) is in the target set;
/// - **post** fires for a target index `i` once the i-th occurrence has been
///   fully parsed, that is once `i < count`.
///
/// # Examples
///
/// ```
/// use argot_core::{OptionMetadata, Required, ScopedRestriction, ValueType};
///
/// // Only the first occurrence of --level is checked.
/// let opt = OptionMetadata::single("level", &["--level"], ValueType::Integer)
///     .with_restriction(ScopedRestriction::new(&[0], Required));
/// assert_eq!(opt.restrictions.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ScopedRestriction {
    indices: BTreeSet<usize>,
    inner: Arc<dyn Restriction>,
}

impl ScopedRestriction {
    pub fn new(indices: &[usize], inner: impl Restriction + 'static) -> Self {
        Self {
            indices: indices.iter().copied().collect(),
            inner: Arc::new(inner),
        }
    }

    fn applies_at(&self, count: usize, pre: bool) -> bool {
        if pre {
            self.indices.contains(&count)
        } else {
            self.indices.iter().any(|&index| index < count)
        }
    }
}

impl Restriction for ScopedRestriction {
    fn pre_validate_option(
        &self,
        state: &ParseState,
        option: &OptionMetadata,
        raw: &str,
    ) -> Result<()> {
        if !self.applies_at(state.count_occurrences(option), true) {
            return Ok(());
        }
        self.inner.pre_validate_option(state, option, raw)
    }

    fn post_validate_option(&self, state: &ParseState, option: &OptionMetadata) -> Result<()> {
        if !self.applies_at(state.count_occurrences(option), false) {
            return Ok(());
        }
        self.inner.post_validate_option(state, option)
    }

    fn pre_validate_arguments(
        &self,
        state: &ParseState,
        arguments: &ArgumentsMetadata,
        raw: &str,
    ) -> Result<()> {
        if !self.applies_at(state.parsed_arguments().len(), true) {
            return Ok(());
        }
        self.inner.pre_validate_arguments(state, arguments, raw)
    }

    fn post_validate_arguments(
        &self,
        state: &ParseState,
        arguments: &ArgumentsMetadata,
    ) -> Result<()> {
        if !self.applies_at(state.parsed_arguments().len(), false) {
            return Ok(());
        }
        self.inner.post_validate_arguments(state, arguments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Value, ValueType};

    /// Fails every checkpoint; used to observe whether a wrapper forwarded.
    #[derive(Debug, Clone, Copy)]
    struct AlwaysFail;

    impl Restriction for AlwaysFail {
        fn pre_validate_option(
            &self,
            _state: &ParseState,
            option: &OptionMetadata,
            raw: &str,
        ) -> Result<()> {
            Err(ParseError::IllegalValue {
                title: option.title.clone(),
                value: raw.to_string(),
                allowed: Vec::new(),
            })
        }

        fn post_validate_option(
            &self,
            _state: &ParseState,
            option: &OptionMetadata,
        ) -> Result<()> {
            Err(ParseError::MissingRequiredOption {
                title: option.title.clone(),
            })
        }

        fn pre_validate_arguments(
            &self,
            _state: &ParseState,
            arguments: &ArgumentsMetadata,
            raw: &str,
        ) -> Result<()> {
            Err(ParseError::IllegalValue {
                title: arguments.title().to_string(),
                value: raw.to_string(),
                allowed: Vec::new(),
            })
        }

        fn post_validate_arguments(
            &self,
            _state: &ParseState,
            arguments: &ArgumentsMetadata,
        ) -> Result<()> {
            Err(ParseError::MissingRequiredArguments {
                title: arguments.title().to_string(),
            })
        }
    }

    fn repeatable() -> Arc<OptionMetadata> {
        Arc::new(OptionMetadata::single(
            "tag",
            &["-t"],
            ValueType::String,
        ))
    }

    fn with_occurrences(option: &Arc<OptionMetadata>, n: usize) -> ParseState {
        let mut state = ParseState::new();
        for i in 0..n {
            state = state.with_option_value(option, Value::String(format!("v{i}")));
        }
        state
    }

    #[test]
    fn test_required_option() {
        let option = repeatable();
        let empty = ParseState::new();
        assert!(matches!(
            Required.post_validate_option(&empty, &option),
            Err(ParseError::MissingRequiredOption { .. })
        ));

        let present = with_occurrences(&option, 1);
        assert!(Required.post_validate_option(&present, &option).is_ok());
    }

    #[test]
    fn test_occurrence_limit() {
        let option = repeatable();
        let limit = OccurrenceLimit::new(2);

        let one = with_occurrences(&option, 1);
        assert!(limit.pre_validate_option(&one, &option, "x").is_ok());

        let two = with_occurrences(&option, 2);
        assert!(matches!(
            limit.pre_validate_option(&two, &option, "x"),
            Err(ParseError::TooManyOccurrences { limit: 2, .. })
        ));

        // Post-validation catches flags, which never hit the pre-checkpoint.
        assert!(limit.post_validate_option(&two, &option).is_ok());
        let three = with_occurrences(&option, 3);
        assert!(matches!(
            limit.post_validate_option(&three, &option),
            Err(ParseError::TooManyOccurrences { limit: 2, .. })
        ));
    }

    #[test]
    fn test_mutually_exclusive() {
        let quiet = Arc::new(OptionMetadata::flag("quiet", &["-q"]));
        let verbose = OptionMetadata::flag("verbose", &["-v"]);
        let restriction = MutuallyExclusiveWith::new(&["quiet"]);

        let empty = ParseState::new();
        assert!(restriction
            .pre_validate_option(&empty, &verbose, "true")
            .is_ok());

        let with_quiet = ParseState::new().with_option_value(&quiet, Value::Bool(true));
        assert!(matches!(
            restriction.pre_validate_option(&with_quiet, &verbose, "true"),
            Err(ParseError::ConflictingOptions { .. })
        ));
    }

    #[test]
    fn test_mutually_exclusive_flags_caught_at_post_validation() {
        let quiet = Arc::new(OptionMetadata::flag("quiet", &["-q"]));
        let verbose = Arc::new(OptionMetadata::flag("verbose", &["-v"]));
        let restriction = MutuallyExclusiveWith::new(&["quiet"]);

        // The restricted option never occurred: no conflict to report.
        let only_quiet = ParseState::new().with_option_value(&quiet, Value::Bool(true));
        assert!(restriction
            .post_validate_option(&only_quiet, &verbose)
            .is_ok());

        let both = only_quiet.with_option_value(&verbose, Value::Bool(true));
        assert!(matches!(
            restriction.post_validate_option(&both, &verbose),
            Err(ParseError::ConflictingOptions { .. })
        ));
    }

    #[test]
    fn test_scoped_pre_fires_only_for_target_occurrence() {
        let option = repeatable();
        let scoped = ScopedRestriction::new(&[0], AlwaysFail);

        // First occurrence (index 0, nothing recorded yet): forwarded.
        let empty = ParseState::new();
        assert!(scoped.pre_validate_option(&empty, &option, "x").is_err());

        // Second and third occurrences: skipped.
        let one = with_occurrences(&option, 1);
        assert!(scoped.pre_validate_option(&one, &option, "x").is_ok());
        let two = with_occurrences(&option, 2);
        assert!(scoped.pre_validate_option(&two, &option, "x").is_ok());
    }

    #[test]
    fn test_scoped_post_fires_once_target_occurrence_completed() {
        let option = repeatable();
        let scoped = ScopedRestriction::new(&[1], AlwaysFail);

        // Only occurrence 0 parsed: target occurrence 1 never completed.
        let one = with_occurrences(&option, 1);
        assert!(scoped.post_validate_option(&one, &option).is_ok());

        // Occurrence 1 fully parsed: forwarded.
        let two = with_occurrences(&option, 2);
        assert!(scoped.post_validate_option(&two, &option).is_err());
    }

    #[test]
    fn test_scoped_arguments_checkpoints() {
        let arguments = ArgumentsMetadata::new(&["file"], ValueType::Path);
        let scoped = ScopedRestriction::new(&[1], AlwaysFail);

        // Pre: pending positional index is the parsed count.
        let empty = ParseState::new();
        assert!(scoped
            .pre_validate_arguments(&empty, &arguments, "a.txt")
            .is_ok());
        let one = ParseState::new().with_argument(Value::Path("a.txt".into()));
        assert!(scoped
            .pre_validate_arguments(&one, &arguments, "b.txt")
            .is_err());

        // Post: fires once any target index has been parsed.
        assert!(scoped.post_validate_arguments(&one, &arguments).is_ok());
        let two = one.with_argument(Value::Path("b.txt".into()));
        assert!(scoped.post_validate_arguments(&two, &arguments).is_err());
    }
}
