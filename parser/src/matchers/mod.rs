//! Option-matching strategies.
//!
//! Each strategy attempts to consume a prefix of the remaining token stream
//! as one option occurrence. The orchestrator tries them in fixed priority
//! order per token (simple form, long GNU `--opt=value`, classic bundled
//! short form); the first match wins, and if none matches the option loop
//! stops and control returns to command/positional resolution.
//!
//! A strategy returns:
//!
//! - `Ok(Some((state, cursor)))` — matched; the extended state and advanced
//!   cursor replace the caller's copies;
//! - `Ok(None)` — no match; the speculative state/cursor are discarded;
//! - `Err(_)` — a fatal parse error (bad value, unsupported syntax).

mod classic;
mod long_gnu;
mod simple;

use std::sync::Arc;

use argot_core::{OptionMetadata, ParseError, ParseState, Result, Value, ValueConverter};

use crate::cursor::TokenCursor;

pub(crate) use classic::ClassicGetOptMatcher;
pub(crate) use long_gnu::LongGnuMatcher;
pub(crate) use simple::SimpleMatcher;

/// Shared inputs for a matching attempt: the options legal in the current
/// scope and the value converter.
pub(crate) struct MatchContext<'a> {
    pub(crate) options: &'a [Arc<OptionMetadata>],
    pub(crate) converter: &'a dyn ValueConverter,
}

/// One option-recognition strategy.
pub(crate) trait OptionMatcher {
    fn name(&self) -> &'static str;

    fn try_match<'t>(
        &self,
        ctx: &MatchContext<'_>,
        state: &ParseState,
        cursor: TokenCursor<'t>,
    ) -> Result<Option<(ParseState, TokenCursor<'t>)>>;
}

/// The strategies in priority order.
pub(crate) fn matchers() -> [&'static dyn OptionMatcher; 3] {
    [&SimpleMatcher, &LongGnuMatcher, &ClassicGetOptMatcher]
}

/// Validates and converts one raw value token for `option`: allowed-value
/// membership, restriction pre-checkpoints, then conversion.
pub(crate) fn resolve_value(
    state: &ParseState,
    converter: &dyn ValueConverter,
    option: &Arc<OptionMetadata>,
    raw: &str,
) -> Result<Value> {
    if let Some(allowed) = &option.allowed_values
        && !allowed.iter().any(|candidate| candidate == raw)
    {
        return Err(ParseError::IllegalValue {
            title: option.title.clone(),
            value: raw.to_string(),
            allowed: allowed.clone(),
        });
    }

    for restriction in &option.restrictions {
        restriction.pre_validate_option(state, option, raw)?;
    }

    Ok(converter.convert(&option.title, &option.value_type, raw)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argot_core::{DefaultConverter, ValueType};

    #[test]
    fn test_resolve_value_enforces_allowed_set() {
        let format = Arc::new(
            OptionMetadata::single("format", &["--format"], ValueType::String)
                .with_allowed_values(&["json", "yaml"]),
        );
        let state = ParseState::new();

        let value = resolve_value(&state, &DefaultConverter, &format, "json").unwrap();
        assert_eq!(value, Value::String("json".into()));

        let err = resolve_value(&state, &DefaultConverter, &format, "toml").unwrap_err();
        assert!(matches!(err, ParseError::IllegalValue { .. }));
        assert_eq!(
            err.to_string(),
            "format: value \"toml\" is not in the list of allowed values: [\"json\", \"yaml\"]"
        );
    }

    #[test]
    fn test_resolve_value_surfaces_conversion_failure() {
        let count = Arc::new(OptionMetadata::single(
            "count",
            &["-c"],
            ValueType::Integer,
        ));
        let err = resolve_value(&ParseState::new(), &DefaultConverter, &count, "three")
            .unwrap_err();
        assert!(matches!(err, ParseError::Conversion(_)));
    }
}
