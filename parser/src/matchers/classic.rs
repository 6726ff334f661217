//! Classic getopt form: bundled short flags like `-abc`, with an optional
//! trailing value for the last option (`-fvalue` or `-f value`).

use std::sync::LazyLock;

use regex::Regex;

use argot_core::{ParseContext, ParseError, ParseState, Result, Value, find_option};

use super::{MatchContext, OptionMatcher, resolve_value};
use crate::cursor::TokenCursor;

static SHORT_OPTIONS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^-[^-].*$").expect("static regex must compile"));

/// Matches a single-dash token whose characters are each a short option.
///
/// Every character must resolve (as `-c`) to an option of the current
/// scope, or the whole token is a non-match. Arity-0 options bundle freely;
/// an arity-1 option takes the rest of the token as its value, or the next
/// token when nothing follows it. Options of higher arity cannot be spelled
/// this way and raise an error rather than silently mis-consuming.
pub(crate) struct ClassicGetOptMatcher;

impl OptionMatcher for ClassicGetOptMatcher {
    fn name(&self) -> &'static str {
        "classic-getopt"
    }

    fn try_match<'t>(
        &self,
        ctx: &MatchContext<'_>,
        state: &ParseState,
        cursor: TokenCursor<'t>,
    ) -> Result<Option<(ParseState, TokenCursor<'t>)>> {
        let Some(token) = cursor.peek() else {
            return Ok(None);
        };
        if !SHORT_OPTIONS.is_match(token) {
            return Ok(None);
        }

        let mut cursor = cursor;
        cursor.advance();
        let mut state = state.clone();

        let chars = &token[1..];
        for (offset, ch) in chars.char_indices() {
            let name = format!("-{ch}");
            let Some(option) = find_option(ctx.options, &name) else {
                return Ok(None);
            };
            let option = option.clone();

            state = state.push_context(ParseContext::Option);
            match option.arity {
                0 => {
                    state = state
                        .with_option_value(&option, Value::Bool(true))
                        .pop_context();
                }
                1 => {
                    let rest = &chars[offset + ch.len_utf8()..];
                    let raw = if !rest.is_empty() {
                        rest
                    } else if let Some(next) = cursor.advance() {
                        next
                    } else {
                        // Value option at the end of the bundle with no
                        // token left to take the value from.
                        return Ok(None);
                    };
                    let value = resolve_value(&state, ctx.converter, &option, raw)?;
                    state = state.with_option_value(&option, value).pop_context();
                    return Ok(Some((state, cursor)));
                }
                arity => {
                    return Err(ParseError::UnsupportedSyntax {
                        title: option.title.clone(),
                        arity,
                    });
                }
            }
        }

        Ok(Some((state, cursor)))
    }
}
