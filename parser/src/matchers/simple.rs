//! Simple option form: the token exactly equals one of an option's
//! spellings, with values (if any) in the following tokens.

use argot_core::{ParseContext, ParseState, Result, Value, find_option};

use super::{MatchContext, OptionMatcher, resolve_value};
use crate::cursor::TokenCursor;

/// Matches `--opt` / `-o` with values supplied as separate tokens.
///
/// Arity 0 records `true`. Arity 1 consumes exactly one following token.
/// Arity N consumes greedily up to N following tokens, stopping early at a
/// bare `--` or at a token that itself matches an option of the current
/// scope; the occurrence commits only when exactly N values were consumed
/// or the stop was deliberate. Running out of input mid-occurrence is a
/// non-match so the tokens fall through to other interpretations.
pub(crate) struct SimpleMatcher;

impl OptionMatcher for SimpleMatcher {
    fn name(&self) -> &'static str {
        "simple"
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
        let Some(option) = find_option(ctx.options, token) else {
            return Ok(None);
        };
        let option = option.clone();

        let mut cursor = cursor;
        cursor.advance();
        let mut state = state.clone().push_context(ParseContext::Option);

        match option.arity {
            0 => {
                state = state
                    .with_option_value(&option, Value::Bool(true))
                    .pop_context();
                Ok(Some((state, cursor)))
            }
            1 => {
                let Some(raw) = cursor.advance() else {
                    // Option name with no value left: not a match.
                    return Ok(None);
                };
                let value = resolve_value(&state, ctx.converter, &option, raw)?;
                state = state.with_option_value(&option, value).pop_context();
                Ok(Some((state, cursor)))
            }
            arity => {
                let mut values = Vec::new();
                let mut terminated = false;

                while values.len() < arity {
                    let Some(peeked) = cursor.peek() else {
                        break;
                    };
                    if peeked == "--" || find_option(ctx.options, peeked).is_some() {
                        terminated = true;
                        break;
                    }
                    let value = resolve_value(&state, ctx.converter, &option, peeked)?;
                    cursor.advance();
                    values.push(value);
                }

                // Partial consumption is only valid when deliberately
                // terminated, not when the input simply ran out.
                if values.len() == arity || terminated {
                    state = state
                        .with_option_value(&option, Value::List(values))
                        .pop_context();
                    Ok(Some((state, cursor)))
                } else {
                    Ok(None)
                }
            }
        }
    }
}
