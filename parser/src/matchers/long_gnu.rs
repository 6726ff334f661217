//! Long GNU getopt form: `--opt=value` in a single token.

use argot_core::{ParseContext, ParseState, Result, find_option};

use super::{MatchContext, OptionMatcher, resolve_value};
use crate::cursor::TokenCursor;

/// Matches `name=value` tokens (split on the first `=`).
///
/// The name part must resolve to an option of arity exactly 1; any other
/// arity is a silent non-match so the token can be interpreted by another
/// strategy or fall through as a positional.
pub(crate) struct LongGnuMatcher;

impl OptionMatcher for LongGnuMatcher {
    fn name(&self) -> &'static str {
        "long-gnu"
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
        let Some((name, raw)) = token.split_once('=') else {
            return Ok(None);
        };
        let Some(option) = find_option(ctx.options, name) else {
            return Ok(None);
        };
        if option.arity != 1 {
            return Ok(None);
        }
        let option = option.clone();

        let mut cursor = cursor;
        cursor.advance();

        let mut state = state.clone().push_context(ParseContext::Option);
        let value = resolve_value(&state, ctx.converter, &option, raw)?;
        state = state.with_option_value(&option, value).pop_context();

        Ok(Some((state, cursor)))
    }
}
