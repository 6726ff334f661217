//! Copyable cursor over the raw token stream.
//!
//! Matchers receive the cursor by value: they advance their own copy and
//! return it only on a successful match, so a failed attempt leaves the
//! caller's position untouched. This is what makes speculative matching
//! (e.g. an arity-N option that runs out of input) side-effect free.

/// Position in a borrowed token slice.
#[derive(Debug, Clone, Copy)]
pub(crate) struct TokenCursor<'t> {
    tokens: &'t [String],
    pos: usize,
}

impl<'t> TokenCursor<'t> {
    pub(crate) fn new(tokens: &'t [String]) -> Self {
        Self { tokens, pos: 0 }
    }

    /// The next token, without consuming it.
    pub(crate) fn peek(&self) -> Option<&'t str> {
        self.tokens.get(self.pos).map(String::as_str)
    }

    /// Consumes and returns the next token.
    pub(crate) fn advance(&mut self) -> Option<&'t str> {
        let token = self.peek()?;
        self.pos += 1;
        Some(token)
    }

    pub(crate) fn has_next(&self) -> bool {
        self.pos < self.tokens.len()
    }
}
