//! The parser orchestrator.
//!
//! Drives the matchers, the finder and the restriction checkpoints over a
//! full token stream, following the grammar
//!
//! ```text
//! global-options* group? group-options* (command (command-options* arg | "--" arg*)*)?
//! ```
//!
//! Tokens are never silently dropped: every token ends up in the parsed
//! options, the parsed arguments or the unparsed input of the returned
//! [`ParseState`].

use std::sync::Arc;

use tracing::{debug, trace};

use argot_core::{
    CommandGroupMetadata, CommandMetadata, DefaultConverter, GlobalMetadata, OptionMetadata,
    ParseContext, ParseError, ParseState, Result, ValueConverter,
};

use crate::cursor::TokenCursor;
use crate::finder::{find_command, find_group};
use crate::matchers::{MatchContext, matchers, resolve_value};

/// Parses token streams against a metadata graph.
///
/// The parser itself is stateless between calls; a single instance may be
/// shared across concurrent parses of independent token streams.
///
/// # Examples
///
/// ```
/// use argot_core::*;
/// use argot_parser::Parser;
/// use std::sync::Arc;
///
/// let global = Arc::new(
///     GlobalMetadata::new()
///         .with_option(OptionMetadata::flag("verbose", &["--verbose"]))
///         .with_command(CommandMetadata::new("run")),
/// );
///
/// let state = Parser::new().parse(&global, ["--verbose", "run"]).unwrap();
/// assert!(state.flag("verbose"));
/// assert_eq!(state.command().unwrap().name, "run");
/// ```
pub struct Parser {
    converter: Arc<dyn ValueConverter>,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser with the [`DefaultConverter`].
    pub fn new() -> Self {
        Self {
            converter: Arc::new(DefaultConverter),
        }
    }

    /// Creates a parser with a custom value converter.
    pub fn with_converter(converter: impl ValueConverter + 'static) -> Self {
        Self {
            converter: Arc::new(converter),
        }
    }

    /// Parses `tokens` against the full metadata graph.
    pub fn parse(
        &self,
        global: &Arc<GlobalMetadata>,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<ParseState> {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut cursor = TokenCursor::new(&tokens);
        let mut state = ParseState::new()
            .push_context(ParseContext::Global)
            .with_global(global.clone());

        (state, cursor) = self.parse_options(state, cursor, &global.options)?;

        let mut group: Option<Arc<CommandGroupMetadata>> = None;
        if let Some(token) = cursor.peek()
            && let Some(found) = find_group(token, &global.groups, global.abbreviated_commands)
        {
            let found = found.clone();
            debug!(group = %found.name, "resolved command group");
            cursor.advance();
            state = state
                .with_group(found.clone())
                .push_context(ParseContext::Group);
            (state, cursor) = self.parse_options(state, cursor, &found.options)?;
            group = Some(found);
        }

        let expected: &[Arc<CommandMetadata>] = match &group {
            Some(group) => &group.commands,
            None => &global.default_group_commands,
        };

        let mut resolved_from_token = false;
        let mut command = cursor.peek().and_then(|token| {
            let found = find_command(token, expected, global.abbreviated_commands)?;
            resolved_from_token = true;
            Some(found.clone())
        });
        if command.is_none() {
            command = match &group {
                Some(group) => group.default_command.clone(),
                None => global.default_command.clone(),
            };
        }

        match &command {
            None => {
                // No command and no default: the remaining tokens are the
                // caller's problem, not an error.
                while let Some(token) = cursor.advance() {
                    state = state.with_unparsed(token);
                }
            }
            Some(command) => {
                if resolved_from_token {
                    cursor.advance();
                }
                debug!(command = %command.name, "resolved command");
                state = state
                    .with_command(command.clone())
                    .push_context(ParseContext::Command);
                while cursor.has_next() {
                    (state, cursor) = self.parse_options(state, cursor, &command.options)?;
                    (state, cursor) = self.parse_args(state, cursor, command)?;
                }
            }
        }

        self.post_validate(&state, global, group.as_ref(), command.as_ref())?;

        if command.is_some() {
            state = state.pop_context();
        }
        if group.is_some() {
            state = state.pop_context();
        }
        Ok(state.pop_context())
    }

    /// Parses `tokens` against a single command, outside any group or
    /// global scope.
    pub fn parse_command(
        &self,
        command: &Arc<CommandMetadata>,
        tokens: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<ParseState> {
        let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
        let mut cursor = TokenCursor::new(&tokens);
        let mut state = ParseState::new()
            .with_command(command.clone())
            .push_context(ParseContext::Command);

        while cursor.has_next() {
            (state, cursor) = self.parse_options(state, cursor, &command.options)?;
            (state, cursor) = self.parse_args(state, cursor, command)?;
        }

        self.post_validate_command(&state, command)?;
        Ok(state.pop_context())
    }

    /// Greedily matches options until a token matches no strategy.
    fn parse_options<'t>(
        &self,
        mut state: ParseState,
        mut cursor: TokenCursor<'t>,
        options: &[Arc<OptionMetadata>],
    ) -> Result<(ParseState, TokenCursor<'t>)> {
        let ctx = MatchContext {
            options,
            converter: self.converter.as_ref(),
        };
        'next_token: while cursor.has_next() {
            for matcher in matchers() {
                if let Some((matched_state, matched_cursor)) =
                    matcher.try_match(&ctx, &state, cursor)?
                {
                    trace!(matcher = matcher.name(), "option matched");
                    state = matched_state;
                    cursor = matched_cursor;
                    continue 'next_token;
                }
            }
            break;
        }
        Ok((state, cursor))
    }

    /// Consumes one token as a positional, default-option value or unparsed
    /// input. A bare `--` drains the entire remainder as positionals with
    /// the default-option fallback disabled.
    fn parse_args<'t>(
        &self,
        mut state: ParseState,
        mut cursor: TokenCursor<'t>,
        command: &Arc<CommandMetadata>,
    ) -> Result<(ParseState, TokenCursor<'t>)> {
        let Some(token) = cursor.advance() else {
            return Ok((state, cursor));
        };
        if token == "--" {
            while let Some(token) = cursor.advance() {
                state = self.parse_arg(state, command, token, false)?;
            }
        } else {
            state = self.parse_arg(state, command, token, true)?;
        }
        Ok((state, cursor))
    }

    fn parse_arg(
        &self,
        mut state: ParseState,
        command: &Arc<CommandMetadata>,
        token: &str,
        allow_default_option: bool,
    ) -> Result<ParseState> {
        if let Some(arguments) = &command.arguments {
            if let Some(limit) = arguments.arity
                && state.parsed_arguments().len() >= limit
            {
                return Err(ParseError::TooManyArguments {
                    limit,
                    token: token.to_string(),
                });
            }
            state = state.push_context(ParseContext::Args);
            for restriction in &arguments.restrictions {
                restriction.pre_validate_arguments(&state, arguments, token)?;
            }
            let value = self
                .converter
                .convert(arguments.title(), &arguments.value_type, token)?;
            state = state.with_argument(value).pop_context();
        } else if allow_default_option
            && let Some(option) = &command.default_option
        {
            state = state.push_context(ParseContext::Option);
            let value = resolve_value(&state, self.converter.as_ref(), option, token)?;
            state = state.with_option_value(option, value).pop_context();
        } else {
            state = state.with_unparsed(token);
        }
        Ok(state)
    }

    /// Runs every post-validate checkpoint for the scopes the parse
    /// resolved, before any context is popped.
    fn post_validate(
        &self,
        state: &ParseState,
        global: &Arc<GlobalMetadata>,
        group: Option<&Arc<CommandGroupMetadata>>,
        command: Option<&Arc<CommandMetadata>>,
    ) -> Result<()> {
        Self::post_validate_options(state, &global.options)?;
        if let Some(group) = group {
            Self::post_validate_options(state, &group.options)?;
        }
        if let Some(command) = command {
            self.post_validate_command(state, command)?;
        }
        Ok(())
    }

    fn post_validate_command(&self, state: &ParseState, command: &CommandMetadata) -> Result<()> {
        Self::post_validate_options(state, &command.options)?;
        if let Some(arguments) = &command.arguments {
            if arguments.required && state.parsed_arguments().is_empty() {
                return Err(ParseError::MissingRequiredArguments {
                    title: arguments.title().to_string(),
                });
            }
            for restriction in &arguments.restrictions {
                restriction.post_validate_arguments(state, arguments)?;
            }
        }
        Ok(())
    }

    fn post_validate_options(state: &ParseState, options: &[Arc<OptionMetadata>]) -> Result<()> {
        for option in options {
            for restriction in &option.restrictions {
                restriction.post_validate_option(state, option)?;
            }
        }
        Ok(())
    }
}

/// Parses `tokens` against `global` with a default-configured [`Parser`].
pub fn parse(
    global: &Arc<GlobalMetadata>,
    tokens: impl IntoIterator<Item = impl Into<String>>,
) -> Result<ParseState> {
    Parser::new().parse(global, tokens)
}

#[cfg(test)]
mod tests {
    use super::*;
    use argot_core::{ArgumentsMetadata, Value, ValueType};

    fn copy_command() -> CommandMetadata {
        CommandMetadata::new("copy")
            .with_option(OptionMetadata::flag("force", &["-f", "--force"]))
            .with_arguments(ArgumentsMetadata::new(&["src", "dst"], ValueType::Path).with_arity(2))
    }

    #[test]
    fn test_context_stack_is_empty_after_parse() {
        let global = Arc::new(
            GlobalMetadata::new()
                .with_option(OptionMetadata::flag("verbose", &["-v"]))
                .with_command(copy_command()),
        );

        let state = parse(&global, ["-v", "copy", "a", "b"]).unwrap();
        assert!(state.context_stack().is_empty());
    }

    #[test]
    fn test_no_command_and_no_default_drains_to_unparsed() {
        let global = Arc::new(
            GlobalMetadata::new().with_option(OptionMetadata::flag("verbose", &["-v"])),
        );

        let state = parse(&global, ["-v", "mystery", "tokens"]).unwrap();
        assert!(state.flag("verbose"));
        assert!(state.command().is_none());
        assert_eq!(state.unparsed_input(), ["mystery", "tokens"]);
    }

    #[test]
    fn test_default_option_receives_bare_tokens() {
        let name = Arc::new(OptionMetadata::single(
            "name",
            &["-n"],
            ValueType::String,
        ));
        let global = Arc::new(
            GlobalMetadata::new()
                .with_command(CommandMetadata::new("tag").with_default_option(name)),
        );

        let state = parse(&global, ["tag", "v1.0"]).unwrap();
        assert_eq!(
            state.first_option_value("name"),
            Some(&Value::String("v1.0".into()))
        );
    }

    #[test]
    fn test_default_command_is_selected_without_a_token() {
        let copy = Arc::new(copy_command());
        let global = Arc::new(
            GlobalMetadata::new()
                .with_command(copy.clone())
                .with_default_command(copy),
        );

        let state = parse(&global, ["a.txt", "b.txt"]).unwrap();
        assert_eq!(state.command().unwrap().name, "copy");
        assert_eq!(state.parsed_arguments().len(), 2);
    }

    #[test]
    fn test_group_scopes_its_options_and_commands() {
        let global = Arc::new(
            GlobalMetadata::new().with_group(
                CommandGroupMetadata::new("remote")
                    .with_option(OptionMetadata::flag("quiet", &["-q"]))
                    .with_command(CommandMetadata::new("add")),
            ),
        );

        let state = parse(&global, ["remote", "-q", "add"]).unwrap();
        assert_eq!(state.group().unwrap().name, "remote");
        assert_eq!(state.command().unwrap().name, "add");
        assert!(state.flag("quiet"));
    }

    #[test]
    fn test_parse_command_entry_point() {
        let copy = Arc::new(copy_command());
        let state = Parser::new()
            .parse_command(&copy, ["--force", "a.txt", "b.txt"])
            .unwrap();

        assert!(state.flag("force"));
        assert_eq!(state.parsed_arguments().len(), 2);
        assert!(state.context_stack().is_empty());
    }

    /// Uppercases strings and refuses every other target type.
    struct UppercaseConverter;

    impl ValueConverter for UppercaseConverter {
        fn convert(
            &self,
            title: &str,
            target: &ValueType,
            raw: &str,
        ) -> std::result::Result<Value, argot_core::ConversionError> {
            match target {
                ValueType::String => Ok(Value::String(raw.to_uppercase())),
                _ => Err(argot_core::ConversionError::new(title, raw, target)),
            }
        }
    }

    #[test]
    fn test_custom_converter_transforms_values() {
        let global = Arc::new(GlobalMetadata::new().with_option(OptionMetadata::single(
            "name",
            &["-n"],
            ValueType::String,
        )));

        let state = Parser::with_converter(UppercaseConverter)
            .parse(&global, ["-n", "out.txt"])
            .unwrap();
        assert_eq!(
            state.first_option_value("name"),
            Some(&Value::String("OUT.TXT".into()))
        );
    }

    #[test]
    fn test_custom_converter_failure_surfaces_unmodified() {
        let global = Arc::new(GlobalMetadata::new().with_option(OptionMetadata::single(
            "count",
            &["-c"],
            ValueType::Integer,
        )));

        let err = Parser::with_converter(UppercaseConverter)
            .parse(&global, ["-c", "3"])
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::Conversion(argot_core::ConversionError::new(
                "count",
                "3",
                &ValueType::Integer,
            ))
        );
    }

    #[test]
    fn test_too_many_arguments_names_the_offender() {
        let global = Arc::new(GlobalMetadata::new().with_command(copy_command()));

        let err = parse(&global, ["copy", "a", "b", "c"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::TooManyArguments {
                limit: 2,
                token: "c".into(),
            }
        );
    }
}
