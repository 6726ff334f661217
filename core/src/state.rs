//! Incrementally-built, immutable parse state.
//!
//! A [`ParseState`] records everything the parser has resolved so far: the
//! context stack, the selected group/command, every option occurrence in
//! insertion order, the positional values, and any tokens that matched
//! nothing. Every transition is a `with_*` method that consumes the state
//! and returns an extended copy, so speculative matching attempts can be
//! discarded without side effects — matchers clone the state, extend the
//! clone, and only the winning clone survives.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::metadata::{CommandGroupMetadata, CommandMetadata, GlobalMetadata, OptionMetadata};
use crate::types::Value;

/// Scope the parser is currently working in.
///
/// Restrictions query the context stack to know what is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseContext {
    Global,
    Group,
    Command,
    Option,
    Args,
}

/// A single parsed occurrence of an option.
#[derive(Debug, Clone)]
pub struct ParsedOption {
    pub option: Arc<OptionMetadata>,
    pub value: Value,
}

/// The result (and in-progress record) of a parse.
///
/// # Examples
///
/// ```
/// use argot_core::*;
/// use std::sync::Arc;
///
/// let verbose = Arc::new(OptionMetadata::flag("verbose", &["-v"]));
/// let state = ParseState::new()
///     .push_context(ParseContext::Global)
///     .with_option_value(&verbose, Value::Bool(true))
///     .with_unparsed("mystery");
///
/// assert!(state.flag("verbose"));
/// assert_eq!(state.count_occurrences(&verbose), 1);
/// assert_eq!(state.unparsed_input(), ["mystery"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ParseState {
    context_stack: Vec<ParseContext>,
    global: Option<Arc<GlobalMetadata>>,
    group: Option<Arc<CommandGroupMetadata>>,
    command: Option<Arc<CommandMetadata>>,
    parsed_options: Vec<ParsedOption>,
    parsed_arguments: Vec<Value>,
    unparsed_input: Vec<String>,
}

impl ParseState {
    /// Creates an empty state with no context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enters a scope.
    pub fn push_context(mut self, context: ParseContext) -> Self {
        self.context_stack.push(context);
        self
    }

    /// Leaves the innermost scope.
    pub fn pop_context(mut self) -> Self {
        debug_assert!(!self.context_stack.is_empty(), "unbalanced pop_context");
        self.context_stack.pop();
        self
    }

    /// The innermost scope, if any.
    pub fn current_context(&self) -> Option<ParseContext> {
        self.context_stack.last().copied()
    }

    pub fn context_stack(&self) -> &[ParseContext] {
        &self.context_stack
    }

    pub fn with_global(mut self, global: Arc<GlobalMetadata>) -> Self {
        self.global = Some(global);
        self
    }

    pub fn with_group(mut self, group: Arc<CommandGroupMetadata>) -> Self {
        self.group = Some(group);
        self
    }

    pub fn with_command(mut self, command: Arc<CommandMetadata>) -> Self {
        self.command = Some(command);
        self
    }

    /// Records one occurrence of `option` with its resolved value.
    pub fn with_option_value(mut self, option: &Arc<OptionMetadata>, value: Value) -> Self {
        self.parsed_options.push(ParsedOption {
            option: option.clone(),
            value,
        });
        self
    }

    /// Records one positional value.
    pub fn with_argument(mut self, value: Value) -> Self {
        self.parsed_arguments.push(value);
        self
    }

    /// Records a token that matched nothing.
    pub fn with_unparsed(mut self, token: impl Into<String>) -> Self {
        self.unparsed_input.push(token.into());
        self
    }

    pub fn global(&self) -> Option<&Arc<GlobalMetadata>> {
        self.global.as_ref()
    }

    /// The group selected by the parse, if any.
    pub fn group(&self) -> Option<&Arc<CommandGroupMetadata>> {
        self.group.as_ref()
    }

    /// The command selected by the parse, if any.
    pub fn command(&self) -> Option<&Arc<CommandMetadata>> {
        self.command.as_ref()
    }

    /// All option occurrences, in insertion order (duplicates retained).
    pub fn parsed_options(&self) -> &[ParsedOption] {
        &self.parsed_options
    }

    /// All positional values, in order.
    pub fn parsed_arguments(&self) -> &[Value] {
        &self.parsed_arguments
    }

    /// Tokens that matched no option, positional spec or default option.
    pub fn unparsed_input(&self) -> &[String] {
        &self.unparsed_input
    }

    /// Number of occurrences of `option` recorded so far.
    ///
    /// Occurrences are matched by title; titles are unique within a scope.
    pub fn count_occurrences(&self, option: &OptionMetadata) -> usize {
        self.parsed_options
            .iter()
            .filter(|parsed| parsed.option.title == option.title)
            .count()
    }

    /// Values of every occurrence of the option titled `title`, in order.
    pub fn option_values(&self, title: &str) -> Vec<&Value> {
        self.parsed_options
            .iter()
            .filter(|parsed| parsed.option.title == title)
            .map(|parsed| &parsed.value)
            .collect()
    }

    /// Value of the first occurrence of the option titled `title`.
    pub fn first_option_value(&self, title: &str) -> Option<&Value> {
        self.parsed_options
            .iter()
            .find(|parsed| parsed.option.title == title)
            .map(|parsed| &parsed.value)
    }

    /// Whether the option titled `title` occurred at least once.
    pub fn has_option(&self, title: &str) -> bool {
        self.parsed_options
            .iter()
            .any(|parsed| parsed.option.title == title)
    }

    /// Whether the flag titled `title` was set.
    pub fn flag(&self, title: &str) -> bool {
        self.first_option_value(title)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}
