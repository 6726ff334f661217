//! Structural validation of the metadata graph.
//!
//! The parser assumes metadata is internally consistent: no duplicate
//! spellings within a scope, well-formed option names, defaults that
//! actually belong to their scope. [`validate_global`] checks those
//! invariants up front so inconsistencies surface as build-time errors
//! rather than as baffling parse behavior.
//!
//! # Examples
//!
//! ```
//! use argot_core::*;
//!
//! let global = GlobalMetadata::new()
//!     .with_option(OptionMetadata::flag("verbose", &["-v", "--verbose"]))
//!     .with_command(CommandMetadata::new("copy"));
//! assert!(validate_global(&global).is_empty());
//!
//! // Duplicate spelling within one scope → error
//! let bad = GlobalMetadata::new()
//!     .with_option(OptionMetadata::flag("verbose", &["-v"]))
//!     .with_option(OptionMetadata::flag("version", &["-v"]));
//! assert!(!validate_global(&bad).is_empty());
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::metadata::{
    ArgumentsMetadata, CommandGroupMetadata, CommandMetadata, GlobalMetadata, OptionMetadata,
};

/// Structural problems found in a metadata graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// An option has an empty or whitespace-only title.
    #[error("option title cannot be empty")]
    EmptyOptionTitle,
    /// An option declares no spellings.
    #[error("option {0} must declare at least one name")]
    MissingOptionNames(String),
    /// An option spelling does not start with a dash.
    #[error("invalid option name: {0}")]
    InvalidOptionName(String),
    /// Two options in the same scope share a spelling.
    #[error("duplicate option name in scope: {0}")]
    DuplicateOptionName(String),
    /// A command has an empty name.
    #[error("command name cannot be empty")]
    EmptyCommandName,
    /// A group has an empty name.
    #[error("group name cannot be empty")]
    EmptyGroupName,
    /// Two commands in the same scope share a name.
    #[error("duplicate command in scope: {0}")]
    DuplicateCommandName(String),
    /// Two groups share a name.
    #[error("duplicate group: {0}")]
    DuplicateGroupName(String),
    /// A group's default command is not one of its members.
    #[error("default command {command} is not a member of group {group}")]
    DefaultCommandNotInGroup { group: String, command: String },
    /// A default option must consume exactly one value token.
    #[error("default option {title} must have arity 1, found {arity}")]
    DefaultOptionArity { title: String, arity: usize },
    /// A command cannot have both a positional spec and a default option.
    #[error("command {0} declares both arguments and a default option")]
    DefaultOptionWithArguments(String),
    /// An arguments spec declares no titles.
    #[error("arguments spec must declare at least one title")]
    EmptyArgumentTitles,
    /// A bounded arguments arity of zero accepts nothing.
    #[error("arguments arity must be at least 1 when bounded")]
    ZeroArgumentsArity,
}

/// Validates a full metadata graph.
///
/// Returns all problems found; an empty vector means the graph satisfies
/// every structural invariant the parser relies on.
pub fn validate_global(global: &GlobalMetadata) -> Vec<MetadataError> {
    let mut errors = Vec::new();

    errors.extend(validate_options(&global.options));

    let mut seen_groups: HashSet<&str> = HashSet::new();
    for group in &global.groups {
        if group.name.trim().is_empty() {
            errors.push(MetadataError::EmptyGroupName);
            continue;
        }
        if !seen_groups.insert(group.name.as_str()) {
            errors.push(MetadataError::DuplicateGroupName(group.name.clone()));
        }
        errors.extend(validate_group(group));
    }

    errors.extend(validate_commands(&global.default_group_commands));

    errors
}

/// Validates a single group: its options, commands, and default command.
pub fn validate_group(group: &CommandGroupMetadata) -> Vec<MetadataError> {
    let mut errors = Vec::new();

    errors.extend(validate_options(&group.options));
    errors.extend(validate_commands(&group.commands));

    if let Some(default) = &group.default_command
        && group.find_command(&default.name).is_none()
    {
        errors.push(MetadataError::DefaultCommandNotInGroup {
            group: group.name.clone(),
            command: default.name.clone(),
        });
    }

    errors
}

/// Validates a single command: its options, arguments spec, default option.
pub fn validate_command(command: &CommandMetadata) -> Vec<MetadataError> {
    let mut errors = Vec::new();

    if command.name.trim().is_empty() {
        errors.push(MetadataError::EmptyCommandName);
        return errors;
    }

    errors.extend(validate_options(&command.options));

    if let Some(arguments) = &command.arguments {
        errors.extend(validate_arguments(arguments));
        if command.default_option.is_some() {
            errors.push(MetadataError::DefaultOptionWithArguments(
                command.name.clone(),
            ));
        }
    }

    if let Some(default) = &command.default_option
        && default.arity != 1
    {
        errors.push(MetadataError::DefaultOptionArity {
            title: default.title.clone(),
            arity: default.arity,
        });
    }

    errors
}

fn validate_commands(commands: &[Arc<CommandMetadata>]) -> Vec<MetadataError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for command in commands {
        if !command.name.trim().is_empty() && !seen.insert(command.name.as_str()) {
            errors.push(MetadataError::DuplicateCommandName(command.name.clone()));
        }
        errors.extend(validate_command(command));
    }

    errors
}

fn validate_options(options: &[Arc<OptionMetadata>]) -> Vec<MetadataError> {
    let mut errors = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();

    for option in options {
        if option.title.trim().is_empty() {
            errors.push(MetadataError::EmptyOptionTitle);
            return errors;
        }
        if option.names.is_empty() {
            errors.push(MetadataError::MissingOptionNames(option.title.clone()));
            return errors;
        }

        for name in &option.names {
            if !name.starts_with('-') || name.len() < 2 {
                errors.push(MetadataError::InvalidOptionName(name.clone()));
                return errors;
            }
            if !seen.insert(name.as_str()) {
                errors.push(MetadataError::DuplicateOptionName(name.clone()));
                return errors;
            }
        }
    }

    errors
}

fn validate_arguments(arguments: &ArgumentsMetadata) -> Vec<MetadataError> {
    let mut errors = Vec::new();

    if arguments.titles.is_empty() {
        errors.push(MetadataError::EmptyArgumentTitles);
    }
    if arguments.arity == Some(0) {
        errors.push(MetadataError::ZeroArgumentsArity);
    }

    errors
}
