//! Name and abbreviation resolution for groups and commands.
//!
//! An exact name match always wins. When abbreviation is enabled, a token
//! that is a *unique* prefix of exactly one candidate resolves to it; a
//! prefix shared by several candidates resolves to nothing — ambiguity is a
//! failure to match, never an arbitrary pick and never an error, so
//! resolution falls through to default-command/default-group handling.

use std::sync::Arc;

use argot_core::{CommandGroupMetadata, CommandMetadata};

/// Resolves `token` against `items` by exact name, or by unique prefix when
/// `abbreviate` is set.
pub fn find_by_name<'a, T>(
    token: &str,
    items: &'a [Arc<T>],
    abbreviate: bool,
    name_of: impl Fn(&T) -> &str,
) -> Option<&'a Arc<T>> {
    if let Some(exact) = items.iter().find(|item| name_of(item) == token) {
        return Some(exact);
    }
    if !abbreviate {
        return None;
    }

    let mut prefixed = items.iter().filter(|item| name_of(item).starts_with(token));
    let first = prefixed.next()?;
    match prefixed.next() {
        // Shared prefix: ambiguous, so nothing matches.
        Some(_) => None,
        None => Some(first),
    }
}

/// Resolves a token to a command group.
pub fn find_group<'a>(
    token: &str,
    groups: &'a [Arc<CommandGroupMetadata>],
    abbreviate: bool,
) -> Option<&'a Arc<CommandGroupMetadata>> {
    find_by_name(token, groups, abbreviate, |group| &group.name)
}

/// Resolves a token to a command.
pub fn find_command<'a>(
    token: &str,
    commands: &'a [Arc<CommandMetadata>],
    abbreviate: bool,
) -> Option<&'a Arc<CommandMetadata>> {
    find_by_name(token, commands, abbreviate, |command| &command.name)
}
