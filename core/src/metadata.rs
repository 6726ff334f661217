//! The immutable metadata graph consumed by the parser.
//!
//! A program description is a tree: [`GlobalMetadata`] at the root, holding
//! global options, [`CommandGroupMetadata`] groups and default-group
//! [`CommandMetadata`] commands; commands hold their own options, an optional
//! positional-argument spec and an optional default option.
//!
//! The graph is built once, up front, with the builder-style constructors
//! below (declarative construction replaces the runtime introspection some
//! frameworks use) and is never mutated during parsing. Nodes are shared via
//! [`Arc`] so a default command can also appear in its group's command list
//! and so parse state can observe metadata without owning it.
//!
//! # Examples
//!
//! ```
//! use argot_core::*;
//! use std::sync::Arc;
//!
//! let copy = Arc::new(
//!     CommandMetadata::new("copy")
//!         .with_option(OptionMetadata::flag("force", &["-f", "--force"]))
//!         .with_arguments(ArgumentsMetadata::new(&["src", "dst"], ValueType::Path).with_arity(2)),
//! );
//!
//! let global = GlobalMetadata::new()
//!     .with_option(OptionMetadata::flag("verbose", &["--verbose"]))
//!     .with_command(copy.clone())
//!     .with_default_command(copy);
//!
//! assert!(find_option(&global.options, "--verbose").is_some());
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::restriction::Restriction;
use crate::types::ValueType;

/// Description of a single named option.
///
/// An option is identified by its `title` (used in diagnostics and for
/// looking up parsed values) and matched against tokens by any of its
/// `names` (e.g. `-f` and `--file`). `arity` is the number of value tokens
/// consumed per occurrence; zero makes it a flag.
///
/// # Examples
///
/// ```
/// use argot_core::{OptionMetadata, ValueType};
///
/// let name = OptionMetadata::single("name", &["-n", "--name"], ValueType::String);
/// assert!(name.matches("-n"));
/// assert!(name.matches("--name"));
/// assert_eq!(name.arity, 1);
///
/// let verbose = OptionMetadata::flag("verbose", &["-v"]);
/// assert_eq!(verbose.arity, 0);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionMetadata {
    /// Identifier used in diagnostics and value lookups.
    pub title: String,
    /// Accepted spellings, each including its dashes.
    pub names: Vec<String>,
    /// Number of value tokens consumed per occurrence (0 = flag).
    pub arity: usize,
    /// Target type for value conversion.
    pub value_type: ValueType,
    /// When set, every raw value token must be a member of this set.
    pub allowed_values: Option<Vec<String>>,
    /// Validators applied at the restriction checkpoints.
    #[serde(skip)]
    pub restrictions: Vec<Arc<dyn Restriction>>,
}

impl OptionMetadata {
    /// Creates a flag (arity 0, boolean).
    pub fn flag(title: &str, names: &[&str]) -> Self {
        Self::with_arity(title, names, 0, ValueType::Bool)
    }

    /// Creates a single-valued option (arity 1).
    pub fn single(title: &str, names: &[&str], value_type: ValueType) -> Self {
        Self::with_arity(title, names, 1, value_type)
    }

    /// Creates an option with an explicit arity.
    pub fn with_arity(title: &str, names: &[&str], arity: usize, value_type: ValueType) -> Self {
        Self {
            title: title.to_string(),
            names: names.iter().map(|s| s.to_string()).collect(),
            arity,
            value_type,
            allowed_values: None,
            restrictions: Vec::new(),
        }
    }

    /// Restricts value tokens to the given set.
    pub fn with_allowed_values(mut self, values: &[&str]) -> Self {
        self.allowed_values = Some(values.iter().map(|s| s.to_string()).collect());
        self
    }

    /// Attaches a restriction.
    pub fn with_restriction(mut self, restriction: impl Restriction + 'static) -> Self {
        self.restrictions.push(Arc::new(restriction));
        self
    }

    /// Checks whether `token` is one of this option's spellings.
    pub fn matches(&self, token: &str) -> bool {
        self.names.iter().any(|name| name == token)
    }
}

/// Description of a command's positional arguments.
///
/// `arity` is the maximum number of positional values accepted; `None` is
/// the unbounded sentinel.
///
/// # Examples
///
/// ```
/// use argot_core::{ArgumentsMetadata, ValueType};
///
/// let args = ArgumentsMetadata::new(&["src", "dst"], ValueType::Path)
///     .with_arity(2)
///     .required();
/// assert_eq!(args.arity, Some(2));
/// assert!(args.required);
/// assert_eq!(args.title(), "src");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArgumentsMetadata {
    /// Ordered display titles; the first is used in conversion diagnostics.
    pub titles: Vec<String>,
    /// Maximum number of positional values; `None` means unbounded.
    pub arity: Option<usize>,
    /// Whether at least one positional value must be supplied.
    pub required: bool,
    /// Target type for value conversion.
    pub value_type: ValueType,
    /// Validators applied at the restriction checkpoints.
    #[serde(skip)]
    pub restrictions: Vec<Arc<dyn Restriction>>,
}

impl ArgumentsMetadata {
    /// Creates an unbounded, optional arguments spec.
    pub fn new(titles: &[&str], value_type: ValueType) -> Self {
        Self {
            titles: titles.iter().map(|s| s.to_string()).collect(),
            arity: None,
            required: false,
            value_type,
            restrictions: Vec::new(),
        }
    }

    /// Bounds the number of accepted positional values.
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    /// Marks the arguments as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches a restriction.
    pub fn with_restriction(mut self, restriction: impl Restriction + 'static) -> Self {
        self.restrictions.push(Arc::new(restriction));
        self
    }

    /// Primary title, used in diagnostics.
    pub fn title(&self) -> &str {
        self.titles.first().map(String::as_str).unwrap_or("arguments")
    }
}

/// Description of a single command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandMetadata {
    pub name: String,
    /// Command-level options.
    pub options: Vec<Arc<OptionMetadata>>,
    /// Positional-argument spec, if the command accepts positionals.
    pub arguments: Option<ArgumentsMetadata>,
    /// Option that receives bare tokens when no positional spec exists.
    pub default_option: Option<Arc<OptionMetadata>>,
}

impl CommandMetadata {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
            arguments: None,
            default_option: None,
        }
    }

    pub fn with_option(mut self, option: impl Into<Arc<OptionMetadata>>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn with_arguments(mut self, arguments: ArgumentsMetadata) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// Sets the default option. The option is also added to the command's
    /// option list when not already present, so its spellings stay matchable.
    pub fn with_default_option(mut self, option: impl Into<Arc<OptionMetadata>>) -> Self {
        let option = option.into();
        if !self.options.iter().any(|o| Arc::ptr_eq(o, &option)) {
            self.options.push(option.clone());
        }
        self.default_option = Some(option);
        self
    }
}

/// Description of a command group: a named scope with its own options and
/// commands, plus an optional default command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandGroupMetadata {
    pub name: String,
    /// Group-level options.
    pub options: Vec<Arc<OptionMetadata>>,
    /// Commands resolvable inside this group.
    pub commands: Vec<Arc<CommandMetadata>>,
    /// Command selected when no token resolves to a group member.
    pub default_command: Option<Arc<CommandMetadata>>,
}

impl CommandGroupMetadata {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            options: Vec::new(),
            commands: Vec::new(),
            default_command: None,
        }
    }

    pub fn with_option(mut self, option: impl Into<Arc<OptionMetadata>>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn with_command(mut self, command: impl Into<Arc<CommandMetadata>>) -> Self {
        self.commands.push(command.into());
        self
    }

    pub fn with_default_command(mut self, command: impl Into<Arc<CommandMetadata>>) -> Self {
        self.default_command = Some(command.into());
        self
    }

    /// Finds a member command by exact name.
    pub fn find_command(&self, name: &str) -> Option<&Arc<CommandMetadata>> {
        self.commands.iter().find(|c| c.name == name)
    }
}

/// Root of the metadata graph.
///
/// # Examples
///
/// ```
/// use argot_core::*;
///
/// let global = GlobalMetadata::new()
///     .with_option(OptionMetadata::flag("debug", &["--debug"]))
///     .with_group(CommandGroupMetadata::new("remote"))
///     .allow_abbreviated_commands();
///
/// assert!(global.find_group("remote").is_some());
/// assert!(global.abbreviated_commands);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalMetadata {
    /// Options recognized before any group or command token.
    pub options: Vec<Arc<OptionMetadata>>,
    /// Command groups.
    pub groups: Vec<Arc<CommandGroupMetadata>>,
    /// Commands resolvable without entering a group.
    pub default_group_commands: Vec<Arc<CommandMetadata>>,
    /// Command selected when no token resolves and no group was entered.
    pub default_command: Option<Arc<CommandMetadata>>,
    /// Whether unambiguous prefixes resolve group and command names.
    pub abbreviated_commands: bool,
}

impl GlobalMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, option: impl Into<Arc<OptionMetadata>>) -> Self {
        self.options.push(option.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<Arc<CommandGroupMetadata>>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// Adds a command to the default (group-less) command set.
    pub fn with_command(mut self, command: impl Into<Arc<CommandMetadata>>) -> Self {
        self.default_group_commands.push(command.into());
        self
    }

    pub fn with_default_command(mut self, command: impl Into<Arc<CommandMetadata>>) -> Self {
        self.default_command = Some(command.into());
        self
    }

    /// Enables unique-prefix resolution of group and command names.
    pub fn allow_abbreviated_commands(mut self) -> Self {
        self.abbreviated_commands = true;
        self
    }

    /// Finds a group by exact name.
    pub fn find_group(&self, name: &str) -> Option<&Arc<CommandGroupMetadata>> {
        self.groups.iter().find(|g| g.name == name)
    }
}

/// Finds the option in `options` whose spellings include `token`.
///
/// # Examples
///
/// ```
/// use argot_core::{find_option, OptionMetadata};
/// use std::sync::Arc;
///
/// let options = vec![Arc::new(OptionMetadata::flag("force", &["-f", "--force"]))];
/// assert!(find_option(&options, "--force").is_some());
/// assert!(find_option(&options, "--quiet").is_none());
/// ```
pub fn find_option<'a>(
    options: &'a [Arc<OptionMetadata>],
    token: &str,
) -> Option<&'a Arc<OptionMetadata>> {
    options.iter().find(|option| option.matches(token))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_matches_all_spellings() {
        let opt = OptionMetadata::single("file", &["-f", "--file"], ValueType::Path);
        assert!(opt.matches("-f"));
        assert!(opt.matches("--file"));
        assert!(!opt.matches("-x"));
    }

    #[test]
    fn test_default_option_is_also_listed() {
        let name = Arc::new(OptionMetadata::single(
            "name",
            &["-n"],
            ValueType::String,
        ));
        let cmd = CommandMetadata::new("run").with_default_option(name.clone());
        assert!(find_option(&cmd.options, "-n").is_some());
        assert!(Arc::ptr_eq(cmd.default_option.as_ref().unwrap(), &name));

        // Adding it twice must not duplicate the listing.
        let cmd = CommandMetadata::new("run")
            .with_option(name.clone())
            .with_default_option(name);
        assert_eq!(cmd.options.len(), 1);
    }

    #[test]
    fn test_group_find_command_is_exact() {
        let group = CommandGroupMetadata::new("remote")
            .with_command(CommandMetadata::new("add"))
            .with_command(CommandMetadata::new("remove"));
        assert!(group.find_command("add").is_some());
        assert!(group.find_command("ad").is_none());
    }

    #[test]
    fn test_metadata_serde_round_trip_drops_restrictions() {
        let global = GlobalMetadata::new()
            .with_option(
                OptionMetadata::flag("verbose", &["-v"])
                    .with_restriction(crate::restriction::Required),
            )
            .with_command(CommandMetadata::new("copy"));

        let json = serde_json::to_string(&global).unwrap();
        let back: GlobalMetadata = serde_json::from_str(&json).unwrap();
        assert_eq!(back.options[0].names, vec!["-v".to_string()]);
        // Restrictions are runtime-only and do not survive serialization.
        assert!(back.options[0].restrictions.is_empty());
    }
}
