//! Command table and dispatch.
//!
//! Every command is one [`CommandSpec`] row: its word path, the arguments it
//! takes, and the handler that runs it. The table is checked once when the
//! [`Dispatcher`] is built; a line is dispatched to the row with the longest
//! matching path.

mod gpu;
mod list;
mod search;
mod system;

use crate::error::CommandError;
use crate::state::AppState;
use gpudex_core::GpudexError;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Handler signature shared by every command.
pub type Handler = fn(&mut AppState, &Invocation) -> Result<String, CommandError>;

/// Positional arguments a command accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Positional {
    /// No positional arguments
    None,
    /// Exactly one token
    One(&'static str),
    /// Exactly two tokens; quote names that contain spaces
    Two(&'static str, &'static str),
    /// All remaining tokens joined with spaces
    Rest {
        /// Placeholder shown in usage text
        name: &'static str,
        /// Whether at least one token is needed
        required: bool,
    },
}

/// What an option consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Presence only
    Flag,
    /// The next token
    Value,
    /// Every following token up to the next option
    Values,
}

/// One `-x`/`--long` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionSpec {
    /// Short form, without the dash
    pub short: char,
    /// Long form, without the dashes; also the lookup key
    pub long: &'static str,
    /// What the option consumes
    pub kind: OptionKind,
}

/// One row of the command table.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    /// Command words, e.g. `["list", "new"]`
    pub path: &'static [&'static str],
    /// Usage line shown in help and argument errors
    pub usage: &'static str,
    /// One-line description
    pub summary: &'static str,
    /// Help section heading
    pub section: &'static str,
    /// Positional arguments
    pub positional: Positional,
    /// Accepted options
    pub options: &'static [OptionSpec],
    /// Whether running this command ends the session
    pub exits: bool,
    /// Implementation
    pub handler: Handler,
}

impl CommandSpec {
    /// The command words joined with spaces.
    #[must_use]
    pub fn name(&self) -> String {
        self.path.join(" ")
    }

    fn option(&self, token: &str) -> Option<&OptionSpec> {
        if let Some(long) = token.strip_prefix("--") {
            return self.options.iter().find(|o| o.long == long);
        }
        let short = token.strip_prefix('-')?;
        let mut chars = short.chars();
        let c = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        self.options.iter().find(|o| o.short == c)
    }
}

/// Parsed arguments for one command line.
#[derive(Debug, Default)]
pub struct Invocation {
    positionals: Vec<String>,
    options: HashMap<&'static str, Vec<String>>,
}

impl Invocation {
    /// Positional tokens joined with spaces, or `None` if there are none.
    #[must_use]
    pub fn rest(&self) -> Option<String> {
        if self.positionals.is_empty() {
            None
        } else {
            Some(self.positionals.join(" "))
        }
    }

    /// Positional token at `index`.
    #[must_use]
    pub fn arg(&self, index: usize) -> Option<&str> {
        self.positionals.get(index).map(String::as_str)
    }

    /// Whether an option was given.
    #[must_use]
    pub fn has(&self, long: &str) -> bool {
        self.options.contains_key(long)
    }

    /// First value of an option.
    #[must_use]
    pub fn value(&self, long: &str) -> Option<&str> {
        self.options
            .get(long)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Every value of an option.
    #[must_use]
    pub fn values(&self, long: &str) -> Option<&[String]> {
        self.options.get(long).map(Vec::as_slice)
    }

    fn parse(spec: &CommandSpec, tokens: &[String]) -> Result<Self, CommandError> {
        let mut invocation = Self::default();
        let mut iter = tokens.iter().peekable();

        while let Some(token) = iter.next() {
            let Some(option) = spec.option(token) else {
                invocation.positionals.push(token.clone());
                continue;
            };

            let values = invocation.options.entry(option.long).or_default();
            match option.kind {
                OptionKind::Flag => {}
                OptionKind::Value => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::usage(format!("Option '{token}' needs a value"), spec.usage)
                    })?;
                    values.push(value.clone());
                }
                OptionKind::Values => {
                    while let Some(next) = iter.next_if(|t| spec.option(t).is_none()) {
                        values.push(next.clone());
                    }
                    if values.is_empty() {
                        return Err(CommandError::usage(
                            format!("Option '{token}' needs at least one value"),
                            spec.usage,
                        ));
                    }
                }
            }
        }

        invocation.check_positionals(spec)?;
        Ok(invocation)
    }

    fn check_positionals(&self, spec: &CommandSpec) -> Result<(), CommandError> {
        let count = self.positionals.len();
        let problem = match spec.positional {
            Positional::None if count > 0 => Some(format!(
                "'{}' takes no arguments, got '{}'",
                spec.name(),
                self.positionals.join(" ")
            )),
            Positional::One(name) if count != 1 => Some(format!("Expected exactly one <{name}>")),
            Positional::Two(first, second) if count != 2 => Some(format!(
                "Expected <{first}> and <{second}> (quote names that contain spaces)"
            )),
            Positional::Rest {
                name,
                required: true,
            } if count == 0 => Some(format!("Missing <{name}>")),
            _ => None,
        };

        match problem {
            Some(message) => Err(CommandError::usage(message, spec.usage)),
            None => Ok(()),
        }
    }
}

/// Result of running one line.
#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Show the output and keep going
    Continue(String),
    /// Show the output and end the session
    Exit(String),
}

/// Validated command table plus dispatch.
pub struct Dispatcher {
    commands: Vec<CommandSpec>,
}

impl Dispatcher {
    /// Build a dispatcher over the full gpudex command table.
    ///
    /// # Errors
    /// Returns error if the table fails validation.
    pub fn new() -> Result<Self, GpudexError> {
        Self::with_commands(command_table())
    }

    /// Build a dispatcher over an explicit table.
    ///
    /// Every path must be non-empty and unique, and option names must be
    /// unique within each command.
    ///
    /// # Errors
    /// Returns [`GpudexError::Internal`] describing the first problem found.
    pub fn with_commands(commands: Vec<CommandSpec>) -> Result<Self, GpudexError> {
        let mut paths = HashSet::new();

        for spec in &commands {
            if spec.path.is_empty() || spec.path.iter().any(|w| w.is_empty()) {
                return Err(GpudexError::Internal(format!(
                    "command with empty path: '{}'",
                    spec.usage
                )));
            }

            if !paths.insert(spec.name()) {
                return Err(GpudexError::Internal(format!(
                    "command '{}' is registered twice",
                    spec.name()
                )));
            }

            let mut shorts = HashSet::new();
            let mut longs = HashSet::new();
            for option in spec.options {
                if !shorts.insert(option.short) || !longs.insert(option.long) {
                    return Err(GpudexError::Internal(format!(
                        "command '{}' declares option -{}/--{} twice",
                        spec.name(),
                        option.short,
                        option.long
                    )));
                }
            }
        }

        debug!(commands = commands.len(), "command table validated");
        Ok(Self { commands })
    }

    /// Registered commands, in table order.
    #[must_use]
    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    /// Run one already tokenized line.
    ///
    /// Failures are rendered into the output; nothing here ends the session
    /// except a command marked as exiting.
    pub fn dispatch(&self, state: &mut AppState, tokens: &[String]) -> Outcome {
        if tokens.is_empty() {
            return Outcome::Continue(String::new());
        }

        let Some(spec) = self.lookup(tokens) else {
            return Outcome::Continue(
                CommandError::new(
                    "UNKNOWN_COMMAND",
                    format!(
                        "Unknown command: '{}'. Type 'help' to see available commands.",
                        tokens.join(" ")
                    ),
                )
                .to_string(),
            );
        };

        debug!(command = %spec.name(), "dispatching command");
        let output = Invocation::parse(spec, &tokens[spec.path.len()..])
            .and_then(|invocation| (spec.handler)(state, &invocation))
            .unwrap_or_else(|e| e.to_string());

        if spec.exits {
            Outcome::Exit(output)
        } else {
            Outcome::Continue(output)
        }
    }

    fn lookup(&self, tokens: &[String]) -> Option<&CommandSpec> {
        self.commands
            .iter()
            .filter(|spec| {
                spec.path.len() <= tokens.len()
                    && spec
                        .path
                        .iter()
                        .zip(tokens)
                        .all(|(word, token)| token.eq_ignore_ascii_case(word))
            })
            .max_by_key(|spec| spec.path.len())
    }
}

const RULE: usize = 60;
const DISPLAY_NAME_LIMIT: usize = 50;

/// Numbered result lines, long names shortened.
fn hit_lines(hits: &[gpudex_catalog::SearchHit]) -> Vec<String> {
    hits.iter()
        .enumerate()
        .map(|(i, hit)| {
            let name = if hit.title.chars().count() > DISPLAY_NAME_LIMIT {
                let head: String = hit.title.chars().take(DISPLAY_NAME_LIMIT - 3).collect();
                format!("{head}...")
            } else {
                hit.title.clone()
            };
            format!("{:2}. {name}", i + 1)
        })
        .collect()
}

/// Append a warning when the stored copy of a list may be behind memory.
fn with_persistence<T>(message: String, applied: &gpudex_lists::Applied<T>) -> String {
    match &applied.persistence {
        gpudex_lists::Persistence::Saved => message,
        gpudex_lists::Persistence::Stale { reason } => format!(
            "{message}\n[WARNING] The change is in memory but could not be saved ({reason}); the file on disk may be out of date."
        ),
    }
}

/// Parse a 1-based position typed by the user.
fn parse_index(raw: &str, usage: &str) -> Result<usize, CommandError> {
    raw.trim()
        .parse()
        .map_err(|_| CommandError::usage(format!("'{raw}' is not a valid number"), usage))
}

const NO_OPTIONS: &[OptionSpec] = &[];

/// The full command table.
#[must_use]
pub fn command_table() -> Vec<CommandSpec> {
    vec![
        // Search and query
        CommandSpec {
            path: &["search"],
            usage: "search <terms> [-a]",
            summary: "Search GPUs (-a adds the first result to the active list)",
            section: "SEARCH AND QUERY",
            positional: Positional::Rest {
                name: "terms",
                required: true,
            },
            options: &[OptionSpec {
                short: 'a',
                long: "add",
                kind: OptionKind::Flag,
            }],
            exits: false,
            handler: search::search,
        },
        CommandSpec {
            path: &["results"],
            usage: "results",
            summary: "Show the last search results",
            section: "SEARCH AND QUERY",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: search::results,
        },
        CommandSpec {
            path: &["gpu", "show"],
            usage: "gpu show <number>",
            summary: "Show details for a search result",
            section: "SEARCH AND QUERY",
            positional: Positional::One("number"),
            options: NO_OPTIONS,
            exits: false,
            handler: gpu::show,
        },
        CommandSpec {
            path: &["gpu", "compare"],
            usage: "gpu compare <gpu1> <gpu2>",
            summary: "Compare two GPUs by exact name",
            section: "SEARCH AND QUERY",
            positional: Positional::Two("gpu1", "gpu2"),
            options: NO_OPTIONS,
            exits: false,
            handler: gpu::compare,
        },
        // List management
        CommandSpec {
            path: &["list", "new"],
            usage: "list new <name>",
            summary: "Create a list and make it active",
            section: "LIST MANAGEMENT",
            positional: Positional::Rest {
                name: "name",
                required: true,
            },
            options: NO_OPTIONS,
            exits: false,
            handler: list::create,
        },
        CommandSpec {
            path: &["gpu", "add"],
            usage: "gpu add <number|name>",
            summary: "Add a search result or named GPU to the active list",
            section: "LIST MANAGEMENT",
            positional: Positional::Rest {
                name: "number|name",
                required: true,
            },
            options: NO_OPTIONS,
            exits: false,
            handler: gpu::add,
        },
        CommandSpec {
            path: &["gpu", "remove"],
            usage: "gpu remove -i <number> | -n <name> | -m <numbers...>",
            summary: "Remove GPUs from the active list",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: &[
                OptionSpec {
                    short: 'i',
                    long: "index",
                    kind: OptionKind::Value,
                },
                OptionSpec {
                    short: 'n',
                    long: "name",
                    kind: OptionKind::Values,
                },
                OptionSpec {
                    short: 'm',
                    long: "multiple",
                    kind: OptionKind::Values,
                },
            ],
            exits: false,
            handler: gpu::remove,
        },
        CommandSpec {
            path: &["list", "status"],
            usage: "list status",
            summary: "Show the active list",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: list::status,
        },
        CommandSpec {
            path: &["list", "show"],
            usage: "list show",
            summary: "Show the active list with full details",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: list::show,
        },
        CommandSpec {
            path: &["list", "export"],
            usage: "list export [-f json|xlsx|csv] [-o file]",
            summary: "Export the active list",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: &[
                OptionSpec {
                    short: 'f',
                    long: "format",
                    kind: OptionKind::Value,
                },
                OptionSpec {
                    short: 'o',
                    long: "output",
                    kind: OptionKind::Value,
                },
            ],
            exits: false,
            handler: list::export,
        },
        CommandSpec {
            path: &["list", "clear"],
            usage: "list clear",
            summary: "Remove every GPU from the active list",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: list::clear,
        },
        CommandSpec {
            path: &["list", "all"],
            usage: "list all",
            summary: "Show all saved lists",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: list::all,
        },
        CommandSpec {
            path: &["list", "switch"],
            usage: "list switch <name>",
            summary: "Make another list active",
            section: "LIST MANAGEMENT",
            positional: Positional::Rest {
                name: "name",
                required: true,
            },
            options: NO_OPTIONS,
            exits: false,
            handler: list::switch,
        },
        CommandSpec {
            path: &["list", "delete"],
            usage: "list delete <name>",
            summary: "Delete a list permanently",
            section: "LIST MANAGEMENT",
            positional: Positional::Rest {
                name: "name",
                required: true,
            },
            options: NO_OPTIONS,
            exits: false,
            handler: list::delete,
        },
        CommandSpec {
            path: &["list", "rename"],
            usage: "list rename <old> <new>",
            summary: "Rename a list",
            section: "LIST MANAGEMENT",
            positional: Positional::Two("old", "new"),
            options: NO_OPTIONS,
            exits: false,
            handler: list::rename,
        },
        CommandSpec {
            path: &["list", "load"],
            usage: "list load",
            summary: "Reload lists from the lists directory",
            section: "LIST MANAGEMENT",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: list::load,
        },
        // System
        CommandSpec {
            path: &["help"],
            usage: "help",
            summary: "List available commands",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: system::help,
        },
        CommandSpec {
            path: &["fullhelp"],
            usage: "fullhelp",
            summary: "Full guide with examples",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: system::full_help,
        },
        CommandSpec {
            path: &["suggest"],
            usage: "suggest",
            summary: "Suggest what to do next",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: system::suggest,
        },
        CommandSpec {
            path: &["status"],
            usage: "status",
            summary: "Show session, list and catalogue status",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: system::status,
        },
        CommandSpec {
            path: &["catalog", "reload"],
            usage: "catalog reload",
            summary: "Re-read the GPU catalogue file",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: system::reload_catalog,
        },
        CommandSpec {
            path: &["config", "clear"],
            usage: "config clear",
            summary: "Forget the last search",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: false,
            handler: system::clear_session,
        },
        CommandSpec {
            path: &["exitnow"],
            usage: "exitnow",
            summary: "Exit gpudex",
            section: "SYSTEM",
            positional: Positional::None,
            options: NO_OPTIONS,
            exits: true,
            handler: system::exit,
        },
    ]
}
