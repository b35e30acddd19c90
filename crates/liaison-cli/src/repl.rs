//! Interactive agenda REPL for one vendor's escalation queue.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper, Result as RlResult};
use tracing::debug;

use liaison_models::{EntityKind, ItemId, Priority, VendorId};
use liaison_persistence::AgendaStore;
use liaison_queue::{EditFields, QueueController};

use crate::commands::print_agenda;

/// Help information for a command.
struct CommandHelp {
    /// Command name (e.g., "escalate").
    name: &'static str,
    /// Command aliases (e.g., ["up", "e"]).
    aliases: &'static [&'static str],
    /// Brief one-line description.
    brief: &'static str,
    /// Usage syntax.
    usage: &'static str,
}

/// Static help entries for all commands.
static COMMAND_HELP: &[CommandHelp] = &[
    CommandHelp {
        name: "list",
        aliases: &["ls", "l"],
        brief: "Show the current agenda order",
        usage: "/list",
    },
    CommandHelp {
        name: "escalate",
        aliases: &["up", "e"],
        brief: "Move an item one position up (may promote its priority)",
        usage: "/escalate <rank>",
    },
    CommandHelp {
        name: "demote",
        aliases: &["down", "d"],
        brief: "Move an item one position down (may lower its priority)",
        usage: "/demote <rank>",
    },
    CommandHelp {
        name: "resolve",
        aliases: &["r"],
        brief: "Mark an item resolved and drop it from the agenda",
        usage: "/resolve <rank>",
    },
    CommandHelp {
        name: "delete",
        aliases: &["del"],
        brief: "Permanently delete an item's record (irreversible)",
        usage: "/delete <rank>",
    },
    CommandHelp {
        name: "add",
        aliases: &["a"],
        brief: "Add a discussion topic and refetch the agenda",
        usage: "/add <title>",
    },
    CommandHelp {
        name: "edit",
        aliases: &[],
        brief: "Edit one field (title, context, ask, priority)",
        usage: "/edit <rank> <field> <value>",
    },
    CommandHelp {
        name: "export",
        aliases: &["x"],
        brief: "Print the copy-out snapshot table",
        usage: "/export",
    },
    CommandHelp {
        name: "refresh",
        aliases: &["f"],
        brief: "Refetch the agenda from the store",
        usage: "/refresh",
    },
    CommandHelp {
        name: "help",
        aliases: &["h", "?"],
        brief: "Show help",
        usage: "/help [command]",
    },
    CommandHelp {
        name: "quit",
        aliases: &["q", "exit"],
        brief: "Exit the session",
        usage: "/quit",
    },
];

/// Tab completion for slash commands.
struct CommandCompleter;

impl CommandCompleter {
    const COMMANDS: &'static [&'static str] = &[
        "/add", "/delete", "/demote", "/edit", "/escalate", "/export", "/help", "/list",
        "/quit", "/refresh", "/resolve",
    ];
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        if !line.starts_with('/') {
            return Ok((0, vec![]));
        }

        let prefix = &line[..pos];
        let matches: Vec<Pair> = Self::COMMANDS
            .iter()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(|cmd| Pair {
                display: cmd.to_string(),
                replacement: cmd.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}
impl Validator for CommandCompleter {}
impl Helper for CommandCompleter {}

/// An editable field named on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Title,
    Context,
    Ask,
    Priority,
}

impl FromStr for EditField {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(EditField::Title),
            "context" => Ok(EditField::Context),
            "ask" => Ok(EditField::Ask),
            "priority" => Ok(EditField::Priority),
            _ => Err(()),
        }
    }
}

/// Slash commands available in the session.
#[derive(Debug, Clone, PartialEq)]
pub enum ReplCommand {
    /// Show the current agenda order
    List,
    /// Escalate the item at a 1-based rank
    Escalate(usize),
    /// De-escalate the item at a 1-based rank
    Demote(usize),
    /// Resolve the item at a 1-based rank
    Resolve(usize),
    /// Delete the item at a 1-based rank
    Delete(usize),
    /// Add a discussion topic with the given title
    Add(String),
    /// Edit one field of the item at a 1-based rank
    Edit {
        rank: usize,
        field: EditField,
        value: String,
    },
    /// Print the snapshot table
    Export,
    /// Refetch the agenda from the store
    Refresh,
    /// Show help (optionally for a specific command)
    Help(Option<String>),
    /// Quit the session
    Quit,
    /// Unknown command or bad arguments
    Unknown(String),
    /// Blank input
    Empty,
}

impl ReplCommand {
    /// Parses input into a session command.
    pub fn parse(input: &str) -> Self {
        let input = input.trim();

        if input.is_empty() {
            return ReplCommand::Empty;
        }

        if let Some(stripped) = input.strip_prefix('/') {
            let parts: Vec<&str> = stripped.splitn(2, ' ').collect();
            let cmd = parts[0].to_lowercase();
            let arg = parts.get(1).map(|s| s.trim().to_string());

            match cmd.as_str() {
                "list" | "ls" | "l" => ReplCommand::List,
                "escalate" | "up" | "e" => Self::parse_rank(arg, "escalate", ReplCommand::Escalate),
                "demote" | "down" | "d" => Self::parse_rank(arg, "demote", ReplCommand::Demote),
                "resolve" | "r" => Self::parse_rank(arg, "resolve", ReplCommand::Resolve),
                "delete" | "del" => Self::parse_rank(arg, "delete", ReplCommand::Delete),
                "add" | "a" => match arg {
                    Some(title) if !title.is_empty() => ReplCommand::Add(title),
                    _ => ReplCommand::Unknown("add requires a title".to_string()),
                },
                "edit" => Self::parse_edit(arg),
                "export" | "x" => ReplCommand::Export,
                "refresh" | "f" => ReplCommand::Refresh,
                "help" | "h" | "?" => ReplCommand::Help(arg),
                "quit" | "q" | "exit" => ReplCommand::Quit,
                _ => ReplCommand::Unknown(cmd),
            }
        } else {
            // A small conversational surface for the common reads.
            match input.to_lowercase().as_str() {
                "list" | "show agenda" => ReplCommand::List,
                "export" => ReplCommand::Export,
                "refresh" => ReplCommand::Refresh,
                "help" | "?" => ReplCommand::Help(None),
                "quit" | "exit" | "bye" => ReplCommand::Quit,
                _ => ReplCommand::Unknown(input.to_string()),
            }
        }
    }

    fn parse_rank(
        arg: Option<String>,
        name: &str,
        build: impl FnOnce(usize) -> ReplCommand,
    ) -> ReplCommand {
        match arg.as_deref().map(str::parse::<usize>) {
            Some(Ok(rank)) if rank >= 1 => build(rank),
            _ => ReplCommand::Unknown(format!("{name} requires an item rank")),
        }
    }

    /// Parse edit command arguments: `<rank> <field> <value...>`.
    fn parse_edit(arg: Option<String>) -> ReplCommand {
        let Some(arg) = arg else {
            return ReplCommand::Unknown("edit requires: /edit <rank> <field> <value>".to_string());
        };

        let mut parts = arg.splitn(3, ' ');
        let rank = parts.next().and_then(|r| r.parse::<usize>().ok());
        let field = parts.next().and_then(|f| f.parse::<EditField>().ok());
        let value = parts.next().map(|v| v.trim().to_string());

        match (rank, field, value) {
            (Some(rank), Some(field), Some(value)) if rank >= 1 && !value.is_empty() => {
                ReplCommand::Edit { rank, field, value }
            }
            (_, None, _) => ReplCommand::Unknown(
                "edit field must be one of: title, context, ask, priority".to_string(),
            ),
            _ => ReplCommand::Unknown("edit requires: /edit <rank> <field> <value>".to_string()),
        }
    }
}

/// Interactive session state.
pub struct Repl {
    editor: Editor<CommandCompleter, DefaultHistory>,
    queue: QueueController,
    history_path: Option<PathBuf>,
    runtime: tokio::runtime::Runtime,
}

impl Repl {
    /// Creates a session for one vendor over the given state directory.
    pub fn new(state_dir: &Path, vendor: VendorId, limit: usize) -> RlResult<Self> {
        let config = rustyline::Config::builder()
            .completion_type(rustyline::CompletionType::List)
            .build();
        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CommandCompleter));

        let history_path = state_dir.join("repl_history.txt");
        if history_path.exists() {
            let _ = editor.load_history(&history_path);
        }

        let runtime = tokio::runtime::Runtime::new().expect("Failed to create tokio runtime");
        let store = AgendaStore::new(state_dir);
        let queue = QueueController::new(store, vendor, limit, runtime.handle().clone());

        Ok(Self {
            editor,
            queue,
            history_path: Some(history_path),
            runtime,
        })
    }

    /// Runs the session loop until the operator quits.
    pub fn run(mut self) -> RlResult<()> {
        println!("Liaison agenda session v{}", env!("CARGO_PKG_VERSION"));
        println!("Vendor: {}", self.queue.vendor());
        println!("Type /help for commands, /quit to exit");
        println!();

        if let Err(e) = self.queue.refresh() {
            eprintln!("Error loading agenda: {}", e);
        }
        self.print_items();

        loop {
            let prompt = format!("liaison [{}]> ", self.queue.vendor());

            match self.editor.readline(&prompt) {
                Ok(line) => {
                    self.editor.add_history_entry(&line)?;

                    let cmd = ReplCommand::parse(&line);
                    debug!(?cmd, "Parsed command");

                    match self.handle_command(cmd) {
                        Ok(true) => break, // Quit requested
                        Ok(false) => {}    // Continue
                        Err(e) => eprintln!("Error: {}", e),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    // Don't exit on Ctrl+C, just clear line
                }
                Err(ReadlineError::Eof) => {
                    println!("^D");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(path) = &self.history_path {
            let _ = self.editor.save_history(path);
        }

        println!("Goodbye!");

        // Give in-flight persistence writes a moment to land before the
        // runtime goes away; anything still pending is dropped.
        let Repl { runtime, .. } = self;
        runtime.shutdown_timeout(Duration::from_secs(2));
        Ok(())
    }

    /// Handles a session command. Returns Ok(true) if should quit.
    fn handle_command(&mut self, cmd: ReplCommand) -> Result<bool, Box<dyn std::error::Error>> {
        match cmd {
            ReplCommand::List => {
                self.print_items();
                Ok(false)
            }

            ReplCommand::Escalate(rank) => {
                match self.target(rank) {
                    Some((kind, id)) => {
                        if self.queue.escalate(kind, &id) {
                            self.print_items();
                        } else {
                            println!("Already at the top.");
                        }
                    }
                    None => println!("No item at rank {}.", rank),
                }
                Ok(false)
            }

            ReplCommand::Demote(rank) => {
                match self.target(rank) {
                    Some((kind, id)) => {
                        if self.queue.deescalate(kind, &id) {
                            self.print_items();
                        } else {
                            println!("Already at the bottom.");
                        }
                    }
                    None => println!("No item at rank {}.", rank),
                }
                Ok(false)
            }

            ReplCommand::Resolve(rank) => {
                match self.target(rank) {
                    Some((kind, id)) => {
                        if self.queue.resolve(kind, &id) {
                            println!("Resolved.");
                            self.print_items();
                        }
                    }
                    None => println!("No item at rank {}.", rank),
                }
                Ok(false)
            }

            ReplCommand::Delete(rank) => {
                match self.target(rank) {
                    Some((kind, id)) => {
                        if self.queue.delete(kind, &id) {
                            println!("Deleted.");
                            self.print_items();
                        }
                    }
                    None => println!("No item at rank {}.", rank),
                }
                Ok(false)
            }

            ReplCommand::Add(title) => {
                let id = self.queue.add_item(title, None, None)?;
                println!("Added {}.", id);
                self.print_items();
                Ok(false)
            }

            ReplCommand::Edit { rank, field, value } => {
                match self.target(rank) {
                    Some((kind, id)) => {
                        let mut fields = EditFields::default();
                        match field {
                            EditField::Title => fields.title = Some(value),
                            EditField::Context => fields.context = Some(value),
                            EditField::Ask => fields.ask = Some(value),
                            EditField::Priority => match value.parse::<Priority>() {
                                Ok(priority) => fields.priority = Some(priority),
                                Err(()) => {
                                    println!(
                                        "Unknown priority: {}. Use critical, high, medium, or low.",
                                        value
                                    );
                                    return Ok(false);
                                }
                            },
                        }
                        if self.queue.edit_item(kind, &id, fields) {
                            println!("Updated.");
                        }
                    }
                    None => println!("No item at rank {}.", rank),
                }
                Ok(false)
            }

            ReplCommand::Export => {
                println!("{}", self.queue.export_snapshot());
                Ok(false)
            }

            ReplCommand::Refresh => {
                self.queue.refresh()?;
                self.print_items();
                Ok(false)
            }

            ReplCommand::Help(topic) => {
                print_help(topic.as_deref());
                Ok(false)
            }

            ReplCommand::Quit => Ok(true),

            ReplCommand::Unknown(message) => {
                println!("{}. Type /help for available commands.", message);
                Ok(false)
            }

            ReplCommand::Empty => Ok(false),
        }
    }

    /// Maps a displayed 1-based rank to the item's stable address.
    fn target(&self, rank: usize) -> Option<(EntityKind, ItemId)> {
        self.queue
            .items()
            .get(rank - 1)
            .map(|entry| (entry.item.kind, entry.item.id.clone()))
    }

    fn print_items(&self) {
        print_agenda(self.queue.vendor(), self.queue.items());
    }
}

/// Finds help for a command by name or alias.
fn find_command_help(name: &str) -> Option<&'static CommandHelp> {
    let name_lower = name.to_lowercase();
    COMMAND_HELP
        .iter()
        .find(|h| h.name == name_lower || h.aliases.contains(&name_lower.as_str()))
}

/// Prints help information.
fn print_help(topic: Option<&str>) {
    match topic {
        Some(cmd) => {
            if let Some(help) = find_command_help(cmd) {
                println!("/{} - {}", help.name, help.brief);
                if !help.aliases.is_empty() {
                    println!("Aliases: {}", help.aliases.join(", "));
                }
                println!("Usage: {}", help.usage);
            } else {
                println!("Unknown command: {}. Type /help for available commands.", cmd);
            }
        }
        None => {
            println!("Liaison agenda session");
            println!();
            for help in COMMAND_HELP {
                println!("  {:<28} {}", help.usage, help.brief);
            }
            println!();
            println!("Ranks are the numbers shown in the left column of /list.");
            println!("Type /help <command> for detailed help on a specific command.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(ReplCommand::parse("/list"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("/ls"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("/l"), ReplCommand::List);
    }

    #[test]
    fn test_parse_escalate() {
        assert_eq!(ReplCommand::parse("/escalate 3"), ReplCommand::Escalate(3));
        assert_eq!(ReplCommand::parse("/up 1"), ReplCommand::Escalate(1));
        assert_eq!(ReplCommand::parse("/e 2"), ReplCommand::Escalate(2));
    }

    #[test]
    fn test_parse_escalate_missing_rank() {
        assert!(matches!(
            ReplCommand::parse("/escalate"),
            ReplCommand::Unknown(_)
        ));
        assert!(matches!(
            ReplCommand::parse("/escalate abc"),
            ReplCommand::Unknown(_)
        ));
        assert!(matches!(
            ReplCommand::parse("/escalate 0"),
            ReplCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_demote() {
        assert_eq!(ReplCommand::parse("/demote 2"), ReplCommand::Demote(2));
        assert_eq!(ReplCommand::parse("/down 2"), ReplCommand::Demote(2));
    }

    #[test]
    fn test_parse_resolve_and_delete() {
        assert_eq!(ReplCommand::parse("/resolve 1"), ReplCommand::Resolve(1));
        assert_eq!(ReplCommand::parse("/r 4"), ReplCommand::Resolve(4));
        assert_eq!(ReplCommand::parse("/delete 2"), ReplCommand::Delete(2));
        assert_eq!(ReplCommand::parse("/del 2"), ReplCommand::Delete(2));
    }

    #[test]
    fn test_parse_add() {
        assert_eq!(
            ReplCommand::parse("/add Renewal discussion"),
            ReplCommand::Add("Renewal discussion".to_string())
        );
        assert!(matches!(ReplCommand::parse("/add"), ReplCommand::Unknown(_)));
    }

    #[test]
    fn test_parse_edit() {
        assert_eq!(
            ReplCommand::parse("/edit 2 priority high"),
            ReplCommand::Edit {
                rank: 2,
                field: EditField::Priority,
                value: "high".to_string(),
            }
        );
        assert_eq!(
            ReplCommand::parse("/edit 1 context Needs exec signoff first"),
            ReplCommand::Edit {
                rank: 1,
                field: EditField::Context,
                value: "Needs exec signoff first".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_edit_bad_field() {
        assert!(matches!(
            ReplCommand::parse("/edit 1 severity high"),
            ReplCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_edit_missing_parts() {
        assert!(matches!(ReplCommand::parse("/edit"), ReplCommand::Unknown(_)));
        assert!(matches!(
            ReplCommand::parse("/edit 1 title"),
            ReplCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_parse_export_refresh() {
        assert_eq!(ReplCommand::parse("/export"), ReplCommand::Export);
        assert_eq!(ReplCommand::parse("/x"), ReplCommand::Export);
        assert_eq!(ReplCommand::parse("/refresh"), ReplCommand::Refresh);
        assert_eq!(ReplCommand::parse("/f"), ReplCommand::Refresh);
    }

    #[test]
    fn test_parse_help() {
        assert_eq!(ReplCommand::parse("/help"), ReplCommand::Help(None));
        assert_eq!(
            ReplCommand::parse("/help escalate"),
            ReplCommand::Help(Some("escalate".to_string()))
        );
        assert_eq!(ReplCommand::parse("/?"), ReplCommand::Help(None));
    }

    #[test]
    fn test_parse_quit() {
        assert_eq!(ReplCommand::parse("/quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/q"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("/exit"), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ReplCommand::parse(""), ReplCommand::Empty);
        assert_eq!(ReplCommand::parse("   "), ReplCommand::Empty);
    }

    #[test]
    fn test_parse_conversational() {
        assert_eq!(ReplCommand::parse("list"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("show agenda"), ReplCommand::List);
        assert_eq!(ReplCommand::parse("quit"), ReplCommand::Quit);
        assert_eq!(ReplCommand::parse("BYE"), ReplCommand::Quit);
    }

    #[test]
    fn test_parse_unknown() {
        assert!(matches!(
            ReplCommand::parse("/frobnicate"),
            ReplCommand::Unknown(_)
        ));
        assert!(matches!(
            ReplCommand::parse("escalate 3"),
            ReplCommand::Unknown(_)
        ));
    }

    #[test]
    fn test_edit_field_from_str() {
        assert_eq!("title".parse::<EditField>(), Ok(EditField::Title));
        assert_eq!("Priority".parse::<EditField>(), Ok(EditField::Priority));
        assert!("owner".parse::<EditField>().is_err());
    }

    #[test]
    fn test_find_command_help() {
        assert!(find_command_help("escalate").is_some());
        assert!(find_command_help("up").is_some()); // alias
        assert!(find_command_help("ESCALATE").is_some()); // case insensitive
        assert!(find_command_help("notacommand").is_none());
    }

    #[test]
    fn test_completer_matches_prefix() {
        use rustyline::completion::Completer;

        let completer = CommandCompleter;
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);

        let (pos, matches) = completer.complete("/esc", 4, &ctx).unwrap();
        assert_eq!(pos, 0);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].replacement, "/escalate");
    }

    #[test]
    fn test_completer_multiple_matches() {
        use rustyline::completion::Completer;

        let completer = CommandCompleter;
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);

        // /e should match /edit, /escalate, /export
        let (_, matches) = completer.complete("/e", 2, &ctx).unwrap();
        let replacements: Vec<&str> = matches.iter().map(|m| m.replacement.as_str()).collect();
        assert!(replacements.contains(&"/edit"));
        assert!(replacements.contains(&"/escalate"));
        assert!(replacements.contains(&"/export"));
    }

    #[test]
    fn test_completer_non_slash_ignored() {
        use rustyline::completion::Completer;

        let completer = CommandCompleter;
        let history = rustyline::history::DefaultHistory::new();
        let ctx = rustyline::Context::new(&history);

        let (_, matches) = completer.complete("escalate", 8, &ctx).unwrap();
        assert!(matches.is_empty());
    }
}
