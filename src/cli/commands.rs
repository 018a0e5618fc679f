use clap::{Args, Parser, Subcommand};

const VERSION: &str = env!("GIT_VERSION");

#[derive(Parser)]
#[command(
    name = "todoq",
    version = VERSION,
    about = "Per-user task list with filtered views, stored in SQLite",
    after_help = "\
NOTE:
  Requires a git repository. DB is stored at <git-root>/.todoq/todoq.db
  Run `todoq init` before any other command.

USERS:
  Every task belongs to exactly one user and is invisible to everyone else.
  The acting user is resolved from --user, then TODOQ_USER, then the
  configured default (`todoq user set <name>`).

EXIT CODES:
  0  Success
  1  Error (not initialized, validation, not found, DB)"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Act as this user (overrides TODOQ_USER and the configured default)
    #[arg(long, global = true)]
    pub user: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize todoq in this repository
    Init,

    /// Manage the default user
    #[command(subcommand)]
    User(UserCommands),

    /// Add a task
    Add(AddArgs),

    /// List tasks, optionally filtered
    List(ListArgs),

    /// Show task details
    Show {
        /// Task ID or prefix
        id: String,
    },

    /// Update task fields
    Edit(EditArgs),

    /// Mark a task done
    Done {
        /// Task ID or prefix
        id: String,
    },

    /// Revert a task to pending
    Undo {
        /// Task ID or prefix
        id: String,
    },

    /// Delete a task
    Delete {
        /// Task ID or prefix
        id: String,
    },
}

#[derive(Subcommand)]
pub enum UserCommands {
    /// Set the default user for this repository
    Set {
        name: String,
    },
    /// Show the effective user
    Show,
}

#[derive(Args)]
pub struct AddArgs {
    /// Task title
    pub title: String,

    #[arg(long)]
    pub desc: Option<String>,

    /// low | medium | high
    #[arg(long, default_value = "medium")]
    pub priority: String,

    /// Due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Attach a tag; may be repeated
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct ListArgs {
    /// pending | in_progress | done
    #[arg(long)]
    pub status: Option<String>,

    /// low | medium | high
    #[arg(long)]
    pub priority: Option<String>,

    /// Only tasks due on or before this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_before: Option<String>,

    /// Only tasks due on or after this date (YYYY-MM-DD)
    #[arg(long)]
    pub due_after: Option<String>,

    /// Keep tasks carrying any of these tags; may be repeated
    #[arg(long = "tag")]
    pub tags: Vec<String>,
}

#[derive(Args)]
pub struct EditArgs {
    /// Task ID or prefix
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    /// New description; pass an empty string to clear it
    #[arg(long)]
    pub desc: Option<String>,

    /// pending | in_progress | done
    #[arg(long)]
    pub status: Option<String>,

    /// low | medium | high
    #[arg(long)]
    pub priority: Option<String>,

    /// New due date (YYYY-MM-DD)
    #[arg(long)]
    pub due: Option<String>,

    /// Remove the due date
    #[arg(long, conflicts_with = "due")]
    pub clear_due: bool,

    /// Replace the tag set; may be repeated
    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Remove all tags
    #[arg(long, conflicts_with = "tags")]
    pub clear_tags: bool,
}
