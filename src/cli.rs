use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(value_name = "USERNAME")]
        username: String,
    },
    /// Create a new account
    Register {
        #[arg(value_name = "USERNAME")]
        username: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show the signed-in username
    Whoami,
    /// List tasks
    List {
        /// Only tasks with this status (to-do, in-progress, completed)
        #[arg(short, long)]
        status: Option<String>,
        /// Case-insensitive name search
        #[arg(short = 'q', long)]
        search: Option<String>,
        /// Only tasks in this category (work, personal)
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Create a task
    Add {
        #[arg(value_name = "NAME")]
        name: String,
        /// Due date, YYYY-MM-DD
        #[arg(value_name = "DATE")]
        date: String,
        #[arg(value_name = "DESCRIPTION")]
        description: String,
        /// Initial status (defaults to to-do)
        #[arg(short, long)]
        status: Option<String>,
        /// Category (defaults to work)
        #[arg(short, long)]
        category: Option<String>,
        /// Attach an image file (<= 5MB)
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
    /// Edit fields of an existing task
    Edit {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(short, long)]
        name: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 'm', long)]
        description: Option<String>,
        #[arg(short, long)]
        status: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        /// Attach an image file (<= 5MB)
        #[arg(short = 'f', long = "file")]
        file: Option<String>,
    },
    /// Change a task's status
    Status {
        #[arg(value_name = "ID")]
        id: String,
        #[arg(value_name = "STATUS")]
        status: String,
    },
    /// Delete a task
    Delete {
        #[arg(value_name = "ID")]
        id: String,
    },
    /// Launch TUI interface
    Tui,
    /// Generate shell completions
    Completions {
        #[arg(value_name = "SHELL")]
        shell: String,
    },
}
