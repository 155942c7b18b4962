use clap::{Parser, Subcommand};

const PASSWORD_HELP: &str =
    "Account password; without it you are prompted on stdin and the input is echoed";

#[derive(Debug, Clone, Parser)]
#[command(name = "quick-notes")]
#[command(about = "Personal notes kept in a hosted data service")]
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct CliConfig {
    #[arg(long, global = true, help = "Path to a TOML config file")]
    pub config: Option<String>,

    #[arg(long, global = true, env = "QUICK_NOTES_URL", help = "Base URL of the data service")]
    pub url: Option<String>,

    #[arg(long, global = true, env = "QUICK_NOTES_ANON_KEY", hide_env_values = true)]
    pub anon_key: Option<String>,

    #[arg(long, global = true, help = "Directory holding the saved session")]
    pub session_dir: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List notes in display order
    List {
        #[arg(long, help = "Print notes as JSON")]
        json: bool,
    },

    /// Add a note at the end of the list
    Add { title: String, content: String },

    /// Change the title and/or content of a note
    Edit {
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        id: i64,
        #[arg(short, long, help = "Skip the confirmation prompt")]
        yes: bool,
    },

    /// Move a note from one display slot to another (1-based) and save the order
    Move { from: usize, to: usize },

    /// Create an account
    Signup {
        email: String,
        #[arg(long, env = "QUICK_NOTES_PASSWORD", hide_env_values = true, help = PASSWORD_HELP)]
        password: Option<String>,
    },

    /// Sign in with email and password
    Login {
        email: String,
        #[arg(long, env = "QUICK_NOTES_PASSWORD", hide_env_values = true, help = PASSWORD_HELP)]
        password: Option<String>,
    },

    /// Sign out and forget the saved session
    Logout,

    /// Show the signed-in user
    Whoami,
}
