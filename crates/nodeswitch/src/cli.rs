use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "nodeswitch",
    version,
    about = "Switch and install Node.js versions through nvm"
)]
pub struct Cli {
    /// Mirror debug logs to stderr
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Show whether nvm is installed and which Node.js version is active
    Status,

    /// List installed Node.js versions
    List {
        /// Leave out the active version
        #[arg(long)]
        others: bool,
    },

    /// Switch to an installed Node.js version
    Use {
        /// Version in X.Y.Z form, with or without a leading `v`
        version: String,

        /// Also make it the version new shells start with
        #[arg(long)]
        default: bool,
    },

    /// Install a new Node.js version
    Install {
        /// Version in X.Y.Z form, with or without a leading `v`
        version: String,
    },

    /// Install nvm itself
    Setup,
}

impl Cli {
    pub fn selected_command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Status)
    }
}
