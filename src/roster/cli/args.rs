use clap::{Parser, Subcommand};
use roster::model::{Role, Theme};

#[derive(Parser, Debug)]
#[command(name = "roster", bin_name = "roster", version)]
#[command(about = "Manage the user list and theme of a roster origin", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Storage origin to operate on (overrides the configured one)
    #[arg(long, global = true)]
    pub origin: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List and edit users
    #[command(alias = "u")]
    Users {
        #[command(subcommand)]
        command: Option<UserCommands>,
    },

    /// Show or change the theme
    #[command(alias = "t")]
    Theme {
        #[command(subcommand)]
        command: Option<ThemeCommands>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (origin)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// List users
    #[command(alias = "ls")]
    List,

    /// Add a user; the id is assigned automatically
    #[command(alias = "n")]
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Admin, User or Editor
        #[arg(long, default_value = "User")]
        role: Role,
    },

    /// Change fields of an existing user
    #[command(alias = "e")]
    Edit {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        role: Option<Role>,
    },

    /// Delete a user
    #[command(alias = "rm")]
    Delete { id: u64 },
}

#[derive(Subcommand, Debug)]
pub enum ThemeCommands {
    /// Show the current theme and where it comes from
    Show,

    /// Choose a theme explicitly
    Set { theme: Theme },

    /// Switch between light and dark
    Toggle,

    /// Forget the explicit choice and follow the system setting again
    Clear,

    /// Keep running and apply system theme changes while no choice is stored
    Watch {
        /// Polling interval in milliseconds
        #[arg(long, default_value_t = 1000)]
        interval_ms: u64,
    },
}
