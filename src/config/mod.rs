pub mod settings;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{AddArgs, CliConfig, Command, ListArgs};

#[cfg(feature = "cli")]
mod cli {
    use crate::domain::model::{Role, RoleFilter};
    use crate::utils::logger::LogFormat;
    use clap::{Args, Parser, Subcommand};
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "devdir")]
    #[command(about = "Browse and grow a directory of developers", version)]
    pub struct CliConfig {
        #[arg(long, global = true, env = "DEVDIR_API_URL", help = "Base URL of the directory service")]
        pub api_url: Option<String>,

        #[arg(long, global = true, help = "TOML configuration file")]
        pub config: Option<PathBuf>,

        #[arg(long, global = true, help = "Per-request timeout in seconds")]
        pub timeout_seconds: Option<u64>,

        #[arg(long, global = true, value_enum, help = "Log output format")]
        pub log_format: Option<LogFormat>,

        #[arg(long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// List developers, optionally filtered
        List(ListArgs),
        /// Add a developer, then show the refreshed list
        Add(AddArgs),
        /// Interactive session
        Shell,
    }

    #[derive(Debug, Clone, Args)]
    pub struct ListArgs {
        #[arg(long, default_value = "", help = "Match name or any technology, ignoring case")]
        pub search: String,

        #[arg(long, default_value = "All", help = "All, Frontend, Backend or Full-Stack")]
        pub role: RoleFilter,

        #[arg(long, help = "Print the visible developers as JSON")]
        pub json: bool,
    }

    #[derive(Debug, Clone, Args)]
    pub struct AddArgs {
        #[arg(long, default_value = "")]
        pub name: String,

        #[arg(long, default_value = "Frontend", help = "Frontend, Backend or Full-Stack")]
        pub role: Role,

        #[arg(long, default_value = "", help = "Comma separated, e.g. \"React, Node.js\"")]
        pub tech_stack: String,

        #[arg(long, default_value = "", help = "Years of experience, e.g. 3.5")]
        pub experience: String,
    }

}
