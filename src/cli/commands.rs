//! CLI command definitions using clap.
//!
//! Defines the main CLI structure and subcommands:
//! - serve: run the HTTP endpoint (default)
//! - ask: resolve one message and print the reply

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Toolchat - chat endpoint with LLM tool-use resolution
#[derive(Parser, Debug)]
#[command(name = "toolchat")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Optional config file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

impl Cli {
    /// Check if verbose mode is enabled
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }
}

/// Main subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve POST /chat
    Serve {
        /// Address to bind, overriding server.bind from the config
        #[arg(short, long)]
        bind: Option<String>,
    },

    /// Send one message through the tool-use flow and print the reply
    Ask {
        /// The user message
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_defaults_to_none() {
        let cli = Cli::try_parse_from(["toolchat"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.is_verbose());
    }

    #[test]
    fn test_serve_with_bind() {
        let cli = Cli::try_parse_from(["toolchat", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        match cli.command {
            Some(Commands::Serve { bind }) => assert_eq!(bind.as_deref(), Some("0.0.0.0:8080")),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ask_with_global_flags() {
        let cli = Cli::try_parse_from(["toolchat", "ask", "What is CUST001's income?", "-v", "-c", "x.yml"]).unwrap();
        assert!(cli.is_verbose());
        assert_eq!(cli.config, Some(PathBuf::from("x.yml")));
        match cli.command {
            Some(Commands::Ask { message }) => assert_eq!(message, "What is CUST001's income?"),
            other => panic!("unexpected command: {:?}", other),
        }
    }
}
