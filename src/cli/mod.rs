//! CLI for the `console-client` binary.
//!
//! ```ignore
//! use console_client::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args())?;
//! run_cli_command(command, ClientConfig::from_env()).await?;
//! ```

pub mod args;
pub mod tail;
pub mod version;

pub use args::{parse_args, CliCommand, TailOptions, USAGE};
pub use tail::run_tail;
pub use version::{version_string, VERSION};

use color_eyre::Result;

use crate::config::ClientConfig;

/// Run a parsed command to completion.
pub async fn run_cli_command(command: CliCommand, config: ClientConfig) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_string());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Tail(options) => run_tail(options, config).await,
    }
}
