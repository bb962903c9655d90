use color_eyre::Result;
use console_client::cli::{parse_args, run_cli_command, USAGE};
use console_client::config::ClientConfig;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    console_client::logging::init();

    let command = match parse_args(std::env::args()) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("Error: {}\n\n{}", message, USAGE);
            std::process::exit(2);
        }
    };

    run_cli_command(command, ClientConfig::from_env()).await
}
