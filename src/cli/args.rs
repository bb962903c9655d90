//! Command-line argument parsing.

use crate::traits::Headers;

pub const USAGE: &str = "\
Usage: console-client [OPTIONS] <URL|PATH>

Tail a server-sent events endpoint and print one event per line.

Options:
  -H, --header <NAME: VALUE>  Extra request header (repeatable)
      --token <TOKEN>         Bearer token (overrides CONSOLE_API_TOKEN)
      --simple                Use the simple event source (no custom headers)
  -V, --version               Print version
  -h, --help                  Print help";

/// What to tail and how.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TailOptions {
    /// Absolute URL, or a path joined to the configured base URL
    pub target: String,
    pub headers: Headers,
    pub token: Option<String>,
    pub simple: bool,
}

/// Parsed CLI command to execute.
#[derive(Debug, Clone, PartialEq)]
pub enum CliCommand {
    /// Show version information
    Version,
    /// Show usage
    Help,
    /// Stream events from an endpoint
    Tail(TailOptions),
}

/// Parse a `Name: value` header argument.
pub fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("invalid header '{}', expected 'Name: value'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("invalid header '{}', name is empty", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

/// Parse command-line arguments, skipping the program name.
///
/// # Examples
///
/// ```
/// use console_client::cli::args::{parse_args, CliCommand};
///
/// let args = vec!["console-client".to_string(), "--version".to_string()];
/// assert_eq!(parse_args(args.into_iter()), Ok(CliCommand::Version));
/// ```
pub fn parse_args<I>(args: I) -> Result<CliCommand, String>
where
    I: Iterator<Item = String>,
{
    let mut options = TailOptions::default();
    let mut target = None;
    let mut args = args.skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-V" => return Ok(CliCommand::Version),
            "--help" | "-h" => return Ok(CliCommand::Help),
            "--simple" => options.simple = true,
            "--header" | "-H" => {
                let raw = args
                    .next()
                    .ok_or_else(|| format!("{} needs a value", arg))?;
                let (name, value) = parse_header(&raw)?;
                options.headers.insert(name, value);
            }
            "--token" => {
                let token = args.next().ok_or_else(|| "--token needs a value".to_string())?;
                options.token = Some(token);
            }
            flag if flag.starts_with('-') && flag.len() > 1 => {
                return Err(format!("unknown option '{}'", flag));
            }
            _ => {
                if target.is_some() {
                    return Err(format!("unexpected argument '{}'", arg));
                }
                target = Some(arg);
            }
        }
    }

    options.target = target.ok_or_else(|| "missing <URL|PATH>".to_string())?;
    Ok(CliCommand::Tail(options))
}
