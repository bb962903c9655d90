//! Version command.

/// The current version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Binary name used in messages.
pub const BIN_NAME: &str = "console-client";

pub fn version_string() -> String {
    format!("{} {}", BIN_NAME, VERSION)
}
