//! Version information display.

use crate::cli::args::{OutputFormat, VersionArgs};
use crate::error::PrepdeckError;

/// Print version information.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(args: &VersionArgs) -> Result<(), PrepdeckError> {
    let name = env!("CARGO_PKG_NAME");
    let version = env!("CARGO_PKG_VERSION");

    match args.format {
        OutputFormat::Human => println!("{name} {version}"),
        OutputFormat::Json => {
            let info = serde_json::json!({
                "name": name,
                "version": version,
                "katex_stylesheet": prepdeck_core::site::DEFAULT_KATEX_STYLESHEET,
            });
            println!("{}", serde_json::to_string(&info)?);
        }
    }
    Ok(())
}
