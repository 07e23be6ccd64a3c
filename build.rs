//! Build script for the Spotify token relay.
//!
//! Copies the `.env.example` configuration template into the user's local
//! data directory, next to where the relay looks for its `.env` file.

use std::{env, fs, path::PathBuf};

/// Copies `.env.example` from the crate root to the local data directory.
///
/// Destination:
/// - Linux: `~/.local/share/spotrelay/.env.example`
/// - macOS: `~/Library/Application Support/spotrelay/.env.example`
/// - Windows: `%LOCALAPPDATA%/spotrelay/.env.example`
///
/// A missing template only produces a cargo warning. Failing to create the
/// directory or write the file fails the build.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let template = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("spotrelay");
    fs::create_dir_all(&out_dir)?;

    if template.is_file() {
        fs::copy(&template, out_dir.join(".env.example"))?;
    } else {
        println!(
            "cargo:warning=.env.example not found at {}",
            template.display()
        );
    }

    Ok(())
}
