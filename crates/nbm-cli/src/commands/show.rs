use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use nbm_manifest::{read_from_path, NbmManifest};
use std::path::PathBuf;

#[derive(Args, Debug, Clone)]
pub struct ShowCommand {
    /// Manifest file to read
    pub file: PathBuf,

    /// Print the entries as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn handle_show(cmd: ShowCommand) -> Result<()> {
    let entries = read_from_path(&cmd.file)
        .with_context(|| format!("Failed to read manifest {}", cmd.file.display()))?;
    let manifest: NbmManifest = entries.into_iter().collect();

    if cmd.json {
        println!("{}", manifest.to_json_string());
        return Ok(());
    }

    println!("{}", "Manifest:".bold().green());
    if manifest.is_empty() {
        println!("  {}", "(empty)".yellow());
    }
    for (key, value) in manifest.ordered_entries() {
        println!("  {}: {}", key.cyan(), value);
    }
    Ok(())
}
