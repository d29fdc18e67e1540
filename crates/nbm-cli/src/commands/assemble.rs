use crate::GlobalOpts;
use anyhow::{bail, Context, Result};
use clap::Args;
use nbm_config::DescriptorSettings;
use nbm_logger as logger;
use nbm_manifest::{
    assemble, to_properties_string, write_to_path, CustomManifestEntries, ModuleDescriptorConfig,
    ProjectContext,
};
use std::path::PathBuf;
use tracing::debug;

#[derive(Args, Debug, Clone)]
pub struct AssembleCommand {
    /// Project directory; relative paths in the settings resolve against it
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Project name (default: name of the project directory)
    #[arg(long)]
    pub project_name: Option<String>,

    /// Project version, used when no specification version is configured
    #[arg(long)]
    pub project_version: Option<String>,

    /// Settings file (default: $NBM_SETTINGS or <project-dir>/nbm.toml)
    #[arg(long)]
    pub settings: Option<PathBuf>,

    /// Extra custom entry, applied after the settings file's [manifest] table
    #[arg(short = 'e', long = "entry", value_name = "KEY=VALUE")]
    pub entries: Vec<String>,

    /// Add OpenIDE-Module-Build-Version stamped with the current time
    #[arg(long)]
    pub stamp: bool,

    /// Fail unless key store file, alias and password are all configured
    #[arg(long)]
    pub require_signing: bool,

    /// Write the manifest to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the manifest as JSON
    #[arg(long, conflicts_with = "output")]
    pub json: bool,
}

pub fn handle_assemble(cmd: AssembleCommand, opts: &GlobalOpts) -> Result<()> {
    let project = project_context(&cmd)?;
    debug!("Project context: {:?}", project);

    let settings_path = DescriptorSettings::path(&project.project_dir, cmd.settings.as_deref());
    if settings_path.exists() {
        logger::info(&format!("Using settings {}", settings_path.display()));
    } else if !opts.quiet {
        logger::warn(&format!(
            "No settings at {}, using defaults",
            settings_path.display()
        ));
    }
    let settings = DescriptorSettings::load_from_path(&settings_path)
        .with_context(|| format!("Failed to load settings from {}", settings_path.display()))?;

    let mut config = ModuleDescriptorConfig::new();
    settings.apply(&mut config, &project)?;

    let mut custom = settings.custom_entries()?;
    apply_cli_entries(&mut custom, &cmd.entries)?;

    if cmd.require_signing {
        let params = config.key_store().signing_parameters()?;
        debug!("Signing parameters: {:?}", params);
    }

    let manifest = assemble(&config, &custom, &project)?;

    match (&cmd.output, cmd.json) {
        (Some(path), _) => {
            write_to_path(&manifest, path)
                .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
            if !opts.quiet {
                logger::success(&format!(
                    "Wrote {} entries to {}",
                    manifest.len(),
                    path.display()
                ));
            }
        }
        (None, true) => println!("{}", manifest.to_json_string()),
        (None, false) => print!("{}", to_properties_string(&manifest)),
    }

    Ok(())
}

fn project_context(cmd: &AssembleCommand) -> Result<ProjectContext> {
    let project_dir = cmd.project_dir.canonicalize().with_context(|| {
        format!(
            "Project directory not found: {}",
            cmd.project_dir.display()
        )
    })?;

    let name = match &cmd.project_name {
        Some(name) => name.clone(),
        None => project_dir
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default(),
    };

    let mut project = ProjectContext::new(name, project_dir);
    if let Some(version) = &cmd.project_version {
        project = project.with_version(version);
    }
    if cmd.stamp {
        project = project.with_build_timestamp(chrono::Utc::now());
    }
    Ok(project)
}

/// Parse `KEY=VALUE` pairs onto the custom entries; later pairs win
pub fn apply_cli_entries(custom: &mut CustomManifestEntries, raw_entries: &[String]) -> Result<()> {
    for raw in raw_entries {
        let Some((key, value)) = raw.split_once('=') else {
            bail!("Invalid entry '{}': expected KEY=VALUE", raw);
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("Invalid entry '{}': key must not be empty", raw);
        }
        custom.entry(key, value);
    }
    Ok(())
}
