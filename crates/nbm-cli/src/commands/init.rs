use anyhow::{bail, Context, Result};
use clap::Args;
use nbm_config::{DescriptorSettings, ModuleSettings, SETTINGS_FILE_NAME};
use nbm_logger as logger;
use nbm_manifest::{ModuleDescriptorConfig, ProjectContext};
use std::path::{Path, PathBuf};

const DEFAULT_SPECIFICATION_VERSION: &str = "1.0";

#[derive(Args, Debug, Clone)]
pub struct InitCommand {
    /// Project directory to create nbm.toml in
    #[arg(long, default_value = ".")]
    pub project_dir: PathBuf,

    /// Overwrite an existing settings file
    #[arg(long)]
    pub force: bool,
}

pub fn handle_init(cmd: InitCommand) -> Result<()> {
    let project_dir = cmd.project_dir.canonicalize().with_context(|| {
        format!(
            "Project directory not found: {}",
            cmd.project_dir.display()
        )
    })?;
    let path = project_dir.join(SETTINGS_FILE_NAME);
    if path.exists() && !cmd.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            path.display()
        );
    }

    let settings = starter_settings(&project_dir);
    settings
        .save_to_path(&path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    logger::success(&format!("Created {}", path.display()));
    Ok(())
}

/// Settings with the module name the project directory would derive
pub fn starter_settings(project_dir: &Path) -> DescriptorSettings {
    let name = project_dir
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();
    let project = ProjectContext::new(name, project_dir);
    let module_name = ModuleDescriptorConfig::new().module_name(&project);

    DescriptorSettings {
        module: ModuleSettings {
            name: Some(module_name).filter(|n| !n.is_empty()),
            specification_version: Some(DEFAULT_SPECIFICATION_VERSION.to_string()),
            ..Default::default()
        },
        ..Default::default()
    }
}
