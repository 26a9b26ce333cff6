use std::path::{Path, PathBuf};

use anyhow::Context;
use fb_config::FbConfig;

use crate::cli::GlobalFlags;

pub fn load_config(flags: &GlobalFlags) -> anyhow::Result<FbConfig> {
    load_dotenv(flags.config.as_deref())?;
    let config = FbConfig::load(flags.config.as_deref());
    match &flags.config {
        Some(path) => config.with_context(|| format!("failed to load config from {}", path.display())),
        None => config.context("failed to load configuration"),
    }
}

/// Load `.env` from the project that owns an explicit config file, falling
/// back to the working directory.
fn load_dotenv(explicit: Option<&Path>) -> anyhow::Result<()> {
    if let Some(env_path) = explicit.and_then(project_env_path) {
        if env_path.exists() {
            dotenvy::from_path(&env_path)
                .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
            return Ok(());
        }
    }

    dotenvy::dotenv().ok();
    Ok(())
}

/// `<root>/.fbdesk/config.toml` → `<root>/.env`; any other file → `.env` beside it.
fn project_env_path(config_path: &Path) -> Option<PathBuf> {
    let dir = config_path.parent()?;
    let root = if dir.file_name().is_some_and(|name| name == ".fbdesk") {
        dir.parent()?
    } else {
        dir
    };
    Some(root.join(".env"))
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use pretty_assertions::assert_eq;

    use super::project_env_path;

    #[test]
    fn env_file_sits_at_project_root_for_dot_fbdesk_configs() {
        assert_eq!(
            project_env_path(Path::new("/srv/app/.fbdesk/config.toml")),
            Some(PathBuf::from("/srv/app/.env"))
        );
    }

    #[test]
    fn env_file_sits_beside_other_configs() {
        assert_eq!(
            project_env_path(Path::new("/etc/fbdesk/prod.toml")),
            Some(PathBuf::from("/etc/fbdesk/.env"))
        );
    }
}
