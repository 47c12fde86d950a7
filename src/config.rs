//! Runtime configuration
//!
//! Paths come from the environment, falling back to the project's `data/`
//! directory next to the build output.

use std::path::{Path, PathBuf};

/// Overrides the SQLite file holding prices, settings and plans
pub const DATABASE_PATH_VAR: &str = "MEALPLAN_DATABASE_PATH";
/// Overrides the directory holding the recipe and plan catalogs
pub const DATA_DIR_VAR: &str = "MEALPLAN_DATA_DIR";

const DATABASE_FILE: &str = "mealplan.db";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub data_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_vars(
            std::env::var(DATABASE_PATH_VAR).ok(),
            std::env::var(DATA_DIR_VAR).ok(),
            &project_root(),
        )
    }

    fn from_vars(database_path: Option<String>, data_dir: Option<String>, root: &Path) -> Self {
        let default_data = root.join("data");
        Self {
            database_path: database_path
                .map(PathBuf::from)
                .unwrap_or_else(|| default_data.join(DATABASE_FILE)),
            data_dir: data_dir.map(PathBuf::from).unwrap_or(default_data),
        }
    }
}

/// Directory of the executable, lifted out of `target/{debug,release}`
fn project_root() -> PathBuf {
    let mut path = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(grandparent) = path.parent().and_then(Path::parent) {
            path = grandparent.to_path_buf();
        }
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_under_project_data() {
        let config = AppConfig::from_vars(None, None, Path::new("/opt/mealplan"));
        assert_eq!(config.data_dir, PathBuf::from("/opt/mealplan/data"));
        assert_eq!(config.database_path, PathBuf::from("/opt/mealplan/data/mealplan.db"));
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_vars(
            Some("/tmp/plans.db".into()),
            Some("/srv/catalogs".into()),
            Path::new("/opt/mealplan"),
        );
        assert_eq!(config.database_path, PathBuf::from("/tmp/plans.db"));
        assert_eq!(config.data_dir, PathBuf::from("/srv/catalogs"));
    }
}
