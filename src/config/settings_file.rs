//! The `.i18n-editor.json` file in a workspace root.

use std::io::ErrorKind;
use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    EditorSettings,
};
use crate::store::json::repair_trailing_commas;

/// Name of the settings file in the workspace root.
///
/// It starts with a dot, so language discovery never picks it up.
pub const SETTINGS_FILE_NAME: &str = ".i18n-editor.json";

/// Location of a workspace's settings file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    /// `<workspace root>/.i18n-editor.json`
    path: PathBuf,
}

impl SettingsFile {
    #[must_use]
    pub fn in_workspace(workspace_root: &Path) -> Self {
        Self { path: workspace_root.join(SETTINGS_FILE_NAME) }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read and parse the file, tolerating trailing commas like language
    /// files do.
    ///
    /// Returns `Ok(None)` when the workspace has no settings file.
    ///
    /// # Errors
    /// `ConfigError::Read` or `ConfigError::Parse`, naming the file.
    pub fn read(&self) -> Result<Option<EditorSettings>, ConfigError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "No settings file");
                return Ok(None);
            }
            Err(source) => return Err(ConfigError::Read { path: self.path.clone(), source }),
        };

        tracing::debug!(path = %self.path.display(), "Reading settings file");
        serde_json::from_str(&repair_trailing_commas(&content))
            .map(Some)
            .map_err(|source| ConfigError::Parse { path: self.path.clone(), source })
    }
}
