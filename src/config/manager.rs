//! Holds the validated settings of the current workspace.

use std::path::{
    Path,
    PathBuf,
};

use super::{
    ConfigError,
    EditorSettings,
    SettingsFile,
};

/// Current settings plus where they came from.
#[derive(Default, Debug, Clone)]
pub struct ConfigManager {
    current_settings: EditorSettings,
    /// Root of the last successful `load_settings`
    workspace_root: Option<PathBuf>,
    /// File that supplied `current_settings`; `None` for defaults or
    /// settings pushed by the client
    source: Option<SettingsFile>,
}

impl ConfigManager {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read and validate the settings file of a workspace.
    ///
    /// Without a root or without a file, defaults apply. On error nothing
    /// changes, the workspace root included.
    ///
    /// # Errors
    /// `Read`/`Parse` naming the file, or `ValidationErrors`.
    pub fn load_settings(&mut self, workspace_root: Option<PathBuf>) -> Result<(), ConfigError> {
        let file = workspace_root.as_deref().map(SettingsFile::in_workspace);
        let loaded = match &file {
            Some(file) => file.read()?,
            None => None,
        };

        let source = loaded.as_ref().and(file);
        let settings = loaded.unwrap_or_default();
        settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::info!(
            root = ?workspace_root,
            file = ?source.as_ref().map(SettingsFile::path),
            "Settings loaded"
        );
        self.current_settings = settings;
        self.workspace_root = workspace_root;
        self.source = source;
        Ok(())
    }

    /// Replace the settings with ones sent by the client.
    ///
    /// Returns the settings that were replaced.
    ///
    /// # Errors
    /// `ValidationErrors`; the current settings are kept.
    pub fn update_settings(
        &mut self,
        new_settings: EditorSettings,
    ) -> Result<EditorSettings, ConfigError> {
        new_settings.validate().map_err(ConfigError::ValidationErrors)?;

        tracing::debug!(settings = ?new_settings, "Settings updated by client");
        self.source = None;
        Ok(std::mem::replace(&mut self.current_settings, new_settings))
    }

    /// Whether moving to `new_settings` selects a different set of language
    /// files, so an open editor has to be rebuilt rather than adjusted.
    #[must_use]
    pub fn requires_rebuild(&self, new_settings: &EditorSettings) -> bool {
        self.current_settings.translation_files != new_settings.translation_files
    }

    #[must_use]
    pub const fn get_settings(&self) -> &EditorSettings {
        &self.current_settings
    }

    #[must_use]
    pub fn workspace_root(&self) -> Option<&Path> {
        self.workspace_root.as_deref()
    }

    #[must_use]
    pub const fn settings_file(&self) -> Option<&SettingsFile> {
        self.source.as_ref()
    }
}
