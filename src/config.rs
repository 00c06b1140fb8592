//! Workspace settings for the editor.
/// Configuration manager
mod manager;
/// The workspace settings file
mod settings_file;
/// Configuration types and settings
mod types;

pub use manager::ConfigManager;
pub use settings_file::{
    SETTINGS_FILE_NAME,
    SettingsFile,
};
pub use types::{
    ConfigError,
    EditorSettings,
    SearchConfig,
    TranslationFilesConfig,
    ValidationError,
};
