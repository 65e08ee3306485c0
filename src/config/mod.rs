//! Settings, validation and the request-scoped [`Policy`].
/// Config file loader
mod loader;
/// Configuration manager
mod manager;
/// Record file and attribute matchers
mod matcher;
/// Translation policy
mod policy;
/// Configuration types and settings
mod types;

pub use loader::CONFIG_FILE_NAME;
pub use manager::ConfigManager;
pub use matcher::{
    AttributeFilter,
    MatcherError,
    RecordFileMatcher,
};
pub use policy::{
    CallbackError,
    MissingTranslation,
    MissingTranslationCallback,
    Policy,
};
pub use types::{
    AttributeDeclaration,
    ConfigError,
    ModelConfig,
    RecordFilesConfig,
    TranslatableSettings,
    ValidationError,
};
