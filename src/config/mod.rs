// Configuration management module
// Loads search-index.toml and resolves the site paths the indexer works on

pub mod settings;


pub use settings::{
    CONFIG_FILE_NAME, Config, ConfigError, FeedsConfig, IndexingConfig, OutputDir, SiteConfig,
    TutorialsConfig,
};
