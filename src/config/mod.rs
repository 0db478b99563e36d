mod settings;

pub use settings::{CacheSettings, KeyFormatConfig, LogFormat, LoggingConfig};
