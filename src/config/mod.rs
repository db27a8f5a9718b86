//! Configuration loaded from `.answermap.toml`.

mod core;
mod loader;

pub use self::core::{AnswermapConfig, OutputConfig, ValidationConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_and_validate_config,
    CONFIG_FILE_NAME,
};

/// Default file written by `answermap init`
pub const DEFAULT_CONFIG_TOML: &str = r#"# Answermap Configuration

[validation]
# Advisory word cap per answer
word_limit = 300
# Inclusive applicant age range
min_age = 18
max_age = 25

[output]
default_format = "terminal"
"#;
