use serde::{Deserialize, Serialize};

use crate::core::{Error, Result};
use crate::io::output::OutputFormat;
use crate::validation::{AgeBounds, DEFAULT_WORD_LIMIT};

/// Root configuration structure for answermap
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct AnswermapConfig {
    /// Answer validation limits
    #[serde(default)]
    pub validation: ValidationConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Advisory per-answer word cap
    #[serde(default = "default_word_limit")]
    pub word_limit: usize,

    #[serde(default = "default_min_age")]
    pub min_age: u32,

    #[serde(default = "default_max_age")]
    pub max_age: u32,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            word_limit: default_word_limit(),
            min_age: default_min_age(),
            max_age: default_max_age(),
        }
    }
}

impl ValidationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.word_limit == 0 {
            return Err(Error::Configuration(
                "word_limit must be greater than 0".to_string(),
            ));
        }
        if self.min_age > self.max_age {
            return Err(Error::Configuration(format!(
                "min_age ({}) must not exceed max_age ({})",
                self.min_age, self.max_age
            )));
        }
        Ok(())
    }

    pub fn age_bounds(&self) -> AgeBounds {
        AgeBounds {
            min: self.min_age,
            max: self.max_age,
        }
    }
}

fn default_word_limit() -> usize {
    DEFAULT_WORD_LIMIT
}
fn default_min_age() -> u32 {
    AgeBounds::default().min
}
fn default_max_age() -> u32 {
    AgeBounds::default().max
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub default_format: Option<OutputFormat>,
}
