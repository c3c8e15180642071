// config.rs

use personagen::LifeStage;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

/// Represents the full configuration of a generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Life stage the generated personalities belong to.
    pub life_stage: LifeStage,

    /// Number of personalities to generate.
    pub count: usize,

    /// Optional seed; when absent the generator seeds from OS entropy.
    pub seed: Option<u64>,

    /// Emit each personality as a flat JSON mapping instead of prose.
    pub output_json: bool,
}

impl GeneratorConfig {
    /// Returns a default configuration for a generation run.
    pub fn default() -> Self {
        Self {
            life_stage: LifeStage::Adult,
            count: 3,
            seed: None,
            output_json: false,
        }
    }

    /// Loads a configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - The file path to load the configuration from.
    ///
    /// # Returns
    /// * `Ok(GeneratorConfig)` if the file is successfully read and parsed.
    /// * `Err(Box<dyn std::error::Error>)` if an error occurs.
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: GeneratorConfig = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Saves the current configuration to a JSON file.
    ///
    /// # Arguments
    /// * `path` - The file path to save the configuration to.
    ///
    /// # Returns
    /// * `Ok(())` if the file is successfully written.
    /// * `Err(Box<dyn std::error::Error>)` if an error occurs.
    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
