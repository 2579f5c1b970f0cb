//! Configuration system for the simulation.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub field: FieldConfig,
    pub species: Vec<SpeciesConfig>,
    pub logging: LoggingConfig,
}

/// Field/grid configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Number of rows
    pub depth: usize,
    /// Number of columns
    pub width: usize,
}

/// Parameters for one species
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesConfig {
    /// Species name, referenced by prey lists
    pub name: String,
    /// Individuals seeded by populate
    pub initial_count: usize,
    /// Age at which breeding becomes possible
    pub breeding_age: u32,
    /// Per-step probability of breeding once of age
    pub breeding_probability: f64,
    /// Maximum number of births per breeding event
    pub max_litter_size: u32,
    /// Age past which the animal dies
    pub max_age: u32,
    /// Steps a hunter can go without eating; unset for grazers
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_value: Option<u32>,
    /// Names of species this one hunts; empty for grazers
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prey: Vec<String>,
}

/// Logging and reporting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Steps between stats lines and history records
    pub stats_interval: u64,
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            species: vec![
                SpeciesConfig {
                    name: "rabbit".to_string(),
                    initial_count: 750,
                    breeding_age: 5,
                    breeding_probability: 0.12,
                    max_litter_size: 4,
                    max_age: 40,
                    food_value: None,
                    prey: Vec::new(),
                },
                SpeciesConfig {
                    name: "fox".to_string(),
                    initial_count: 200,
                    breeding_age: 15,
                    breeding_probability: 0.08,
                    max_litter_size: 2,
                    max_age: 150,
                    food_value: Some(9),
                    prey: vec!["rabbit".to_string()],
                },
                SpeciesConfig {
                    name: "chupacabra".to_string(),
                    initial_count: 100,
                    breeding_age: 6,
                    breeding_probability: 0.058,
                    max_litter_size: 5,
                    max_age: 66,
                    food_value: Some(7),
                    prey: vec![
                        "rabbit".to_string(),
                        "fox".to_string(),
                        "chupacabra".to_string(),
                    ],
                },
            ],
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            depth: 80,
            width: 120,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            stats_interval: 10,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.field.depth == 0 || self.field.width == 0 {
            return Err("field dimensions must be positive".to_string());
        }
        if self.field.depth > 1024 || self.field.width > 1024 {
            return Err("field dimensions must not exceed 1024".to_string());
        }
        if self.species.is_empty() {
            return Err("at least one species must be configured".to_string());
        }
        if self.logging.stats_interval == 0 {
            return Err("stats_interval must be > 0".to_string());
        }

        let mut names = HashSet::new();
        for species in &self.species {
            if species.name.is_empty() {
                return Err("species name must not be empty".to_string());
            }
            if !names.insert(species.name.as_str()) {
                return Err(format!("duplicate species name '{}'", species.name));
            }
        }

        for species in &self.species {
            if !(0.0..=1.0).contains(&species.breeding_probability) {
                return Err(format!(
                    "species '{}': breeding_probability must be between 0 and 1",
                    species.name
                ));
            }
            if species.max_litter_size == 0 {
                return Err(format!(
                    "species '{}': max_litter_size must be > 0",
                    species.name
                ));
            }
            if species.max_age == 0 {
                return Err(format!("species '{}': max_age must be > 0", species.name));
            }
            match (&species.food_value, species.prey.is_empty()) {
                (Some(0), _) => {
                    return Err(format!(
                        "species '{}': food_value must be > 0",
                        species.name
                    ));
                }
                (Some(_), true) => {
                    return Err(format!(
                        "species '{}': food_value given but no prey listed",
                        species.name
                    ));
                }
                (None, false) => {
                    return Err(format!(
                        "species '{}': prey listed but no food_value given",
                        species.name
                    ));
                }
                _ => {}
            }
            for prey_name in &species.prey {
                if !names.contains(prey_name.as_str()) {
                    return Err(format!(
                        "species '{}' preys on unknown species '{}'",
                        species.name, prey_name
                    ));
                }
            }
        }

        let total: usize = self.species.iter().map(|s| s.initial_count).sum();
        if total > self.field.depth * self.field.width {
            return Err("initial counts exceed the field capacity".to_string());
        }

        Ok(())
    }
}
