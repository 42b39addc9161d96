use eyre::{Error, WrapErr};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "hackbright.toml";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub database: DatabaseConfig,
    pub grades: GradesConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub create_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://hackbright.db?mode=rwc".to_owned(),
            max_connections: 5,
            create_schema: false,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GradesConfig {
    /// Refuse to grade a student or a project which does not exist.
    pub check_references: bool,
}

impl Default for GradesConfig {
    fn default() -> Self {
        Self {
            check_references: true,
        }
    }
}

impl Config {
    pub fn load(file_name: &Path) -> Result<Config, Error> {
        let content = std::fs::read_to_string(file_name)
            .wrap_err_with(|| format!("cannot load configuration file {}", file_name.display()))?;
        Self::parse(&content)
            .wrap_err_with(|| format!("cannot parse configuration file {}", file_name.display()))
    }

    /// Load the configuration file if it was given explicitly, or if the
    /// default one exists. Use the defaults otherwise.
    pub fn load_or_default(file_name: Option<&Path>) -> Result<Config, Error> {
        match file_name {
            Some(file_name) => Self::load(file_name),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load(Path::new(DEFAULT_CONFIG_FILE))
            }
            None => Ok(Config::default()),
        }
    }

    fn parse(content: &str) -> Result<Config, toml::de::Error> {
        toml::from_str(content)
    }
}
