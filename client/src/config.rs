use std::{fs, path::Path};

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Grid side length. Asked interactively when missing.
    pub side: Option<usize>,

    pub alive_glyph: char,
    pub dead_glyph: char,

    /// Clear the terminal before drawing each generation.
    pub clear_screen: bool,
    pub color: bool,

    /// Cells alive at startup as [row, col].
    pub seed: Vec<[usize; 2]>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            side: None,
            alive_glyph: '#',
            dead_glyph: '.',
            clear_screen: false,
            color: false,
            seed: Vec::new(),
        }
    }
}

impl Config {
    pub fn load<P>(path: P) -> anyhow::Result<Self>
    where
        P: AsRef<Path>,
    {
        let config_serialized = fs::read(path).context("Couldn't read config")?;
        let config =
            serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")?;
        Ok(config)
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Couldn't serialize config")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config = serde_json::from_str(r#"{ "side": 8, "alive_glyph": "o" }"#).unwrap();

        assert_eq!(config.side, Some(8));
        assert_eq!(config.alive_glyph, 'o');
        assert_eq!(config.dead_glyph, '.');
        assert!(config.seed.is_empty());
    }

    #[test]
    fn dumped_config_parses_back() {
        let config = Config {
            seed: vec![[1, 2], [3, 4]],
            ..Config::default()
        };

        let parsed: Config = serde_json::from_str(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }
}
