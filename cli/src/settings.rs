use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use saper_core::{CellCount, Coord, GameConfig};
use serde::Deserialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Expert,
}

impl Difficulty {
    pub const fn config(self) -> GameConfig {
        match self {
            Self::Beginner => GameConfig::beginner(),
            Self::Intermediate => GameConfig::intermediate(),
            Self::Expert => GameConfig::expert(),
        }
    }
}

/// One layer of game settings, from the settings file or the command line.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub difficulty: Option<Difficulty>,
    pub rows: Option<Coord>,
    pub cols: Option<Coord>,
    pub mines: Option<CellCount>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read settings from {}", path.display()))?;
        let settings: Self = toml::from_str(&text)
            .with_context(|| format!("Invalid settings file {}", path.display()))?;
        log::debug!("Loaded settings from {}: {:?}", path.display(), settings);
        Ok(settings)
    }

    /// Within a layer the preset is applied first, explicit dimensions win.
    pub fn apply(&self, config: GameConfig) -> GameConfig {
        let mut config = self.difficulty.map_or(config, Difficulty::config);
        if let Some(rows) = self.rows {
            config.rows = rows;
        }
        if let Some(cols) = self.cols {
            config.cols = cols;
        }
        if let Some(mines) = self.mines {
            config.mines = mines;
        }
        config
    }

    /// Later layers override earlier ones. The result is not validated here,
    /// the engine rejects invalid configurations.
    pub fn resolve(layers: &[&Settings]) -> (GameConfig, Option<u64>) {
        layers.iter().fold(
            (GameConfig::default(), None),
            |(config, seed), layer| (layer.apply(config), layer.seed.or(seed)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_intermediate() {
        let (config, seed) = Settings::resolve(&[]);

        assert_eq!(config, GameConfig::new_unchecked(16, 16, 40));
        assert_eq!(seed, None);
    }

    #[test]
    fn parses_toml_layer() {
        let settings: Settings = toml::from_str(
            r#"
            difficulty = "expert"
            mines = 120
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(settings.difficulty, Some(Difficulty::Expert));
        assert_eq!(
            Settings::resolve(&[&settings]),
            (GameConfig::new_unchecked(16, 30, 120), Some(7))
        );
    }

    #[test]
    fn rejects_unknown_keys() {
        assert!(toml::from_str::<Settings>("colour = \"red\"").is_err());
    }

    #[test]
    fn command_line_overrides_file() {
        let file = Settings {
            rows: Some(10),
            cols: Some(12),
            mines: Some(20),
            seed: Some(1),
            ..Default::default()
        };
        let preset = Settings {
            difficulty: Some(Difficulty::Beginner),
            ..Default::default()
        };
        let explicit = Settings {
            difficulty: Some(Difficulty::Beginner),
            mines: Some(12),
            seed: Some(2),
            ..Default::default()
        };

        assert_eq!(
            Settings::resolve(&[&file]),
            (GameConfig::new_unchecked(10, 12, 20), Some(1))
        );
        assert_eq!(
            Settings::resolve(&[&file, &preset]),
            (GameConfig::beginner(), Some(1))
        );
        assert_eq!(
            Settings::resolve(&[&file, &explicit]),
            (GameConfig::new_unchecked(9, 9, 12), Some(2))
        );
    }

    #[test]
    fn load_reports_missing_file() {
        let err = Settings::load(Path::new("/nonexistent/saper.toml")).unwrap_err();

        assert!(err.to_string().contains("Could not read settings"));
    }
}
