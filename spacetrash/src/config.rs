use serde::{Deserialize, Deserializer};
use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use crate::{source::CatalogSource, units::Ratio};

pub const DEFAULT_SOURCE: &str = "trash-data/space-track-full-3le.txt";
pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}'")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file")]
    Toml(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// The on-disk configuration, every key optional
#[derive(Clone, PartialEq, Debug, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    pub source: Option<CatalogSource>,
    pub simulate: Option<bool>,
    #[serde(deserialize_with = "humantime_duration")]
    pub frame_interval: Option<Duration>,
    pub frames: Option<u64>,
    pub time_scale: Option<f64>,
    pub snapshot: Option<PathBuf>,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::from_str_checked(&content)
    }

    pub fn from_str_checked(s: &str) -> Result<Self, ConfigError> {
        let cfg: Config = toml::from_str(s)?;

        if let Some(scale) = cfg.time_scale {
            if !scale.is_finite() || scale <= 0.0 {
                return Err(ConfigError::Invalid(format!(
                    "time-scale must be a positive number, got {scale}"
                )));
            }
        }
        if cfg.frame_interval == Some(Duration::ZERO) {
            return Err(ConfigError::Invalid(
                "frame-interval must be non-zero".to_owned(),
            ));
        }

        Ok(cfg)
    }

    /// Values set in `overrides` win
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            source: overrides.source.or(self.source),
            simulate: overrides.simulate.or(self.simulate),
            frame_interval: overrides.frame_interval.or(self.frame_interval),
            frames: overrides.frames.or(self.frames),
            time_scale: overrides.time_scale.or(self.time_scale),
            snapshot: overrides.snapshot.or(self.snapshot),
        }
    }
}

/// A fully resolved configuration
#[derive(Clone, PartialEq, Debug)]
pub struct Settings {
    pub source: CatalogSource,
    pub simulate: bool,
    pub frame_interval: Duration,
    pub frames: Option<u64>,
    pub time_scale: Ratio,
    pub snapshot: Option<PathBuf>,
}

impl From<Config> for Settings {
    fn from(cfg: Config) -> Self {
        Settings {
            source: cfg
                .source
                .unwrap_or_else(|| CatalogSource::File(PathBuf::from(DEFAULT_SOURCE))),
            simulate: cfg.simulate.unwrap_or(false),
            frame_interval: cfg.frame_interval.unwrap_or(DEFAULT_FRAME_INTERVAL),
            frames: cfg.frames,
            time_scale: Ratio::from_f64(cfg.time_scale.unwrap_or(1.0)),
            snapshot: cfg.snapshot,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Config::default().into()
    }
}

fn humantime_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    s.map(|s| humantime::parse_duration(&s).map_err(serde::de::Error::custom))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use url::Url;

    #[test]
    fn full_config() {
        let cfg = Config::from_str_checked(indoc! {r#"
            source = "https://celestrak.org/NORAD/elements/gp.php?GROUP=cosmos-2251-debris&FORMAT=tle"
            simulate = true
            frame-interval = "100ms"
            frames = 600
            time-scale = 60.0
            snapshot = "positions.jsonl"
        "#})
        .unwrap();

        assert_eq!(
            cfg,
            Config {
                source: Some(CatalogSource::Http(
                    Url::parse("https://celestrak.org/NORAD/elements/gp.php?GROUP=cosmos-2251-debris&FORMAT=tle")
                        .unwrap()
                )),
                simulate: Some(true),
                frame_interval: Some(Duration::from_millis(100)),
                frames: Some(600),
                time_scale: Some(60.0),
                snapshot: Some(PathBuf::from("positions.jsonl")),
            }
        );
    }

    #[test]
    fn defaults() {
        let settings = Settings::from(Config::from_str_checked("").unwrap());
        assert_eq!(
            settings.source,
            CatalogSource::File(PathBuf::from(DEFAULT_SOURCE))
        );
        assert!(!settings.simulate);
        assert_eq!(settings.frame_interval, Duration::from_millis(16));
        assert_eq!(settings.frames, None);
        assert_eq!(settings.time_scale.as_f64(), 1.0);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn overrides_win() {
        let file = Config::from_str_checked(indoc! {r#"
            simulate = false
            frames = 10
        "#})
        .unwrap();
        let cli = Config {
            simulate: Some(true),
            ..Default::default()
        };
        let merged = file.merge(cli);
        assert_eq!(merged.simulate, Some(true));
        assert_eq!(merged.frames, Some(10));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            Config::from_str_checked(r#"source = "gopher://example.com/3le""#),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Config::from_str_checked("time-scale = -2.0"),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_str_checked(r#"frame-interval = "0s""#),
            Err(ConfigError::Invalid(_))
        ));
        assert!(matches!(
            Config::from_str_checked(r#"frame-interval = "soon""#),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            Config::from_str_checked("speed = 3"),
            Err(ConfigError::Toml(_))
        ));
    }
}
