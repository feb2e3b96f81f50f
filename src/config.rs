//! Runtime settings read from the environment.

use std::path::PathBuf;

use thiserror::Error;

use crate::geometry::Bounds;

pub const SEED_ENV_VAR: &str = "ECO_DUCK_SEED";
pub const ASCII_ENV_VAR: &str = "ECO_DUCK_ASCII";
pub const LOG_ENV_VAR: &str = "ECO_DUCK_LOG";

/// How entities are drawn in the terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GlyphStyle {
    Emoji,
    Ascii,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub bounds: Bounds,
    /// Fixed RNG seed; `None` seeds from entropy.
    pub seed: Option<u64>,
    pub glyphs: GlyphStyle,
    pub log_file: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::default(),
            seed: None,
            glyphs: GlyphStyle::Emoji,
            log_file: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be an integer, got {value:?}")]
    NotAnInteger { var: &'static str, value: String },
}

impl GameConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build a config from an arbitrary variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup(SEED_ENV_VAR) {
            config.seed = Some(parse_int(SEED_ENV_VAR, &raw)?);
        }

        let ascii_requested = lookup(ASCII_ENV_VAR)
            .map(|v| {
                let v = v.trim();
                !v.is_empty() && v != "0"
            })
            .unwrap_or(false);
        let term_lacks_emoji = lookup("TERM")
            .map(|t| t == "linux" || t == "dumb")
            .unwrap_or(false);
        if ascii_requested || term_lacks_emoji {
            config.glyphs = GlyphStyle::Ascii;
        }

        config.log_file = lookup(LOG_ENV_VAR)
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(config)
    }
}

fn parse_int<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::NotAnInteger {
        var,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = GameConfig::from_lookup(|_| None).expect("defaults");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn reads_seed() {
        let config = GameConfig::from_lookup(lookup_from(&[(SEED_ENV_VAR, " 42 ")])).expect("valid");
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn frame_rate_is_not_configurable() {
        // The level clock and every gameplay timer count 60 Hz frames
        let config = GameConfig::from_lookup(lookup_from(&[("ECO_DUCK_TICK_RATE", "30")]))
            .expect("unknown variables are ignored");
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn rejects_non_numeric_seed() {
        let err = GameConfig::from_lookup(lookup_from(&[(SEED_ENV_VAR, "abc")]))
            .expect_err("not a number");
        assert_eq!(
            err,
            ConfigError::NotAnInteger {
                var: SEED_ENV_VAR,
                value: "abc".to_string()
            }
        );
    }

    #[test]
    fn ascii_glyphs_on_request_or_dumb_terminal() {
        let forced = GameConfig::from_lookup(lookup_from(&[(ASCII_ENV_VAR, "1")])).expect("valid");
        assert_eq!(forced.glyphs, GlyphStyle::Ascii);

        let zero = GameConfig::from_lookup(lookup_from(&[(ASCII_ENV_VAR, "0")])).expect("valid");
        assert_eq!(zero.glyphs, GlyphStyle::Emoji);

        let dumb = GameConfig::from_lookup(lookup_from(&[("TERM", "dumb")])).expect("valid");
        assert_eq!(dumb.glyphs, GlyphStyle::Ascii);
    }
}
