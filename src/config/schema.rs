use serde::{Deserialize, Serialize};

use crate::handicap::HandicapSystem;
use crate::scoring::GoldsType;

pub const DEFAULT_END_SIZE: usize = 6;

/// User preferences, loaded from `~/.config/archery-scorer/config.yaml`.
///
/// Every field is optional; command line flags override whatever is set here.
///
/// Example YAML:
/// ```yaml
/// end_size: 3
/// golds_type: xs
/// handicap_system: legacy
/// inner_ten_archer: true
/// color: never
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Arrows per end on the score pad (default: 6)
    #[serde(default)]
    pub end_size: Option<usize>,

    /// Which arrows count as golds (default: nines for imperial rounds, tens otherwise)
    #[serde(default)]
    pub golds_type: Option<GoldsType>,

    /// Handicap tables to use (default: agb2023)
    #[serde(default)]
    pub handicap_system: Option<HandicapSystem>,

    /// Score indoor ten-zone rounds with inner-ten rules
    #[serde(default)]
    pub inner_ten_archer: Option<bool>,

    #[serde(default)]
    pub color: Option<ColorMode>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            end_size: Some(DEFAULT_END_SIZE),
            golds_type: None,
            handicap_system: Some(HandicapSystem::default()),
            inner_ten_archer: Some(false),
            color: Some(ColorMode::Auto),
        }
    }
}

impl Config {
    pub fn end_size(&self) -> usize {
        self.end_size.unwrap_or(DEFAULT_END_SIZE)
    }

    pub fn handicap_system(&self) -> HandicapSystem {
        self.handicap_system.unwrap_or_default()
    }

    pub fn inner_ten_archer(&self) -> bool {
        self.inner_ten_archer.unwrap_or(false)
    }

    pub fn color(&self) -> ColorMode {
        self.color.unwrap_or(ColorMode::Auto)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Colour when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.end_size(), 6);
        assert_eq!(config.handicap_system(), HandicapSystem::Agb2023);
        assert!(!config.inner_ten_archer());
        assert!(config.golds_type.is_none());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = Config::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: Config = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_full_config_parse() {
        let yaml = r#"
end_size: 3
golds_type: xs
handicap_system: legacy
inner_ten_archer: true
color: never
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.end_size(), 3);
        assert_eq!(config.golds_type, Some(GoldsType::Xs));
        assert_eq!(config.handicap_system(), HandicapSystem::Legacy);
        assert!(config.inner_ten_archer());
        assert_eq!(config.color(), ColorMode::Never);
    }

    #[test]
    fn test_empty_config_uses_fallbacks() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert!(config.end_size.is_none());
        assert_eq!(config.end_size(), DEFAULT_END_SIZE);
        assert_eq!(config.color(), ColorMode::Auto);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result: Result<Config, _> = serde_saphyr::from_str("arrows_per_end: 6\n");
        assert!(result.is_err());
    }
}
