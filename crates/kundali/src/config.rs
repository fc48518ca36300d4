use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::ayanamsa::AyanamsaModel;
use crate::houses::{HouseSystemKind, DEFAULT_POLAR_LATITUDE_LIMIT};

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/kundali.toml", "../../configs/kundali.toml"];

/// Chart pipeline settings, read from `kundali.toml`.
///
/// ```toml
/// house_system = "whole_sign"
/// polar_latitude_limit = 66.0
///
/// [ayanamsa]
/// model = "lahiri"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartSettings {
    pub house_system: HouseSystemKind,
    /// Ascendants above this absolute latitude are rejected
    pub polar_latitude_limit: f64,
    pub ayanamsa: AyanamsaModel,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            house_system: HouseSystemKind::default(),
            polar_latitude_limit: DEFAULT_POLAR_LATITUDE_LIMIT,
            ayanamsa: AyanamsaModel::default(),
        }
    }
}

impl ChartSettings {
    pub fn from_toml_str(text: &str) -> anyhow::Result<Self> {
        let settings: ChartSettings = toml::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse chart settings: {e}"))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read {}: {e}", path.display()))?;
        let settings = Self::from_toml_str(&text)?;
        log::info!(
            "Loaded chart settings from {} ({}, {})",
            path.display(),
            settings.ayanamsa,
            settings.house_system
        );
        Ok(settings)
    }

    /// Try the usual relative locations of `configs/kundali.toml`, falling
    /// back to defaults when none exists. A file that exists but does not
    /// parse is still an error.
    pub fn load_default() -> anyhow::Result<Self> {
        for p in &DEFAULT_CONFIG_PATHS {
            if Path::new(p).exists() {
                return Self::load(p);
            }
        }
        log::debug!("No kundali.toml in {:?}, using defaults", DEFAULT_CONFIG_PATHS);
        Ok(Self::default())
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        let limit = self.polar_latitude_limit;
        if !(limit > 0.0 && limit < 90.0) {
            anyhow::bail!("polar_latitude_limit must lie in (0, 90), got {limit}");
        }
        if let AyanamsaModel::Custom {
            reference_j2000_deg,
            annual_rate_deg,
            annual_acceleration_deg,
        } = self.ayanamsa
        {
            if ![reference_j2000_deg, annual_rate_deg, annual_acceleration_deg]
                .iter()
                .all(|v| v.is_finite())
            {
                anyhow::bail!("custom ayanamsa parameters must be finite");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let settings = ChartSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ChartSettings::default());
        assert_eq!(settings.ayanamsa, AyanamsaModel::Lahiri);
        assert_eq!(settings.house_system, HouseSystemKind::WholeSign);
        assert_eq!(settings.polar_latitude_limit, 66.0);
    }

    #[test]
    fn test_parse_named_and_custom() {
        let settings = ChartSettings::from_toml_str(
            r#"
house_system = "sign_aligned"
polar_latitude_limit = 60.0

[ayanamsa]
model = "fagan_bradley"
"#,
        )
        .unwrap();
        assert_eq!(settings.ayanamsa, AyanamsaModel::FaganBradley);
        assert_eq!(settings.house_system, HouseSystemKind::SignAligned);
        assert_eq!(settings.polar_latitude_limit, 60.0);

        let settings = ChartSettings::from_toml_str(
            r#"
[ayanamsa]
model = "custom"
reference_j2000_deg = 23.0
annual_rate_deg = 0.014
"#,
        )
        .unwrap();
        assert_eq!(
            settings.ayanamsa,
            AyanamsaModel::Custom {
                reference_j2000_deg: 23.0,
                annual_rate_deg: 0.014,
                annual_acceleration_deg: 0.0,
            }
        );
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert!(ChartSettings::from_toml_str("polar_latitude_limit = 90.0").is_err());
        assert!(ChartSettings::from_toml_str("polar_latitude_limit = 0.0").is_err());
        assert!(ChartSettings::from_toml_str("house_system = \"placidus\"").is_err());
        assert!(ChartSettings::from_toml_str("[ayanamsa]\nmodel = \"tropical\"").is_err());
    }

    #[test]
    fn test_serialized_settings_parse_back() {
        let settings = ChartSettings {
            ayanamsa: AyanamsaModel::Raman,
            house_system: HouseSystemKind::SignAligned,
            polar_latitude_limit: 65.0,
        };
        let text = toml::to_string(&settings).unwrap();
        assert_eq!(ChartSettings::from_toml_str(&text).unwrap(), settings);
    }
}
