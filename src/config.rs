use crate::{
    error::{Error, Result},
    expanded::{EmissionSettings, GridSpacing},
    host::Color,
};
use serde::{Deserialize, Serialize};

/// Largest padding the box editor accepts.
pub const MAX_PADDING: f64 = 10.0;
const MAX_EXTENT_PRECISION: u32 = 6;

/// Settings shared by the box editor and the parameter-file writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchBoxConfig {
    /// Host object the box is drawn into.
    pub object_name: String,
    /// Host selection whose extent seeds the box.
    pub selection: String,
    pub padding: f64,
    pub probe_out: f64,
    pub spacing: GridSpacing,
    /// Decimal places kept on extent-derived half-extents. `Some(1)` matches a
    /// 0.1-step editor.
    pub extent_precision: Option<u32>,
    pub neutral_color: Color,
}

impl Default for SearchBoxConfig {
    fn default() -> Self {
        Self {
            object_name: "box".to_string(),
            selection: "sele".to_string(),
            padding: 3.5,
            probe_out: 4.0,
            spacing: GridSpacing::default(),
            extent_precision: None,
            neutral_color: Color::Rgb([0.86, 0.86, 0.86]),
        }
    }
}

impl SearchBoxConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        let config: Self = serde_json::from_slice(bytes)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.object_name.is_empty() {
            return Err(Error::InvalidConfig("object_name must not be empty".into()));
        }
        if !(0.0..=MAX_PADDING).contains(&self.padding) {
            return Err(Error::InvalidConfig(format!(
                "padding {} is outside [0, {MAX_PADDING}]",
                self.padding
            )));
        }
        if matches!(self.extent_precision, Some(p) if p > MAX_EXTENT_PRECISION) {
            return Err(Error::InvalidConfig(format!(
                "extent_precision is limited to {MAX_EXTENT_PRECISION} decimals"
            )));
        }
        self.emission().validate()
    }

    pub fn emission(&self) -> EmissionSettings {
        EmissionSettings {
            probe_out: self.probe_out,
            spacing: self.spacing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SearchBoxConfig::default();
        assert_eq!(config.object_name, "box");
        assert_eq!(config.padding, 3.5);
        assert_eq!(config.probe_out, 4.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SearchBoxConfig::from_json_str(
            r#"{ "padding": 2.0, "extent_precision": 1, "spacing": { "step_size": 0.6 } }"#,
        )
        .unwrap();

        assert_eq!(config.padding, 2.0);
        assert_eq!(config.extent_precision, Some(1));
        assert_eq!(config.spacing, GridSpacing::StepSize(0.6));
        assert_eq!(config.selection, "sele");
    }

    #[test]
    fn named_and_rgb_colors() {
        let config = SearchBoxConfig::from_json_slice(br#"{ "neutral_color": "grey70" }"#).unwrap();
        assert_eq!(config.neutral_color, Color::named("grey70"));

        let config =
            SearchBoxConfig::from_json_slice(br#"{ "neutral_color": [1.0, 0.5, 0.0] }"#).unwrap();
        assert_eq!(config.neutral_color, Color::Rgb([1.0, 0.5, 0.0]));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SearchBoxConfig::from_json_str(r#"{ "padding": 11.0 }"#),
            Err(Error::InvalidConfig(_))
        ));
        assert!(matches!(
            SearchBoxConfig::from_json_str(r#"{ "spacing": { "step_size": 0.0 } }"#),
            Err(Error::ZeroStepSize(_))
        ));
        assert!(matches!(
            SearchBoxConfig::from_json_str(r#"{ "padding": "wide" }"#),
            Err(Error::Config(_))
        ));
    }
}
