use serde::{Serialize, Deserialize};
use crate::aggregate::TOP_DISPOSITIONS;

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Whether to show the category legend
    pub show_legend: bool,

    /// Number of bars in the disposition chart, capped at [`TOP_DISPOSITIONS`]
    pub top_dispositions: usize,

    /// Theme settings
    pub theme: ThemeSettings,
}

/// Theme settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeSettings {
    /// UI scale factor
    pub scale_factor: f32,

    /// Whether to use dark mode
    pub dark_mode: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            show_legend: true,
            top_dispositions: TOP_DISPOSITIONS,
            theme: ThemeSettings::default(),
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            scale_factor: 1.0,
            dark_mode: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_fill_defaults() {
        let settings: AppSettings = serde_json::from_str(r#"{ "top_dispositions": 8 }"#).unwrap();
        assert_eq!(settings.top_dispositions, 8);
        assert!(settings.show_legend);
        assert_eq!(settings.theme, ThemeSettings::default());
    }
}
