use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::theme::Theme;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Separator between path segments inside record ids.
    pub delimiter: String,
    /// Fraction of the artboard width used as the outermost radius.
    pub radius_scale: f32,
    pub sibling_separation: f32,
    pub cousin_separation: f32,
    pub node_radius: f32,
    /// Horizontal gap between a node and its label, in user units.
    pub label_offset: f32,
    /// Vertical label nudge, in em, to center text on the node.
    pub label_shift_em: f32,
    /// Opacity applied to nodes and links off the highlighted path.
    pub dim_opacity: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            delimiter: "|".to_string(),
            radius_scale: 0.3,
            sibling_separation: 1.0,
            cousin_separation: 2.0,
            node_radius: 2.5,
            label_offset: 6.0,
            label_shift_em: 0.31,
            dim_opacity: 0.15,
        }
    }
}

/// Artboard dimensions, read once at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 600.0,
            height: 600.0,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub theme: Theme,
    pub layout: LayoutConfig,
    pub render: RenderConfig,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ThemeVariables {
    font_family: Option<String>,
    font_size: Option<f32>,
    background: Option<String>,
    link_color: Option<String>,
    node_fill: Option<String>,
    label_color: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LayoutConfigFile {
    delimiter: Option<String>,
    radius_scale: Option<f32>,
    sibling_separation: Option<f32>,
    cousin_separation: Option<f32>,
    node_radius: Option<f32>,
    label_offset: Option<f32>,
    label_shift_em: Option<f32>,
    dim_opacity: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConfigFile {
    theme: Option<String>,
    theme_variables: Option<ThemeVariables>,
    layout: Option<LayoutConfigFile>,
    width: Option<f32>,
    height: Option<f32>,
}

/// Layer an optional JSON5 config file over the defaults. Absent file or
/// absent fields leave the defaults untouched.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = Config::default();
    let Some(path) = path else {
        return Ok(config);
    };

    let contents = std::fs::read_to_string(path)?;
    let parsed: ConfigFile = json5::from_str(&contents)?;

    if let Some(theme_name) = parsed.theme.as_deref()
        && let Some(theme) = Theme::by_name(theme_name)
    {
        config.theme = theme;
    }
    if let Some(vars) = parsed.theme_variables {
        if let Some(v) = vars.font_family {
            config.theme.font_family = v;
        }
        if let Some(v) = vars.font_size {
            config.theme.font_size = v;
        }
        if let Some(v) = vars.background {
            config.theme.background = v;
        }
        if let Some(v) = vars.link_color {
            config.theme.link_color = v;
        }
        if let Some(v) = vars.node_fill {
            config.theme.node_fill = v;
        }
        if let Some(v) = vars.label_color {
            config.theme.label_color = v;
        }
    }
    if let Some(layout) = parsed.layout {
        if let Some(v) = layout.delimiter {
            config.layout.delimiter = v;
        }
        if let Some(v) = layout.radius_scale {
            config.layout.radius_scale = v;
        }
        if let Some(v) = layout.sibling_separation {
            config.layout.sibling_separation = v;
        }
        if let Some(v) = layout.cousin_separation {
            config.layout.cousin_separation = v;
        }
        if let Some(v) = layout.node_radius {
            config.layout.node_radius = v;
        }
        if let Some(v) = layout.label_offset {
            config.layout.label_offset = v;
        }
        if let Some(v) = layout.label_shift_em {
            config.layout.label_shift_em = v;
        }
        if let Some(v) = layout.dim_opacity {
            config.layout.dim_opacity = v;
        }
    }
    if let Some(v) = parsed.width {
        config.render.width = v;
    }
    if let Some(v) = parsed.height {
        config.render.height = v;
    }

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_construction_parameters() {
        let config = Config::default();
        assert_eq!(config.render.width, 600.0);
        assert_eq!(config.render.height, 600.0);
        assert_eq!(config.layout.delimiter, "|");
        assert_eq!(config.layout.radius_scale, 0.3);
        assert_eq!(config.layout.dim_opacity, 0.15);
    }

    #[test]
    fn no_config_file_yields_defaults() {
        let config = load_config(None).unwrap();
        assert_eq!(config.layout.delimiter, "|");
        assert_eq!(config.theme.background, Theme::classic().background);
    }
}
