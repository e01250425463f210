use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    pub font_family: String,
    pub font_size: f32,
    pub background: String,
    pub link_color: String,
    pub node_fill: String,
    pub label_color: String,
}

impl Theme {
    pub fn classic() -> Self {
        Self {
            font_family: "verdana, arial, sans-serif".to_string(),
            font_size: 10.0,
            background: "#FFFFFF".to_string(),
            link_color: "#CCCCCC".to_string(),
            node_fill: "#555555".to_string(),
            label_color: "#333333".to_string(),
        }
    }

    pub fn midnight() -> Self {
        Self {
            font_family: "Inter, Segoe UI, system-ui, -apple-system, sans-serif".to_string(),
            font_size: 11.0,
            background: "#101418".to_string(),
            link_color: "#3A4453".to_string(),
            node_fill: "#7A8AA6".to_string(),
            label_color: "#D7E0F0".to_string(),
        }
    }

    pub fn by_name(name: &str) -> Option<Self> {
        match name {
            "classic" | "default" => Some(Self::classic()),
            "midnight" => Some(Self::midnight()),
            _ => None,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}
