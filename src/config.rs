//! Configuration for diagram rendering and interaction.
//!
//! All types implement [`serde::Deserialize`] with per-field defaults, so a
//! partial TOML document only overrides what it names.
//!
//! ```
//! use solution_diagram::config::{DeleteKey, DiagramConfig};
//!
//! let config = DiagramConfig::from_toml_str(
//!     r##"
//!     delete_key = "delete"
//!
//!     [edge]
//!     color = "#ff8800"
//!     "##,
//! )
//! .unwrap();
//!
//! assert_eq!(config.delete_key, DeleteKey::Delete);
//! assert_eq!(config.default_position.x, 10.0);
//! ```

use serde::{Deserialize, Deserializer};
use slint::platform::Key;
use slint::{Color, SharedString};

use crate::error::DiagramError;
use crate::snapshot::Position;

/// Top-level configuration of a diagram instance.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DiagramConfig {
    /// Position used for components without a layout entry.
    pub default_position: Position,
    pub node: NodeStyle,
    pub edge: EdgeStyle,
    /// Key that deletes the current selection.
    pub delete_key: DeleteKey,
    /// Maximum distance (canvas units) between a pointer and an edge for
    /// the pointer to hit it.
    pub edge_hit_tolerance: f32,
}

impl Default for DiagramConfig {
    fn default() -> Self {
        Self {
            default_position: Position::new(10.0, 10.0),
            node: NodeStyle::default(),
            edge: EdgeStyle::default(),
            delete_key: DeleteKey::default(),
            edge_hit_tolerance: 5.0,
        }
    }
}

impl DiagramConfig {
    /// Parse a configuration from TOML.
    pub fn from_toml_str(source: &str) -> Result<Self, DiagramError> {
        Ok(toml::from_str(source)?)
    }
}

/// Visual style of node boxes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeStyle {
    pub width: f32,
    pub height: f32,
    #[serde(deserialize_with = "deserialize_color")]
    pub fill: Color,
    #[serde(deserialize_with = "deserialize_color")]
    pub stroke: Color,
    pub stroke_width: f32,
    pub corner_radius: f32,
    #[serde(deserialize_with = "deserialize_color")]
    pub label_color: Color,
}

impl Default for NodeStyle {
    fn default() -> Self {
        Self {
            width: 100.0,
            height: 40.0,
            fill: Color::from_rgb_u8(0x00, 0x00, 0xff),
            stroke: Color::from_rgb_u8(0x00, 0x00, 0xcc),
            stroke_width: 2.0,
            corner_radius: 10.0,
            label_color: Color::from_rgb_u8(0xff, 0xff, 0xff),
        }
    }
}

/// Visual style of directed edges.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EdgeStyle {
    /// Color used when a connection does not carry its own.
    #[serde(deserialize_with = "deserialize_color")]
    pub color: Color,
    pub stroke_width: f32,
    /// Length of the arrow terminator drawn at the target end.
    pub arrow_size: f32,
}

impl Default for EdgeStyle {
    fn default() -> Self {
        Self {
            color: Color::from_rgb_u8(0xff, 0xff, 0xff),
            stroke_width: 1.0,
            arrow_size: 8.0,
        }
    }
}

/// Key that triggers a `delete` intent for the selected cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeleteKey {
    #[default]
    Backspace,
    Delete,
}

impl DeleteKey {
    /// Key event text as Slint encodes it.
    pub fn text(self) -> SharedString {
        match self {
            Self::Backspace => Key::Backspace.into(),
            Self::Delete => Key::Delete.into(),
        }
    }

    /// Check whether a key event's text is this key.
    pub fn matches(self, text: &str) -> bool {
        self.text().as_str() == text
    }
}

/// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` into a [`Color`].
pub fn parse_hex_color(value: &str) -> Result<Color, DiagramError> {
    let invalid = || DiagramError::InvalidColor(value.to_string());
    let hex = value.trim().strip_prefix('#').ok_or_else(invalid)?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    match hex.len() {
        3 => {
            let nibble = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .map(|n| n * 17)
                    .map_err(|_| invalid())
            };
            Ok(Color::from_rgb_u8(nibble(0)?, nibble(1)?, nibble(2)?))
        }
        6 => Ok(Color::from_rgb_u8(byte(0)?, byte(2)?, byte(4)?)),
        8 => Ok(Color::from_argb_u8(byte(6)?, byte(0)?, byte(2)?, byte(4)?)),
        _ => Err(invalid()),
    }
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    parse_hex_color(&value).map_err(serde::de::Error::custom)
}
