//! Links to style documents uploaded for a record.

use std::fmt;
use std::str::FromStr;

use ows_common::{LinkSchema, OwsError, OwsResult, Record, ServiceLink};
use serde::{Deserialize, Serialize};

/// Style document formats the catalogue accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StyleFormat {
    /// OGC Styled Layer Descriptor
    Sld,
    /// QGIS style
    Qml,
    /// ArcGIS layer file
    Lyr,
}

impl StyleFormat {
    /// Protocol recorded in the link schema.
    pub fn protocol(&self) -> &'static str {
        match self {
            StyleFormat::Sld => "application/sld",
            StyleFormat::Qml => "application/qml",
            StyleFormat::Lyr => "application/lyr",
        }
    }
}

impl FromStr for StyleFormat {
    type Err = OwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "SLD" => Ok(StyleFormat::Sld),
            "QML" => Ok(StyleFormat::Qml),
            "LYR" => Ok(StyleFormat::Lyr),
            _ => Err(OwsError::UnsupportedStyleFormat(s.to_string())),
        }
    }
}

impl fmt::Display for StyleFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleFormat::Sld => "SLD",
            StyleFormat::Qml => "QML",
            StyleFormat::Lyr => "LYR",
        };
        f.write_str(name)
    }
}

/// A style uploaded for a record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    pub name: String,
    pub format: StyleFormat,
    #[serde(default)]
    pub default: bool,
    /// Path of the uploaded document below the media root
    pub content: String,
}

impl Style {
    /// Public URL of the style document.
    pub fn media_url(&self, media_root_url: &str) -> String {
        format!(
            "{}/{}",
            media_root_url.trim_end_matches('/'),
            self.content.trim_start_matches('/')
        )
    }

    /// Link stored on the record for this style.
    pub fn link(&self, media_root_url: &str) -> ServiceLink {
        let url = self.media_url(media_root_url);
        let schema = LinkSchema {
            protocol: self.format.protocol().to_string(),
            name: Some(self.name.clone()),
            default: Some(self.default),
            linkage: Some(url.clone()),
            ..Default::default()
        };
        ServiceLink::new(schema, url)
    }

    /// Record this style as the record's default for its format.
    ///
    /// Non-default styles leave the record untouched.
    pub fn apply_default(&self, record: &mut Record) {
        if !self.default {
            return;
        }
        let slot = match self.format {
            StyleFormat::Sld => &mut record.sld,
            StyleFormat::Qml => &mut record.qml,
            StyleFormat::Lyr => &mut record.lyr,
        };
        *slot = Some(self.name.clone());
    }
}

/// Reject more than one default style per format.
pub fn validate_default_styles(identifier: &str, styles: &[Style]) -> OwsResult<()> {
    for format in [StyleFormat::Sld, StyleFormat::Qml, StyleFormat::Lyr] {
        let defaults = styles
            .iter()
            .filter(|style| style.default && style.format == format)
            .count();
        if defaults > 1 {
            return Err(OwsError::DuplicateDefaultStyle {
                identifier: identifier.to_string(),
                format: format.to_string(),
            });
        }
    }
    Ok(())
}
