//! Service links stored on catalogue records.
//!
//! A record keeps its links denormalized in one text field: each link is
//! `None\tNone\t<schema json>\t<url>` and links are joined with `^`. The
//! structured types here are only turned into that form at the persistence
//! boundary.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{OwsError, OwsResult};

/// Separator between links in a record's `links` field.
pub const LINK_SEPARATOR: char = '^';

/// Placeholder written into the two reserved leading fields.
const RESERVED_FIELD: &str = "None";

/// Machine-readable description of a link.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct LinkSchema {
    /// "OGC:WMS", "OGC:WFS" or "application/<style format>"
    pub protocol: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<bool>,

    /// Service endpoint without OWS request parameters, or the style's media URL
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub linkage: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crs: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,

    /// Fields written by other tools, carried through untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl LinkSchema {
    /// True for links to uploaded style documents (SLD, QML, LYR).
    pub fn is_style(&self) -> bool {
        self.protocol.starts_with("application/")
    }
}

/// Key under which a record keeps at most one link.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LinkKey {
    /// OWS links, one per protocol
    Service { protocol: String },
    /// Style links, one per style name and format
    Style { name: String, protocol: String },
}

/// One link of a record: its schema plus the ready-to-fetch URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceLink {
    pub schema: LinkSchema,
    pub url: String,
}

impl ServiceLink {
    pub fn new(schema: LinkSchema, url: impl Into<String>) -> Self {
        Self {
            schema,
            url: url.into(),
        }
    }

    /// Deduplication key of this link within a record.
    pub fn key(&self) -> LinkKey {
        if self.schema.is_style() {
            LinkKey::Style {
                name: self.schema.name.clone().unwrap_or_default(),
                protocol: self.schema.protocol.clone(),
            }
        } else {
            LinkKey::Service {
                protocol: self.schema.protocol.clone(),
            }
        }
    }

    /// Serialize to the tab-separated stored form.
    pub fn to_stored(&self) -> OwsResult<String> {
        let schema = serde_json::to_string(&self.schema)?;
        Ok(format!(
            "{RESERVED_FIELD}\t{RESERVED_FIELD}\t{schema}\t{}",
            self.url
        ))
    }

    /// Parse one tab-separated stored link.
    pub fn from_stored(s: &str) -> OwsResult<Self> {
        let fields: Vec<&str> = s.splitn(4, '\t').collect();
        if fields.len() != 4 {
            return Err(OwsError::MalformedLink(format!(
                "expected 4 tab-separated fields, found {}",
                fields.len()
            )));
        }
        let schema: LinkSchema = serde_json::from_str(fields[2])?;
        Ok(Self::new(schema, fields[3]))
    }
}

impl FromStr for ServiceLink {
    type Err = OwsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_stored(s)
    }
}

/// The ordered links of one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LinkList {
    links: Vec<ServiceLink>,
}

impl LinkList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a record's `links` field. Entries that do not parse are dropped with a warning.
    pub fn parse(stored: &str) -> Self {
        let links = stored
            .split(LINK_SEPARATOR)
            .filter(|entry| !entry.trim().is_empty())
            .filter_map(|entry| match ServiceLink::from_stored(entry) {
                Ok(link) => Some(link),
                Err(e) => {
                    tracing::warn!(error = %e, entry = %entry, "Skipping malformed stored link");
                    None
                }
            })
            .collect();
        Self { links }
    }

    /// Add `link`, replacing the existing link with the same key in place.
    ///
    /// Returns the replaced link, if any.
    pub fn upsert(&mut self, link: ServiceLink) -> Option<ServiceLink> {
        let key = link.key();
        match self.links.iter_mut().find(|existing| existing.key() == key) {
            Some(existing) => Some(std::mem::replace(existing, link)),
            None => {
                self.links.push(link);
                None
            }
        }
    }

    /// Remove the link stored under `key`.
    pub fn remove(&mut self, key: &LinkKey) -> Option<ServiceLink> {
        let index = self.links.iter().position(|link| &link.key() == key)?;
        Some(self.links.remove(index))
    }

    pub fn get(&self, key: &LinkKey) -> Option<&ServiceLink> {
        self.links.iter().find(|link| &link.key() == key)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServiceLink> {
        self.links.iter()
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Serialize to the `^`-joined stored form.
    pub fn to_stored(&self) -> OwsResult<String> {
        let entries = self
            .links
            .iter()
            .map(ServiceLink::to_stored)
            .collect::<OwsResult<Vec<_>>>()?;
        Ok(entries.join(&LINK_SEPARATOR.to_string()))
    }
}
