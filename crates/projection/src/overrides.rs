//! Static table of CRS definitions that take precedence over the EPSG database.
//!
//! The table is a flat text file in the proj `epsg` init format:
//!
//! ```text
//! # GDA94 / MGA zone 50
//! <28350> +proj=utm +zone=50 +south +ellps=GRS80 +units=m +no_defs <>
//! ```
//!
//! `EPSG:<code> <definition>` lines are accepted as well.

use std::collections::HashMap;
use std::path::Path;

use ows_common::CrsCode;
use tracing::{info, warn};

use crate::ProjectionError;

/// Override table shipped with the crate.
const BUNDLED: &str = include_str!("../data/crs_overrides.txt");

/// CRS code → proj4 definition string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrsOverrides {
    definitions: HashMap<u32, String>,
}

impl CrsOverrides {
    /// An empty table; every CRS resolves through the EPSG database.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The table bundled with this crate.
    pub fn bundled() -> Self {
        Self::parse(BUNDLED)
    }

    /// Parse table text. Lines that are not definitions are skipped with a warning.
    pub fn parse(text: &str) -> Self {
        let mut definitions = HashMap::new();

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            match parse_line(line) {
                Some((code, definition)) => {
                    definitions.insert(code, definition);
                }
                None => {
                    warn!(line = index + 1, content = %line, "Skipping unparseable CRS override")
                }
            }
        }

        Self { definitions }
    }

    /// Load the table from a file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ProjectionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ProjectionError::OverridesLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        let table = Self::parse(&text);
        info!(path = %path.display(), count = table.len(), "Loaded CRS overrides");
        Ok(table)
    }

    /// Load the table from a file, falling back to an empty table if it cannot be read.
    pub fn load_or_empty<P: AsRef<Path>>(path: P) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            warn!(error = %e, "Using empty CRS override table");
            Self::empty()
        })
    }

    /// Definition for `crs`, if the table overrides it.
    pub fn get(&self, crs: CrsCode) -> Option<&str> {
        self.definitions.get(&crs.code()).map(String::as_str)
    }

    pub fn insert(&mut self, crs: CrsCode, definition: impl Into<String>) {
        self.definitions.insert(crs.code(), definition.into());
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

fn parse_line(line: &str) -> Option<(u32, String)> {
    let (key, rest) = line.split_once(char::is_whitespace)?;

    let code = match key.strip_prefix('<').and_then(|k| k.strip_suffix('>')) {
        Some(code) => code.parse().ok()?,
        None => CrsCode::from_wms_string(key).ok()?.code(),
    };

    let definition = rest.trim();
    let definition = definition.strip_suffix("<>").unwrap_or(definition).trim();
    if !definition.starts_with("+proj=") && !definition.starts_with("+init=") {
        return None;
    }

    Some((code, definition.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_epsg_file_line() {
        let table = CrsOverrides::parse("<28350> +proj=utm +zone=50 +south +units=m <>");
        assert_eq!(
            table.get(CrsCode::new(28350)),
            Some("+proj=utm +zone=50 +south +units=m")
        );
    }

    #[test]
    fn test_parse_prefixed_line() {
        let table = CrsOverrides::parse("epsg:4283 +proj=longlat +ellps=GRS80");
        assert_eq!(
            table.get(CrsCode::EPSG_4283),
            Some("+proj=longlat +ellps=GRS80")
        );
    }

    #[test]
    fn test_parse_skips_junk() {
        let table = CrsOverrides::parse("# header\n\nnot a line\n<abc> +proj=longlat <>\n<1> nope <>");
        assert!(table.is_empty());
    }

    #[test]
    fn test_bundled_table() {
        let table = CrsOverrides::bundled();
        assert!(table.get(CrsCode::EPSG_4283).is_some());
        assert!(table.get(CrsCode::new(28350)).is_some());
        assert!(table.get(CrsCode::EPSG_4326).is_none());
    }

    #[test]
    fn test_load_missing_file_falls_back_to_empty() {
        let table = CrsOverrides::load_or_empty("/nonexistent/crs_overrides.txt");
        assert!(table.is_empty());
        assert!(matches!(
            CrsOverrides::load("/nonexistent/crs_overrides.txt"),
            Err(ProjectionError::OverridesLoad { .. })
        ));
    }
}
