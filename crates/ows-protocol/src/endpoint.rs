//! Service endpoint URLs supplied by catalogue editors.
//!
//! Editors paste whatever URL they have, often with a query string already
//! attached. Parameters they set take precedence over generated ones, so the
//! query is kept as written: keys are matched case-insensitively and original
//! text is re-emitted untouched.

use url::{form_urlencoded, Url};

use crate::params::RequestParams;

/// Request parameters stripped from the endpoint recorded in a link schema.
pub const OWS_PARAMS: &[&str] = &[
    "SERVICE",
    "REQUEST",
    "VERSION",
    "LAYERS",
    "TYPENAME",
    "TYPENAMES",
    "SRS",
    "CRS",
    "SRSNAME",
    "BBOX",
    "WIDTH",
    "HEIGHT",
    "FORMAT",
    "MAXFEATURES",
    "COUNT",
    "STYLES",
];

/// One `key=value` pair of an endpoint query string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParam {
    /// Segment exactly as it appeared in the URL
    pub raw: String,
    /// Decoded key in its original casing
    pub key: String,
    /// Decoded value
    pub value: String,
}

impl QueryParam {
    fn parse(raw: &str) -> Self {
        let (key, value) = form_urlencoded::parse(raw.as_bytes())
            .next()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .unwrap_or_default();
        Self {
            raw: raw.to_string(),
            key,
            value,
        }
    }

    pub fn is(&self, name: &str) -> bool {
        self.key.eq_ignore_ascii_case(name)
    }
}

/// A parsed endpoint URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    raw: String,
    base: String,
    params: Vec<QueryParam>,
}

impl Endpoint {
    /// Split on the first `?` and parse the query string, if any.
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        let (base, query) = match raw.split_once('?') {
            Some((base, query)) => (base, query),
            None => (raw, ""),
        };

        let params = query
            .split('&')
            .filter(|segment| !segment.is_empty())
            .map(QueryParam::parse)
            .collect();

        Self {
            raw: raw.to_string(),
            base: base.to_string(),
            params,
        }
    }

    /// The endpoint as supplied.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Everything before the query string.
    pub fn base(&self) -> &str {
        &self.base
    }

    pub fn params(&self) -> &[QueryParam] {
        &self.params
    }

    /// Case-insensitive lookup of an existing parameter.
    pub fn get(&self, name: &str) -> Option<&QueryParam> {
        self.params.iter().find(|param| param.is(name))
    }

    pub fn has(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// First non-empty value among `names`, checked in order.
    pub fn first_value(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .map(|param| param.value.trim())
            .find(|value| !value.is_empty())
    }

    /// True when the endpoint is served by GeoServer, judged by its host name.
    pub fn is_geoserver(&self) -> bool {
        Url::parse(&self.raw)
            .ok()
            .and_then(|url| url.host_str().map(|host| host.to_ascii_lowercase()))
            .is_some_and(|host| host.contains("geoserver"))
    }

    /// The endpoint with OWS request parameters removed and everything else kept.
    pub fn clean_url(&self) -> String {
        let kept: Vec<&str> = self
            .params
            .iter()
            .filter(|param| !OWS_PARAMS.iter().any(|name| param.is(name)))
            .map(|param| param.raw.as_str())
            .collect();

        if kept.is_empty() {
            self.base.clone()
        } else {
            format!("{}?{}", self.base, kept.join("&"))
        }
    }

    /// Append the parameters the endpoint does not already set.
    pub fn with_params(&self, params: &RequestParams) -> String {
        let query = params.query_for(self);
        if query.is_empty() {
            return self.raw.clone();
        }

        let separator = if !self.raw.contains('?') {
            "?"
        } else if self.raw.ends_with('?') || self.raw.ends_with('&') {
            ""
        } else {
            "&"
        };
        format!("{}{}{}", self.raw, separator, query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_without_query() {
        let endpoint = Endpoint::parse("http://geoserver.example/wms");
        assert_eq!(endpoint.base(), "http://geoserver.example/wms");
        assert!(endpoint.params().is_empty());
    }

    #[test]
    fn test_case_insensitive_lookup() {
        let endpoint = Endpoint::parse("http://example.com/ows?srsName=EPSG%3A3857&map=a.map");
        let param = endpoint.get("SRSNAME").unwrap();
        assert_eq!(param.key, "srsName");
        assert_eq!(param.value, "EPSG:3857");
        assert_eq!(param.raw, "srsName=EPSG%3A3857");
        assert!(endpoint.has("MAP"));
        assert!(!endpoint.has("BBOX"));
    }

    #[test]
    fn test_first_value_order() {
        let endpoint = Endpoint::parse("http://example.com/wms?crs=EPSG:4326&srs=EPSG:3857");
        assert_eq!(endpoint.first_value(&["SRS", "CRS"]), Some("EPSG:3857"));
        assert_eq!(endpoint.first_value(&["SRSNAME"]), None);
    }

    #[test]
    fn test_empty_value_is_ignored() {
        let endpoint = Endpoint::parse("http://example.com/wms?SRS=&CRS=EPSG:3857");
        assert_eq!(endpoint.first_value(&["SRS", "CRS"]), Some("EPSG:3857"));
    }

    #[test]
    fn test_is_geoserver() {
        assert!(Endpoint::parse("https://kmi.GeoServer.example/geoserver/ows").is_geoserver());
        assert!(!Endpoint::parse("http://maps.example/geoserver/ows").is_geoserver());
        assert!(!Endpoint::parse("not a url").is_geoserver());
    }

    #[test]
    fn test_clean_url() {
        let endpoint =
            Endpoint::parse("http://example.com/wms?service=WMS&map=/srv/a.map&Layers=x&token=t");
        assert_eq!(
            endpoint.clean_url(),
            "http://example.com/wms?map=/srv/a.map&token=t"
        );
        assert_eq!(
            Endpoint::parse("http://example.com/wms?SERVICE=WMS&").clean_url(),
            "http://example.com/wms"
        );
    }
}
