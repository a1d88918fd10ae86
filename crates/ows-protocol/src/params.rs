//! Generated request parameters and their merge with an endpoint's own query.

use crate::endpoint::Endpoint;

/// A generated `name=value` request parameter.
///
/// `aliases` are other spellings that set the same thing (`SRS`/`CRS`,
/// `TYPENAME`/`TYPENAMES`); if the endpoint already sets the name or any
/// alias, the parameter is not emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestParam {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub value: String,
}

impl RequestParam {
    /// True when the endpoint already sets this parameter under any spelling.
    pub fn is_set_by(&self, endpoint: &Endpoint) -> bool {
        endpoint.has(self.name) || self.aliases.iter().any(|alias| endpoint.has(alias))
    }
}

/// Ordered list of generated parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    params: Vec<RequestParam>,
}

impl RequestParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: &'static str, value: impl ToString) -> &mut Self {
        self.push_aliased(name, &[], value)
    }

    pub fn push_aliased(
        &mut self,
        name: &'static str,
        aliases: &'static [&'static str],
        value: impl ToString,
    ) -> &mut Self {
        self.params.push(RequestParam {
            name,
            aliases,
            value: value.to_string(),
        });
        self
    }

    /// Value of a generated parameter, by exact name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|param| param.name == name)
            .map(|param| param.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &RequestParam> {
        self.params.iter()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// `&`-joined query of the parameters `endpoint` does not already set.
    ///
    /// Values are emitted verbatim; OWS servers expect `:` and `,` unescaped.
    pub fn query_for(&self, endpoint: &Endpoint) -> String {
        self.params
            .iter()
            .filter(|param| !param.is_set_by(endpoint))
            .map(|param| format!("{}={}", param.name, param.value))
            .collect::<Vec<_>>()
            .join("&")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RequestParams {
        let mut params = RequestParams::new();
        params
            .push("SERVICE", "WMS")
            .push("REQUEST", "GetMap")
            .push_aliased("SRS", &["CRS"], "EPSG:4326")
            .push("BBOX", "1,2,3,4");
        params
    }

    #[test]
    fn test_query_for_plain_endpoint() {
        let endpoint = Endpoint::parse("http://example.com/wms");
        assert_eq!(
            sample().query_for(&endpoint),
            "SERVICE=WMS&REQUEST=GetMap&SRS=EPSG:4326&BBOX=1,2,3,4"
        );
    }

    #[test]
    fn test_alias_suppresses_param() {
        let endpoint = Endpoint::parse("http://example.com/wms?crs=EPSG:3857&bbox=0,0,1,1");
        assert_eq!(sample().query_for(&endpoint), "SERVICE=WMS&REQUEST=GetMap");
    }

    #[test]
    fn test_get() {
        let params = sample();
        assert_eq!(params.get("SRS"), Some("EPSG:4326"));
        assert_eq!(params.get("CRS"), None);
        assert_eq!(params.len(), 4);
    }
}
