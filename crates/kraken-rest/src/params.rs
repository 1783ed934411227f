//! Request parameter assembly

use std::collections::BTreeMap;

use crate::error::{RestError, RestResult};

/// Free-form optional arguments, as accepted by most private methods
///
/// Only the keys a method understands are forwarded; see
/// [`Params::extend_from_options`].
pub type Options = BTreeMap<String, String>;

/// Ordered request parameters, encoded as the POST body
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, String)>);

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style)
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter
    pub fn push(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.push((key.into(), value.into()));
    }

    /// Append a parameter if a value is given
    pub fn push_opt<V: ToString>(&mut self, key: &str, value: Option<V>) {
        if let Some(value) = value {
            self.push(key, value.to_string());
        }
    }

    /// Set a parameter as the first entry, replacing any earlier value
    pub fn prepend(&mut self, key: &str, value: impl Into<String>) {
        self.0.retain(|(k, _)| k != key);
        self.0.insert(0, (key.to_string(), value.into()));
    }

    /// Copy the listed keys from `options`, in the order given by `keys`
    pub fn extend_from_options(&mut self, options: &Options, keys: &[&str]) {
        for key in keys {
            if let Some(value) = options.get(*key) {
                self.push(*key, value.clone());
            }
        }
    }

    /// First value for `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if there are no parameters
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// `application/x-www-form-urlencoded` body
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| RestError::InvalidParameter(e.to_string()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_preserves_order() {
        let params = Params::new()
            .with("pair", "XBTUSD")
            .with("type", "buy")
            .with("ordertype", "limit");

        assert_eq!(params.encode().unwrap(), "pair=XBTUSD&type=buy&ordertype=limit");
    }

    #[test]
    fn test_encode_escapes_values() {
        let params = Params::new()
            .with("pair", "XBTUSD,ETHUSD")
            .with("close[ordertype]", "limit")
            .with("description", "my report");

        assert_eq!(
            params.encode().unwrap(),
            "pair=XBTUSD%2CETHUSD&close%5Bordertype%5D=limit&description=my+report"
        );
    }

    #[test]
    fn test_prepend_replaces_existing() {
        let mut params = Params::new().with("asset", "ZUSD").with("nonce", "1");
        params.prepend("nonce", "42");

        assert_eq!(params.encode().unwrap(), "nonce=42&asset=ZUSD");
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_extend_from_options_filters_keys() {
        let mut options = Options::new();
        options.insert("userref".to_string(), "7".to_string());
        options.insert("trades".to_string(), "true".to_string());
        options.insert("bogus".to_string(), "x".to_string());

        let mut params = Params::new();
        params.extend_from_options(&options, &["trades", "userref", "start"]);

        assert_eq!(params.encode().unwrap(), "trades=true&userref=7");
        assert_eq!(params.get("bogus"), None);
    }

    #[test]
    fn test_push_opt() {
        let mut params = Params::new();
        params.push_opt("since", Some(1_600_000_000i64));
        params.push_opt::<u32>("count", None);

        assert_eq!(params.iter().collect::<Vec<_>>(), vec![("since", "1600000000")]);
        assert!(!params.is_empty());
    }

    #[test]
    fn test_empty_params_encode_to_empty_body() {
        assert_eq!(Params::new().encode().unwrap(), "");
    }
}
