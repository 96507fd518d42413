//! Snapshot types and JSON ingestion

use crate::error::{PhishError, Result};
use serde::{Deserialize, Deserializer, Serialize};

/// Immutable capture of a page at one point in time.
///
/// Unknown keys in the payload are ignored; missing keys degrade to neutral
/// defaults so a sparse collector still produces a usable snapshot.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct PageSnapshot {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub hostname: String,
    #[serde(default)]
    pub pathname: String,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub dom: DomSignals,
    /// Total navigations observed by the collector while loading the page.
    #[serde(default, deserialize_with = "lenient_count")]
    pub nb_redirection: u32,
    /// Navigations that crossed to a different host.
    #[serde(default, deserialize_with = "lenient_count")]
    pub nb_external_redirection: u32,
}

/// Read-only view of the rendered DOM.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DomSignals {
    #[serde(default)]
    pub forms: Vec<FormSignal>,
    #[serde(default)]
    pub iframes: Vec<IframeSignal>,
    /// Inline script text blobs.
    #[serde(default)]
    pub scripts: Vec<String>,
    /// `<link rel="stylesheet">` href values, possibly relative.
    #[serde(default)]
    pub stylesheets: Vec<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body_text: String,
    #[serde(default)]
    pub body_html: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FormSignal {
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub inputs: Vec<InputSignal>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputSignal {
    #[serde(rename = "type", default = "default_input_type")]
    pub kind: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub placeholder: String,
    #[serde(default)]
    pub id: String,
}

fn default_input_type() -> String {
    "text".to_string()
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IframeSignal {
    #[serde(default)]
    pub width: String,
    #[serde(default)]
    pub height: String,
    #[serde(default)]
    pub frameborder: String,
    #[serde(default)]
    pub border: String,
    #[serde(default)]
    pub style: String,
}

/// Accepts numbers, booleans and numeric strings for counter fields.
/// Anything else degrades to 0 rather than failing the whole snapshot.
fn lenient_count<'de, D>(deserializer: D) -> std::result::Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0).max(0.0) as u32,
        serde_json::Value::Bool(b) => b as u32,
        serde_json::Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0).max(0.0) as u32,
        _ => 0,
    })
}

impl PageSnapshot {
    /// Parse a collector payload.
    ///
    /// Returns an error only for unparseable JSON; the caller drops the
    /// analysis request in that case. Partial payloads always succeed.
    pub fn from_json(payload: &str) -> Result<Self> {
        let mut snapshot: PageSnapshot = serde_json::from_str(payload)
            .map_err(|e| PhishError::Snapshot(e.to_string()))?;
        snapshot.normalize();
        Ok(snapshot)
    }

    /// Strip one trailing slash unless it is the slash right after the
    /// scheme separator, and backfill hostname/pathname from the raw URL
    /// when the collector did not supply them.
    fn normalize(&mut self) {
        if self.url.ends_with('/') {
            if let Some(idx) = self.url.rfind('/') {
                if idx > 8 {
                    self.url.truncate(idx);
                }
            }
        }

        if self.hostname.is_empty() || self.pathname.is_empty() {
            if let Ok(parsed) = url::Url::parse(&self.url) {
                if self.hostname.is_empty() {
                    self.hostname = parsed.host_str().unwrap_or("").to_string();
                }
                if self.pathname.is_empty() {
                    self.pathname = parsed.path().to_string();
                }
                if self.query.is_empty() {
                    if let Some(q) = parsed.query() {
                        self.query = format!("?{}", q);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_keys_ignored() {
        let snapshot = PageSnapshot::from_json(
            r#"{"url": "http://example.com/a", "hostname": "example.com", "future_field": 42}"#,
        )
        .unwrap();
        assert_eq!(snapshot.hostname, "example.com");
    }

    #[test]
    fn test_missing_keys_default() {
        let snapshot = PageSnapshot::from_json("{}").unwrap();
        assert_eq!(snapshot.url, "");
        assert!(snapshot.dom.forms.is_empty());
        assert_eq!(snapshot.nb_redirection, 0);
    }

    #[test]
    fn test_malformed_payload_is_error() {
        assert!(PageSnapshot::from_json("not json").is_err());
    }

    #[test]
    fn test_trailing_slash_stripped() {
        let snapshot =
            PageSnapshot::from_json(r#"{"url": "http://example.com/page/"}"#).unwrap();
        assert_eq!(snapshot.url, "http://example.com/page");
    }

    #[test]
    fn test_scheme_adjacent_slash_kept() {
        // A slash close enough to the scheme separator stays; only path
        // slashes further in are stripped.
        let snapshot = PageSnapshot::from_json(r#"{"url": "http://a/"}"#).unwrap();
        assert_eq!(snapshot.url, "http://a/");

        let snapshot = PageSnapshot::from_json(r#"{"url": "http://a.b/"}"#).unwrap();
        assert_eq!(snapshot.url, "http://a.b");
    }

    #[test]
    fn test_lenient_counters() {
        let snapshot = PageSnapshot::from_json(
            r#"{"url": "http://example.com", "nb_redirection": "3", "nb_external_redirection": true}"#,
        )
        .unwrap();
        assert_eq!(snapshot.nb_redirection, 3);
        assert_eq!(snapshot.nb_external_redirection, 1);

        let snapshot = PageSnapshot::from_json(
            r#"{"url": "http://example.com", "nb_redirection": "junk"}"#,
        )
        .unwrap();
        assert_eq!(snapshot.nb_redirection, 0);
    }

    #[test]
    fn test_hostname_backfill() {
        let snapshot = PageSnapshot::from_json(
            r#"{"url": "http://sub.example.com/login?id=1"}"#,
        )
        .unwrap();
        assert_eq!(snapshot.hostname, "sub.example.com");
        assert_eq!(snapshot.pathname, "/login");
        assert_eq!(snapshot.query, "?id=1");
    }
}
