//! Front matter metadata decoding and `<head>` generation

use crate::domain::xml::escape_attr;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use regex::Regex;
use serde_yaml::Value;
use std::sync::OnceLock;
use thiserror::Error;

/// YAML 1.1 timestamp: date, optionally followed by time and zone
fn timestamp_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(
            r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:(?:[Tt]|[ \t]+)(\d{1,2}):(\d{2}):(\d{2})(?:\.(\d*))?(?:[ \t]*(Z|([-+])(\d{1,2})(?::?(\d{2}))?))?)?$",
        )
        .unwrap()
    })
}

/// Parse a YAML timestamp into a UTC instant.
///
/// Date-only values are midnight UTC, as are times without a zone.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let caps = timestamp_regex().captures(text.trim())?;
    let field = |i: usize| -> Option<u32> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    let year: i32 = caps[1].parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, field(2)?, field(3)?)?;

    let millis = caps.get(7).map_or(Some(0), |m| {
        m.as_str()
            .chars()
            .chain(std::iter::repeat('0'))
            .take(3)
            .collect::<String>()
            .parse()
            .ok()
    })?;
    let local = date.and_hms_milli_opt(field(4)?, field(5)?, field(6)?, millis)?;

    let offset_minutes = match caps.get(9) {
        Some(sign) => {
            let minutes = i64::from(field(10)? * 60 + field(11)?);
            if sign.as_str() == "-" {
                -minutes
            } else {
                minutes
            }
        }
        None => 0,
    };

    let utc = local - chrono::Duration::minutes(offset_minutes);
    Some(Utc.from_utc_datetime(&utc))
}

/// A decoded front matter value
#[derive(Debug, Clone, PartialEq)]
pub enum MetaValue {
    Null,
    Bool(bool),
    Number(String),
    Text(String),
    Date(DateTime<Utc>),
    List(Vec<MetaValue>),
    Map(Vec<(String, MetaValue)>),
}

impl MetaValue {
    /// Convert a YAML value, recognizing timestamps in strings.
    ///
    /// `serde_yaml` reports plain and quoted scalars alike, so a quoted
    /// `'2025-06-28'` is read as a date too.
    pub fn from_yaml(value: &Value) -> Self {
        match value {
            Value::Null => MetaValue::Null,
            Value::Bool(b) => MetaValue::Bool(*b),
            Value::Number(n) => MetaValue::Number(n.to_string()),
            Value::String(s) => match parse_timestamp(s) {
                Some(date) => MetaValue::Date(date),
                None => MetaValue::Text(s.clone()),
            },
            Value::Sequence(items) => MetaValue::List(items.iter().map(Self::from_yaml).collect()),
            Value::Mapping(map) => MetaValue::Map(
                map.iter()
                    .map(|(k, v)| (key_text(k), Self::from_yaml(v)))
                    .collect(),
            ),
            Value::Tagged(tagged) => Self::from_yaml(&tagged.value),
        }
    }

    /// Text form used in `content` attributes
    pub fn render(&self) -> String {
        match self {
            MetaValue::Null => "null".to_string(),
            MetaValue::Bool(b) => b.to_string(),
            MetaValue::Number(n) | MetaValue::Text(n) => n.clone(),
            MetaValue::Date(date) => date.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            MetaValue::List(items) => items
                .iter()
                .map(MetaValue::render)
                .collect::<Vec<_>>()
                .join(","),
            MetaValue::Map(entries) => entries
                .iter()
                .map(|(k, v)| format!("{}: {}", k, v.render()))
                .collect::<Vec<_>>()
                .join(", "),
        }
    }
}

/// Mapping keys are used as written; only non-string keys are rendered
fn key_text(key: &Value) -> String {
    match key {
        Value::String(s) => s.clone(),
        other => MetaValue::from_yaml(other).render(),
    }
}

/// Front matter that could not be decoded; conversion continues without it
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid YAML: {0}")]
pub struct MetadataDecodeFailure(pub String);

/// Outcome of decoding front matter: always a mapping, maybe a diagnostic
#[derive(Debug, Clone, Default)]
pub struct Decoded {
    pub metadata: Metadata,
    pub failure: Option<MetadataDecodeFailure>,
}

/// Ordered document metadata
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
    entries: Vec<(String, MetaValue)>,
}

impl Metadata {
    /// Decode a front matter block.
    ///
    /// Never fails: a missing block, an empty block or YAML `null` give an
    /// empty mapping, and broken YAML gives an empty mapping together with a
    /// [`MetadataDecodeFailure`].
    ///
    /// # Examples
    ///
    /// ```
    /// use stdmark::domain::document::Metadata;
    ///
    /// let decoded = Metadata::decode(Some("title: Test\ndate: 2025-06-28"));
    /// assert!(decoded.failure.is_none());
    /// assert_eq!(
    ///     decoded.metadata.to_head_xml(),
    ///     "<head>\n<title>Test</title>\n<meta name=\"date\" content=\"2025-06-28T00:00:00.000Z\"/>\n</head>"
    /// );
    ///
    /// let broken = Metadata::decode(Some("title: [unclosed"));
    /// assert!(broken.failure.is_some());
    /// assert!(broken.metadata.is_empty());
    /// ```
    pub fn decode(header: Option<&str>) -> Decoded {
        let Some(header) = header.filter(|h| !h.trim().is_empty()) else {
            return Decoded::default();
        };

        let failure = |message: String| Decoded {
            metadata: Metadata::default(),
            failure: Some(MetadataDecodeFailure(message)),
        };

        match serde_yaml::from_str::<Value>(header) {
            Ok(Value::Null) => Decoded::default(),
            Ok(Value::Mapping(map)) => Decoded {
                metadata: Metadata {
                    entries: map
                        .iter()
                        .map(|(k, v)| (key_text(k), MetaValue::from_yaml(v)))
                        .collect(),
                },
                failure: None,
            },
            Ok(_) => failure("front matter is not a key/value mapping".to_string()),
            Err(e) => failure(e.to_string()),
        }
    }

    pub fn get(&self, key: &str) -> Option<&MetaValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MetaValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The document title; empty when absent or null
    pub fn title(&self) -> String {
        match self.get("title") {
            None | Some(MetaValue::Null) => String::new(),
            Some(value) => value.render(),
        }
    }

    /// Render `<head>` with the title and one `<meta>` per other key
    pub fn to_head_xml(&self) -> String {
        let metas = self
            .iter()
            .filter(|(key, _)| *key != "title")
            .map(|(key, value)| {
                format!(
                    "<meta name=\"{}\" content=\"{}\"/>",
                    escape_attr(key),
                    escape_attr(&value.render())
                )
            })
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "<head>\n<title>{}</title>\n{}\n</head>",
            escape_attr(&self.title()),
            metas
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_without_header() {
        let decoded = Metadata::decode(None);
        assert!(decoded.failure.is_none());
        assert!(decoded.metadata.is_empty());
        assert_eq!(
            decoded.metadata.to_head_xml(),
            "<head>\n<title></title>\n\n</head>"
        );
    }

    #[test]
    fn test_decode_empty_and_null_header() {
        for header in ["", "   ", "~", "null"] {
            let decoded = Metadata::decode(Some(header));
            assert!(decoded.failure.is_none(), "header {:?}", header);
            assert!(decoded.metadata.is_empty(), "header {:?}", header);
        }
    }

    #[test]
    fn test_decode_preserves_order() {
        let decoded = Metadata::decode(Some("zeta: 1\nalpha: two\ntitle: T\nmid: true"));
        let keys: Vec<&str> = decoded.metadata.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "title", "mid"]);
        assert_eq!(decoded.metadata.len(), 4);
    }

    #[test]
    fn test_decode_invalid_yaml_is_not_fatal() {
        let decoded = Metadata::decode(Some("title: \"unterminated\nkey: : :"));
        let failure = decoded.failure.expect("expected a decode failure");
        assert!(failure.to_string().starts_with("Invalid YAML: "));
        assert!(decoded.metadata.is_empty());
    }

    #[test]
    fn test_decode_non_mapping_is_failure() {
        let decoded = Metadata::decode(Some("- a\n- b"));
        assert!(decoded.failure.is_some());
        assert!(decoded.metadata.is_empty());
    }

    #[test]
    fn test_value_rendering() {
        let decoded = Metadata::decode(Some(
            "count: 3\nratio: 0.5\ndraft: false\nnothing: ~\ntags: [a, b]\nauthor: {name: Ann, id: 7}",
        ));
        let meta = decoded.metadata;
        assert_eq!(meta.get("count").map(MetaValue::render), Some("3".to_string()));
        assert_eq!(meta.get("ratio").map(MetaValue::render), Some("0.5".to_string()));
        assert_eq!(meta.get("draft").map(MetaValue::render), Some("false".to_string()));
        assert_eq!(meta.get("nothing").map(MetaValue::render), Some("null".to_string()));
        assert_eq!(meta.get("tags").map(MetaValue::render), Some("a,b".to_string()));
        assert_eq!(
            meta.get("author").map(MetaValue::render),
            Some("name: Ann, id: 7".to_string())
        );
    }

    #[test]
    fn test_dates_become_iso_text() {
        let decoded = Metadata::decode(Some(
            "date: 2025-06-28\nupdated: 2025-06-28 14:30:05.5 +02:00\nstamp: 2001-12-14t21:59:43.10-05:00",
        ));
        let meta = decoded.metadata;
        assert_eq!(
            meta.get("date").map(MetaValue::render),
            Some("2025-06-28T00:00:00.000Z".to_string())
        );
        assert_eq!(
            meta.get("updated").map(MetaValue::render),
            Some("2025-06-28T12:30:05.500Z".to_string())
        );
        assert_eq!(
            meta.get("stamp").map(MetaValue::render),
            Some("2001-12-15T02:59:43.100Z".to_string())
        );
    }

    #[test]
    fn test_quoted_timestamp_is_still_a_date() {
        let decoded = Metadata::decode(Some("date: '2025-06-28'"));
        assert_eq!(
            decoded.metadata.get("date").map(MetaValue::render),
            Some("2025-06-28T00:00:00.000Z".to_string())
        );
    }

    #[test]
    fn test_parse_timestamp_rejects_non_dates() {
        assert!(parse_timestamp("2025-02-30").is_none());
        assert!(parse_timestamp("June 28").is_none());
        assert!(parse_timestamp("2025-06-28 later").is_none());
    }

    #[test]
    fn test_head_xml_escapes_keys_and_values() {
        let decoded = Metadata::decode(Some(
            "title: \"Tom & Jerry\"\n\"a<b\": 'say \"hi\" > bye'",
        ));
        assert_eq!(
            decoded.metadata.to_head_xml(),
            "<head>\n<title>Tom &amp; Jerry</title>\n<meta name=\"a&lt;b\" content=\"say &quot;hi&quot; &gt; bye\"/>\n</head>"
        );
    }

    #[test]
    fn test_null_title_renders_empty() {
        let decoded = Metadata::decode(Some("title:\nauthor: me"));
        assert_eq!(decoded.metadata.title(), "");
        assert!(decoded
            .metadata
            .to_head_xml()
            .contains("<meta name=\"author\" content=\"me\"/>"));
    }
}
