// SPDX-FileCopyrightText: 2025 Caspar Water Company
//
// SPDX-License-Identifier: Apache-2.0

//! Link entries in the aggregate reference lists.
//!
//! In the data files a link is either a bare string, shown as-is, or a
//! single-key mapping from display text to URL:
//!
//! ```yaml
//! Slides and Notes:
//!   - https://example.edu/notes.pdf
//!   - Lecture slides: https://example.edu/slides.pdf
//! ```
//!
//! The single-key rule is checked when the data is loaded, so a [`Link`]
//! in memory is always well formed.

use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Link {
    /// Rendered verbatim.
    Plain(String),
    /// Rendered as `<a href="url">text</a>`.
    Anchor { text: String, url: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Links must be either strings or objects")]
    NotStringOrObject,

    #[error("Link objects must have a single key")]
    NotSingleKey,

    #[error("Link target for \"{0}\" must be a string")]
    TargetNotString(String),
}

impl Link {
    /// Markup inserted into the page. Neither form is escaped.
    #[must_use]
    pub fn to_markup(&self) -> String {
        match self {
            Link::Plain(text) => text.clone(),
            Link::Anchor { text, url } => format!("<a href=\"{url}\">{text}</a>"),
        }
    }
}

impl TryFrom<&Value> for Link {
    type Error = LinkError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::String(text) => Ok(Link::Plain(text.clone())),
            Value::Object(map) => {
                let mut entries = map.iter();
                match (entries.next(), entries.next()) {
                    (Some((text, Value::String(url))), None) => Ok(Link::Anchor {
                        text: text.clone(),
                        url: url.clone(),
                    }),
                    (Some((text, _)), None) => Err(LinkError::TargetNotString(text.clone())),
                    _ => Err(LinkError::NotSingleKey),
                }
            }
            _ => Err(LinkError::NotStringOrObject),
        }
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Link::Plain(text) => serializer.serialize_str(text),
            Link::Anchor { text, url } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(text, url)?;
                map.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Link::try_from(&value).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn bare_string_is_plain() {
        let link = Link::try_from(&json!("http://x")).unwrap();
        assert_eq!(link, Link::Plain("http://x".to_string()));
        assert_eq!(link.to_markup(), "http://x");
    }

    #[test]
    fn single_key_object_is_anchor() {
        let link = Link::try_from(&json!({"Click": "http://x"})).unwrap();
        assert_eq!(link.to_markup(), "<a href=\"http://x\">Click</a>");
    }

    #[test]
    fn shape_violations() {
        assert_eq!(
            Link::try_from(&json!(42)),
            Err(LinkError::NotStringOrObject)
        );
        assert_eq!(Link::try_from(&json!(null)), Err(LinkError::NotStringOrObject));
        assert_eq!(Link::try_from(&json!({})), Err(LinkError::NotSingleKey));
        assert_eq!(
            Link::try_from(&json!({"a": "http://a", "b": "http://b"})),
            Err(LinkError::NotSingleKey)
        );
        assert_eq!(
            Link::try_from(&json!({"a": 3})),
            Err(LinkError::TargetNotString("a".to_string()))
        );
    }

    #[test]
    fn yaml_rejects_multi_key_links_at_load() {
        let yaml = "- one: http://one\n  two: http://two\n";
        let err = serde_yaml_ng::from_str::<Vec<Link>>(yaml).unwrap_err();
        assert!(err.to_string().contains("single key"), "{err}");
    }

    #[test]
    fn serializes_back_to_source_shape() {
        let links: Vec<Link> =
            serde_yaml_ng::from_str("- plain\n- Text: http://t\n").unwrap();
        assert_eq!(
            serde_json::to_value(&links).unwrap(),
            json!(["plain", {"Text": "http://t"}])
        );
    }
}
