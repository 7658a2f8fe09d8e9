use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Role;

/// Value the backend uses when it could not determine the brand's web domain.
pub const NO_BRAND_DOMAIN: &str = "NA";

/// Descriptive record generated by the backend for a processed item.
///
/// Every field is optional on the wire. Missing keys, `null`s and values of
/// an unexpected shape deserialize to the closest sensible value: scalars
/// become text, a lone string becomes a one-item list, anything else is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_price", skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(deserialize_with = "lenient_text")]
    pub size: String,
    #[serde(deserialize_with = "lenient_list")]
    pub categories: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub colors: Vec<String>,
    #[serde(deserialize_with = "lenient_list")]
    pub materials: Vec<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub brand: String,
    #[serde(deserialize_with = "lenient_text")]
    pub brand_domain: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
}

impl Metadata {
    /// Brand domain to link to, if the backend found one.
    pub fn brand_link_domain(&self) -> Option<&str> {
        let domain = self.brand_domain.trim();
        if domain.is_empty() || domain == NO_BRAND_DOMAIN {
            None
        } else {
            Some(domain)
        }
    }
}

/// Asking price as sent by the backend.
///
/// The generator is asked for a number but may answer with text such as `"NA"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(f64),
    Text(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(value) if value.fract() == 0.0 && value.abs() < 1e15 => {
                write!(f, "{:.0}", value)
            }
            Price::Amount(value) => write!(f, "{}", value),
            Price::Text(text) => f.write_str(text),
        }
    }
}

/// Payload returned by `POST /process`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProcessResponse {
    #[serde(default, deserialize_with = "lenient_text")]
    pub primary: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub secondary: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub label: String,
    #[serde(default)]
    pub metadata: Option<Metadata>,
}

impl ProcessResponse {
    /// Processed image reference for a role.
    pub fn image(&self, role: Role) -> &str {
        match role {
            Role::Primary => &self.primary,
            Role::Secondary => &self.secondary,
            Role::Label => &self.label,
        }
    }
}

fn scalar_text(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(scalar_text(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(values) => values.into_iter().filter_map(scalar_text).collect(),
        Value::String(text) if text.trim().is_empty() => Vec::new(),
        other => scalar_text(other).into_iter().collect(),
    };
    Ok(items)
}

fn lenient_price<'de, D>(deserializer: D) -> Result<Option<Price>, D::Error>
where
    D: Deserializer<'de>,
{
    let price = match Value::deserialize(deserializer)? {
        Value::Number(number) => number.as_f64().map(Price::Amount),
        Value::String(text) => Some(Price::Text(text)),
        _ => None,
    };
    Ok(price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_and_null_fields_default_to_empty() {
        let meta: Metadata = serde_json::from_value(json!({
            "title": "Denim jacket",
            "colors": null,
            "brand": null
        }))
        .expect("parse metadata");

        assert_eq!(meta.title, "Denim jacket");
        assert!(meta.colors.is_empty());
        assert!(meta.categories.is_empty());
        assert_eq!(meta.brand, "");
        assert!(meta.price.is_none());
    }

    #[test]
    fn price_accepts_numbers_and_text() {
        let meta: Metadata = serde_json::from_value(json!({ "price": 15 })).unwrap();
        assert_eq!(meta.price, Some(Price::Amount(15.0)));
        assert_eq!(meta.price.unwrap().to_string(), "15");

        let meta: Metadata = serde_json::from_value(json!({ "price": 12.5 })).unwrap();
        assert_eq!(meta.price.unwrap().to_string(), "12.5");

        let meta: Metadata = serde_json::from_value(json!({ "price": "NA" })).unwrap();
        assert_eq!(meta.price.unwrap().to_string(), "NA");
    }

    #[test]
    fn mistyped_fields_are_coerced_instead_of_failing() {
        let resp: ProcessResponse = serde_json::from_value(json!({
            "primary": "/a.png",
            "secondary": "/b.png",
            "label": "/c.png",
            "metadata": {
                "title": "Leather boots",
                "size": 42,
                "colors": "blue",
                "materials": ["leather", 3, null, {"kind": "rubber"}],
                "categories": {"unexpected": true},
                "brand": false,
                "price": ["12"]
            }
        }))
        .expect("lenient parse");

        let meta = resp.metadata.expect("metadata");
        assert_eq!(meta.size, "42");
        assert_eq!(meta.colors, vec!["blue".to_string()]);
        assert_eq!(meta.materials, vec!["leather".to_string(), "3".to_string()]);
        assert!(meta.categories.is_empty());
        assert_eq!(meta.brand, "false");
        assert!(meta.price.is_none());
    }

    #[test]
    fn brand_link_domain_skips_sentinel_and_blank() {
        let mut meta = Metadata {
            brand_domain: "NA".into(),
            ..Default::default()
        };
        assert_eq!(meta.brand_link_domain(), None);

        meta.brand_domain = "  ".into();
        assert_eq!(meta.brand_link_domain(), None);

        meta.brand_domain = "www.levi.com".into();
        assert_eq!(meta.brand_link_domain(), Some("www.levi.com"));
    }

    #[test]
    fn response_images_are_keyed_by_role() {
        let resp: ProcessResponse = serde_json::from_value(json!({
            "label": "/c.png",
            "primary": "/a.png",
            "secondary": "/b.png"
        }))
        .unwrap();

        assert_eq!(resp.image(Role::Primary), "/a.png");
        assert_eq!(resp.image(Role::Secondary), "/b.png");
        assert_eq!(resp.image(Role::Label), "/c.png");
        assert!(resp.metadata.is_none());
    }
}
