//! Feeds and attributes.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Whether a feed only reports values or can also be actuated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeedType {
    #[serde(rename = "IN")]
    In,
    #[serde(rename = "IN_OUT")]
    InOut,
}

impl FeedType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::In => "IN",
            Self::InOut => "IN_OUT",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "IN" => Some(Self::In),
            "IN_OUT" => Some(Self::InOut),
            _ => None,
        }
    }
}

impl std::fmt::Display for FeedType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Data type of an attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DataType {
    String,
    Numeric,
    Boolean,
    Enum,
    Location,
    Vector,
    Hexadecimal,
    Date,
}

impl DataType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "STRING",
            Self::Numeric => "NUMERIC",
            Self::Boolean => "BOOLEAN",
            Self::Enum => "ENUM",
            Self::Location => "LOCATION",
            Self::Vector => "VECTOR",
            Self::Hexadecimal => "HEXADECIMAL",
            Self::Date => "DATE",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "STRING" => Some(Self::String),
            "NUMERIC" => Some(Self::Numeric),
            "BOOLEAN" => Some(Self::Boolean),
            "ENUM" => Some(Self::Enum),
            "LOCATION" => Some(Self::Location),
            "VECTOR" => Some(Self::Vector),
            "HEXADECIMAL" => Some(Self::Hexadecimal),
            "DATE" => Some(Self::Date),
            _ => None,
        }
    }
}

impl std::fmt::Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named, typed data channel of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FeedFields")]
pub struct Feed {
    /// Display name, never empty.
    name: String,
    /// Short identifier used in feed values, never empty.
    reference: String,
    feed_type: FeedType,
    /// Unit GUID or symbol.
    unit: String,
}

#[derive(Deserialize)]
struct FeedFields {
    name: String,
    reference: String,
    feed_type: FeedType,
    unit: String,
}

impl TryFrom<FeedFields> for Feed {
    type Error = Error;

    fn try_from(fields: FeedFields) -> Result<Self> {
        Self::new(fields.name, fields.reference, fields.feed_type, fields.unit)
    }
}

impl Feed {
    /// Create a feed. Name and reference must not be empty.
    pub fn new(
        name: impl Into<String>,
        reference: impl Into<String>,
        feed_type: FeedType,
        unit: impl Into<String>,
    ) -> Result<Self> {
        let name = name.into();
        let reference = reference.into();
        if name.is_empty() {
            return Err(Error::EmptyField("feed name"));
        }
        if reference.is_empty() {
            return Err(Error::EmptyField("feed reference"));
        }

        Ok(Self {
            name,
            reference,
            feed_type,
            unit: unit.into(),
        })
    }

    /// Create a feed from wire tokens, rejecting an unknown feed type.
    pub fn from_tokens(name: &str, reference: &str, feed_type: &str, unit: &str) -> Result<Self> {
        let feed_type = FeedType::from_token(feed_type)
            .ok_or_else(|| Error::invalid_token("feed type", feed_type))?;
        Self::new(name, reference, feed_type, unit)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    pub fn feed_type(&self) -> FeedType {
        self.feed_type
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }
}

/// A static property of a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttributeFields")]
pub struct Attribute {
    /// Attribute name, never empty.
    name: String,
    data_type: DataType,
    value: String,
}

#[derive(Deserialize)]
struct AttributeFields {
    name: String,
    data_type: DataType,
    value: String,
}

impl TryFrom<AttributeFields> for Attribute {
    type Error = Error;

    fn try_from(fields: AttributeFields) -> Result<Self> {
        Self::new(fields.name, fields.data_type, fields.value)
    }
}

impl Attribute {
    /// Create an attribute. The name must not be empty.
    pub fn new(name: impl Into<String>, data_type: DataType, value: impl Into<String>) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyField("attribute name"));
        }

        Ok(Self {
            name,
            data_type,
            value: value.into(),
        })
    }

    /// Create an attribute from wire tokens, rejecting an unknown data type.
    pub fn from_tokens(name: &str, data_type: &str, value: &str) -> Result<Self> {
        let data_type = DataType::from_token(data_type)
            .ok_or_else(|| Error::invalid_token("data type", data_type))?;
        Self::new(name, data_type, value)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_requires_name_and_reference() {
        assert!(Feed::new("Temperature", "T", FeedType::In, "CELSIUS").is_ok());
        assert_eq!(
            Feed::new("", "T", FeedType::In, "CELSIUS"),
            Err(Error::EmptyField("feed name"))
        );
        assert_eq!(
            Feed::new("Temperature", "", FeedType::In, "CELSIUS"),
            Err(Error::EmptyField("feed reference"))
        );
    }

    #[test]
    fn test_feed_from_tokens() {
        let feed = Feed::from_tokens("Switch", "SW", "IN_OUT", "BOOLEAN_ON_OFF").unwrap();
        assert_eq!(feed.feed_type(), FeedType::InOut);

        let err = Feed::from_tokens("Switch", "SW", "OUT", "BOOLEAN_ON_OFF").unwrap_err();
        assert!(err.to_string().contains("feed type"));
    }

    #[test]
    fn test_attribute_from_tokens() {
        let attribute = Attribute::from_tokens("Firmware", "STRING", "1.0.0").unwrap();
        assert_eq!(attribute.data_type(), DataType::String);
        assert!(Attribute::from_tokens("Firmware", "TEXT", "1.0.0").is_err());
        assert!(Attribute::new("", DataType::String, "x").is_err());
    }

    #[test]
    fn test_deserialize_enforces_names() {
        let feed: Feed = serde_json::from_str(
            r#"{"name":"Temperature","reference":"T","feed_type":"IN","unit":"CELSIUS"}"#,
        )
        .unwrap();
        assert_eq!(feed.reference(), "T");

        let err = serde_json::from_str::<Feed>(
            r#"{"name":"","reference":"T","feed_type":"IN","unit":"CELSIUS"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("feed name"));
        assert!(serde_json::from_str::<Feed>(
            r#"{"name":"Temperature","reference":"","feed_type":"IN","unit":"CELSIUS"}"#
        )
        .is_err());

        let attribute: Attribute =
            serde_json::from_str(r#"{"name":"Firmware","data_type":"STRING","value":"1.0"}"#).unwrap();
        assert_eq!(attribute.name(), "Firmware");
        let err = serde_json::from_str::<Attribute>(r#"{"name":"","data_type":"STRING","value":"1.0"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("attribute name"));
    }
}
