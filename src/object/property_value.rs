//! Literal property values
//!
//! A [`PropertyValue`] is the object of a literal statement. Values convert to
//! and from RDF literals without loss: a literal becomes a native variant only
//! when its lexical form is the canonical one for that variant, anything else
//! is kept as [`PropertyValue::Typed`].

use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::error::{ObjectError, ObjectResult};
use crate::rdf::vocab::{rdf, xsd};
use crate::rdf::{Literal, NamedNode, RdfResult};

/// Literal value of a property
///
/// Supports:
/// - String (xsd:string)
/// - Language tagged string (rdf:langString)
/// - Integer (xsd:integer, i64)
/// - Decimal (xsd:decimal, f64)
/// - Boolean (xsd:boolean)
/// - Any other datatype, kept as lexical form + datatype IRI
#[derive(Debug, Clone, PartialEq, PartialOrd, Serialize, Deserialize)]
pub enum PropertyValue {
    String(String),
    LangString { value: String, lang: String },
    Integer(i64),
    Decimal(f64),
    Boolean(bool),
    Typed { value: String, datatype: String },
}

impl PropertyValue {
    /// Language tagged string
    pub fn lang_string(value: impl Into<String>, lang: impl Into<String>) -> Self {
        PropertyValue::LangString {
            value: value.into(),
            lang: lang.into(),
        }
    }

    /// Literal with an arbitrary datatype
    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        PropertyValue::Typed {
            value: value.into(),
            datatype: datatype.into(),
        }
    }

    /// Convert an RDF literal
    pub fn from_literal(literal: &Literal) -> Self {
        let value = literal.value();
        if let Some(lang) = literal.language() {
            return PropertyValue::lang_string(value, lang);
        }

        let datatype = literal.datatype();
        let native = match datatype.as_str() {
            xsd::STRING => Some(PropertyValue::String(value.to_string())),
            xsd::INTEGER => value
                .parse::<i64>()
                .ok()
                .filter(|i| i.to_string() == value)
                .map(PropertyValue::Integer),
            xsd::DECIMAL => value
                .parse::<f64>()
                .ok()
                .filter(|d| format_decimal(*d) == value)
                .map(PropertyValue::Decimal),
            xsd::BOOLEAN => match value {
                "true" => Some(PropertyValue::Boolean(true)),
                "false" => Some(PropertyValue::Boolean(false)),
                _ => None,
            },
            _ => None,
        };

        native.unwrap_or_else(|| PropertyValue::typed(value, datatype.as_str()))
    }

    /// Convert to an RDF literal
    pub fn to_literal(&self) -> RdfResult<Literal> {
        match self {
            PropertyValue::String(s) => Ok(Literal::new_simple_literal(s.as_str())),
            PropertyValue::LangString { value, lang } => {
                Literal::new_language_tagged_literal(value.as_str(), lang.as_str())
            }
            PropertyValue::Typed { value, datatype } => Ok(Literal::new_typed_literal(
                value.as_str(),
                NamedNode::new(datatype)?,
            )),
            _ => Ok(Literal::new_typed_literal(self.lexical(), NamedNode::new(self.datatype())?)),
        }
    }

    /// Lexical form
    pub fn lexical(&self) -> String {
        match self {
            PropertyValue::String(s) => s.clone(),
            PropertyValue::LangString { value, .. } => value.clone(),
            PropertyValue::Integer(i) => i.to_string(),
            PropertyValue::Decimal(d) => format_decimal(*d),
            PropertyValue::Boolean(b) => b.to_string(),
            PropertyValue::Typed { value, .. } => value.clone(),
        }
    }

    /// Datatype IRI
    pub fn datatype(&self) -> &str {
        match self {
            PropertyValue::String(_) => xsd::STRING,
            PropertyValue::LangString { .. } => rdf::LANG_STRING,
            PropertyValue::Integer(_) => xsd::INTEGER,
            PropertyValue::Decimal(_) => xsd::DECIMAL,
            PropertyValue::Boolean(_) => xsd::BOOLEAN,
            PropertyValue::Typed { datatype, .. } => datatype,
        }
    }

    /// Language tag, for language tagged strings
    pub fn lang(&self) -> Option<&str> {
        match self {
            PropertyValue::LangString { lang, .. } => Some(lang),
            _ => None,
        }
    }

    /// Get string value if this is a plain or language tagged string
    pub fn as_string(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            PropertyValue::LangString { value, .. } => Some(value),
            _ => None,
        }
    }

    /// Get integer value if this is an integer
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            PropertyValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get decimal value if this is a decimal
    pub fn as_decimal(&self) -> Option<f64> {
        match self {
            PropertyValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Get boolean value if this is a boolean
    pub fn as_boolean(&self) -> Option<bool> {
        match self {
            PropertyValue::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Get datetime value for xsd:dateTime literals (RFC 3339 lexical form)
    pub fn as_datetime(&self) -> Option<DateTime<FixedOffset>> {
        match self {
            PropertyValue::Typed { value, datatype } if datatype == xsd::DATE_TIME => {
                DateTime::parse_from_rfc3339(value).ok()
            }
            _ => None,
        }
    }

    /// Read the value as an integer, parsing the lexical form if needed
    pub fn to_integer(&self) -> ObjectResult<i64> {
        match self {
            PropertyValue::Integer(i) => Ok(*i),
            PropertyValue::Decimal(_) | PropertyValue::Boolean(_) => Err(self.conversion_error("integer")),
            _ => self
                .lexical()
                .trim()
                .parse::<i64>()
                .map_err(|_| self.conversion_error("integer")),
        }
    }

    /// Read the value as a decimal, parsing the lexical form if needed
    pub fn to_decimal(&self) -> ObjectResult<f64> {
        match self {
            PropertyValue::Decimal(d) => Ok(*d),
            PropertyValue::Integer(i) => Ok(*i as f64),
            PropertyValue::Boolean(_) => Err(self.conversion_error("decimal")),
            _ => self
                .lexical()
                .trim()
                .parse::<f64>()
                .map_err(|_| self.conversion_error("decimal")),
        }
    }

    /// Read the value as a boolean ("true"/"false"/"1"/"0")
    pub fn to_boolean(&self) -> ObjectResult<bool> {
        match self {
            PropertyValue::Boolean(b) => Ok(*b),
            PropertyValue::Integer(0) => Ok(false),
            PropertyValue::Integer(1) => Ok(true),
            _ => match self.lexical().trim() {
                "true" | "1" => Ok(true),
                "false" | "0" => Ok(false),
                _ => Err(self.conversion_error("boolean")),
            },
        }
    }

    /// Get type name as string
    pub fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::String(_) => "String",
            PropertyValue::LangString { .. } => "LangString",
            PropertyValue::Integer(_) => "Integer",
            PropertyValue::Decimal(_) => "Decimal",
            PropertyValue::Boolean(_) => "Boolean",
            PropertyValue::Typed { .. } => "Typed",
        }
    }

    fn conversion_error(&self, target: &str) -> ObjectError {
        ObjectError::DataConversion(format!(
            "cannot read {} value \"{}\" as {}",
            self.type_name(),
            self.lexical(),
            target
        ))
    }
}

/// Canonical xsd:decimal lexical form: whole numbers keep one fractional digit
fn format_decimal(d: f64) -> String {
    if d.is_finite() && d.fract() == 0.0 {
        format!("{:.1}", d)
    } else {
        format!("{}", d)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<i32> for PropertyValue {
    fn from(i: i32) -> Self {
        PropertyValue::Integer(i as i64)
    }
}

impl From<f64> for PropertyValue {
    fn from(d: f64) -> Self {
        PropertyValue::Decimal(d)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Boolean(b)
    }
}

impl From<DateTime<FixedOffset>> for PropertyValue {
    fn from(dt: DateTime<FixedOffset>) -> Self {
        PropertyValue::typed(dt.to_rfc3339(), xsd::DATE_TIME)
    }
}

impl From<DateTime<Utc>> for PropertyValue {
    fn from(dt: DateTime<Utc>) -> Self {
        PropertyValue::typed(dt.to_rfc3339(), xsd::DATE_TIME)
    }
}
