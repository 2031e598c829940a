use serde::*;

use super::Version;

/// A typed attribute value on a capability or requirement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum AttributeValue {
	String(String),
	Long(i64),
	Double(f64),
	Version(Version),
	List(Vec<AttributeValue>),
}

impl AttributeValue {
	pub fn as_str(&self) -> Option<&str> {
		if let AttributeValue::String(s) = self { Some(s) } else { None }
	}

	/// Reads the value as a version, parsing strings when needed.
	///
	/// `None` when the value is neither a version nor a parseable string.
	pub fn as_version(&self) -> Option<Version> {
		match self {
			AttributeValue::Version(v) => Some(v.clone()),
			AttributeValue::String(s) => Version::parse(s).ok(),
			_ => None,
		}
	}

	/// Name of the variant, used when building canonical keys.
	pub fn type_name(&self) -> &'static str {
		match self {
			AttributeValue::String(_) => "String",
			AttributeValue::Long(_) => "Long",
			AttributeValue::Double(_) => "Double",
			AttributeValue::Version(_) => "Version",
			AttributeValue::List(_) => "List",
		}
	}
}

impl std::fmt::Display for AttributeValue {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			AttributeValue::String(s) => write!(f, "{}", s),
			AttributeValue::Long(l) => write!(f, "{}", l),
			AttributeValue::Double(d) => write!(f, "{}", d),
			AttributeValue::Version(v) => write!(f, "{}", v),
			AttributeValue::List(l) => {
				for (i, v) in l.iter().enumerate() {
					if i > 0 { write!(f, ",")?; }
					write!(f, "{}", v)?;
				}
				Ok(())
			},
		}
	}
}

impl From<&str> for AttributeValue {
	fn from(value: &str) -> Self { AttributeValue::String(value.to_string()) }
}

impl From<String> for AttributeValue {
	fn from(value: String) -> Self { AttributeValue::String(value) }
}

impl From<Version> for AttributeValue {
	fn from(value: Version) -> Self { AttributeValue::Version(value) }
}

impl From<i64> for AttributeValue {
	fn from(value: i64) -> Self { AttributeValue::Long(value) }
}

impl From<f64> for AttributeValue {
	fn from(value: f64) -> Self { AttributeValue::Double(value) }
}

impl From<Vec<AttributeValue>> for AttributeValue {
	fn from(value: Vec<AttributeValue>) -> Self { AttributeValue::List(value) }
}
