//! LDAP style filters as used in requirement `filter` directives.
//!
//! ```text
//! (&(osgi.wiring.package=org.example)(version>=1.0)(!(version>=2.0)))
//! ```
//!
//! Attribute names are matched without regard to case. Values are compared according to the type
//! of the attribute they are matched against, so `(version>=1.10)` compares versions and not strings.

use crate::resource::{AttributeValue, Attributes, Version};

mod parser;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid filter `{filter}` at position {position}: {message}")]
pub struct FilterError {
	pub filter: String,
	pub position: usize,
	pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
	And(Vec<Filter>),
	Or(Vec<Filter>),
	Not(Box<Filter>),
	Equal(String, String),
	Approx(String, String),
	GreaterEq(String, String),
	LessEq(String, String),
	Present(String),
	/// `parts` alternates around `*`, the first and last entries may be empty.
	Substring(String, Vec<String>),
}

/// Something filters can be matched against.
pub trait Properties {
	fn property(&self, key: &str) -> Option<&AttributeValue>;
}

impl Properties for Attributes {
	fn property(&self, key: &str) -> Option<&AttributeValue> {
		self.get(key).or_else(|| {
			self.iter().find(|(k, _)| k.eq_ignore_ascii_case(key)).map(|(_, v)| v)
		})
	}
}

impl Filter {
	pub fn parse(filter: &str) -> Result<Filter, FilterError> {
		parser::Parser::new(filter).parse()
	}

	/// Filter matching `attribute` equal to `value`, the value is escaped when rendered.
	pub fn equal(attribute: &str, value: &str) -> Filter {
		Filter::Equal(attribute.to_string(), value.to_string())
	}

	pub fn matches(&self, properties: &impl Properties) -> bool {
		match self {
			Filter::And(children) => children.iter().all(|c| c.matches(properties)),
			Filter::Or(children) => children.iter().any(|c| c.matches(properties)),
			Filter::Not(child) => !child.matches(properties),
			Filter::Present(attr) => properties.property(attr).is_some(),
			Filter::Equal(attr, value) => compare(properties.property(attr), value, Operation::Equal),
			Filter::Approx(attr, value) => compare(properties.property(attr), value, Operation::Approx),
			Filter::GreaterEq(attr, value) => compare(properties.property(attr), value, Operation::GreaterEq),
			Filter::LessEq(attr, value) => compare(properties.property(attr), value, Operation::LessEq),
			Filter::Substring(attr, parts) => match properties.property(attr) {
				Some(AttributeValue::String(s)) => substring_matches(s, parts),
				Some(AttributeValue::List(l)) => l.iter().any(|v| matches!(v, AttributeValue::String(s) if substring_matches(s, parts))),
				_ => false,
			},
		}
	}
}

#[derive(Debug, Clone, Copy)]
enum Operation {
	Equal,
	Approx,
	GreaterEq,
	LessEq,
}

fn compare(value: Option<&AttributeValue>, operand: &str, op: Operation) -> bool {
	fn ordered<T: PartialOrd>(lhs: T, rhs: T, op: Operation) -> bool {
		match op {
			Operation::Equal | Operation::Approx => lhs == rhs,
			Operation::GreaterEq => lhs >= rhs,
			Operation::LessEq => lhs <= rhs,
		}
	}

	match value {
		None => false,
		Some(AttributeValue::String(s)) => match op {
			Operation::Approx => normalize(s) == normalize(operand),
			_ => ordered(s.as_str(), operand, op),
		},
		Some(AttributeValue::Long(l)) => operand.trim().parse::<i64>().map_or(false, |rhs| ordered(*l, rhs, op)),
		Some(AttributeValue::Double(d)) => operand.trim().parse::<f64>().map_or(false, |rhs| ordered(*d, rhs, op)),
		Some(AttributeValue::Version(v)) => Version::parse(operand).map_or(false, |rhs| ordered(v, &rhs, op)),
		Some(AttributeValue::List(l)) => l.iter().any(|v| compare(Some(v), operand, op)),
	}
}

fn normalize(s: &str) -> String {
	s.chars().filter(|c| !c.is_whitespace()).flat_map(char::to_lowercase).collect()
}

fn substring_matches(s: &str, parts: &[String]) -> bool {
	let (first, rest) = match parts.split_first() {
		Some(p) => p,
		None => return true,
	};
	let (last, middle) = match rest.split_last() {
		Some(p) => p,
		None => return s == first,
	};

	if !s.starts_with(first.as_str()) {
		return false
	}
	let mut remaining = &s[first.len()..];
	for part in middle {
		match remaining.find(part.as_str()) {
			Some(i) => remaining = &remaining[i + part.len()..],
			None => return false,
		}
	}
	remaining.ends_with(last.as_str())
}

/// Escapes a value for embedding in a filter string.
pub fn escape(value: &str) -> String {
	let mut out = String::with_capacity(value.len());
	for c in value.chars() {
		if matches!(c, '(' | ')' | '*' | '\\') {
			out.push('\\');
		}
		out.push(c);
	}
	out
}

impl std::fmt::Display for Filter {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Filter::And(children) | Filter::Or(children) => {
				write!(f, "({}", if matches!(self, Filter::And(_)) { '&' } else { '|' })?;
				for c in children {
					write!(f, "{}", c)?;
				}
				write!(f, ")")
			},
			Filter::Not(child) => write!(f, "(!{})", child),
			Filter::Equal(a, v) => write!(f, "({}={})", a, escape(v)),
			Filter::Approx(a, v) => write!(f, "({}~={})", a, escape(v)),
			Filter::GreaterEq(a, v) => write!(f, "({}>={})", a, escape(v)),
			Filter::LessEq(a, v) => write!(f, "({}<={})", a, escape(v)),
			Filter::Present(a) => write!(f, "({}=*)", a),
			Filter::Substring(a, parts) => {
				let parts = parts.iter().map(|p| escape(p)).collect::<Vec<_>>();
				write!(f, "({}={})", a, parts.join("*"))
			},
		}
	}
}
