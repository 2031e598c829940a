//! Parsing of manifest style header values.
//!
//! ```text
//! org.example.api;version=1.2, org.example.impl;resolution:=optional
//! ```
//!
//! A header is a comma separated list of clauses. Each clause has one or more names followed by
//! `key=value` attributes and `key:=value` directives. Values may be quoted with `'` or `"`.
//! Attributes may carry a type, `key:Version=1.0`, understood types are `String`, `Long`,
//! `Double`, `Version` and `List<T>` of those.

use crate::resource::{AttributeValue, Attributes, Directives, Version};

/// A single named clause of a header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clause {
	pub name: String,
	pub attributes: Attributes,
	pub directives: Directives,
}

impl Clause {
	/// Raw text of an attribute, for attributes that are always plain strings.
	pub fn attribute_str(&self, key: &str) -> Option<String> {
		self.attributes.get(key).map(|v| v.to_string())
	}
}

/// Parses a header, clauses are kept in order and duplicates are preserved.
pub fn parse(header: &str) -> crate::Result<Vec<Clause>> {
	let mut clauses = Vec::new();

	for raw_clause in split_outside_quotes(header, ',') {
		if raw_clause.trim().is_empty() {
			continue;
		}

		let mut names = Vec::<String>::new();
		let mut attributes = Attributes::new();
		let mut directives = Directives::new();

		for part in split_outside_quotes(&raw_clause, ';') {
			let part = part.trim();
			if part.is_empty() {
				continue;
			}

			match find_outside_quotes(part, '=') {
				None => {
					if !attributes.is_empty() || !directives.is_empty() {
						return Err(crate::Error::Parse(format!("name `{}` after attributes in clause `{}`", part, raw_clause.trim())))
					}
					names.push(unquote(part).to_string());
				},
				Some(i) => {
					let (key, value) = (&part[..i], &part[i + 1..]);
					let value = unquote(value.trim());
					if let Some(key) = key.strip_suffix(':') {
						directives.insert(key.trim().to_string(), value.to_string());
					} else {
						let (key, value) = typed_attribute(key.trim(), value)?;
						attributes.insert(key, value);
					}
				},
			}
		}

		if names.is_empty() {
			return Err(crate::Error::Parse(format!("clause `{}` has no name", raw_clause.trim())))
		}

		for name in names {
			clauses.push(Clause { name, attributes: attributes.clone(), directives: directives.clone() });
		}
	}

	Ok(clauses)
}

fn typed_attribute(key: &str, value: &str) -> crate::Result<(String, AttributeValue)> {
	let (key, kind) = match key.split_once(':') {
		Some((k, t)) => (k.trim(), t.trim()),
		None => return Ok((key.to_string(), AttributeValue::String(value.to_string()))),
	};

	fn scalar(kind: &str, value: &str) -> crate::Result<AttributeValue> {
		let bad = |e: &dyn std::fmt::Display| crate::Error::Parse(format!("invalid {} value `{}`: {}", kind, value, e));
		Ok(match kind {
			"String" => AttributeValue::String(value.to_string()),
			"Long" => AttributeValue::Long(value.trim().parse().map_err(|e| bad(&e))?),
			"Double" => AttributeValue::Double(value.trim().parse().map_err(|e| bad(&e))?),
			"Version" => AttributeValue::Version(Version::parse(value)?),
			_ => return Err(crate::Error::Parse(format!("unknown attribute type `{}`", kind))),
		})
	}

	let value = match kind.strip_prefix("List<").and_then(|k| k.strip_suffix('>')) {
		Some(inner) => AttributeValue::List(
			value.split(',').map(|v| scalar(inner.trim(), v.trim())).collect::<crate::Result<Vec<_>>>()?
		),
		None if kind == "List" => AttributeValue::List(value.split(',').map(|v| AttributeValue::String(v.trim().to_string())).collect()),
		None => scalar(kind, value)?,
	};
	Ok((key.to_string(), value))
}

fn unquote(s: &str) -> &str {
	let s = s.trim();
	for q in ['\'', '"'] {
		if s.len() >= 2 && s.starts_with(q) && s.ends_with(q) {
			return &s[1..s.len() - 1]
		}
	}
	s
}

fn split_outside_quotes(s: &str, separator: char) -> Vec<String> {
	let mut out = Vec::new();
	let mut current = String::new();
	let mut quote: Option<char> = None;
	for c in s.chars() {
		match (quote, c) {
			(None, '\'' | '"') => { quote = Some(c); current.push(c); },
			(Some(q), c) if c == q => { quote = None; current.push(c); },
			(None, c) if c == separator => out.push(std::mem::take(&mut current)),
			(_, c) => current.push(c),
		}
	}
	out.push(current);
	out
}

fn find_outside_quotes(s: &str, needle: char) -> Option<usize> {
	let mut quote: Option<char> = None;
	for (i, c) in s.char_indices() {
		match (quote, c) {
			(None, '\'' | '"') => quote = Some(c),
			(Some(q), c) if c == q => quote = None,
			(None, c) if c == needle => return Some(i),
			_ => {},
		}
	}
	None
}
