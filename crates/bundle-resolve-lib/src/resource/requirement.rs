use std::sync::Arc;

use super::*;

/// Structural identity of a requirement.
///
/// Two requirements with the same namespace, directives and attributes have equal keys regardless
/// of how they were built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequirementKey {
	namespace: String,
	directives: Vec<(String, String)>,
	/// Values are prefixed with their type so `"1"` and `1` do not collide.
	attributes: Vec<(String, String)>,
}

#[derive(Debug)]
struct RequirementData {
	namespace: String,
	attributes: Attributes,
	directives: Directives,
	key: RequirementKey,
}

/// A named, filtered need declared by a resource or by the resolve itself.
#[derive(Clone)]
pub struct Requirement(Arc<RequirementData>);

impl Requirement {
	pub fn new(namespace: impl Into<String>, attributes: Attributes, directives: Directives) -> Self {
		let namespace = namespace.into();
		let key = RequirementKey {
			namespace: namespace.clone(),
			/* BTreeMap iteration is already sorted */
			directives: directives.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
			attributes: attributes.iter().map(|(k, v)| (k.clone(), format!("{}:{}", v.type_name(), v))).collect(),
		};
		Requirement(Arc::new(RequirementData { namespace, attributes, directives, key }))
	}

	pub fn namespace(&self) -> &str {
		&self.0.namespace
	}

	pub fn attributes(&self) -> &Attributes {
		&self.0.attributes
	}

	pub fn directives(&self) -> &Directives {
		&self.0.directives
	}

	pub fn directive(&self, key: &str) -> Option<&str> {
		self.0.directives.get(key).map(String::as_str)
	}

	pub fn filter(&self) -> Option<&str> {
		self.directive(namespace::FILTER_DIRECTIVE)
	}

	pub fn is_optional(&self) -> bool {
		self.directive(namespace::RESOLUTION_DIRECTIVE) == Some(namespace::RESOLUTION_OPTIONAL)
	}

	pub fn key(&self) -> &RequirementKey {
		&self.0.key
	}
}

impl PartialEq for Requirement {
	fn eq(&self, other: &Self) -> bool {
		self.0.key == other.0.key
	}
}

impl Eq for Requirement {}

impl std::hash::Hash for Requirement {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		self.0.key.hash(state);
	}
}

impl std::fmt::Debug for Requirement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self)
	}
}

impl std::fmt::Display for Requirement {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0.namespace)?;
		for (k, v) in &self.0.attributes {
			write!(f, ";{}={}", k, v)?;
		}
		for (k, v) in &self.0.directives {
			write!(f, ";{}:='{}'", k, v)?;
		}
		Ok(())
	}
}
