use std::collections::BTreeMap;
use std::sync::Arc;

use super::*;

pub type Attributes = BTreeMap<String, AttributeValue>;
pub type Directives = BTreeMap<String, String>;

#[derive(Debug)]
pub(super) struct CapabilityData {
	pub(super) namespace: String,
	pub(super) attributes: Attributes,
	pub(super) directives: Directives,
}

/// A named, attributed fact offered by a [`Resource`].
///
/// Cloning is cheap, the data and the owning resource are shared.
#[derive(Clone)]
pub struct Capability {
	data: Arc<CapabilityData>,
	resource: Resource,
}

impl Capability {
	pub(super) fn from_parts(data: Arc<CapabilityData>, resource: Resource) -> Self {
		Capability { data, resource }
	}

	pub fn namespace(&self) -> &str {
		&self.data.namespace
	}

	pub fn attributes(&self) -> &Attributes {
		&self.data.attributes
	}

	pub fn attribute(&self, key: &str) -> Option<&AttributeValue> {
		self.data.attributes.get(key)
	}

	pub fn directives(&self) -> &Directives {
		&self.data.directives
	}

	pub fn resource(&self) -> &Resource {
		&self.resource
	}

	/// Reads a version attribute, missing or unreadable values give the empty version.
	pub fn version_attribute(&self, key: &str) -> Version {
		self.attribute(key).and_then(AttributeValue::as_version).unwrap_or_default()
	}
}

impl PartialEq for Capability {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.data, &other.data) && self.resource == other.resource
	}
}

impl Eq for Capability {}

impl std::fmt::Debug for Capability {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self)
	}
}

impl std::fmt::Display for Capability {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.data.namespace)?;
		for (k, v) in &self.data.attributes {
			write!(f, ";{}={}", k, v)?;
		}
		for (k, v) in &self.data.directives {
			write!(f, ";{}:={}", k, v)?;
		}
		Ok(())
	}
}
