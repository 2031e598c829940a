//! Resources and the capabilities and requirements they declare.
//!
//! A [`Resource`] is a shared handle, two handles are the same resource only if they point at the
//! same allocation. [`Capability`] values hold on to their resource while resources store only
//! the capability data, so building a graph of these never creates a reference cycle.

use std::sync::Arc;

mod version;
pub use version::Version;

mod version_range;
pub use version_range::VersionRange;

mod attribute;
pub use attribute::AttributeValue;

pub mod namespace;

mod capability;
pub use capability::Capability;
pub use capability::Attributes;
pub use capability::Directives;
use capability::CapabilityData;

mod requirement;
pub use requirement::Requirement;
pub use requirement::RequirementKey;

#[derive(Debug)]
struct ResourceData {
	capabilities: Vec<Arc<CapabilityData>>,
	requirements: Vec<Requirement>,
}

/// A versioned, identified unit bundling declared capabilities and requirements.
#[derive(Clone)]
pub struct Resource(Arc<ResourceData>);

impl Resource {
	/// Declared capabilities, all of them when `namespace` is `None`.
	pub fn capabilities(&self, namespace: Option<&str>) -> Vec<Capability> {
		self.0.capabilities.iter()
			.filter(|c| namespace.map_or(true, |ns| c.namespace == ns))
			.map(|c| Capability::from_parts(c.clone(), self.clone()))
			.collect()
	}

	/// Declared requirements, all of them when `namespace` is `None`.
	pub fn requirements(&self, namespace: Option<&str>) -> Vec<Requirement> {
		self.0.requirements.iter()
			.filter(|r| namespace.map_or(true, |ns| r.namespace() == ns))
			.cloned()
			.collect()
	}

	pub fn capability_count(&self) -> usize {
		self.0.capabilities.len()
	}

	/// The identity name, only when the resource has exactly one identity capability carrying a string name.
	pub fn identity(&self) -> Option<String> {
		let mut ids = self.0.capabilities.iter().filter(|c| c.namespace == namespace::IDENTITY_NAMESPACE);
		match (ids.next(), ids.next()) {
			(Some(id), None) => id.attributes.get(namespace::IDENTITY_NAMESPACE).and_then(AttributeValue::as_str).map(str::to_string),
			_ => None,
		}
	}

	/// Version of the first identity capability, the empty version when there is none.
	pub fn identity_version(&self) -> Version {
		self.capabilities(Some(namespace::IDENTITY_NAMESPACE)).first()
			.map(|c| c.version_attribute(namespace::VERSION_ATTRIBUTE))
			.unwrap_or_default()
	}
}

impl PartialEq for Resource {
	fn eq(&self, other: &Self) -> bool {
		Arc::ptr_eq(&self.0, &other.0)
	}
}

impl Eq for Resource {}

impl std::hash::Hash for Resource {
	fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
		std::ptr::hash(Arc::as_ptr(&self.0), state);
	}
}

impl std::fmt::Debug for Resource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.identity() {
			Some(id) => write!(f, "Resource({} {})", id, self.identity_version()),
			None => write!(f, "Resource(<no identity>, {} capabilities)", self.capability_count()),
		}
	}
}

/// Builds a single capability or requirement.
#[derive(Debug, Clone)]
pub struct CapReqBuilder {
	namespace: String,
	attributes: Attributes,
	directives: Directives,
}

impl CapReqBuilder {
	pub fn new(namespace: impl Into<String>) -> Self {
		CapReqBuilder { namespace: namespace.into(), attributes: Default::default(), directives: Default::default() }
	}

	pub fn add_attribute(mut self, key: impl Into<String>, value: impl Into<AttributeValue>) -> Self {
		self.attributes.insert(key.into(), value.into());
		self
	}

	pub fn add_directive(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.directives.insert(key.into(), value.into());
		self
	}

	pub fn add_attributes(mut self, attributes: Attributes) -> Self {
		self.attributes.extend(attributes);
		self
	}

	pub fn add_directives(mut self, directives: Directives) -> Self {
		self.directives.extend(directives);
		self
	}

	/// Builds a capability owned by `resource` without declaring it on the resource.
	///
	/// Used for capabilities a resource provides implicitly, such as those of a running framework.
	pub fn build_capability(self, resource: &Resource) -> Capability {
		Capability::from_parts(Arc::new(self.into_data()), resource.clone())
	}

	pub fn build_requirement(self) -> Requirement {
		Requirement::new(self.namespace, self.attributes, self.directives)
	}

	fn into_data(self) -> CapabilityData {
		CapabilityData { namespace: self.namespace, attributes: self.attributes, directives: self.directives }
	}
}

/// Collects declared capabilities and requirements into a [`Resource`].
#[derive(Debug, Default)]
pub struct ResourceBuilder {
	capabilities: Vec<CapReqBuilder>,
	requirements: Vec<Requirement>,
}

impl ResourceBuilder {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn add_capability(mut self, capability: CapReqBuilder) -> Self {
		self.capabilities.push(capability);
		self
	}

	pub fn add_requirement(mut self, requirement: Requirement) -> Self {
		self.requirements.push(requirement);
		self
	}

	/// Shorthand for the identity capability of a bundle.
	pub fn identity(self, name: &str, version: Version) -> Self {
		self.add_capability(CapReqBuilder::new(namespace::IDENTITY_NAMESPACE)
			.add_attribute(namespace::IDENTITY_NAMESPACE, name)
			.add_attribute(namespace::VERSION_ATTRIBUTE, version)
			.add_attribute("type", "osgi.bundle"))
	}

	pub fn build(self) -> Resource {
		Resource(Arc::new(ResourceData {
			capabilities: self.capabilities.into_iter().map(|c| Arc::new(c.into_data())).collect(),
			requirements: self.requirements,
		}))
	}
}
