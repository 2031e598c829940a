//! In-memory lookup of capabilities by namespace.

use std::collections::HashMap;

use crate::filter::Filter;
use crate::resource::*;

/// Multimap from namespace to capabilities.
///
/// Capabilities are kept in the order they were added and are never removed or de-duplicated.
#[derive(Debug, Default)]
pub struct CapabilityIndex {
	capabilities: HashMap<String, Vec<Capability>>,
}

impl CapabilityIndex {
	pub fn new() -> Self {
		Default::default()
	}

	/// Indexes every capability `resource` declares.
	pub fn add_resource(&mut self, resource: &Resource) {
		for capability in resource.capabilities(None) {
			self.add_capability(capability);
		}
	}

	pub fn add_capability(&mut self, capability: Capability) {
		self.capabilities.entry(capability.namespace().to_string()).or_default().push(capability);
	}

	/// Appends the capabilities matching `requirement` to `out` in insertion order.
	///
	/// A requirement without a filter matches its whole namespace. An unparseable filter matches nothing.
	pub fn append_matching_capabilities(&self, requirement: &Requirement, out: &mut Vec<Capability>) {
		let candidates = match self.capabilities.get(requirement.namespace()) {
			Some(c) => c,
			None => return,
		};

		let filter = match requirement.filter().map(Filter::parse).transpose() {
			Ok(f) => f,
			Err(e) => {
				log::error!("Ignoring requirement `{}` with invalid filter: {}", requirement, e);
				return
			},
		};

		out.extend(candidates.iter()
			.filter(|c| filter.as_ref().map_or(true, |f| f.matches(c.attributes())))
			.cloned());
	}

	pub fn len(&self) -> usize {
		self.capabilities.values().map(Vec::len).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

#[cfg(test)]
mod test {
	use super::*;

	fn package(name: &str, version: Version) -> CapReqBuilder {
		CapReqBuilder::new(namespace::PACKAGE_NAMESPACE)
			.add_attribute(namespace::PACKAGE_NAMESPACE, name)
			.add_attribute(namespace::VERSION_ATTRIBUTE, version)
	}

	fn package_requirement(filter: &str) -> Requirement {
		CapReqBuilder::new(namespace::PACKAGE_NAMESPACE).add_directive(namespace::FILTER_DIRECTIVE, filter).build_requirement()
	}

	fn index() -> (CapabilityIndex, Resource) {
		let r = ResourceBuilder::new()
			.identity("a", Version::new(1, 0, 0))
			.add_capability(package("org.a", Version::new(1, 0, 0)))
			.add_capability(package("org.b", Version::new(2, 0, 0)))
			.build();
		let mut index = CapabilityIndex::new();
		index.add_resource(&r);
		(index, r)
	}

	#[test]
	fn index_matches_by_filter() {
		let (index, _) = index();
		let mut out = Vec::new();
		index.append_matching_capabilities(&package_requirement("(osgi.wiring.package=org.b)"), &mut out);
		assert_eq!(out.len(), 1);
		assert_eq!(out[0].version_attribute(namespace::VERSION_ATTRIBUTE), Version::new(2, 0, 0));
	}

	#[test]
	fn index_without_filter_returns_namespace_in_order() {
		let (index, _) = index();
		let mut out = Vec::new();
		index.append_matching_capabilities(&CapReqBuilder::new(namespace::PACKAGE_NAMESPACE).build_requirement(), &mut out);
		let names: Vec<_> = out.iter().map(|c| c.attribute(namespace::PACKAGE_NAMESPACE).unwrap().to_string()).collect();
		assert_eq!(names, ["org.a", "org.b"]);
	}

	#[test]
	fn index_appends_to_existing_output() {
		let (index, r) = index();
		let mut out = r.capabilities(Some(namespace::IDENTITY_NAMESPACE));
		index.append_matching_capabilities(&package_requirement("(osgi.wiring.package=org.a)"), &mut out);
		assert_eq!(out.len(), 2);
		assert_eq!(out[0].namespace(), namespace::IDENTITY_NAMESPACE);
	}

	#[test]
	fn index_keeps_duplicates() {
		let (mut index, r) = index();
		index.add_resource(&r);
		assert_eq!(index.len(), 6);
	}

	#[test]
	fn index_unknown_namespace_or_bad_filter_matches_nothing() {
		let (index, _) = index();
		let mut out = Vec::new();
		index.append_matching_capabilities(&CapReqBuilder::new("other").build_requirement(), &mut out);
		index.append_matching_capabilities(&package_requirement("(osgi.wiring.package=org.a"), &mut out);
		assert!(out.is_empty());
	}
}
