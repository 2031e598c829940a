//! Sources of candidate capabilities.
//!
//! The resolve only ever talks to a [`Repository`], so backends are free to keep their resources
//! wherever they like. Three are provided:
//! - [`MemoryRepository`], a fixed set of resources held in memory.
//! - [`FrameworkResourceRepository`], the implicit capabilities of the selected framework.
//! - [`FixedIndexedRepository`], resources read from index files at fixed locations.

use std::collections::HashMap;
use std::sync::Arc;

use crate::capability_index::CapabilityIndex;
use crate::resource::*;

mod framework_repository;
pub use framework_repository::FrameworkResourceRepository;

mod fixed_index;
pub use fixed_index::FixedIndexedRepository;
pub use fixed_index::IndexFile;

/// A source of capabilities.
pub trait Repository: Send + Sync {
	/// Finds the capabilities matching each requirement.
	///
	/// Every requirement passed in has an entry in the result, possibly empty.
	fn find_providers(&self, requirements: &[Requirement]) -> HashMap<Requirement, Vec<Capability>>;

	/// Name used to select and order repositories in a run configuration.
	fn name(&self) -> String;
}

/// Lists the repositories available to a resolve.
pub trait Registry: Send + Sync {
	fn repositories(&self) -> Vec<Arc<dyn Repository>>;
}

/// A [`Registry`] over a plain list of repositories, in registration order.
#[derive(Default, Clone)]
pub struct PluginRegistry {
	repositories: Vec<Arc<dyn Repository>>,
}

impl PluginRegistry {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn add_repository(mut self, repository: Arc<dyn Repository>) -> Self {
		self.repositories.push(repository);
		self
	}
}

impl Registry for PluginRegistry {
	fn repositories(&self) -> Vec<Arc<dyn Repository>> {
		self.repositories.clone()
	}
}

impl std::fmt::Debug for PluginRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.repositories.iter().map(|r| r.name())).finish()
	}
}

/// Answers queries from an index of the capabilities of a fixed set of resources.
#[derive(Debug)]
pub struct MemoryRepository {
	name: String,
	resources: Vec<Resource>,
	index: CapabilityIndex,
}

impl MemoryRepository {
	pub fn new(name: impl Into<String>, resources: impl IntoIterator<Item = Resource>) -> Self {
		let resources: Vec<Resource> = resources.into_iter().collect();
		let mut index = CapabilityIndex::new();
		for r in &resources {
			index.add_resource(r);
		}
		MemoryRepository { name: name.into(), resources, index }
	}

	pub fn resources(&self) -> &[Resource] {
		&self.resources
	}
}

impl Repository for MemoryRepository {
	fn find_providers(&self, requirements: &[Requirement]) -> HashMap<Requirement, Vec<Capability>> {
		find_in_index(&self.index, requirements)
	}

	fn name(&self) -> String {
		self.name.clone()
	}
}

pub(crate) fn find_in_index(index: &CapabilityIndex, requirements: &[Requirement]) -> HashMap<Requirement, Vec<Capability>> {
	let mut result = HashMap::with_capacity(requirements.len());
	for requirement in requirements {
		let mut matches = Vec::new();
		index.append_matching_capabilities(requirement, &mut matches);
		result.insert(requirement.clone(), matches);
	}
	result
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn memory_repository_answers_every_requirement() {
		let r = ResourceBuilder::new().identity("a", Version::new(1, 0, 0)).build();
		let repo = MemoryRepository::new("mem", [r.clone()]);
		let found = CapReqBuilder::new(namespace::IDENTITY_NAMESPACE).add_directive(namespace::FILTER_DIRECTIVE, "(osgi.identity=a)").build_requirement();
		let missing = CapReqBuilder::new(namespace::IDENTITY_NAMESPACE).add_directive(namespace::FILTER_DIRECTIVE, "(osgi.identity=b)").build_requirement();

		let providers = repo.find_providers(&[found.clone(), missing.clone()]);
		assert_eq!(providers.len(), 2);
		assert_eq!(providers[&found].len(), 1);
		assert_eq!(providers[&found][0].resource(), &r);
		assert!(providers[&missing].is_empty());
	}

	#[test]
	fn plugin_registry_keeps_registration_order() {
		let registry = PluginRegistry::new()
			.add_repository(Arc::new(MemoryRepository::new("one", [])))
			.add_repository(Arc::new(MemoryRepository::new("two", [])));
		let names: Vec<_> = registry.repositories().iter().map(|r| r.name()).collect();
		assert_eq!(names, ["one", "two"]);
	}
}
