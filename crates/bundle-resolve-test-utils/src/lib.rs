//! Various helper functions for testing
//!
//! Builders here produce resources shaped like the ones real repositories hand out, the
//! repositories record how they are queried.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bundle_resolve::repository::*;
use bundle_resolve::resource::*;

/// Installs a logger printing to the test output, safe to call from every test.
pub fn init_logging() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// A bundle with an identity and a bundle capability.
pub fn bundle(name: &str, version: Version) -> ResourceBuilder {
	ResourceBuilder::new()
		.identity(name, version.clone())
		.add_capability(CapReqBuilder::new(namespace::BUNDLE_NAMESPACE)
			.add_attribute(namespace::BUNDLE_NAMESPACE, name)
			.add_attribute(namespace::BUNDLE_VERSION_ATTRIBUTE, version))
}

/// A framework implementation, identified by the framework contract capability.
pub fn framework(name: &str, version: Version) -> ResourceBuilder {
	bundle(name, version)
		.add_capability(CapReqBuilder::new(namespace::CONTRACT_NAMESPACE)
			.add_attribute(namespace::CONTRACT_NAMESPACE, namespace::CONTRACT_OSGI_FRAMEWORK))
}

/// An exported package capability owned by bundle `bsn`.
pub fn package(name: &str, version: Version, bsn: &str, bundle_version: Version) -> CapReqBuilder {
	CapReqBuilder::new(namespace::PACKAGE_NAMESPACE)
		.add_attribute(namespace::PACKAGE_NAMESPACE, name)
		.add_attribute(namespace::VERSION_ATTRIBUTE, version)
		.add_attribute(namespace::BUNDLE_SYMBOLIC_NAME_ATTRIBUTE, bsn)
		.add_attribute(namespace::BUNDLE_VERSION_ATTRIBUTE, bundle_version)
}

pub fn requirement(namespace: &str, filter: &str) -> Requirement {
	CapReqBuilder::new(namespace).add_directive(namespace::FILTER_DIRECTIVE, filter).build_requirement()
}

pub fn optional_requirement(namespace: &str, filter: &str) -> Requirement {
	CapReqBuilder::new(namespace)
		.add_directive(namespace::FILTER_DIRECTIVE, filter)
		.add_directive(namespace::RESOLUTION_DIRECTIVE, namespace::RESOLUTION_OPTIONAL)
		.build_requirement()
}

/// Wraps a repository and counts the requirements it is asked about.
pub struct CountingRepository {
	inner: MemoryRepository,
	queries: AtomicUsize,
}

impl CountingRepository {
	pub fn new(name: &str, resources: impl IntoIterator<Item = Resource>) -> Self {
		CountingRepository { inner: MemoryRepository::new(name, resources), queries: AtomicUsize::new(0) }
	}

	pub fn queries(&self) -> usize {
		self.queries.load(Ordering::SeqCst)
	}
}

impl Repository for CountingRepository {
	fn find_providers(&self, requirements: &[Requirement]) -> HashMap<Requirement, Vec<Capability>> {
		self.queries.fetch_add(requirements.len(), Ordering::SeqCst);
		self.inner.find_providers(requirements)
	}

	fn name(&self) -> String {
		self.inner.name()
	}
}

/// A registry over in-memory repositories named `repo0`, `repo1`...
pub fn registry(repositories: Vec<Vec<Resource>>) -> Arc<PluginRegistry> {
	let mut registry = PluginRegistry::new();
	for (i, resources) in repositories.into_iter().enumerate() {
		registry = registry.add_repository(Arc::new(MemoryRepository::new(format!("repo{}", i), resources)));
	}
	Arc::new(registry)
}

/// Writes an index file into `dir` and returns its path.
pub fn write_index(dir: &std::path::Path, file_name: &str, index: &serde_json::Value) -> std::io::Result<std::path::PathBuf> {
	let path = dir.join(file_name);
	std::fs::write(&path, serde_json::to_vec_pretty(index)?)?;
	Ok(path)
}

/// Index file JSON for a single bundle with an identity and one exported package.
pub fn bundle_index_json(name: &str, version: &str, package: &str) -> serde_json::Value {
	serde_json::json!({
		"resources": [{
			"capabilities": [
				{
					"namespace": namespace::IDENTITY_NAMESPACE,
					"attributes": {
						(namespace::IDENTITY_NAMESPACE): name,
						(namespace::VERSION_ATTRIBUTE): {"type": "Version", "value": version},
						"type": "osgi.bundle"
					}
				},
				{
					"namespace": namespace::PACKAGE_NAMESPACE,
					"attributes": {
						(namespace::PACKAGE_NAMESPACE): package,
						(namespace::VERSION_ATTRIBUTE): {"type": "Version", "value": version}
					}
				}
			]
		}]
	})
}

/// A temporary directory removed when dropped.
pub fn temp_dir() -> std::io::Result<tempfile::TempDir> {
	tempfile::Builder::new().prefix("bundle-resolve").tempdir()
}
