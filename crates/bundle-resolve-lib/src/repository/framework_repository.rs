use std::collections::HashMap;

use crate::capability_index::CapabilityIndex;
use crate::config::ExportedPackage;
use crate::ee::ExecutionEnvironment;
use crate::resource::*;

use super::Repository;

/// The capabilities a running framework provides beyond its own manifest.
///
/// Besides the framework's declared capabilities this holds the execution environments it
/// runs on, the `system.bundle` alias and the packages exported from the JRE or configured as
/// extra system packages. All of these are owned by the framework resource so a requirement
/// resolved against them wires to the framework.
#[derive(Debug)]
pub struct FrameworkResourceRepository {
	index: CapabilityIndex,
	framework: Resource,
	ee: ExecutionEnvironment,
}

impl FrameworkResourceRepository {
	pub fn new(framework: Resource, ee: ExecutionEnvironment, system_packages: &[ExportedPackage]) -> Self {
		let mut repo = FrameworkResourceRepository { index: CapabilityIndex::new(), framework, ee };
		repo.index.add_resource(&repo.framework);

		/* EEs */
		repo.add_ee_capability(ee);
		for compatible in ee.compatible() {
			repo.add_ee_capability(compatible);
		}

		/* system.bundle alias */
		let framework_version = repo.framework.identity_version();
		repo.add_framework_capability(CapReqBuilder::new(namespace::BUNDLE_NAMESPACE)
			.add_attribute(namespace::BUNDLE_NAMESPACE, namespace::SYSTEM_BUNDLE_SYMBOLIC_NAME)
			.add_attribute(namespace::BUNDLE_VERSION_ATTRIBUTE, framework_version.clone()));
		repo.add_framework_capability(CapReqBuilder::new(namespace::HOST_NAMESPACE)
			.add_attribute(namespace::HOST_NAMESPACE, namespace::SYSTEM_BUNDLE_SYMBOLIC_NAME)
			.add_attribute(namespace::BUNDLE_VERSION_ATTRIBUTE, framework_version));

		/* JRE packages */
		for package in ee.system_packages() {
			repo.add_package(package, Version::empty());
		}

		for exported in system_packages {
			repo.add_package(&exported.name, exported.version.clone());
		}

		log::debug!("Framework repository for {:?} on {} holds {} capabilities", repo.framework, ee, repo.index.len());
		repo
	}

	/// Adds a further capability owned by the framework.
	pub fn add_framework_capability(&mut self, builder: CapReqBuilder) {
		let capability = builder.build_capability(&self.framework);
		self.index.add_capability(capability);
	}

	pub fn framework(&self) -> &Resource {
		&self.framework
	}

	pub fn execution_environment(&self) -> ExecutionEnvironment {
		self.ee
	}

	fn add_ee_capability(&mut self, ee: ExecutionEnvironment) {
		self.add_framework_capability(CapReqBuilder::new(namespace::EXECUTION_ENVIRONMENT_NAMESPACE)
			.add_attribute(namespace::EXECUTION_ENVIRONMENT_NAMESPACE, ee.ee_name()));
	}

	fn add_package(&mut self, name: &str, version: Version) {
		self.add_framework_capability(CapReqBuilder::new(namespace::PACKAGE_NAMESPACE)
			.add_attribute(namespace::PACKAGE_NAMESPACE, name)
			.add_attribute(namespace::VERSION_ATTRIBUTE, version));
	}
}

impl Repository for FrameworkResourceRepository {
	fn find_providers(&self, requirements: &[Requirement]) -> HashMap<Requirement, Vec<Capability>> {
		super::find_in_index(&self.index, requirements)
	}

	fn name(&self) -> String {
		format!("framework:{}", self.framework.identity().unwrap_or_default())
	}
}
