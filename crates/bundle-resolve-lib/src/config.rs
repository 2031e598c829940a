//! Run configuration consumed by a resolve.
//!
//! A run file is a JSON object using the instruction names of a bnd run descriptor:
//!
//! ```json
//! {
//! 	"-runee": "JavaSE-1.7",
//! 	"-runfw": "org.apache.felix.framework;version='[4,5)'",
//! 	"-runrepos": "Main, Local",
//! 	"-runrequires": "osgi.identity;filter:='(osgi.identity=org.example.app)'",
//! 	"-runsystempackages": "sun.misc;version=1.0",
//! 	"-resourcebsn": "org.example.app"
//! }
//! ```

use serde::*;

use crate::ee::ExecutionEnvironment;
use crate::header;
use crate::resource::*;

/// A package the framework is configured to export in addition to the JRE ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedPackage {
	pub name: String,
	pub version: Version,
}

/// Raw instructions as they appear in a run file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RunFile {
	#[serde(rename = "-runee", default, skip_serializing_if = "Option::is_none")]
	pub run_ee: Option<String>,
	#[serde(rename = "-runfw", default, skip_serializing_if = "Option::is_none")]
	pub run_fw: Option<String>,
	#[serde(rename = "-runrepos", default, skip_serializing_if = "Option::is_none")]
	pub run_repos: Option<String>,
	#[serde(rename = "-runrequires", default, skip_serializing_if = "Option::is_none")]
	pub run_requires: Option<String>,
	#[serde(rename = "-runsystempackages", default, skip_serializing_if = "Option::is_none")]
	pub run_system_packages: Option<String>,
	#[serde(rename = "-resourcebsn", default, skip_serializing_if = "Option::is_none")]
	pub resource_bsn: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct RunConfig {
	ee: Option<ExecutionEnvironment>,
	run_fw: Option<String>,
	run_repos: Option<Vec<String>>,
	run_requires: Vec<Requirement>,
	system_packages: Vec<ExportedPackage>,
	resource_bsn: Option<String>,
}

impl RunConfig {
	pub fn new() -> Self {
		Default::default()
	}

	pub fn load_from_path(path: impl AsRef<std::path::Path>) -> crate::Result<Self> {
		let data = std::fs::read(path.as_ref())?;
		let run_file: RunFile = serde_json::from_slice(&data)?;
		log::trace!("Read run file {}", path.as_ref().display());
		Self::from_run_file(run_file)
	}

	pub fn from_run_file(run_file: RunFile) -> crate::Result<Self> {
		let ee = run_file.run_ee.as_deref()
			.map(str::trim)
			.filter(|s| !s.is_empty())
			.map(str::parse::<ExecutionEnvironment>)
			.transpose()?;

		let run_repos = run_file.run_repos.map(|repos| {
			repos.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
		});

		let run_requires = match &run_file.run_requires {
			Some(h) => parse_requirements(h)?,
			None => Vec::new(),
		};

		let system_packages = match &run_file.run_system_packages {
			Some(h) => parse_exported_packages(h)?,
			None => Vec::new(),
		};

		Ok(RunConfig {
			ee,
			run_fw: run_file.run_fw.filter(|s| !s.trim().is_empty()),
			run_repos,
			run_requires,
			system_packages,
			resource_bsn: run_file.resource_bsn.filter(|s| !s.trim().is_empty()),
		})
	}

	/// The configured execution environment, `None` when the default should be used.
	pub fn ee(&self) -> Option<ExecutionEnvironment> {
		self.ee
	}
	pub fn set_ee(mut self, ee: ExecutionEnvironment) -> Self {
		self.ee = Some(ee);
		self
	}

	/// Framework clause, `identity[;version=range]`.
	pub fn run_fw(&self) -> Option<&str> {
		self.run_fw.as_deref()
	}
	pub fn set_run_fw(mut self, run_fw: impl Into<String>) -> Self {
		self.run_fw = Some(run_fw.into());
		self
	}

	/// Names of the repositories to use in order, `None` means every registered repository.
	pub fn run_repos(&self) -> Option<&[String]> {
		self.run_repos.as_deref()
	}
	pub fn set_run_repos(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
		self.run_repos = Some(names.into_iter().map(Into::into).collect());
		self
	}

	pub fn run_requires(&self) -> &[Requirement] {
		&self.run_requires
	}
	pub fn add_run_require(mut self, requirement: Requirement) -> Self {
		self.run_requires.push(requirement);
		self
	}

	pub fn system_packages(&self) -> &[ExportedPackage] {
		&self.system_packages
	}
	pub fn add_system_package(mut self, name: impl Into<String>, version: Version) -> Self {
		self.system_packages.push(ExportedPackage { name: name.into(), version });
		self
	}

	/// Symbolic name of the project artifact being resolved, if any.
	pub fn resource_bsn(&self) -> Option<&str> {
		self.resource_bsn.as_deref()
	}
	pub fn set_resource_bsn(mut self, bsn: impl Into<String>) -> Self {
		self.resource_bsn = Some(bsn.into());
		self
	}
}

/// Parses a requirements header, each clause name is the requirement namespace.
pub fn parse_requirements(header: &str) -> crate::Result<Vec<Requirement>> {
	Ok(header::parse(header)?.into_iter()
		.map(|c| Requirement::new(c.name, c.attributes, c.directives))
		.collect())
}

/// Parses a package header, a missing `version` attribute means `0.0.0`.
pub fn parse_exported_packages(header: &str) -> crate::Result<Vec<ExportedPackage>> {
	header::parse(header)?.into_iter()
		.map(|c| {
			let version = match c.attributes.get(namespace::VERSION_ATTRIBUTE) {
				Some(v) => v.as_version().ok_or_else(|| crate::Error::Parse(format!("invalid version `{}` on package `{}`", v, c.name)))?,
				None => Version::empty(),
			};
			Ok(ExportedPackage { name: c.name, version })
		})
		.collect()
}
