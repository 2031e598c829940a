//! A read-only repository backed by index files at fixed locations.
//!
//! # Properties
//! - `locations`: comma separated list of index files or directories, plain paths or `file:` URLs.
//!   Directories are searched for `*.json` index files. `location` is accepted as an alias.
//! - `name`: repository name, defaults to the list of locations.
//!
//! Indexes are read on the first query and kept in memory from then on.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::*;

use crate::resource::*;

use super::{MemoryRepository, Repository};

pub const PROP_LOCATIONS: &str = "locations";
pub const PROP_LOCATION: &str = "location";
pub const PROP_NAME: &str = "name";

/// On-disk format of an index file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IndexFile {
	pub resources: Vec<IndexResource>,
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct IndexResource {
	#[serde(default)]
	pub capabilities: Vec<IndexCapReq>,
	#[serde(default)]
	pub requirements: Vec<IndexCapReq>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexCapReq {
	pub namespace: String,
	#[serde(default)]
	pub attributes: BTreeMap<String, IndexAttribute>,
	#[serde(default)]
	pub directives: BTreeMap<String, String>,
}

/// Attribute values may be written typed, `{"type": "Version", "value": "1.0"}`, or as plain JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexAttribute {
	Typed(AttributeValue),
	String(String),
	Long(i64),
	Double(f64),
}

impl From<IndexAttribute> for AttributeValue {
	fn from(value: IndexAttribute) -> Self {
		match value {
			IndexAttribute::Typed(v) => v,
			IndexAttribute::String(s) => AttributeValue::String(s),
			IndexAttribute::Long(l) => AttributeValue::Long(l),
			IndexAttribute::Double(d) => AttributeValue::Double(d),
		}
	}
}

impl IndexCapReq {
	fn into_builder(self) -> CapReqBuilder {
		CapReqBuilder::new(self.namespace)
			.add_attributes(self.attributes.into_iter().map(|(k, v)| (k, v.into())).collect())
			.add_directives(self.directives.into_iter().collect())
	}
}

impl IndexFile {
	pub fn read_from_path(path: impl AsRef<Path>) -> crate::Result<Self> {
		let data = std::fs::read(path.as_ref())?;
		Ok(serde_json::from_slice(&data)?)
	}

	pub fn into_resources(self) -> Vec<Resource> {
		self.resources.into_iter().map(|r| {
			let mut builder = ResourceBuilder::new();
			for c in r.capabilities {
				builder = builder.add_capability(c.into_builder());
			}
			for req in r.requirements {
				builder = builder.add_requirement(req.into_builder().build_requirement());
			}
			builder.build()
		}).collect()
	}
}

#[derive(Debug)]
pub struct FixedIndexedRepository {
	name: Option<String>,
	locations: Vec<PathBuf>,
	loaded: OnceLock<MemoryRepository>,
}

impl FixedIndexedRepository {
	pub fn new(locations: Vec<PathBuf>) -> Self {
		FixedIndexedRepository { name: None, locations, loaded: OnceLock::new() }
	}

	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Configures the repository from plugin properties, see the module documentation.
	pub fn from_properties(properties: &HashMap<String, String>) -> crate::Result<Self> {
		let locations = match properties.get(PROP_LOCATIONS).or_else(|| properties.get(PROP_LOCATION)) {
			Some(l) => parse_locations(l)?,
			None => Vec::new(),
		};
		let mut repo = FixedIndexedRepository::new(locations);
		repo.name = properties.get(PROP_NAME).cloned();
		Ok(repo)
	}

	pub fn locations(&self) -> &[PathBuf] {
		&self.locations
	}

	fn repository(&self) -> &MemoryRepository {
		self.loaded.get_or_init(|| {
			let mut resources = Vec::new();
			for location in &self.locations {
				match read_location(location) {
					Ok(mut r) => resources.append(&mut r),
					Err(e) => log::warn!("Failed to read index at {}: {}", location.display(), e),
				}
			}
			log::debug!("Repository `{}` loaded {} resources", self.name(), resources.len());
			MemoryRepository::new(self.name(), resources)
		})
	}
}

impl Repository for FixedIndexedRepository {
	fn find_providers(&self, requirements: &[Requirement]) -> HashMap<Requirement, Vec<Capability>> {
		self.repository().find_providers(requirements)
	}

	fn name(&self) -> String {
		match &self.name {
			Some(n) => n.clone(),
			None => self.locations.iter().map(|l| l.display().to_string()).collect::<Vec<_>>().join(","),
		}
	}
}

fn parse_locations(locations: &str) -> crate::Result<Vec<PathBuf>> {
	locations.split(',')
		.map(str::trim)
		.filter(|l| !l.is_empty())
		.map(|l| {
			if let Some(path) = l.strip_prefix("file://").or_else(|| l.strip_prefix("file:")) {
				Ok(PathBuf::from(path))
			} else if l.contains("://") {
				Err(crate::Error::Parse(format!("invalid location `{}`: only local index files are supported", l)))
			} else {
				Ok(PathBuf::from(l))
			}
		})
		.collect()
}

fn read_location(location: &Path) -> crate::Result<Vec<Resource>> {
	if !location.is_dir() {
		return Ok(IndexFile::read_from_path(location)?.into_resources())
	}

	let mut resources = Vec::new();
	for entry in walkdir::WalkDir::new(location).sort_by_file_name() {
		let entry = entry.map_err(|e| crate::Error::IO(e.into()))?;
		if entry.file_type().is_file() && entry.path().extension().map_or(false, |e| e == "json") {
			match IndexFile::read_from_path(entry.path()) {
				Ok(index) => resources.append(&mut index.into_resources()),
				Err(e) => log::warn!("Skipping index {}: {}", entry.path().display(), e),
			}
		}
	}
	Ok(resources)
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn locations_accept_paths_and_file_urls() {
		let l = parse_locations("a/index.json, file:/tmp/b.json,file:///tmp/c").unwrap();
		assert_eq!(l, [PathBuf::from("a/index.json"), PathBuf::from("/tmp/b.json"), PathBuf::from("/tmp/c")]);
	}

	#[test]
	fn locations_reject_remote_urls() {
		assert!(parse_locations("http://www.example.com/repository.json").is_err());
	}

	#[test]
	fn name_defaults_to_locations() {
		let repo = FixedIndexedRepository::new(vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
		assert_eq!(repo.name(), "a.json,b.json");
		assert_eq!(repo.with_name("main").name(), "main");
	}

	#[test]
	fn index_attributes_accept_plain_and_typed_values() {
		let json = r#"{"resources": [{"capabilities": [{"namespace": "osgi.identity", "attributes": {
			"osgi.identity": "a",
			"version": {"type": "Version", "value": "1.2.3"},
			"size": 12
		}}]}]}"#;
		let index: IndexFile = serde_json::from_str(json).unwrap();
		let resources = index.into_resources();
		assert_eq!(resources.len(), 1);
		assert_eq!(resources[0].identity().as_deref(), Some("a"));
		assert_eq!(resources[0].identity_version(), Version::new(1, 2, 3));
		let id = &resources[0].capabilities(None)[0];
		assert_eq!(id.attribute("size"), Some(&AttributeValue::Long(12)));
	}
}
