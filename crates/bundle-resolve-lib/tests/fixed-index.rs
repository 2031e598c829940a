use std::collections::HashMap;
use std::sync::Arc;

use bundle_resolve::*;
use bundle_resolve::repository::*;
use bundle_resolve::resource::*;
use bundle_resolve_test_utils::*;

fn properties(pairs: &[(&str, &str)]) -> HashMap<String, String> {
	pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
}

#[test]
fn fixed_index_reads_files_and_directories() {
	init_logging();
	let dir = temp_dir().unwrap();
	write_index(dir.path(), "a.json", &bundle_index_json("org.example.a", "1.0.0", "org.example.a.api")).unwrap();
	write_index(dir.path(), "b.json", &bundle_index_json("org.example.b", "2.0.0", "org.example.b.api")).unwrap();
	std::fs::write(dir.path().join("notes.txt"), "not an index").unwrap();

	let repo = FixedIndexedRepository::from_properties(&properties(&[
		("locations", dir.path().display().to_string().as_str()),
		("name", "Local"),
	])).unwrap();
	assert_eq!(repo.name(), "Local");

	let req = requirement(namespace::PACKAGE_NAMESPACE, "(&(osgi.wiring.package=org.example.b.api)(version>=2.0))");
	let found = repo.find_providers(&[req.clone()]).remove(&req).unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].resource().identity().as_deref(), Some("org.example.b"));
}

#[test]
fn fixed_index_skips_unreadable_locations() {
	init_logging();
	let dir = temp_dir().unwrap();
	let good = write_index(dir.path(), "good.json", &bundle_index_json("org.example.a", "1.0.0", "org.example.a.api")).unwrap();
	let missing = dir.path().join("missing.json");

	let repo = FixedIndexedRepository::from_properties(&properties(&[
		("location", format!("file:{}, {}", good.display(), missing.display()).as_str()),
	])).unwrap();
	assert_eq!(repo.locations().len(), 2);

	let req = requirement(namespace::IDENTITY_NAMESPACE, "(osgi.identity=org.example.a)");
	assert_eq!(repo.find_providers(&[req.clone()])[&req].len(), 1);
}

#[test]
fn fixed_index_skips_bad_files_in_directory() {
	init_logging();
	let dir = temp_dir().unwrap();
	std::fs::write(dir.path().join("a-bad.json"), "{ not json").unwrap();
	write_index(dir.path(), "b-good.json", &bundle_index_json("org.example.b", "1.0.0", "org.example.b.api")).unwrap();

	let repo = FixedIndexedRepository::new(vec![dir.path().to_path_buf()]);
	let req = requirement(namespace::IDENTITY_NAMESPACE, "(osgi.identity=org.example.b)");
	assert_eq!(repo.find_providers(&[req.clone()])[&req].len(), 1);
}

#[test]
fn fixed_index_rejects_remote_locations() {
	let err = FixedIndexedRepository::from_properties(&properties(&[("locations", "https://repo.example.com/index.json")]));
	assert!(matches!(err, Err(Error::Parse(_))));
}

#[test]
fn fixed_index_in_resolve_context() {
	let dir = temp_dir().unwrap();
	let index = write_index(dir.path(), "index.json", &bundle_index_json("org.example.a", "1.0.0", "org.example.a.api")).unwrap();
	let repo = FixedIndexedRepository::new(vec![index]).with_name("Indexed");
	let ignored = MemoryRepository::new("Ignored", [bundle("org.example.a", Version::new(9, 0, 0)).build()]);
	let registry = PluginRegistry::new()
		.add_repository(Arc::new(ignored))
		.add_repository(Arc::new(repo));

	let ctx = ResolveContext::new(RunConfig::new().set_run_repos(["Indexed"]), Arc::new(registry));
	let found = ctx.find_providers(&requirement(namespace::IDENTITY_NAMESPACE, "(osgi.identity=org.example.a)")).unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].resource().identity_version(), Version::new(1, 0, 0));
}
