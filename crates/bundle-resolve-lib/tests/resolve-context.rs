use std::cmp::Ordering;
use std::sync::Arc;

use bundle_resolve::*;
use bundle_resolve::repository::*;
use bundle_resolve::resource::*;
use bundle_resolve_test_utils::*;

fn v(major: u64, minor: u64) -> Version {
	Version::new(major, minor, 0)
}

fn fw_config() -> RunConfig {
	RunConfig::new().set_run_fw("org.example.framework")
}

#[test]
fn providers_are_cached_per_requirement() {
	init_logging();
	let repo = Arc::new(CountingRepository::new("main", [
		bundle("a", v(1, 0)).add_capability(package("org.example.api", v(1, 0), "a", v(1, 0))).build(),
	]));
	let ctx = ResolveContext::new(RunConfig::new(), Arc::new(PluginRegistry::new().add_repository(repo.clone())));

	let first = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.api)")).unwrap();
	/* a different but equal requirement hits the cache */
	let second = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.api)")).unwrap();
	assert_eq!(first.len(), 1);
	assert_eq!(first, second);
	assert_eq!(repo.queries(), 1);

	ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.impl)")).unwrap();
	assert_eq!(repo.queries(), 2);
}

#[test]
fn callers_get_their_own_copy() {
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![vec![bundle("a", v(1, 0)).build()]]));
	let req = requirement(namespace::IDENTITY_NAMESPACE, "(osgi.identity=a)");
	let mut first = ctx.find_providers(&req).unwrap();
	first.clear();
	assert_eq!(ctx.find_providers(&req).unwrap().len(), 1);
}

#[test]
fn framework_capabilities_come_first() {
	init_logging();
	let fw = framework("org.example.framework", v(4, 0)).build();
	let xml = bundle("org.example.xml", v(2, 0)).add_capability(package("javax.xml.parsers", v(9, 0), "org.example.xml", v(2, 0))).build();
	let ctx = ResolveContext::new(fw_config(), registry(vec![vec![fw.clone(), xml.clone()]]));

	let found = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=javax.xml.parsers)")).unwrap();
	assert_eq!(found.len(), 2);
	assert_eq!(found[0].resource(), &fw);
	assert_eq!(found[0].score(), None);
	assert_eq!(found[1].resource(), &xml);
	assert_eq!(found[1].score(), Some(0));
}

#[test]
fn optional_requirement_not_satisfied_by_framework_goes_to_ledger() {
	let fw = framework("org.example.framework", v(4, 0)).build();
	let opt = bundle("org.example.opt", v(1, 0)).add_capability(package("org.example.opt", v(1, 0), "org.example.opt", v(1, 0))).build();
	let repo = Arc::new(CountingRepository::new("main", [fw, opt.clone()]));
	let ctx = ResolveContext::new(fw_config(), Arc::new(PluginRegistry::new().add_repository(repo.clone())));

	let req = optional_requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.opt)");
	assert!(ctx.find_providers(&req).unwrap().is_empty());

	let ledger = ctx.optional_requirements();
	assert_eq!(ledger.len(), 1);
	assert_eq!(ledger[&req].len(), 1);
	assert_eq!(ledger[&req][0].resource(), &opt);

	/* not cached */
	let queries = repo.queries();
	ctx.find_providers(&req).unwrap();
	assert_eq!(repo.queries(), queries + 1);
}

#[test]
fn optional_requirement_satisfied_by_framework() {
	let fw = framework("org.example.framework", v(4, 0)).build();
	let xml = bundle("org.example.xml", v(2, 0)).add_capability(package("javax.xml.parsers", v(9, 0), "org.example.xml", v(2, 0))).build();
	let ctx = ResolveContext::new(fw_config(), registry(vec![vec![fw.clone(), xml]]));

	let found = ctx.find_providers(&optional_requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=javax.xml.parsers)")).unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].resource(), &fw);
	assert!(ctx.optional_requirements().is_empty());
}

#[test]
fn forbidden_resources_are_never_candidates() {
	init_logging();
	let api = |b: ResourceBuilder, bsn: &str| b.add_capability(package("org.osgi.framework", v(1, 7), bsn, v(1, 0))).build();
	let ok = api(bundle("org.example.ok", v(1, 0)), "org.example.ok");
	let repo = vec![
		api(bundle("osgi.core", v(4, 3)), "osgi.core"),
		api(bundle("ee.minimum", v(1, 2)), "ee.minimum"),
		api(framework("org.example.other.framework", v(1, 0)), "org.example.other.framework"),
		api(ResourceBuilder::new(), "anonymous"),
		ok.clone(),
	];
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![repo]));

	let found = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.osgi.framework)")).unwrap();
	assert_eq!(found.len(), 1);
	assert_eq!(found[0].resource(), &ok);
}

#[test]
fn higher_versions_come_first() {
	let old = bundle("a", v(1, 0)).build();
	let new = bundle("a", v(1, 1)).build();
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![vec![old.clone()], vec![new.clone()]]));

	let found = ctx.find_providers(&requirement(namespace::BUNDLE_NAMESPACE, "(osgi.wiring.bundle=a)")).unwrap();
	assert_eq!(found.iter().map(Candidate::resource).collect::<Vec<_>>(), [&new, &old]);
}

#[test]
fn earlier_repository_wins_at_equal_version() {
	let first = bundle("x.one", v(1, 0)).add_capability(package("org.example.x", v(1, 0), "x.one", v(1, 0))).build();
	let second = bundle("x.two", v(1, 0)).add_capability(package("org.example.x", v(1, 0), "x.two", v(1, 0))).build();
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![vec![first.clone()], vec![second.clone()]]));

	let found = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.x)")).unwrap();
	assert_eq!(found.len(), 2);
	assert_eq!(found[0].resource(), &first);
	assert_eq!(found[1].resource(), &second);
}

#[test]
fn framework_must_expose_contract() {
	let with_contract = framework("demo.framework", Version::new(3, 2, 0)).build();
	let without_contract = bundle("demo.framework", Version::new(3, 5, 0)).build();
	let out_of_range = framework("demo.framework", Version::new(4, 0, 0)).build();
	let ctx = ResolveContext::new(
		RunConfig::new().set_run_fw("demo.framework;version='[3,4)'"),
		registry(vec![vec![with_contract.clone(), out_of_range], vec![without_contract]]),
	);

	assert_eq!(ctx.framework_resource().unwrap(), Some(with_contract.clone()));
	assert_eq!(ctx.mandatory_resources().unwrap(), [with_contract]);
}

#[test]
fn mandatory_resources_without_framework_fail() {
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![vec![bundle("a", v(1, 0)).build()]]));
	let err = ctx.mandatory_resources().unwrap_err();
	assert!(matches!(err, Error::Setup(SetupError::FrameworkNotFound(None))));

	let ctx = ResolveContext::new(RunConfig::new().set_run_fw("missing.framework"), registry(vec![]));
	let err = ctx.mandatory_resources().unwrap_err();
	assert!(matches!(err, Error::Setup(SetupError::FrameworkNotFound(Some(ref c))) if c == "missing.framework"));
	assert!(err.to_string().contains("missing.framework"));
}

#[test]
fn mandatory_resources_include_input_requirements() {
	let fw = framework("org.example.framework", v(4, 0)).build();
	let config = fw_config().add_run_require(requirement(namespace::IDENTITY_NAMESPACE, "(osgi.identity=a)"));
	let ctx = ResolveContext::new(config, registry(vec![vec![fw.clone()]]));

	let mandatory = ctx.mandatory_resources().unwrap();
	assert_eq!(mandatory.len(), 2);
	assert_eq!(mandatory[0], fw);
	assert!(resolve_context::is_input_requirement_resource(&mandatory[1]));
	assert_eq!(mandatory[1].requirements(None).len(), 1);
}

#[test]
fn framework_provides_system_bundle_and_ee() {
	let fw = framework("org.example.framework", v(4, 2)).build();
	let ctx = ResolveContext::new(fw_config().set_ee(ExecutionEnvironment::JavaSe1_7), registry(vec![vec![fw.clone()]]));

	let host = ctx.find_providers(&requirement(namespace::HOST_NAMESPACE, "(osgi.wiring.host=system.bundle)")).unwrap();
	assert_eq!(host.len(), 1);
	assert_eq!(host[0].resource(), &fw);

	let ee = ctx.find_providers(&requirement(namespace::EXECUTION_ENVIRONMENT_NAMESPACE, "(osgi.ee=JavaSE-1.6)")).unwrap();
	assert_eq!(ee.len(), 1);
}

#[test]
fn ranking_is_a_strict_weak_order() {
	let fw = framework("org.example.framework", v(4, 0)).add_capability(package("org.example.p", v(1, 0), "org.example.framework", v(4, 0))).build();
	let mut repos = vec![vec![fw]];
	for (i, (pv, bv)) in [(v(1, 0), v(1, 0)), (v(1, 0), v(2, 0)), (v(2, 0), v(1, 0)), (v(1, 0), v(1, 0))].into_iter().enumerate() {
		let mut b = bundle("org.example.b", bv.clone()).add_capability(package("org.example.p", pv, "org.example.b", bv));
		for _ in 0..i % 2 {
			b = b.add_capability(CapReqBuilder::new("extra"));
		}
		repos.push(vec![b.build()]);
	}
	let config = fw_config().add_run_require(requirement(namespace::IDENTITY_NAMESPACE, "(&(osgi.identity=org.example.b)(version>=2.0))"));
	let ctx = ResolveContext::new(config, registry(repos));

	let found = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.p)")).unwrap();
	assert_eq!(found.len(), 5);

	let cmp = ctx.comparator(&found).unwrap();
	for a in &found {
		assert_eq!(cmp.compare(a, a), Ordering::Equal);
		for b in &found {
			assert_eq!(cmp.compare(a, b), cmp.compare(b, a).reverse());
			for c in &found {
				if cmp.compare(a, b) == Ordering::Less && cmp.compare(b, c) == Ordering::Less {
					assert_eq!(cmp.compare(a, c), Ordering::Less);
				}
			}
		}
	}
	for pair in found.windows(2) {
		assert_ne!(cmp.compare(&pair[0], &pair[1]), Ordering::Greater);
	}
}

#[test]
fn ranking_over_mixed_bundle_names() {
	let x_old = bundle("x", v(1, 0)).add_capability(package("org.example.p", v(1, 0), "x", v(1, 0))).build();
	let y = bundle("y", v(1, 0)).add_capability(package("org.example.p", v(1, 0), "y", v(1, 0))).build();
	let x_new = bundle("x", v(2, 0)).add_capability(package("org.example.p", v(1, 0), "x", v(2, 0))).build();
	let z = bundle("z", v(1, 0)).add_capability(package("org.example.p", v(1, 0), "z", v(1, 0))).build();
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![vec![x_old.clone()], vec![y.clone()], vec![x_new.clone()], vec![z.clone()]]));

	let found = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.p)")).unwrap();
	/* the newest x takes the place of the best x */
	assert_eq!(found.iter().map(Candidate::resource).collect::<Vec<_>>(), [&x_new, &x_old, &y, &z]);

	let cmp = ctx.comparator(&found).unwrap();
	for a in &found {
		for b in &found {
			for c in &found {
				if cmp.compare(a, b) == Ordering::Less && cmp.compare(b, c) == Ordering::Less {
					assert_eq!(cmp.compare(a, c), Ordering::Less);
				}
				if cmp.compare(a, b) == Ordering::Equal && cmp.compare(b, c) == Ordering::Equal {
					assert_eq!(cmp.compare(a, c), Ordering::Equal);
				}
			}
		}
	}

	/* sorting again changes nothing */
	let mut resorted = found.clone();
	resorted.reverse();
	resorted.sort_by(|a, b| cmp.compare(a, b));
	assert_eq!(resorted, found);
}

#[test]
fn every_operation_initialises() {
	let fw = framework("org.example.framework", v(4, 0)).build();
	let req = requirement(namespace::IDENTITY_NAMESPACE, "(osgi.identity=a)");
	let checks: [fn(&ResolveContext, &Requirement, &Resource); 3] = [
		|ctx, req, _| { ctx.is_effective(req); },
		|ctx, _, _| { ctx.wirings(); },
		|ctx, _, fw| { ctx.is_permitted(fw); },
	];
	for check in checks {
		let repo = Arc::new(CountingRepository::new("main", [fw.clone()]));
		let ctx = ResolveContext::new(fw_config(), Arc::new(PluginRegistry::new().add_repository(repo.clone())));
		check(&ctx, &req, &fw);
		/* framework selection ran */
		assert_eq!(repo.queries(), 1);
	}
}

#[test]
fn hosted_capabilities_keep_their_score() {
	let a = bundle("a", v(1, 0)).add_capability(package("org.example.p", v(1, 0), "a", v(1, 0))).build();
	let b = bundle("b", v(1, 0)).add_capability(package("org.example.p", v(1, 0), "b", v(1, 0))).build();
	let host = bundle("host", v(1, 0)).build();
	let ctx = ResolveContext::new(RunConfig::new(), registry(vec![vec![a], vec![b]]));

	let mut found = ctx.find_providers(&requirement(namespace::PACKAGE_NAMESPACE, "(osgi.wiring.package=org.example.p)")).unwrap();
	let hosted = HostedCapability::new(host.clone(), &found[1]);
	assert_eq!(Candidate::from(hosted.clone()).score(), Some(-1));

	let index = ctx.insert_hosted_capability(&mut found, hosted).unwrap();
	assert_eq!(found.len(), 3);
	assert_eq!(found[index].resource(), &host);
	/* behind the first repository's candidate */
	assert!(index >= 1);
}

#[test]
fn initialises_once_across_threads() {
	init_logging();
	let fw = framework("org.example.framework", v(4, 0)).build();
	let repo = Arc::new(CountingRepository::new("main", [fw.clone()]));
	let ctx = ResolveContext::new(fw_config(), Arc::new(PluginRegistry::new().add_repository(repo.clone())));

	let results: Vec<_> = std::thread::scope(|s| {
		let handles: Vec<_> = (0..8).map(|_| s.spawn(|| ctx.mandatory_resources().unwrap())).collect();
		handles.into_iter().map(|h| h.join().unwrap()).collect()
	});

	/* only framework selection queried the repository */
	assert_eq!(repo.queries(), 1);
	for r in results {
		assert_eq!(r, [fw.clone()]);
	}
}

#[test]
fn context_is_shareable() {
	fn assert_send_sync<T: Send + Sync>() {}
	assert_send_sync::<ResolveContext>();
}
