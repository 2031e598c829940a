//! Supplies ranked candidates to a resolver.
//!
//! A [`ResolveContext`] is built from a [`RunConfig`] and a [`Registry`] of repositories. On first
//! use it picks the execution environment, orders the repositories, selects the framework and
//! gathers the input requirements. From then on it answers provider queries with candidates in
//! preference order, see [`CapabilityComparator`].
//!
//! The context never decides a resolution, the solver calling it does.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use parking_lot::{Mutex, RwLock};

use crate::config::RunConfig;
use crate::ee::ExecutionEnvironment;
use crate::error::SetupError;
use crate::filter::{self, Filter};
use crate::header;
use crate::repository::*;
use crate::resource::*;

mod candidate;
pub use candidate::Candidate;
pub use candidate::HostedCapability;

mod comparator;
pub use comparator::CapabilityComparator;
pub use comparator::is_input_requirement;

/// Identity of the resource carrying the input requirements.
pub const IDENTITY_INITIAL_RESOURCE: &str = "<<INITIAL>>";

/// Existing wires of a resource. Nothing is ever wired before a resolve so these are always empty.
pub type Wiring = Vec<Capability>;

struct ContextState {
	ee: ExecutionEnvironment,
	repositories: Vec<Arc<dyn Repository>>,
	framework: Option<Resource>,
	framework_repository: Option<FrameworkResourceRepository>,
	input_requirements: Option<Resource>,
	/* identity filters of the input requirements, parsed once */
	input_filters: Vec<Filter>,
}

pub struct ResolveContext {
	config: RunConfig,
	registry: Arc<dyn Registry>,
	state: OnceLock<Result<ContextState, SetupError>>,
	cache: RwLock<HashMap<RequirementKey, Vec<Candidate>>>,
	optional_requirements: Mutex<HashMap<Requirement, Vec<Candidate>>>,
	wirings: HashMap<Resource, Wiring>,
}

impl ResolveContext {
	pub fn new(config: RunConfig, registry: Arc<dyn Registry>) -> Self {
		ResolveContext {
			config,
			registry,
			state: OnceLock::new(),
			cache: RwLock::new(HashMap::new()),
			optional_requirements: Mutex::new(HashMap::new()),
			wirings: HashMap::new(),
		}
	}

	pub fn config(&self) -> &RunConfig {
		&self.config
	}

	fn state(&self) -> Result<&ContextState, SetupError> {
		self.state.get_or_init(|| self.init()).as_ref().map_err(Clone::clone)
	}

	fn init(&self) -> Result<ContextState, SetupError> {
		let ee = self.config.ee().unwrap_or_default();
		let repositories = self.load_repositories();

		let framework = self.find_framework(&repositories)?;
		let framework_repository = framework.as_ref()
			.map(|fw| FrameworkResourceRepository::new(fw.clone(), ee, self.config.system_packages()));

		let input_requirements = self.construct_input_requirements();
		let input_filters = input_requirements.as_ref().map(input_identity_filters).unwrap_or_default();

		log::debug!("Resolve context ready: ee {}, framework {:?}, {} repositories", ee, framework, repositories.len());
		Ok(ContextState { ee, repositories, framework, framework_repository, input_requirements, input_filters })
	}

	fn load_repositories(&self) -> Vec<Arc<dyn Repository>> {
		let all = self.registry.repositories();
		match self.config.run_repos() {
			None => all,
			Some(names) => {
				let by_name: HashMap<String, Arc<dyn Repository>> = all.into_iter().map(|r| (r.name(), r)).collect();
				names.iter()
					.filter_map(|n| {
						let repo = by_name.get(n).cloned();
						if repo.is_none() {
							log::trace!("Repository `{}` is not registered, skipping", n);
						}
						repo
					})
					.collect()
			},
		}
	}

	fn find_framework(&self, repositories: &[Arc<dyn Repository>]) -> Result<Option<Resource>, SetupError> {
		let Some(fw_header) = self.config.run_fw() else {
			return Ok(None)
		};

		let invalid = |e: crate::Error| SetupError::InvalidFramework(fw_header.to_string(), e.to_string());
		let clauses = header::parse(fw_header).map_err(invalid)?;
		if clauses.len() > 1 {
			return Err(SetupError::MultipleFrameworks(fw_header.to_string()))
		}
		let Some(clause) = clauses.into_iter().next() else {
			return Ok(None)
		};

		let mut filter = format!("({}={})", namespace::IDENTITY_NAMESPACE, filter::escape(&clause.name));
		if let Some(range) = clause.attribute_str(namespace::VERSION_ATTRIBUTE) {
			let range = VersionRange::parse(&range).map_err(invalid)?;
			filter = format!("(&{}{})", filter, range.to_filter(namespace::VERSION_ATTRIBUTE));
		}
		let requirement = CapReqBuilder::new(namespace::IDENTITY_NAMESPACE)
			.add_directive(namespace::FILTER_DIRECTIVE, filter)
			.build_requirement();

		let mut selected: Option<(Resource, Version)> = None;
		for repo in repositories {
			let mut providers = repo.find_providers(std::slice::from_ref(&requirement));
			for capability in providers.remove(&requirement).unwrap_or_default() {
				if !has_framework_contract(capability.resource()) {
					log::trace!("Ignoring {:?} from `{}`, it is not a framework", capability.resource(), repo.name());
					continue;
				}
				let Some(version) = capability.attribute(namespace::VERSION_ATTRIBUTE).and_then(AttributeValue::as_version) else {
					continue;
				};
				if selected.as_ref().map_or(true, |(_, v)| version > *v) {
					selected = Some((capability.resource().clone(), version));
				}
			}
		}

		match &selected {
			Some((fw, version)) => log::debug!("Selected framework {:?} {} for `{}`", fw, version, fw_header),
			None => log::debug!("No framework matches `{}`", fw_header),
		}
		Ok(selected.map(|(fw, _)| fw))
	}

	fn construct_input_requirements(&self) -> Option<Resource> {
		let requires = self.config.run_requires();
		let bsn = self.config.resource_bsn();
		if requires.is_empty() && bsn.is_none() {
			return None
		}

		let mut builder = ResourceBuilder::new().add_capability(CapReqBuilder::new(namespace::IDENTITY_NAMESPACE)
			.add_attribute(namespace::IDENTITY_NAMESPACE, IDENTITY_INITIAL_RESOURCE));
		for requirement in requires {
			builder = builder.add_requirement(requirement.clone());
		}
		if let Some(bsn) = bsn {
			builder = builder.add_requirement(CapReqBuilder::new(namespace::IDENTITY_NAMESPACE)
				.add_attribute(namespace::IDENTITY_NAMESPACE, bsn)
				.add_directive(namespace::FILTER_DIRECTIVE, format!("({}={})", namespace::IDENTITY_NAMESPACE, filter::escape(bsn)))
				.build_requirement());
		}
		Some(builder.build())
	}

	/// The resources every resolution must contain: the framework, then the input requirements resource if any.
	pub fn mandatory_resources(&self) -> crate::Result<Vec<Resource>> {
		let state = self.state()?;
		let Some(framework) = &state.framework else {
			return Err(SetupError::FrameworkNotFound(self.config.run_fw().map(str::to_string)).into())
		};

		let mut resources = vec![framework.clone()];
		if let Some(input) = &state.input_requirements {
			resources.push(input.clone());
		}
		Ok(resources)
	}

	/// Candidates for a requirement in preference order.
	///
	/// Results are cached per requirement and every call gets its own copy. Optional requirements
	/// are only ever answered by the framework, when the framework cannot satisfy one the other
	/// candidates are kept in [`ResolveContext::optional_requirements`] instead.
	pub fn find_providers(&self, requirement: &Requirement) -> crate::Result<Vec<Candidate>> {
		let state = self.state()?;

		if let Some(cached) = self.cache.read().get(requirement.key()) {
			log::trace!("Cache hit for {}", requirement);
			return Ok(cached.clone())
		}

		let mut result = Vec::new();

		/* the framework gets the first chance */
		if let Some(fw_repo) = &state.framework_repository {
			let mut providers = fw_repo.find_providers(std::slice::from_ref(requirement));
			result.extend(providers.remove(requirement).unwrap_or_default().into_iter().map(Candidate::Unscored));
		}

		let mut score = 0;
		for repo in &state.repositories {
			let mut providers = repo.find_providers(std::slice::from_ref(requirement));
			for capability in providers.remove(requirement).unwrap_or_default() {
				if is_permitted(capability.resource()) {
					result.push(Candidate::Scored(capability, score));
				}
			}
			score -= 1;
		}
		log::trace!("{} candidates for {}", result.len(), requirement);

		if requirement.is_optional() {
			let framework_caps: Vec<Candidate> = result.iter()
				.filter(|c| state.framework.as_ref() == Some(c.resource()))
				.cloned()
				.collect();
			if framework_caps.is_empty() {
				self.optional_requirements.lock().insert(requirement.clone(), result);
			}
			return Ok(framework_caps)
		}

		self.sort(state, &mut result);
		self.cache.write().insert(requirement.key().clone(), result.clone());
		Ok(result)
	}

	/// Whether a resource may be offered as an ordinary candidate.
	pub fn is_permitted(&self, resource: &Resource) -> bool {
		let _ = self.state();
		is_permitted(resource)
	}

	/// Adds a capability the solver bound to a host and returns its position in preference order.
	pub fn insert_hosted_capability(&self, candidates: &mut Vec<Candidate>, hosted: HostedCapability) -> crate::Result<usize> {
		let state = self.state()?;
		let inserted = candidates.len();
		candidates.push(hosted.into());

		/* sort positions so the new entry is tracked even when an equal one is already listed */
		let comparator = self.comparator_for(state, candidates);
		let mut order: Vec<usize> = (0..candidates.len()).collect();
		order.sort_by(|&a, &b| comparator.compare(&candidates[a], &candidates[b]));
		let index = order.iter().position(|&i| i == inserted).unwrap_or(inserted);

		let mut taken: Vec<Option<Candidate>> = candidates.drain(..).map(Some).collect();
		candidates.extend(order.iter().filter_map(|&i| taken[i].take()));
		Ok(index)
	}

	pub fn is_effective(&self, requirement: &Requirement) -> bool {
		let _ = self.state();
		requirement.directive(namespace::EFFECTIVE_DIRECTIVE).map_or(true, |e| e == namespace::EFFECTIVE_RESOLVE)
	}

	pub fn wirings(&self) -> &HashMap<Resource, Wiring> {
		let _ = self.state();
		&self.wirings
	}

	/// Optional requirements the framework could not satisfy, with every candidate found for them.
	pub fn optional_requirements(&self) -> HashMap<Requirement, Vec<Candidate>> {
		self.optional_requirements.lock().clone()
	}

	pub fn framework_resource(&self) -> crate::Result<Option<Resource>> {
		Ok(self.state()?.framework.clone())
	}

	pub fn input_requirements_resource(&self) -> crate::Result<Option<Resource>> {
		Ok(self.state()?.input_requirements.clone())
	}

	pub fn is_framework_resource(&self, resource: &Resource) -> bool {
		self.state().map_or(false, |s| s.framework.as_ref() == Some(resource))
	}

	pub fn is_input_requirements_resource(&self, resource: &Resource) -> bool {
		self.state().map_or(false, |s| s.input_requirements.as_ref() == Some(resource))
	}

	pub fn execution_environment(&self) -> crate::Result<ExecutionEnvironment> {
		Ok(self.state()?.ee)
	}

	/// The repositories queried, in order.
	pub fn repositories(&self) -> crate::Result<Vec<Arc<dyn Repository>>> {
		Ok(self.state()?.repositories.clone())
	}

	/// The preference order over a set of candidates, such as a [`ResolveContext::find_providers`] result.
	pub fn comparator(&self, candidates: &[Candidate]) -> crate::Result<CapabilityComparator<'_>> {
		Ok(self.comparator_for(self.state()?, candidates))
	}

	fn comparator_for<'a>(&'a self, state: &'a ContextState, candidates: &[Candidate]) -> CapabilityComparator<'a> {
		CapabilityComparator::new(
			state.framework.as_ref(),
			state.input_requirements.as_ref(),
			&state.input_filters,
			&self.wirings,
			candidates,
		)
	}

	fn sort(&self, state: &ContextState, candidates: &mut [Candidate]) {
		let comparator = self.comparator_for(state, candidates);
		candidates.sort_by(|a, b| comparator.compare(a, b));
	}
}

impl std::fmt::Debug for ResolveContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ResolveContext")
			.field("config", &self.config)
			.field("framework", &self.state.get().and_then(|s| s.as_ref().ok()).map(|s| &s.framework))
			.finish_non_exhaustive()
	}
}

/// Whether a resource may be offered as an ordinary candidate.
///
/// Frameworks, `osgi.core` and the `ee.*` stubs are never candidates. Resources without a single
/// well formed identity are rejected and logged.
pub fn is_permitted(resource: &Resource) -> bool {
	if has_framework_contract(resource) {
		return false
	}

	let ids = resource.capabilities(Some(namespace::IDENTITY_NAMESPACE));
	let identity = match ids.as_slice() {
		[] => {
			log::error!("Resource {:?} is missing an identity capability ({})", resource, namespace::IDENTITY_NAMESPACE);
			return false
		},
		[id] => match id.attribute(namespace::IDENTITY_NAMESPACE).and_then(AttributeValue::as_str) {
			Some(identity) => identity.to_string(),
			None => {
				log::error!("Resource {:?} is missing an identity value ({})", resource, namespace::IDENTITY_NAMESPACE);
				return false
			},
		},
		_ => {
			log::error!("Resource {:?} has more than one identity capability ({})", resource, namespace::IDENTITY_NAMESPACE);
			return false
		},
	};

	identity != "osgi.core" && !identity.starts_with("ee.")
}

/// Whether a resource is the input requirements resource of some context.
pub fn is_input_requirement_resource(resource: &Resource) -> bool {
	resource.capabilities(Some(namespace::IDENTITY_NAMESPACE)).first()
		.and_then(|id| id.attribute(namespace::IDENTITY_NAMESPACE).and_then(AttributeValue::as_str).map(|i| i == IDENTITY_INITIAL_RESOURCE))
		.unwrap_or(false)
}

fn has_framework_contract(resource: &Resource) -> bool {
	resource.capabilities(Some(namespace::CONTRACT_NAMESPACE)).iter()
		.any(|c| c.attribute(namespace::CONTRACT_NAMESPACE).and_then(AttributeValue::as_str) == Some(namespace::CONTRACT_OSGI_FRAMEWORK))
}

fn input_identity_filters(input: &Resource) -> Vec<Filter> {
	input.requirements(Some(namespace::IDENTITY_NAMESPACE)).iter()
		.filter_map(|r| {
			let f = r.filter()?;
			match Filter::parse(f) {
				Ok(f) => Some(f),
				Err(e) => {
					log::debug!("Ignoring input requirement {}: {}", r, e);
					None
				},
			}
		})
		.collect()
}
