//! Preference order of candidates.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::filter::Filter;
use crate::resource::*;

use super::{Candidate, Wiring};

/// Ranks candidates, preferred first.
///
/// Keys are tried in order until one separates the two candidates:
/// 1. The framework's capabilities.
/// 1. Capabilities matching an input requirement, or offered by the input requirements resource.
/// 1. Resources with an existing wiring.
/// 1. Package capabilities, by package version descending.
/// 1. Bundle capabilities by bundle version, identity capabilities by version, descending.
/// 1. Package capabilities from bundles of the same symbolic name, by bundle version descending.
/// 1. Repository score descending, an unscored candidate ranks above every score.
/// 1. Resources declaring more capabilities.
///
/// Package capabilities sharing a bundle symbolic name and package version form a group. A group
/// ranks by the best score among its members so that keys 6 and 7 agree, and groups of equal rank
/// are kept apart by symbolic name. Every key is then a property of a single candidate within the
/// set the comparator was built for, which keeps the order a strict weak order over that set.
pub struct CapabilityComparator<'a> {
	framework: Option<&'a Resource>,
	input_requirements: Option<&'a Resource>,
	input_filters: &'a [Filter],
	wirings: &'a HashMap<Resource, Wiring>,
	group_ranks: HashMap<(String, Version), i64>,
}

impl<'a> CapabilityComparator<'a> {
	pub(super) fn new(
		framework: Option<&'a Resource>,
		input_requirements: Option<&'a Resource>,
		input_filters: &'a [Filter],
		wirings: &'a HashMap<Resource, Wiring>,
		candidates: &[Candidate],
	) -> Self {
		let mut group_ranks = HashMap::<(String, Version), i64>::new();
		for candidate in candidates {
			if let Some(group) = package_group(candidate.capability()) {
				let rank = rank(candidate);
				group_ranks.entry(group).and_modify(|r| *r = (*r).max(rank)).or_insert(rank);
			}
		}
		CapabilityComparator { framework, input_requirements, input_filters, wirings, group_ranks }
	}

	pub fn compare(&self, o1: &Candidate, o2: &Candidate) -> Ordering {
		let (res1, res2) = (o1.resource(), o2.resource());

		/* prefer framework bundle */
		let ord = preferred(self.framework == Some(res1), self.framework == Some(res2));
		if ord != Ordering::Equal { return ord }

		/* prefer input requirements */
		let ord = preferred(self.is_input(o1), self.is_input(o2));
		if ord != Ordering::Equal { return ord }

		/* prefer wired */
		let ord = preferred(self.wirings.contains_key(res1), self.wirings.contains_key(res2));
		if ord != Ordering::Equal { return ord }

		let (c1, c2) = (o1.capability(), o2.capability());
		let (ns1, ns2) = (c1.namespace(), c2.namespace());
		let both = |ns: &str| ns1 == ns && ns2 == ns;

		if both(namespace::PACKAGE_NAMESPACE) {
			/* higher package version */
			let ord = descending(c1, c2, namespace::VERSION_ATTRIBUTE);
			if ord != Ordering::Equal { return ord }

			/* same package version, best repository of the bundle, then higher bundle version */
			let ord = self.group_rank(o2).cmp(&self.group_rank(o1));
			if ord != Ordering::Equal { return ord }
			let ord = bundle_symbolic_name(c1).cmp(&bundle_symbolic_name(c2));
			if ord != Ordering::Equal { return ord }
			let ord = descending(c1, c2, namespace::BUNDLE_VERSION_ATTRIBUTE);
			if ord != Ordering::Equal { return ord }
		} else if both(namespace::BUNDLE_NAMESPACE) {
			/* higher resource version */
			let ord = descending(c1, c2, namespace::BUNDLE_VERSION_ATTRIBUTE);
			if ord != Ordering::Equal { return ord }
		} else if both(namespace::IDENTITY_NAMESPACE) {
			let ord = descending(c1, c2, namespace::VERSION_ATTRIBUTE);
			if ord != Ordering::Equal { return ord }
		}

		/* obey repository order */
		let ord = rank(o2).cmp(&rank(o1));
		if ord != Ordering::Equal { return ord }

		/* prefer the resource with most capabilities */
		res2.capability_count().cmp(&res1.capability_count())
	}

	fn is_input(&self, candidate: &Candidate) -> bool {
		self.input_requirements == Some(candidate.resource())
			|| is_input_requirement(self.input_filters, candidate.capability())
	}

	fn group_rank(&self, candidate: &Candidate) -> i64 {
		package_group(candidate.capability())
			.and_then(|g| self.group_ranks.get(&g).copied())
			.unwrap_or_else(|| rank(candidate))
	}
}

fn preferred(b1: bool, b2: bool) -> Ordering {
	b2.cmp(&b1)
}

/* unscored candidates come from the framework and rank above every repository */
fn rank(candidate: &Candidate) -> i64 {
	candidate.score().map_or(i64::MAX, i64::from)
}

fn bundle_symbolic_name(capability: &Capability) -> Option<&str> {
	capability.attribute(namespace::BUNDLE_SYMBOLIC_NAME_ATTRIBUTE).and_then(AttributeValue::as_str)
}

fn package_group(capability: &Capability) -> Option<(String, Version)> {
	if capability.namespace() != namespace::PACKAGE_NAMESPACE {
		return None
	}
	let bsn = bundle_symbolic_name(capability)?;
	Some((bsn.to_string(), capability.version_attribute(namespace::VERSION_ATTRIBUTE)))
}

fn descending(c1: &Capability, c2: &Capability, attribute: &str) -> Ordering {
	c2.version_attribute(attribute).cmp(&c1.version_attribute(attribute))
}

/// Tests a capability against the identity filters of the input requirements.
///
/// The identity is read from `bundle-symbolic-name`/`bundle-version` when present, otherwise from
/// `osgi.identity`/`version`.
pub fn is_input_requirement(filters: &[Filter], capability: &Capability) -> bool {
	if filters.is_empty() {
		return false
	}

	let bsn = capability.attribute(namespace::BUNDLE_SYMBOLIC_NAME_ATTRIBUTE).and_then(AttributeValue::as_str);
	let (name, version) = match bsn {
		Some(bsn) => (bsn, capability.version_attribute(namespace::BUNDLE_VERSION_ATTRIBUTE)),
		None => match capability.attribute(namespace::IDENTITY_NAMESPACE).and_then(AttributeValue::as_str) {
			Some(id) => (id, capability.version_attribute(namespace::VERSION_ATTRIBUTE)),
			None => return false,
		},
	};

	let mut properties = Attributes::new();
	properties.insert(namespace::IDENTITY_NAMESPACE.to_string(), AttributeValue::String(name.to_string()));
	properties.insert(namespace::VERSION_ATTRIBUTE.to_string(), AttributeValue::Version(version));

	filters.iter().any(|f| f.matches(&properties))
}
