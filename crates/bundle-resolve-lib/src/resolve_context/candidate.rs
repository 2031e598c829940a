use crate::resource::*;

/// A capability the solver has tentatively bound to a host resource.
///
/// Remembers the score of the candidate it was made from so that it ranks the same way.
#[derive(Debug, Clone, PartialEq)]
pub struct HostedCapability {
	host: Resource,
	declared: Capability,
	score: Option<i32>,
}

impl HostedCapability {
	pub fn new(host: Resource, declared: &Candidate) -> Self {
		HostedCapability { host, declared: declared.capability().clone(), score: declared.score() }
	}

	pub fn host(&self) -> &Resource {
		&self.host
	}

	/// The capability as declared by its original resource.
	pub fn declared_capability(&self) -> &Capability {
		&self.declared
	}
}

/// An entry in a ranked provider list.
#[derive(Debug, Clone, PartialEq)]
pub enum Candidate {
	/// Provided by the framework, never scored.
	Unscored(Capability),
	/// Provided by a configured repository, the first repository scores `0` and each later one a point less.
	Scored(Capability, i32),
	Hosted(HostedCapability),
}

impl Candidate {
	pub fn capability(&self) -> &Capability {
		match self {
			Candidate::Unscored(c) | Candidate::Scored(c, _) => c,
			Candidate::Hosted(h) => &h.declared,
		}
	}

	/// The resource offering the capability, the host for hosted capabilities.
	pub fn resource(&self) -> &Resource {
		match self {
			Candidate::Unscored(c) | Candidate::Scored(c, _) => c.resource(),
			Candidate::Hosted(h) => &h.host,
		}
	}

	pub fn namespace(&self) -> &str {
		self.capability().namespace()
	}

	pub fn score(&self) -> Option<i32> {
		match self {
			Candidate::Unscored(_) => None,
			Candidate::Scored(_, s) => Some(*s),
			Candidate::Hosted(h) => h.score,
		}
	}
}

impl From<HostedCapability> for Candidate {
	fn from(value: HostedCapability) -> Self {
		Candidate::Hosted(value)
	}
}

impl std::fmt::Display for Candidate {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.capability())
	}
}
