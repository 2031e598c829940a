use serde::*;

/// An OSGi style version, `major.minor.micro.qualifier`.
///
/// Missing numeric parts default to `0` and the qualifier to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
	major: u64,
	minor: u64,
	micro: u64,
	qualifier: String,
}

impl Version {
	pub const fn new(major: u64, minor: u64, micro: u64) -> Self {
		Version { major, minor, micro, qualifier: String::new() }
	}

	/// The empty version `0.0.0`.
	pub const fn empty() -> Self {
		Self::new(0, 0, 0)
	}

	pub fn with_qualifier(mut self, qualifier: impl Into<String>) -> crate::Result<Self> {
		let qualifier = qualifier.into();
		if !is_valid_qualifier(&qualifier) {
			return Err(crate::Error::Parse(format!("invalid version qualifier `{}`", qualifier)))
		}
		self.qualifier = qualifier;
		Ok(self)
	}

	pub fn parse(version: &str) -> crate::Result<Self> {
		let version = version.trim();
		if version.is_empty() {
			return Ok(Version::empty())
		}

		let mut parts = version.splitn(4, '.');
		let mut numeric = [0u64; 3];
		for (i, slot) in numeric.iter_mut().enumerate() {
			match parts.next() {
				Some(part) => {
					/* `u64::from_str` accepts a leading `+` which OSGi does not */
					if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
						return Err(crate::Error::Parse(format!("invalid version `{}`: component {} is not a number", version, i + 1)))
					}
					*slot = part.parse::<u64>().map_err(|e| crate::Error::Parse(format!("invalid version `{}`: {}", version, e)))?;
				},
				None => break,
			}
		}

		let v = Version::new(numeric[0], numeric[1], numeric[2]);
		match parts.next() {
			Some(qualifier) => v.with_qualifier(qualifier),
			None => Ok(v),
		}
	}

	pub fn major(&self) -> u64 { self.major }
	pub fn minor(&self) -> u64 { self.minor }
	pub fn micro(&self) -> u64 { self.micro }
	pub fn qualifier(&self) -> &str { &self.qualifier }
}

fn is_valid_qualifier(q: &str) -> bool {
	q.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Ord for Version {
	fn cmp(&self, other: &Self) -> std::cmp::Ordering {
		self.major.cmp(&other.major)
			.then(self.minor.cmp(&other.minor))
			.then(self.micro.cmp(&other.micro))
			.then_with(|| self.qualifier.cmp(&other.qualifier))
	}
}

impl PartialOrd for Version {
	fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
		Some(self.cmp(other))
	}
}

impl std::str::FromStr for Version {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl TryFrom<String> for Version {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { Self::parse(&value) }
}

impl From<Version> for String {
	fn from(value: Version) -> Self {
		value.to_string()
	}
}

impl std::fmt::Display for Version {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.micro)?;
		if !self.qualifier.is_empty() {
			write!(f, ".{}", self.qualifier)?;
		}
		Ok(())
	}
}
