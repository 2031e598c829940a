use super::Version;

/// A range of versions written in interval notation.
///
/// `[1.0,2.0)` includes 1.0 and excludes 2.0, a bare version such as `1.0` means "1.0 or later".
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VersionRange {
	left: Version,
	left_inclusive: bool,
	right: Option<Version>,
	right_inclusive: bool,
}

impl VersionRange {
	/// A range with no upper bound.
	pub fn at_least(version: Version) -> Self {
		VersionRange { left: version, left_inclusive: true, right: None, right_inclusive: false }
	}

	pub fn new(left: Version, left_inclusive: bool, right: Version, right_inclusive: bool) -> Self {
		VersionRange { left, left_inclusive, right: Some(right), right_inclusive }
	}

	pub fn parse(range: &str) -> crate::Result<Self> {
		let range = range.trim();
		let invalid = |why: &str| crate::Error::Parse(format!("invalid version range `{}`: {}", range, why));

		let left_inclusive = match range.chars().next() {
			Some('[') => true,
			Some('(') => false,
			Some(_) => return Ok(VersionRange::at_least(Version::parse(range)?)),
			None => return Err(invalid("empty")),
		};
		let right_inclusive = match range.chars().last() {
			Some(']') if range.len() > 1 => true,
			Some(')') if range.len() > 1 => false,
			_ => return Err(invalid("missing closing bracket")),
		};

		let inner = &range[1..range.len() - 1];
		let (left, right) = inner.split_once(',').ok_or_else(|| invalid("missing comma"))?;
		let left = Version::parse(left)?;
		let right = Version::parse(right)?;
		if right < left {
			return Err(invalid("upper bound is below lower bound"))
		}

		Ok(VersionRange::new(left, left_inclusive, right, right_inclusive))
	}

	pub fn left(&self) -> &Version { &self.left }
	pub fn right(&self) -> Option<&Version> { self.right.as_ref() }

	pub fn includes(&self, version: &Version) -> bool {
		let above_left = if self.left_inclusive { version >= &self.left } else { version > &self.left };
		if !above_left {
			return false
		}
		match &self.right {
			Some(right) => if self.right_inclusive { version <= right } else { version < right },
			None => true,
		}
	}

	/// Renders the range as an LDAP filter over `attribute`.
	pub fn to_filter(&self, attribute: &str) -> String {
		let left = if self.left_inclusive {
			format!("({}>={})", attribute, self.left)
		} else {
			format!("(!({}<={}))", attribute, self.left)
		};
		match &self.right {
			None => left,
			Some(right) => {
				let right = if self.right_inclusive {
					format!("({}<={})", attribute, right)
				} else {
					format!("(!({}>={}))", attribute, right)
				};
				format!("(&{}{})", left, right)
			},
		}
	}
}

impl std::str::FromStr for VersionRange {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> { Self::parse(s) }
}

impl std::fmt::Display for VersionRange {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match &self.right {
			None => write!(f, "{}", self.left),
			Some(right) => write!(f, "{}{},{}{}",
				if self.left_inclusive { '[' } else { '(' },
				self.left,
				right,
				if self.right_inclusive { ']' } else { ')' },
			),
		}
	}
}
