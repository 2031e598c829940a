//! Execution environments and the packages a JRE exports implicitly.

use serde::*;

mod packages;

/// A named baseline runtime.
///
/// Later environments are backward compatible with the earlier ones in the same line, a bundle
/// requiring `J2SE-1.5` resolves against a `JavaSE-1.7` runtime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ExecutionEnvironment {
	OsgiMinimum1_0,
	OsgiMinimum1_1,
	OsgiMinimum1_2,
	Jre1_1,
	J2se1_2,
	J2se1_3,
	J2se1_4,
	J2se1_5,
	#[default] JavaSe1_6,
	JavaSe1_7,
	JavaSe1_8,
}

impl ExecutionEnvironment {
	pub const ALL: [ExecutionEnvironment; 11] = [
		ExecutionEnvironment::OsgiMinimum1_0,
		ExecutionEnvironment::OsgiMinimum1_1,
		ExecutionEnvironment::OsgiMinimum1_2,
		ExecutionEnvironment::Jre1_1,
		ExecutionEnvironment::J2se1_2,
		ExecutionEnvironment::J2se1_3,
		ExecutionEnvironment::J2se1_4,
		ExecutionEnvironment::J2se1_5,
		ExecutionEnvironment::JavaSe1_6,
		ExecutionEnvironment::JavaSe1_7,
		ExecutionEnvironment::JavaSe1_8,
	];

	/// The name used in `osgi.ee` capabilities and in run configurations.
	pub fn ee_name(&self) -> &'static str {
		match self {
			ExecutionEnvironment::OsgiMinimum1_0 => "OSGi/Minimum-1.0",
			ExecutionEnvironment::OsgiMinimum1_1 => "OSGi/Minimum-1.1",
			ExecutionEnvironment::OsgiMinimum1_2 => "OSGi/Minimum-1.2",
			ExecutionEnvironment::Jre1_1 => "JRE-1.1",
			ExecutionEnvironment::J2se1_2 => "J2SE-1.2",
			ExecutionEnvironment::J2se1_3 => "J2SE-1.3",
			ExecutionEnvironment::J2se1_4 => "J2SE-1.4",
			ExecutionEnvironment::J2se1_5 => "J2SE-1.5",
			ExecutionEnvironment::JavaSe1_6 => "JavaSE-1.6",
			ExecutionEnvironment::JavaSe1_7 => "JavaSE-1.7",
			ExecutionEnvironment::JavaSe1_8 => "JavaSE-1.8",
		}
	}

	pub fn from_ee_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|ee| ee.ee_name() == name.trim())
	}

	/// Environments this one can stand in for, nearest first.
	pub fn compatible(&self) -> Vec<ExecutionEnvironment> {
		use ExecutionEnvironment::*;
		let line: &[ExecutionEnvironment] = match self {
			OsgiMinimum1_0 => &[],
			OsgiMinimum1_1 => &[OsgiMinimum1_0],
			OsgiMinimum1_2 => &[OsgiMinimum1_1, OsgiMinimum1_0],
			Jre1_1 => &[],
			J2se1_2 => &[Jre1_1],
			J2se1_3 => &[J2se1_2, Jre1_1],
			J2se1_4 => &[J2se1_3, J2se1_2, Jre1_1, OsgiMinimum1_2, OsgiMinimum1_1, OsgiMinimum1_0],
			J2se1_5 => &[J2se1_4, J2se1_3, J2se1_2, Jre1_1, OsgiMinimum1_2, OsgiMinimum1_1, OsgiMinimum1_0],
			JavaSe1_6 => &[J2se1_5, J2se1_4, J2se1_3, J2se1_2, Jre1_1, OsgiMinimum1_2, OsgiMinimum1_1, OsgiMinimum1_0],
			JavaSe1_7 => &[JavaSe1_6, J2se1_5, J2se1_4, J2se1_3, J2se1_2, Jre1_1, OsgiMinimum1_2, OsgiMinimum1_1, OsgiMinimum1_0],
			JavaSe1_8 => &[JavaSe1_7, JavaSe1_6, J2se1_5, J2se1_4, J2se1_3, J2se1_2, Jre1_1, OsgiMinimum1_2, OsgiMinimum1_1, OsgiMinimum1_0],
		};
		line.to_vec()
	}

	/// Packages the runtime exports without them being declared by any bundle.
	///
	/// `java.*` is always available and never listed.
	pub fn system_packages(&self) -> Vec<&'static str> {
		packages::system_packages(*self)
	}
}

impl std::fmt::Display for ExecutionEnvironment {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.ee_name())
	}
}

impl std::str::FromStr for ExecutionEnvironment {
	type Err = crate::Error;
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_ee_name(s).ok_or_else(|| crate::Error::Parse(format!("unknown execution environment `{}`", s)))
	}
}

impl TryFrom<String> for ExecutionEnvironment {
	type Error = crate::Error;
	fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<ExecutionEnvironment> for String {
	fn from(value: ExecutionEnvironment) -> Self { value.ee_name().to_string() }
}
