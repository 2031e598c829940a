//! Library error type.

pub type Result<T> = std::result::Result<T, Error>;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
	#[error("IO error: {0}")]
	IO(#[from] std::io::Error),
	#[error("JSON error: {0}")]
	SerdeJSON(#[from] serde_json::Error),
	#[error("parsing error: {0}")]
	Parse(String),
	#[error("filter error: {0}")]
	Filter(#[from] crate::filter::FilterError),
	#[error("resolution setup failed: {0}")]
	Setup(#[from] SetupError),
}

/// Failures that abort setting up a resolve.
///
/// These are produced once during initialisation of a [`crate::ResolveContext`] and handed
/// to every caller afterwards, hence `Clone`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
	/// The framework header names more than one framework.
	#[error("cannot specify more than one OSGi framework: `{0}`")]
	MultipleFrameworks(String),
	/// No framework resource was selected, either because none was configured or because no repository offered a match.
	#[error("{}", framework_not_found_message(.0))]
	FrameworkNotFound(Option<String>),
	/// The framework header could not be understood.
	#[error("invalid framework clause `{0}`: {1}")]
	InvalidFramework(String, String),
}

fn framework_not_found_message(clause: &Option<String>) -> String {
	match clause {
		Some(clause) => format!("could not find OSGi framework matching `{}`", clause),
		None => "no OSGi framework configured (missing -runfw)".to_string(),
	}
}
