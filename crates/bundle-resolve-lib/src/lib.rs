pub mod error;
pub use error::Result;
pub use error::Error;
pub use error::SetupError;

pub mod config;
pub use config::RunConfig;

pub mod header;

pub mod resource;
pub use resource::Resource;
pub use resource::Capability;
pub use resource::Requirement;
pub use resource::Version;

pub mod filter;
pub use filter::Filter;

pub mod ee;
pub use ee::ExecutionEnvironment;

pub mod capability_index;

pub mod repository;
pub use repository::Repository;
pub use repository::Registry;

pub mod resolve_context;
pub use resolve_context::ResolveContext;
pub use resolve_context::Candidate;
pub use resolve_context::HostedCapability;
