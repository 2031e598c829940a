//! Well known namespaces, attributes and directives.

pub const IDENTITY_NAMESPACE: &str = "osgi.identity";
pub const BUNDLE_NAMESPACE: &str = "osgi.wiring.bundle";
pub const HOST_NAMESPACE: &str = "osgi.wiring.host";
pub const PACKAGE_NAMESPACE: &str = "osgi.wiring.package";
pub const EXECUTION_ENVIRONMENT_NAMESPACE: &str = "osgi.ee";
pub const CONTRACT_NAMESPACE: &str = "osgi.contract";

/// `version` attribute of identity, package and contract capabilities.
pub const VERSION_ATTRIBUTE: &str = "version";
/// `bundle-version` attribute of bundle, host and package capabilities.
pub const BUNDLE_VERSION_ATTRIBUTE: &str = "bundle-version";
/// Owning bundle name on package capabilities.
pub const BUNDLE_SYMBOLIC_NAME_ATTRIBUTE: &str = "bundle-symbolic-name";

pub const FILTER_DIRECTIVE: &str = "filter";
pub const RESOLUTION_DIRECTIVE: &str = "resolution";
pub const RESOLUTION_MANDATORY: &str = "mandatory";
pub const RESOLUTION_OPTIONAL: &str = "optional";
pub const EFFECTIVE_DIRECTIVE: &str = "effective";
pub const EFFECTIVE_RESOLVE: &str = "resolve";

/// Contract name carried by framework implementations.
pub const CONTRACT_OSGI_FRAMEWORK: &str = "OSGiFramework";
pub const SYSTEM_BUNDLE_SYMBOLIC_NAME: &str = "system.bundle";
