use pub_semver_parser::OwnedError;
use thiserror::Error;

/// Errors raised while publishing or looking up package versions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The given text is not a valid semantic version.
    #[error(transparent)]
    InvalidVersion(#[from] OwnedError),

    /// The package already has a version that is equal to the published one.
    #[error("Version {version} of package {package} already exists")]
    DuplicateVersion {
        /// The package name.
        package: String,
        /// The version as it was given.
        version: String,
    },

    /// The package has no version equal to the requested one.
    #[error("Package {package} has no version {version}")]
    UnknownVersion {
        /// The package name.
        package: String,
        /// The version as it was given.
        version: String,
    },

    /// No version of the package has been published.
    #[error("Package not found: {0}")]
    UnknownPackage(String),

    /// Another thread panicked while holding the repository lock.
    #[error("Repository lock poisoned")]
    LockPoisoned,
}

/// Result alias for registry operations.
pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
