use crate::{
    error::{RegistryError, Result},
    latest::should_update_latest,
    repository::{PackageState, PackageVersionRecord, VersionRepository},
};
use pub_version::SemanticVersion;
use tracing::{debug, info, warn};

/// The result of a successful [`Publisher::publish`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishOutcome {
    /// The published version.
    pub version: SemanticVersion,
    /// Whether the published version is now the latest version of its package.
    pub became_latest: bool,
}

/// Publishes versions into a [`VersionRepository`] and keeps the latest pointer and sort order up to date.
///
/// Every operation runs as a single repository transaction, so concurrent uploads to the same
/// package never interleave their read-decide-write sequences.
#[derive(Debug)]
pub struct Publisher<R> {
    repository: R,
}

impl<R: VersionRepository> Publisher<R> {
    /// Creates a publisher on top of the given repository.
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    /// The underlying repository.
    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Consumes the publisher and returns the underlying repository.
    pub fn into_inner(self) -> R {
        self.repository
    }

    /// Publishes a new version of `package`.
    ///
    /// Fails if `raw_version` is not a valid semantic version, or if an equal version
    /// was already published. The version becomes the latest one according to
    /// [`should_update_latest`], and the sort order of all versions is recomputed.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_registry::{InMemoryRepository, Publisher};
    /// let publisher = Publisher::new(InMemoryRepository::new());
    ///
    /// assert!(publisher.publish("foo", "1.2.3").unwrap().became_latest);
    /// assert!(!publisher.publish("foo", "1.3.0-pre").unwrap().became_latest);
    /// assert!(publisher.publish("foo", "01.02.03").is_err());
    /// ```
    pub fn publish(&self, package: &str, raw_version: &str) -> Result<PublishOutcome> {
        let version = parse_version(raw_version)?;
        let outcome = self.repository.transaction(package, |state| {
            if state.contains(&version) {
                warn!(package, version = raw_version, "Rejected duplicate version");
                return Err(RegistryError::DuplicateVersion {
                    package: package.to_string(),
                    version: raw_version.to_string(),
                });
            }

            let became_latest = should_update_latest(state.latest(), &version);
            debug!(
                package,
                current = ?state.latest().map(SemanticVersion::canonical),
                candidate = %version,
                became_latest,
                "Decided latest version"
            );

            let _ = state.insert(PackageVersionRecord::new(version.clone()));
            if became_latest {
                state.set_latest(version.clone());
            }
            order_versions(package, state);

            Ok(PublishOutcome {
                version,
                became_latest,
            })
        })?;

        info!(
            package,
            version = %outcome.version,
            latest = outcome.became_latest,
            "Published version"
        );
        Ok(outcome)
    }

    /// Sorts all versions of `package` in ascending precedence and assigns their sort order.
    pub fn compute_version_order(&self, package: &str) -> Result<()> {
        self.repository.transaction(package, |state| {
            if state.is_empty() {
                return Err(RegistryError::UnknownPackage(package.to_string()));
            }
            order_versions(package, state);
            Ok(())
        })
    }

    /// Replaces the stored version equal to `existing` with the re-parsed `raw_version`.
    ///
    /// The new version keeps the sort order and the download count of the replaced one,
    /// and becomes the latest version if the replaced one was.
    pub fn reload(&self, package: &str, existing: &str, raw_version: &str) -> Result<SemanticVersion> {
        let existing_version = parse_version(existing)?;
        let version = parse_version(raw_version)?;
        let reloaded = self.repository.transaction(package, |state| {
            let was_latest = state.latest() == Some(&existing_version);
            let old = state
                .remove(&existing_version)
                .ok_or_else(|| RegistryError::UnknownVersion {
                    package: package.to_string(),
                    version: existing.to_string(),
                })?;

            let record = PackageVersionRecord {
                version: version.clone(),
                sort_order: old.sort_order,
                downloads: old.downloads,
            };
            if !state.insert(record) {
                warn!(package, version = raw_version, "Rejected reload onto an existing version");
                return Err(RegistryError::DuplicateVersion {
                    package: package.to_string(),
                    version: raw_version.to_string(),
                });
            }
            if was_latest {
                state.set_latest(version.clone());
            }
            Ok(version)
        })?;

        info!(package, from = existing, to = %reloaded, "Reloaded version");
        Ok(reloaded)
    }

    /// Finds the stored version that is equal to the version in a URL path segment.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_registry::{InMemoryRepository, Publisher};
    /// let publisher = Publisher::new(InMemoryRepository::new());
    /// let _ = publisher.publish("foo", "1.2.3").unwrap();
    ///
    /// assert_eq!(publisher.resolve("foo", "01.02.03").unwrap().original(), "1.2.3");
    /// ```
    pub fn resolve(&self, package: &str, segment: &str) -> Result<SemanticVersion> {
        let version = parse_version(segment)?;
        self.repository
            .read(package, |state| state.record(&version).map(|r| r.version.clone()))?
            .ok_or_else(|| RegistryError::UnknownVersion {
                package: package.to_string(),
                version: segment.to_string(),
            })
    }

    /// All versions of `package`, highest sort order first.
    pub fn versions_descending(&self, package: &str) -> Result<Vec<PackageVersionRecord>> {
        let mut versions = self.repository.versions(package)?;
        versions.sort_by(|a, b| b.sort_order.cmp(&a.sort_order));
        Ok(versions)
    }

    /// Counts a download of the stored version equal to `version`.
    ///
    /// Returns the new download count of that version.
    pub fn record_download(&self, package: &str, version: &SemanticVersion) -> Result<u64> {
        self.repository.transaction(package, |state| {
            let record = state
                .record_mut(version)
                .ok_or_else(|| RegistryError::UnknownVersion {
                    package: package.to_string(),
                    version: version.to_string(),
                })?;
            record.downloads += 1;
            let downloads = record.downloads;
            state.count_download();
            Ok(downloads)
        })
    }

    /// The current latest version of `package`.
    pub fn latest(&self, package: &str) -> Result<Option<SemanticVersion>> {
        self.repository.get_latest(package)
    }
}

fn parse_version(raw: &str) -> Result<SemanticVersion> {
    SemanticVersion::parse(raw).map_err(|e| {
        warn!(input = raw, error = %e, "Rejected invalid version");
        RegistryError::InvalidVersion(e.owned())
    })
}

fn order_versions(package: &str, state: &mut PackageState) {
    state.compute_version_order();
    debug!(package, versions = state.versions().len(), "Computed version order");
}
