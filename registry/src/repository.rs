use crate::error::{RegistryError, Result};
use pub_version::SemanticVersion;
use std::{
    collections::HashMap,
    sync::{Mutex, MutexGuard},
};

/// A stored version of a package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageVersionRecord {
    /// The version.
    pub version: SemanticVersion,
    /// The zero-based rank of the version in ascending precedence among all versions of its package.
    pub sort_order: usize,
    /// How often this version was downloaded.
    pub downloads: u64,
}

impl PackageVersionRecord {
    /// Creates a record for a freshly published version.
    pub fn new(version: SemanticVersion) -> Self {
        Self {
            version,
            sort_order: 0,
            downloads: 0,
        }
    }
}

/// Everything the registry tracks for a single package.
///
/// The state is only ever modified within [`VersionRepository::transaction`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageState {
    versions: Vec<PackageVersionRecord>,
    latest: Option<SemanticVersion>,
    downloads: u64,
}

impl PackageState {
    /// The current latest version, if the package has any versions.
    pub fn latest(&self) -> Option<&SemanticVersion> {
        self.latest.as_ref()
    }

    /// Points the latest version to the given version.
    pub fn set_latest(&mut self, version: SemanticVersion) {
        self.latest = Some(version);
    }

    /// All stored versions, in the order they were inserted or last sorted.
    pub fn versions(&self) -> &[PackageVersionRecord] {
        &self.versions
    }

    /// Returns true if no version is stored.
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Returns true if a version equal to the given one is stored.
    pub fn contains(&self, version: &SemanticVersion) -> bool {
        self.record(version).is_some()
    }

    /// The record of the version equal to the given one.
    pub fn record(&self, version: &SemanticVersion) -> Option<&PackageVersionRecord> {
        self.versions.iter().find(|r| &r.version == version)
    }

    /// The mutable record of the version equal to the given one.
    pub fn record_mut(&mut self, version: &SemanticVersion) -> Option<&mut PackageVersionRecord> {
        self.versions.iter_mut().find(|r| &r.version == version)
    }

    /// Stores a record.
    ///
    /// Returns false and leaves the state untouched if an equal version is already stored.
    pub fn insert(&mut self, record: PackageVersionRecord) -> bool {
        if self.contains(&record.version) {
            return false;
        }
        self.versions.push(record);
        true
    }

    /// Removes the record of the version equal to the given one.
    ///
    /// The latest pointer is cleared if it pointed to the removed version.
    pub fn remove(&mut self, version: &SemanticVersion) -> Option<PackageVersionRecord> {
        let index = self.versions.iter().position(|r| &r.version == version)?;
        if self.latest.as_ref() == Some(version) {
            self.latest = None;
        }
        Some(self.versions.remove(index))
    }

    /// Sorts all versions in ascending precedence and assigns their sort order.
    pub fn compute_version_order(&mut self) {
        self.versions.sort_by(|a, b| a.version.cmp(&b.version));
        for (index, record) in self.versions.iter_mut().enumerate() {
            record.sort_order = index;
        }
    }

    /// Total downloads over all versions of the package.
    pub fn downloads(&self) -> u64 {
        self.downloads
    }

    /// Counts one download of the package, the version counter is maintained by the caller.
    pub fn count_download(&mut self) {
        self.downloads += 1;
    }
}

/// Storage for package versions and their latest pointer.
///
/// Implementations must run every [`transaction`](VersionRepository::transaction) atomically
/// with respect to other transactions on the same package, and must discard all changes
/// made by a transaction that returns an error.
pub trait VersionRepository {
    /// Runs `f` on the state of `package`, an unknown package starts out empty.
    fn transaction<T, F>(&self, package: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut PackageState) -> Result<T>;

    /// Runs `f` on a consistent view of the state of `package`.
    ///
    /// Fails with [`RegistryError::UnknownPackage`] if the package has no versions.
    fn read<T, F>(&self, package: &str, f: F) -> Result<T>
    where
        F: FnOnce(&PackageState) -> T;

    /// The current latest version of `package`.
    fn get_latest(&self, package: &str) -> Result<Option<SemanticVersion>> {
        match self.read(package, |state| state.latest().cloned()) {
            Err(RegistryError::UnknownPackage(_)) => Ok(None),
            result => result,
        }
    }

    /// Points the latest version of `package` to the stored version equal to `version`.
    fn set_latest(&self, package: &str, version: &SemanticVersion) -> Result<()> {
        self.transaction(package, |state| {
            let stored = state
                .record(version)
                .map(|record| record.version.clone())
                .ok_or_else(|| RegistryError::UnknownVersion {
                    package: package.to_string(),
                    version: version.to_string(),
                })?;
            state.set_latest(stored);
            Ok(())
        })
    }

    /// A snapshot of all stored versions of `package`.
    fn versions(&self, package: &str) -> Result<Vec<PackageVersionRecord>> {
        self.read(package, |state| state.versions().to_vec())
    }
}

/// A [`VersionRepository`] that keeps everything in memory behind a single lock.
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    packages: Mutex<HashMap<String, PackageState>>,
}

impl InMemoryRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// The names of all packages with at least one version, sorted by name.
    pub fn packages(&self) -> Result<Vec<String>> {
        let packages = self.lock()?;
        let mut names = packages.keys().cloned().collect::<Vec<_>>();
        names.sort();
        Ok(names)
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, PackageState>>> {
        self.packages.lock().map_err(|_| RegistryError::LockPoisoned)
    }
}

impl VersionRepository for InMemoryRepository {
    fn transaction<T, F>(&self, package: &str, f: F) -> Result<T>
    where
        F: FnOnce(&mut PackageState) -> Result<T>,
    {
        let mut packages = self.lock()?;
        let mut state = packages.get(package).cloned().unwrap_or_default();
        let result = f(&mut state)?;
        if state.is_empty() {
            let _ = packages.remove(package);
        } else {
            let _ = packages.insert(package.to_string(), state);
        }
        Ok(result)
    }

    fn read<T, F>(&self, package: &str, f: F) -> Result<T>
    where
        F: FnOnce(&PackageState) -> T,
    {
        let packages = self.lock()?;
        packages
            .get(package)
            .map(f)
            .ok_or_else(|| RegistryError::UnknownPackage(package.to_string()))
    }
}
