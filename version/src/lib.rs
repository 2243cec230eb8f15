//! Semantic version value type for the pub package registry.
//!
//! Companion version struct for the pub_semver_parser parser.
//! A [`SemanticVersion`] is immutable once constructed. It
//!  - keeps the verbatim input it was parsed from, see [`SemanticVersion::original`]
//!  - renders a canonical form without leading zeros, see [`SemanticVersion::canonical`]
//!  - is totally ordered according to the SemVer 2.0.0 precedence rules,
//!    with build metadata as the final tie-breaker.
#![deny(
    bad_style,
    dead_code,
    improper_ctypes,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    no_mangle_generic_items,
    non_shorthand_field_patterns,
    overflowing_literals,
    path_statements,
    patterns_in_fns_without_body,
    rust_2018_idioms,
    trivial_casts,
    trivial_numeric_casts,
    unconditional_recursion,
    unsafe_code,
    unused_allocation,
    unused_comparisons,
    unused_extern_crates,
    unused_import_braces,
    unused_parens,
    unused_qualifications,
    unused_results,
    unused,
    while_true
)]

use std::{
    cmp::Ordering,
    fmt::{self, Display, Write},
    hash,
};

mod metadata;
pub use metadata::{Build, Identifier, PreRelease};

#[cfg(all(test, feature = "parser"))]
mod properties;

/// Represents a semantic version number.
///
/// Two versions are equal when their numbers, pre-release and build identifiers are equal.
/// The original input is not considered for equality, ordering or hashing.
#[derive(Debug, Clone)]
pub struct SemanticVersion {
    major: u64,
    minor: u64,
    patch: u64,
    pre: PreRelease,
    build: Build,
    original: String,
}

impl SemanticVersion {
    /// Constructs a new version out of the three regular version components
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_version::SemanticVersion;
    /// let version = SemanticVersion::new(1, 2, 3);
    /// assert_eq!(version.to_string(), "1.2.3");
    /// assert_eq!(version.original(), "1.2.3");
    /// ```
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self::from_parts(major, minor, patch, PreRelease::empty(), Build::empty())
    }

    /// Constructs a version from all of its components.
    ///
    /// The original text is set to the canonical form.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_version::{Build, Identifier, PreRelease, SemanticVersion};
    /// let pre = vec![Identifier::AlphaNumeric("rc".into()), Identifier::Numeric(1)];
    /// let version = SemanticVersion::from_parts(1, 0, 0, pre.into(), Build::empty());
    /// assert_eq!(version.to_string(), "1.0.0-rc.1");
    /// ```
    pub fn from_parts(major: u64, minor: u64, patch: u64, pre: PreRelease, build: Build) -> Self {
        let mut version = Self {
            major,
            minor,
            patch,
            pre,
            build,
            original: String::new(),
        };
        version.original = version.canonical();
        version
    }

    /// Parse a string slice into a SemanticVersion.
    ///
    /// The complete input must be a valid semantic version, see [`pub_semver_parser`].
    /// Numbers with leading zeros are accepted and normalized.
    ///
    /// ## Examples
    ///
    /// ```rust
    /// # use pub_version::SemanticVersion;
    ///
    /// let version = SemanticVersion::parse("01.02.03-rc.01").unwrap();
    /// assert_eq!(version.canonical(), "1.2.3-rc.1");
    /// assert_eq!(version.original(), "01.02.03-rc.01");
    ///
    /// assert!(SemanticVersion::parse("1.0").is_err());
    /// ```
    #[cfg(feature = "parser")]
    pub fn parse(input: &str) -> Result<Self, pub_semver_parser::Error<'_>> {
        let mut version = pub_semver_parser::parse::<Parts>(input)?;
        version.original = input.to_string();
        Ok(version)
    }

    /// The major version.
    pub fn major(&self) -> u64 {
        self.major
    }

    /// The minor version.
    pub fn minor(&self) -> u64 {
        self.minor
    }

    /// The patch version.
    pub fn patch(&self) -> u64 {
        self.patch
    }

    /// The pre-release identifiers, empty if this is not a pre-release.
    pub fn pre_release(&self) -> &PreRelease {
        &self.pre
    }

    /// The build identifiers, empty if there is no build metadata.
    pub fn build(&self) -> &Build {
        &self.build
    }

    /// The text this version was parsed from, exactly as it was given.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Renders the canonical form of this version.
    ///
    /// This is the same as the [`Display`] output, without any formatting options.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_version::SemanticVersion;
    /// let version = SemanticVersion::parse("1.0.00+build.007").unwrap();
    /// assert_eq!(version.canonical(), "1.0.0+build.7");
    /// ```
    pub fn canonical(&self) -> String {
        self.to_string()
    }

    /// Returns true if this version has a pre-release.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_version::SemanticVersion;
    /// assert!(SemanticVersion::parse("1.0.0-alpha").unwrap().is_prerelease());
    /// assert!(!SemanticVersion::parse("1.0.0+alpha").unwrap().is_prerelease());
    /// ```
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_defined()
    }

    /// Returns true if this version is in its initial development phase, i.e. the major version is 0.
    ///
    /// ## Examples
    ///
    /// ```
    /// # use pub_version::SemanticVersion;
    /// assert!(SemanticVersion::new(0, 9, 0).in_initial_development());
    /// assert!(!SemanticVersion::new(1, 0, 0).in_initial_development());
    /// ```
    pub fn in_initial_development(&self) -> bool {
        self.major == 0
    }
}

#[cfg(feature = "parser")]
impl std::str::FromStr for SemanticVersion {
    type Err = pub_semver_parser::OwnedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).map_err(|e| e.owned())
    }
}

#[cfg(feature = "parser")]
impl<'input> std::convert::TryFrom<&'input str> for SemanticVersion {
    type Error = pub_semver_parser::Error<'input>;

    fn try_from(value: &'input str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut result = String::with_capacity(16);
        write!(result, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if self.pre.is_defined() {
            write!(result, "-{}", self.pre)?;
        }
        if self.build.is_defined() {
            write!(result, "+{}", self.build)?;
        }

        f.pad(result.as_ref())
    }
}

impl PartialEq for SemanticVersion {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.major == other.major
            && self.minor == other.minor
            && self.patch == other.patch
            && self.pre == other.pre
            && self.build == other.build
    }
}

impl Eq for SemanticVersion {}

impl PartialOrd for SemanticVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SemanticVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then_with(|| self.minor.cmp(&other.minor))
            .then_with(|| self.patch.cmp(&other.patch))
            .then_with(|| self.pre.cmp(&other.pre))
            .then_with(|| self.build.cmp(&other.build))
    }
}

impl hash::Hash for SemanticVersion {
    fn hash<H: hash::Hasher>(&self, into: &mut H) {
        self.major.hash(into);
        self.minor.hash(into);
        self.patch.hash(into);
        self.pre.hash(into);
        self.build.hash(into);
    }
}

/// Collects the parser output, the original input is attached afterwards.
#[cfg(feature = "parser")]
#[derive(Debug, Default)]
struct Parts {
    major: u64,
    minor: u64,
    patch: u64,
    pre: Vec<Identifier>,
    build: Vec<Identifier>,
}

#[cfg(feature = "parser")]
impl<'input> pub_semver_version_builder::VersionBuilder<'input> for Parts {
    type Out = SemanticVersion;

    fn new() -> Self {
        Parts::default()
    }

    fn set_major(&mut self, major: u64) {
        self.major = major;
    }

    fn set_minor(&mut self, minor: u64) {
        self.minor = minor;
    }

    fn set_patch(&mut self, patch: u64) {
        self.patch = patch;
    }

    fn add_pre_release_str(&mut self, identifier: &'input str) {
        self.pre.push(Identifier::AlphaNumeric(identifier.to_string()));
    }

    fn add_pre_release_num(&mut self, identifier: u64) {
        self.pre.push(Identifier::Numeric(identifier));
    }

    fn add_build_str(&mut self, identifier: &'input str) {
        self.build.push(Identifier::AlphaNumeric(identifier.to_string()));
    }

    fn add_build_num(&mut self, identifier: u64) {
        self.build.push(Identifier::Numeric(identifier));
    }

    fn build(self) -> Self::Out {
        SemanticVersion {
            major: self.major,
            minor: self.minor,
            patch: self.patch,
            pre: self.pre.into(),
            build: self.build.into(),
            original: String::new(),
        }
    }
}

#[cfg(all(feature = "serde", feature = "parser"))]
use serde::de::{self, Deserialize, Deserializer, Visitor};
#[cfg(feature = "serde")]
use serde::ser::{Serialize, Serializer};
#[cfg(feature = "serde")]
impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(all(feature = "serde", feature = "parser"))]
impl<'de> Deserialize<'de> for SemanticVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct VersionVisitor;

        impl<'de> Visitor<'de> for VersionVisitor {
            type Value = SemanticVersion;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str("a semantic version string")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                SemanticVersion::parse(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(VersionVisitor)
    }
}

#[cfg(feature = "semver")]
impl std::convert::TryFrom<&SemanticVersion> for semver::Version {
    type Error = semver::Error;

    fn try_from(v: &SemanticVersion) -> Result<Self, Self::Error> {
        let pre = if v.pre.is_defined() {
            semver::Prerelease::new(&v.pre.to_string())?
        } else {
            semver::Prerelease::EMPTY
        };
        let build = if v.build.is_defined() {
            semver::BuildMetadata::new(&v.build.to_string())?
        } else {
            semver::BuildMetadata::EMPTY
        };
        Ok(semver::Version {
            major: v.major,
            minor: v.minor,
            patch: v.patch,
            pre,
            build,
        })
    }
}
