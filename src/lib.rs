//! Semantic Versions for the pub package registry.
//!
//! ## Motivation
//!
//! Every uploaded package carries a version string in its manifest, and every package page
//! is addressed by a version in the URL. This crate turns those strings into [`SemanticVersion`]s
//! and decides which of them is advertised as the latest version of a package.
//!
//! Versions follow [Semantic Versioning 2.0.0](https://semver.org) with a strict grammar:
//!
//! - `MAJOR.MINOR.PATCH` are required; leading zeros are accepted and normalized away
//!   (e.g. "01.02.03" is the same version as "1.2.3")
//! - an optional pre-release (`-alpha.1`) and an optional build metadata (`+build.5`),
//!   both made of dot-separated identifiers of ASCII letters, digits and hyphens
//! - nothing else: no leading `v`, no surrounding whitespace, no missing components
//!
//! Versions are ordered by SemVer precedence, and build metadata breaks ties last.
//!
//! ## Examples
//!
//! ```rust
//! let version = pub_semver::parse("1.0.0-rc.1+build.1").unwrap();
//! assert!(version.is_prerelease());
//! assert!(version < pub_semver::parse("1.0.0").unwrap());
//!
//! assert_eq!(pub_semver::parse("01.02.03").unwrap().canonical(), "1.2.3");
//!
//! let error = pub_semver::parse("1.3+build").unwrap_err();
//! assert_eq!(
//!     error.to_string(),
//!     r#""1.3+build" is not a valid semantic version: Unexpected `+`"#
//! );
//! ```
//!
//! Custom version representations can be built with the [`VersionBuilder`] trait and [`parse_into`].
//!
//! ## Latest version
//!
//! With the default `registry` feature, [`should_update_latest`] and [`Publisher`]
//! implement the latest version policy: releases always win over pre-releases,
//! otherwise the higher precedence wins.
//!
//! ```rust
//! use pub_semver::{parse, should_update_latest};
//!
//! let current = parse("1.2.0").unwrap();
//! assert!(!should_update_latest(Some(&current), &parse("1.2.3-pre9").unwrap()));
//! assert!(should_update_latest(Some(&current), &parse("1.2.1").unwrap()));
//! ```
//!
//! ## Features
//!
//! - `registry` (default): re-exports the latest version policy from `pub_registry`
//! - `version_serde`: serializes versions as their canonical string
//! - `version_semver`: converts versions into [`semver::Version`](https://docs.rs/semver/1/semver/struct.Version.html)
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

pub use pub_semver_parser::{is_valid, Error, ErrorKind, OwnedError, VersionBuilder};
pub use pub_version::{Build, Identifier, PreRelease, SemanticVersion};

#[cfg(feature = "registry")]
pub use pub_registry::{
    select_latest, should_update_latest, InMemoryRepository, PackageState, PackageVersionRecord,
    PublishOutcome, Publisher, RegistryError, VersionRepository,
};

/// Parse a string slice into a [`SemanticVersion`].
///
/// ## Examples
///
/// ```rust
/// let version = pub_semver::parse("1.2.3-beta.2").unwrap();
/// assert_eq!(version.pre_release().to_string(), "beta.2");
///
/// let error = pub_semver::parse("1.2.3.4").unwrap_err();
/// assert_eq!(error.error_kind(), pub_semver::ErrorKind::UnexpectedInput);
/// assert_eq!(error.erroneous_input(), ".");
/// ```
pub fn parse(input: &str) -> Result<SemanticVersion, Error<'_>> {
    SemanticVersion::parse(input)
}

/// Parse a string slice into any type that implements [`VersionBuilder`].
///
/// ## Examples
///
/// ```rust
/// use pub_semver::VersionBuilder;
///
/// #[derive(Debug, Default)]
/// struct Numbers([u64; 3]);
///
/// impl VersionBuilder<'_> for Numbers {
///     type Out = [u64; 3];
///
///     fn new() -> Self {
///         Self::default()
///     }
///
///     fn set_major(&mut self, major: u64) {
///         self.0[0] = major;
///     }
///
///     fn set_minor(&mut self, minor: u64) {
///         self.0[1] = minor;
///     }
///
///     fn set_patch(&mut self, patch: u64) {
///         self.0[2] = patch;
///     }
///
///     fn build(self) -> Self::Out {
///         self.0
///     }
/// }
///
/// assert_eq!(pub_semver::parse_into::<Numbers>("1.3.37-alpha+build"), Ok([1, 3, 37]));
/// ```
pub fn parse_into<'input, V>(input: &'input str) -> Result<V::Out, Error<'input>>
where
    V: VersionBuilder<'input>,
{
    pub_semver_parser::parse::<V>(input)
}

#[cfg(test)]
mod tests;
