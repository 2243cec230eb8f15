//! VersionBuilder trait for the pub registry Semantic Version parser.
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

/// Trait to abstract over version building.
///
/// The methods to implement in this trait represent the components of a
/// `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` version,
/// but allow for parsing into a custom type.
///
/// The parser has already classified every pre-release and build identifier:
/// identifiers made only of ASCII digits arrive as numbers (with any leading zeroes removed),
/// everything else arrives as the original string slice.
///
/// The trait is generic over the lifetime of the input string, so that one could
/// parse into a version without having to allocate.
///
/// Most methods have a default implementation that does nothing and ignores the input.
/// This can be used to implement some form of validation without needing to keep the result.
pub trait VersionBuilder<'input> {
    /// The return type of the final version.
    type Out;

    /// Construct a new version builder.
    ///
    /// The function must not fail and the version (if returned from [`VersionBuilder::build`] at this point)
    /// should represent something akin to "0.0.0"
    fn new() -> Self;

    /// Set the major version component.
    ///
    /// Called exactly once for every successfully parsed version.
    #[allow(unused)]
    fn set_major(&mut self, major: u64) {}

    /// Set the minor version component.
    ///
    /// Called exactly once for every successfully parsed version.
    #[allow(unused)]
    fn set_minor(&mut self, minor: u64) {}

    /// Set the patch version component.
    ///
    /// Called exactly once for every successfully parsed version.
    #[allow(unused)]
    fn set_patch(&mut self, patch: u64) {}

    /// Add an alpha-numeric pre-release identifier.
    ///
    /// The identifier consists of ASCII letters, digits, and hyphens and contains at least one non-digit.
    ///
    /// This method might be called multiple times, once per dot-separated identifier.
    #[allow(unused)]
    fn add_pre_release_str(&mut self, pre_release: &'input str) {}

    /// Add a numeric pre-release identifier.
    ///
    /// This method might be called multiple times, once per dot-separated identifier.
    #[allow(unused)]
    fn add_pre_release_num(&mut self, pre_release: u64) {}

    /// Add an alpha-numeric build identifier.
    ///
    /// This method might be called multiple times, once per dot-separated identifier.
    #[allow(unused)]
    fn add_build_str(&mut self, build: &'input str) {}

    /// Add a numeric build identifier.
    ///
    /// This method might be called multiple times, once per dot-separated identifier.
    #[allow(unused)]
    fn add_build_num(&mut self, build: u64) {}

    /// Construct the final version.
    fn build(self) -> Self::Out;
}

#[cfg(feature = "semver")]
impl<'input> VersionBuilder<'input> for semver::Version {
    type Out = Self;

    fn new() -> Self {
        semver::Version::new(0, 0, 0)
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

    fn add_pre_release_str(&mut self, pre_release: &'input str) {
        let pre = append_identifier(self.pre.as_str(), pre_release);
        self.pre = semver::Prerelease::new(&pre).expect("parser emits only valid identifiers");
    }

    fn add_pre_release_num(&mut self, pre_release: u64) {
        let pre = append_identifier(self.pre.as_str(), pre_release);
        self.pre = semver::Prerelease::new(&pre).expect("parser emits only valid identifiers");
    }

    fn add_build_str(&mut self, build: &'input str) {
        let build = append_identifier(self.build.as_str(), build);
        self.build = semver::BuildMetadata::new(&build).expect("parser emits only valid identifiers");
    }

    fn add_build_num(&mut self, build: u64) {
        let build = append_identifier(self.build.as_str(), build);
        self.build = semver::BuildMetadata::new(&build).expect("parser emits only valid identifiers");
    }

    fn build(self) -> Self::Out {
        self
    }
}

/// Joins a new identifier onto a dot-separated identifier list.
#[cfg(feature = "semver")]
fn append_identifier(existing: &str, identifier: impl std::fmt::Display) -> String {
    if existing.is_empty() {
        identifier.to_string()
    } else {
        format!("{}.{}", existing, identifier)
    }
}
