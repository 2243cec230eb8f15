use pub_version::SemanticVersion;

/// Decides whether `candidate` should replace `current` as the latest version of a package.
///
/// - The first version of a package always becomes the latest.
/// - A release always replaces a pre-release, and a pre-release never replaces a release,
///   regardless of their precedence.
/// - Otherwise the candidate wins if it has a higher precedence.
///
/// Applying this to every upload converges to the release with the highest precedence,
/// or to the pre-release with the highest precedence if there is no release,
/// independent of the order of the uploads.
///
/// ## Examples
///
/// ```
/// # use pub_registry::should_update_latest;
/// # use pub_version::SemanticVersion;
/// let release = SemanticVersion::parse("1.2.0").unwrap();
/// let pre_release = SemanticVersion::parse("1.2.3-pre9").unwrap();
///
/// assert!(should_update_latest(None, &pre_release));
/// assert!(should_update_latest(Some(&pre_release), &release));
/// assert!(!should_update_latest(Some(&release), &pre_release));
/// ```
pub fn should_update_latest(current: Option<&SemanticVersion>, candidate: &SemanticVersion) -> bool {
    let current = match current {
        Some(current) => current,
        None => return true,
    };
    let was_prerelease = current.is_prerelease();
    if was_prerelease != candidate.is_prerelease() {
        return was_prerelease;
    }
    current < candidate
}

/// Replays [`should_update_latest`] over the versions in the given order
/// and returns the version that ends up as the latest.
pub fn select_latest<'a, I>(versions: I) -> Option<&'a SemanticVersion>
where
    I: IntoIterator<Item = &'a SemanticVersion>,
{
    versions.into_iter().fold(None, |latest, candidate| {
        if should_update_latest(latest, candidate) {
            Some(candidate)
        } else {
            latest
        }
    })
}
