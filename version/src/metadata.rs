use std::{
    cmp::Ordering,
    fmt::{self, Display, Write},
    iter::FromIterator,
    ops::Deref,
};

/// A single dot-separated identifier of the pre-release or build metadata.
///
/// Numeric identifiers always have lower precedence than alpha-numeric identifiers.
/// The variants are declared in that order, so the derived [`Ord`] compares the variant first
/// and only then the values: numbers numerically, strings lexically in ASCII sort order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Identifier {
    /// An identifier consisting only of ASCII digits.
    Numeric(u64),
    /// An identifier with at least one ASCII letter or hyphen.
    AlphaNumeric(String),
}

impl Identifier {
    /// Returns true if this is a [`Identifier::Numeric`].
    pub fn is_numeric(&self) -> bool {
        matches!(self, Identifier::Numeric(_))
    }
}

impl From<u64> for Identifier {
    fn from(num: u64) -> Self {
        Identifier::Numeric(num)
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(num) => Display::fmt(num, f),
            Identifier::AlphaNumeric(s) => f.pad(s),
        }
    }
}

/// The pre-release segment of a semantic Version.
///
/// An empty segment means the version is not a pre-release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct PreRelease {
    identifiers: Vec<Identifier>,
}

impl PreRelease {
    /// Constructs an empty pre-release segment
    pub const fn empty() -> Self {
        Self {
            identifiers: Vec::new(),
        }
    }

    /// Returns true if the pre-release segment is missing
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Returns true if the pre-release is defined
    pub fn is_defined(&self) -> bool {
        !self.is_empty()
    }

    /// Returns an iterator over the identifiers
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> + '_ {
        self.identifiers.iter()
    }
}

impl Deref for PreRelease {
    type Target = [Identifier];

    fn deref(&self) -> &Self::Target {
        &self.identifiers[..]
    }
}

impl FromIterator<Identifier> for PreRelease {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        Self {
            identifiers: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Identifier>> for PreRelease {
    fn from(identifiers: Vec<Identifier>) -> Self {
        Self { identifiers }
    }
}

impl PartialOrd for PreRelease {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PreRelease {
    /// A release (no pre-release) has a higher precedence than any pre-release.
    /// Otherwise identifiers are compared pairwise, and a larger set of fields has a
    /// higher precedence than a smaller set, if all of the preceding identifiers are equal.
    /// Example: 1.0.0-alpha < 1.0.0-alpha.1 < 1.0.0-alpha.beta < 1.0.0-beta < 1.0.0-beta.2 < 1.0.0-beta.11 < 1.0.0-rc.1 < 1.0.0.
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.is_empty(), other.is_empty()) {
            (true, true) => Ordering::Equal,
            (true, false) => Ordering::Greater,
            (false, true) => Ordering::Less,
            (false, false) => self.identifiers.cmp(&other.identifiers),
        }
    }
}

impl Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&join(&self.identifiers)?)
    }
}

/// The build segment of a semantic Version.
///
/// Build metadata takes part in equality and breaks ties last when ordering:
/// no build metadata sorts before any build metadata, and two build segments
/// compare like pre-release identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Build {
    identifiers: Vec<Identifier>,
}

impl Build {
    /// Constructs an empty build segment
    pub const fn empty() -> Self {
        Self {
            identifiers: Vec::new(),
        }
    }

    /// Returns true if the build segment is missing
    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Returns true if the build is defined
    pub fn is_defined(&self) -> bool {
        !self.is_empty()
    }

    /// Returns an iterator over the identifiers
    pub fn iter(&self) -> impl Iterator<Item = &Identifier> + '_ {
        self.identifiers.iter()
    }
}

impl Deref for Build {
    type Target = [Identifier];

    fn deref(&self) -> &Self::Target {
        &self.identifiers[..]
    }
}

impl FromIterator<Identifier> for Build {
    fn from_iter<T: IntoIterator<Item = Identifier>>(iter: T) -> Self {
        Self {
            identifiers: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Identifier>> for Build {
    fn from(identifiers: Vec<Identifier>) -> Self {
        Self { identifiers }
    }
}

impl Display for Build {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&join(&self.identifiers)?)
    }
}

fn join(identifiers: &[Identifier]) -> Result<String, fmt::Error> {
    let mut result = String::new();
    for (i, identifier) in identifiers.iter().enumerate() {
        if i > 0 {
            result.push('.');
        }
        write!(result, "{}", identifier)?;
    }
    Ok(result)
}
