use pub_registry::select_latest;
use pub_semver_parser::parse;
use pub_version::{Build, Identifier, PreRelease, SemanticVersion};
use regex::Regex;
use semver::Version;

const INPUT_S: &str = "1.0.0";
const INPUT_XL: &str = "01.2.3-1.alpha1.9+build5.7.3aedf.01337";
pub const INPUTS: [&str; 2] = [INPUT_S, INPUT_XL];

/// Uploads of a package with a few release lines and pre-releases, in upload order.
pub fn upload_history() -> Vec<SemanticVersion> {
    let mut uploads = Vec::with_capacity(200);
    for major in 0..4 {
        for minor in 0..10 {
            for pre in &["-dev", "-beta.1", "-beta.11", "-rc.1", ""] {
                let input = format!("{}.{}.0{}", major, minor, pre);
                uploads.push(pub_version(&input));
            }
        }
    }
    uploads
}

#[inline(always)]
pub fn pub_version(input: &str) -> SemanticVersion {
    SemanticVersion::parse(input).unwrap()
}

#[inline(always)]
pub fn pub_semver(input: &str) -> Version {
    parse::<Version>(input).unwrap()
}

#[inline(always)]
pub fn semver(input: &str) -> Version {
    Version::parse(input).unwrap()
}

#[inline(always)]
pub fn regex(re: &Regex, input: &str) -> SemanticVersion {
    regex_parser(re, input).unwrap()
}

#[inline(always)]
pub fn latest(uploads: &[SemanticVersion]) -> &SemanticVersion {
    select_latest(uploads).unwrap()
}

/// The grammar as a single case-insensitive regular expression, for comparison with the parser.
pub fn parsing_regex() -> Regex {
    Regex::new(r"(?xi)
      ^
      ([0-9]+)\.([0-9]+)\.([0-9]+)
      (?:-([0-9a-z-]+(?:\.[0-9a-z-]+)*))?
      (?:\+([0-9a-z-]+(?:\.[0-9a-z-]+)*))?
      $
    ").unwrap()
}

pub fn regex_parser(re: &Regex, input: &str) -> Option<SemanticVersion> {
    let caps = re.captures(input)?;

    fn split(identifiers: &str) -> Vec<Identifier> {
        identifiers
            .split('.')
            .map(|id| match id.parse::<u64>() {
                Ok(num) => Identifier::Numeric(num),
                Err(_) => Identifier::AlphaNumeric(id.into()),
            })
            .collect()
    }

    let pre = caps
        .get(4)
        .map_or_else(PreRelease::empty, |pre| split(pre.as_str()).into());
    let build = caps
        .get(5)
        .map_or_else(Build::empty, |build| split(build.as_str()).into());

    Some(SemanticVersion::from_parts(
        caps.get(1)?.as_str().parse().ok()?,
        caps.get(2)?.as_str().parse().ok()?,
        caps.get(3)?.as_str().parse().ok()?,
        pre,
        build,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn expected_xl() -> Version {
        Version {
            major: 1,
            minor: 2,
            patch: 3,
            pre: semver::Prerelease::new("1.alpha1.9").unwrap(),
            build: semver::BuildMetadata::new("build5.7.3aedf.1337").unwrap(),
        }
    }

    #[test_case(INPUT_S => Version::new(1, 0, 0))]
    #[test_case(INPUT_XL => expected_xl())]
    fn test_pub_semver(input: &str) -> Version {
        pub_semver(input)
    }

    #[test]
    fn test_semver() {
        assert_eq!(semver(INPUT_S), Version::new(1, 0, 0));
    }

    #[test_case(INPUT_S)]
    #[test_case(INPUT_XL)]
    #[test_case("1.0.0-RC.1+Build")]
    fn test_regex_agrees_with_parser(input: &str) {
        let re = parsing_regex();
        assert_eq!(regex(&re, input), pub_version(input));
    }

    #[test_case("1.0")]
    #[test_case("1.2.3.4")]
    #[test_case("1234")]
    #[test_case("-2.3.4")]
    #[test_case("1.3-pre")]
    #[test_case("1.3+build")]
    #[test_case("1.3+bu?!3ild")]
    fn test_regex_rejects(input: &str) {
        let re = parsing_regex();
        assert_eq!(regex_parser(&re, input), None);
        assert!(SemanticVersion::parse(input).is_err());
    }

    #[test]
    fn test_latest() {
        let uploads = upload_history();
        assert_eq!(uploads.len(), 200);
        assert_eq!(latest(&uploads).to_string(), "3.9.0");
    }
}
