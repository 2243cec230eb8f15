//! These tests are replicated in the crate documentation as a doc test
//! Please try to keep them in sync

mod custom_test {
    use crate::VersionBuilder;

    /// Simpler version struct that lives only on the stack
    #[derive(Debug, Default)]
    struct MyVersion {
        numbers: [u64; 3],
        pre_release_numbers: usize,
        is_pre_release: bool,
    }

    /// The VersionBuilder trait is generic over the lifetime of the input string.
    /// We don't store references to those strings, so we don't care about the specific lifetime.
    impl VersionBuilder<'_> for MyVersion {
        type Out = Self;

        fn new() -> Self {
            Self::default()
        }

        fn build(self) -> Self::Out {
            self
        }

        fn set_major(&mut self, major: u64) {
            self.numbers[0] = major;
        }

        fn set_minor(&mut self, minor: u64) {
            self.numbers[1] = minor;
        }

        fn set_patch(&mut self, patch: u64) {
            self.numbers[2] = patch;
        }

        /// Alpha-numeric identifiers arrive as the original string slice.
        fn add_pre_release_str(&mut self, _pre_release: &str) {
            self.is_pre_release = true;
        }

        /// Numeric identifiers have already been parsed.
        fn add_pre_release_num(&mut self, _pre_release: u64) {
            self.is_pre_release = true;
            self.pre_release_numbers += 1;
        }
    }

    #[test]
    fn test_custom_version_builder() {
        let input = "1.3.37-alpha.21.007+build.42";

        let my_version = crate::parse_into::<MyVersion>(input).unwrap();

        assert_eq!([1, 3, 37], my_version.numbers);
        assert!(my_version.is_pre_release);
        assert_eq!(my_version.pre_release_numbers, 2);
    }

    #[test]
    fn test_custom_version_builder_errors() {
        let error = crate::parse_into::<MyVersion>("1.3.37.1").unwrap_err();
        assert_eq!(error.error_kind(), crate::ErrorKind::UnexpectedInput);
        assert_eq!(error.error_span(), 6..7);
    }
}

mod builder_as_validation_test {

    //! This test is replicated in the crate documentation as a doc test
    //! Please try to keep them in sync

    use crate::VersionBuilder;

    /// newtype around bool, so we can implement the VersionBuilder trait for it
    #[derive(Debug, Default)]
    struct IsPreRelease(bool);

    impl VersionBuilder<'_> for IsPreRelease {
        /// Here we parse into a different value than Self
        type Out = bool;

        fn new() -> Self {
            Self::default()
        }

        fn build(self) -> Self::Out {
            self.0
        }

        fn add_pre_release_str(&mut self, _pre_release: &str) {
            self.0 = true;
        }

        fn add_pre_release_num(&mut self, _pre_release: u64) {
            self.0 = true;
        }
    }

    /// This method also return false for invalid version strings,
    /// which is technically true, as those are not pre-release versions.
    fn is_pre_release(v: &str) -> bool {
        crate::parse_into::<IsPreRelease>(v).unwrap_or_default()
    }

    #[test]
    fn test_custom_version_validation() {
        assert!(is_pre_release("1.2.3-pre"));
        assert!(is_pre_release("1.2.3-0"));
        assert!(!is_pre_release("1.2.3"));
        assert!(!is_pre_release("1.2.3+build"));
        assert!(!is_pre_release("1.3-pre"));
    }

    #[test]
    fn test_is_valid() {
        assert!(crate::is_valid("1.2.3-pre+build"));
        assert!(!crate::is_valid("1234"));
    }
}

mod version_test {

    use crate::SemanticVersion;

    #[test]
    fn test_version() {
        let input = "01.3.37-beta.021+build.42";
        // make an owned copy, so we don't cheat by using the 'static lifetime.
        let input = String::from(input);
        let version = crate::parse(&input).unwrap();
        drop(input);

        assert_eq!(version.major(), 1);
        assert_eq!(version.canonical(), "1.3.37-beta.21+build.42");
        assert_eq!(version.original(), "01.3.37-beta.021+build.42");
        assert_eq!(version, "1.3.37-beta.21+build.42".parse::<SemanticVersion>().unwrap());
    }

    #[test]
    fn test_owned_error() {
        let input = String::from("1.3+bu?!3ild");
        let error = crate::parse(&input).unwrap_err().owned();
        drop(input);

        assert_eq!(error.input(), "1.3+bu?!3ild");
        assert_eq!(error.error_kind(), crate::ErrorKind::UnexpectedInput);
    }
}

#[cfg(feature = "registry")]
mod registry_test {

    use crate::{parse, should_update_latest, InMemoryRepository, Publisher};

    #[test]
    fn test_latest_policy() {
        assert!(should_update_latest(None, &parse("0.0.1").unwrap()));

        let publisher = Publisher::new(InMemoryRepository::new());
        for upload in &["1.2.3", "1.2.4", "1.2.2"] {
            let _ = publisher.publish("foo", upload).unwrap();
        }
        assert_eq!(publisher.latest("foo"), Ok(Some(parse("1.2.4").unwrap())));
    }
}

mod serde_test {

    use crate::SemanticVersion;
    use serde::{Deserialize, Serialize};

    /// The subset of a package manifest that carries the version.
    #[derive(Debug, Serialize, Deserialize)]
    struct Pubspec {
        name: String,
        version: SemanticVersion,
    }

    #[test]
    fn test_deserialize_manifest() {
        let pubspec: Pubspec =
            serde_json::from_str(r#"{"name": "foo", "version": "01.2.3-dev+1"}"#).unwrap();
        assert_eq!(pubspec.name, "foo");
        assert_eq!(pubspec.version.to_string(), "1.2.3-dev+1");
        assert_eq!(pubspec.version.original(), "01.2.3-dev+1");
        assert!(pubspec.version.is_prerelease());

        assert_eq!(
            serde_json::to_string(&pubspec).unwrap(),
            r#"{"name":"foo","version":"1.2.3-dev+1"}"#
        );
    }

    #[test]
    fn test_deserialize_invalid_manifest() {
        let error = serde_json::from_str::<Pubspec>(r#"{"name": "foo", "version": "1.0"}"#)
            .unwrap_err();
        assert!(error
            .to_string()
            .contains("\"1.0\" is not a valid semantic version"));
    }
}
