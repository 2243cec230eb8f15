use super::SemanticVersion;
use proptest::prelude::*;
use std::{cmp::Ordering, collections::hash_map::DefaultHasher, hash::Hasher};

fn identifier() -> impl Strategy<Value = String> {
    prop_oneof!["[0-9]{1,5}", "0[0-9]{1,3}", "[0-9A-Za-z-]{1,8}"]
}

fn identifiers() -> impl Strategy<Value = Option<String>> {
    prop::option::of(prop::collection::vec(identifier(), 1..4).prop_map(|ids| ids.join(".")))
}

fn version_string() -> impl Strategy<Value = String> {
    ("[0-9]{1,4}", "[0-9]{1,4}", "[0-9]{1,4}", identifiers(), identifiers()).prop_map(
        |(major, minor, patch, pre, build)| {
            let mut version = format!("{}.{}.{}", major, minor, patch);
            if let Some(pre) = pre {
                version.push('-');
                version.push_str(&pre);
            }
            if let Some(build) = build {
                version.push('+');
                version.push_str(&build);
            }
            version
        },
    )
}

fn version() -> impl Strategy<Value = SemanticVersion> {
    version_string().prop_map(|v| SemanticVersion::parse(&v).unwrap())
}

fn hash_of(version: &SemanticVersion) -> u64 {
    let mut hasher = DefaultHasher::new();
    std::hash::Hash::hash(version, &mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn parses_every_generated_version(input in version_string()) {
        let version = SemanticVersion::parse(&input);
        prop_assert!(version.is_ok(), "{:?} did not parse", input);
        let version = version.unwrap();
        prop_assert_eq!(version.original(), input.as_str());
    }

    #[test]
    fn canonical_form_round_trips(v in version()) {
        let canonical = v.canonical();
        let reparsed = SemanticVersion::parse(&canonical).unwrap();
        prop_assert_eq!(&reparsed, &v);
        prop_assert_eq!(reparsed.canonical(), canonical);
    }

    #[test]
    fn ordering_is_antisymmetric(a in version(), b in version()) {
        prop_assert_eq!(a.cmp(&b), b.cmp(&a).reverse());
        prop_assert_eq!(a == b, a.cmp(&b) == Ordering::Equal);
    }

    #[test]
    fn ordering_is_transitive(a in version(), b in version(), c in version()) {
        if a < b && b < c {
            prop_assert!(a < c);
        }
        if a <= b && b <= c {
            prop_assert!(a <= c);
        }
    }

    #[test]
    fn sorting_yields_a_chain(mut versions in prop::collection::vec(version(), 1..16)) {
        versions.sort();
        for window in versions.windows(2) {
            prop_assert!(window[0] <= window[1]);
        }
        for (i, lhs) in versions.iter().enumerate() {
            for rhs in &versions[i..] {
                prop_assert!(lhs <= rhs, "{} <= {} was violated", lhs, rhs);
            }
        }
    }

    #[test]
    fn equal_versions_hash_equal(a in version(), b in version()) {
        if a == b {
            prop_assert_eq!(hash_of(&a), hash_of(&b));
        }
        prop_assert_eq!(hash_of(&a), hash_of(&SemanticVersion::parse(&a.canonical()).unwrap()));
    }

    #[test]
    fn prerelease_sorts_below_its_release(major in 0_u64..100, minor in 0_u64..100, patch in 0_u64..100, pre in "[0-9A-Za-z-]{1,8}") {
        let release = SemanticVersion::new(major, minor, patch);
        let pre_release = SemanticVersion::parse(&format!("{}-{}", release, pre)).unwrap();
        prop_assert!(pre_release.is_prerelease());
        prop_assert!(pre_release < release);
    }

    #[test]
    fn leading_zeros_are_normalized(major in 0_u64..1000, minor in 0_u64..1000, patch in 0_u64..1000) {
        let padded = SemanticVersion::parse(&format!("{:04}.{:03}.{:05}", major, minor, patch)).unwrap();
        prop_assert_eq!(padded.canonical(), format!("{}.{}.{}", major, minor, patch));
        prop_assert_eq!(padded, SemanticVersion::new(major, minor, patch));
    }
}
