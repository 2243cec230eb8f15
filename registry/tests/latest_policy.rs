use proptest::prelude::*;
use pub_registry::{select_latest, InMemoryRepository, Publisher};
use pub_version::SemanticVersion;
use std::{sync::Arc, thread};
use test_case::test_case;

fn v(input: &str) -> SemanticVersion {
    SemanticVersion::parse(input).unwrap()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn expected_latest(versions: &[SemanticVersion]) -> Option<&SemanticVersion> {
    let releases = versions.iter().filter(|v| !v.is_prerelease()).max();
    releases.or_else(|| versions.iter().max())
}

#[test_case(&["0.0.1"], "0.0.1"; "first upload")]
#[test_case(&["1.2.3-pre2", "1.2.0", "1.2.3-pre9"], "1.2.0"; "release beats pre releases")]
#[test_case(&["1.2.3", "1.2.4", "1.2.2"], "1.2.4"; "monotonic releases")]
#[test_case(&["1.2.3-pre1", "1.2.3-pre0", "1.2.3-pre2"], "1.2.3-pre2"; "pre release contention")]
#[test_case(&["2.0.0-rc.1", "1.0.0+build", "1.0.0"], "1.0.0+build"; "build metadata")]
fn test_publish_sequence(uploads: &[&str], expected: &str) {
    init_tracing();
    let publisher = Publisher::new(InMemoryRepository::new());
    for upload in uploads {
        let _ = publisher.publish("pkg", upload).unwrap();
    }
    assert_eq!(publisher.latest("pkg"), Ok(Some(v(expected))));

    let orders = publisher
        .versions_descending("pkg")
        .unwrap()
        .into_iter()
        .map(|r| r.sort_order)
        .collect::<Vec<_>>();
    assert_eq!(orders, (0..uploads.len()).rev().collect::<Vec<_>>());
}

#[test]
fn test_concurrent_publishes_agree_on_latest() {
    init_tracing();
    let publisher = Arc::new(Publisher::new(InMemoryRepository::new()));
    let uploads = [
        "0.1.0", "0.2.0-dev", "1.0.0-rc.1", "1.0.0", "1.0.1", "1.1.0-beta", "0.9.9", "2.0.0-alpha",
    ];

    let handles = uploads
        .iter()
        .map(|upload| {
            let publisher = Arc::clone(&publisher);
            let upload = upload.to_string();
            thread::spawn(move || publisher.publish("pkg", &upload).map(|o| o.became_latest))
        })
        .collect::<Vec<_>>();

    let mut winners = 0;
    for handle in handles {
        if handle.join().unwrap().unwrap() {
            winners += 1;
        }
    }
    assert!(winners >= 1);
    assert_eq!(publisher.latest("pkg"), Ok(Some(v("1.0.1"))));

    let versions = publisher.versions_descending("pkg").unwrap();
    assert_eq!(versions.len(), uploads.len());
    for (index, record) in versions.iter().rev().enumerate() {
        assert_eq!(record.sort_order, index);
    }
}

fn upload_versions() -> impl Strategy<Value = Vec<String>> {
    let version = (0_u64..4, 0_u64..4, 0_u64..4, prop::option::of("(alpha|beta|rc)(\\.[0-9])?"))
        .prop_map(|(major, minor, patch, pre)| match pre {
            Some(pre) => format!("{}.{}.{}-{}", major, minor, patch, pre),
            None => format!("{}.{}.{}", major, minor, patch),
        });
    prop::collection::btree_set(version, 1..12).prop_map(|set| set.into_iter().collect())
}

proptest! {
    #[test]
    fn latest_is_independent_of_upload_order(
        (uploads, shuffled) in upload_versions().prop_flat_map(|uploads| {
            let shuffled = Just(uploads.clone()).prop_shuffle();
            (Just(uploads), shuffled)
        })
    ) {
        let versions = uploads.iter().map(|u| v(u)).collect::<Vec<_>>();
        let expected = expected_latest(&versions).cloned();

        let publisher = Publisher::new(InMemoryRepository::new());
        for upload in &shuffled {
            let _ = publisher.publish("pkg", upload).unwrap();
        }
        prop_assert_eq!(publisher.latest("pkg").unwrap(), expected.clone());

        let replayed = shuffled.iter().map(|u| v(u)).collect::<Vec<_>>();
        prop_assert_eq!(select_latest(&replayed).cloned(), expected);
    }
}
