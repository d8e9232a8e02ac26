// SnapshotReader against a canned session document

mod common;

use common::{sample_session, text};
use jmxsnap::error::ReaderError;
use jmxsnap::models::Target;
use jmxsnap::name::ResourceName;
use jmxsnap::reader::{SnapshotReader, derive_percent};

fn name(s: &str) -> ResourceName {
    ResourceName::parse(s).expect("test name parses")
}

#[test]
fn test_resolve_pattern_returns_all_matches() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let names = reader
        .resolve(&name("java.lang:type=MemoryPool,name=*"))
        .unwrap();
    assert_eq!(
        names,
        vec![
            name("java.lang:type=MemoryPool,name=CMS Old Gen"),
            name("java.lang:type=MemoryPool,name=CMS Perm Gen"),
        ]
    );
}

#[test]
fn test_resolve_zero_matches_is_empty_not_error() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let names = reader
        .resolve(&name("com.acme:type=MemoryPool,name=*"))
        .unwrap();
    assert!(names.is_empty());
}

#[test]
fn test_resolve_on_disconnected_session_fails() {
    let mut session = sample_session();
    session.disconnect();
    let reader = SnapshotReader::new(&session);
    let err = reader.resolve(&name("*:*")).unwrap_err();
    assert!(matches!(err, ReaderError::Resolution(_)));
}

#[test]
fn test_read_attribute_on_disconnected_session_fails() {
    let mut session = sample_session();
    session.disconnect();
    let reader = SnapshotReader::new(&session);
    let err = reader
        .read_attribute(&name("java.lang:type=Runtime"), "Broken")
        .unwrap_err();
    assert!(matches!(err, ReaderError::Resolution(_)));
}

#[test]
fn test_read_attribute_unknown_resource() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let err = reader
        .read_attribute(&name("java.lang:type=MemoryPool,name=Eden Space"), "Usage")
        .unwrap_err();
    assert!(matches!(err, ReaderError::NoSuchResource(_)));
}

#[test]
fn test_read_attribute_unknown_attribute_is_not_decode() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let err = reader
        .read_attribute(
            &name("java.lang:type=MemoryPool,name=CMS Perm Gen"),
            "PeakUsage",
        )
        .unwrap_err();
    assert!(matches!(err, ReaderError::NoSuchAttribute(_)));
}

#[test]
fn test_read_attribute_malformed_payload_is_decode() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let err = reader
        .read_attribute(&name("java.lang:type=Runtime"), "Broken")
        .unwrap_err();
    assert!(matches!(err, ReaderError::Decode(_)));
}

#[test]
fn test_read_attribute_preserves_all_fields() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let usage = reader
        .read_attribute(&name("java.lang:type=MemoryPool,name=CMS Perm Gen"), "Usage")
        .unwrap();
    // The caller asked for nothing specific; init/committed are still there.
    for field in ["init", "used", "committed", "max"] {
        usage.field(field).unwrap();
    }
}

#[test]
fn test_poll_orders_entries_by_target_then_resolution_then_attribute() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let targets = vec![
        Target {
            pattern: name("java.lang:type=MemoryPool,name=*"),
            attributes: vec!["Usage".into()],
        },
        Target {
            pattern: name("java.lang:type=GarbageCollector,*"),
            attributes: vec!["LastGcInfo".into()],
        },
    ];
    let snapshot = reader.poll(&targets).unwrap();
    let seen: Vec<(String, String)> = snapshot
        .entries
        .iter()
        .map(|e| (e.name.to_string(), e.attribute.clone()))
        .collect();
    assert_eq!(
        seen,
        vec![
            (
                "java.lang:type=MemoryPool,name=CMS Old Gen".into(),
                "Usage".into()
            ),
            (
                "java.lang:type=MemoryPool,name=CMS Perm Gen".into(),
                "Usage".into()
            ),
            (
                "java.lang:type=GarbageCollector,name=ConcurrentMarkSweep".into(),
                "LastGcInfo".into()
            ),
        ]
    );
}

#[test]
fn test_poll_aborts_on_first_error() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let targets = vec![Target {
        pattern: name("java.lang:type=Runtime"),
        attributes: vec!["Broken".into()],
    }];
    let err = reader.poll(&targets).unwrap_err();
    assert!(matches!(err, ReaderError::Decode(_)));
}

#[test]
fn test_chained_lookup_through_last_gc_info() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let info = reader
        .read_attribute(
            &name("java.lang:type=GarbageCollector,name=ConcurrentMarkSweep"),
            "LastGcInfo",
        )
        .unwrap();
    let after_gc = info.field("memoryUsageAfterGc").unwrap();
    let old_gen = after_gc.row(&[text("CMS Old Gen")]).unwrap();
    let used = old_gen.field("value").unwrap().field("used").unwrap();
    let max = old_gen.field("value").unwrap().field("max").unwrap();
    let percent = derive_percent(used.as_f64().unwrap(), max.as_f64().unwrap()).unwrap();
    assert_eq!(percent, 7.5);
}

#[test]
fn test_derive_percent_examples() {
    assert_eq!(derive_percent(50.0, 200.0).unwrap(), 25.0);
    assert_eq!(derive_percent(1.0, 3.0).unwrap(), 33.33);
    assert_eq!(derive_percent(2.0, 3.0).unwrap(), 66.67);
}

#[test]
fn test_derive_percent_zero_denominator() {
    let err = derive_percent(50.0, 0.0).unwrap_err();
    assert!(matches!(err, ReaderError::DivisionByZero));
}

#[test]
fn test_repeated_reads_return_fresh_equal_values() {
    let session = sample_session();
    let reader = SnapshotReader::new(&session);
    let pool = name("java.lang:type=MemoryPool,name=CMS Perm Gen");
    let first = reader.read_attribute(&pool, "Usage").unwrap();
    let second = reader.read_attribute(&pool, "Usage").unwrap();
    assert_eq!(first, second);
}
