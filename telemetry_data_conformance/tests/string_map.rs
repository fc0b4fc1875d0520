// Copyright 2026 the Telemetry Data Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use telemetry_data::arena::KvSlots;
use telemetry_data::trace::{RecordedEvent, RecordingSink};
use telemetry_data::wire::StringKeyValueRecord;
use telemetry_data::{StringMap, TraceMask};
use telemetry_data_conformance::{map_of, pairs_of};

#[test]
fn insert_never_overwrites() {
    let m = StringMap::new();
    m.insert("a", "1");
    m.insert("a", "2");
    let kv = m.get("a").expect("key was inserted");
    assert_eq!((kv.key().as_str(), kv.value().as_str()), ("a", "1"));
}

#[test]
fn upsert_overwrites() {
    let m = StringMap::new();
    m.upsert("a", "1");
    m.upsert("a", "2");
    assert_eq!(m.get("a").expect("key was upserted").value(), "2");
    assert_eq!(m.len(), 1);
}

#[test]
fn insert_update_upsert_preserve_arrival_order() {
    let m = map_of(&[("z", "1"), ("m", "2")]);
    m.update("z", "3");
    m.upsert("a", "4");
    m.upsert("m", "5");
    m.insert("b", "6");
    assert_eq!(
        pairs_of(&m),
        [
            ("z".to_owned(), "3".to_owned()),
            ("m".to_owned(), "5".to_owned()),
            ("a".to_owned(), "4".to_owned()),
            ("b".to_owned(), "6".to_owned()),
        ]
    );
}

#[test]
fn delete_existing_key_shrinks_by_one() {
    let m = map_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
    assert!(m.delete("a"));
    assert_eq!(m.len(), 2);
    assert!(m.get("a").is_none());
    // Swap-remove: the last pair now occupies the first position.
    assert_eq!(m.at(0).key(), "c");
}

#[test]
fn delete_absent_key_is_noop() {
    let m = map_of(&[("a", "1")]);
    assert!(!m.delete("b"));
    assert_eq!(m.len(), 1);
    assert!(m.delete("a"));
    assert!(!m.delete("a"));
    assert!(m.is_empty());
}

#[test]
fn pair_handles_survive_reordering() {
    let m = map_of(&[("a", "1"), ("b", "2"), ("c", "3")]);
    let c = m.get("c").expect("present");
    assert!(m.delete("a"));
    m.sort();
    c.set_value("30");
    assert_eq!(m.get("c").expect("present").value(), "30");

    // A handle to a deleted pair keeps its record but no longer affects the map.
    let b = m.get("b").expect("present");
    assert!(m.delete("b"));
    b.set_value("gone");
    assert!(m.get("b").is_none());
}

#[test]
fn sort_canonicalizes_different_histories() {
    let a = map_of(&[("k1", "v1"), ("k2", "v2"), ("k3", "v3")]);
    let b = map_of(&[("k3", "v3"), ("k1", "v1"), ("x", "tmp"), ("k2", "v2")]);
    assert!(b.delete("x"));
    assert_eq!(a.sort(), b.sort());
    assert_eq!(pairs_of(&a), pairs_of(&b));
}

#[test]
fn sort_is_idempotent() {
    let m = map_of(&[("b", "1"), ("a", "2"), ("c", "3"), ("aa", "4")]);
    let once = pairs_of(m.sort());
    let twice = pairs_of(m.sort());
    assert_eq!(once, twice);
    let keys: Vec<_> = once.iter().map(|(k, _)| k.as_str()).collect();
    assert_eq!(keys, ["a", "aa", "b", "c"]);
}

#[test]
fn sort_orders_by_bytes() {
    let m = map_of(&[("b", "1"), ("B", "2"), ("é", "3"), ("a", "4")]);
    let keys: Vec<_> = pairs_of(m.sort()).into_iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["B", "a", "b", "é"]);
}

#[test]
fn views_over_one_sequence_share_mutations() {
    let slots = KvSlots::new();
    let v1 = StringMap::from_slots(slots.clone());
    let v2 = StringMap::from_slots(slots);
    assert!(v1.ptr_eq(&v2));

    v1.insert("a", "1");
    assert_eq!(v2.get("a").expect("visible through v2").value(), "1");

    v2.update("a", "2");
    assert_eq!(v1.get("a").expect("visible through v1").value(), "2");

    v2.insert("b", "3");
    assert!(v1.delete("a"));
    assert_eq!(v2.len(), 1);
    assert_eq!(v2.at(0).key(), "b");
}

#[test]
fn external_sequence_keeps_order_and_reflects_writes() {
    let slots = KvSlots::from_records(vec![
        StringKeyValueRecord {
            key: "service.name".into(),
            value: "api".into(),
        },
        StringKeyValueRecord {
            key: "host.name".into(),
            value: "h1".into(),
        },
    ]);
    let m = StringMap::from_slots(slots.clone());
    assert_eq!(m.at(1).key(), "host.name");
    m.upsert("host.name", "h2");
    assert_eq!(slots.to_records()[1].value, "h2");
}

#[test]
fn unordered_sources_compare_equal_after_sort() {
    let mut hb = hashbrown::HashMap::new();
    let mut sm = std::collections::HashMap::new();
    for (k, v) in [("a", "1"), ("b", "2"), ("c", "3")] {
        hb.insert(k.to_owned(), v.to_owned());
        sm.insert(k.to_owned(), v.to_owned());
    }
    let a = StringMap::from_map(&hb);
    let b = StringMap::from_std_map(&sm);
    assert_eq!(a.sort(), b.sort());
}

#[test]
fn empty_source_yields_usable_map() {
    let m = StringMap::from_std_map(&std::collections::HashMap::new());
    assert!(m.is_empty());
    m.insert("k", "v");
    assert_eq!(m.len(), 1);
}

#[test]
#[should_panic(expected = "index out of range")]
fn positional_access_past_end_panics() {
    let m = map_of(&[("a", "1")]);
    let _ = m.at(5);
}

#[test]
fn masked_sink_sees_only_selected_kinds() {
    let rec = RecordingSink::with_mask(TraceMask::DELETE);
    let m = map_of(&[("a", "1"), ("b", "2")]);
    m.set_trace_sink(Box::new(rec.clone()));
    m.insert("c", "3");
    m.update("a", "x");
    assert!(m.delete("a"));
    m.sort();
    assert_eq!(
        rec.events(),
        [RecordedEvent::Delete {
            key: "a".into(),
            index: 0,
            moved_from: Some(2),
        }]
    );
}

#[test]
fn values_can_be_fed_back_into_the_same_map() {
    let m = map_of(&[("a", "1")]);
    let kv = m.get("a").expect("present");
    kv.set_value(&kv.value());
    m.upsert("a", &m.get("a").expect("present").value());
    m.upsert("b", &m.get("a").expect("present").value());
    m.insert("c", &m.at(1).key());
    let expected: Vec<(String, String)> = [("a", "1"), ("b", "1"), ("c", "b")]
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    assert_eq!(pairs_of(&m), expected);
}
