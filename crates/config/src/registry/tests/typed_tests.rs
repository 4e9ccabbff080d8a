//! Typed accessor tests.

use std::time::Duration;

use serial_test::serial;

use super::{env_lock, registry_for};

#[test]
fn test_typed_accessors_read_file_values() {
    let (registry, _dir) = registry_for(
        "ENVREG_Y1_PORT=3306\n\
         ENVREG_Y1_DEBUG=true\n\
         ENVREG_Y1_RATIO=0.75\n\
         ENVREG_Y1_TIMEOUT=1s\n\
         ENVREG_Y1_HOSTS=a b  c\n\
         ENVREG_Y1_CACHE=64mb\n\
         ENVREG_Y1_OFFSET=-3\n",
    );

    assert_eq!(registry.get_i64("envreg_y1_port"), 3306);
    assert_eq!(registry.get_i32("envreg_y1_port"), 3306);
    assert_eq!(registry.get_u64("envreg_y1_port"), 3306);
    assert!(registry.get_bool("envreg_y1_debug"));
    assert_eq!(registry.get_f64("envreg_y1_ratio"), 0.75);
    assert_eq!(registry.get_duration("envreg_y1_timeout"), Duration::from_secs(1));
    assert_eq!(registry.get_string_list("envreg_y1_hosts"), vec!["a", "b", "c"]);
    assert_eq!(registry.get_size_in_bytes("envreg_y1_cache"), 64 * 1024 * 1024);
    assert_eq!(registry.get_i64("envreg_y1_offset"), -3);
    assert_eq!(registry.get_u64("envreg_y1_offset"), 0);
}

#[test]
fn test_typed_accessors_default_on_missing_keys() {
    let (registry, _dir) = registry_for("");

    assert_eq!(registry.get_string("envreg_y2_missing"), "");
    assert!(!registry.get_bool("envreg_y2_missing"));
    assert_eq!(registry.get_i64("envreg_y2_missing"), 0);
    assert_eq!(registry.get_duration("envreg_y2_missing"), Duration::ZERO);
    assert!(registry.get_string_list("envreg_y2_missing").is_empty());
    assert!(!registry.is_set("envreg_y2_missing"));
}

#[test]
fn test_typed_accessors_see_programmatic_values() {
    let (registry, _dir) = registry_for("");

    registry.set("envreg_y3_workers", 8i64).unwrap();
    registry.set("envreg_y3_enabled", true).unwrap();

    assert_eq!(registry.get_u64("envreg_y3_workers"), 8);
    assert_eq!(registry.get_string("envreg_y3_workers"), "8");
    assert!(registry.get_bool("envreg_y3_enabled"));
    assert!(registry.is_set("envreg_y3_enabled"));
}

#[test]
#[serial]
fn test_typed_accessors_follow_precedence() {
    let _lock = env_lock().lock().unwrap();
    let (registry, _dir) = registry_for("ENVREG_Y4_RETRIES=3\n");

    temp_env::with_vars([("ENVREG_Y4_RETRIES", Some("7"))], || {
        assert_eq!(registry.get_i64("envreg_y4_retries"), 7);
        assert!(registry.is_set("envreg_y4_retries"));
    });
}
