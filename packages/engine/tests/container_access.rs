//! Container access tests
//!
//! Round-trips, partial traversal reporting, force-create and delimiter
//! folding through the public `PathedContainer` API.

use datapath_engine::prelude::*;
use serde_json::json;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_then_get_round_trip() {
        let mut data = PathedContainer::new(json!({}));
        data.set_force_create(true);

        for (path, value) in [
            ("name", json!("datapath")),
            ("db.host", json!("localhost")),
            ("db.port", json!(5432)),
            ("db.replicas", json!(["a", "b"])),
            ("flags.debug", json!(null)),
        ] {
            data.set(path, value.clone())
                .expect("forced set should never fail");
            assert_eq!(data.get_value(path), Some(value), "round trip of '{path}'");
        }
    }

    #[test]
    fn test_strict_get_reports_covered_and_remaining() {
        let data = PathedContainer::new(json!({"a": {"b": 1}}));

        let err = data.get("a.c").expect_err("a.c does not exist");
        let err = err.as_path_error().expect("missing key is a path error");
        assert_eq!(err.covered, vec!["a"]);
        assert_eq!(err.remaining, vec!["c"]);
        assert!(err.is_partial());
        assert_eq!(err.to_string(), "The path 'a' has been covered but not 'c'");
    }

    #[test]
    fn test_silent_get_returns_not_exists() {
        let config = ContainerConfig::default().silent();
        let data = PathedContainer::with_config(json!({"a": {"b": 1}}), config)
            .expect("default delimiters are valid");

        let lookup = data.get("a.c").expect("silent lookups never fail");
        assert!(!PathedContainer::value_exists(&lookup));
        assert!(!data.exists("a.c"));
        assert!(data.exists("a.b"));
    }

    #[test]
    fn test_force_create_builds_missing_path() {
        let mut data = PathedContainer::new(json!({}));
        data.set_with("a.b.c", 1, Some(true))
            .expect("forced set should never fail");
        assert_eq!(data.to_value(), json!({"a": {"b": {"c": 1}}}));

        let mut data = PathedContainer::new(json!({}));
        let err = data
            .set_with("a.b.c", 1, Some(false))
            .expect_err("unforced set on a missing path must fail");
        assert!(matches!(err, AccessError::Path(_)));
    }

    #[test]
    fn test_delimiter_folding() {
        let data = PathedContainer::with_delimiters(json!({"a": {"b": "x"}}), [".", "/"])
            .expect("two non-empty delimiters are valid");
        assert_eq!(data.get_value("a/b"), data.get_value("a.b"));
        assert_eq!(data.get_value(["a", "b"]), Some(json!("x")));
    }

    #[test]
    fn test_atoms_are_never_split() {
        let mut data = PathedContainer::new(json!({}));
        data.set_forced(vec![PathSpec::from("hosts"), PathSpec::atom("example.com")], 1)
            .expect("forced set should never fail");
        assert_eq!(data.keys(1), vec!["hosts"]);
        assert_eq!(
            data.get_value(vec![PathSpec::from("hosts"), PathSpec::atom("example.com")]),
            Some(json!(1))
        );
        assert!(!data.exists("hosts.example.com"));
    }

    #[test]
    fn test_type_error_through_scalar() {
        let mut data = PathedContainer::new(json!({"a": 5}));
        let err = data.set("a.b", 1).expect_err("a is a scalar");
        assert_eq!(err.to_string(), "element at 'a' must be addressable");
    }

    #[test]
    fn test_keys_depth_and_count() {
        let data = PathedContainer::new(json!({
            "db": {"host": "h", "pool": {"min": 1, "max": 4}},
            "debug": false
        }));
        assert_eq!(data.keys(1), vec!["db", "debug"]);
        assert_eq!(data.keys(2), vec!["db.host", "db.pool", "debug"]);
        assert_eq!(data.keys(-1), vec!["db.host", "db.pool.min", "db.pool.max", "debug"]);
        assert_eq!(data.count(), 4);
    }

    #[test]
    fn test_views_alias_the_parent() {
        let mut parent = PathedContainer::new(json!({"db": {"host": "a"}}));
        let mut db = parent.view("db").expect("db exists");

        db.set("port", 1).expect("parent node is a container");
        parent.set("db.host", "b").expect("db is a container");

        assert_eq!(parent.to_value(), json!({"db": {"host": "b", "port": 1}}));
        assert_eq!(db.to_value(), json!({"host": "b", "port": 1}));
    }

    #[test]
    fn test_snapshot_round_trip() {
        let data = PathedContainer::with_delimiters(json!({"a": {"b": [1, 2]}}), ["/"])
            .expect("single delimiter is valid");
        let blob = data.to_blob().expect("tree is encodable");
        let restored = PathedContainer::from_blob(&blob).expect("blob was just produced");
        assert_eq!(restored.to_value(), data.to_value());
        assert_eq!(restored.main_delimiter(), "/");
    }

    #[test]
    fn test_invalid_configuration_is_rejected() {
        let empty: [&str; 0] = [];
        assert!(PathedContainer::with_delimiters(json!({}), empty).is_err());
        assert!(PathedContainer::with_delimiters(json!({}), [""]).is_err());
    }
}
