//! Live view aliasing

use serde_json::json;

use super::PathedContainer;
use crate::config::AccessPolicy;

#[test]
fn writes_through_view_reach_parent() {
    let parent = PathedContainer::new(json!({"db": {"host": "a"}}));
    let mut db = parent.view("db").unwrap();

    db.set("port", 5432).unwrap();
    assert_eq!(parent.get_value("db.port"), Some(json!(5432)));
}

#[test]
fn writes_through_parent_reach_view() {
    let mut parent = PathedContainer::new(json!({"db": {"host": "a"}}));
    let db = parent.view("db").unwrap();

    parent.set("db.host", "b").unwrap();
    assert_eq!(db.get_value("host"), Some(json!("b")));
    assert_eq!(db.count(), 1);
}

#[test]
fn replacing_view_root_replaces_parent_node() {
    let parent = PathedContainer::new(json!({"db": {"host": "a"}, "other": 1}));
    let mut db = parent.view("db").unwrap();

    db.set((), json!({"url": "x"})).unwrap();
    assert_eq!(parent.to_value(), json!({"db": {"url": "x"}, "other": 1}));
}

#[test]
fn view_errors_are_relative_to_view() {
    let parent = PathedContainer::new(json!({"db": {"host": "a"}}));
    let db = parent.view("db").unwrap();

    let err = db.get_strict("pool.size").unwrap_err();
    assert!(err.covered.is_empty());
    assert_eq!(err.remaining, vec!["pool", "size"]);
}

#[test]
fn silent_view_on_missing_path_materializes_on_write() {
    let mut parent = PathedContainer::new(json!({}));
    parent.set_access_policy(AccessPolicy::Silent);
    parent.set_force_create(true);

    let mut cache = parent.view("cache.redis").unwrap();
    assert!(cache.is_empty());

    cache.set("ttl", 30).unwrap();
    assert_eq!(parent.get_value("cache.redis.ttl"), Some(json!(30)));
}

#[test]
fn nested_views_share_the_same_tree() {
    let parent = PathedContainer::new(json!({"a": {"b": {"c": 1}}}));
    let a = parent.view("a").unwrap();
    let mut b = a.view("b").unwrap();

    assert!(b.is_view());
    b.unset("c").unwrap();
    assert_eq!(parent.to_value(), json!({"a": {"b": {}}}));
    assert_eq!(b.keys(1), Vec::<String>::new());
}
