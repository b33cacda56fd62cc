use errtrail::hidden;
use errtrail::types::{ERROR_KEY, ERROR_OP_KEY, LOCATION_KEY, TEXT_KEY};
use errtrail::{new, ops, ContextMap, Error, Value};

fn fields(err: &Error) -> ContextMap {
    let mut map = ContextMap::new();
    err.fill(&mut map);
    map
}

#[test]
fn outer_layers_take_precedence() {
    let cause = {
        let _scope = ops::begin("load").set("shared", "cause context").set("cause_ctx", 1);
        new!("inner").with("shared_data", "cause data").with("cause_only", true)
    };

    let _scope = ops::begin("handle").set("shared", "top context");
    let err = new!("outer: {}", cause).with("shared_data", "top data");

    let map = fields(&err);
    assert_eq!(map["op"], Value::from("handle"));
    assert_eq!(map["shared"], Value::from("top context"));
    assert_eq!(map["shared_data"], Value::from("top data"));
    assert_eq!(map["cause_ctx"], Value::from(1));
    assert_eq!(map["cause_only"], Value::from(true));
}

#[test]
fn top_context_beats_cause_data() {
    let cause = new!("inner").with("key", "cause data");
    let _scope = ops::begin("top").set("key", "top context");
    let err = new!("outer: {}", cause);
    assert_eq!(fields(&err)["key"], Value::from("top context"));
}

#[test]
fn data_beats_context_on_the_same_error() {
    let _scope = ops::begin("x").set("key", "context");
    let err = Error::new("e").with("key", "data");
    assert_eq!(fields(&err)["key"], Value::from("data"));
}

#[test]
fn derived_keys_describe_the_top_error() {
    let err = new!("outer: {}", new!("inner {}", 1)).op("save");
    let map = fields(&err);

    assert_eq!(map[ERROR_KEY], Value::from("outer: {}"));
    assert_eq!(map[ERROR_OP_KEY], Value::from("save"));
    let text = map[TEXT_KEY].as_str().expect("text value");
    assert_eq!(hidden::clean(text), "outer: inner 1");
    let location = map[LOCATION_KEY].as_str().expect("location value");
    assert!(location.contains("fill.rs"));
}

#[test]
fn cause_op_survives_when_top_has_none() {
    let cause = Error::new("inner").op("query");
    let err = new!("outer: {}", cause);
    assert_eq!(fields(&err)[ERROR_OP_KEY], Value::from("query"));
}

#[test]
fn existing_entries_are_overwritten() {
    let mut map = ContextMap::new();
    map.insert("error".into(), Value::from("stale"));
    map.insert("unrelated".into(), Value::from(1));

    Error::new("fresh").fill(&mut map);
    assert_eq!(map["error"], Value::from("fresh"));
    assert_eq!(map["unrelated"], Value::from(1));
}

#[test]
fn snapshot_is_not_affected_by_later_scopes() {
    let err = Error::new("early");
    let _scope = ops::begin("late");
    assert!(!fields(&err).contains_key("op"));
}

#[test]
fn three_levels_resolve_top_down() {
    let e = new!("something happened").with("name", "e").with("k", "v").with("a", "b");
    let e2 = new!("uh oh: {}", &e).with("name", "e2").with("k", "v2");
    let e3 = new!("umm: {}", &e2).with("name", "e3");

    let map = fields(&e3);
    assert_eq!(map["name"], Value::from("e3"));
    assert_eq!(map["k"], Value::from("v2"));
    assert_eq!(map["a"], Value::from("b"));
    assert_eq!(map[ERROR_KEY], Value::from("umm: {}"));
}
