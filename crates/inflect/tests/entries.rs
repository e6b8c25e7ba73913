//! Integration tests for translation entries, keyed inflections, and
//! configuration files.

use std::fs;
use std::path::PathBuf;

use inflect::{
    Entry, InflectionConfig, InflectionError, Inflector, KeyedInflection, LoadError,
    OptionOverrides, args,
};
use serde_json::json;
use tempfile::TempDir;

const GENDER: &str = r#"
[gender]
m = "male"
f = "female"
n = "neuter"
masculine = "@m"
default = "n"

["@gender"]
m = "male"
f = "female"
n = "neuter"
default = "n"
"#;

fn inflector() -> Inflector {
    let mut inflector = Inflector::new();
    inflector
        .store("xx", &InflectionConfig::from_toml_str(GENDER).unwrap())
        .unwrap();
    inflector
}

fn entry(value: serde_json::Value) -> Entry {
    serde_json::from_value(value).unwrap()
}

fn resolve(inflector: &Inflector, input: &Entry, overrides: OptionOverrides) -> Entry {
    inflector
        .interpolate_entry(input, "xx", &args! { "gender" => "m" }, overrides)
        .unwrap()
}

// =========================================================================
// Entry Shapes
// =========================================================================

#[test]
fn deserializes_entry_shapes() {
    assert_eq!(entry(json!("Hi")), Entry::Text("Hi".to_string()));
    assert_eq!(
        entry(json!(["a", 1])),
        Entry::List(vec![Entry::from("a"), Entry::Other(json!(1))])
    );
    let Entry::Map(map) = entry(json!({"title": "Sir", "count": null})) else {
        panic!("expected a map");
    };
    assert_eq!(map["title"].as_text(), Some("Sir"));
    assert_eq!(map["count"], Entry::Other(json!(null)));
}

#[test]
fn resolves_text_entries() {
    let inflector = inflector();
    let out = resolve(&inflector, &Entry::from("Dear @{f:Lady|m:Sir}!"), OptionOverrides::none());
    assert_eq!(out, Entry::from("Dear Sir!"));
}

#[test]
fn traverses_nested_collections() {
    let inflector = inflector();
    let input = entry(json!({
        "greeting": "Dear @{f:Lady|m:Sir}!",
        "list": ["@{m:he|she}", 7, {"deep": "@gender{m:~|n:it}"}],
        "plain": "nothing here"
    }));
    let expected = entry(json!({
        "greeting": "Dear Sir!",
        "list": ["he", 7, {"deep": "male"}],
        "plain": "nothing here"
    }));
    assert_eq!(resolve(&inflector, &input, OptionOverrides::none()), expected);
}

#[test]
fn traversal_can_be_disabled() {
    let inflector = inflector();
    let overrides = || OptionOverrides::builder().traverses(false).build();

    let list = entry(json!(["@{m:he|she}"]));
    assert_eq!(resolve(&inflector, &list, overrides()), list);

    let map = entry(json!({"a": "@{m:he|she}"}));
    assert_eq!(resolve(&inflector, &map, overrides()), map);

    let text = Entry::from("@{m:he|she}");
    assert_eq!(resolve(&inflector, &text, overrides()), Entry::from("he"));
}

#[test]
fn symbols_resolve_only_when_enabled() {
    let inflector = inflector();
    let symbol = Entry::Symbol("@{m:he|she}".to_string());
    assert_eq!(resolve(&inflector, &symbol, OptionOverrides::none()), symbol);

    let enabled = OptionOverrides::builder().interpolate_symbols(true).build();
    assert_eq!(
        resolve(&inflector, &symbol, enabled),
        Entry::Symbol("he".to_string())
    );
}

#[test]
fn other_values_pass_through() {
    let inflector = inflector();
    for value in [json!(3.5), json!(true), json!(null)] {
        let input = entry(value);
        assert_eq!(resolve(&inflector, &input, OptionOverrides::none()), input);
    }
}

#[test]
fn locale_without_database_removes_blocks() {
    let inflector = inflector();
    let out = inflector
        .interpolate_entry(
            &Entry::from("x@{m:Sir|All}d"),
            "uu",
            &args! { "gender" => "m" },
            OptionOverrides::none(),
        )
        .unwrap();
    assert_eq!(out, Entry::from("xd"));
}

#[test]
fn entry_errors_propagate_when_raising() {
    let inflector = inflector();
    let input = entry(json!({"a": ["@nokind{m:x}"]}));
    let err = inflector
        .interpolate_entry(
            &input,
            "xx",
            &args! {},
            OptionOverrides::builder().raises(true).build(),
        )
        .unwrap_err();
    assert!(matches!(err, InflectionError::InvalidInflectionKind { .. }));
}

// =========================================================================
// Keyed Inflections
// =========================================================================

fn keyed_in(inflector: &Inflector, keyed: &KeyedInflection, gender: &str) -> String {
    inflector
        .interpolate_keyed(keyed, "xx", &args! { "gender" => gender }, OptionOverrides::none())
        .unwrap()
}

#[test]
fn keyed_inflection_resolves_like_a_block() {
    let inflector = inflector();
    let greeting = KeyedInflection::from_pairs([
        ("m", "Sir"),
        ("f", "Lady"),
        ("@free", "TEST"),
        ("@prefix", "Dear "),
        ("@suffix", "!"),
    ]);
    let cases = [("m", "Dear Sir!"), ("f", "Dear Lady!"), ("n", "Dear TEST!")];
    for (gender, expected) in cases {
        assert_eq!(keyed_in(&inflector, &greeting, gender), expected);
    }
}

#[test]
fn keyed_alternatives_are_tried_in_source_order() {
    let inflector = inflector();
    let wildcard = KeyedInflection::from_pairs([("n", "You"), ("*", "Any"), ("@free", "All")]);
    assert_eq!(keyed_in(&inflector, &wildcard, "n"), "You");
    assert_eq!(keyed_in(&inflector, &wildcard, "m"), "Any");
    assert_eq!(wildcard.to_block().source, "@{n:You|*:Any|All}");

    let negated = KeyedInflection::from_pairs([("f", "Lady"), ("!n", "Someone")]);
    assert_eq!(keyed_in(&inflector, &negated, "f"), "Lady");
    assert_eq!(keyed_in(&inflector, &negated, "m"), "Someone");
    assert_eq!(keyed_in(&inflector, &negated, "n"), "");
}

#[test]
fn repeated_keyed_token_keeps_its_position() {
    let keyed = KeyedInflection::from_pairs([("m", "Sir"), ("*", "Any"), ("m", "Lord")]);
    assert_eq!(
        keyed.tokens,
        vec![
            ("m".to_string(), "Lord".to_string()),
            ("*".to_string(), "Any".to_string()),
        ]
    );
}

#[test]
fn keyed_inflection_with_named_kind_and_spec_lists() {
    let inflector = inflector();
    let greeting = KeyedInflection::from_pairs([
        ("@kind", "gender"),
        ("f,m", "Someone"),
        ("n", "~"),
        ("@ignored", "x"),
    ]);
    assert_eq!(greeting.kind.as_deref(), Some("gender"));
    assert!(greeting.tokens.iter().all(|(specs, _)| specs != "@ignored"));

    assert_eq!(keyed_in(&inflector, &greeting, "m"), "Someone");
    assert_eq!(keyed_in(&inflector, &greeting, "n"), "neuter");
}

#[test]
fn keyed_block_source_reads_like_a_pattern() {
    let greeting =
        KeyedInflection::from_pairs([("@kind", "gender"), ("m", "Sir"), ("@free", "All")]);
    assert_eq!(greeting.to_block().source, "@gender{m:Sir|All}");
}

// =========================================================================
// Configuration Files
// =========================================================================

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_toml_and_json_files() {
    let dir = tempfile::tempdir().unwrap();
    let toml = write(&dir, "en.toml", "[gender]\nm = \"male\"\ndefault = \"m\"\n");
    let json = write(&dir, "de.json", r#"{"gender": {"f": "weiblich", "default": "f"}}"#);

    let mut inflector = Inflector::new();
    let en = inflector.load_path("en", &toml).unwrap().unwrap();
    let de = inflector.load_path("de", &json).unwrap().unwrap();
    assert_eq!(en.loose().default_token_of("gender"), Some("m"));
    assert_eq!(de.loose().description_of("f", None), Some("weiblich"));

    let out = inflector
        .interpolate("@{m:~|f:~}", "de", &args! {}, OptionOverrides::none())
        .unwrap();
    assert_eq!(out, "weiblich");
}

#[test]
fn reload_picks_up_file_changes() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(&dir, "en.toml", "[gender]\nm = \"male\"\n");

    let mut inflector = Inflector::new();
    inflector.load_path("en", &path).unwrap();
    let text = "@{m:Sir|f:Lady|All}";
    let a = args! { "gender" => "f" };
    assert_eq!(inflector.interpolate(text, "en", &a, OptionOverrides::none()).unwrap(), "All");

    fs::write(&path, "[gender]\nm = \"male\"\nf = \"female\"\n").unwrap();
    inflector.reload("en").unwrap();
    assert_eq!(inflector.interpolate(text, "en", &a, OptionOverrides::none()).unwrap(), "Lady");
}

#[test]
fn reload_without_file_fails() {
    let mut inflector = inflector();
    let err = inflector.reload("xx").unwrap_err();
    assert!(matches!(err, LoadError::NoPathForReload { ref locale } if locale == "xx"));
    insta::assert_snapshot!(err.to_string(), @"no configuration file recorded for locale 'xx'");
}

#[test]
fn load_errors_are_classified() {
    let dir = tempfile::tempdir().unwrap();
    let mut inflector = Inflector::new();

    let missing = dir.path().join("missing.toml");
    assert!(matches!(inflector.load_path("en", &missing), Err(LoadError::Io { .. })));

    let bad_toml = write(&dir, "bad.toml", "[gender\nm = ");
    assert!(matches!(inflector.load_path("en", &bad_toml), Err(LoadError::Toml { .. })));

    let bad_json = write(&dir, "bad.json", "{\"gender\": ");
    assert!(matches!(inflector.load_path("en", &bad_json), Err(LoadError::Json { .. })));

    let bad_alias = write(&dir, "alias.toml", "[gender]\nm = \"male\"\nx = \"@y\"\n");
    assert!(matches!(inflector.load_path("en", &bad_alias), Err(LoadError::Config(_))));

    assert!(inflector.database("en").is_none());
    assert!(inflector.reload("en").is_err());
}

#[test]
fn failed_load_keeps_previous_database() {
    let dir = tempfile::tempdir().unwrap();
    let good = write(&dir, "good.toml", "[gender]\nm = \"male\"\n");
    let bad = write(&dir, "bad.toml", "[gender]\nm = \"\"\n");

    let mut inflector = Inflector::new();
    inflector.load_path("en", &good).unwrap();
    assert!(inflector.load_path("en", &bad).is_err());
    let data = inflector.database("en").unwrap();
    assert!(data.loose().has_token("m", None));
}

#[test]
fn remove_locale_forgets_everything() {
    let mut inflector = inflector();
    assert!(inflector.remove_locale("xx"));
    assert!(inflector.database("xx").is_none());
    assert!(inflector.config("xx").is_none());
    assert!(!inflector.remove_locale("xx"));
}
