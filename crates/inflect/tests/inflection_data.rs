//! Integration tests for inflection databases, their queries, and the
//! per-locale registry.

use std::collections::BTreeMap;

use inflect::{ConfigError, InflectionConfig, InflectionData, InflectionRegistry, RawToken};

const GENDER: &str = r#"
[gender]
m = "male"
f = "female"
n = "neuter"
s = "strange"
masculine = "@m"
feminine = "@f"
neuter = "@n"
neutral = "@n"
default = "neutral"

[person]
i = "I"
you = "You"

["@gender"]
m = "male"
f = "female"
n = "neuter"
s = "strange"
masculine = "@m"
feminine = "@f"
neuter = "@n"
neutral = "@n"
default = "neutral"
"#;

fn config(toml: &str) -> InflectionConfig {
    InflectionConfig::from_toml_str(toml).unwrap()
}

fn data() -> InflectionData {
    InflectionData::from_config("xx", &config(GENDER)).unwrap()
}

fn build(json: &str) -> Result<InflectionData, ConfigError> {
    InflectionData::from_config("xx", &InflectionConfig::from_json_str(json).unwrap())
}

fn map<'a>(pairs: &[(&'a str, &'a str)]) -> BTreeMap<&'a str, &'a str> {
    pairs.iter().copied().collect()
}

// =========================================================================
// Building
// =========================================================================

#[test]
fn duplicated_loose_token_across_kinds_is_rejected() {
    let err = build(r#"{"gender": {"o": "other"}, "person": {"o": "o"}}"#).unwrap_err();
    assert_eq!(
        err,
        ConfigError::DuplicatedInflectionToken {
            locale: "xx".to_string(),
            kind: "person".to_string(),
            token: "o".to_string(),
            original_kind: "gender".to_string(),
        }
    );
}

#[test]
fn strict_kinds_may_share_token_names() {
    assert!(build(r#"{"@gender": {"o": "other"}, "@person": {"o": "o"}}"#).is_ok());
    assert!(build(r#"{"gender": {"o": "other"}, "@gender": {"o": "o"}}"#).is_ok());
}

#[test]
fn duplicated_name_within_strict_kind_is_rejected() {
    let mut data = InflectionData::new("xx");
    data.add_token("@gender", "m", Some("male")).unwrap();
    let err = data.add_token("@gender", "m", Some("masculine")).unwrap_err();
    assert!(matches!(err, ConfigError::DuplicatedInflectionToken { .. }));
}

#[test]
fn alias_to_unknown_token_is_rejected() {
    for json in [
        r#"{"gender": {"o": "@xnonexistant"}}"#,
        r#"{"@gender": {"oh": "@znonex"}}"#,
    ] {
        assert!(
            matches!(build(json), Err(ConfigError::BadInflectionAlias { .. })),
            "{json}"
        );
    }
}

#[test]
fn default_to_unknown_token_is_rejected() {
    for json in [
        r#"{"gender": {"default": "@ynonexistant"}}"#,
        r#"{"@gender": {"default": "@cnonex"}}"#,
        r#"{"gender": {"m": "male", "default": null}}"#,
    ] {
        assert!(
            matches!(build(json), Err(ConfigError::BadInflectionAlias { .. })),
            "{json}"
        );
    }
}

#[test]
fn alias_of_alias_is_rejected() {
    let err = build(r#"{"gender": {"n": "neuter", "neuter": "@n", "neutral": "@neuter"}}"#)
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::BadInflectionAlias {
            locale: "xx".to_string(),
            kind: "gender".to_string(),
            alias: "neutral".to_string(),
            target: "neuter".to_string(),
        }
    );
}

#[test]
fn default_may_name_an_alias() {
    let data = build(r#"{"gender": {"n": "neuter", "neuter": "@n", "default": "@neuter"}}"#)
        .unwrap();
    assert_eq!(data.loose().default_token_of("gender"), Some("n"));
}

#[test]
fn aliases_do_not_depend_on_key_order() {
    // `a` sorts before `m`, so it is only resolvable because true tokens
    // are added first.
    let data = build(r#"{"gender": {"a": "@m", "m": "male"}}"#).unwrap();
    assert_eq!(data.loose().true_token_of("a", None), Some("m"));
}

#[test]
fn bad_token_values_are_rejected() {
    for json in [
        r#"{"gender": {"o": "@"}}"#,
        r#"{"gender": {"tok": null}}"#,
        r#"{"gender": {"tok": ""}}"#,
        r#"{"@gender": {"o": "@"}}"#,
        r#"{"@gender": {"tok": null}}"#,
        r#"{"@gender": {"sb": "@", "d": "1"}}"#,
        r#"{"@gender": {"": "a", "d": "1"}}"#,
    ] {
        assert!(
            matches!(build(json), Err(ConfigError::BadInflectionToken { .. })),
            "{json}"
        );
    }
}

#[test]
fn reserved_token_names_are_rejected() {
    for token in [
        "@", ",", "cos,cos", "@cos+cos", "+", "cos!cos", ":", "cos:", ":cos", "cos:cos", "!d",
    ] {
        let mut data = InflectionData::new("xx");
        let err = data.add_token("@gender", token, Some("a")).unwrap_err();
        assert!(
            matches!(err, ConfigError::BadInflectionToken { .. }),
            "{token:?}"
        );
    }
}

#[test]
fn reserved_kind_names_are_rejected() {
    for kind in [
        "@",
        ",",
        "inflector_something",
        "default",
        "cos,cos",
        "@cos+cos",
        "+",
        "cos!cos",
        ":",
        "cos:",
        ":cos",
        "cos:cos",
        "!d",
    ] {
        let mut data = InflectionData::new("xx");
        let err = data.add_token(kind, "s", Some("a")).unwrap_err();
        assert!(
            matches!(err, ConfigError::BadInflectionKind { .. }),
            "{kind:?}"
        );
    }
}

#[test]
fn non_table_kind_is_rejected() {
    let err = build(r#"{"@gender": "something"}"#).unwrap_err();
    assert_eq!(
        err,
        ConfigError::BadInflectionKind {
            locale: "xx".to_string(),
            kind: "@gender".to_string(),
        }
    );
}

#[test]
fn config_error_messages() {
    let err = build(r#"{"gender": {"o": "@x"}}"#).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"bad alias 'o' -> 'x' for kind 'gender' in locale 'xx'"
    );
}

// =========================================================================
// Loose Queries
// =========================================================================

#[test]
fn loose_kinds_are_listed_sorted() {
    let data = data();
    assert_eq!(data.loose().kinds(), vec!["gender", "person"]);
    assert_eq!(data.strict().kinds(), vec!["gender"]);
}

#[test]
fn has_kind_and_has_token() {
    let data = data();
    let loose = data.loose();
    assert!(loose.has_kind("gender"));
    assert!(loose.has_kind("person"));
    assert!(!loose.has_kind("nonono"));
    assert!(loose.has_token("neuter", Some("gender")));
    assert!(loose.has_token("neuter", None));
    assert!(loose.has_token("you", None));
    assert!(!loose.has_token("faafaffafafa", None));
}

#[test]
fn kind_of_finds_owning_kind() {
    let data = data();
    let loose = data.loose();
    assert_eq!(loose.kind_of("neuter", None), Some("gender"));
    assert_eq!(loose.kind_of("f", None), Some("gender"));
    assert_eq!(loose.kind_of("you", None), Some("person"));
    assert_eq!(loose.kind_of("nononono", None), None);
}

#[test]
fn true_tokens_resolve_aliases() {
    let data = data();
    let loose = data.loose();
    assert_eq!(loose.true_token_of("neuter", None), Some("n"));
    assert_eq!(loose.true_token_of("f", None), Some("f"));
    assert_eq!(loose.true_token_of("f", Some("person")), None);
    assert_eq!(loose.true_token_of("f", Some("nokind")), None);
    assert!(!loose.has_true_token("neuter", None));
    assert!(loose.has_true_token("f", None));
    assert!(!loose.has_true_token("f", Some("person")));
}

#[test]
fn token_listings() {
    let data = data();
    let loose = data.loose();
    let true_tokens = [("m", "male"), ("f", "female"), ("n", "neuter"), ("s", "strange")];
    let aliased = [
        ("masculine", "male"),
        ("feminine", "female"),
        ("neuter", "neuter"),
        ("neutral", "neuter"),
    ];
    let all: Vec<_> = true_tokens.iter().chain(&aliased).copied().collect();

    assert_eq!(loose.true_tokens_of(Some("gender")), map(&true_tokens));
    assert_eq!(loose.tokens_of(Some("gender")), map(&all));

    let mut everything = all.clone();
    everything.extend([("i", "I"), ("you", "You")]);
    assert_eq!(loose.tokens_of(None), map(&everything));
    assert_eq!(loose.all_tokens(), map(&everything));
}

#[test]
fn raw_tokens_keep_alias_targets() {
    let data = data();
    let raw = data.loose().raw_tokens_of(Some("gender"));
    assert_eq!(raw.len(), 8);
    assert_eq!(raw["m"], RawToken::Description("male"));
    assert_eq!(raw["neutral"], RawToken::Alias("n"));
    assert_eq!(data.loose().all_raw_tokens()["you"], RawToken::Description("You"));
}

#[test]
fn aliases_and_defaults() {
    let data = data();
    let loose = data.loose();
    let aliases = map(&[("masculine", "m"), ("feminine", "f"), ("neuter", "n"), ("neutral", "n")]);
    assert_eq!(loose.aliases_of(Some("gender")), aliases);
    assert_eq!(loose.aliases_of(None), aliases);
    assert_eq!(loose.default_token_of("gender"), Some("n"));
    assert_eq!(loose.default_token_of("person"), None);
    assert!(loose.has_alias("neutral", None));
    assert!(!loose.has_alias("you", None));
    assert!(!loose.has_alias("neutral", Some("nokind")));
}

#[test]
fn descriptions() {
    let data = data();
    let loose = data.loose();
    assert_eq!(loose.description_of("m", None), Some("male"));
    assert_eq!(loose.description_of("neutral", None), Some("neuter"));
    assert_eq!(loose.description_of("vnonexistent", None), None);
}

#[test]
fn prefixed_kind_in_loose_view_reads_strict_namespace() {
    let data = InflectionData::from_config(
        "xx",
        &config(
            r#"
            ["@gender"]
            m = "male"
            n = "neuter"
            neuter = "@n"
            default = "neuter"
            "#,
        ),
    )
    .unwrap();
    let loose = data.loose();
    assert!(loose.has_kind("@gender"));
    assert!(!loose.has_kind("gender"));
    assert!(loose.has_alias("neuter", Some("@gender")));
    assert!(loose.has_token("n", Some("@gender")));
    assert!(!loose.has_true_token("neuter", Some("@gender")));
    assert_eq!(loose.true_token_of("neuter", Some("@gender")), Some("n"));
    assert_eq!(loose.default_token_of("@gender"), Some("n"));
    assert_eq!(loose.description_of("neuter", Some("@gender")), Some("neuter"));
    assert_eq!(loose.kind_of("m", None), None);
}

// =========================================================================
// Strict Queries
// =========================================================================

#[test]
fn strict_queries_need_a_kind() {
    let data = data();
    let strict = data.strict();
    assert!(strict.has_token("neuter", Some("gender")));
    assert!(!strict.has_token("you", Some("gender")));
    assert!(!strict.has_token("f", None));
    assert_eq!(strict.kind_of("f", Some("gender")), Some("gender"));
    assert_eq!(strict.kind_of("f", Some("nontrue")), None);
    assert_eq!(strict.kind_of("f", None), None);
    assert!(strict.tokens_of(None).is_empty());
    assert!(strict.true_tokens_of(None).is_empty());
    assert!(strict.raw_tokens_of(None).is_empty());
    assert!(strict.aliases_of(None).is_empty());
}

#[test]
fn strict_kinds_exclude_loose_ones() {
    let data = data();
    let strict = data.strict();
    assert!(strict.has_kind("gender"));
    assert!(!strict.has_kind("person"));
    assert!(!strict.has_alias("you", Some("person")));
    assert!(strict.has_alias("neutral", Some("gender")));
    assert_eq!(strict.description_of("neutral", Some("gender")), Some("neuter"));
    assert_eq!(strict.default_token_of("gender"), Some("n"));
}

// =========================================================================
// Registry
// =========================================================================

fn registry() -> InflectionRegistry {
    let registry = InflectionRegistry::new();
    registry.rebuild("xx", &config(GENDER)).unwrap();
    registry
}

#[test]
fn inflected_locales_filter_by_kind() {
    let registry = registry();
    assert_eq!(registry.inflected_locales(None), vec!["xx"]);
    assert_eq!(registry.inflected_locales(Some("gender")), vec!["xx"]);
    assert_eq!(registry.strict_inflected_locales(Some("gender")), vec!["xx"]);

    registry
        .rebuild("yy", &config("[\"@person\"]\ns = \"sir\""))
        .unwrap();
    assert_eq!(registry.strict_inflected_locales(Some("gender")), vec!["xx"]);
    assert_eq!(registry.strict_inflected_locales(Some("person")), vec!["yy"]);
    assert_eq!(registry.inflected_locales(Some("@person")), vec!["yy"]);
    assert_eq!(registry.inflected_locales(None), vec!["xx", "yy"]);

    registry.rebuild("zz", &config("[some]\ns = \"sir\"")).unwrap();
    assert_eq!(registry.inflected_locales(None), vec!["xx", "yy", "zz"]);
    assert_eq!(registry.strict_inflected_locales(None), vec!["xx", "yy"]);
    assert!(registry.inflected_locales(Some("@some")).is_empty());
    assert_eq!(registry.inflected_locales(Some("some")), vec!["zz"]);
}

#[test]
fn new_and_added_databases_are_supported() {
    let registry = registry();
    registry.new_database("yy");
    assert!(registry.locale_supported("yy"));
    assert!(!registry.locale_supported("yyyyy"));
    assert!(!registry.strict_locale_supported("yy"));

    registry.add_database(InflectionData::new("zz"));
    assert!(registry.locale_supported("zz"));
    assert!(!registry.locale_supported(""));
    assert!(registry.strict_locale_supported("xx"));
}

#[test]
fn delete_database_removes_locale() {
    let registry = registry();
    registry.new_database("vv");
    assert!(registry.locale_supported("vv"));
    assert!(registry.delete_database("vv"));
    assert!(!registry.locale_supported("vv"));
    assert!(!registry.delete_database("vv"));
}

#[test]
fn rebuild_replaces_whole_database() {
    let registry = registry();
    let before = registry.database("xx").unwrap();

    let mut shrunk = config(GENDER);
    assert!(shrunk.remove_token("gender", "s"));
    registry.rebuild("xx", &shrunk).unwrap();

    let after = registry.database("xx").unwrap();
    assert!(before.loose().has_token("s", None));
    assert!(!after.loose().has_token("s", None));
}

#[test]
fn failed_rebuild_keeps_previous_database() {
    let registry = registry();
    let mut broken = config(GENDER);
    broken.insert_token("person", "m", Some("duplicate"));
    assert!(registry.rebuild("xx", &broken).is_err());
    assert!(registry.database("xx").unwrap().loose().has_kind("gender"));
}

#[test]
fn empty_rebuild_removes_database() {
    let registry = registry();
    assert!(registry.rebuild("xx", &InflectionConfig::default()).unwrap().is_none());
    assert!(registry.database("xx").is_none());
}
