use serde::Deserialize;

use crate::{
    ConfigError, ConfigErrorKind, ConfigLoader, DefaultValue, EnvConfig, EnvSnapshot, FieldKind,
    FieldSpec, LogLevel, Value, Violation, rules,
};

#[derive(Debug, Clone, PartialEq, Deserialize)]
struct ServerSettings {
    host: String,
    port: i64,
    verbose: bool,
    level: LogLevel,
    banner: String,
}

impl EnvConfig for ServerSettings {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::string("host", "HOST").required(),
        FieldSpec::integer("port", "PORT")
            .required()
            .default(DefaultValue::Int(8080)),
        FieldSpec::boolean("verbose", "VERBOSE"),
        FieldSpec::level("level", "LEVEL").default(DefaultValue::Level(LogLevel::Warn)),
        FieldSpec::string("banner", "BANNER").describe("Greeting printed at startup"),
    ];

    fn validate(&self) -> Result<(), Violation> {
        rules::port("port", self.port)
    }
}

fn env(pairs: &[(&str, &str)]) -> EnvSnapshot {
    pairs.iter().copied().collect()
}

#[test]
fn test_round_trip_all_fields_present() {
    let loader = ConfigLoader::new(env(&[
        ("HOST", "api.local"),
        ("PORT", "9000"),
        ("VERBOSE", "true"),
        ("LEVEL", "debug"),
        ("BANNER", "hello"),
    ]));

    let settings: ServerSettings = loader.load().unwrap();
    assert_eq!(
        settings,
        ServerSettings {
            host: "api.local".into(),
            port: 9000,
            verbose: true,
            level: LogLevel::Debug,
            banner: "hello".into(),
        }
    );
}

#[test]
fn test_defaults_and_zero_values() {
    let loader = ConfigLoader::new(env(&[("HOST", "api.local")]));

    let settings: ServerSettings = loader.load().unwrap();
    assert_eq!(settings.port, 8080);
    assert_eq!(settings.level, LogLevel::Warn);
    assert!(!settings.verbose);
    assert_eq!(settings.banner, "");
}

#[test]
fn test_missing_required_names_field() {
    let loader = ConfigLoader::new(env(&[("PORT", "9000")]));

    let err = loader.load::<ServerSettings>().unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingRequired {
            field: "host",
            key: "HOST".into(),
        }
    );
}

#[test]
fn test_empty_value_counts_as_missing() {
    let loader = ConfigLoader::new(env(&[("HOST", ""), ("PORT", "")]));

    let err = loader.load::<ServerSettings>().unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::MissingRequired);
    assert_eq!(err.field(), Some("host"));
}

#[test]
fn test_required_with_default_falls_back() {
    let loader = ConfigLoader::new(env(&[("HOST", "h"), ("PORT", "")]));

    let settings: ServerSettings = loader.load().unwrap();
    assert_eq!(settings.port, 8080);
}

#[test]
fn test_invalid_integer_is_not_zeroed() {
    let loader = ConfigLoader::new(env(&[("HOST", "h"), ("PORT", "eighty")]));

    let err = loader.load::<ServerSettings>().unwrap_err();
    assert_eq!(
        err,
        ConfigError::InvalidValue {
            field: "port",
            key: "PORT".into(),
            expected: FieldKind::Integer,
        }
    );
}

#[test]
fn test_invalid_bool_and_level() {
    let loader = ConfigLoader::new(env(&[("HOST", "h"), ("VERBOSE", "yes")]));
    let err = loader.load::<ServerSettings>().unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::InvalidValue);
    assert_eq!(err.key(), Some("VERBOSE"));

    let loader = ConfigLoader::new(env(&[("HOST", "h"), ("LEVEL", "loud")]));
    let err = loader.load::<ServerSettings>().unwrap_err();
    assert_eq!(err.key(), Some("LEVEL"));
}

#[test]
fn test_prefix_selects_namespace() {
    let snapshot = env(&[("A_HOST", "a.local")]);

    let with_a: ServerSettings = ConfigLoader::new(snapshot.clone())
        .with_prefix("A")
        .load()
        .unwrap();
    assert_eq!(with_a.host, "a.local");

    let err = ConfigLoader::new(snapshot)
        .with_prefix("B")
        .load::<ServerSettings>()
        .unwrap_err();
    assert_eq!(
        err,
        ConfigError::MissingRequired {
            field: "host",
            key: "B_HOST".into(),
        }
    );
}

#[test]
fn test_empty_prefix_is_no_prefix() {
    let loader = ConfigLoader::new(env(&[("HOST", "plain")])).with_prefix("");
    assert_eq!(loader.prefix(), None);
    assert_eq!(loader.key_for("HOST"), "HOST");

    let settings: ServerSettings = loader.load().unwrap();
    assert_eq!(settings.host, "plain");
}

#[test]
fn test_semantic_validation_on_port() {
    for bad in ["0", "-1", "65536"] {
        let loader = ConfigLoader::new(env(&[("HOST", "h"), ("PORT", bad)]));
        let err = loader.load::<ServerSettings>().unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::SemanticInvalid, "port {bad}");
        assert_eq!(err.field(), Some("port"));
        assert_eq!(err.key(), Some("PORT"));
    }

    for good in ["1", "65535"] {
        let loader = ConfigLoader::new(env(&[("HOST", "h"), ("PORT", good)]));
        assert!(loader.load::<ServerSettings>().is_ok(), "port {good}");
    }
}

#[test]
fn test_semantic_error_key_carries_prefix() {
    let loader = ConfigLoader::new(env(&[("SVC_HOST", "h"), ("SVC_PORT", "0")])).with_prefix("SVC");

    let err = loader.load::<ServerSettings>().unwrap_err();
    assert_eq!(err.key(), Some("SVC_PORT"));
}

#[test]
fn test_loaded_config_ignores_later_env_changes() {
    // SAFETY: 变量名只在本测试中使用
    unsafe {
        std::env::set_var("KEEL_SNAPSHOT_HOST", "first");
        std::env::set_var("KEEL_SNAPSHOT_PORT", "9100");
    }

    let settings: ServerSettings = crate::load_prefixed("KEEL_SNAPSHOT").unwrap();
    let loader = ConfigLoader::from_env().with_prefix("KEEL_SNAPSHOT");

    unsafe {
        std::env::set_var("KEEL_SNAPSHOT_HOST", "second");
    }

    assert_eq!(settings.host, "first");
    assert_eq!(settings.port, 9100);
    assert_eq!(loader.load::<ServerSettings>().unwrap().host, "first");

    // 新的加载看到新值
    let reloaded: ServerSettings = crate::load_prefixed("KEEL_SNAPSHOT").unwrap();
    assert_eq!(reloaded.host, "second");

    unsafe {
        std::env::remove_var("KEEL_SNAPSHOT_HOST");
        std::env::remove_var("KEEL_SNAPSHOT_PORT");
    }
}

#[derive(Debug, Deserialize)]
struct TokenSettings {
    token: String,
    retries: i64,
}

impl EnvConfig for TokenSettings {
    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec::string("token", "KEEL_UNPREFIXED_TOKEN").required(),
        FieldSpec::integer("retries", "KEEL_UNPREFIXED_RETRIES").default(DefaultValue::Int(3)),
    ];
}

#[test]
fn test_load_reads_process_env() {
    // SAFETY: 变量名只在本测试中使用
    unsafe {
        std::env::set_var("KEEL_UNPREFIXED_TOKEN", "abc");
    }

    let settings: TokenSettings = crate::load().unwrap();
    assert_eq!(settings.token, "abc");
    assert_eq!(settings.retries, 3);

    unsafe {
        std::env::remove_var("KEEL_UNPREFIXED_TOKEN");
    }
}

#[cfg(unix)]
mod non_unicode {
    use std::ffi::OsString;
    use std::os::unix::ffi::OsStringExt;

    use super::*;

    fn env_with_raw_host(extra: &[(&str, &str)]) -> EnvSnapshot {
        let mut vars = vec![(
            OsString::from("SVC_HOST"),
            OsString::from_vec(b"pa\xffss".to_vec()),
        )];
        vars.extend(
            extra
                .iter()
                .map(|&(k, v)| (OsString::from(k), OsString::from(v))),
        );
        EnvSnapshot::from_os(vars)
    }

    #[test]
    fn test_required_field_is_invalid_not_missing() {
        let loader = ConfigLoader::new(env_with_raw_host(&[])).with_prefix("SVC");

        let err = loader.load::<ServerSettings>().unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                field: "host",
                key: "SVC_HOST".into(),
                expected: FieldKind::String,
            }
        );
    }

    #[test]
    fn test_defaulted_field_is_not_silently_defaulted() {
        const FIELDS: &[FieldSpec] =
            &[FieldSpec::string("host", "HOST").default(DefaultValue::Str("localhost"))];

        let err = ConfigLoader::new(env_with_raw_host(&[]))
            .with_prefix("SVC")
            .resolve(FIELDS)
            .unwrap_err();
        assert_eq!(err.kind(), ConfigErrorKind::InvalidValue);
        assert_eq!(err.key(), Some("SVC_HOST"));
    }

    #[test]
    fn test_other_prefix_unaffected() {
        let loader =
            ConfigLoader::new(env_with_raw_host(&[("APP_HOST", "ok")])).with_prefix("APP");

        let settings: ServerSettings = loader.load().unwrap();
        assert_eq!(settings.host, "ok");
    }
}

#[test]
fn test_resolve_generic_table() {
    const FIELDS: &[FieldSpec] = &[
        FieldSpec::string("name", "NAME").required(),
        FieldSpec::boolean("debug", "DEBUG").default(DefaultValue::Bool(true)),
    ];

    let resolved = ConfigLoader::new(env(&[("NAME", "svc")]))
        .resolve(FIELDS)
        .unwrap();

    assert_eq!(resolved.len(), 2);
    assert_eq!(resolved.get("name"), Some(&Value::Str("svc".into())));
    assert_eq!(resolved.get("debug"), Some(&Value::Bool(true)));
    let order: Vec<_> = resolved.iter().map(|(field, _)| field).collect();
    assert_eq!(order, vec!["name", "debug"]);
}

#[test]
fn test_duplicate_names_rejected() {
    const FIELDS: &[FieldSpec] = &[
        FieldSpec::string("a", "SAME"),
        FieldSpec::string("b", "SAME"),
    ];

    let err = ConfigLoader::new(EnvSnapshot::default())
        .resolve(FIELDS)
        .unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Definition);
}

#[test]
fn test_mismatched_default_rejected() {
    const FIELDS: &[FieldSpec] = &[FieldSpec::integer("port", "PORT").default(DefaultValue::Str("80"))];

    let err = ConfigLoader::new(EnvSnapshot::default())
        .resolve(FIELDS)
        .unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Definition);
}

#[test]
fn test_table_struct_mismatch_is_mapping_error() {
    #[derive(Debug, Deserialize)]
    #[allow(dead_code)]
    struct Wrong {
        host: i64,
    }

    impl EnvConfig for Wrong {
        const FIELDS: &'static [FieldSpec] = &[FieldSpec::string("host", "HOST")];
    }

    let err = ConfigLoader::new(env(&[("HOST", "x")]))
        .load::<Wrong>()
        .unwrap_err();
    assert_eq!(err.kind(), ConfigErrorKind::Mapping);
}

#[test]
fn test_usage_lists_prefixed_keys() {
    let text = crate::usage::<ServerSettings>(Some("APP"));
    let lines: Vec<&str> = text.lines().collect();

    assert!(lines[0].starts_with("KEY"));
    assert!(lines[0].ends_with("DESCRIPTION"));
    assert_eq!(lines.len(), 1 + ServerSettings::FIELDS.len());
    assert!(lines[1].starts_with("APP_HOST"));
    assert!(lines[2].contains("8080"));
    assert!(lines[5].ends_with("Greeting printed at startup"));
}
