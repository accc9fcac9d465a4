use super::*;

#[test]
fn defaults_apply_when_nothing_is_configured() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::INFO);
    assert!(matches!(settings.logging.format, LogFormat::Compact));
    assert_eq!(settings.database.url, None);
    assert_eq!(settings.database.max_connections.get(), DEFAULT_DB_MAX_CONNECTIONS);
    assert!(settings.cache.enabled);
    assert_eq!(settings.cache.countries_ttl_minutes, 60);
    assert_eq!(settings.cache.persons_ttl_minutes, 10);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("info".to_string());
    raw.database.url = Some("postgres://file/roster".to_string());
    raw.cache.enabled = Some(true);

    let overrides = GlobalOverrides {
        log_level: Some("debug".to_string()),
        database_url: Some("postgres://cli/roster".to_string()),
        cache_enabled: Some(false),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
    assert_eq!(settings.database.url.as_deref(), Some("postgres://cli/roster"));
    assert!(!settings.cache.enabled);
}

#[test]
fn cli_json_logging_enforces_format() {
    let mut raw = RawSettings::default();
    let overrides = GlobalOverrides {
        log_json: Some(true),
        ..Default::default()
    };

    raw.apply_overrides(&overrides);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn blank_database_url_is_treated_as_missing() {
    let mut raw = RawSettings::default();
    raw.database.url = Some("   ".to_string());

    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.database.url, None);
}

#[test]
fn zero_connections_are_rejected() {
    let mut raw = RawSettings::default();
    raw.database.max_connections = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero pool size");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "database.max_connections",
            ..
        }
    ));
}

#[test]
fn unknown_log_level_is_rejected() {
    let mut raw = RawSettings::default();
    raw.logging.level = Some("chatty".to_string());

    let err = Settings::from_raw(raw).expect_err("invalid level");
    assert!(matches!(err, LoadError::Invalid { key: "logging.level", .. }));
}

#[test]
fn zero_ttl_is_kept_as_no_expiration() {
    let mut raw = RawSettings::default();
    raw.cache.countries_ttl_minutes = Some(0);

    let settings = Settings::from_raw(raw).expect("valid settings");
    let cache = crate::cache::CacheConfig::from(&settings.cache);
    assert_eq!(cache.countries_expiration(), None);
    assert_eq!(cache.persons_expiration(), Some(10));
}

#[test]
fn parses_person_list_arguments() {
    let args = RosterArgs::try_parse_from([
        "roster",
        "persons",
        "list",
        "--search-by",
        "DateOfBirth",
        "--query",
        "01 02 1990",
        "--sort-by",
        "age",
        "--order",
        "desc",
    ])
    .expect("valid arguments");

    match args.command {
        Command::Persons(PersonsArgs {
            command: PersonsCommand::List(list),
        }) => {
            assert_eq!(
                list.search_by,
                crate::domain::types::PersonField::DateOfBirth
            );
            assert_eq!(list.query.as_deref(), Some("01 02 1990"));
            assert_eq!(list.sort_by, Some(crate::domain::types::PersonField::Age));
            assert_eq!(list.order, crate::domain::types::SortDirection::Descending);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn rejects_malformed_date_of_birth_argument() {
    let result = RosterArgs::try_parse_from([
        "roster",
        "persons",
        "add",
        "--name",
        "Ana",
        "--date-of-birth",
        "1990-02-01",
    ]);
    assert!(result.is_err());
}
