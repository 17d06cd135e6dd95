use std::cell::RefCell;
use std::rc::Rc;

use cookie::SameSite;
use lgpd_consent::categories::config::ProjectCategoriesConfig;
use lgpd_consent::state::actions::ConsentAction;
use lgpd_consent::state::engine::{ConsentEngine, EngineOptions};
use lgpd_consent::storage::cell::{ConsentStorage, MemoryCookieJar};
use lgpd_consent::storage::codec::{self, SCHEMA_VERSION};
use lgpd_consent::storage::key::build_storage_key;
use lgpd_consent::storage::options::ConsentCookieOptions;

type SharedJar = Rc<RefCell<MemoryCookieJar>>;

fn config() -> ProjectCategoriesConfig {
    ProjectCategoriesConfig::with_enabled(&["analytics"])
}

#[test]
fn test_persisted_wire_format_is_camel_case_json() {
    let jar: SharedJar = Rc::default();
    let mut engine = ConsentEngine::new(
        config(),
        EngineOptions::default(),
        Box::new(Rc::clone(&jar)),
    );
    engine.dispatch(ConsentAction::AcceptAll);

    let raw = jar.borrow().read("lgpd-consent__v1").unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();

    assert_eq!(json["schemaVersion"], SCHEMA_VERSION);
    assert_eq!(json["consented"], true);
    assert_eq!(json["preferences"]["necessary"], true);
    assert_eq!(json["preferences"]["analytics"], true);
    assert_eq!(json["source"], "banner");
    assert!(json["consentDate"].as_str().is_some());
    assert!(json["lastUpdate"].as_str().is_some());
    assert_eq!(
        json["projectConfigSnapshot"]["enabledCategories"][0],
        "analytics"
    );
}

#[test]
fn test_persisted_cell_carries_cookie_attributes() {
    let jar: SharedJar = Rc::default();
    let mut engine = ConsentEngine::new(
        config(),
        EngineOptions {
            cookie: ConsentCookieOptions {
                domain: Some("portal.example.gov.br".to_string()),
                same_site: SameSite::Strict,
                max_age_days: 180,
                ..Default::default()
            },
            secure_origin: true,
            ..Default::default()
        },
        Box::new(Rc::clone(&jar)),
    );
    engine.dispatch(ConsentAction::AcceptAll);

    let jar_ref = jar.borrow();
    let cell = jar_ref.cookie("lgpd-consent__v1").unwrap();
    assert_eq!(cell.path(), Some("/"));
    assert_eq!(cell.domain(), Some("portal.example.gov.br"));
    assert_eq!(cell.same_site(), Some(SameSite::Strict));
    assert_eq!(cell.secure(), Some(true));
    assert_eq!(cell.max_age(), Some(time::Duration::days(180)));
}

#[test]
fn test_engine_ignores_foreign_schema_version() {
    let mut jar = MemoryCookieJar::new();
    jar.write(cookie::Cookie::new(
        "lgpd-consent__v1",
        r#"{"schemaVersion":"0.9","consented":true,"preferences":{"necessary":true}}"#.to_string(),
    ));

    let engine = ConsentEngine::new(config(), EngineOptions::default(), Box::new(jar));
    // Worst case by design: the banner reappears.
    assert!(!engine.state().record.consented);
}

#[test]
fn test_engine_migrates_legacy_record() {
    let mut jar = MemoryCookieJar::new();
    jar.write(cookie::Cookie::new(
        "lgpd-consent__v1",
        r#"{"consented":true,"preferences":{"necessary":true,"analytics":true},"consentDate":"2022-06-01T12:00:00Z"}"#
            .to_string(),
    ));

    let engine = ConsentEngine::new(config(), EngineOptions::default(), Box::new(jar));
    assert!(engine.state().record.consented);
    assert_eq!(engine.state().record.schema_version, SCHEMA_VERSION);
    assert_eq!(engine.preferences().get("analytics"), Some(true));
}

#[test]
fn test_custom_namespace_and_version_key() {
    let jar: SharedJar = Rc::default();
    let mut engine = ConsentEngine::new(
        config(),
        EngineOptions {
            namespace: Some("Portal.GOV".to_string()),
            version: Some("2025 Q4".to_string()),
            ..Default::default()
        },
        Box::new(Rc::clone(&jar)),
    );
    assert_eq!(engine.storage_key(), "portal.gov__v2025-q4");

    engine.dispatch(ConsentAction::AcceptAll);
    assert!(jar.borrow().read("portal.gov__v2025-q4").is_some());
    assert_eq!(
        engine.storage_key(),
        build_storage_key(Some("Portal.GOV"), Some("2025 Q4"))
    );
}

#[test]
fn test_decode_of_corrupted_cell_degrades_to_no_prior_consent() {
    for raw in [
        "",
        "null",
        "\"just a string\"",
        "{\"schemaVersion\":1.0}",
        "{truncated",
    ] {
        assert!(
            codec::decode(Some(raw)).is_none(),
            "payload {raw:?} should decode to None"
        );
    }
}
