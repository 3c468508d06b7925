//! Unit tests for the knowledge base.

use rstest::rstest;
use serde_json::json;
use time::UtcOffset;
use time::macros::offset;

use super::*;

fn with(key: &str, value: Value) -> KnowledgeBase {
    let mut overrides = KnowledgeBaseValues::new();
    overrides.insert(key.to_owned(), value);
    KnowledgeBase::new(Some(overrides))
}

#[test]
fn defaults_cover_every_well_known_key() {
    let knowledge_base = KnowledgeBase::new(None);
    for key in [HOSTNAME_KEY, ZONE_KEY, USERS_KEY, CODEPAGE_KEY] {
        assert!(knowledge_base.get(key).is_some(), "missing default for {key}");
    }
    assert_eq!(knowledge_base.hostname(), Ok(""));
    assert_eq!(knowledge_base.zone(), Ok(UtcOffset::UTC));
    assert_eq!(knowledge_base.codepage(), Ok("utf-8"));
    assert_eq!(knowledge_base.default_username(), Ok(Some("root".to_owned())));
}

#[test]
fn explicit_defaults_equal_no_overrides() {
    let implicit = KnowledgeBase::new(None);
    let explicit = KnowledgeBase::new(Some(KnowledgeBase::default_values()));
    assert_eq!(implicit, explicit);
    assert_eq!(implicit, KnowledgeBase::default());
}

#[test]
fn overrides_replace_only_their_keys() {
    let knowledge_base = with(HOSTNAME_KEY, json!("mbp.local"));
    assert_eq!(knowledge_base.hostname(), Ok("mbp.local"));
    assert_eq!(knowledge_base.zone(), Ok(UtcOffset::UTC));
}

#[test]
fn unknown_keys_are_kept() {
    let knowledge_base = with("guessed_os", json!("MacOSX"));
    assert_eq!(knowledge_base.get_str("guessed_os"), Ok(Some("MacOSX")));
    assert_eq!(knowledge_base.get_str("absent"), Ok(None));
}

#[rstest]
#[case::utc("UTC", UtcOffset::UTC)]
#[case::zulu("z", UtcOffset::UTC)]
#[case::east("+02:00", offset!(+2))]
#[case::west("-05:30", offset!(-5:30))]
fn zone_accepts_supported_forms(#[case] raw: &str, #[case] expected: UtcOffset) {
    assert_eq!(with(ZONE_KEY, json!(raw)).zone(), Ok(expected));
}

#[test]
fn zone_rejects_named_regions() {
    let error = with(ZONE_KEY, json!("Europe/Amsterdam"))
        .zone()
        .expect_err("named zones are unsupported");
    assert_eq!(
        error,
        KnowledgeBaseError::InvalidZone {
            value: "Europe/Amsterdam".into()
        }
    );
}

#[test]
fn non_string_hostname_is_rejected() {
    let error = with(HOSTNAME_KEY, json!(42))
        .hostname()
        .expect_err("numbers are not host names");
    assert!(matches!(error, KnowledgeBaseError::InvalidValue { .. }));
}

#[test]
fn users_deserialise_with_optional_fields() {
    let knowledge_base = with(
        USERS_KEY,
        json!([
            { "username": "dean", "uid": "501", "home": "/Users/dean" },
            { "username": "guest" }
        ]),
    );
    let users = knowledge_base.users().expect("users parse");
    assert_eq!(users.len(), 2);
    assert_eq!(users.first().map(UserAccount::uid), Some(Some("501")));
    assert_eq!(users.get(1).and_then(UserAccount::home), None);
}

#[test]
fn malformed_users_are_rejected() {
    let error = with(USERS_KEY, json!("root"))
        .users()
        .expect_err("a string is not a user list");
    assert!(error.to_string().contains("user accounts"), "message: {error}");
}

fn accounts() -> KnowledgeBase {
    with(
        USERS_KEY,
        json!([
            { "username": "daemon", "home": "/" },
            { "username": "nobody", "home": "" },
            { "username": "dean", "home": "/Users/dean/" },
            { "username": "shared", "home": "/Users" },
            { "username": "deanna", "home": "/Users/deanna" }
        ]),
    )
}

#[rstest]
#[case::own_home("/Users/dean/Library/Preferences/com.apple.dock.plist", Some("dean"))]
#[case::home_itself("/Users/dean", Some("dean"))]
#[case::longer_sibling_name("/Users/deanna/Library/x.plist", Some("deanna"))]
#[case::deepest_home_wins("/Users/Shared/x.plist", Some("shared"))]
#[case::root_home_is_ignored("/private/var/root/x.plist", None)]
#[case::relative_path("Users/dean/x.plist", None)]
fn user_for_path_matches_whole_components(#[case] path: &str, #[case] expected: Option<&str>) {
    let user = accounts().user_for_path(path).expect("users parse");
    assert_eq!(user.as_ref().map(UserAccount::username), expected);
}

#[test]
fn user_for_path_never_matches_a_partial_component() {
    let knowledge_base = with(
        USERS_KEY,
        json!([{ "username": "dean", "home": "/Users/dean" }]),
    );
    assert_eq!(
        knowledge_base.user_for_path("/Users/deanna/Library/x.plist"),
        Ok(None)
    );
}
