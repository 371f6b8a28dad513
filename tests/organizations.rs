//! Integration tests for organization classification and the event registry.

use match_history_intake::config::parse_organizations;
use match_history_intake::{
    classify, get_or_create_event, resolve, Classification, IntakeState, Keyword, Organization,
};

fn arena() -> Organization {
    Organization::new("arena", "Arena Group", ["Arena", "!OldArena"])
}

#[test]
fn keyword_parsing_recognizes_exclusions() {
    assert_eq!(Keyword::parse("Arena"), Keyword::Include("Arena".into()));
    assert_eq!(Keyword::parse("!OldArena"), Keyword::Exclude("OldArena".into()));
    assert!(!Keyword::parse("").found_in("anything"));
}

#[test]
fn exclusion_vetoes_an_earlier_positive_match() {
    let org = arena();
    assert_eq!(classify(&org, "OldArena Main Hall"), Classification::Excluded);
    assert_eq!(classify(&org, "Arena Main Hall"), Classification::Matched("arena".into()));
    assert_eq!(classify(&org, "Community Center"), Classification::NoMatch);
    assert_eq!(resolve(&[org], "OldArena Main Hall"), None);
}

#[test]
fn exclusion_before_the_positive_keyword_also_vetoes() {
    let org = Organization::new("arena", "Arena Group", ["!OldArena", "Arena"]);
    assert_eq!(classify(&org, "OldArena Main Hall"), Classification::Excluded);
}

#[test]
fn later_organization_is_tried_after_a_veto() {
    let orgs = vec![
        arena(),
        Organization::new("old", "Old Arena Society", ["OldArena"]),
    ];
    assert_eq!(resolve(&orgs, "OldArena Main Hall"), Some("old".to_string()));
}

#[test]
fn first_matching_organization_wins() {
    let orgs = vec![
        Organization::new("first", "First", ["Hall"]),
        Organization::new("second", "Second", ["Main Hall"]),
    ];
    assert_eq!(resolve(&orgs, "Main Hall"), Some("first".to_string()));
}

#[test]
fn new_event_is_attached_to_classified_organization() {
    let mut state = IntakeState::with_organizations(vec![arena()]);
    let event = get_or_create_event(&mut state, "Cup", "2024", "Arena East");
    assert_eq!(event.id, "Cup 2024");
    assert_eq!(event.organizer, "arena");
    assert_eq!(state.organizations.len(), 1);
    assert_eq!(state.organization("arena").unwrap().events, vec!["Cup 2024".to_string()]);
}

#[test]
fn unknown_location_creates_organization() {
    let mut state = IntakeState::with_organizations(vec![arena()]);
    let organizer = get_or_create_event(&mut state, "Cup", "2024", "OldArena Main Hall")
        .organizer
        .clone();
    assert_eq!(organizer, "OldArena Main Hall");
    let org = state.organization("OldArena Main Hall").unwrap();
    assert_eq!(org.name, "OldArena Main Hall");
    assert_eq!(org.keywords, vec![Keyword::Include("OldArena Main Hall".into())]);
    assert_eq!(org.events, vec!["Cup 2024".to_string()]);

    // The new organization now recognizes its own location.
    let again = get_or_create_event(&mut state, "Open", "1", "OldArena Main Hall");
    assert_eq!(again.organizer, "OldArena Main Hall");
    assert_eq!(state.organizations.len(), 2);
}

#[test]
fn events_are_created_once_per_name_and_edition() {
    let mut state = IntakeState::new();
    get_or_create_event(&mut state, "Cup", "2024", "Arena");
    let event = get_or_create_event(&mut state, "Cup", "2024", "Somewhere Else");
    assert_eq!(event.organizer, "Arena");
    assert_eq!(state.events.len(), 1);
    assert!(state.organization("Somewhere Else").is_none());

    get_or_create_event(&mut state, "Cup", "2025", "Arena");
    assert_eq!(state.events.len(), 2);
    assert_eq!(state.organization("Arena").unwrap().events.len(), 2);
}

#[test]
fn blank_location_does_not_duplicate_organizations() {
    let mut state = IntakeState::new();
    get_or_create_event(&mut state, "A", "1", "");
    get_or_create_event(&mut state, "B", "1", "");
    assert_eq!(state.organizations.len(), 1);
    assert_eq!(state.organization("").unwrap().events.len(), 2);
}

#[test]
fn seed_organizations_load_from_json() {
    let orgs = parse_organizations(
        r#"[{"id": "arena", "name": "Arena Group", "keywords": ["Arena", "!OldArena"]}]"#,
    )
    .unwrap();
    assert_eq!(orgs, vec![arena()]);
    assert!(parse_organizations("{").is_err());
}
