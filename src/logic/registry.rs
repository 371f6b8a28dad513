//! Event registry: one Event per (name, edition), each attached to its organization.

use crate::logic::classifier;
use crate::models::{Event, IntakeState, Organization};

/// Return the event `"{name} {edition}"`, creating it on first sight.
///
/// A new event is attributed by classifying `location`; when no organization matches,
/// a fresh one is created with the location as id, name and sole keyword. An existing
/// event is returned unchanged and `location` is not looked at again.
pub fn get_or_create_event<'a>(
    state: &'a mut IntakeState,
    name: &str,
    edition: &str,
    location: &str,
) -> &'a Event {
    let id = Event::event_id(name, edition);
    let index = match state.event_position(&id) {
        Some(i) => i,
        None => {
            let organizer = match classifier::resolve(&state.organizations, location) {
                Some(org_id) => org_id,
                None => {
                    log::debug!("New organization {:?}", location);
                    state.insert_organization(Organization::from_location(location))
                }
            };
            if let Some(org) = state.organization_mut(&organizer) {
                org.events.push(id.clone());
            }
            log::debug!("New event {:?} organized by {:?}", id, organizer);
            state.insert_event(Event::new(name, edition, organizer))
        }
    };
    &state.events[index]
}
