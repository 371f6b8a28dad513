//! Organization classification: attribute a location string to a known organization.

use crate::models::{Organization, OrganizationId};

/// Outcome of evaluating one organization's keywords against a search text.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Classification {
    /// A keyword matched and no exclusion was found.
    Matched(OrganizationId),
    /// An exclusion keyword was found; this organization is vetoed.
    Excluded,
    NoMatch,
}

/// Evaluate a single organization. Keywords are read in declaration order; an exclusion
/// found in the text vetoes the organization even if an earlier keyword already matched.
pub fn classify(org: &Organization, text: &str) -> Classification {
    let mut matched = false;
    for keyword in &org.keywords {
        if !keyword.found_in(text) {
            continue;
        }
        if keyword.is_exclusion() {
            return Classification::Excluded;
        }
        matched = true;
    }
    if matched {
        Classification::Matched(org.id.clone())
    } else {
        Classification::NoMatch
    }
}

/// First organization, in registration order, that matches `text` without being vetoed.
/// `None` tells the caller to create a new organization for the text.
pub fn resolve<'a, I>(organizations: I, text: &str) -> Option<OrganizationId>
where
    I: IntoIterator<Item = &'a Organization>,
{
    for org in organizations {
        match classify(org, text) {
            Classification::Matched(id) => return Some(id),
            Classification::Excluded => {
                log::debug!("Organization {:?} excluded for {:?}", org.id, text);
            }
            Classification::NoMatch => {}
        }
    }
    None
}
