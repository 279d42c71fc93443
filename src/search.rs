//! Search and status filtering for visitor listings

use crate::models::visitor::{StatusFilter, Visitor, VisitorStatus};

/// Case-insensitive match on name, house number and pass id; the CNIC is
/// matched as an exact substring. An empty term matches every visitor.
pub fn matches_search(visitor: &Visitor, term: &str) -> bool {
    let needle = term.to_lowercase();
    visitor.name.to_lowercase().contains(&needle)
        || visitor.cnic.contains(term)
        || visitor.house_number.to_lowercase().contains(&needle)
        || visitor.id.to_lowercase().contains(&needle)
}

/// Visitors matching both the search term and the status filter, in input order
pub fn filter_visitors(visitors: &[Visitor], term: &str, status: StatusFilter) -> Vec<Visitor> {
    visitors
        .iter()
        .filter(|v| status.matches(v.status) && matches_search(v, term))
        .cloned()
        .collect()
}

/// Most recently created first
pub fn newest_first(mut visitors: Vec<Visitor>) -> Vec<Visitor> {
    visitors.reverse();
    visitors
}

/// Pre-approved visitors that have not left yet, in insertion order
pub fn pending_pre_approvals(visitors: &[Visitor]) -> Vec<Visitor> {
    visitors
        .iter()
        .filter(|v| v.pre_approved && v.status != VisitorStatus::CheckedOut)
        .cloned()
        .collect()
}
