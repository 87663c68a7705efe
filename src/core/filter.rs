//! Candidate filtering by case-insensitive name substring matching.
//!
//! No ranking: matches come back in source order.

use super::person::Person;

/// Return the people whose name contains `query`, ignoring case.
///
/// A query that is empty after trimming matches everyone.  The query itself
/// is matched untrimmed, so `"an "` only matches names with `"an "` in them.
pub fn filter_people(people: &[Person], query: &str) -> Vec<Person> {
    if query.trim().is_empty() {
        return people.to_vec();
    }

    let needle = query.to_lowercase();
    people
        .iter()
        .filter(|p| p.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}
