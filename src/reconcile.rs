//! Cross-source reconciliation of secondary listings.
//!
//! Secondary sources enrich existing entries, they never originate identity:
//! a row whose normalized name matches nothing in the store is dropped, and
//! no entry is created for it. That asymmetry is deliberate — entries come
//! only from primary listings.

use crate::models::ContactBook;
use crate::normalize::normalize;
use tracing::debug;

/// Apply (raw name, e-mail) rows from the e-mail listing to `contacts`.
///
/// Each row's name is normalized and looked up; on a hit the e-mail is set
/// only if the entry has none yet. Returns the number of rows that matched
/// an existing entry.
pub fn apply_secondary_emails<I>(rows: I, contacts: &mut ContactBook) -> usize
where
    I: IntoIterator<Item = (String, String)>,
{
    let mut matched = 0;
    for (raw_name, email) in rows {
        let key = normalize(&raw_name);
        match contacts.find_mut_by_normalized_name(&key) {
            Some(entry) => {
                if entry.email.is_empty() && !email.is_empty() {
                    entry.email = email;
                }
                matched += 1;
            }
            None => {
                debug!(name = %raw_name, "No primary entry for secondary row; dropping");
            }
        }
    }
    matched
}
