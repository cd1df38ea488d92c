//! Core data model: members, bills, and the two keyed stores.
//!
//! Identity is the normalized name. Both [`Dataset`] (the voting dataset)
//! and [`ContactBook`] (the contacts file) enforce at most one entry per
//! normalized name via a side index, so lookups and upserts never scan the
//! whole collection. The field-level merge contract lives in [`merge_mp`]
//! and is shared by both stores.

use crate::normalize::normalize;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, HashMap};

/// One member of parliament, as accumulated across every source.
///
/// Created only from a primary listing (a voting table or the phone list);
/// secondary listings may fill empty fields but never create an entry.
/// `votes` maps bill id to the member's recorded outcome.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Mp {
    pub name: String,
    #[serde(default)]
    pub province: String,
    #[serde(default)]
    pub party: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub telephones: Vec<String>,
    #[serde(default)]
    pub faxes: Vec<String>,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub votes: BTreeMap<String, String>,
}

/// A bill as first seen on a voting page. Never mutated once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub title: String,
    pub date: String,
}

/// Derive the stable identifier for a bill title.
///
/// SHA-256 of the trimmed title, hex-encoded. The id must be identical
/// across runs and processes for the same title string, which rules out
/// anything seeded per-process.
pub fn bill_id(title: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.trim().as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Merge newly observed fields into an existing member record.
///
/// Rule: a field keeps its existing value unless it is currently empty and
/// the incoming value is non-empty. Lists follow the same rule wholesale.
/// The vote map is the exception: it is merged entry by entry, adding new
/// bill ids and overwriting outcomes for ids already present, which makes
/// re-processing the same voting page idempotent.
pub fn merge_mp(existing: &mut Mp, incoming: Mp) {
    keep_nonempty(&mut existing.name, incoming.name);
    keep_nonempty(&mut existing.province, incoming.province);
    keep_nonempty(&mut existing.party, incoming.party);
    keep_nonempty(&mut existing.address, incoming.address);
    keep_nonempty(&mut existing.email, incoming.email);
    keep_nonempty(&mut existing.image_url, incoming.image_url);
    if existing.telephones.is_empty() && !incoming.telephones.is_empty() {
        existing.telephones = incoming.telephones;
    }
    if existing.faxes.is_empty() && !incoming.faxes.is_empty() {
        existing.faxes = incoming.faxes;
    }
    for (bill, outcome) in incoming.votes {
        existing.votes.insert(bill, outcome);
    }
}

fn keep_nonempty(existing: &mut String, incoming: String) {
    if existing.is_empty() && !incoming.is_empty() {
        *existing = incoming;
    }
}

/// The persisted voting dataset: every bill and every member seen so far.
///
/// `mps` is keyed by the canonical display name; `name_index` maps the
/// normalized name to that key and is rebuilt after deserialization.
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub last_updated: String,
    #[serde(default)]
    pub bills: BTreeMap<String, Bill>,
    #[serde(default)]
    pub mps: BTreeMap<String, Mp>,
    #[serde(skip)]
    name_index: HashMap<String, String>,
}

impl Dataset {
    /// Rebuild the normalized-name index from `mps`. Call after loading.
    pub fn rebuild_index(&mut self) {
        self.name_index = self
            .mps
            .keys()
            .map(|display| (normalize(display), display.clone()))
            .collect();
    }

    /// Register a bill under `id` on first encounter; later encounters of
    /// the same id leave the stored title and date untouched.
    pub fn upsert_bill(&mut self, id: String, bill: Bill) {
        self.bills.entry(id).or_insert(bill);
    }

    /// Insert or merge a member, keyed by the normalized form of its name.
    pub fn upsert_mp(&mut self, incoming: Mp) {
        let key = normalize(&incoming.name);
        match self.name_index.get(&key) {
            Some(display) => {
                let existing = self
                    .mps
                    .get_mut(display)
                    .expect("name index points at a missing record");
                merge_mp(existing, incoming);
            }
            None => {
                self.name_index.insert(key, incoming.name.clone());
                self.mps.insert(incoming.name.clone(), incoming);
            }
        }
    }

    /// Exact lookup on the normalized-name index.
    pub fn find_by_normalized_name(&self, key: &str) -> Option<&Mp> {
        self.mps.get(self.name_index.get(key)?)
    }
}

/// The contacts file: member records keyed by the raw scraped name.
///
/// Serializes as a plain name-to-record map. Same identity rules as
/// [`Dataset`]: one entry per normalized name, merged under [`merge_mp`].
#[derive(Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactBook {
    pub entries: BTreeMap<String, Mp>,
    #[serde(skip)]
    name_index: HashMap<String, String>,
}

impl ContactBook {
    pub fn rebuild_index(&mut self) {
        self.name_index = self
            .entries
            .keys()
            .map(|raw| (normalize(raw), raw.clone()))
            .collect();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or merge a record under the raw scraped name, with identity
    /// decided by the normalized form of that name.
    pub fn upsert(&mut self, raw_key: String, incoming: Mp) {
        let key = normalize(&raw_key);
        match self.name_index.get(&key) {
            Some(existing_key) => {
                let existing = self
                    .entries
                    .get_mut(existing_key)
                    .expect("name index points at a missing record");
                merge_mp(existing, incoming);
            }
            None => {
                self.name_index.insert(key, raw_key.clone());
                self.entries.insert(raw_key, incoming);
            }
        }
    }

    /// Mutable lookup on the normalized-name index, used by the reconciler.
    pub fn find_mut_by_normalized_name(&mut self, key: &str) -> Option<&mut Mp> {
        let raw_key = self.name_index.get(key)?;
        self.entries.get_mut(raw_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mp(name: &str) -> Mp {
        Mp {
            name: name.to_string(),
            ..Mp::default()
        }
    }

    #[test]
    fn test_bill_id_stable() {
        let a = bill_id("Some Bill About Roads");
        let b = bill_id("Some Bill About Roads");
        assert_eq!(a, b);
        assert_eq!(a, bill_id("  Some Bill About Roads  "));
    }

    #[test]
    fn test_bill_id_distinct_titles() {
        assert_ne!(bill_id("Bill A"), bill_id("Bill B"));
    }

    #[test]
    fn test_merge_keeps_populated_fields() {
        let mut existing = mp("Ali Veli");
        existing.email = "a@b.com".to_string();
        let mut incoming = mp("Ali Veli");
        incoming.email = String::new();
        merge_mp(&mut existing, incoming);
        assert_eq!(existing.email, "a@b.com");
    }

    #[test]
    fn test_merge_fills_empty_fields() {
        let mut existing = mp("Ali Veli");
        let mut incoming = mp("Ali Veli");
        incoming.party = "Parti X".to_string();
        incoming.telephones = vec!["+90 312 1234567".to_string()];
        merge_mp(&mut existing, incoming);
        assert_eq!(existing.party, "Parti X");
        assert_eq!(existing.telephones, vec!["+90 312 1234567"]);
    }

    #[test]
    fn test_merge_does_not_replace_populated_list() {
        let mut existing = mp("Ali Veli");
        existing.telephones = vec!["+90 312 1111111".to_string()];
        let mut incoming = mp("Ali Veli");
        incoming.telephones = vec!["+90 312 2222222".to_string()];
        merge_mp(&mut existing, incoming);
        assert_eq!(existing.telephones, vec!["+90 312 1111111"]);
    }

    #[test]
    fn test_vote_merge_idempotent() {
        let mut existing = mp("Ali Veli");
        let mut incoming = mp("Ali Veli");
        incoming
            .votes
            .insert(bill_id("Bill A"), "Kabul".to_string());
        merge_mp(&mut existing, incoming.clone());
        let after_once = existing.clone();
        merge_mp(&mut existing, incoming);
        assert_eq!(existing, after_once);
        assert_eq!(existing.votes.len(), 1);
    }

    #[test]
    fn test_vote_merge_adds_new_bills() {
        let mut existing = mp("Ali Veli");
        existing.votes.insert(bill_id("Bill A"), "Kabul".to_string());
        let mut incoming = mp("Ali Veli");
        incoming.votes.insert(bill_id("Bill B"), "Ret".to_string());
        merge_mp(&mut existing, incoming);
        assert_eq!(existing.votes.len(), 2);
        assert_eq!(existing.votes[&bill_id("Bill A")], "Kabul");
    }

    #[test]
    fn test_dataset_one_entry_per_normalized_name() {
        let mut dataset = Dataset::default();
        dataset.upsert_mp(mp("Ali Veli"));
        dataset.upsert_mp(mp("ALİ VELİ"));
        assert_eq!(dataset.mps.len(), 1);
        assert!(dataset.mps.contains_key("Ali Veli"));
    }

    #[test]
    fn test_dataset_find_by_normalized_name() {
        let mut dataset = Dataset::default();
        let mut member = mp("Ali Veli");
        member.party = "Parti X".to_string();
        dataset.upsert_mp(member);
        let found = dataset.find_by_normalized_name("aliveli").unwrap();
        assert_eq!(found.party, "Parti X");
        assert!(dataset.find_by_normalized_name("nosuch").is_none());
    }

    #[test]
    fn test_dataset_rebuild_index_after_load() {
        let mut dataset = Dataset::default();
        dataset.upsert_mp(mp("Ali Veli"));
        let json = serde_json::to_string(&dataset).unwrap();
        let mut reloaded: Dataset = serde_json::from_str(&json).unwrap();
        assert!(reloaded.find_by_normalized_name("aliveli").is_none());
        reloaded.rebuild_index();
        assert!(reloaded.find_by_normalized_name("aliveli").is_some());
    }

    #[test]
    fn test_upsert_bill_never_mutates() {
        let mut dataset = Dataset::default();
        let id = bill_id("Bill A");
        dataset.upsert_bill(
            id.clone(),
            Bill {
                title: "Bill A".to_string(),
                date: "2026-01-01".to_string(),
            },
        );
        dataset.upsert_bill(
            id.clone(),
            Bill {
                title: "Bill A".to_string(),
                date: "2026-02-02".to_string(),
            },
        );
        assert_eq!(dataset.bills[&id].date, "2026-01-01");
    }

    #[test]
    fn test_contact_book_upsert_matches_across_casing() {
        let mut book = ContactBook::default();
        let mut first = mp("Ali Veli");
        first.party = "Parti X".to_string();
        book.upsert("ALİ VELİ".to_string(), first);
        let mut second = mp("Ali Veli");
        second.address = "Adres".to_string();
        book.upsert("Ali Veli".to_string(), second);
        assert_eq!(book.len(), 1);
        let entry = &book.entries["ALİ VELİ"];
        assert_eq!(entry.party, "Parti X");
        assert_eq!(entry.address, "Adres");
    }

    #[test]
    fn test_contact_book_serializes_as_plain_map() {
        let mut book = ContactBook::default();
        book.upsert("ALİ VELİ".to_string(), mp("Ali Veli"));
        let json = serde_json::to_string(&book).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert!(value.get("ALİ VELİ").is_some());
        // No votes key on contact entries with an empty vote map.
        assert!(value["ALİ VELİ"].get("votes").is_none());
        assert_eq!(value["ALİ VELİ"]["email"], "");
    }
}
