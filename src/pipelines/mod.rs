//! The two harvest pipelines.
//!
//! Each pipeline is a checkpointed crawl controller: it walks a fixed list
//! of crawl units strictly in order, fetches and extracts per unit, merges
//! into its store, and persists the full snapshot after every unit. Units
//! that fail to fetch are skipped, never fatal; re-running after an
//! interruption replays the same idempotent merges on top of the persisted
//! snapshot.
//!
//! - [`votes`] harvests roll-call results per legislative period into the
//!   dataset file.
//! - [`contacts`] harvests the phone/address listing, per-member profile
//!   images, and the e-mail listing into the contacts file.

pub mod contacts;
pub mod votes;
