// src/specs/mod.rs
//! # Source "specs" module
//!
//! One spec per remote source. Each spec knows the shape of its payload and
//! *where the ground truth lives* in it, and turns that into the crate's own
//! types (`recruit::Operator`, `operator::model::*`).
//!
//! ## What lives here
//! - **Payload shapes** for the JSON feeds (serde structs, lenient where the
//!   game data is inconsistent, e.g. rarity as a number or a `TIER_N` code).
//! - **Selector choice** for the Gamepress HTML page, using `core::html`
//!   helpers (class blocks, tag stripping, entity/whitespace normalization).
//! - **Light shaping**: name fixes, placeholder filling, unlock labels.
//!
//! ## What does **not** live here
//! - Choosing between sources or falling back (`operator::lookup`).
//! - Combination math and ranking (`recruit`).
//! - Printing (`format`).
//!
//! ## Current specs
//! - `recruitment` – the recruitable-operator feed (name, rarity, tags, class).
//! - `character_table` – character, skill and building tables from game data.
//! - `gamepress` – one operator's Gamepress page.
//!
//! Every spec takes a `&dyn Fetch`, so tests run offline against
//! `FixtureFetcher` payloads.
pub mod character_table;
pub mod gamepress;
pub mod recruitment;
