//! VBB public-transport departures dashboard.
//!
//! Search for a station, select it, and watch upcoming departures with
//! per-line average delays. Departure data comes from a VBB-style transit
//! API whose response shape is only loosely specified; the normalization
//! core ([`normalize`]) turns it into a canonical, sorted board.

pub mod domain;
pub mod normalize;
pub mod vbb;
pub mod web;
