//! The departure-normalization core.
//!
//! Converts raw, schema-ambiguous departure records into the canonical,
//! sorted board. The upstream API's exact response shape is not fixed, so
//! every logical attribute is resolved by probing an ordered list of
//! candidate key paths ([`resolve`]) rather than by typed deserialization.
//!
//! The core is pure: no I/O, no clock access (the date used for sorting is
//! injected). A record that cannot be processed is dropped with a
//! diagnostic; it never aborts the rest of the board.

mod aggregate;
mod board;
mod resolve;

pub use aggregate::{LineDelay, MAX_CHART_LINES, average_delay_by_line};
pub use board::{Diagnostic, NormalizedBoard, RawDeparture, RecordError, normalize};
pub use resolve::{KeyPath, resolve, resolve_text};
