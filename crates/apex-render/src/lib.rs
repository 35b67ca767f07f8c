//! Pure HTML rendering for deal reports.
//!
//! Everything in this crate is deterministic string building: no I/O, no
//! clocks, no side effects. The renderer consumes already-resolved
//! competitors (images embedded as `data:` URLs or absent) and produces a
//! complete, self-contained document suitable for headless printing.

mod document;
mod escape;
mod styles;

pub use document::{display_title, render_report, DEFAULT_CLIENT_LABEL};
pub use escape::escape_html;
pub use styles::{meter_tier, score_band, MeterTier, ScoreBand};
