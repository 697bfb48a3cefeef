//! # Tide Timings Core Library
//!
//! This library provides the data model and extraction pipeline for the tide
//! timings service. The published tide-timings page lays its tables out as a
//! flat run of rows per month, where a day number only appears on the first
//! row of each day. The library recovers the month → day → observation
//! hierarchy from that layout and exposes it as plain serializable records.
//!
//! ## Design Philosophy
//!
//! ### Degrade by omission
//! - **Row-level anomalies are never errors**: header rows, short rows and
//!   unparsable heights are skipped so that one bad row cannot hide the rest
//!   of the page
//! - **One fatal condition**: an extraction that yields no months at all
//!   fails with [`TideError::NoData`]
//!
//! ### Testable seams
//! - **Document capability**: the extraction engine only needs
//!   [`document::Element`] ("select", "attr", "text"), so it runs against
//!   synthetic trees as easily as against parsed HTML
//! - **Explicit carry-forward**: the "current day" state lives in
//!   [`table::DayAggregator`] instead of loop locals
//!
//! ### Data Flow
//! 1. **Fetch**: [`tide_data::TideService`] downloads the page
//! 2. **Parse**: [`document::HtmlPage`] wraps the `scraper` DOM
//! 3. **Extract**: [`extract::extract_months`] builds the month list
//! 4. **Serve**: [`api::router`] returns it as `{"data": [...]}`
//!
//! ## Core Types
//!
//! - [`TideMonth`]: one month's tide table, labelled for display
//! - [`TideDay`]: the observations for one day of a month
//! - [`TideObservation`]: a single time/height/level reading

use serde::{Deserialize, Serialize};

// Module declarations
pub mod api;
pub mod config;
pub mod document;
pub mod error;
pub mod extract;
pub mod table;
pub mod tide_data;

pub use error::TideError;

/// A single tidal reading as published on the source page.
///
/// `time` and `level` are kept as the page prints them (for example `"03:12"`
/// and `"High"`); only the height is interpreted.
///
/// # Example
/// ```
/// use tide_timings_lib::TideObservation;
///
/// let high = TideObservation {
///     time: "03:12".to_string(),
///     height: 2.9,
///     level: "High".to_string(),
/// };
/// assert_eq!(high.level, "High");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideObservation {
    /// Display time, not validated as a clock value
    pub time: String,
    /// Tide height in metres
    pub height: f64,
    /// High/low indicator as printed by the source
    pub level: String,
}

/// All observations recorded for one day of a month.
///
/// Days with no valid observation are never emitted, so `observations` is
/// always non-empty in extraction output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideDay {
    /// Day of the month (1-based)
    pub day: u32,
    /// Readings in source order
    pub observations: Vec<TideObservation>,
}

/// One month's tide table.
///
/// # Example
/// ```
/// use tide_timings_lib::{TideDay, TideMonth, TideObservation};
///
/// let month = TideMonth {
///     month: "January".to_string(),
///     days: vec![TideDay {
///         day: 1,
///         observations: vec![TideObservation {
///             time: "03:12".to_string(),
///             height: 2.9,
///             level: "High".to_string(),
///         }],
///     }],
/// };
///
/// let json = serde_json::to_value(&month).unwrap();
/// assert_eq!(json["days"][0]["observations"][0]["height"], 2.9);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TideMonth {
    /// Display label taken from the page navigation (e.g. "January")
    pub month: String,
    /// Days in first-seen order
    pub days: Vec<TideDay>,
}
