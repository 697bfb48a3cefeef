//! # Tide Table Rows
//!
//! Row classification and day aggregation for one month's tide table.
//!
//! ## Row Layout
//!
//! The source prints each day as a run of rows. Only the first row of a day
//! carries the day number:
//!
//! ```text
//! | 3 | 03:12 | 2.9 | High |   <- day marker (4 cells)
//! |   | 09:40 | 0.4 | Low  |   <- continuation (3 non-empty cells)
//! |   | 15:55 | 2.7 | High |
//! | 4 | 04:01 | 2.8 | High |   <- next day
//! ```
//!
//! Cells are trimmed and blanks removed before classification, so the empty
//! day column of a continuation row simply disappears.
//!
//! ## Malformed Rows
//!
//! Anything that doesn't fit the 4-cell or 3-cell shape (headers, spacer
//! rows, notes) is skipped. A day marker whose first cell isn't a day number
//! is skipped along with its reading. An unparsable height drops only that
//! reading; a day marker with a bad height still opens its day.

use crate::{TideDay, TideObservation};
use std::collections::HashMap;

/// How a single row contributes to the table.
#[derive(Clone, Debug, PartialEq)]
pub enum RowKind {
    /// Declares `day` and possibly carries its first reading.
    DayMarker {
        day: u32,
        observation: Option<TideObservation>,
    },
    /// A further reading for whichever day is open.
    Continuation(Option<TideObservation>),
    /// Contributes nothing.
    Skipped,
}

/// Classify a row from its trimmed, non-empty cell texts.
pub fn classify_row<S: AsRef<str>>(cells: &[S]) -> RowKind {
    match cells.len() {
        4 => match parse_day(cells[0].as_ref()) {
            Some(day) => RowKind::DayMarker {
                day,
                observation: build_observation(&cells[1..]),
            },
            None => RowKind::Skipped,
        },
        3 => RowKind::Continuation(build_observation(cells)),
        _ => RowKind::Skipped,
    }
}

/// Build a reading from exactly three values: time, height, level.
pub fn build_observation<S: AsRef<str>>(values: &[S]) -> Option<TideObservation> {
    let [time, height, level] = values else {
        return None;
    };

    Some(TideObservation {
        time: time.as_ref().to_string(),
        height: parse_height(height.as_ref())?,
        level: level.as_ref().to_string(),
    })
}

/// Parse a height such as `"1,234.5"`, ignoring thousands separators.
///
/// `"NaN"` and `"inf"` parse as floats but aren't heights.
pub fn parse_height(text: &str) -> Option<f64> {
    text.replace(',', "")
        .parse()
        .ok()
        .filter(|height: &f64| height.is_finite())
}

/// Days are 1-based; zero can't open a day.
fn parse_day(text: &str) -> Option<u32> {
    text.parse().ok().filter(|day| *day > 0)
}

/// Folds a table's rows into days, carrying the open day across rows.
///
/// # Example
/// ```
/// use tide_timings_lib::table::DayAggregator;
///
/// let mut agg = DayAggregator::new();
/// agg.push_row(&["3", "03:12", "2.9", "High"]);
/// agg.push_row(&["09:40", "0.4", "Low"]);
///
/// let days = agg.finish();
/// assert_eq!(days.len(), 1);
/// assert_eq!(days[0].observations.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct DayAggregator {
    /// Day most recently declared by a day-marker row
    current_day: Option<u32>,
    /// Days in first-seen order
    days: Vec<TideDay>,
    /// Day number → position in `days`
    index: HashMap<u32, usize>,
}

impl DayAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Day that continuation rows are currently attributed to.
    pub fn current_day(&self) -> Option<u32> {
        self.current_day
    }

    /// Feed one row's cell texts.
    pub fn push_row<S: AsRef<str>>(&mut self, cells: &[S]) {
        match classify_row(cells) {
            RowKind::DayMarker { day, observation } => {
                self.current_day = Some(day);
                let slot = self.open_day(day);
                if let Some(obs) = observation {
                    self.days[slot].observations.push(obs);
                }
            }
            RowKind::Continuation(observation) => {
                let (Some(day), Some(obs)) = (self.current_day, observation) else {
                    return;
                };
                if let Some(&slot) = self.index.get(&day) {
                    self.days[slot].observations.push(obs);
                }
            }
            RowKind::Skipped => {}
        }
    }

    /// Days with at least one reading, in first-seen order.
    pub fn finish(self) -> Vec<TideDay> {
        self.days
            .into_iter()
            .filter(|day| !day.observations.is_empty())
            .collect()
    }

    /// Position of `day`, creating an empty entry on first sight.
    fn open_day(&mut self, day: u32) -> usize {
        if let Some(&slot) = self.index.get(&day) {
            return slot;
        }
        self.days.push(TideDay {
            day,
            observations: Vec::new(),
        });
        let slot = self.days.len() - 1;
        self.index.insert(day, slot);
        slot
    }
}

/// Aggregate a whole table in one call.
pub fn aggregate_days<I, R, S>(rows: I) -> Vec<TideDay>
where
    I: IntoIterator<Item = R>,
    R: AsRef<[S]>,
    S: AsRef<str>,
{
    rows.into_iter()
        .fold(DayAggregator::new(), |mut agg, row| {
            agg.push_row(row.as_ref());
            agg
        })
        .finish()
}
