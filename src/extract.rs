//! # Tide Extraction Engine
//!
//! Turns a tide-timings document into [`TideMonth`] records.
//!
//! ## Page Structure
//!
//! ```html
//! <ul>
//!   <li class="tab__nav-item" data-box="m1">January</li>   <!-- label -->
//!   ...
//! </ul>
//! <div class="forecast-widget__content" data-box="m1">     <!-- section -->
//!   <table><tbody>
//!     <tr><td>1</td><td>03:12</td><td>2.9</td><td>High</td></tr>
//!     <tr><td></td><td>09:40</td><td>0.4</td><td>Low</td></tr>
//!   </tbody></table>
//! </div>
//! ```
//!
//! The navigation items name the months; each content section holds one
//! month's table and shares its `data-box` key with a navigation item.
//!
//! ## Failure Policy
//!
//! Sections without a key, label or usable rows are skipped. Only a page that
//! yields no month at all is an error ([`TideError::NoData`]).

use crate::document::Element;
use crate::table::DayAggregator;
use crate::{TideError, TideMonth};
use std::collections::HashMap;
use tracing::debug;

/// Navigation items carrying a section key and a month label
const NAV_ITEM: &str = ".tab__nav-item";
/// One month's table
const SECTION: &str = ".forecast-widget__content";
const ROW: &str = "table tbody tr";
const CELL: &str = "td";

/// Primary key attribute shared by navigation items and sections
const KEY_ATTR: &str = "data-box";
/// Section key fallback
const FALLBACK_KEY_ATTR: &str = "id";

/// Extract every month from the document rooted at `root`.
///
/// # Errors
/// [`TideError::NoData`] when no section produced a labelled, non-empty
/// month.
pub fn extract_months<E: Element>(root: &E) -> Result<Vec<TideMonth>, TideError> {
    let labels = month_labels(root);

    let months: Vec<TideMonth> = root
        .select(SECTION)
        .iter()
        .filter_map(|section| extract_section(section, &labels))
        .collect();

    if months.is_empty() {
        return Err(TideError::NoData);
    }

    Ok(months)
}

/// Map section keys to month labels from the navigation region.
///
/// A repeated key keeps the last label seen.
pub fn month_labels<E: Element>(root: &E) -> HashMap<String, String> {
    let mut labels = HashMap::new();
    for item in root.select(NAV_ITEM) {
        let key = item.trimmed_attr(KEY_ATTR);
        if key.is_empty() {
            continue;
        }
        let text = item.text();
        if !text.is_empty() {
            labels.insert(key, text);
        }
    }
    labels
}

/// Build one month from a content section, or `None` if it has nothing usable.
fn extract_section<E: Element>(section: &E, labels: &HashMap<String, String>) -> Option<TideMonth> {
    let key = section_key(section);
    if key.is_empty() {
        debug!("Skipping section without a key");
        return None;
    }

    let month = labels.get(&key).cloned().unwrap_or_else(|| key.clone());

    let mut days = DayAggregator::new();
    for row in section.select(ROW) {
        days.push_row(row_cells(&row).as_slice());
    }
    let days = days.finish();

    if month.is_empty() || days.is_empty() {
        debug!(key = %key, "Skipping section without tide rows");
        return None;
    }

    debug!(month = %month, days = days.len(), "Extracted month");
    Some(TideMonth { month, days })
}

fn section_key<E: Element>(section: &E) -> String {
    let key = section.trimmed_attr(KEY_ATTR);
    if key.is_empty() {
        section.trimmed_attr(FALLBACK_KEY_ATTR)
    } else {
        key
    }
}

/// Trimmed cell texts with blank cells removed.
fn row_cells<E: Element>(row: &E) -> Vec<String> {
    row.select(CELL)
        .iter()
        .map(E::text)
        .filter(|text| !text.is_empty())
        .collect()
}
