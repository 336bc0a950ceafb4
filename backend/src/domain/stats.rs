//! Aggregation of hit events into per-URI counts.
//!
//! Every statistics query runs through [`aggregate_hits`]: a single pass that
//! selects hits matching a [`StatsCriteria`], groups them by `(app, uri)` and
//! counts either events or distinct visitors depending on [`CountingMode`].
//!
//! Results are ordered by `hits` descending. Equal counts are ordered by
//! `app` and then `uri`, both ascending, so repeated queries over the same
//! data always return the same sequence.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::HitEvent;

/// Errors returned by [`TimeWindow::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TimeWindowError {
    /// `start` is later than `end`.
    #[error("start must not be after end")]
    StartAfterEnd,
    /// `start` lies in the future.
    #[error("start must not be in the future")]
    StartInFuture,
}

/// Inclusive `[start, end]` range of hit timestamps.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use stats_backend::domain::{TimeWindow, TimeWindowError};
///
/// let at = |h| NaiveDate::from_ymd_opt(2024, 1, 1).and_then(|d| d.and_hms_opt(h, 0, 0)).unwrap();
/// let window = TimeWindow::new(at(8), at(12), at(23)).expect("valid window");
/// assert!(window.contains(at(12)));
/// assert_eq!(
///     TimeWindow::new(at(12), at(8), at(23)),
///     Err(TimeWindowError::StartAfterEnd)
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl TimeWindow {
    /// Validate the bounds against each other and against `now`.
    pub fn new(
        start: NaiveDateTime,
        end: NaiveDateTime,
        now: NaiveDateTime,
    ) -> Result<Self, TimeWindowError> {
        if start > end {
            return Err(TimeWindowError::StartAfterEnd);
        }
        if start > now {
            return Err(TimeWindowError::StartInFuture);
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    /// Whether `timestamp` falls inside the window, both bounds inclusive.
    pub fn contains(&self, timestamp: NaiveDateTime) -> bool {
        self.start <= timestamp && timestamp <= self.end
    }
}

/// Optional restriction of a query to a set of URIs.
///
/// Blank entries are discarded when the filter is built. A filter with no
/// remaining entries matches every URI.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UriFilter(BTreeSet<String>);

impl UriFilter {
    /// A filter that matches every URI.
    pub fn unrestricted() -> Self {
        Self::default()
    }

    /// Build a filter, dropping empty and whitespace-only entries.
    ///
    /// # Examples
    /// ```
    /// use stats_backend::domain::UriFilter;
    ///
    /// let filter = UriFilter::from_entries(["", "  "]);
    /// assert!(filter.is_unrestricted());
    ///
    /// let filter = UriFilter::from_entries(["/events/1", ""]);
    /// assert!(filter.matches("/events/1"));
    /// assert!(!filter.matches("/events/2"));
    /// ```
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            entries
                .into_iter()
                .map(Into::into)
                .filter(|uri| !uri.trim().is_empty())
                .collect(),
        )
    }

    pub fn is_unrestricted(&self) -> bool {
        self.0.is_empty()
    }

    pub fn matches(&self, uri: &str) -> bool {
        self.is_unrestricted() || self.0.contains(uri)
    }

    /// The URIs of a restricted filter, in lexicographic order.
    pub fn uris(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// How hits within a group are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CountingMode {
    /// Every event counts.
    #[default]
    Total,
    /// Each distinct visitor `ip` counts once.
    Unique,
}

impl CountingMode {
    /// Map the `unique` wire flag onto a counting mode.
    pub fn from_unique_flag(unique: bool) -> Self {
        if unique { Self::Unique } else { Self::Total }
    }
}

/// Selection predicate and counting strategy of one statistics query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsCriteria {
    pub window: TimeWindow,
    pub uris: UriFilter,
    pub mode: CountingMode,
}

impl StatsCriteria {
    /// Whether `hit` participates in the query.
    pub fn matches(&self, hit: &HitEvent) -> bool {
        self.window.contains(hit.timestamp) && self.uris.matches(&hit.uri)
    }
}

/// One `(app, uri) -> hits` result row.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AggregateRow {
    pub app: String,
    pub uri: String,
    pub hits: u64,
}

#[derive(Default)]
struct Group<'a> {
    events: u64,
    visitors: HashSet<&'a str>,
}

impl Group<'_> {
    fn count(&self, mode: CountingMode) -> u64 {
        match mode {
            CountingMode::Total => self.events,
            CountingMode::Unique => self.visitors.len() as u64,
        }
    }
}

fn by_popularity(a: &AggregateRow, b: &AggregateRow) -> Ordering {
    b.hits
        .cmp(&a.hits)
        .then_with(|| a.app.cmp(&b.app))
        .then_with(|| a.uri.cmp(&b.uri))
}

/// Group and count the hits selected by `criteria`.
///
/// Groups without matching hits never appear in the output.
pub fn aggregate_hits<'a, I>(hits: I, criteria: &StatsCriteria) -> Vec<AggregateRow>
where
    I: IntoIterator<Item = &'a HitEvent>,
{
    let mut groups: BTreeMap<(&'a str, &'a str), Group<'a>> = BTreeMap::new();
    for hit in hits.into_iter().filter(|hit| criteria.matches(hit)) {
        let group = groups
            .entry((hit.app.as_str(), hit.uri.as_str()))
            .or_default();
        group.events += 1;
        if criteria.mode == CountingMode::Unique {
            group.visitors.insert(hit.ip.as_str());
        }
    }

    let mut rows: Vec<AggregateRow> = groups
        .into_iter()
        .map(|((app, uri), group)| AggregateRow {
            app: app.to_owned(),
            uri: uri.to_owned(),
            hits: group.count(criteria.mode),
        })
        .collect();
    rows.sort_by(by_popularity);
    rows
}

#[cfg(test)]
#[path = "stats_tests.rs"]
mod tests;
