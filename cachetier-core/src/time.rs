//! Curated cache-duration options.
//!
//! Operator-facing duration fields are constrained to a fixed list of
//! buckets (one minute up to one year) plus an "end of day" sentinel,
//! rather than accepting free integers. The sentinel is kept as a tagged
//! variant so persistence and display stay unambiguous; it only collapses
//! to a concrete number of seconds when a policy update is applied.

use chrono::{DateTime, Days, NaiveTime, Utc};

/// A permissible cache duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeOption {
    /// A fixed duration in seconds.
    Fixed(u64),
    /// Until the next UTC midnight, resolved when the policy is applied.
    EndOfDay,
}

/// The ordered set of durations offered to operators.
pub const TIME_OPTIONS: &[TimeOption] = &[
    TimeOption::Fixed(60),
    TimeOption::Fixed(300),
    TimeOption::Fixed(900),
    TimeOption::Fixed(1800),
    TimeOption::Fixed(3600),
    TimeOption::Fixed(7200),
    TimeOption::Fixed(21600),
    TimeOption::Fixed(43200),
    TimeOption::Fixed(86400),
    TimeOption::EndOfDay,
    TimeOption::Fixed(604800),
    TimeOption::Fixed(2592000),
    TimeOption::Fixed(31536000),
];

/// Form value of the end-of-day sentinel.
const END_OF_DAY_VALUE: &str = "end-of-day";

impl TimeOption {
    /// The wire value used in form submissions and option lists.
    pub fn form_value(&self) -> String {
        match self {
            TimeOption::Fixed(seconds) => seconds.to_string(),
            TimeOption::EndOfDay => END_OF_DAY_VALUE.to_string(),
        }
    }

    /// Translation key for the operator-facing label of this option.
    pub fn label_key(&self) -> String {
        match self {
            TimeOption::Fixed(seconds) => format!("label.cache.time.{seconds}"),
            TimeOption::EndOfDay => "label.cache.time.day.end".to_string(),
        }
    }

    /// Parse a submitted form value back into a curated option.
    ///
    /// Returns `None` for anything outside [`TIME_OPTIONS`], including
    /// well-formed integers that are not in the curated list.
    pub fn parse(value: &str) -> Option<TimeOption> {
        let candidate = if value == END_OF_DAY_VALUE {
            TimeOption::EndOfDay
        } else {
            TimeOption::Fixed(value.parse().ok()?)
        };
        TIME_OPTIONS.contains(&candidate).then_some(candidate)
    }

    /// Collapse the option to a concrete number of seconds.
    ///
    /// `EndOfDay` becomes the whole seconds remaining until the next UTC
    /// midnight, never less than one.
    pub fn resolve_seconds(&self, now: DateTime<Utc>) -> u64 {
        match self {
            TimeOption::Fixed(seconds) => *seconds,
            TimeOption::EndOfDay => {
                let midnight = (now.date_naive() + Days::new(1)).and_time(NaiveTime::MIN);
                (midnight.and_utc() - now).num_seconds().max(1) as u64
            }
        }
    }
}

/// The curated fixed bucket closest to a persisted number of seconds.
///
/// End-of-day persists as plain seconds, so header values read back from
/// a node may match no bucket; selects prefilled from them snap to the
/// closest one. Ties snap to the smaller bucket.
pub fn nearest_bucket(seconds: u64) -> u64 {
    TIME_OPTIONS
        .iter()
        .filter_map(|option| match option {
            TimeOption::Fixed(bucket) => Some(*bucket),
            TimeOption::EndOfDay => None,
        })
        .min_by_key(|bucket| bucket.abs_diff(seconds))
        .unwrap_or(seconds)
}

/// Translation key for an inherited duration, when it matches a curated
/// bucket; raw seconds otherwise (end-of-day persists as plain seconds).
pub fn duration_label_key(seconds: u64) -> Option<String> {
    TIME_OPTIONS
        .contains(&TimeOption::Fixed(seconds))
        .then(|| format!("label.cache.time.{seconds}"))
}
