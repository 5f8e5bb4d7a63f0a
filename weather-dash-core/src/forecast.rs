//! Reduction of raw three-hour samples into per-day forecast cards.

use std::collections::HashSet;

use chrono::{NaiveDate, TimeZone};
use tracing::debug;

use crate::model::{DailyForecast, ForecastSample};

/// Maximum number of daily entries shown.
pub const MAX_DAYS: usize = 6;

/// Collapse `samples` into at most [`MAX_DAYS`] daily summaries.
///
/// Dates are computed in `tz`. Samples dated `today` are skipped, and each
/// remaining date is represented by the first sample that falls on it, in
/// input order. Samples with an out-of-range timestamp are ignored.
pub fn reduce<Tz: TimeZone>(
    samples: &[ForecastSample],
    today: NaiveDate,
    tz: &Tz,
) -> Vec<DailyForecast> {
    let mut seen = HashSet::new();
    let mut daily = Vec::with_capacity(MAX_DAYS);

    for sample in samples {
        if daily.len() == MAX_DAYS {
            break;
        }

        let Some(time) = sample.time() else {
            continue;
        };
        let date = time.with_timezone(tz).date_naive();

        if date == today || !seen.insert(date) {
            continue;
        }

        daily.push(DailyForecast {
            date,
            timestamp: sample.timestamp,
            temp_max_c: sample.temp_max_c,
            temp_min_c: sample.temp_min_c,
            description: sample.condition.description.clone(),
            icon: sample.condition.icon.clone(),
        });
    }

    debug!("daily forecast: {:?}", daily);
    daily
}
