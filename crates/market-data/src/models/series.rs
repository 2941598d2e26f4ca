//! Daily time series and technical indicator models.
//!
//! Both series kinds are kept sorted newest-first; chart overlays rely on
//! that ordering and on `align_overlay` producing point-for-point aligned
//! slices.

use std::collections::HashSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One daily OHLCV bar.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    pub date: NaiveDate,
    pub open: Option<Decimal>,
    pub high: Option<Decimal>,
    pub low: Option<Decimal>,
    pub close: Option<Decimal>,
    pub volume: Option<Decimal>,
}

/// One technical indicator reading (e.g. a moving-average value).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub value: Option<Decimal>,
}

/// Sorts a daily series newest-first in place.
pub fn sort_newest_first(points: &mut [TimeSeriesPoint]) {
    points.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Sorts an indicator series newest-first in place.
pub fn sort_indicator_newest_first(points: &mut [IndicatorPoint]) {
    points.sort_by(|a, b| b.date.cmp(&a.date));
}

/// Restricts a daily series and an indicator series to their common dates.
///
/// Dates present in only one of the two series are dropped, never
/// interpolated, so the returned slices align point-for-point for chart
/// overlays. Relative order within each input is preserved; callers pass
/// newest-first series and get newest-first series back.
pub fn align_overlay(
    series: &[TimeSeriesPoint],
    indicator: &[IndicatorPoint],
) -> (Vec<TimeSeriesPoint>, Vec<IndicatorPoint>) {
    let series_dates: HashSet<NaiveDate> = series.iter().map(|p| p.date).collect();
    let indicator_dates: HashSet<NaiveDate> = indicator.iter().map(|p| p.date).collect();

    let aligned_series = series
        .iter()
        .filter(|p| indicator_dates.contains(&p.date))
        .cloned()
        .collect();
    let aligned_indicator = indicator
        .iter()
        .filter(|p| series_dates.contains(&p.date))
        .cloned()
        .collect();

    (aligned_series, aligned_indicator)
}
