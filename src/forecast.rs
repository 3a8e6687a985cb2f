use crate::models::{Forecast, ForecastPoint, MonthCount};

pub const FORECAST_HORIZON: u32 = 3;
pub const DEFAULT_ANCHOR_MONTH: &str = "2025-12";

const DEFAULT_ANCHOR: (i64, i64) = (2025, 12);

const TREND_WINDOW: usize = 3;

pub fn forecast(history: &[MonthCount]) -> Forecast {
    forecast_with_horizon(history, FORECAST_HORIZON)
}

/// Linear local-trend projection over the last few observed months.
pub fn forecast_with_horizon(history: &[MonthCount], horizon: u32) -> Forecast {
    let window = &history[history.len().saturating_sub(TREND_WINDOW)..];
    let delta = trend_delta(window);
    let last_value = window.last().map(|m| m.count as f64).unwrap_or(0.0);
    let anchor = anchor_month(history.last().map(|m| m.month.as_str()));

    let points = (1..=horizon)
        .map(|step| ForecastPoint {
            month: format_month(shift_month(anchor, step)),
            value: (last_value + delta * f64::from(step)).max(0.0),
        })
        .collect();

    Forecast { delta, points }
}

/// Mean period-over-period change; a window of one value has no change.
pub fn trend_delta(window: &[MonthCount]) -> f64 {
    match (window.first(), window.last()) {
        (Some(first), Some(last)) if window.len() > 1 => {
            (last.count as f64 - first.count as f64) / (window.len() - 1) as f64
        }
        _ => 0.0,
    }
}

/// Splits a `YYYY-MM` label into numeric year and month. The month is not
/// range-checked; out-of-range values carry when shifted.
pub fn parse_month(label: &str) -> Option<(i64, i64)> {
    let mut parts = label.split('-');
    let year = parts.next()?.trim().parse().ok()?;
    let month = parts.next()?.trim().parse().ok()?;
    Some((year, month))
}

/// Moves `step` months forward with overflow carried into the year.
pub fn shift_month((year, month): (i64, i64), step: u32) -> (i64, i64) {
    let index = year * 12 + (month - 1) + i64::from(step);
    (index.div_euclid(12), index.rem_euclid(12) + 1)
}

pub fn format_month((year, month): (i64, i64)) -> String {
    format!("{year:04}-{month:02}")
}

fn anchor_month(last_label: Option<&str>) -> (i64, i64) {
    let label = last_label.unwrap_or(DEFAULT_ANCHOR_MONTH);
    parse_month(label).unwrap_or_else(|| {
        tracing::warn!(label, "last month label is not numeric, anchoring forecast at default");
        DEFAULT_ANCHOR
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(entries: &[(&str, usize)]) -> Vec<MonthCount> {
        entries
            .iter()
            .map(|(month, count)| MonthCount {
                month: month.to_string(),
                count: *count,
            })
            .collect()
    }

    fn months(forecast: &Forecast) -> Vec<&str> {
        forecast.points.iter().map(|p| p.month.as_str()).collect()
    }

    fn values(forecast: &Forecast) -> Vec<f64> {
        forecast.points.iter().map(|p| p.value).collect()
    }

    #[test]
    fn flat_history_projects_flat_across_year_end() {
        let result = forecast(&history(&[("2025-10", 1), ("2025-11", 1), ("2025-12", 1)]));
        assert_eq!(result.delta, 0.0);
        assert_eq!(months(&result), vec!["2026-01", "2026-02", "2026-03"]);
        assert_eq!(values(&result), vec![1.0, 1.0, 1.0]);
    }

    #[test]
    fn uses_only_the_last_three_months() {
        let result = forecast(&history(&[
            ("2025-06", 40),
            ("2025-07", 2),
            ("2025-08", 4),
            ("2025-09", 6),
        ]));
        assert_eq!(result.delta, 2.0);
        assert_eq!(months(&result), vec!["2025-10", "2025-11", "2025-12"]);
        assert_eq!(values(&result), vec![8.0, 10.0, 12.0]);
    }

    #[test]
    fn falling_trend_is_clamped_at_zero() {
        let result = forecast(&history(&[("2025-01", 9), ("2025-02", 5), ("2025-03", 1)]));
        assert_eq!(result.delta, -4.0);
        assert_eq!(values(&result), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn two_points_use_their_difference() {
        let result = forecast(&history(&[("2025-11", 2), ("2025-12", 3)]));
        assert_eq!(result.delta, 1.0);
        assert_eq!(values(&result), vec![4.0, 5.0, 6.0]);
    }

    #[test]
    fn single_point_has_zero_delta() {
        let result = forecast(&history(&[("2024-05", 7)]));
        assert_eq!(result.delta, 0.0);
        assert_eq!(months(&result), vec!["2024-06", "2024-07", "2024-08"]);
        assert_eq!(values(&result), vec![7.0, 7.0, 7.0]);
    }

    #[test]
    fn empty_history_anchors_at_default_month() {
        let result = forecast(&[]);
        assert_eq!(months(&result), vec!["2026-01", "2026-02", "2026-03"]);
        assert_eq!(values(&result), vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn non_numeric_last_label_falls_back_to_default_anchor() {
        let result = forecast(&history(&[("garbage", 2)]));
        assert_eq!(months(&result), vec!["2026-01", "2026-02", "2026-03"]);
        assert_eq!(values(&result), vec![2.0, 2.0, 2.0]);
    }

    #[test]
    fn out_of_range_month_carries_into_next_year() {
        let result = forecast(&history(&[("2025-13", 1)]));
        assert_eq!(months(&result), vec!["2026-02", "2026-03", "2026-04"]);

        let result = forecast(&history(&[("2025-00", 1)]));
        assert_eq!(months(&result), vec!["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn trailing_separator_keeps_year_and_month() {
        let result = forecast(&history(&[("2025-1-", 1)]));
        assert_eq!(months(&result), vec!["2025-02", "2025-03", "2025-04"]);
    }

    #[test]
    fn shift_month_wraps_december() {
        assert_eq!(shift_month((2025, 12), 1), (2026, 1));
        assert_eq!(shift_month((2025, 11), 14), (2027, 1));
    }

    #[test]
    fn fractional_delta_is_kept() {
        let result = forecast(&history(&[("2025-01", 1), ("2025-02", 1), ("2025-03", 2)]));
        assert!((result.delta - 0.5).abs() < 1e-9);
        assert_eq!(values(&result), vec![2.5, 3.0, 3.5]);
    }
}
