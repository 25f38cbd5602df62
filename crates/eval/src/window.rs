use common::{Candle, CandleSeries, Error, Result};

/// Slice a trailing window and a lookahead close-price path at `position`.
///
/// The trailing window is exactly `trailing` candles; the future path is the
/// closes of the next `horizon` candles, truncated to whatever actually
/// remains (possibly empty, never longer than `horizon`).
///
/// The single failure mode is `position + trailing > len(series)`. Pure;
/// no side effects.
pub fn extract<'a>(
    series: &'a CandleSeries,
    position: usize,
    trailing: usize,
    horizon: usize,
) -> Result<(&'a [Candle], Vec<f64>)> {
    let len = series.len();
    if position + trailing > len {
        return Err(Error::InsufficientData {
            position,
            reason: format!(
                "trailing window of {trailing} candles exceeds the {} remaining",
                len.saturating_sub(position)
            ),
        });
    }

    let window = &series.candles()[position..position + trailing];

    let future_start = position + trailing;
    let future_end = (future_start + horizon).min(len);
    let future_path = series.candles()[future_start..future_end]
        .iter()
        .map(|c| c.close)
        .collect();

    Ok((window, future_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn series(closes: &[f64]) -> CandleSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let candles = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| Candle {
                timestamp: start + Duration::hours(i as i64),
                open: close,
                high: close + 1.0,
                low: close - 1.0,
                close,
                volume: 1.0,
            })
            .collect();
        CandleSeries::new(candles).unwrap()
    }

    #[test]
    fn window_has_exactly_trailing_candles() {
        let s = series(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let (window, future) = extract(&s, 1, 3, 2).unwrap();
        assert_eq!(window.len(), 3);
        assert_eq!(window[0].close, 2.0);
        assert_eq!(future, vec![5.0, 6.0]);
    }

    #[test]
    fn future_path_truncates_at_series_end() {
        let s = series(&[1.0, 2.0, 3.0, 4.0]);
        let (_, future) = extract(&s, 0, 3, 24).unwrap();
        assert_eq!(future, vec![4.0]);
    }

    #[test]
    fn future_path_may_be_empty() {
        let s = series(&[1.0, 2.0, 3.0]);
        let (window, future) = extract(&s, 0, 3, 24).unwrap();
        assert_eq!(window.len(), 3);
        assert!(future.is_empty());
    }

    #[test]
    fn fails_when_trailing_exceeds_remaining() {
        let s = series(&[1.0, 2.0, 3.0]);
        let err = extract(&s, 1, 3, 0).unwrap_err();
        assert!(matches!(err, Error::InsufficientData { position: 1, .. }));
    }

    #[test]
    fn boundary_position_still_succeeds() {
        let s = series(&[1.0, 2.0, 3.0, 4.0]);
        // position + trailing == len is the last valid position
        assert!(extract(&s, 1, 3, 5).is_ok());
        assert!(extract(&s, 2, 3, 5).is_err());
    }
}
