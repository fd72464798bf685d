//! Conversions between civil timestamps and solar angle/hour representations.
//!
//! Angle inputs and outputs are in degrees; trigonometric work elsewhere is
//! done in radians, converting only at module boundaries. Hour-angle
//! conversions are anchored to each timestamp's own local midnight, so a
//! series must either carry explicit offsets or be uniformly treated as UTC —
//! never a mixture.

use chrono::{DateTime, Duration, FixedOffset, Timelike};
use julian_day_converter::{julian_day_to_unix_millis, unix_millis_to_julian_day};

use crate::types::TimeSeries;

/// Julian day of the J2000.0 epoch.
pub(crate) const J2000_EPOCH_JD: f64 = 2_451_545.0;

/// Julian day for the given unix seconds (fractional seconds preserved to
/// millisecond resolution).
pub(crate) fn julian_day(unixtime: f64) -> f64 {
    unix_millis_to_julian_day((unixtime * 1000.0).round() as i64)
}

/// Unix seconds for the given julian day.
pub(crate) fn unixtime_from_julian_day(jd: f64) -> f64 {
    julian_day_to_unix_millis(jd) as f64 / 1000.0
}

/// Julian century (T) since J2000.0.
pub(crate) fn julian_century(jd: f64) -> f64 {
    (jd - J2000_EPOCH_JD) / 36_525.0
}

/// Julian Ephemeris Day from a Julian Day and ΔT in seconds.
pub(crate) fn julian_ephemeris_day(jd: f64, delta_t: f64) -> f64 {
    jd + delta_t / 86_400.0
}

/// Julian Ephemeris Century from a Julian Ephemeris Day.
pub(crate) fn julian_ephemeris_century(jde: f64) -> f64 {
    (jde - J2000_EPOCH_JD) / 36_525.0
}

/// Julian Ephemeris Millennium from a Julian Ephemeris Century.
pub(crate) fn julian_ephemeris_millennium(jce: f64) -> f64 {
    jce / 10.0
}

/// Local clock hours since the timestamp's local midnight.
fn hours_since_local_midnight(stamp: &DateTime<FixedOffset>) -> f64 {
    let naive = stamp.naive_local();
    f64::from(naive.num_seconds_from_midnight()) / 3600.0 + f64::from(naive.nanosecond()) / 3.6e12
}

/// UTC offset of the timestamp in hours, east-positive.
fn offset_hours(stamp: &DateTime<FixedOffset>) -> f64 {
    f64::from(stamp.offset().local_minus_utc()) / 3600.0
}

/// Hour angle for a single timestamp, in degrees, positive afternoon.
///
/// `equation_of_time` is in minutes. The local-midnight anchor uses the
/// timestamp's own offset, while the 15°/h term counts UTC hours, so the
/// offset cancels out of solar time exactly as it should.
pub(crate) fn hour_angle_scalar(
    stamp: &DateTime<FixedOffset>,
    longitude: f64,
    equation_of_time: f64,
) -> f64 {
    let utc_hours = hours_since_local_midnight(stamp) - offset_hours(stamp);
    15.0 * (utc_hours - 12.0) + longitude + equation_of_time / 4.0
}

/// Hour angle at each timestamp of the series, in degrees.
///
/// `equation_of_time` is in minutes, one value per timestamp.
///
/// # Panics
///
/// Panics when `equation_of_time` does not hold one value per timestamp.
pub fn hour_angle(times: &TimeSeries, longitude: f64, equation_of_time: &[f64]) -> Vec<f64> {
    assert_eq!(
        times.len(),
        equation_of_time.len(),
        "one equation-of-time value per timestamp"
    );
    times
        .stamps()
        .iter()
        .zip(equation_of_time)
        .map(|(stamp, &eot)| hour_angle_scalar(stamp, longitude, eot))
        .collect()
}

/// Inverse of [`hour_angle`] restricted to the hours-since-local-midnight
/// domain: the local clock hour at which the given hour angle occurs.
pub(crate) fn hour_angle_to_hours_scalar(
    stamp: &DateTime<FixedOffset>,
    hour_angle: f64,
    longitude: f64,
    equation_of_time: f64,
) -> f64 {
    (hour_angle - longitude - equation_of_time / 4.0) / 15.0 + 12.0 + offset_hours(stamp)
}

/// Converts hour angles in degrees back to hours since local midnight.
///
/// # Panics
///
/// Panics when `hour_angles` or `equation_of_time` does not hold one value
/// per timestamp.
pub fn hour_angle_to_hours_since_midnight(
    times: &TimeSeries,
    hour_angles: &[f64],
    longitude: f64,
    equation_of_time: &[f64],
) -> Vec<f64> {
    assert_eq!(times.len(), hour_angles.len(), "one hour angle per timestamp");
    assert_eq!(
        times.len(),
        equation_of_time.len(),
        "one equation-of-time value per timestamp"
    );
    times
        .stamps()
        .iter()
        .zip(hour_angles)
        .zip(equation_of_time)
        .map(|((stamp, &ha), &eot)| hour_angle_to_hours_scalar(stamp, ha, longitude, eot))
        .collect()
}

/// Reconstructs a zoned timestamp from hours since the date's local midnight.
pub(crate) fn local_time_from_hours_scalar(
    stamp: &DateTime<FixedOffset>,
    hours: f64,
) -> DateTime<FixedOffset> {
    let offset = *stamp.offset();
    let midnight = stamp.date_naive().and_time(chrono::NaiveTime::MIN);
    let local = midnight + Duration::nanoseconds((hours * 3.6e12).round() as i64);
    let utc = local - Duration::seconds(i64::from(offset.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc, offset)
}

/// Maps hours-since-local-midnight floats back to zoned timestamps, one per
/// input timestamp, anchored to that timestamp's local calendar date.
///
/// # Panics
///
/// Panics when `hours` does not hold one value per timestamp.
pub fn local_times_from_hours_since_midnight(
    times: &TimeSeries,
    hours: &[f64],
) -> Vec<DateTime<FixedOffset>> {
    assert_eq!(times.len(), hours.len(), "one hours value per timestamp");
    times
        .stamps()
        .iter()
        .zip(hours)
        .map(|(stamp, &h)| local_time_from_hours_scalar(stamp, h))
        .collect()
}

/// Estimates ΔT (TT − UT) in seconds for the given calendar year and month.
///
/// Piecewise polynomial fit of Espenak and Meeus; used whenever the caller
/// does not supply a measured ΔT. Outside the fitted 1600–2150 span the
/// long-term parabola applies.
pub fn calculate_deltat(year: i32, month: u32) -> f64 {
    let y = f64::from(year) + (f64::from(month) - 0.5) / 12.0;

    if !(-500.0..=2150.0).contains(&y) {
        let u = (y - 1820.0) / 100.0;
        return -20.0 + 32.0 * u * u;
    }
    if y < 500.0 {
        let u = y / 100.0;
        return crate::math::polynomial(
            &[
                10583.6,
                -1014.41,
                33.78311,
                -5.952053,
                -0.1798452,
                0.022174192,
                0.0090316521,
            ],
            u,
        );
    }
    if y < 1600.0 {
        let u = (y - 1000.0) / 100.0;
        return crate::math::polynomial(
            &[
                1574.2,
                -556.01,
                71.23472,
                0.319781,
                -0.8503463,
                -0.005050998,
                0.0083572073,
            ],
            u,
        );
    }
    if y < 1700.0 {
        let t = y - 1600.0;
        return crate::math::polynomial(&[120.0, -0.9808, -0.01532, 1.0 / 7129.0], t);
    }
    if y < 1800.0 {
        let t = y - 1700.0;
        return crate::math::polynomial(
            &[8.83, 0.1603, -0.0059285, 0.00013336, -1.0 / 1_174_000.0],
            t,
        );
    }
    if y < 1860.0 {
        let t = y - 1800.0;
        return crate::math::polynomial(
            &[
                13.72,
                -0.332447,
                0.0068612,
                0.0041116,
                -0.00037436,
                0.0000121272,
                -0.0000001699,
                0.000000000875,
            ],
            t,
        );
    }
    if y < 1900.0 {
        let t = y - 1860.0;
        return crate::math::polynomial(
            &[7.62, 0.5737, -0.251754, 0.01680668, -0.0004473624, 1.0 / 233_174.0],
            t,
        );
    }
    if y < 1920.0 {
        let t = y - 1900.0;
        return crate::math::polynomial(&[-2.79, 1.494119, -0.0598939, 0.0061966, -0.000197], t);
    }
    if y < 1941.0 {
        let t = y - 1920.0;
        return crate::math::polynomial(&[21.20, 0.84493, -0.076100, 0.0020936], t);
    }
    if y < 1961.0 {
        let t = y - 1950.0;
        return crate::math::polynomial(&[29.07, 0.407, -1.0 / 233.0, 1.0 / 2547.0], t);
    }
    if y < 1986.0 {
        let t = y - 1975.0;
        return crate::math::polynomial(&[45.45, 1.067, -1.0 / 260.0, -1.0 / 718.0], t);
    }
    if y < 2005.0 {
        let t = y - 2000.0;
        return crate::math::polynomial(
            &[63.86, 0.3345, -0.060374, 0.0017275, 0.000651814, 0.00002373599],
            t,
        );
    }
    if y < 2050.0 {
        let t = y - 2000.0;
        return crate::math::polynomial(&[62.92, 0.32217, 0.005589], t);
    }
    // 2050..=2150
    let u = (y - 1820.0) / 100.0;
    -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
}
