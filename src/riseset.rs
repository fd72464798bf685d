//! Sunrise, sunset and transit times.
//!
//! Two routes to the same events: a closed-form geometric solver driven by
//! per-day declination and equation of time, and a root finder that brackets
//! an arbitrary solar quantity computed by the high-precision algorithm.

use chrono::{DateTime, Utc};

use crate::spa;
use crate::time;
use crate::types::{Observer, RiseSetTransit, SolarAttribute, SolarError, TimeSeries};

/// Default absolute tolerance for [`calc_time`], in days.
pub const CALC_TIME_XTOL: f64 = 1e-12;

const BRENT_MAX_ITERATIONS: u32 = 100;

/// Geometric sunrise, sunset and transit for each timestamp's local day.
///
/// `declination` is in radians and `equation_of_time` in minutes, one value
/// per timestamp; refraction and solar radius are ignored, so the horizon
/// crossing is that of the sun's center at zero true elevation. Results are
/// anchored to each timestamp's own local calendar date and offset.
///
/// A `None` sunrise or sunset marks a polar day or night: the sun stays
/// entirely above or below the horizon on that date. The transit is reported
/// regardless.
///
/// # Errors
///
/// Returns [`SolarError::MissingTimezone`] when the series was built from
/// naive timestamps, since "local day" would be meaningless.
///
/// # Panics
///
/// Panics when `declination` or `equation_of_time` does not hold one value
/// per timestamp.
pub fn sun_rise_set_transit_geometric(
    times: &TimeSeries,
    latitude: f64,
    longitude: f64,
    declination: &[f64],
    equation_of_time: &[f64],
) -> Result<Vec<RiseSetTransit>, SolarError> {
    times.require_zoned()?;
    assert_eq!(times.len(), declination.len(), "one declination per timestamp");
    assert_eq!(
        times.len(),
        equation_of_time.len(),
        "one equation-of-time value per timestamp"
    );
    let lat_rad = latitude.to_radians();

    Ok(times
        .stamps()
        .iter()
        .zip(declination.iter().zip(equation_of_time))
        .map(|(stamp, (&dec, &eot))| {
            let cos_ws = -dec.tan() * lat_rad.tan();
            let transit_hours = time::hour_angle_to_hours_scalar(stamp, 0.0, longitude, eot);
            let transit = time::local_time_from_hours_scalar(stamp, transit_hours);

            if cos_ws.abs() > 1.0 {
                return RiseSetTransit {
                    sunrise: None,
                    sunset: None,
                    transit,
                };
            }

            let sunset_angle = cos_ws.acos().to_degrees();
            let rise_hours =
                time::hour_angle_to_hours_scalar(stamp, -sunset_angle, longitude, eot);
            let set_hours = time::hour_angle_to_hours_scalar(stamp, sunset_angle, longitude, eot);
            RiseSetTransit {
                sunrise: Some(time::local_time_from_hours_scalar(stamp, rise_hours)),
                sunset: Some(time::local_time_from_hours_scalar(stamp, set_hours)),
                transit,
            }
        })
        .collect())
}

/// Brent's method on a bracketing interval.
///
/// Combines bisection with inverse quadratic interpolation; guaranteed to
/// converge once the bracket holds a sign change.
fn brentq<F: Fn(f64) -> f64>(
    f: F,
    mut a: f64,
    mut b: f64,
    xtol: f64,
) -> Result<f64, SolarError> {
    let mut fa = f(a);
    let mut fb = f(b);
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }
    if (fa > 0.0) == (fb > 0.0) {
        return Err(SolarError::NoSignChange);
    }

    let mut c = a;
    let mut fc = fa;
    let mut d = b - a;
    let mut e = d;

    for _ in 0..BRENT_MAX_ITERATIONS {
        if (fb > 0.0) == (fc > 0.0) {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }

        let tol1 = 2.0 * f64::EPSILON * b.abs() + 0.5 * xtol;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol1 || fb == 0.0 {
            return Ok(b);
        }

        if e.abs() >= tol1 && fa.abs() > fb.abs() {
            // attempt inverse quadratic interpolation
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            }
            p = p.abs();
            if 2.0 * p < (3.0 * xm * q - (tol1 * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }

        a = b;
        fa = fb;
        if d.abs() > tol1 {
            b += d;
        } else {
            b += tol1.copysign(xm);
        }
        fb = f(b);
    }
    Err(SolarError::Convergence {
        iterations: BRENT_MAX_ITERATIONS,
    })
}

/// Finds the instant in `[lower, upper]` at which a solar quantity takes the
/// given value, using the high-precision position algorithm.
///
/// `xtol` is the time tolerance in days ([`CALC_TIME_XTOL`] resolves below a
/// microsecond). The quantity must take the target value exactly once inside
/// the bracket; a monotone stretch such as one morning or one evening
/// qualifies, a full day does not.
///
/// # Errors
///
/// [`SolarError::NoSignChange`] when the quantity minus the target has the
/// same sign at both ends of the bracket, and [`SolarError::Convergence`] if
/// the iteration cap is hit.
pub fn calc_time(
    lower: DateTime<Utc>,
    upper: DateTime<Utc>,
    observer: &Observer,
    attribute: SolarAttribute,
    value: f64,
    xtol: f64,
) -> Result<DateTime<Utc>, SolarError> {
    let unix = |t: DateTime<Utc>| t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / 1e9;
    let jd_lower = time::julian_day(unix(lower));
    let jd_upper = time::julian_day(unix(upper));

    let (altitude, pressure) = observer.resolve_atmosphere();
    let delta_t = time::calculate_deltat(chrono::Datelike::year(&lower), chrono::Datelike::month(&lower));

    let objective = |jd: f64| {
        let pos = spa::solar_position_unix(
            time::unixtime_from_julian_day(jd),
            observer.latitude,
            observer.longitude,
            altitude,
            pressure / 100.0,
            observer.temperature,
            delta_t,
            0.5667,
        );
        attribute.extract(&pos) - value
    };

    let jd = brentq(objective, jd_lower, jd_upper, xtol)?;
    let millis = (time::unixtime_from_julian_day(jd) * 1000.0).round() as i64;
    DateTime::from_timestamp_millis(millis).ok_or(SolarError::TimeConversionError)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;

    use crate::analytic;

    fn nyc_summer_events() -> RiseSetTransit {
        let times =
            TimeSeries::zoned(&[New_York.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()]);
        let dec = [analytic::declination_spencer71(183)];
        let eot = [analytic::equation_of_time_spencer71(183)];
        sun_rise_set_transit_geometric(&times, 40.77, -73.97, &dec, &eot)
            .unwrap()
            .remove(0)
    }

    #[test]
    fn summer_day_in_new_york_is_long() {
        let events = nyc_summer_events();
        let rise = events.sunrise.unwrap();
        let set = events.sunset.unwrap();
        assert!(rise < events.transit && events.transit < set);

        // about 05:33 local rise, 20:26 local set, 14.9 h of daylight
        assert_eq!(rise.naive_local().format("%H:%M").to_string(), "05:33");
        assert_eq!(set.naive_local().format("%H:%M").to_string(), "20:25");
        let daylight = (set - rise).num_minutes();
        assert!((885..900).contains(&daylight), "daylight minutes {daylight}");
    }

    #[test]
    fn events_carry_the_local_offset_and_date() {
        let events = nyc_summer_events();
        let rise = events.sunrise.unwrap();
        assert_eq!(rise.offset().local_minus_utc(), -4 * 3600); // EDT
        assert_eq!(rise.date_naive(), events.transit.date_naive());
    }

    #[test]
    fn polar_night_yields_no_crossings_but_a_transit() {
        let times =
            TimeSeries::zoned(&[New_York.with_ymd_and_hms(2024, 12, 20, 12, 0, 0).unwrap()]);
        let dec = [analytic::declination_spencer71(355)];
        let eot = [analytic::equation_of_time_spencer71(355)];
        let events = sun_rise_set_transit_geometric(&times, 89.9, -73.97, &dec, &eot)
            .unwrap()
            .remove(0);
        assert_eq!(events.sunrise, None);
        assert_eq!(events.sunset, None);
        // solar noon drifts from clock noon by the longitude remainder within
        // the zone plus the equation of time
        let noon = events
            .transit
            .date_naive()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let gap = (events.transit.naive_local() - noon).num_minutes().abs();
        assert!(gap <= 30, "transit {} minutes from local noon", gap);
    }

    #[test]
    #[should_panic(expected = "one declination per timestamp")]
    fn short_declination_slice_panics() {
        let times = TimeSeries::zoned(&[
            New_York.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap(),
            New_York.with_ymd_and_hms(2024, 7, 2, 12, 0, 0).unwrap(),
        ]);
        let _ = sun_rise_set_transit_geometric(&times, 40.77, -73.97, &[0.3], &[0.0, 0.0]);
    }

    #[test]
    fn naive_series_is_rejected() {
        let times = TimeSeries::single_utc(
            chrono::NaiveDate::from_ymd_opt(2024, 7, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
        );
        let err = sun_rise_set_transit_geometric(&times, 40.77, -73.97, &[0.3], &[0.0])
            .unwrap_err();
        assert_eq!(err, SolarError::MissingTimezone);
    }

    #[test]
    fn brent_finds_a_simple_root() {
        // root of cos(x) in [1, 2] is π/2
        let root = brentq(f64::cos, 1.0, 2.0, 1e-14).unwrap();
        assert!((root - core::f64::consts::FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn brent_rejects_a_rootless_bracket() {
        let err = brentq(|x| x * x + 1.0, -1.0, 1.0, 1e-12).unwrap_err();
        assert_eq!(err, SolarError::NoSignChange);
    }

    #[test]
    fn calc_time_matches_the_geometric_sunrise() {
        let observer = Observer::new(40.77, -73.97).unwrap();
        // bracket the 2024-07-01 morning: 08:00 to 14:00 UTC
        let lower = Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap();
        let upper = Utc.with_ymd_and_hms(2024, 7, 1, 14, 0, 0).unwrap();
        let crossing = calc_time(
            lower,
            upper,
            &observer,
            SolarAttribute::Elevation,
            0.0,
            CALC_TIME_XTOL,
        )
        .unwrap();

        let geometric = nyc_summer_events().sunrise.unwrap();
        let gap = (crossing.with_timezone(&Utc) - geometric.with_timezone(&Utc))
            .num_seconds()
            .abs();
        // the closed-form declination model is good to a couple of minutes
        assert!(gap < 300, "sunrise gap {gap} s");
    }

    #[test]
    fn calc_time_without_a_crossing_reports_no_sign_change() {
        let observer = Observer::new(40.77, -73.97).unwrap();
        // midday bracket: the sun is up the whole time
        let lower = Utc.with_ymd_and_hms(2024, 7, 1, 15, 0, 0).unwrap();
        let upper = Utc.with_ymd_and_hms(2024, 7, 1, 18, 0, 0).unwrap();
        let err = calc_time(
            lower,
            upper,
            &observer,
            SolarAttribute::Elevation,
            0.0,
            CALC_TIME_XTOL,
        )
        .unwrap_err();
        assert_eq!(err, SolarError::NoSignChange);
    }
}
