//! Low-precision closed-form solar position.
//!
//! Classic mean-orbital-element algorithm: mean anomaly and eccentricity from
//! low-order polynomials in days since 1900, eccentric anomaly by fixed-point
//! iteration of Kepler's equation, then ecliptic longitude, declination and
//! right ascension against the local apparent sidereal time. Typically agrees
//! with the high-precision algorithm to a few hundredths of a degree over the
//! present era, at a small fraction of the cost.
//!
//! Also home to [`EphemerisProvider`], the seam through which an external
//! ephemeris backend can be plugged into the method dispatch.

use chrono::{DateTime, Datelike, FixedOffset, Timelike};

use crate::analytic;
use crate::math::normalize_degrees_360;
use crate::types::{Observer, RiseSetTransit, SolarError, SolarPosition, TimeSeries};

/// Annual aberration in degrees.
const ABERRATION: f64 = 20.0 / 3600.0;

/// Convergence tolerance for the eccentric anomaly, degrees.
const KEPLER_TOLERANCE: f64 = 1e-4;

/// Iteration cap for the Kepler fixed-point loop.
const KEPLER_MAX_ITERATIONS: u32 = 100;

/// Direction in which an external provider searches for a horizon crossing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventSearch {
    /// First event at or after each timestamp.
    Next,
    /// Last event before each timestamp.
    Previous,
}

/// An external ephemeris backend.
///
/// The crate itself ships no implementation; callers that have one (a
/// planetarium library, a JPL ephemeris reader) implement this trait and pass
/// it to [`crate::get_solar_position_with_provider`].
pub trait EphemerisProvider {
    /// Solar position at each timestamp of the series.
    fn solar_position(
        &self,
        times: &TimeSeries,
        observer: &Observer,
    ) -> Result<Vec<SolarPosition>, SolarError>;

    /// Sunrise, sunset and transit relative to each timestamp, searching in
    /// the given direction, for a horizon at `horizon_deg` degrees of true
    /// elevation.
    fn rise_set_transit(
        &self,
        times: &TimeSeries,
        observer: &Observer,
        horizon_deg: f64,
        search: EventSearch,
    ) -> Result<Vec<RiseSetTransit>, SolarError>;
}

/// Solves Kepler's equation M = E − e·sin(E) by fixed-point iteration.
///
/// `mean_anomaly` in degrees, `eccentricity` dimensionless; returns the
/// eccentric anomaly in degrees.
fn eccentric_anomaly(mean_anomaly: f64, eccentricity: f64) -> Result<f64, SolarError> {
    let mut e = mean_anomaly;
    for _ in 0..KEPLER_MAX_ITERATIONS {
        let next = mean_anomaly + (eccentricity * e.to_radians().sin()).to_degrees();
        if (next - e).abs() <= KEPLER_TOLERANCE {
            return Ok(next);
        }
        e = next;
    }
    Err(SolarError::Convergence {
        iterations: KEPLER_MAX_ITERATIONS,
    })
}

/// Atmospheric refraction in degrees for a true elevation, banded fit.
fn refraction(elevation: f64, pressure: f64, temperature: f64) -> f64 {
    let tan_el = elevation.to_radians().tan();
    let arcsec = if elevation > 5.0 && elevation <= 85.0 {
        58.1 / tan_el - 0.07 / tan_el.powi(3) + 8.6e-5 / tan_el.powi(5)
    } else if elevation > -0.575 && elevation <= 5.0 {
        elevation * (-518.2 + elevation * (103.4 + elevation * (-12.79 + elevation * 0.711)))
            + 1735.0
    } else if elevation > -1.0 && elevation <= -0.575 {
        -20.774 / tan_el
    } else {
        0.0
    };
    arcsec * (283.0 / (273.0 + temperature)) * (pressure / 101_325.0) / 3600.0
}

fn position_at(
    stamp: &DateTime<FixedOffset>,
    latitude: f64,
    longitude: f64,
    pressure: f64,
    temperature: f64,
) -> Result<SolarPosition, SolarError> {
    let utc = stamp.to_utc();
    let day_of_year = f64::from(utc.ordinal());
    let univ_hr = f64::from(utc.num_seconds_from_midnight()) / 3600.0
        + f64::from(utc.nanosecond()) / 3.6e12;

    // days since noon 1899-12-31
    let yr = f64::from(utc.year() - 1900);
    let yr_begin = 365.0 * yr + ((yr - 1.0) / 4.0).floor() - 0.5;
    let ezero = yr_begin + day_of_year;
    let t = ezero / 36_525.0;

    // Greenwich mean sidereal time at midnight, then at the timestamp
    let gmst0_frac =
        6.0 / 24.0 + 38.0 / 1440.0 + (45.836 + 8_640_184.542 * t + 0.0929 * t * t) / 86_400.0;
    let gmst0 = 360.0 * (gmst0_frac - gmst0_frac.floor());
    let gmsti = normalize_degrees_360(gmst0 + 360.0 * (1.002_737_909_3 * univ_hr / 24.0));
    let loc_ast = normalize_degrees_360(360.0 + gmsti + longitude);

    let epoch_date = ezero + univ_hr / 24.0;
    let t1 = epoch_date / 36_525.0;

    let obliquity_r = (23.452294 - 0.0130125 * t1 - 1.64e-6 * t1 * t1 + 5.03e-7 * t1 * t1 * t1)
        .to_radians();
    let ml_perigee = 281.22083 + 4.70684e-5 * epoch_date + 0.000453 * t1 * t1 + 3e-6 * t1 * t1 * t1;
    let mean_anom = normalize_degrees_360(
        358.47583 + 0.985_600_267 * epoch_date - 0.00015 * t1 * t1 - 3e-6 * t1 * t1 * t1,
    );
    let eccen = 0.016_751_04 - 4.18e-5 * t1 - 1.26e-7 * t1 * t1;

    let eccen_anom = eccentric_anomaly(mean_anom, eccen)?;
    let true_anom = 2.0
        * normalize_degrees_360(
            (((1.0 + eccen) / (1.0 - eccen)).sqrt() * (eccen_anom.to_radians() / 2.0).tan())
                .atan2(1.0)
                .to_degrees(),
        );

    let ec_lon_r = (normalize_degrees_360(ml_perigee + true_anom) - ABERRATION).to_radians();
    let dec_r = (obliquity_r.sin() * ec_lon_r.sin()).asin();
    let rt_ascen = (obliquity_r.cos() * ec_lon_r.sin())
        .atan2(ec_lon_r.cos())
        .to_degrees();

    let mut hr_angle = loc_ast - rt_ascen;
    if hr_angle.abs() > 180.0 {
        hr_angle -= 360.0 * hr_angle.signum();
    }
    let hr_angle_r = hr_angle.to_radians();
    let lat_r = latitude.to_radians();

    let mut azimuth = (-hr_angle_r.sin())
        .atan2(lat_r.cos() * dec_r.tan() - lat_r.sin() * hr_angle_r.cos())
        .to_degrees();
    if azimuth < 0.0 {
        azimuth += 360.0;
    }
    let elevation = (lat_r.cos() * dec_r.cos() * hr_angle_r.cos() + lat_r.sin() * dec_r.sin())
        .asin()
        .to_degrees();

    let apparent = elevation + refraction(elevation, pressure, temperature);

    // this formulation has no equation-of-time byproduct; fall back to the
    // Spencer series on the same UTC day
    let eot = analytic::equation_of_time_spencer71(utc.ordinal());

    Ok(SolarPosition::from_elevations(elevation, apparent, azimuth, eot))
}

/// Solar position at each timestamp using the closed-form algorithm.
///
/// `pressure` is in Pascals, `temperature` in degrees Celsius; both feed only
/// the refraction correction.
///
/// # Errors
///
/// Returns [`SolarError::Convergence`] if the Kepler iteration fails to
/// settle, which does not happen for the small eccentricities of the
/// supported era.
pub fn solar_position(
    times: &TimeSeries,
    latitude: f64,
    longitude: f64,
    pressure: f64,
    temperature: f64,
) -> Result<Vec<SolarPosition>, SolarError> {
    times
        .stamps()
        .iter()
        .map(|stamp| position_at(stamp, latitude, longitude, pressure, temperature))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::spa;

    fn utc_single(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> TimeSeries {
        TimeSeries::single_utc(
            NaiveDate::from_ymd_opt(y, m, d)
                .unwrap()
                .and_hms_opt(h, min, s)
                .unwrap(),
        )
    }

    #[test]
    fn agrees_with_high_precision_at_the_reference_site() {
        let times = utc_single(2003, 10, 17, 19, 30, 30);
        let low = solar_position(&times, 39.742_476, -105.1786, 82_000.0, 11.0).unwrap();
        let high = spa::solar_position_unix(
            1_066_419_030.0,
            39.742_476,
            -105.1786,
            1830.14,
            820.0,
            11.0,
            67.0,
            0.5667,
        );
        assert!(
            (low[0].apparent_elevation - high.apparent_elevation).abs() < 0.05,
            "elevation {} vs {}",
            low[0].apparent_elevation,
            high.apparent_elevation
        );
        assert!(
            (low[0].azimuth - high.azimuth).abs() < 0.05,
            "azimuth {} vs {}",
            low[0].azimuth,
            high.azimuth
        );
    }

    #[test]
    fn morning_sun_in_the_east_over_new_york() {
        let times = utc_single(2024, 6, 21, 12, 0, 0); // 08:00 EDT
        let pos = solar_position(&times, 40.77, -73.97, 101_325.0, 12.0).unwrap();
        assert!((pos[0].elevation - 26.49).abs() < 0.1, "elevation {}", pos[0].elevation);
        assert!((pos[0].azimuth - 80.96).abs() < 0.2, "azimuth {}", pos[0].azimuth);
    }

    #[test]
    fn refraction_vanishes_well_below_the_horizon() {
        assert_eq!(refraction(-5.0, 101_325.0, 12.0), 0.0);
        // near the horizon it approaches about half a degree
        let r = refraction(0.0, 101_325.0, 12.0);
        assert!((0.4..0.6).contains(&r), "refraction {r}");
    }

    #[test]
    fn refraction_scales_with_pressure() {
        let full = refraction(10.0, 101_325.0, 12.0);
        let half = refraction(10.0, 50_662.5, 12.0);
        assert!((half - full / 2.0).abs() < 1e-12);
    }

    #[test]
    fn kepler_iteration_converges_for_solar_eccentricity() {
        for m in [0.0, 45.0, 179.0, 270.0, 359.5] {
            let e = eccentric_anomaly(m, 0.0167).unwrap();
            // residual of Kepler's equation in degrees
            let residual = m - (e - (0.0167 * e.to_radians().sin()).to_degrees());
            assert!(residual.abs() < 2e-4, "anomaly {m}: residual {residual}");
        }
    }

    #[test]
    fn positions_error_free_over_a_full_day() {
        let stamps: Vec<_> = (0..24)
            .map(|h| {
                NaiveDate::from_ymd_opt(2024, 3, 20)
                    .unwrap()
                    .and_hms_opt(h, 0, 0)
                    .unwrap()
            })
            .collect();
        let times = TimeSeries::utc(&stamps);
        let positions = solar_position(&times, 52.0, 13.0, 101_325.0, 12.0).unwrap();
        assert_eq!(positions.len(), 24);
        for pos in &positions {
            assert!((0.0..360.0).contains(&pos.azimuth));
            assert!((pos.zenith + pos.elevation - 90.0).abs() < 1e-12);
        }
    }
}
