//! Low-order analytical models: solar declination, equation of time, and the
//! closed-form zenith/azimuth expressions used by the geometric method and
//! the sunrise/sunset geometry.
//!
//! Day-of-year arguments must be in [1, 366]; behavior outside that range is
//! unspecified and callers validate upstream. No year or leap correction is
//! applied.

use chrono::Datelike;
use core::f64::consts::PI;

use crate::math::snap_unit;
use crate::time;
use crate::types::{SolarPosition, TimeSeries};

/// Minutes per radian of day angle: 24 h × 60 min / 2π.
const MINUTES_PER_RADIAN: f64 = 1440.0 / (2.0 * PI);

/// Tolerance for snapping a near-±1 azimuth cosine before arccos.
const COS_AZIMUTH_ATOL: f64 = 1e-8;

/// Day angle in radians for a day of year, measured from January 1st.
fn day_angle(dayofyear: u32) -> f64 {
    (2.0 * PI / 365.0) * (f64::from(dayofyear) - 1.0)
}

/// Solar declination in radians, Spencer (1971) Fourier series.
pub fn declination_spencer71(dayofyear: u32) -> f64 {
    let b = day_angle(dayofyear);
    0.006918 - 0.399912 * b.cos() + 0.070257 * b.sin() - 0.006758 * (2.0 * b).cos()
        + 0.000907 * (2.0 * b).sin()
        - 0.002697 * (3.0 * b).cos()
        + 0.00148 * (3.0 * b).sin()
}

/// Solar declination in radians, Cooper (1969) single-term approximation.
pub fn declination_cooper69(dayofyear: u32) -> f64 {
    let b = day_angle(dayofyear);
    (23.45 * (b + (2.0 * PI / 365.0) * 285.0).sin()).to_radians()
}

/// Equation of time in minutes, Spencer (1971).
pub fn equation_of_time_spencer71(dayofyear: u32) -> f64 {
    let b = day_angle(dayofyear);
    MINUTES_PER_RADIAN
        * (0.0000075 + 0.001868 * b.cos() - 0.032077 * b.sin() - 0.014615 * (2.0 * b).cos()
            - 0.040849 * (2.0 * b).sin())
}

/// Equation of time in minutes, PVCDROM two-term fit.
///
/// Same input domain as Spencer but anchored to the vernal equinox
/// (day number 81) and cheaper to evaluate.
pub fn equation_of_time_pvcdrom(dayofyear: u32) -> f64 {
    let bday = day_angle(dayofyear) - (2.0 * PI / 365.0) * 80.0;
    9.87 * (2.0 * bday).sin() - 7.53 * bday.cos() - 1.5 * bday.sin()
}

/// Solar zenith angle in radians from the closed-form spherical triangle.
///
/// All arguments in radians. Pure closed form with no singular inputs.
pub fn solar_zenith_analytical(latitude: f64, hour_angle: f64, declination: f64) -> f64 {
    (declination.cos() * latitude.cos() * hour_angle.cos() + declination.sin() * latitude.sin())
        .acos()
}

/// Solar azimuth angle in radians, measured clockwise from North.
///
/// All arguments in radians. A vanishing denominator (cos(latitude) = 0 or
/// sin(zenith) = 0) is replaced by the limiting value 1.0, and the cosine is
/// snapped to exactly ±1 when floating-point overshoot would leave the arccos
/// domain. The hemisphere is resolved by the sign of the hour angle, with
/// zero mapping to the positive sign, so an hour angle of exactly zero gives
/// an azimuth of π (180°).
pub fn solar_azimuth_analytical(
    latitude: f64,
    hour_angle: f64,
    declination: f64,
    zenith: f64,
) -> f64 {
    let numer = zenith.cos() * latitude.sin() - declination.sin();
    let denom = zenith.sin() * latitude.cos();

    let cos_azi = if denom.abs() <= COS_AZIMUTH_ATOL {
        1.0
    } else {
        snap_unit(numer / denom, COS_AZIMUTH_ATOL)
    };

    let sign_ha = if hour_angle < 0.0 { -1.0 } else { 1.0 };
    sign_ha * cos_azi.acos() + PI
}

/// Full position table for the geometric-analytical method.
///
/// Declination and equation of time come from the Spencer (1971) models on
/// the UTC day of year; no refraction correction is applied, so the apparent
/// values equal the true ones.
pub(crate) fn solar_position_analytical(
    times: &TimeSeries,
    latitude: f64,
    longitude: f64,
) -> Vec<SolarPosition> {
    let lat_rad = latitude.to_radians();
    times
        .stamps()
        .iter()
        .map(|stamp| {
            let doy = stamp.to_utc().ordinal();
            let eot = equation_of_time_spencer71(doy);
            let dec = declination_spencer71(doy);
            let ha = time::hour_angle_scalar(stamp, longitude, eot).to_radians();
            let zenith = solar_zenith_analytical(lat_rad, ha, dec);
            let azimuth = solar_azimuth_analytical(lat_rad, ha, dec, zenith);
            let elevation = 90.0 - zenith.to_degrees();
            SolarPosition::from_elevations(elevation, elevation, azimuth.to_degrees(), eot)
        })
        .collect()
}
