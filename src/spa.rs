//! High-precision solar position algorithm (NREL SPA, Reda & Andreas 2004).
//!
//! Computes apparent/true zenith, elevation, azimuth and the equation of time
//! from unix time and observer position, through heliocentric ecliptic
//! coordinates, nutation, aberration and the topocentric parallax
//! corrections. Agreement with the reference implementation is at the level
//! of the truncated periodic tables, a few ten-thousandths of a degree.
//!
//! Latitude ±90° is the one accepted singularity: the topocentric azimuth is
//! undefined on the polar axis itself, though every nearby latitude is fine.

use chrono::Datelike;
use rayon::prelude::*;

use crate::math::{normalize_degrees_360, polynomial};
use crate::tables::{
    HelioTerm, B0_TERMS, B1_TERMS, L0_TERMS, L1_TERMS, L2_TERMS, L3_TERMS, L4_TERMS, L5_TERMS,
    NUTATION_TERMS, R0_TERMS, R1_TERMS, R2_TERMS, R3_TERMS, R4_TERMS,
};
use crate::time;
use crate::types::SolarPosition;

/// Angular radius of the sun in degrees.
const SUN_RADIUS: f64 = 0.26667;

/// Earth's equatorial radius in meters.
const EARTH_EQUATORIAL_RADIUS_METERS: f64 = 6_378_140.0;

/// Earth's flattening factor.
const EARTH_FLATTENING: f64 = 0.99664719;

/// Equatorial horizontal parallax constant, arcseconds.
const PARALLAX_CONSTANT: f64 = 8.794;

/// Aberration constant, arcseconds.
const ABERRATION_CONSTANT: f64 = 20.4898;

/// Mean sidereal rate, degrees per day.
const SIDEREAL_TIME_RATE: f64 = 360.985_647_366_29;

/// Fallback ΔT in seconds when the timestamp cannot be decomposed.
const DEFAULT_DELTA_T: f64 = 67.0;

/// Mean obliquity of the ecliptic, arcseconds, as a polynomial in jme/10.
const ECLIPTIC_MEAN_OBLIQUITY: [f64; 11] = [
    84_381.448, -4680.93, -1.55, 1999.25, -51.38, -249.67, -39.05, 7.12, 27.87, 5.79, 2.45,
];

/// Sun mean longitude, degrees, as a polynomial in jme.
const SUN_MEAN_LONGITUDE: [f64; 6] = [
    280.466_456_7,
    360_007.698_277_9,
    0.030_320_28,
    1.0 / 49_931.0,
    -1.0 / 15_300.0,
    -1.0 / 2_000_000.0,
];

/// Fundamental nutation arguments X0..X4, degrees, as polynomials in jce.
const NUTATION_ARGUMENTS: [[f64; 4]; 5] = [
    [297.85036, 445_267.111_480, -0.0019142, 1.0 / 189_474.0],
    [357.52772, 35_999.050_340, -0.0001603, -1.0 / 300_000.0],
    [134.96298, 477_198.867_398, 0.0086972, 1.0 / 56_250.0],
    [93.27191, 483_202.017_538, -0.0036825, 1.0 / 327_270.0],
    [125.04452, -1934.136_261, 0.0020708, 1.0 / 450_000.0],
];

/// Tuning knobs for the high-precision algorithm.
#[derive(Clone, Debug)]
pub struct SpaParams {
    /// ΔT (TT − UT) in seconds; estimated per timestamp when `None`.
    pub delta_t: Option<f64>,
    /// Atmospheric refraction at the horizon, degrees.
    pub atmos_refract: f64,
    /// Worker-count hint for large batches. Values ≤ 1 evaluate
    /// sequentially; results are identical either way.
    pub numthreads: usize,
}

impl Default for SpaParams {
    fn default() -> Self {
        Self {
            delta_t: None,
            atmos_refract: 0.5667,
            numthreads: 1,
        }
    }
}

fn sum_periodic_terms(terms: &[HelioTerm], jme: f64) -> f64 {
    terms.iter().map(|t| t.a * (t.b + t.c * jme).cos()).sum()
}

/// Heliocentric longitude in degrees, [0, 360).
fn heliocentric_longitude(jme: f64) -> f64 {
    let series: [&[HelioTerm]; 6] = [
        &L0_TERMS, &L1_TERMS, &L2_TERMS, &L3_TERMS, &L4_TERMS, &L5_TERMS,
    ];
    let mut total = 0.0;
    let mut power = 1.0;
    for terms in series {
        total += sum_periodic_terms(terms, jme) * power;
        power *= jme;
    }
    normalize_degrees_360((total / 1.0e8).to_degrees())
}

/// Heliocentric latitude in degrees, near zero.
fn heliocentric_latitude(jme: f64) -> f64 {
    let total = sum_periodic_terms(&B0_TERMS, jme) + sum_periodic_terms(&B1_TERMS, jme) * jme;
    (total / 1.0e8).to_degrees()
}

/// Earth-sun distance in astronomical units.
fn heliocentric_radius_vector(jme: f64) -> f64 {
    let series: [&[HelioTerm]; 5] = [&R0_TERMS, &R1_TERMS, &R2_TERMS, &R3_TERMS, &R4_TERMS];
    let mut total = 0.0;
    let mut power = 1.0;
    for terms in series {
        total += sum_periodic_terms(terms, jme) * power;
        power *= jme;
    }
    total / 1.0e8
}

/// Nutation in longitude and obliquity, both in degrees.
fn nutation_longitude_obliquity(jce: f64) -> (f64, f64) {
    let x: [f64; 5] = core::array::from_fn(|i| polynomial(&NUTATION_ARGUMENTS[i], jce));

    let mut sum_psi = 0.0;
    let mut sum_eps = 0.0;
    for term in &NUTATION_TERMS {
        let argument: f64 = x
            .iter()
            .zip(&term.y)
            .map(|(xj, &yj)| xj * f64::from(yj))
            .sum::<f64>()
            .to_radians();
        sum_psi += (term.psi_a + term.psi_b * jce) * argument.sin();
        sum_eps += (term.eps_c + term.eps_d * jce) * argument.cos();
    }
    (sum_psi / 36_000_000.0, sum_eps / 36_000_000.0)
}

/// Equation of time in minutes, wrapped to a small range around zero.
fn equation_of_time(jme: f64, alpha: f64, dpsi: f64, epsilon: f64) -> f64 {
    let m = normalize_degrees_360(polynomial(&SUN_MEAN_LONGITUDE, jme));
    let mut eot = 4.0 * (m - 0.005_718_3 - alpha + dpsi * epsilon.to_radians().cos());
    if eot > 20.0 {
        eot -= 1440.0;
    } else if eot < -20.0 {
        eot += 1440.0;
    }
    eot
}

/// Refraction correction in degrees, applied only while the true sun is not
/// deeply below the horizon.
fn refraction_correction(
    pressure_mb: f64,
    temperature: f64,
    e0: f64,
    atmos_refract: f64,
) -> f64 {
    if e0 < -(SUN_RADIUS + atmos_refract) {
        return 0.0;
    }
    (pressure_mb / 1010.0) * (283.0 / (273.0 + temperature)) * 1.02
        / (60.0 * (e0 + 10.3 / (e0 + 5.11)).to_radians().tan())
}

/// Solar position at one unix timestamp.
///
/// `pressure_mb` is in millibars; `elevation` in meters; angles in degrees.
#[allow(clippy::too_many_arguments)]
pub(crate) fn solar_position_unix(
    unixtime: f64,
    latitude: f64,
    longitude: f64,
    elevation: f64,
    pressure_mb: f64,
    temperature: f64,
    delta_t: f64,
    atmos_refract: f64,
) -> SolarPosition {
    let jd = time::julian_day(unixtime);
    let jc = time::julian_century(jd);
    let jde = time::julian_ephemeris_day(jd, delta_t);
    let jce = time::julian_ephemeris_century(jde);
    let jme = time::julian_ephemeris_millennium(jce);

    let helio_lon = heliocentric_longitude(jme);
    let helio_lat = heliocentric_latitude(jme);
    let radius = heliocentric_radius_vector(jme);

    // geocentric ecliptic coordinates
    let theta = normalize_degrees_360(helio_lon + 180.0);
    let beta = (-helio_lat).to_radians();

    let (dpsi, deps) = nutation_longitude_obliquity(jce);
    let epsilon0 = polynomial(&ECLIPTIC_MEAN_OBLIQUITY, jme / 10.0);
    let epsilon = epsilon0 / 3600.0 + deps;
    let epsilon_rad = epsilon.to_radians();

    // aberration and apparent sun longitude
    let dtau = -ABERRATION_CONSTANT / (3600.0 * radius);
    let lambda = (theta + dpsi + dtau).to_radians();

    // apparent sidereal time at Greenwich
    let v0 = normalize_degrees_360(
        280.460_618_37 + SIDEREAL_TIME_RATE * (jd - time::J2000_EPOCH_JD)
            + 0.000_387_933 * jc * jc
            - jc * jc * jc / 38_710_000.0,
    );
    let v = v0 + dpsi * epsilon_rad.cos();

    // geocentric right ascension and declination
    let alpha = normalize_degrees_360(
        (lambda.sin() * epsilon_rad.cos() - beta.tan() * epsilon_rad.sin())
            .atan2(lambda.cos())
            .to_degrees(),
    );
    let delta = (beta.sin() * epsilon_rad.cos() + beta.cos() * epsilon_rad.sin() * lambda.sin())
        .asin();

    // local hour angle and topocentric corrections
    let big_h = normalize_degrees_360(v + longitude - alpha).to_radians();
    let xi = (PARALLAX_CONSTANT / (3600.0 * radius)).to_radians();
    let lat_rad = latitude.to_radians();
    let u = (EARTH_FLATTENING * lat_rad.tan()).atan();
    let x = u.cos() + elevation * lat_rad.cos() / EARTH_EQUATORIAL_RADIUS_METERS;
    let y = EARTH_FLATTENING * u.sin() + elevation * lat_rad.sin() / EARTH_EQUATORIAL_RADIUS_METERS;

    let dalpha = (-x * xi.sin() * big_h.sin()).atan2(delta.cos() - x * xi.sin() * big_h.cos());
    let delta_prime = ((delta.sin() - y * xi.sin()) * dalpha.cos())
        .atan2(delta.cos() - x * xi.sin() * big_h.cos());
    let h_prime = big_h - dalpha;

    // topocentric elevation and azimuth
    let e0 = (lat_rad.sin() * delta_prime.sin()
        + lat_rad.cos() * delta_prime.cos() * h_prime.cos())
    .asin()
    .to_degrees();
    let delta_e = refraction_correction(pressure_mb, temperature, e0, atmos_refract);
    let e = e0 + delta_e;

    let azimuth_astro = h_prime
        .sin()
        .atan2(h_prime.cos() * lat_rad.sin() - delta_prime.tan() * lat_rad.cos())
        .to_degrees();
    let azimuth = normalize_degrees_360(azimuth_astro + 180.0);

    let eot = equation_of_time(jme, alpha, dpsi, epsilon);

    SolarPosition::from_elevations(e0, e, azimuth, eot)
}

fn delta_t_for(unixtime: f64, requested: Option<f64>) -> f64 {
    if let Some(dt) = requested {
        return dt;
    }
    chrono::DateTime::from_timestamp(unixtime as i64, 0)
        .map_or(DEFAULT_DELTA_T, |dt| {
            time::calculate_deltat(dt.year(), dt.month())
        })
}

/// Solar position for a batch of unix timestamps.
///
/// The worker-count hint in [`SpaParams`] only changes how the batch is
/// scheduled; per-timestamp results are bit-identical to sequential
/// evaluation.
pub fn solar_position(
    unixtime: &[f64],
    latitude: f64,
    longitude: f64,
    elevation: f64,
    pressure_mb: f64,
    temperature: f64,
    params: &SpaParams,
) -> Vec<SolarPosition> {
    let eval = |&t: &f64| {
        solar_position_unix(
            t,
            latitude,
            longitude,
            elevation,
            pressure_mb,
            temperature,
            delta_t_for(t, params.delta_t),
            params.atmos_refract,
        )
    };

    if params.numthreads > 1 && unixtime.len() > 1 {
        if let Ok(pool) = rayon::ThreadPoolBuilder::new()
            .num_threads(params.numthreads)
            .build()
        {
            return pool.install(|| unixtime.par_iter().map(eval).collect());
        }
    }
    unixtime.iter().map(eval).collect()
}

/// Earth-sun distance in astronomical units at each unix timestamp.
///
/// The radius vector of the same heliocentric series the position algorithm
/// uses; ΔT is estimated per timestamp when `delta_t` is `None`.
pub fn earthsun_distance(unixtime: &[f64], delta_t: Option<f64>) -> Vec<f64> {
    unixtime
        .iter()
        .map(|&t| {
            let jde = time::julian_ephemeris_day(time::julian_day(t), delta_t_for(t, delta_t));
            let jme = time::julian_ephemeris_millennium(time::julian_ephemeris_century(jde));
            heliocentric_radius_vector(jme)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Reference case from the NREL SPA report: 2003-10-17 12:30:30 local
    /// (UTC−7) at the NREL Golden site.
    fn nrel_reference() -> SolarPosition {
        solar_position_unix(
            1_066_419_030.0,
            39.742_476,
            -105.1786,
            1830.14,
            820.0,
            11.0,
            67.0,
            0.5667,
        )
    }

    #[test]
    fn matches_nrel_report_reference_values() {
        let pos = nrel_reference();
        assert!(
            (pos.apparent_zenith - 50.111_62).abs() < 1e-3,
            "apparent zenith {}",
            pos.apparent_zenith
        );
        assert!(
            (pos.azimuth - 194.340_24).abs() < 1e-3,
            "azimuth {}",
            pos.azimuth
        );
        assert!(
            (pos.equation_of_time - 14.64).abs() < 0.02,
            "eot {}",
            pos.equation_of_time
        );
    }

    #[test]
    fn zenith_elevation_complements_hold() {
        let pos = nrel_reference();
        assert!((pos.zenith + pos.elevation - 90.0).abs() < 1e-12);
        assert!((pos.apparent_zenith + pos.apparent_elevation - 90.0).abs() < 1e-12);
        // refraction lifts the apparent sun
        assert!(pos.apparent_elevation > pos.elevation);
    }

    #[test]
    fn no_refraction_below_the_horizon() {
        // local midnight at the reference site
        let pos = solar_position_unix(
            1_066_419_030.0 - 43_200.0,
            39.742_476,
            -105.1786,
            1830.14,
            820.0,
            11.0,
            67.0,
            0.5667,
        );
        assert!(pos.elevation < -10.0);
        assert_eq!(pos.apparent_elevation, pos.elevation);
    }

    #[test]
    fn polar_latitudes_stay_finite() {
        for &lat in &[89.9, -89.9, 66.6, -66.6] {
            let pos = solar_position_unix(
                1_066_419_030.0,
                lat,
                -105.1786,
                0.0,
                1013.25,
                11.0,
                67.0,
                0.5667,
            );
            assert!(pos.azimuth.is_finite(), "azimuth at lat {lat}");
            assert!(pos.elevation.is_finite(), "elevation at lat {lat}");
            assert!((0.0..360.0).contains(&pos.azimuth));
        }
    }

    #[test]
    fn parallel_hint_does_not_change_results() {
        let times: Vec<f64> = (0..48).map(|i| 1_066_419_030.0 + f64::from(i) * 1800.0).collect();
        let sequential = solar_position(
            &times, 39.74, -105.18, 1830.0, 820.0, 11.0, &SpaParams::default(),
        );
        let hinted = solar_position(
            &times,
            39.74,
            -105.18,
            1830.0,
            820.0,
            11.0,
            &SpaParams {
                numthreads: 4,
                ..SpaParams::default()
            },
        );
        assert_eq!(sequential, hinted);
    }

    #[test]
    fn earthsun_distance_tracks_perihelion_and_aphelion() {
        // 2024-01-03 and 2024-07-05, both at 12:00 UTC
        let distances = earthsun_distance(&[1_704_283_200.0, 1_720_180_800.0], None);
        assert!(
            (distances[0] - 0.983_307).abs() < 1e-4,
            "perihelion {}",
            distances[0]
        );
        assert!(
            (distances[1] - 1.016_726).abs() < 1e-4,
            "aphelion {}",
            distances[1]
        );
    }

    #[test]
    fn earthsun_distance_at_the_reference_instant() {
        let d = earthsun_distance(&[1_066_419_030.0], Some(67.0));
        assert!((d[0] - 0.996_629).abs() < 1e-5, "distance {}", d[0]);
    }

    #[test]
    fn automatic_delta_t_is_close_to_the_fixed_default() {
        let auto = solar_position_unix(
            1_066_419_030.0,
            39.742_476,
            -105.1786,
            1830.14,
            820.0,
            11.0,
            delta_t_for(1_066_419_030.0, None),
            0.5667,
        );
        let fixed = nrel_reference();
        assert!((auto.apparent_zenith - fixed.apparent_zenith).abs() < 1e-3);
    }
}
