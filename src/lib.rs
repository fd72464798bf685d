//! Solar position and solar event calculations.
//!
//! Computes where the sun is (zenith, elevation, azimuth, equation of time)
//! and when it crosses the horizon, for any observer on Earth and any
//! timestamp series. Four algorithms are offered behind one dispatch
//! surface, trading accuracy for cost:
//!
//! * `high-precision-iterative`: the NREL SPA algorithm, accurate to
//!   fractions of an arcsecond over several millennia. The default.
//! * `low-precision-closed-form`: mean orbital elements plus a Kepler
//!   iteration, good to a few hundredths of a degree in the present era.
//! * `geometric-analytical`: closed-form spherical trigonometry on tabulated
//!   declination and equation-of-time series; the cheapest.
//! * `ephemeris-based`: delegates to a caller-supplied
//!   [`EphemerisProvider`].
//!
//! ```
//! use chrono::NaiveDate;
//! use solar_geometry::{get_solar_position, Observer, TimeSeries};
//!
//! let observer = Observer::new(40.77, -73.97)?;
//! let noon_edt = NaiveDate::from_ymd_opt(2024, 6, 21)
//!     .unwrap()
//!     .and_hms_opt(16, 0, 0)
//!     .unwrap();
//! let times = TimeSeries::single_utc(noon_edt);
//!
//! let positions = get_solar_position(&times, &observer, "high-precision-iterative")?;
//! assert!(positions[0].elevation > 60.0);
//! assert!((positions[0].zenith + positions[0].elevation - 90.0).abs() < 1e-12);
//! # Ok::<(), solar_geometry::SolarError>(())
//! ```
//!
//! Sunrise and sunset come either from the geometric solver
//! ([`sun_rise_set_transit_geometric`]) or by root finding over the
//! high-precision algorithm ([`calc_time`]).

pub mod analytic;
pub mod atmosphere;
pub mod ephemeris;
mod math;
pub mod riseset;
pub mod spa;
mod tables;
pub mod time;
mod types;


pub use ephemeris::{EphemerisProvider, EventSearch};
pub use riseset::{calc_time, sun_rise_set_transit_geometric, CALC_TIME_XTOL};
pub use types::{
    AlgorithmMethod, Observer, RiseSetTransit, SolarAttribute, SolarError, SolarPosition,
    TimeSeries, DEFAULT_TEMPERATURE, SEA_LEVEL_PRESSURE,
};

/// Solar position at each timestamp, with the algorithm chosen by name.
///
/// Method names are matched case-insensitively; see [`AlgorithmMethod`] for
/// the accepted spellings. The `ephemeris-based` method needs an injected
/// backend and is only reachable through
/// [`get_solar_position_with_provider`].
///
/// # Errors
///
/// [`SolarError::InvalidMethod`] for an unknown name, plus whatever the
/// selected algorithm reports.
pub fn get_solar_position(
    times: &TimeSeries,
    observer: &Observer,
    method: &str,
) -> Result<Vec<SolarPosition>, SolarError> {
    get_solar_position_with_provider(times, observer, method.parse()?, None)
}

/// Solar position at each timestamp, with an optional external ephemeris
/// backend for [`AlgorithmMethod::EphemerisBased`].
///
/// # Errors
///
/// [`SolarError::CapabilityUnavailable`] when the ephemeris-based method is
/// requested without a provider.
pub fn get_solar_position_with_provider(
    times: &TimeSeries,
    observer: &Observer,
    method: AlgorithmMethod,
    provider: Option<&dyn EphemerisProvider>,
) -> Result<Vec<SolarPosition>, SolarError> {
    let (altitude, pressure) = observer.resolve_atmosphere();
    log::debug!(
        "solar position: {:?}, {} timestamps, site ({}, {}) at {} m",
        method,
        times.len(),
        observer.latitude,
        observer.longitude,
        altitude
    );

    match method {
        AlgorithmMethod::HighPrecision => Ok(spa::solar_position(
            &times.unixtime(),
            observer.latitude,
            observer.longitude,
            altitude,
            pressure / 100.0,
            observer.temperature,
            &spa::SpaParams::default(),
        )),
        AlgorithmMethod::LowPrecision => ephemeris::solar_position(
            times,
            observer.latitude,
            observer.longitude,
            pressure,
            observer.temperature,
        ),
        AlgorithmMethod::GeometricAnalytical => Ok(analytic::solar_position_analytical(
            times,
            observer.latitude,
            observer.longitude,
        )),
        AlgorithmMethod::EphemerisBased => provider
            .ok_or(SolarError::CapabilityUnavailable(
                "ephemeris-based method requires an external provider",
            ))?
            .solar_position(times, observer),
    }
}

/// Earth-sun distance in astronomical units at each timestamp, from the
/// high-precision heliocentric series.
pub fn earthsun_distance(times: &TimeSeries, delta_t: Option<f64>) -> Vec<f64> {
    spa::earthsun_distance(&times.unixtime(), delta_t)
}
