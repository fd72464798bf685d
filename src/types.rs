use chrono::{DateTime, FixedOffset, NaiveDateTime, Offset, TimeZone, Utc};
use core::str::FromStr;
use thiserror::Error;

use crate::atmosphere;

/// Default ambient temperature in degrees Celsius.
pub const DEFAULT_TEMPERATURE: f64 = 12.0;

/// Standard sea-level pressure in Pascals.
pub const SEA_LEVEL_PRESSURE: f64 = 101_325.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolarError {
    #[error("unknown solar position method `{0}`")]
    InvalidMethod(String),

    #[error("unknown solar attribute `{0}`")]
    InvalidAttribute(String),

    #[error("latitude {0}° out of range [-90, 90]")]
    LatitudeOutOfRange(f64),

    #[error("longitude {0}° out of range [-180, 180]")]
    LongitudeOutOfRange(f64),

    #[error("time series must carry an explicit timezone")]
    MissingTimezone,

    #[error("bracket does not contain a sign change")]
    NoSignChange,

    #[error("no convergence after {iterations} iterations")]
    Convergence { iterations: u32 },

    #[error("capability unavailable: {0}")]
    CapabilityUnavailable(&'static str),

    #[error("time conversion error")]
    TimeConversionError,
}

/// A fixed observing site plus the atmospheric inputs that affect refraction.
///
/// Altitude and pressure are mutually derivable through the standard
/// atmosphere: when only one is given the other is computed by
/// [`Observer::resolve_atmosphere`]. When both are given, both are trusted
/// as-is and no consistency check is made.
#[derive(Clone, Debug, PartialEq)]
pub struct Observer {
    /// Latitude in degrees, positive North.
    pub latitude: f64,
    /// Longitude in degrees, positive East.
    pub longitude: f64,
    /// Altitude above sea level in meters.
    pub altitude: Option<f64>,
    /// Ambient pressure in Pascals.
    pub pressure: Option<f64>,
    /// Ambient temperature in degrees Celsius.
    pub temperature: f64,
}

impl Observer {
    /// Creates an observer at the given coordinates with default atmosphere.
    ///
    /// # Errors
    ///
    /// Returns an error when latitude or longitude is outside its valid range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, SolarError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(SolarError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(SolarError::LongitudeOutOfRange(longitude));
        }
        Ok(Self {
            latitude,
            longitude,
            altitude: None,
            pressure: None,
            temperature: DEFAULT_TEMPERATURE,
        })
    }

    /// Sets the site altitude in meters.
    #[must_use]
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Sets the ambient pressure in Pascals.
    #[must_use]
    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    /// Sets the ambient temperature in degrees Celsius.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Resolves the altitude/pressure pair in meters and Pascals.
    ///
    /// A missing member is derived from the other through the standard
    /// atmosphere; with neither given the site is taken at sea level. When
    /// both are given they are returned unchanged, even if inconsistent.
    pub fn resolve_atmosphere(&self) -> (f64, f64) {
        match (self.altitude, self.pressure) {
            (None, None) => (0.0, SEA_LEVEL_PRESSURE),
            (Some(alt), None) => (alt, atmosphere::pressure_from_altitude(alt)),
            (None, Some(p)) => (atmosphere::altitude_from_pressure(p), p),
            (Some(alt), Some(p)) => (alt, p),
        }
    }
}

/// An ordered sequence of timestamps sharing one zone-handling mode.
///
/// A series built with [`TimeSeries::utc`] comes from naive timestamps that
/// are assumed to be UTC; it cannot be used with the sunrise/sunset solvers,
/// which need a real local offset to anchor "hours since local midnight".
#[derive(Clone, Debug)]
pub struct TimeSeries {
    stamps: Vec<DateTime<FixedOffset>>,
    zoned: bool,
}

impl TimeSeries {
    /// Builds a series from naive timestamps, assuming they are UTC.
    pub fn utc(times: &[NaiveDateTime]) -> Self {
        let utc = Utc.fix();
        Self {
            stamps: times
                .iter()
                .map(|t| DateTime::from_naive_utc_and_offset(*t, utc))
                .collect(),
            zoned: false,
        }
    }

    /// Builds a series from a single naive timestamp, assumed UTC.
    pub fn single_utc(time: NaiveDateTime) -> Self {
        Self::utc(&[time])
    }

    /// Builds a series from zone-aware timestamps.
    ///
    /// Each timestamp keeps its own fixed offset, so series built from a
    /// DST-observing timezone remain correct across transitions.
    pub fn zoned<Tz: TimeZone>(times: &[DateTime<Tz>]) -> Self {
        Self {
            stamps: times
                .iter()
                .map(|t| t.with_timezone(&t.offset().fix()))
                .collect(),
            zoned: true,
        }
    }

    pub fn stamps(&self) -> &[DateTime<FixedOffset>] {
        &self.stamps
    }

    pub fn len(&self) -> usize {
        self.stamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stamps.is_empty()
    }

    /// Whether the series was built from zone-aware timestamps.
    pub fn is_zoned(&self) -> bool {
        self.zoned
    }

    pub(crate) fn require_zoned(&self) -> Result<(), SolarError> {
        if self.zoned {
            Ok(())
        } else {
            Err(SolarError::MissingTimezone)
        }
    }

    /// Unix seconds (with fractional part) for each timestamp.
    pub(crate) fn unixtime(&self) -> Vec<f64> {
        self.stamps
            .iter()
            .map(|t| t.timestamp() as f64 + f64::from(t.timestamp_subsec_nanos()) / 1e9)
            .collect()
    }
}

/// Solar geometry for one timestamp.
///
/// Angles are in degrees, the equation of time in minutes. By construction
/// `zenith == 90 - elevation` and `apparent_zenith == 90 - apparent_elevation`
/// in every algorithm variant; the apparent values carry the atmospheric
/// refraction correction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SolarPosition {
    pub apparent_zenith: f64,
    pub zenith: f64,
    pub apparent_elevation: f64,
    pub elevation: f64,
    pub azimuth: f64,
    pub equation_of_time: f64,
}

impl SolarPosition {
    /// Builds a record from elevations, deriving both zeniths as complements.
    pub(crate) fn from_elevations(
        elevation: f64,
        apparent_elevation: f64,
        azimuth: f64,
        equation_of_time: f64,
    ) -> Self {
        Self {
            apparent_zenith: 90.0 - apparent_elevation,
            zenith: 90.0 - elevation,
            apparent_elevation,
            elevation,
            azimuth,
            equation_of_time,
        }
    }
}

/// Sunrise, sunset and solar transit for one day, in the timezone of the
/// input series. A `None` sunrise or sunset is the polar day/night sentinel:
/// the sun never crosses the horizon on that date.
#[derive(Clone, Debug, PartialEq)]
pub struct RiseSetTransit {
    pub sunrise: Option<DateTime<FixedOffset>>,
    pub sunset: Option<DateTime<FixedOffset>>,
    pub transit: DateTime<FixedOffset>,
}

/// Solar position computation strategy, selected by name per call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlgorithmMethod {
    /// High-precision iterative algorithm (NREL SPA). The default.
    HighPrecision,
    /// Low-precision closed-form approximation with iterative eccentric
    /// anomaly refinement.
    LowPrecision,
    /// Closed-form zenith/azimuth from latitude, declination and hour angle.
    GeometricAnalytical,
    /// Delegates to an injected external ephemeris provider.
    EphemerisBased,
}

impl Default for AlgorithmMethod {
    fn default() -> Self {
        AlgorithmMethod::HighPrecision
    }
}

impl FromStr for AlgorithmMethod {
    type Err = SolarError;

    fn from_str(name: &str) -> Result<Self, SolarError> {
        match name.to_ascii_lowercase().as_str() {
            "high-precision-iterative" | "spa" => Ok(AlgorithmMethod::HighPrecision),
            "low-precision-closed-form" | "ephemeris" => Ok(AlgorithmMethod::LowPrecision),
            "geometric-analytical" => Ok(AlgorithmMethod::GeometricAnalytical),
            "ephemeris-based" => Ok(AlgorithmMethod::EphemerisBased),
            other => Err(SolarError::InvalidMethod(other.to_owned())),
        }
    }
}

/// A solar quantity targeted by the root-finding solver.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SolarAttribute {
    Elevation,
    ApparentElevation,
    Zenith,
    ApparentZenith,
    Azimuth,
}

impl SolarAttribute {
    /// Reads the attribute, in degrees, out of a position record.
    pub fn extract(self, position: &SolarPosition) -> f64 {
        match self {
            SolarAttribute::Elevation => position.elevation,
            SolarAttribute::ApparentElevation => position.apparent_elevation,
            SolarAttribute::Zenith => position.zenith,
            SolarAttribute::ApparentZenith => position.apparent_zenith,
            SolarAttribute::Azimuth => position.azimuth,
        }
    }
}

impl FromStr for SolarAttribute {
    type Err = SolarError;

    fn from_str(name: &str) -> Result<Self, SolarError> {
        match name.to_ascii_lowercase().as_str() {
            "elevation" | "altitude" | "alt" => Ok(SolarAttribute::Elevation),
            "apparent_elevation" => Ok(SolarAttribute::ApparentElevation),
            "zenith" => Ok(SolarAttribute::Zenith),
            "apparent_zenith" => Ok(SolarAttribute::ApparentZenith),
            "azimuth" | "az" => Ok(SolarAttribute::Azimuth),
            other => Err(SolarError::InvalidAttribute(other.to_owned())),
        }
    }
}
