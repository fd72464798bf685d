//! Standard atmosphere conversions between site altitude and pressure.

/// Converts site altitude in meters to ambient pressure in Pascals using
/// the standard barometric approximation.
pub fn pressure_from_altitude(altitude: f64) -> f64 {
    100.0 * ((44_331.514 - altitude) / 11_880.516).powf(1.0 / 0.190_263_2)
}

/// Converts ambient pressure in Pascals to site altitude in meters.
pub fn altitude_from_pressure(pressure: f64) -> f64 {
    44_331.5 - 4_946.62 * pressure.powf(0.190_263)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn sea_level_pressure_is_standard() {
        let p = pressure_from_altitude(0.0);
        assert!((p - 101_325.0).abs() < 1.0, "sea level pressure {p}");
        let alt = altitude_from_pressure(101_325.0);
        assert!(alt.abs() < 1.0, "sea level altitude {alt}");
    }

    #[test]
    fn pressure_drops_with_altitude() {
        let p0 = pressure_from_altitude(0.0);
        let p3000 = pressure_from_altitude(3000.0);
        assert!(p3000 < p0);
        // roughly 70 kPa at 3 km
        assert!((p3000 - 70_121.0).abs() < 500.0, "pressure at 3 km: {p3000}");
    }

    proptest! {
        #[test]
        fn round_trip_within_relative_tolerance(altitude in -500.0..10_000.0f64) {
            let p = pressure_from_altitude(altitude);
            let back = altitude_from_pressure(p);
            // the two published coefficient sets are not exact inverses
            prop_assert!((back - altitude).abs() < 1.0,
                "altitude {altitude} -> {p} Pa -> {back}");

            let p_back = pressure_from_altitude(back);
            prop_assert!(((p_back - p) / p).abs() < 1e-3);
        }
    }
}
