//! # Coordinate transforms
//!
//! Direction types for the three sky frames used by the crate and the spherical transforms
//! between them:
//!
//! ```text
//!              obliquity ε                      sidereal time + latitude
//!  Ecliptic  <-------------->  Equatorial  <------------------------------>  Horizontal
//!  (λ, β)                      (α, δ)                                         (A, a)
//!                                  |
//!                                  | IAU 1976 precession
//!                                  v
//!                             Equatorial J2000
//! ```
//!
//! ## Conventions
//!
//! - Right ascension and ecliptic longitude in [0, 360), declination and latitudes in
//!   [−90, 90], all in degrees.
//! - Azimuth measured from north through east (0 = N, 90 = E), in [0, 360).
//! - Observer longitude is east-positive.
//!
//! The zenith and the celestial poles are coordinate singularities of the horizontal and
//! equatorial frames. The transforms use `atan2` forms that stay finite there, and clamp the
//! arguments of `asin`; the azimuth or right ascension returned exactly at a pole is
//! arbitrary but finite.

use serde::{Deserialize, Serialize};

use crate::angles::{clamp_unit, wrap_180, wrap_360};
use crate::astro_errors::AstroError;
use crate::constants::{Degree, JulianCenturies};
use crate::earth_orientation::precession_from_j2000;
use crate::rotation::{to_spherical, unit_vector_deg, Axis, Rotation};

/// Reference frame of an equatorial direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquatorialFrame {
    /// Mean equator and equinox of the date of the query
    MeanOfDate,
    /// Mean equator and equinox of J2000.0
    J2000,
}

/// Right ascension / declination in degrees, tagged with its frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EquatorialDirection {
    /// Right ascension, [0, 360)
    pub ra: Degree,
    /// Declination, [−90, 90]
    pub dec: Degree,
    pub frame: EquatorialFrame,
}

impl EquatorialDirection {
    /// Build a direction, wrapping the right ascension into [0, 360).
    pub fn new(ra: Degree, dec: Degree, frame: EquatorialFrame) -> Self {
        EquatorialDirection {
            ra: wrap_360(ra),
            dec,
            frame,
        }
    }

    pub fn unit_vector(&self) -> nalgebra::Vector3<f64> {
        unit_vector_deg(self.ra, self.dec)
    }

    /// Express this direction in another frame.
    ///
    /// `t` is the query time in Julian centuries TT; it defines "of date". Converting to the
    /// frame the direction is already in returns it unchanged.
    pub fn to_frame(&self, target: EquatorialFrame, t: JulianCenturies) -> Self {
        let rotation = match (self.frame, target) {
            (a, b) if a == b => return *self,
            (EquatorialFrame::J2000, EquatorialFrame::MeanOfDate) => precession_from_j2000(t),
            _ => precession_from_j2000(t).inverse(),
        };
        let (ra, dec, _) = to_spherical(&rotation.apply(&self.unit_vector()));
        EquatorialDirection::new(ra.to_degrees(), dec.to_degrees(), target)
    }
}

/// Azimuth (from north through east) and altitude in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HorizontalDirection {
    /// Azimuth, [0, 360)
    pub azimuth: Degree,
    /// Altitude, [−90, 90]
    pub altitude: Degree,
}

/// Ecliptic longitude and latitude of date, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EclipticDirection {
    /// Longitude, [0, 360)
    pub longitude: Degree,
    /// Latitude, [−90, 90]
    pub latitude: Degree,
}

/// Geographic position of the observer.
///
/// Only the ephemeris provider and the horizontal transforms look at it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserverLocation {
    /// Geodetic latitude in degrees, north positive
    pub latitude: Degree,
    /// Longitude in degrees, east positive
    pub longitude: Degree,
    /// Height above the ellipsoid in meters
    pub elevation_m: Option<f64>,
}

impl ObserverLocation {
    /// Build an observer without validation.
    pub fn new(latitude: Degree, longitude: Degree) -> Self {
        ObserverLocation {
            latitude,
            longitude,
            elevation_m: None,
        }
    }

    pub fn with_elevation(mut self, elevation_m: f64) -> Self {
        self.elevation_m = Some(elevation_m);
        self
    }

    /// Build an observer, rejecting values that the UI should never pass in.
    ///
    /// The latitude must lie in [−90, 90] and the longitude must be finite; the longitude is
    /// wrapped into (−180, 180].
    pub fn checked(latitude: Degree, longitude: Degree) -> Result<Self, AstroError> {
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(AstroError::InvalidObserver(format!(
                "latitude {latitude} is outside [-90, 90]"
            )));
        }
        if !longitude.is_finite() {
            return Err(AstroError::InvalidObserver(format!(
                "longitude {longitude} is not finite"
            )));
        }
        Ok(Self::new(latitude, wrap_180(longitude)))
    }
}

/// Equatorial (α, δ) → ecliptic (λ, β) for an obliquity ε, all in degrees.
///
/// The ecliptic frame is obtained by rotating the equatorial frame by ε about the shared
/// X axis (the equinox direction).
pub fn equatorial_to_ecliptic(ra: Degree, dec: Degree, obliquity: Degree) -> EclipticDirection {
    let to_ecliptic = Rotation::about_axis(Axis::X, -obliquity.to_radians());
    let (lon, lat, _) = to_spherical(&to_ecliptic.apply(&unit_vector_deg(ra, dec)));
    EclipticDirection {
        longitude: wrap_360(lon.to_degrees()),
        latitude: lat.to_degrees(),
    }
}

/// Ecliptic (λ, β) → equatorial (α, δ) of the same date.
pub fn ecliptic_to_equatorial(
    longitude: Degree,
    latitude: Degree,
    obliquity: Degree,
) -> EquatorialDirection {
    let to_equatorial = Rotation::about_axis(Axis::X, obliquity.to_radians());
    let (ra, dec, _) = to_spherical(&to_equatorial.apply(&unit_vector_deg(longitude, latitude)));
    EquatorialDirection::new(
        ra.to_degrees(),
        dec.to_degrees(),
        EquatorialFrame::MeanOfDate,
    )
}

/// Equatorial (α, δ) → horizontal (A, a) through the local hour angle `H = LST − α`.
///
/// ```text
/// sin a = sin φ sin δ + cos φ cos δ cos H
/// A     = atan2(−cos δ sin H, sin δ cos φ − cos δ sin φ cos H)
/// ```
///
/// Arguments
/// ---------
/// * `ra`, `dec`: direction in the equator of date, degrees.
/// * `observer`: only the latitude is used.
/// * `local_sidereal_time`: degrees, see [`local_sidereal_time`](crate::time::local_sidereal_time).
pub fn equatorial_to_horizontal(
    ra: Degree,
    dec: Degree,
    observer: &ObserverLocation,
    local_sidereal_time: Degree,
) -> HorizontalDirection {
    let (azimuth, altitude) = swap_spherical_frame(
        (local_sidereal_time - ra).to_radians(),
        dec.to_radians(),
        observer.latitude.to_radians(),
    );
    HorizontalDirection {
        azimuth: wrap_360(azimuth),
        altitude,
    }
}

/// Horizontal (A, a) → equatorial (α, δ) of date, inverse of [`equatorial_to_horizontal`].
pub fn horizontal_to_equatorial(
    azimuth: Degree,
    altitude: Degree,
    observer: &ObserverLocation,
    local_sidereal_time: Degree,
) -> EquatorialDirection {
    let (hour_angle, dec) = swap_spherical_frame(
        azimuth.to_radians(),
        altitude.to_radians(),
        observer.latitude.to_radians(),
    );
    EquatorialDirection::new(
        local_sidereal_time - hour_angle,
        dec,
        EquatorialFrame::MeanOfDate,
    )
}

/// The pole–zenith–object triangle is symmetric: the same expression maps (H, δ) to (A, a)
/// and (A, a) back to (H, δ). Inputs in radians, outputs in degrees.
fn swap_spherical_frame(angle: f64, elevation: f64, latitude: f64) -> (Degree, Degree) {
    let (sin_angle, cos_angle) = angle.sin_cos();
    let (sin_el, cos_el) = elevation.sin_cos();
    let (sin_lat, cos_lat) = latitude.sin_cos();

    let sin_out = clamp_unit(sin_lat * sin_el + cos_lat * cos_el * cos_angle);
    let out_angle = (-cos_el * sin_angle).atan2(sin_el * cos_lat - cos_el * sin_lat * cos_angle);

    (out_angle.to_degrees(), sin_out.asin().to_degrees())
}

#[cfg(test)]
mod coordinates_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_equatorial_to_ecliptic_pollux() {
        // Meeus example 13.a: Pollux α = 116.328942°, δ = 28.026183°, ε = 23.4392911°
        // → λ = 113.215630°, β = 6.684170°
        let ecl = equatorial_to_ecliptic(116.328942, 28.026183, 23.4392911);
        assert_abs_diff_eq!(ecl.longitude, 113.215630, epsilon = 1e-5);
        assert_abs_diff_eq!(ecl.latitude, 6.684170, epsilon = 1e-5);

        let eq = ecliptic_to_equatorial(ecl.longitude, ecl.latitude, 23.4392911);
        assert_abs_diff_eq!(eq.ra, 116.328942, epsilon = 1e-9);
        assert_abs_diff_eq!(eq.dec, 28.026183, epsilon = 1e-9);
    }

    #[test]
    fn test_ecliptic_pole() {
        let ecl = equatorial_to_ecliptic(270.0, 90.0 - 23.4392911, 23.4392911);
        assert_abs_diff_eq!(ecl.latitude, 90.0, epsilon = 1e-6);
    }

    #[test]
    fn test_equatorial_to_horizontal_cardinal_points() {
        let obs = ObserverLocation::new(0.0, 0.0);

        // on the meridian, on the celestial equator, seen from the equator: zenith
        let h = equatorial_to_horizontal(50.0, 0.0, &obs, 50.0);
        assert_abs_diff_eq!(h.altitude, 90.0, epsilon = 1e-9);

        // six hours before transit: rising due east
        let h = equatorial_to_horizontal(140.0, 0.0, &obs, 50.0);
        assert_abs_diff_eq!(h.azimuth, 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(h.altitude, 0.0, epsilon = 1e-9);

        // the celestial pole sits due north at an altitude equal to the latitude
        let obs = ObserverLocation::new(45.0, 10.0);
        let h = equatorial_to_horizontal(12.0, 90.0, &obs, 200.0);
        assert_abs_diff_eq!(h.altitude, 45.0, epsilon = 1e-9);
        assert_abs_diff_eq!(wrap_180(h.azimuth), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_horizontal_round_trip() {
        let mut rng = StdRng::seed_from_u64(42_u64);
        for _ in 0..2000 {
            let obs = ObserverLocation::new(rng.random_range(-89.0..89.0), 0.0);
            let lst = rng.random_range(0.0..360.0);
            let az = rng.random_range(0.0..360.0);
            let alt = rng.random_range(-89.0..89.0);

            let eq = horizontal_to_equatorial(az, alt, &obs, lst);
            let h = equatorial_to_horizontal(eq.ra, eq.dec, &obs, lst);

            assert_abs_diff_eq!(wrap_180(h.azimuth - az), 0.0, epsilon = 1e-6);
            assert_abs_diff_eq!(h.altitude, alt, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_to_frame_round_trip() {
        let j2000 = EquatorialDirection::new(201.3, -11.2, EquatorialFrame::J2000);
        let of_date = j2000.to_frame(EquatorialFrame::MeanOfDate, 0.2);
        assert_eq!(of_date.frame, EquatorialFrame::MeanOfDate);
        assert!((of_date.ra - j2000.ra).abs() > 0.1);

        let back = of_date.to_frame(EquatorialFrame::J2000, 0.2);
        assert_abs_diff_eq!(back.ra, j2000.ra, epsilon = 1e-9);
        assert_abs_diff_eq!(back.dec, j2000.dec, epsilon = 1e-9);
        assert_eq!(j2000.to_frame(EquatorialFrame::J2000, 0.2), j2000);
    }

    #[test]
    fn test_checked_observer() {
        assert!(ObserverLocation::checked(91.0, 0.0).is_err());
        assert!(ObserverLocation::checked(f64::NAN, 0.0).is_err());
        assert!(ObserverLocation::checked(10.0, f64::INFINITY).is_err());
        let obs = ObserverLocation::checked(10.0, 350.0).unwrap();
        assert_abs_diff_eq!(obs.longitude, -10.0, epsilon = 1e-12);
    }
}
