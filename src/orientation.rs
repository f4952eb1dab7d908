//! # Orientation aggregator
//!
//! Turns ephemeris positions and pole models into the angles a renderer applies to a body
//! sprite so that its north, and the sky's north, are drawn correctly relative to the local
//! horizon.
//!
//! ## Sign conventions
//!
//! This is the one place where they are fixed:
//!
//! ```text
//! q = atan2(sin A, tan φ · cos a − sin a · cos A)      parallactic angle, (−180, 180]
//! P = position angle of the body's north pole           east of celestial north, (−180, 180]
//!
//! rot_to_horizon_celestial_north = −q
//! rot_to_horizon_body_north      = −q + P
//! ```
//!
//! with `A` the azimuth (from north through east), `a` the altitude and `φ` the observer
//! latitude. With this definition `q` is the negative of the classical (Meeus) parallactic
//! angle, so `−q` is the position angle of the zenith seen at the body.
//!
//! The ecliptic tilt is a separate quantity for drawing the ecliptic line through the Sun: the
//! acute angle between the ecliptic and the horizon at the Sun's position, in [0, 90].

use serde::{Deserialize, Serialize};

use crate::angles::{fold_90, wrap_180};
use crate::astro_errors::AstroError;
use crate::body::Body;
use crate::constants::{Degree, Instant, COS_EPS, RADEG};
use crate::coordinates::{
    EquatorialDirection, EquatorialFrame, HorizontalDirection, ObserverLocation,
};
use crate::earth_orientation::mean_obliquity_deg;
use crate::ephemeris::EphemerisProvider;
use crate::pole::pole_position_angle;
use crate::rotation::position_angle_of;
use crate::time::to_julian_centuries_tt;

/// Orientation of one body as seen by one observer, all in degrees in (−180, 180].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientationAngles {
    pub body: Body,
    /// Parallactic angle q
    pub parallactic_angle: Degree,
    /// Position angle of the body's north pole, P
    pub pole_position_angle: Degree,
    /// Rotation bringing celestial north into the horizon-up frame, −q
    pub rot_to_horizon_celestial_north: Degree,
    /// Rotation bringing the body's north into the horizon-up frame, −q + P
    pub rot_to_horizon_body_north: Degree,
}

/// Parallactic angle from horizontal coordinates, degrees in (−180, 180].
///
/// `tan φ` is computed as `sin φ / max(cos φ, ε)` so that an observer at a geographic pole
/// gets a finite answer.
pub fn parallactic_angle(azimuth: Degree, altitude: Degree, latitude: Degree) -> Degree {
    let (sin_az, cos_az) = (azimuth * RADEG).sin_cos();
    let (sin_alt, cos_alt) = (altitude * RADEG).sin_cos();
    let (sin_lat, cos_lat) = (latitude * RADEG).sin_cos();
    let tan_lat = sin_lat / cos_lat.max(COS_EPS);

    wrap_180(
        sin_az
            .atan2(tan_lat * cos_alt - sin_alt * cos_az)
            .to_degrees(),
    )
}

/// Combine a parallactic angle and a pole position angle into [`OrientationAngles`].
///
/// With `q = 0` the body-north rotation is exactly `P`.
pub fn compose_orientation(
    body: Body,
    parallactic_angle: Degree,
    pole_position_angle: Degree,
) -> OrientationAngles {
    OrientationAngles {
        body,
        parallactic_angle,
        pole_position_angle,
        rot_to_horizon_celestial_north: wrap_180(-parallactic_angle),
        rot_to_horizon_body_north: wrap_180(-parallactic_angle + pole_position_angle),
    }
}

/// Orientation angles of `body` for `observer` at `instant`.
///
/// Arguments
/// -----------------
/// * `provider`: source of the apparent direction and of the horizontal coordinates.
/// * `body`: Sun, Moon or planet.
/// * `instant`: query time.
/// * `observer`: the observer; the topocentric direction is asked for.
///
/// Return
/// ----------
/// * The aggregated angles, or the provider's error.
pub fn orientation_angles<E: EphemerisProvider + ?Sized>(
    provider: &E,
    body: Body,
    instant: &Instant,
    observer: &ObserverLocation,
) -> Result<OrientationAngles, AstroError> {
    let horizontal = provider.horizontal(body, instant, observer)?;
    let apparent =
        provider.apparent_equatorial(body, instant, Some(observer), EquatorialFrame::J2000)?;

    let q = parallactic_angle(horizontal.azimuth, horizontal.altitude, observer.latitude);
    let p = pole_position_angle(body, instant, &apparent);
    log::trace!("{body}: q = {q:.4}°, P = {p:.4}°");

    Ok(compose_orientation(body, q, p))
}

/// Acute angle between the ecliptic and the horizon at the Sun's position, in [0, 90].
///
/// Arguments
/// -----------------
/// * `sun`: apparent direction of the Sun; it is used in the frame it is tagged with.
/// * `horizontal`: the Sun's azimuth and altitude for the same observer.
/// * `latitude`: observer latitude.
/// * `obliquity`: obliquity of the ecliptic for the frame of `sun`.
///
/// The ecliptic tangent at the Sun is `K × S` with `K` the ecliptic north pole and `S` the
/// Sun's unit vector. The horizon runs perpendicular to the zenith, whose position angle at
/// the Sun is `−q`.
pub fn ecliptic_tilt(
    sun: &EquatorialDirection,
    horizontal: &HorizontalDirection,
    latitude: Degree,
    obliquity: Degree,
) -> Degree {
    let (sin_eps, cos_eps) = (obliquity * RADEG).sin_cos();
    let ecliptic_pole = nalgebra::Vector3::new(0.0, -sin_eps, cos_eps);
    let s = sun.unit_vector();

    let tangent_pa = position_angle_of(&ecliptic_pole.cross(&s), &s);
    let zenith_pa = -parallactic_angle(horizontal.azimuth, horizontal.altitude, latitude);

    fold_90(tangent_pa - (zenith_pa + 90.0))
}

/// [`ecliptic_tilt`] for the Sun as given by `provider`, in degrees in [0, 90].
pub fn ecliptic_tilt_vs_horizon<E: EphemerisProvider + ?Sized>(
    provider: &E,
    instant: &Instant,
    observer: &ObserverLocation,
) -> Result<Degree, AstroError> {
    let sun = provider.apparent_equatorial(
        Body::Sun,
        instant,
        Some(observer),
        EquatorialFrame::MeanOfDate,
    )?;
    let horizontal = provider.horizontal(Body::Sun, instant, observer)?;
    let obliquity = mean_obliquity_deg(to_julian_centuries_tt(instant));

    Ok(ecliptic_tilt(&sun, &horizontal, observer.latitude, obliquity))
}
