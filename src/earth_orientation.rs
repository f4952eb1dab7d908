//! # Earth orientation
//!
//! Obliquity of the ecliptic, a low-precision nutation series, and IAU 1976 precession between
//! the J2000 mean equator and the mean equator of date.
//!
//! All time arguments are Julian centuries of TT since J2000.0 (see
//! [`julian_centuries_tt`](crate::time::julian_centuries_tt)).

use serde::{Deserialize, Serialize};

use crate::constants::{ArcSec, Degree, JulianCenturies, DEG_PER_ARCSEC, RADEG};
use crate::rotation::{Axis, Rotation};

/// Mean obliquity of the ecliptic in degrees (IAU 1980 polynomial).
///
/// The obliquity ε is a cubic polynomial in Julian centuries `T` since J2000, with coefficients
/// in arcseconds, evaluated with **Horner's method**:
///
/// ```text
/// ε = ((ob3 · T + ob2) · T + ob1) · T + ob0
/// ```
///
/// At `T = 0` this gives 84381.448″ = 23.4392911°.
pub fn mean_obliquity_deg(t: JulianCenturies) -> Degree {
    let ob0: ArcSec = (23.0 * 3600.0 + 26.0 * 60.0) + 21.448;
    let ob1: ArcSec = -46.8150;
    let ob2: ArcSec = -0.00059;
    let ob3: ArcSec = 0.001813;

    (((ob3 * t + ob2) * t + ob1) * t + ob0) * DEG_PER_ARCSEC
}

/// Nutation angles, both in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Nutation {
    /// Nutation in longitude Δψ
    pub longitude: Degree,
    /// Nutation in obliquity Δε
    pub obliquity: Degree,
}

impl Nutation {
    /// A nutation carrying only Δψ, with Δε = 0.
    pub fn longitude_only(dpsi: Degree) -> Self {
        Nutation {
            longitude: dpsi,
            obliquity: 0.0,
        }
    }

    /// Four-term nutation series (Meeus ch. 22), good to about 0.5″ in Δψ and 0.1″ in Δε.
    ///
    /// ```text
    /// Δψ = −17.20″ sin Ω − 1.32″ sin 2L − 0.23″ sin 2L′ + 0.21″ sin 2Ω
    /// Δε =   9.20″ cos Ω + 0.57″ cos 2L + 0.10″ cos 2L′ − 0.09″ cos 2Ω
    /// ```
    ///
    /// with Ω the longitude of the Moon's ascending node, and L, L′ the mean longitudes of
    /// the Sun and the Moon.
    pub fn low_precision(t: JulianCenturies) -> Self {
        let omega = (125.04452 - 1934.136261 * t) * RADEG;
        let l_sun = (280.4665 + 36000.7698 * t) * RADEG;
        let l_moon = (218.3165 + 481267.8813 * t) * RADEG;

        let dpsi: ArcSec = -17.20 * omega.sin() - 1.32 * (2.0 * l_sun).sin()
            - 0.23 * (2.0 * l_moon).sin()
            + 0.21 * (2.0 * omega).sin();
        let deps: ArcSec = 9.20 * omega.cos() + 0.57 * (2.0 * l_sun).cos()
            + 0.10 * (2.0 * l_moon).cos()
            - 0.09 * (2.0 * omega).cos();

        Nutation {
            longitude: dpsi * DEG_PER_ARCSEC,
            obliquity: deps * DEG_PER_ARCSEC,
        }
    }
}

/// True obliquity ε + Δε in degrees.
pub fn true_obliquity_deg(t: JulianCenturies, nutation: &Nutation) -> Degree {
    mean_obliquity_deg(t) + nutation.obliquity
}

/// Precession rotation from the J2000 mean equator/equinox to the mean equator/equinox of date
/// (IAU 1976, Lieske).
///
/// The classical chain of frame rotations `R3(−z) · R2(θ) · R3(−ζ)` becomes, for active
/// rotations of vectors, `Rz(ζ)` then `Ry(−θ)` then `Rz(z)`:
///
/// ```text
/// ζ(T) = (0.6406161 + 0.0000839·T + 0.0000050·T²) · T  [deg]
/// θ(T) = (0.5567530 − 0.0001185·T − 0.0000116·T²) · T  [deg]
/// z(T) = (0.6406161 + 0.0003041·T + 0.0000051·T²) · T  [deg]
/// ```
///
/// `x_date = P.apply(x_J2000)`; use [`Rotation::inverse`] for the other direction.
pub fn precession_from_j2000(t: JulianCenturies) -> Rotation {
    // Precession polynomial coefficients (in radians)
    let zed = 0.6406161 * RADEG;
    let zd = 0.6406161 * RADEG;
    let thd = 0.5567530 * RADEG;

    let zedd = 0.0000839 * RADEG;
    let zdd = 0.0003041 * RADEG;
    let thdd = -0.0001185 * RADEG;

    let zeddd = 0.0000050 * RADEG;
    let zddd = 0.0000051 * RADEG;
    let thddd = -0.0000116 * RADEG;

    let zeta = ((zeddd * t + zedd) * t + zed) * t;
    let z = ((zddd * t + zdd) * t + zd) * t;
    let theta = ((thddd * t + thdd) * t + thd) * t;

    Rotation::about_axis(Axis::Z, zeta)
        .compose(&Rotation::about_axis(Axis::Y, -theta))
        .compose(&Rotation::about_axis(Axis::Z, z))
}
