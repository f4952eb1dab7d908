//! # Pole orientation (WGCCRE)
//!
//! Rotation-pole direction and prime-meridian angle of the Sun, the Moon and the seven
//! planets, in the J2000 equatorial frame, following the IAU Working Group on Cartographic
//! Coordinates and Rotational Elements (2009/2015 reports).
//!
//! ## Models
//!
//! - **Moon**: secular terms in `T` plus 13 periodic arguments `Eᵢ = aᵢ + bᵢ·d`, each adding a
//!   tabulated sine term to α₀ and W and a cosine term to δ₀.
//! - **Planets**: linear in `T` (Mercury, Mars, Jupiter, Saturn) or constant (Venus, Uranus,
//!   Neptune) at this precision; the small periodic terms of Jupiter and Neptune are dropped.
//! - **Sun**: constant pole.
//!
//! `d` is days and `T` Julian centuries of TT since J2000.0.
//!
//! The position angle of the pole seen from the observer is what the aggregator needs to
//! turn a body sprite so that its north is drawn correctly.

use serde::{Deserialize, Serialize};

use crate::angles::{wrap_180, wrap_360};
use crate::body::Body;
use crate::constants::{Degree, Instant, JulianDay, DAYS_PER_JULIAN_CENTURY, RADEG};
use crate::coordinates::{EquatorialDirection, EquatorialFrame};
use crate::rotation::{unit_vector_deg, Axis, Rotation};
use crate::time::{days_since_j2000_tt, to_julian_day_utc};

/// Direction of a body's north rotation pole in the J2000 equatorial frame, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoleDirection {
    /// Right ascension of the pole, [0, 360)
    pub ra: Degree,
    /// Declination of the pole
    pub dec: Degree,
}

impl PoleDirection {
    pub fn unit_vector(&self) -> nalgebra::Vector3<f64> {
        unit_vector_deg(self.ra, self.dec)
    }
}

/// Linear-in-time rotational elements: α₀ and δ₀ linear in `T`, W linear in `d`.
struct LinearElements {
    ra: (f64, f64),
    dec: (f64, f64),
    w: (f64, f64),
}

const SUN: LinearElements = LinearElements {
    ra: (286.13, 0.0),
    dec: (63.87, 0.0),
    w: (84.176, 14.1844000),
};

const MERCURY: LinearElements = LinearElements {
    ra: (281.0097, -0.0328),
    dec: (61.4143, -0.0049),
    w: (329.5469, 6.1385025),
};

const VENUS: LinearElements = LinearElements {
    ra: (272.76, 0.0),
    dec: (67.16, 0.0),
    w: (160.20, -1.4813688),
};

const MARS: LinearElements = LinearElements {
    ra: (317.68143, -0.1061),
    dec: (52.88650, -0.0609),
    w: (176.630, 350.89198226),
};

const JUPITER: LinearElements = LinearElements {
    ra: (268.056595, -0.006499),
    dec: (64.495303, 0.002413),
    w: (284.95, 870.5360000),
};

const SATURN: LinearElements = LinearElements {
    ra: (40.589, -0.036),
    dec: (83.537, -0.004),
    w: (38.90, 810.7939024),
};

const URANUS: LinearElements = LinearElements {
    ra: (257.311, 0.0),
    dec: (-15.175, 0.0),
    w: (203.81, -501.1600928),
};

const NEPTUNE: LinearElements = LinearElements {
    ra: (299.36, 0.0),
    dec: (43.46, 0.0),
    w: (249.978, 541.1397757),
};

/// Lunar arguments E1…E13 as (value at J2000, rate per day), degrees.
const MOON_ARGUMENTS: [(f64, f64); 13] = [
    (125.045, -0.0529921),
    (250.089, -0.1059842),
    (260.008, 13.0120009),
    (176.625, 13.3407154),
    (357.529, 0.9856003),
    (311.589, 26.4057084),
    (134.963, 13.0649930),
    (276.617, 0.3287146),
    (34.226, 1.7484877),
    (15.134, -0.1589763),
    (119.743, 0.0036096),
    (239.961, 0.1643573),
    (25.053, 12.9590088),
];

/// sin Eᵢ amplitudes in α₀
const MOON_RA_SIN: [f64; 13] = [
    -3.8787, -0.1204, 0.0700, -0.0172, 0.0, 0.0072, 0.0, 0.0, 0.0, -0.0052, 0.0, 0.0, 0.0043,
];

/// cos Eᵢ amplitudes in δ₀
const MOON_DEC_COS: [f64; 13] = [
    1.5419, 0.0239, -0.0278, 0.0068, 0.0, -0.0029, 0.0009, 0.0, 0.0, 0.0008, 0.0, 0.0, -0.0009,
];

/// sin Eᵢ amplitudes in W
const MOON_W_SIN: [f64; 13] = [
    3.5610, 0.1208, -0.0642, 0.0158, 0.0252, -0.0066, -0.0047, -0.0046, 0.0028, 0.0052, 0.0040,
    0.0019, -0.0044,
];

fn linear_elements(body: Body) -> Option<&'static LinearElements> {
    match body {
        Body::Sun => Some(&SUN),
        Body::Moon => None,
        Body::Mercury => Some(&MERCURY),
        Body::Venus => Some(&VENUS),
        Body::Mars => Some(&MARS),
        Body::Jupiter => Some(&JUPITER),
        Body::Saturn => Some(&SATURN),
        Body::Uranus => Some(&URANUS),
        Body::Neptune => Some(&NEPTUNE),
    }
}

/// Rotational elements (α₀, δ₀, W) in degrees for `d` days TT since J2000.0.
fn rotational_elements(body: Body, d: f64) -> (Degree, Degree, Degree) {
    let t = d / DAYS_PER_JULIAN_CENTURY;

    match linear_elements(body) {
        Some(el) => (
            el.ra.0 + el.ra.1 * t,
            el.dec.0 + el.dec.1 * t,
            el.w.0 + el.w.1 * d,
        ),
        None => {
            let mut ra = 269.9949 + 0.0031 * t;
            let mut dec = 66.5392 + 0.0130 * t;
            let mut w = 38.3213 + 13.17635815 * d - 1.4e-12 * d * d;

            for (i, (e0, rate)) in MOON_ARGUMENTS.iter().enumerate() {
                let (sin_e, cos_e) = ((e0 + rate * d) * RADEG).sin_cos();
                ra += MOON_RA_SIN[i] * sin_e;
                dec += MOON_DEC_COS[i] * cos_e;
                w += MOON_W_SIN[i] * sin_e;
            }
            (ra, dec, w)
        }
    }
}

/// Pole direction for a UTC Julian Day. NaN input gives a NaN pole.
pub fn pole_position_jd(body: Body, jd_utc: JulianDay) -> PoleDirection {
    let (ra, dec, _) = rotational_elements(body, days_since_j2000_tt(jd_utc));
    PoleDirection {
        ra: wrap_360(ra),
        dec,
    }
}

/// J2000 direction of the north rotation pole of `body` at `instant`.
pub fn pole_position(body: Body, instant: &Instant) -> PoleDirection {
    pole_position_jd(body, to_julian_day_utc(instant))
}

/// Prime-meridian angle W in degrees, [0, 360).
///
/// W is measured along the body's equator from its ascending node on the J2000 equator to
/// the prime meridian.
pub fn prime_meridian_deg(body: Body, instant: &Instant) -> Degree {
    let (_, _, w) = rotational_elements(body, days_since_j2000_tt(to_julian_day_utc(instant)));
    wrap_360(w)
}

/// Rotation carrying J2000 equatorial vectors into the body-fixed frame (Z toward the north
/// pole, X toward the prime meridian).
///
/// As a change of basis this is `R3(W) · R1(90° − δ₀) · R3(90° + α₀)`.
pub fn body_fixed_frame(body: Body, instant: &Instant) -> Rotation {
    let (ra, dec, w) = rotational_elements(body, days_since_j2000_tt(to_julian_day_utc(instant)));
    Rotation::about_axis(Axis::Z, -(90.0 + ra) * RADEG)
        .compose(&Rotation::about_axis(Axis::X, -(90.0 - dec) * RADEG))
        .compose(&Rotation::about_axis(Axis::Z, -w * RADEG))
}

/// Position angle of a pole seen at a target direction (both J2000), degrees east of
/// celestial north, in (−180, 180].
///
/// ```text
/// P = atan2(cos δp · sin(αp − α), sin δp · cos δ − cos δp · sin δ · cos(αp − α))
/// ```
pub fn position_angle_of_pole(pole: &PoleDirection, ra: Degree, dec: Degree) -> Degree {
    let dra = (pole.ra - ra) * RADEG;
    let (sin_dp, cos_dp) = (pole.dec * RADEG).sin_cos();
    let (sin_d, cos_d) = (dec * RADEG).sin_cos();

    let y = cos_dp * dra.sin();
    let x = sin_dp * cos_d - cos_dp * sin_d * dra.cos();
    wrap_180(y.atan2(x).to_degrees())
}

/// Position angle of the rotation axis of `body`, east from celestial north, in (−180, 180].
///
/// `apparent` is the body's apparent direction. The pole model lives in J2000, so a
/// mean-of-date direction is precessed back first. Geocentric and topocentric inputs both work
/// as long as they match the observer the result is drawn for.
pub fn pole_position_angle(body: Body, instant: &Instant, apparent: &EquatorialDirection) -> Degree {
    let jd_utc = to_julian_day_utc(instant);
    let d = days_since_j2000_tt(jd_utc);
    let target = apparent.to_frame(EquatorialFrame::J2000, d / DAYS_PER_JULIAN_CENTURY);
    position_angle_of_pole(&pole_position_jd(body, jd_utc), target.ra, target.dec)
}
