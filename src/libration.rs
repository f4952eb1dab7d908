//! # Optical libration of the Moon
//!
//! Optical libration is the apparent rocking of the lunar disk caused only by viewing
//! geometry: the Moon's inclined equator and its non-uniform orbital motion expose slightly
//! different faces over a month. This module computes the selenographic longitude and
//! latitude of the sub-Earth point and the position angle of the Moon's rotation axis,
//! following Meeus, *Astronomical Algorithms*, ch. 53 (physical libration omitted).
//!
//! ## Method
//!
//! 1. Mean lunar arguments `D, M, M′, F, Ω` as quartic polynomials in `T` (Meeus ch. 47).
//! 2. `W = λ − Δψ − Ω`. The Moon's direction `(W, β)`, measured from the ascending node, is
//!    rotated by the inclination `I = 1.54242°` of the lunar equator onto that equator:
//!    the longitude of the result is `A`, and `l′ = A − F`, `b′ = −asin(z)`.
//! 3. With `V = Ω + Δψ`:
//!
//! ```text
//! X = sin I · sin V
//! Y = sin I · cos V · cos ε − cos I · sin ε
//! ω = atan2(X, Y)
//! P = asin(√(X² + Y²) · cos(α − ω) / cos b′)
//! ```
//!
//! where `ε` is the true obliquity and `α` the Moon's apparent right ascension.
//!
//! Nutation is an explicit optional input. Without it Δψ = Δε = 0, which shifts the result
//! by a few arc-seconds at most.

use serde::{Deserialize, Serialize};

use crate::angles::{clamp_unit, wrap_180, wrap_360};
use crate::constants::{Degree, Instant, JulianCenturies, COS_EPS, MOON_EQUATOR_INCLINATION_DEG, RADEG};
use crate::coordinates::{ecliptic_to_equatorial, EclipticDirection};
use crate::earth_orientation::{true_obliquity_deg, Nutation};
use crate::rotation::{to_spherical, unit_vector, Axis, Rotation};
use crate::time::to_julian_centuries_tt;

/// Optical libration and axis orientation of the Moon, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LibrationState {
    /// Selenographic latitude of the sub-Earth point (b′)
    pub latitude: Degree,
    /// Selenographic longitude of the sub-Earth point (l′), in (−180, 180]
    pub longitude: Degree,
    /// Position angle of the lunar rotation axis, east from celestial north, in (−180, 180]
    pub position_angle: Degree,
}

/// Mean arguments of the lunar orbit, in degrees in [0, 360).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LunarArguments {
    /// Mean elongation of the Moon, D
    pub elongation: Degree,
    /// Mean anomaly of the Sun, M
    pub sun_mean_anomaly: Degree,
    /// Mean anomaly of the Moon, M′
    pub moon_mean_anomaly: Degree,
    /// Argument of latitude of the Moon, F
    pub argument_of_latitude: Degree,
    /// Longitude of the mean ascending node, Ω
    pub ascending_node: Degree,
}

impl LunarArguments {
    /// Evaluate the arguments at `t` Julian centuries TT since J2000.0.
    pub fn at(t: JulianCenturies) -> Self {
        let t2 = t * t;
        let t3 = t2 * t;
        let t4 = t3 * t;

        LunarArguments {
            elongation: wrap_360(
                297.8501921 + 445267.1114034 * t - 0.0018819 * t2 + t3 / 545868.0
                    - t4 / 113065000.0,
            ),
            sun_mean_anomaly: wrap_360(
                357.5291092 + 35999.0502909 * t - 0.0001536 * t2 + t3 / 24490000.0,
            ),
            moon_mean_anomaly: wrap_360(
                134.9633964 + 477198.8675055 * t + 0.0087414 * t2 + t3 / 69699.0
                    - t4 / 14712000.0,
            ),
            argument_of_latitude: wrap_360(
                93.2720950 + 483202.0175233 * t - 0.0036539 * t2 - t3 / 3526000.0
                    + t4 / 863310000.0,
            ),
            ascending_node: wrap_360(
                125.0445479 - 1934.1362891 * t + 0.0020754 * t2 + t3 / 467441.0
                    - t4 / 60616000.0,
            ),
        }
    }
}

/// Optical libration for the Moon's apparent ecliptic position at `instant`.
///
/// Arguments
/// ---------
/// * `apparent`: apparent geocentric (or topocentric) ecliptic longitude/latitude of date.
/// * `nutation`: Δψ and Δε; `None` means both are zero.
pub fn optical_libration(
    instant: &Instant,
    apparent: &EclipticDirection,
    nutation: Option<Nutation>,
) -> LibrationState {
    optical_libration_at(to_julian_centuries_tt(instant), apparent, nutation)
}

/// [`optical_libration`] with the time given as Julian centuries TT.
pub fn optical_libration_at(
    t: JulianCenturies,
    apparent: &EclipticDirection,
    nutation: Option<Nutation>,
) -> LibrationState {
    let nutation = nutation.unwrap_or_default();
    let args = LunarArguments::at(t);
    let inclination = MOON_EQUATOR_INCLINATION_DEG * RADEG;

    let beta = apparent.latitude * RADEG;
    let w = (apparent.longitude - nutation.longitude - args.ascending_node) * RADEG;

    // step 1: Moon direction onto the lunar equator
    let on_lunar_equator =
        Rotation::about_axis(Axis::X, inclination).apply(&unit_vector(w, beta));
    let (a, _, _) = to_spherical(&on_lunar_equator);
    let latitude = clamp_unit(-on_lunar_equator.z).asin();
    let longitude = wrap_180(a.to_degrees() - args.argument_of_latitude);

    // step 2: axis position angle
    let obliquity = true_obliquity_deg(t, &nutation);
    let v = (args.ascending_node + nutation.longitude) * RADEG;
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_eps, cos_eps) = (obliquity * RADEG).sin_cos();
    let x = sin_i * v.sin();
    let y = sin_i * v.cos() * cos_eps - cos_i * sin_eps;
    let omega = x.atan2(y);

    let ra = ecliptic_to_equatorial(apparent.longitude, apparent.latitude, obliquity).ra * RADEG;
    let sin_p = x.hypot(y) * (ra - omega).cos() / latitude.cos().max(COS_EPS);

    LibrationState {
        latitude: latitude.to_degrees(),
        longitude,
        position_angle: wrap_180(clamp_unit(sin_p).asin().to_degrees()),
    }
}
