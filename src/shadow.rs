//! # Earth-shadow geometry
//!
//! Size of the Earth's umbra and penumbra at the Moon's distance and where the Moon sits
//! relative to the shadow axis, for drawing lunar eclipses.
//!
//! ## Model
//!
//! ```text
//!   Sun ●━━━━━━━━━━━━━━━━━ Earth ●━━━━━━━━━━━ axis u = −S/|S| ━━━━━━▶
//!                                          ╲
//!                                           ● Moon: M = along·u + perp
//! ```
//!
//! With `d = |S|` and `x = M·u` the distance of the Moon along the axis, similar triangles give
//!
//! ```text
//! umbra     = max(R⊕ − x (R☉ − R⊕) / d, 0)
//! penumbra  =     R⊕ + x (R☉ + R⊕) / d
//! ```
//!
//! both optionally scaled by an atmospheric enlargement factor.
//!
//! The Moon's offset from the axis is reported as a distance and as the position angle, seen
//! at the Moon, of the direction toward the shadow center: first from celestial north, then
//! from lunar north.

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::angles::wrap_180;
use crate::astro_errors::AstroError;
use crate::body::Body;
use crate::constants::{
    Degree, Instant, Kilometer, EARTH_RADIUS_KM, MIN_DISTANCE_KM, MOON_RADIUS_KM, SUN_RADIUS_KM,
};
use crate::coordinates::EquatorialFrame;
use crate::ephemeris::EphemerisProvider;
use crate::libration::optical_libration;
use crate::pole::pole_position_angle;
use crate::rotation::position_angle_of;

/// Where the direction of lunar north comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LunarNorthSource {
    /// Axis position angle of the optical libration
    #[default]
    Libration,
    /// Position angle of the WGCCRE lunar pole
    PoleModel,
}

/// Tunables of the shadow computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowParams {
    atmospheric_enlargement: f64,
    min_distance_km: Kilometer,
    lunar_north: LunarNorthSource,
}

impl ShadowParams {
    pub fn builder() -> ShadowParamsBuilder {
        ShadowParamsBuilder::new()
    }

    /// Factor applied to both shadow radii to account for the atmosphere, ≥ 1
    pub fn atmospheric_enlargement(&self) -> f64 {
        self.atmospheric_enlargement
    }

    /// Floor on the Sun distance before it is used as a divisor, in kilometers
    pub fn min_distance_km(&self) -> Kilometer {
        self.min_distance_km
    }

    pub fn lunar_north(&self) -> LunarNorthSource {
        self.lunar_north
    }

    /// Distance floor actually applied: a non-positive or NaN value (e.g. from a deserialized
    /// config) falls back to [`MIN_DISTANCE_KM`].
    fn distance_floor(&self) -> Kilometer {
        if self.min_distance_km > 0.0 {
            self.min_distance_km
        } else {
            MIN_DISTANCE_KM
        }
    }
}

impl Default for ShadowParams {
    fn default() -> Self {
        ShadowParams {
            atmospheric_enlargement: 1.0,
            min_distance_km: MIN_DISTANCE_KM,
            lunar_north: LunarNorthSource::Libration,
        }
    }
}

/// Builder for [`ShadowParams`], with validation.
#[derive(Debug, Clone, Default)]
pub struct ShadowParamsBuilder {
    params: ShadowParams,
}

impl ShadowParamsBuilder {
    pub fn new() -> Self {
        Self {
            params: ShadowParams::default(),
        }
    }

    pub fn atmospheric_enlargement(mut self, v: f64) -> Self {
        self.params.atmospheric_enlargement = v;
        self
    }
    pub fn min_distance_km(mut self, v: Kilometer) -> Self {
        self.params.min_distance_km = v;
        self
    }
    pub fn lunar_north(mut self, v: LunarNorthSource) -> Self {
        self.params.lunar_north = v;
        self
    }

    /// Validate and return the parameters.
    ///
    /// Errors
    /// ----------
    /// * [`AstroError::InvalidParameter`] if the enlargement is below 1 or the minimum
    ///   distance is not strictly positive (NaN fails both checks).
    pub fn build(self) -> Result<ShadowParams, AstroError> {
        let p = &self.params;

        if !(p.atmospheric_enlargement >= 1.0) {
            return Err(AstroError::InvalidParameter(
                "atmospheric_enlargement must be >= 1".into(),
            ));
        }
        if !(p.min_distance_km > 0.0) {
            return Err(AstroError::InvalidParameter(
                "min_distance_km must be > 0".into(),
            ));
        }

        Ok(self.params)
    }
}

/// Classification of a lunar eclipse at one instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LunarEclipseKind {
    None,
    Penumbral,
    Partial,
    Total,
}

/// Earth-shadow cross-section at the Moon's distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadowGeometry {
    /// Umbra radius, ≥ 0
    pub umbra_radius_km: Kilometer,
    /// Penumbra radius, ≥ the umbra radius
    pub penumbra_radius_km: Kilometer,
    /// Distance of the Moon center from the shadow axis, ≥ 0
    pub offset_km: Kilometer,
    /// Position angle of the shadow center seen from the Moon, from celestial north, (−180, 180]
    pub axis_pa_celestial_north: Degree,
    /// Same angle measured from lunar north, (−180, 180]
    pub axis_pa_lunar_north: Degree,
}

impl ShadowGeometry {
    /// Fraction of the lunar diameter inside the umbra, negative outside.
    pub fn umbral_magnitude(&self) -> f64 {
        (self.umbra_radius_km - self.offset_km + MOON_RADIUS_KM) / (2.0 * MOON_RADIUS_KM)
    }

    /// Fraction of the lunar diameter inside the penumbra, negative outside.
    pub fn penumbral_magnitude(&self) -> f64 {
        (self.penumbra_radius_km - self.offset_km + MOON_RADIUS_KM) / (2.0 * MOON_RADIUS_KM)
    }

    pub fn eclipse_kind(&self) -> LunarEclipseKind {
        if self.umbral_magnitude() >= 1.0 {
            LunarEclipseKind::Total
        } else if self.umbral_magnitude() > 0.0 {
            LunarEclipseKind::Partial
        } else if self.penumbral_magnitude() > 0.0 {
            LunarEclipseKind::Penumbral
        } else {
            LunarEclipseKind::None
        }
    }
}

/// Shadow geometry from geocentric Sun and Moon vectors.
///
/// Arguments
/// -----------------
/// * `sun_km`, `moon_km`: geocentric positions in kilometers, same frame and instant.
/// * `lunar_north_pa`: position angle of the lunar axis from celestial north.
/// * `params`: enlargement and distance floor.
///
/// The frame of the vectors must be equatorial for the position angles to refer to
/// celestial north.
pub fn shadow_geometry(
    sun_km: &Vector3<f64>,
    moon_km: &Vector3<f64>,
    lunar_north_pa: Degree,
    params: &ShadowParams,
) -> ShadowGeometry {
    let sun_distance = sun_km.norm();
    let d = sun_distance.max(params.distance_floor());
    if d != sun_distance {
        log::debug!("Sun distance {sun_distance} km clamped to {d} km");
    }
    let axis = -sun_km / d;

    let projection = moon_km.dot(&axis);
    let along = projection.max(0.0);
    if projection < 0.0 {
        log::debug!("Moon on the sunward side of the Earth ({projection:.0} km along the axis)");
    }

    let perp = moon_km - axis * along;
    let offset = perp.norm();
    if offset == 0.0 {
        log::debug!("Moon centered on the shadow axis, offset angle undefined");
    }

    let enlargement = params.atmospheric_enlargement;
    let umbra =
        (enlargement * (EARTH_RADIUS_KM - along * (SUN_RADIUS_KM - EARTH_RADIUS_KM) / d)).max(0.0);
    let penumbra = enlargement * (EARTH_RADIUS_KM + along * (SUN_RADIUS_KM + EARTH_RADIUS_KM) / d);

    let celestial = position_angle_of(&(-perp), moon_km);

    ShadowGeometry {
        umbra_radius_km: umbra,
        penumbra_radius_km: penumbra,
        offset_km: offset,
        axis_pa_celestial_north: celestial,
        axis_pa_lunar_north: wrap_180(celestial - lunar_north_pa),
    }
}

/// Earth shadow at the Moon for `instant`, with geocentric positions from `provider`.
///
/// The lunar axis position angle comes from the optical libration (geocentric apparent
/// ecliptic position of the Moon, no nutation) or from the WGCCRE pole, per
/// `params.lunar_north`.
pub fn earth_shadow_at_moon<E: EphemerisProvider + ?Sized>(
    provider: &E,
    instant: &Instant,
    params: &ShadowParams,
) -> Result<ShadowGeometry, AstroError> {
    let sun = provider.geocentric_vector_km(Body::Sun, instant)?;
    let moon = provider.geocentric_vector_km(Body::Moon, instant)?;

    let lunar_north_pa = match params.lunar_north {
        LunarNorthSource::Libration => {
            let ecliptic = provider.apparent_ecliptic(Body::Moon, instant, None)?;
            optical_libration(instant, &ecliptic, None).position_angle
        }
        LunarNorthSource::PoleModel => {
            let apparent =
                provider.apparent_equatorial(Body::Moon, instant, None, EquatorialFrame::J2000)?;
            pole_position_angle(Body::Moon, instant, &apparent)
        }
    };

    Ok(shadow_geometry(&sun, &moon, lunar_north_pa, params))
}
