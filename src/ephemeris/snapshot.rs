//! Host-supplied ephemeris values for a single instant.
//!
//! A rendering host usually already runs an ephemeris library of its own. Rather than wrap it
//! in a trait object, it can copy the handful of numbers the orientation code needs into an
//! [`EphemerisSnapshot`] and pass that along.
//!
//! ```rust,no_run
//! use hifitime::Epoch;
//! use sky_orient::body::Body;
//! use sky_orient::coordinates::{EquatorialDirection, EquatorialFrame};
//! use sky_orient::ephemeris::{BodyEphemeris, EphemerisSnapshot};
//!
//! let instant = Epoch::from_gregorian_utc_hms(2024, 3, 25, 7, 0, 0);
//! let moon = BodyEphemeris::new(EquatorialDirection::new(187.4, -1.9, EquatorialFrame::J2000))
//!     .with_distance_km(403_000.0)
//!     .with_illuminated_fraction(0.99);
//! let snapshot = EphemerisSnapshot::new(instant).with_body(Body::Moon, moon);
//! ```

use ahash::RandomState;
use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::astro_errors::AstroError;
use crate::body::Body;
use crate::constants::{Instant, Kilometer, AU};
use crate::coordinates::{
    EquatorialDirection, EquatorialFrame, HorizontalDirection, ObserverLocation,
};
use crate::ephemeris::EphemerisProvider;
use crate::time::{to_julian_centuries_tt, to_julian_day_utc};

/// Everything the host knows about one body at the snapshot instant.
///
/// Only the apparent direction is mandatory. Missing quantities are reported as
/// [`AstroError::MissingQuantity`] when they are asked for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyEphemeris {
    pub apparent: EquatorialDirection,
    pub distance_km: Option<Kilometer>,
    /// Geocentric position, mean equator and equinox of date, in kilometers
    pub geocentric_km: Option<Vector3<f64>>,
    pub illuminated_fraction: Option<f64>,
    pub horizontal: Option<HorizontalDirection>,
}

impl BodyEphemeris {
    pub fn new(apparent: EquatorialDirection) -> Self {
        BodyEphemeris {
            apparent,
            distance_km: None,
            geocentric_km: None,
            illuminated_fraction: None,
            horizontal: None,
        }
    }

    pub fn with_distance_km(mut self, distance: Kilometer) -> Self {
        self.distance_km = Some(distance);
        self
    }

    /// Distance given in astronomical units.
    pub fn with_distance_au(self, distance: f64) -> Self {
        self.with_distance_km(distance * AU)
    }

    pub fn with_geocentric_km(mut self, position: Vector3<f64>) -> Self {
        self.geocentric_km = Some(position);
        self
    }

    pub fn with_illuminated_fraction(mut self, fraction: f64) -> Self {
        self.illuminated_fraction = Some(fraction);
        self
    }

    pub fn with_horizontal(mut self, horizontal: HorizontalDirection) -> Self {
        self.horizontal = Some(horizontal);
        self
    }
}

/// Ephemeris values computed elsewhere for one instant and one observer.
///
/// Queries at any other instant fail with [`AstroError::InstantMismatch`]. The `observer`
/// argument of the provider methods is ignored: the values are whatever the host computed
/// them for.
#[derive(Debug, Clone, PartialEq)]
pub struct EphemerisSnapshot {
    instant: Instant,
    bodies: HashMap<Body, BodyEphemeris, RandomState>,
}

impl EphemerisSnapshot {
    pub fn new(instant: Instant) -> Self {
        EphemerisSnapshot {
            instant,
            bodies: HashMap::default(),
        }
    }

    /// Add or replace the entry of `body`.
    pub fn with_body(mut self, body: Body, data: BodyEphemeris) -> Self {
        self.bodies.insert(body, data);
        self
    }

    pub fn insert(&mut self, body: Body, data: BodyEphemeris) -> Option<BodyEphemeris> {
        self.bodies.insert(body, data)
    }

    pub fn instant(&self) -> &Instant {
        &self.instant
    }

    fn entry(&self, body: Body, instant: &Instant) -> Result<&BodyEphemeris, AstroError> {
        if *instant != self.instant {
            return Err(AstroError::InstantMismatch {
                snapshot: to_julian_day_utc(&self.instant),
                requested: to_julian_day_utc(instant),
            });
        }
        self.bodies
            .get(&body)
            .ok_or(AstroError::UnsupportedBody(body))
    }
}

impl EphemerisProvider for EphemerisSnapshot {
    fn apparent_equatorial(
        &self,
        body: Body,
        instant: &Instant,
        _observer: Option<&ObserverLocation>,
        frame: EquatorialFrame,
    ) -> Result<EquatorialDirection, AstroError> {
        let entry = self.entry(body, instant)?;
        Ok(entry
            .apparent
            .to_frame(frame, to_julian_centuries_tt(instant)))
    }

    fn distance_km(
        &self,
        body: Body,
        instant: &Instant,
        _observer: Option<&ObserverLocation>,
    ) -> Result<Kilometer, AstroError> {
        let entry = self.entry(body, instant)?;
        entry
            .distance_km
            .or_else(|| entry.geocentric_km.map(|v| v.norm()))
            .ok_or(AstroError::MissingQuantity {
                body,
                quantity: "distance",
            })
    }

    fn geocentric_vector_km(
        &self,
        body: Body,
        instant: &Instant,
    ) -> Result<Vector3<f64>, AstroError> {
        let entry = self.entry(body, instant)?;
        if let Some(v) = entry.geocentric_km {
            return Ok(v);
        }
        // fall back on direction × distance
        let distance = entry.distance_km.ok_or(AstroError::MissingQuantity {
            body,
            quantity: "geocentric vector",
        })?;
        let direction = entry
            .apparent
            .to_frame(EquatorialFrame::MeanOfDate, to_julian_centuries_tt(instant));
        Ok(direction.unit_vector() * distance)
    }

    fn illuminated_fraction(&self, body: Body, instant: &Instant) -> Result<f64, AstroError> {
        self.entry(body, instant)?
            .illuminated_fraction
            .ok_or(AstroError::MissingQuantity {
                body,
                quantity: "illuminated fraction",
            })
    }

    fn horizontal(
        &self,
        body: Body,
        instant: &Instant,
        observer: &ObserverLocation,
    ) -> Result<HorizontalDirection, AstroError> {
        let entry = self.entry(body, instant)?;
        if let Some(h) = entry.horizontal {
            return Ok(h);
        }
        let eq = entry
            .apparent
            .to_frame(EquatorialFrame::MeanOfDate, to_julian_centuries_tt(instant));
        let lst = crate::time::local_sidereal_time(instant, observer.longitude);
        Ok(crate::coordinates::equatorial_to_horizontal(
            eq.ra, eq.dec, observer, lst,
        ))
    }
}

#[cfg(test)]
mod snapshot_test {
    use super::*;
    use approx::assert_abs_diff_eq;
    use hifitime::{Epoch, Unit};

    fn instant() -> Instant {
        Epoch::from_gregorian_utc_hms(2024, 3, 25, 7, 0, 0)
    }

    fn snapshot() -> EphemerisSnapshot {
        let moon = BodyEphemeris::new(EquatorialDirection::new(
            187.4,
            -1.9,
            EquatorialFrame::MeanOfDate,
        ))
        .with_distance_au(0.0027)
        .with_illuminated_fraction(0.99);
        EphemerisSnapshot::new(instant()).with_body(Body::Moon, moon)
    }

    #[test]
    fn test_instant_mismatch() {
        let later = instant() + Unit::Second * 1.0;
        let err = snapshot()
            .distance_km(Body::Moon, &later, None)
            .unwrap_err();
        assert!(matches!(err, AstroError::InstantMismatch { .. }));
    }

    #[test]
    fn test_missing_quantities() {
        let snap = snapshot();
        assert_eq!(
            snap.illuminated_fraction(Body::Sun, &instant()),
            Err(AstroError::UnsupportedBody(Body::Sun))
        );

        let bare = EphemerisSnapshot::new(instant()).with_body(
            Body::Mars,
            BodyEphemeris::new(EquatorialDirection::new(10.0, 5.0, EquatorialFrame::J2000)),
        );
        assert_eq!(
            bare.geocentric_vector_km(Body::Mars, &instant()),
            Err(AstroError::MissingQuantity {
                body: Body::Mars,
                quantity: "geocentric vector"
            })
        );
    }

    #[test]
    fn test_vector_from_direction_and_distance() {
        let snap = snapshot();
        let v = snap.geocentric_vector_km(Body::Moon, &instant()).unwrap();
        assert_abs_diff_eq!(v.norm(), 0.0027 * AU, epsilon = 1e-6);
        assert_abs_diff_eq!(
            snap.distance_km(Body::Moon, &instant(), None).unwrap(),
            0.0027 * AU,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_frame_conversion() {
        let snap = snapshot();
        let of_date = snap
            .apparent_equatorial(Body::Moon, &instant(), None, EquatorialFrame::MeanOfDate)
            .unwrap();
        assert_eq!(of_date.ra, 187.4);

        let j2000 = snap
            .apparent_equatorial(Body::Moon, &instant(), None, EquatorialFrame::J2000)
            .unwrap();
        assert_eq!(j2000.frame, EquatorialFrame::J2000);
        // a quarter century of precession moves RA by roughly a third of a degree
        assert!((j2000.ra - 187.4).abs() > 0.2 && (j2000.ra - 187.4).abs() < 0.5);
    }

    #[test]
    fn test_supplied_horizontal_wins() {
        let h = HorizontalDirection {
            azimuth: 250.0,
            altitude: 12.0,
        };
        let snap = EphemerisSnapshot::new(instant()).with_body(
            Body::Sun,
            BodyEphemeris::new(EquatorialDirection::new(4.0, 1.6, EquatorialFrame::MeanOfDate))
                .with_horizontal(h),
        );
        let obs = ObserverLocation::new(48.0, 2.0);
        assert_eq!(snap.horizontal(Body::Sun, &instant(), &obs).unwrap(), h);
    }
}
