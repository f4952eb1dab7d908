//! # Ephemeris boundary
//!
//! Raw positions are not computed by the orientation code: they come from an ephemeris
//! provider owned by the host application. This module defines that seam.
//!
//! - [`EphemerisProvider`]: the quantities the orientation, libration and shadow code need
//!   for a `(body, instant, observer)` query.
//! - [`EphemerisSnapshot`](snapshot::EphemerisSnapshot): values the host already computed
//!   for one instant, handed over as a table.
//! - [`AnalyticEphemeris`](analytic::AnalyticEphemeris): a low-precision Sun and Moon
//!   (≈0.01° and ≈0.1°), good enough to drive the geometry without a host.
//!
//! Errors
//! ------
//! Providers return [`AstroError::UnsupportedBody`] for bodies they do not cover and
//! [`AstroError::Provider`] for their own failures. Everything downstream of the provider is
//! infallible.

use nalgebra::Vector3;

use crate::astro_errors::AstroError;
use crate::body::Body;
use crate::constants::{Instant, Kilometer};
use crate::coordinates::{
    equatorial_to_ecliptic, equatorial_to_horizontal, EclipticDirection, EquatorialDirection,
    EquatorialFrame, HorizontalDirection, ObserverLocation,
};
use crate::earth_orientation::mean_obliquity_deg;
use crate::time::{local_sidereal_time, to_julian_centuries_tt};

pub mod analytic;
pub mod snapshot;

pub use analytic::AnalyticEphemeris;
pub use snapshot::{BodyEphemeris, EphemerisSnapshot};

/// Source of apparent positions for the Sun, the Moon and the planets.
///
/// `observer = None` asks for geocentric quantities; `Some` asks for topocentric ones when
/// the provider can compute them. The core code never assumes either: it only requires that
/// every quantity used in one computation comes from the same choice.
pub trait EphemerisProvider {
    /// Apparent right ascension and declination of `body`, expressed in `frame`.
    ///
    /// Arguments
    /// -----------------
    /// * `body`: target body.
    /// * `instant`: query time.
    /// * `observer`: topocentric observer, or `None` for the geocenter.
    /// * `frame`: equatorial frame of the returned direction.
    ///
    /// Return
    /// ----------
    /// * The apparent direction tagged with `frame`, or an [`AstroError`].
    fn apparent_equatorial(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
        frame: EquatorialFrame,
    ) -> Result<EquatorialDirection, AstroError>;

    /// Distance from the observer (or the geocenter) to the body center, in kilometers.
    fn distance_km(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
    ) -> Result<Kilometer, AstroError>;

    /// Geocentric position of the body in kilometers, mean equator and equinox of date.
    ///
    /// The Sun and Moon vectors of one instant must be taken from the same provider so that
    /// the shadow geometry compares them in a single frame.
    fn geocentric_vector_km(&self, body: Body, instant: &Instant)
        -> Result<Vector3<f64>, AstroError>;

    /// Illuminated fraction of the visible disk, in [0, 1].
    fn illuminated_fraction(&self, body: Body, instant: &Instant) -> Result<f64, AstroError>;

    /// Azimuth and altitude of the body seen by `observer`.
    ///
    /// The default goes through the mean-of-date apparent direction, the local sidereal time
    /// and [`equatorial_to_horizontal`]; it applies no refraction. Providers holding their own
    /// horizontal coordinates override it.
    fn horizontal(
        &self,
        body: Body,
        instant: &Instant,
        observer: &ObserverLocation,
    ) -> Result<HorizontalDirection, AstroError> {
        let eq = self.apparent_equatorial(
            body,
            instant,
            Some(observer),
            EquatorialFrame::MeanOfDate,
        )?;
        let lst = local_sidereal_time(instant, observer.longitude);
        Ok(equatorial_to_horizontal(eq.ra, eq.dec, observer, lst))
    }

    /// Apparent ecliptic longitude and latitude of date, derived from the mean-of-date
    /// equatorial direction with the mean obliquity.
    fn apparent_ecliptic(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
    ) -> Result<EclipticDirection, AstroError> {
        let eq = self.apparent_equatorial(body, instant, observer, EquatorialFrame::MeanOfDate)?;
        let obliquity = mean_obliquity_deg(to_julian_centuries_tt(instant));
        Ok(equatorial_to_ecliptic(eq.ra, eq.dec, obliquity))
    }
}
