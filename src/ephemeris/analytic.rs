//! Low-precision built-in Sun and Moon.
//!
//! - **Sun**: geometric mean longitude plus equation of the center (Meeus ch. 25), corrected
//!   for nutation and aberration. About 0.01°.
//! - **Moon**: the largest terms of the ELP-2000/82 series as tabulated by Meeus (ch. 47),
//!   with the eccentricity factor `E` and the additive Venus/Jupiter/flattening terms.
//!   About 0.01° in longitude and a few tens of kilometers in distance.
//!
//! Positions are geocentric and apparent in the mean equator of date. With an observer, the
//! observer's geocentric position is subtracted to give topocentric values, which matters
//! for the Moon (up to about 1° of parallax).

use nalgebra::Vector3;

use crate::angles::wrap_360;
use crate::astro_errors::AstroError;
use crate::body::Body;
use crate::constants::{
    Degree, Instant, JulianCenturies, Kilometer, AU, EARTH_POLAR_RADIUS_KM, EARTH_RADIUS_KM, RADEG,
};
use crate::coordinates::{
    ecliptic_to_equatorial, equatorial_to_ecliptic, EclipticDirection, EquatorialDirection,
    EquatorialFrame, ObserverLocation,
};
use crate::earth_orientation::{mean_obliquity_deg, Nutation};
use crate::ephemeris::EphemerisProvider;
use crate::libration::LunarArguments;
use crate::rotation::to_spherical;
use crate::time::{local_sidereal_time, to_julian_centuries_tt};

/// Geocentric apparent ecliptic position of date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EclipticPosition {
    pub direction: EclipticDirection,
    pub distance_km: Kilometer,
}

/// Built-in analytic ephemeris covering the Sun and the Moon.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnalyticEphemeris;

/// Apparent geocentric position of the Sun at `t` Julian centuries TT.
pub fn sun_position(t: JulianCenturies) -> EclipticPosition {
    let l0 = wrap_360(280.46646 + 36_000.76983 * t + 0.0003032 * t * t);
    let m = wrap_360(357.52911 + 35_999.05029 * t - 0.0001537 * t * t) * RADEG;

    // Equation of center
    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let e = 0.016_708_634 - 0.000_042_037 * t - 0.000_000_126_7 * t * t;
    let v = m + c * RADEG;
    let r_au = 1.000_001_018 * (1.0 - e * e) / (1.0 + e * v.cos());

    // nutation and aberration
    let omega = (125.04 - 1934.136 * t) * RADEG;
    let longitude = wrap_360(l0 + c - 0.00569 - 0.00478 * omega.sin());

    EclipticPosition {
        direction: EclipticDirection {
            longitude,
            latitude: 0.0,
        },
        distance_km: r_au * AU,
    }
}

/// One periodic term: coefficient and the multiples of (D, M, M′, F).
type LunarTerm = (f64, [i8; 4]);

/// Longitude terms, unit 1e-6 degree.
const MOON_LONGITUDE: [LunarTerm; 24] = [
    (6_288_774.0, [0, 0, 1, 0]),
    (1_274_027.0, [2, 0, -1, 0]),
    (658_314.0, [2, 0, 0, 0]),
    (213_618.0, [0, 0, 2, 0]),
    (-185_116.0, [0, 1, 0, 0]),
    (-114_332.0, [0, 0, 0, 2]),
    (58_793.0, [2, 0, -2, 0]),
    (57_066.0, [2, -1, -1, 0]),
    (53_322.0, [2, 0, 1, 0]),
    (45_758.0, [2, -1, 0, 0]),
    (-40_923.0, [0, 1, -1, 0]),
    (-34_720.0, [1, 0, 0, 0]),
    (-30_383.0, [0, 1, 1, 0]),
    (15_327.0, [2, 0, 0, -2]),
    (-12_528.0, [0, 0, 1, 2]),
    (10_980.0, [0, 0, 1, -2]),
    (10_675.0, [4, 0, -1, 0]),
    (10_034.0, [0, 0, 3, 0]),
    (8_548.0, [4, 0, -2, 0]),
    (-7_888.0, [2, 1, -1, 0]),
    (-6_766.0, [2, 1, 0, 0]),
    (-5_163.0, [1, 0, -1, 0]),
    (4_987.0, [1, 1, 0, 0]),
    (4_036.0, [2, -1, 1, 0]),
];

/// Latitude terms, unit 1e-6 degree.
const MOON_LATITUDE: [LunarTerm; 10] = [
    (5_128_122.0, [0, 0, 0, 1]),
    (280_602.0, [0, 0, 1, 1]),
    (277_693.0, [0, 0, 1, -1]),
    (173_237.0, [2, 0, 0, -1]),
    (55_413.0, [2, 0, -1, 1]),
    (46_271.0, [2, 0, -1, -1]),
    (32_573.0, [2, 0, 0, 1]),
    (17_198.0, [0, 0, 2, 1]),
    (9_266.0, [2, 0, 1, -1]),
    (8_822.0, [0, 0, 2, -1]),
];

/// Distance terms, unit 1e-3 km.
const MOON_DISTANCE: [LunarTerm; 12] = [
    (-20_905_355.0, [0, 0, 1, 0]),
    (-3_699_111.0, [2, 0, -1, 0]),
    (-2_955_968.0, [2, 0, 0, 0]),
    (-569_925.0, [0, 0, 2, 0]),
    (48_888.0, [0, 1, 0, 0]),
    (-3_149.0, [0, 0, 0, 2]),
    (246_158.0, [2, 0, -2, 0]),
    (-152_138.0, [2, -1, -1, 0]),
    (-170_733.0, [2, 0, 1, 0]),
    (-204_586.0, [2, -1, 0, 0]),
    (-129_620.0, [0, 1, -1, 0]),
    (108_743.0, [1, 0, 0, 0]),
];

/// Apparent geocentric position of the Moon at `t` Julian centuries TT.
pub fn moon_position(t: JulianCenturies) -> EclipticPosition {
    let args = LunarArguments::at(t);
    let mean_longitude = wrap_360(
        218.3164477 + 481_267.88123421 * t - 0.0015786 * t * t + t * t * t / 538_841.0
            - t * t * t * t / 65_194_000.0,
    );

    let d = args.elongation * RADEG;
    let m = args.sun_mean_anomaly * RADEG;
    let mp = args.moon_mean_anomaly * RADEG;
    let f = args.argument_of_latitude * RADEG;
    let lp = mean_longitude * RADEG;

    // decreasing eccentricity of the Earth orbit
    let ecc = 1.0 - 0.002516 * t - 0.0000074 * t * t;

    let series = |terms: &[LunarTerm], trig: fn(f64) -> f64| -> f64 {
        terms
            .iter()
            .map(|(coef, [kd, km, kmp, kf])| {
                let arg = *kd as f64 * d + *km as f64 * m + *kmp as f64 * mp + *kf as f64 * f;
                coef * ecc.powi(km.unsigned_abs() as i32) * trig(arg)
            })
            .sum()
    };

    let a1 = (119.75 + 131.849 * t) * RADEG;
    let a2 = (53.09 + 479_264.290 * t) * RADEG;
    let a3 = (313.45 + 481_266.484 * t) * RADEG;

    let sum_l = series(&MOON_LONGITUDE, f64::sin)
        + 3958.0 * a1.sin()
        + 1962.0 * (lp - f).sin()
        + 318.0 * a2.sin();
    let sum_b = series(&MOON_LATITUDE, f64::sin) - 2235.0 * lp.sin()
        + 382.0 * a3.sin()
        + 175.0 * (a1 - f).sin()
        + 175.0 * (a1 + f).sin()
        + 127.0 * (lp - mp).sin()
        - 115.0 * (lp + mp).sin();
    let sum_r = series(&MOON_DISTANCE, f64::cos);

    let nutation = Nutation::low_precision(t);
    EclipticPosition {
        direction: EclipticDirection {
            longitude: wrap_360(mean_longitude + sum_l / 1e6 + nutation.longitude),
            latitude: sum_b / 1e6,
        },
        distance_km: 385_000.56 + sum_r / 1e3,
    }
}

/// Geocentric position of an observer in kilometers, equator of date.
///
/// The geodetic latitude is turned into geocentric `ρ cos φ′` and `ρ sin φ′` on the WGS84
/// ellipsoid, and the local sidereal time gives the longitude in the equatorial frame.
pub fn observer_position_km(
    observer: &ObserverLocation,
    local_sidereal_time: Degree,
) -> Vector3<f64> {
    let lat = observer.latitude * RADEG;
    let height_km = observer.elevation_m.unwrap_or(0.0) / 1000.0;
    let axis_ratio = EARTH_POLAR_RADIUS_KM / EARTH_RADIUS_KM;

    let u = (lat.sin() * axis_ratio).atan2(lat.cos());
    let rho_sin_phi = EARTH_RADIUS_KM * axis_ratio * u.sin() + height_km * lat.sin();
    let rho_cos_phi = EARTH_RADIUS_KM * u.cos() + height_km * lat.cos();

    let (sin_lst, cos_lst) = (local_sidereal_time * RADEG).sin_cos();
    Vector3::new(rho_cos_phi * cos_lst, rho_cos_phi * sin_lst, rho_sin_phi)
}

impl AnalyticEphemeris {
    /// Apparent ecliptic position of date, geocentric.
    pub fn ecliptic_position(
        &self,
        body: Body,
        t: JulianCenturies,
    ) -> Result<EclipticPosition, AstroError> {
        match body {
            Body::Sun => Ok(sun_position(t)),
            Body::Moon => Ok(moon_position(t)),
            other => Err(AstroError::UnsupportedBody(other)),
        }
    }

    /// Position in kilometers in the mean equator and equinox of date, seen from the
    /// geocenter or from `observer`.
    ///
    /// The nutation in longitude carried by the ecliptic position is removed and the mean
    /// obliquity is used, so the vector matches the `MeanOfDate` tag.
    fn position_km(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
    ) -> Result<Vector3<f64>, AstroError> {
        let t = to_julian_centuries_tt(instant);
        let ecl = self.ecliptic_position(body, t)?;
        let nutation = Nutation::low_precision(t);
        let eq = ecliptic_to_equatorial(
            ecl.direction.longitude - nutation.longitude,
            ecl.direction.latitude,
            mean_obliquity_deg(t),
        );
        let geocentric = eq.unit_vector() * ecl.distance_km;

        Ok(match observer {
            Some(obs) => {
                geocentric - observer_position_km(obs, local_sidereal_time(instant, obs.longitude))
            }
            None => geocentric,
        })
    }
}

impl EphemerisProvider for AnalyticEphemeris {
    fn apparent_equatorial(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
        frame: EquatorialFrame,
    ) -> Result<EquatorialDirection, AstroError> {
        let (ra, dec, _) = to_spherical(&self.position_km(body, instant, observer)?);
        Ok(
            EquatorialDirection::new(ra.to_degrees(), dec.to_degrees(), EquatorialFrame::MeanOfDate)
                .to_frame(frame, to_julian_centuries_tt(instant)),
        )
    }

    fn distance_km(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
    ) -> Result<Kilometer, AstroError> {
        Ok(self.position_km(body, instant, observer)?.norm())
    }

    fn geocentric_vector_km(
        &self,
        body: Body,
        instant: &Instant,
    ) -> Result<Vector3<f64>, AstroError> {
        self.position_km(body, instant, None)
    }

    /// Illuminated fraction from the Sun–body–Earth phase angle (Meeus ch. 48).
    fn illuminated_fraction(&self, body: Body, instant: &Instant) -> Result<f64, AstroError> {
        if body == Body::Sun {
            return Ok(1.0);
        }
        let target = self.position_km(body, instant, None)?;
        let sun = self.position_km(Body::Sun, instant, None)?;

        let phase_angle = (sun - target).angle(&(-target));
        Ok((1.0 + phase_angle.cos()) / 2.0)
    }

    /// Apparent ecliptic coordinates of date, nutation in longitude included, so that the
    /// geocentric and topocentric answers share one equinox.
    fn apparent_ecliptic(
        &self,
        body: Body,
        instant: &Instant,
        observer: Option<&ObserverLocation>,
    ) -> Result<EclipticDirection, AstroError> {
        let t = to_julian_centuries_tt(instant);
        if observer.is_none() {
            return Ok(self.ecliptic_position(body, t)?.direction);
        }
        let (ra, dec, _) = to_spherical(&self.position_km(body, instant, observer)?);
        let mean = equatorial_to_ecliptic(ra.to_degrees(), dec.to_degrees(), mean_obliquity_deg(t));
        Ok(EclipticDirection {
            longitude: wrap_360(mean.longitude + Nutation::low_precision(t).longitude),
            latitude: mean.latitude,
        })
    }
}

#[cfg(test)]
mod analytic_test {
    use super::*;
    use crate::angles::wrap_180;
    use crate::earth_orientation::true_obliquity_deg;
    use approx::assert_abs_diff_eq;
    use hifitime::Epoch;

    #[test]
    fn test_sun_meeus_25a() {
        // 1992 October 13 0h TD: λ = 199.90895°, R = 0.99766 AU
        let sun = sun_position(-0.072183436);
        assert_abs_diff_eq!(sun.direction.longitude, 199.90895, epsilon = 1e-3);
        assert_abs_diff_eq!(sun.distance_km / AU, 0.99766, epsilon = 1e-5);

        let eq = ecliptic_to_equatorial(
            sun.direction.longitude,
            0.0,
            true_obliquity_deg(-0.072183436, &Nutation::low_precision(-0.072183436)),
        );
        assert_abs_diff_eq!(eq.ra, 198.38083, epsilon = 2e-3);
        assert_abs_diff_eq!(eq.dec, -7.78507, epsilon = 2e-3);
    }

    #[test]
    fn test_moon_meeus_47a() {
        // 1992 April 12 0h TD: λ = 133.167265° (apparent), β = −3.229126°, Δ = 368409.7 km
        let t = (2448724.5 - crate::constants::J2000_JD) / crate::constants::DAYS_PER_JULIAN_CENTURY;
        let moon = moon_position(t);
        assert_abs_diff_eq!(moon.direction.longitude, 133.167265, epsilon = 0.01);
        assert_abs_diff_eq!(moon.direction.latitude, -3.229126, epsilon = 0.01);
        assert_abs_diff_eq!(moon.distance_km, 368_409.7, epsilon = 50.0);
    }

    #[test]
    fn test_equatorial_direction_is_mean_of_date() {
        let eph = AnalyticEphemeris;
        let instant = Epoch::from_gregorian_utc_hms(2024, 3, 25, 7, 0, 0);
        let t = to_julian_centuries_tt(&instant);
        let nutation = Nutation::low_precision(t);

        for body in [Body::Sun, Body::Moon] {
            let ecl = eph.ecliptic_position(body, t).unwrap();
            let eq = eph
                .apparent_equatorial(body, &instant, None, EquatorialFrame::MeanOfDate)
                .unwrap();
            assert_eq!(eq.frame, EquatorialFrame::MeanOfDate);

            // back to the ecliptic with the mean obliquity, then add Δψ again
            let back = equatorial_to_ecliptic(eq.ra, eq.dec, mean_obliquity_deg(t));
            assert_abs_diff_eq!(
                wrap_180(back.longitude + nutation.longitude - ecl.direction.longitude),
                0.0,
                epsilon = 1e-9
            );
            assert_abs_diff_eq!(back.latitude, ecl.direction.latitude, epsilon = 1e-9);

            let v = eph.geocentric_vector_km(body, &instant).unwrap();
            assert_abs_diff_eq!(v.normalize(), eq.unit_vector(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_topocentric_ecliptic_shares_equinox() {
        // for a distant Sun, parallax is ~9″: geocentric and topocentric ecliptic agree
        let eph = AnalyticEphemeris;
        let instant = Epoch::from_gregorian_utc_hms(2024, 3, 25, 7, 0, 0);
        let obs = ObserverLocation::new(45.0, 10.0);
        let geo = eph.apparent_ecliptic(Body::Sun, &instant, None).unwrap();
        let topo = eph.apparent_ecliptic(Body::Sun, &instant, Some(&obs)).unwrap();
        assert_abs_diff_eq!(wrap_180(geo.longitude - topo.longitude), 0.0, epsilon = 0.005);
        assert_abs_diff_eq!(geo.latitude, topo.latitude, epsilon = 0.005);
    }

    #[test]
    fn test_planets_are_unsupported() {
        let instant = Epoch::from_gregorian_utc_hms(2024, 1, 1, 0, 0, 0);
        for body in Body::PLANETS {
            assert_eq!(
                AnalyticEphemeris.distance_km(body, &instant, None),
                Err(AstroError::UnsupportedBody(body))
            );
        }
    }

    #[test]
    fn test_illuminated_fraction() {
        let eph = AnalyticEphemeris;
        // full moon of 2024-01-25 17:54 UTC and new moon of 2024-01-11 11:57 UTC
        let full = Epoch::from_gregorian_utc_hms(2024, 1, 25, 17, 54, 0);
        let new = Epoch::from_gregorian_utc_hms(2024, 1, 11, 11, 57, 0);
        assert!(eph.illuminated_fraction(Body::Moon, &full).unwrap() > 0.99);
        assert!(eph.illuminated_fraction(Body::Moon, &new).unwrap() < 0.01);
        assert_eq!(eph.illuminated_fraction(Body::Sun, &new).unwrap(), 1.0);
    }

    #[test]
    fn test_topocentric_parallax() {
        let eph = AnalyticEphemeris;
        let instant = Epoch::from_gregorian_utc_hms(2024, 6, 1, 0, 0, 0);
        let obs = ObserverLocation::new(45.0, 10.0);

        let geo = eph.distance_km(Body::Moon, &instant, None).unwrap();
        let topo = eph.distance_km(Body::Moon, &instant, Some(&obs)).unwrap();
        assert!((geo - topo).abs() <= EARTH_RADIUS_KM + 1.0);

        let g = eph
            .apparent_equatorial(Body::Moon, &instant, None, EquatorialFrame::MeanOfDate)
            .unwrap();
        let p = eph
            .apparent_equatorial(Body::Moon, &instant, Some(&obs), EquatorialFrame::MeanOfDate)
            .unwrap();
        let shift = g.unit_vector().angle(&p.unit_vector()).to_degrees();
        assert!(shift < 1.1);
    }

    #[test]
    fn test_observer_position_on_ellipsoid() {
        let equator = observer_position_km(&ObserverLocation::new(0.0, 0.0), 0.0);
        assert_abs_diff_eq!(equator.x, EARTH_RADIUS_KM, epsilon = 1e-9);
        let pole = observer_position_km(&ObserverLocation::new(90.0, 0.0), 0.0);
        assert_abs_diff_eq!(pole.z, EARTH_POLAR_RADIUS_KM, epsilon = 1e-9);
        let summit = ObserverLocation::new(0.0, 0.0).with_elevation(3000.0);
        let high = observer_position_km(&summit, 90.0);
        assert_abs_diff_eq!(high.y, EARTH_RADIUS_KM + 3.0, epsilon = 1e-9);
    }
}
