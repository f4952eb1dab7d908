mod common;

use approx::assert_abs_diff_eq;
use common::{full_snapshot, paris, utc};
use hifitime::Unit;
use sky_orient::angles::wrap_180;
use sky_orient::astro_errors::AstroError;
use sky_orient::body::Body;
use sky_orient::coordinates::ObserverLocation;
use sky_orient::ephemeris::{AnalyticEphemeris, EphemerisProvider};
use sky_orient::libration::optical_libration;
use sky_orient::orientation::{ecliptic_tilt_vs_horizon, orientation_angles};

fn in_range(angle: f64) -> bool {
    angle > -180.0 && angle <= 180.0
}

#[test]
fn test_snapshot_orientation_for_every_body() {
    let instant = utc(2024, 6, 21, 22, 30, 0);
    let snapshot = full_snapshot(instant);
    let observer = paris();

    for body in Body::ALL {
        let angles = orientation_angles(&snapshot, body, &instant, &observer).unwrap();
        assert_eq!(angles.body, body);
        assert!(in_range(angles.parallactic_angle));
        assert!(in_range(angles.pole_position_angle));
        assert!(in_range(angles.rot_to_horizon_celestial_north));
        assert!(in_range(angles.rot_to_horizon_body_north));
        assert_abs_diff_eq!(
            wrap_180(
                angles.rot_to_horizon_body_north
                    - (-angles.parallactic_angle + angles.pole_position_angle)
            ),
            0.0,
            epsilon = 1e-9
        );
    }
}

#[test]
fn test_analytic_orientation() {
    let instant = utc(2024, 9, 17, 21, 0, 0);
    let observer = paris();

    for body in [Body::Sun, Body::Moon] {
        let angles = orientation_angles(&AnalyticEphemeris, body, &instant, &observer).unwrap();
        assert!(in_range(angles.rot_to_horizon_body_north));
    }
    assert_eq!(
        orientation_angles(&AnalyticEphemeris, Body::Jupiter, &instant, &observer),
        Err(AstroError::UnsupportedBody(Body::Jupiter))
    );
}

#[test]
fn test_moon_orientation_is_smooth() {
    // one minute apart the sprite rotation barely moves
    let observer = paris();
    let start = utc(2024, 9, 17, 21, 0, 0);
    let mut previous = orientation_angles(&AnalyticEphemeris, Body::Moon, &start, &observer)
        .unwrap()
        .rot_to_horizon_body_north;

    for minute in 1..=120 {
        let instant = start + Unit::Minute * minute as f64;
        let current = orientation_angles(&AnalyticEphemeris, Body::Moon, &instant, &observer)
            .unwrap()
            .rot_to_horizon_body_north;
        assert!(wrap_180(current - previous).abs() < 1.0);
        previous = current;
    }
}

#[test]
fn test_libration_over_a_year() {
    let start = utc(2024, 1, 1, 0, 0, 0);
    let mut max_longitude: f64 = 0.0;
    let mut max_latitude: f64 = 0.0;

    for day in 0..366 {
        let instant = start + Unit::Day * day as f64;
        let ecliptic = AnalyticEphemeris
            .apparent_ecliptic(Body::Moon, &instant, None)
            .unwrap();
        let state = optical_libration(&instant, &ecliptic, None);

        assert!(state.longitude.abs() < 9.0, "day {day}: {state:?}");
        assert!(state.latitude.abs() < 7.0, "day {day}: {state:?}");
        assert!(state.position_angle.abs() < 27.0, "day {day}: {state:?}");
        max_longitude = max_longitude.max(state.longitude.abs());
        max_latitude = max_latitude.max(state.latitude.abs());
    }

    // over a year both librations reach most of their range
    assert!(max_longitude > 6.0);
    assert!(max_latitude > 6.0);
}

#[test]
fn test_ecliptic_tilt_over_a_day() {
    let start = utc(2024, 3, 20, 0, 0, 0);
    for observer in [
        paris(),
        ObserverLocation::new(0.0, 0.0),
        ObserverLocation::new(-33.87, 151.21),
    ] {
        for hour in 0..24 {
            let instant = start + Unit::Hour * hour as f64;
            let tilt = ecliptic_tilt_vs_horizon(&AnalyticEphemeris, &instant, &observer).unwrap();
            assert!((0.0..=90.0).contains(&tilt));
        }
    }
}

#[test]
fn test_snapshot_instant_must_match() {
    let instant = utc(2024, 6, 21, 22, 30, 0);
    let snapshot = full_snapshot(instant);
    let later = instant + Unit::Minute * 1.0;

    let err = orientation_angles(&snapshot, Body::Moon, &later, &paris()).unwrap_err();
    assert!(matches!(err, AstroError::InstantMismatch { .. }));
}
