use hifitime::Epoch;
use sky_orient::body::Body;
use sky_orient::constants::Instant;
use sky_orient::coordinates::{EquatorialDirection, EquatorialFrame, ObserverLocation};
use sky_orient::ephemeris::{BodyEphemeris, EphemerisSnapshot};

pub fn utc(year: i32, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Instant {
    Epoch::from_gregorian_utc_hms(year, month, day, hour, minute, second)
}

/// Mid-northern-latitude observer used across the scenarios.
pub fn paris() -> ObserverLocation {
    ObserverLocation::new(48.8566, 2.3522).with_elevation(35.0)
}

/// Snapshot holding a plausible direction for every body, as a host would fill it.
pub fn full_snapshot(instant: Instant) -> EphemerisSnapshot {
    Body::ALL
        .iter()
        .enumerate()
        .fold(EphemerisSnapshot::new(instant), |snapshot, (i, body)| {
            let ra = 17.0 + 39.0 * i as f64;
            let dec = -22.0 + 5.5 * i as f64;
            snapshot.with_body(
                *body,
                BodyEphemeris::new(EquatorialDirection::new(ra, dec, EquatorialFrame::J2000))
                    .with_distance_au(1.0 + i as f64),
            )
        })
}
