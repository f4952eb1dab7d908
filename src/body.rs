//! Solar-system bodies handled by the orientation and pole models.

use serde::{Deserialize, Serialize};

use crate::astro_errors::AstroError;

/// A body whose orientation can be computed.
///
/// The Sun is included so that the aggregator can orient a solar sprite the same way as the
/// Moon and planets; it has a fixed WGCCRE pole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
}

impl Body {
    /// Every body, in the order used by the rendering layer.
    pub const ALL: [Body; 9] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    /// The seven major planets other than Earth.
    pub const PLANETS: [Body; 7] = [
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
        }
    }
}

impl std::fmt::Display for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for Body {
    type Err = AstroError;

    /// Parse a body name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Body::ALL
            .iter()
            .copied()
            .find(|b| b.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| AstroError::UnknownBody(s.to_string()))
    }
}

#[cfg(test)]
mod body_test {
    use super::*;

    #[test]
    fn test_parse_body() {
        assert_eq!("moon".parse::<Body>().unwrap(), Body::Moon);
        assert_eq!(" Jupiter ".parse::<Body>().unwrap(), Body::Jupiter);
        assert_eq!(
            "Pluto".parse::<Body>(),
            Err(AstroError::UnknownBody("Pluto".into()))
        );
    }

    #[test]
    fn test_display_round_trip() {
        for body in Body::ALL {
            assert_eq!(body.to_string().parse::<Body>().unwrap(), body);
        }
    }
}
