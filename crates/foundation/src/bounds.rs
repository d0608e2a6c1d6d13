//! Geographic viewport bounds.
//!
//! A [`Bounds`] can only be built through validating constructors, so any
//! value in hand satisfies:
//! - every longitude is within `[-180, 180]`, every latitude within `[-90, 90]`
//! - `west < east` and `south < north`
//!
//! The JSON form is the coordinate-pair tuple the map widget understands:
//! `[[west, south], [east, north]]`.

use serde::{Deserialize, Serialize};

pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsError {
    LongitudeOutOfRange(f64),
    LatitudeOutOfRange(f64),
    /// Southwest corner is not strictly west and south of the northeast corner.
    NotOrdered { sw: [f64; 2], ne: [f64; 2] },
}

impl std::fmt::Display for BoundsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoundsError::LongitudeOutOfRange(v) => {
                write!(f, "Longitude must be between {MIN_LNG} and {MAX_LNG}, got {v}")
            }
            BoundsError::LatitudeOutOfRange(v) => {
                write!(f, "Latitude must be between {MIN_LAT} and {MAX_LAT}, got {v}")
            }
            BoundsError::NotOrdered { sw, ne } => write!(
                f,
                "Southwest corner must be west and south of northeast corner, got {sw:?} / {ne:?}"
            ),
        }
    }
}

impl std::error::Error for BoundsError {}

/// A validated longitude/latitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 2]", into = "[f64; 2]")]
pub struct LngLat {
    lng: f64,
    lat: f64,
}

impl LngLat {
    pub fn new(lng: f64, lat: f64) -> Result<Self, BoundsError> {
        // `contains` is false for NaN, so non-finite input is rejected here too.
        if !(MIN_LNG..=MAX_LNG).contains(&lng) {
            return Err(BoundsError::LongitudeOutOfRange(lng));
        }
        if !(MIN_LAT..=MAX_LAT).contains(&lat) {
            return Err(BoundsError::LatitudeOutOfRange(lat));
        }
        Ok(Self { lng, lat })
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn to_pair(self) -> [f64; 2] {
        [self.lng, self.lat]
    }
}

impl TryFrom<[f64; 2]> for LngLat {
    type Error = BoundsError;

    fn try_from([lng, lat]: [f64; 2]) -> Result<Self, Self::Error> {
        LngLat::new(lng, lat)
    }
}

impl From<LngLat> for [f64; 2] {
    fn from(p: LngLat) -> Self {
        p.to_pair()
    }
}

/// Rectangular viewport as southwest/northeast corners.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[[f64; 2]; 2]", into = "[[f64; 2]; 2]")]
pub struct Bounds {
    sw: LngLat,
    ne: LngLat,
}

impl Bounds {
    /// Default viewport: a fixed box over South Sudan.
    pub const SOUTH_SUDAN: Bounds = Bounds {
        sw: LngLat {
            lng: 23.4392,
            lat: 3.4882,
        },
        ne: LngLat {
            lng: 35.95,
            lat: 12.2212,
        },
    };

    pub fn new(sw: LngLat, ne: LngLat) -> Result<Self, BoundsError> {
        if sw.lng < ne.lng && sw.lat < ne.lat {
            Ok(Self { sw, ne })
        } else {
            Err(BoundsError::NotOrdered {
                sw: sw.to_pair(),
                ne: ne.to_pair(),
            })
        }
    }

    pub fn from_pairs(pairs: [[f64; 2]; 2]) -> Result<Self, BoundsError> {
        let [sw, ne] = pairs;
        Self::new(LngLat::try_from(sw)?, LngLat::try_from(ne)?)
    }

    pub fn from_edges(west: f64, south: f64, east: f64, north: f64) -> Result<Self, BoundsError> {
        Self::from_pairs([[west, south], [east, north]])
    }

    pub fn sw(&self) -> LngLat {
        self.sw
    }

    pub fn ne(&self) -> LngLat {
        self.ne
    }

    pub fn west(&self) -> f64 {
        self.sw.lng
    }

    pub fn south(&self) -> f64 {
        self.sw.lat
    }

    pub fn east(&self) -> f64 {
        self.ne.lng
    }

    pub fn north(&self) -> f64 {
        self.ne.lat
    }

    pub fn to_pairs(self) -> [[f64; 2]; 2] {
        [self.sw.to_pair(), self.ne.to_pair()]
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.west() + self.east()) * 0.5,
            (self.south() + self.north()) * 0.5,
        ]
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Bounds::SOUTH_SUDAN
    }
}

impl TryFrom<[[f64; 2]; 2]> for Bounds {
    type Error = BoundsError;

    fn try_from(pairs: [[f64; 2]; 2]) -> Result<Self, Self::Error> {
        Bounds::from_pairs(pairs)
    }
}

impl From<Bounds> for [[f64; 2]; 2] {
    fn from(b: Bounds) -> Self {
        b.to_pairs()
    }
}
