//! Pixel to geographic coordinate interpolation for north-up rasters.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Compass hemisphere qualifying a DMS angle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
    East,
    West,
}

impl Hemisphere {
    #[inline]
    fn sign(self) -> f64 {
        match self {
            Hemisphere::North | Hemisphere::East => 1.0,
            Hemisphere::South | Hemisphere::West => -1.0,
        }
    }
}

/// Converts degrees/minutes/seconds to signed decimal degrees.
/// Southern and western angles come back negative.
pub fn dms_to_decimal(degrees: f64, minutes: f64, seconds: f64, hemisphere: Hemisphere) -> f64 {
    (degrees + minutes / 60.0 + seconds / 3600.0) * hemisphere.sign()
}

/// Geographic corner coordinates of a north-up raster, decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl GeoBounds {
    pub fn new(south: f64, west: f64, north: f64, east: f64) -> Result<Self, GeoError> {
        if north <= south || east <= west {
            return Err(GeoError::InvertedBounds {
                south,
                west,
                north,
                east,
            });
        }
        Ok(Self {
            south,
            west,
            north,
            east,
        })
    }
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error(
        "inverted bounds: south={south}, north={north}, west={west}, east={east} \
         (north must exceed south, east must exceed west)"
    )]
    InvertedBounds {
        south: f64,
        west: f64,
        north: f64,
        east: f64,
    },

    #[error("cannot georeference a {width}x{height} raster")]
    EmptyRaster { width: u32, height: u32 },
}

/// Linear pixel to lat/lon mapping over a geographically bounded raster.
///
/// Plain interpolation between the corner coordinates: adequate for the
/// small scenes this pipeline works on, no reprojection.
#[derive(Debug, Clone, Copy)]
pub struct GeoReference {
    bounds: GeoBounds,
    width: u32,
    height: u32,
}

impl GeoReference {
    pub fn new(bounds: GeoBounds, width: u32, height: u32) -> Result<Self, GeoError> {
        if width == 0 || height == 0 {
            return Err(GeoError::EmptyRaster { width, height });
        }
        Ok(Self {
            bounds,
            width,
            height,
        })
    }

    /// Latitude decreases downward from the north edge; longitude grows
    /// rightward from the west edge.
    pub fn lat_lon(&self, px: f32, py: f32) -> LatLon {
        let fx = f64::from(px) / f64::from(self.width);
        let fy = f64::from(py) / f64::from(self.height);
        LatLon {
            lat: self.bounds.north - fy * (self.bounds.north - self.bounds.south),
            lon: self.bounds.west + fx * (self.bounds.east - self.bounds.west),
        }
    }
}

/// Geographic point in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    /// Link opening this point in Google Maps.
    pub fn maps_url(&self) -> String {
        format!("https://www.google.com/maps?q={:.6},{:.6}", self.lat, self.lon)
    }
}

impl fmt::Display for LatLon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lon)
    }
}
