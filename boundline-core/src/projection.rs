//! Spherical Web-Mercator projection.
//!
//! Converts between geographic degrees, the global pixel pyramid and planar
//! meters (EPSG:3857). Pixel space has its origin in the north-west corner
//! with Y growing southward; meter space is centred on (0, 0) with Y growing
//! northward.
//!
//! Pixel conversions clamp latitude to [`MAX_LATITUDE`] so rows stay inside
//! the world. Meter conversions apply the Mercator formula to the full
//! latitude range and only guard the south pole, where it diverges.

use std::f64::consts::PI;

use geo::Coord;

/// Edge length of a tile in pixels.
pub const TILE_SIZE: u32 = 256;

/// Equatorial radius of the spherical model in meters.
pub const EARTH_RADIUS: f64 = 6_378_137.0;

/// Half the equatorial circumference (π·R), the extent of meter space.
pub const ORIGIN_SHIFT: f64 = PI * EARTH_RADIUS;

/// Latitude at which Web-Mercator becomes a square world.
pub const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Width and height of the world in pixels at `zoom`.
///
/// # Examples
/// ```
/// use boundline_core::projection::pixels_per_world;
///
/// assert_eq!(pixels_per_world(0), 256.0);
/// assert_eq!(pixels_per_world(3), 2048.0);
/// ```
#[must_use]
pub fn pixels_per_world(zoom: u8) -> f64 {
    f64::from(TILE_SIZE) * 2_f64.powi(i32::from(zoom))
}

fn mercator_northing(lat: f64) -> f64 {
    ((90.0 + lat) * PI / 360.0).tan().ln() * (180.0 / PI) * ORIGIN_SHIFT / 180.0
}

/// A geographic position in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Latitude in degrees, positive northward.
    pub latitude: f64,
    /// Longitude in degrees, positive eastward.
    pub longitude: f64,
}

impl GeoPoint {
    /// Build a point from degrees.
    #[must_use]
    pub const fn from_lat_lon(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Recover a point from Web-Mercator meters.
    ///
    /// # Examples
    /// ```
    /// use boundline_core::GeoPoint;
    ///
    /// let point = GeoPoint::from_lat_lon(47.2, 8.8);
    /// let back = GeoPoint::from_meters(point.meter_x(), point.meter_y());
    /// assert!((back.latitude - 47.2).abs() < 1e-9);
    /// assert!((back.longitude - 8.8).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn from_meters(meter_x: f64, meter_y: f64) -> Self {
        let longitude = meter_x / ORIGIN_SHIFT * 180.0;
        let lat_deg = meter_y / ORIGIN_SHIFT * 180.0;
        let latitude = 180.0 / PI * (2.0 * (lat_deg * PI / 180.0).exp().atan() - PI / 2.0);
        Self {
            latitude,
            longitude,
        }
    }

    /// Recover a point from global pixel coordinates at `zoom`.
    ///
    /// Pixel coordinates outside the world are clamped to its edge.
    #[must_use]
    pub fn from_pixels(pixel_x: f64, pixel_y: f64, zoom: u8) -> Self {
        let world = pixels_per_world(zoom);
        let x = pixel_x.clamp(0.0, world) / world;
        let y = pixel_y.clamp(0.0, world) / world;
        let longitude = x * 360.0 - 180.0;
        let latitude = (PI * (1.0 - 2.0 * y)).sinh().atan().to_degrees();
        Self {
            latitude,
            longitude,
        }
    }

    /// Latitude clamped to the Web-Mercator domain.
    #[must_use]
    pub fn clamped_latitude(&self) -> f64 {
        self.latitude.clamp(-MAX_LATITUDE, MAX_LATITUDE)
    }

    /// Longitude clamped to `[-180, 180]`.
    #[must_use]
    pub fn clamped_longitude(&self) -> f64 {
        self.longitude.clamp(-180.0, 180.0)
    }

    /// Easting in meters.
    #[must_use]
    pub fn meter_x(&self) -> f64 {
        self.clamped_longitude() * ORIGIN_SHIFT / 180.0
    }

    /// Northing in meters, positive northward.
    ///
    /// Latitude is limited to `[-90, 90]`. The south pole, where the formula
    /// diverges, maps to the mirror of the north pole value.
    #[must_use]
    pub fn meter_y(&self) -> f64 {
        let my = mercator_northing(self.latitude.clamp(-90.0, 90.0));
        if my.is_finite() {
            my
        } else {
            -mercator_northing(90.0)
        }
    }

    /// Meters with the Y axis inverted so that south is positive.
    #[must_use]
    pub fn screen_meters(&self) -> Coord<f64> {
        Coord {
            x: self.meter_x(),
            y: -self.meter_y(),
        }
    }

    /// Fractional global pixel column at `zoom`, in `[0, world)`.
    ///
    /// Longitude 180 wraps onto the western edge.
    #[must_use]
    pub fn pixel_x(&self, zoom: u8) -> f64 {
        ((self.clamped_longitude() + 180.0) / 360.0).rem_euclid(1.0) * pixels_per_world(zoom)
    }

    /// Fractional global pixel row at `zoom`, growing southward.
    #[must_use]
    pub fn pixel_y(&self, zoom: u8) -> f64 {
        let sin_lat = self.clamped_latitude().to_radians().sin();
        (0.5 - sin_lat.atanh() / (2.0 * PI)) * pixels_per_world(zoom)
    }

    /// Both pixel coordinates at `zoom`.
    #[must_use]
    pub fn pixels(&self, zoom: u8) -> Coord<f64> {
        Coord {
            x: self.pixel_x(zoom),
            y: self.pixel_y(zoom),
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    /// Interpret `x` as longitude and `y` as latitude.
    fn from(coord: Coord<f64>) -> Self {
        Self::from_lat_lon(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}
