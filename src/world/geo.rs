//! Geographic math for the walking map.
//!
//! Great-circle distance, compass bearings, and the screen-space helpers
//! used to place the off-screen target indicator on the viewport edge.

use serde::{Deserialize, Serialize};

/// Mean Earth radius used for haversine distances (meters).
pub const EARTH_RADIUS_METERS: f64 = 6_371_000.0;

/// Two coordinates closer than this are treated as the same graph node.
pub const COORDINATE_TOLERANCE_METERS: f64 = 0.5;

/// Web Mercator tile size in pixels.
const TILE_SIZE: f64 = 256.0;

/// A latitude/longitude pair in degrees.
///
/// Serialized as a two-element `[lat, lng]` array, the shape the graph
/// server uses for every node.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Coordinate {
    /// Latitude in degrees
    pub lat: f64,
    /// Longitude in degrees
    pub lng: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Linear interpolation of latitude and longitude.
    ///
    /// `t` is clamped to `[0, 1]`; the end points are returned exactly.
    pub fn lerp(self, to: Coordinate, t: f64) -> Coordinate {
        if t >= 1.0 {
            return to;
        }
        if t <= 0.0 || t.is_nan() {
            return self;
        }
        Coordinate {
            lat: self.lat + (to.lat - self.lat) * t,
            lng: self.lng + (to.lng - self.lng) * t,
        }
    }

    /// Great-circle distance to another coordinate in meters.
    pub fn distance_to(&self, other: &Coordinate) -> f64 {
        distance(*self, *other)
    }

    /// Whether `other` lies within `tolerance_meters`.
    ///
    /// A tolerance of zero means exact component equality.
    pub fn matches(&self, other: &Coordinate, tolerance_meters: f64) -> bool {
        if tolerance_meters <= 0.0 {
            return self == other;
        }
        distance(*self, *other) <= tolerance_meters
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(coord: Coordinate) -> Self {
        [coord.lat, coord.lng]
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self::new(lat, lng)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.lat, self.lng)
    }
}

/// Great-circle distance between two coordinates (Haversine formula), in meters.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1.0 for antipodal points
    let c = 2.0 * h.clamp(0.0, 1.0).sqrt().asin();

    EARTH_RADIUS_METERS * c
}

/// Total length of a polyline in meters.
pub fn path_length(path: &[Coordinate]) -> f64 {
    path.windows(2).map(|w| distance(w[0], w[1])).sum()
}

/// Initial compass bearing from `from` to `to`, in degrees within `[0, 360)`.
///
/// Identical points have no defined bearing; 0.0 is returned for them.
pub fn bearing_degrees(from: Coordinate, to: Coordinate) -> f64 {
    if from == to {
        return 0.0;
    }

    let lat1 = from.lat.to_radians();
    let lat2 = to.lat.to_radians();
    let d_lng = (to.lng - from.lng).to_radians();

    let y = d_lng.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * d_lng.cos();

    let bearing = y.atan2(x).to_degrees().rem_euclid(360.0);
    if !bearing.is_finite() || bearing >= 360.0 {
        0.0
    } else {
        bearing
    }
}

/// A point in viewport pixel space (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    pub x: f64,
    pub y: f64,
}

impl ScreenPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Viewport dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScreenSize {
    pub width: f64,
    pub height: f64,
}

impl ScreenSize {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Center of the viewport.
    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.width / 2.0, self.height / 2.0)
    }
}

/// Where the ray from `center` toward `target` leaves the viewport.
///
/// The viewport rectangle is inset by `padding` on every side. The crossed
/// edge is chosen by comparing the ray's slope with the viewport aspect
/// ratio, and the result is always clamped to the padded rectangle.
pub fn edge_intersection(
    center: ScreenPoint,
    target: ScreenPoint,
    size: ScreenSize,
    padding: f64,
) -> ScreenPoint {
    let min_x = padding;
    let max_x = (size.width - padding).max(min_x);
    let min_y = padding;
    let max_y = (size.height - padding).max(min_y);

    let dx = target.x - center.x;
    let dy = target.y - center.y;

    if dx == 0.0 && dy == 0.0 {
        return ScreenPoint::new(center.x.clamp(min_x, max_x), center.y.clamp(min_y, max_y));
    }

    let hits_side = dx != 0.0 && (dy / dx).abs() < size.height / size.width;

    let (x, y) = if hits_side {
        let slope = dy / dx;
        let x = if dx > 0.0 { max_x } else { min_x };
        (x, center.y + slope * (x - center.x))
    } else {
        let y = if dy > 0.0 { max_y } else { min_y };
        // dy is non-zero here: dx == 0 forces this branch only with dy != 0
        (center.x + (y - center.y) * dx / dy, y)
    };

    ScreenPoint::new(x.clamp(min_x, max_x), y.clamp(min_y, max_y))
}

/// A map view: center, pixel size and Web Mercator zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinate,
    pub size: ScreenSize,
    pub zoom: f64,
}

impl Viewport {
    pub fn new(center: Coordinate, size: ScreenSize, zoom: f64) -> Self {
        Self { center, size, zoom }
    }

    fn scale(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    /// Web Mercator world pixel coordinates at this zoom.
    fn world_point(&self, coord: Coordinate) -> ScreenPoint {
        let scale = self.scale();
        let lat = coord.lat.clamp(-85.051_128_78, 85.051_128_78).to_radians();
        let x = (coord.lng + 180.0) / 360.0 * scale;
        let y = (1.0 - (lat.tan() + 1.0 / lat.cos()).ln() / std::f64::consts::PI) / 2.0 * scale;
        ScreenPoint::new(x, y)
    }

    /// Project a coordinate into viewport pixels.
    pub fn project(&self, coord: Coordinate) -> ScreenPoint {
        let p = self.world_point(coord);
        let c = self.world_point(self.center);
        let half = self.size.center();
        ScreenPoint::new(p.x - c.x + half.x, p.y - c.y + half.y)
    }

    /// Inverse of [`Viewport::project`].
    pub fn unproject(&self, point: ScreenPoint) -> Coordinate {
        let scale = self.scale();
        let c = self.world_point(self.center);
        let half = self.size.center();
        let wx = point.x - half.x + c.x;
        let wy = point.y - half.y + c.y;

        let lng = wx / scale * 360.0 - 180.0;
        let n = std::f64::consts::PI * (1.0 - 2.0 * wy / scale);
        let lat = n.sinh().atan().to_degrees();
        Coordinate::new(lat, lng)
    }

    /// Whether a coordinate is visible in this viewport.
    pub fn contains(&self, coord: Coordinate) -> bool {
        let p = self.project(coord);
        (0.0..=self.size.width).contains(&p.x) && (0.0..=self.size.height).contains(&p.y)
    }

    /// Geographic position of the edge indicator pointing toward `target`.
    pub fn edge_indicator(&self, target: Coordinate, padding: f64) -> Coordinate {
        let point = edge_intersection(
            self.size.center(),
            self.project(target),
            self.size,
            padding,
        );
        self.unproject(point)
    }
}

/// Geographic bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Bounds {
    pub south_west: Coordinate,
    pub north_east: Coordinate,
}

impl Bounds {
    /// Smallest box containing every point; `None` for an empty iterator.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds {
            south_west: first,
            north_east: first,
        };
        for p in iter {
            bounds.extend(p);
        }
        Some(bounds)
    }

    /// Grow the box to include `point`.
    pub fn extend(&mut self, point: Coordinate) {
        self.south_west.lat = self.south_west.lat.min(point.lat);
        self.south_west.lng = self.south_west.lng.min(point.lng);
        self.north_east.lat = self.north_east.lat.max(point.lat);
        self.north_east.lng = self.north_east.lng.max(point.lng);
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        (self.south_west.lat..=self.north_east.lat).contains(&point.lat)
            && (self.south_west.lng..=self.north_east.lng).contains(&point.lng)
    }

    pub fn center(&self) -> Coordinate {
        self.south_west.lerp(self.north_east, 0.5)
    }
}
