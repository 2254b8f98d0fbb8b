/// Latitude limit of the Web-Mercator projection used by slippy-map tiles.
pub const MERCATOR_MAX_LAT: f64 = 85.051_128_779_806_59;

const EARTH_RADIUS_KM: f64 = 6_371.008_8;

/// Geographic point in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// Clamp latitude into the Mercator band and wrap longitude into [-180, 180).
    /// Non-finite components collapse to 0.
    pub fn clamped(&self) -> Self {
        let lat = if self.lat.is_finite() {
            self.lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT)
        } else {
            0.0
        };
        let lng = if self.lng.is_finite() {
            wrap_lng(self.lng)
        } else {
            0.0
        };
        Self { lat, lng }
    }
}

/// Wrap a longitude into [-180, 180).
pub fn wrap_lng(lng: f64) -> f64 {
    (lng + 180.0).rem_euclid(360.0) - 180.0
}

/// Rewrite a ring so consecutive longitudes never jump by more than 180°.
/// Longitudes may leave [-180, 180] afterwards; that is intended for drawing.
pub fn unwrap_ring(points: &[LatLng]) -> Vec<LatLng> {
    let mut out = Vec::with_capacity(points.len());
    let mut prev: Option<f64> = None;
    for p in points {
        let lng = match prev {
            Some(prev_lng) => {
                let mut lng = p.lng;
                while lng - prev_lng > 180.0 {
                    lng -= 360.0;
                }
                while lng - prev_lng < -180.0 {
                    lng += 360.0;
                }
                lng
            }
            None => p.lng,
        };
        prev = Some(lng);
        out.push(LatLng::new(p.lat, lng));
    }
    out
}

/// Arithmetic mean of the vertices, computed on the unwrapped ring so a cell
/// straddling the antimeridian does not average to the far side of the globe.
pub fn centroid(points: &[LatLng]) -> Option<LatLng> {
    if points.is_empty() {
        return None;
    }
    let unwrapped = unwrap_ring(points);
    let n = unwrapped.len() as f64;
    let (sum_lat, sum_lng) = unwrapped
        .iter()
        .fold((0.0, 0.0), |(la, ln), p| (la + p.lat, ln + p.lng));
    Some(LatLng::new(sum_lat / n, wrap_lng(sum_lng / n)))
}

/// Great-circle distance in kilometres.
pub fn haversine_km(a: LatLng, b: LatLng) -> f64 {
    let (lat1, lat2) = (a.lat.to_radians(), b.lat.to_radians());
    let dlat = lat2 - lat1;
    let dlng = (b.lng - a.lng).to_radians();
    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * h.sqrt().min(1.0).asin()
}

/// Even-odd point-in-polygon test in planar coordinates.
pub fn point_in_polygon(point: (f64, f64), polygon: &[(f64, f64)]) -> bool {
    let (px, py) = point;
    let mut inside = false;
    let mut j = polygon.len().wrapping_sub(1);
    for i in 0..polygon.len() {
        let (xi, yi) = polygon[i];
        let (xj, yj) = polygon[j];
        if (yi > py) != (yj > py) && px < (xj - xi) * (py - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}
