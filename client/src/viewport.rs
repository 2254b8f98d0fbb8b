use std::f64::consts::PI;

use imperil_shared::LatLng;
use imperil_shared::config::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use imperil_shared::geo::{MERCATOR_MAX_LAT, unwrap_ring, wrap_lng};

/// Web-Mercator transform between geographic and screen coordinates.
/// World pixels run from (0, 0) at the north-west corner to
/// `world_size()` on both axes at the south-east.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
    pub width: f64,
    pub height: f64,
}

/// One tile position in the visible grid. `key.x` is wrapped into range;
/// the screen position is not.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSlot {
    pub key: TileKey,
    pub screen_x: f64,
    pub screen_y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileKey {
    pub z: u8,
    pub x: u32,
    pub y: u32,
}

impl Viewport {
    pub fn new(center: LatLng, zoom: u8, width: f64, height: f64) -> Self {
        Self {
            center: center.clamped(),
            zoom: zoom.clamp(MIN_ZOOM, MAX_ZOOM),
            width,
            height,
        }
    }

    pub fn world_size(&self) -> f64 {
        TILE_SIZE * f64::from(1u32 << self.zoom)
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    /// Geographic point to world pixels. Longitude is not wrapped so that
    /// unwrapped rings stay continuous.
    pub fn project(&self, p: LatLng) -> (f64, f64) {
        let size = self.world_size();
        let lat = p.lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT).to_radians();
        let x = (p.lng + 180.0) / 360.0 * size;
        let sin = lat.sin();
        let y = (0.5 - ((1.0 + sin) / (1.0 - sin)).ln() / (4.0 * PI)) * size;
        (x, y)
    }

    pub fn unproject(&self, x: f64, y: f64) -> LatLng {
        let size = self.world_size();
        let lng = x / size * 360.0 - 180.0;
        let n = PI - 2.0 * PI * y / size;
        let lat = n.sinh().atan().to_degrees();
        LatLng::new(lat, lng)
    }

    fn origin(&self) -> (f64, f64) {
        let (cx, cy) = self.project(self.center);
        (cx - self.width / 2.0, cy - self.height / 2.0)
    }

    pub fn to_screen(&self, p: LatLng) -> (f64, f64) {
        let (x, y) = self.project(p);
        let (ox, oy) = self.origin();
        (x - ox, y - oy)
    }

    /// Screen polygon for a cell boundary, shifted by whole worlds so it
    /// lands on the copy nearest the view center.
    pub fn to_screen_ring(&self, ring: &[LatLng]) -> Vec<(f64, f64)> {
        let ring = unwrap_ring(ring);
        let Some(first) = ring.first() else {
            return Vec::new();
        };
        let size = self.world_size();
        let (fx, _) = self.to_screen(*first);
        let offset = ((self.width / 2.0 - fx) / size).round() * size;
        ring.iter()
            .map(|p| {
                let (x, y) = self.to_screen(*p);
                (x + offset, y)
            })
            .collect()
    }

    /// Pan by a screen-space drag delta. The map follows the pointer, so
    /// the center moves the opposite way.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        let size = self.world_size();
        let (cx, cy) = self.project(self.center);
        let x = (cx - dx).rem_euclid(size);
        let y = (cy - dy).clamp(0.0, size);
        let p = self.unproject(x, y);
        self.center = LatLng::new(p.lat, wrap_lng(p.lng)).clamped();
    }

    /// Tiles covering the viewport, left to right then top to bottom.
    pub fn visible_tiles(&self) -> Vec<TileSlot> {
        let count = 1i64 << self.zoom;
        let (ox, oy) = self.origin();
        let first_x = (ox / TILE_SIZE).floor() as i64;
        let last_x = ((ox + self.width) / TILE_SIZE).floor() as i64;
        let first_y = ((oy / TILE_SIZE).floor() as i64).max(0);
        let last_y = (((oy + self.height) / TILE_SIZE).floor() as i64).min(count - 1);

        let mut slots = Vec::new();
        for ty in first_y..=last_y {
            for tx in first_x..=last_x {
                slots.push(TileSlot {
                    key: TileKey {
                        z: self.zoom,
                        x: tx.rem_euclid(count) as u32,
                        y: ty as u32,
                    },
                    screen_x: tx as f64 * TILE_SIZE - ox,
                    screen_y: ty as f64 * TILE_SIZE - oy,
                });
            }
        }
        slots
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn center_maps_to_screen_middle() {
        let vp = Viewport::new(LatLng::new(46.0, 105.0), 7, 800.0, 600.0);
        let (x, y) = vp.to_screen(vp.center);
        assert!(close(x, 400.0) && close(y, 300.0));
        let (wx, wy) = vp.project(vp.center);
        let back = vp.unproject(wx, wy);
        assert!(close(back.lat, 46.0) && close(back.lng, 105.0));
    }

    #[test]
    fn equator_and_greenwich_hit_world_middle() {
        let vp = Viewport::new(LatLng::new(0.0, 0.0), 1, 512.0, 512.0);
        assert_eq!(vp.world_size(), 512.0);
        let (x, y) = vp.project(LatLng::new(0.0, 0.0));
        assert!(close(x, 256.0) && close(y, 256.0));
    }

    #[test]
    fn north_is_up() {
        let vp = Viewport::new(LatLng::new(10.0, 10.0), 4, 800.0, 600.0);
        let (_, north) = vp.to_screen(LatLng::new(20.0, 10.0));
        let (_, south) = vp.to_screen(LatLng::new(0.0, 10.0));
        assert!(north < south);
    }

    #[test]
    fn dragging_right_moves_center_west() {
        let mut vp = Viewport::new(LatLng::new(0.0, 0.0), 3, 800.0, 600.0);
        vp.pan(100.0, 0.0);
        assert!(vp.center.lng < 0.0);
        assert!(close(vp.center.lat, 0.0));
    }

    #[test]
    fn pan_wraps_across_antimeridian() {
        let mut vp = Viewport::new(LatLng::new(0.0, 179.0), 5, 800.0, 600.0);
        vp.pan(-200.0, 0.0);
        assert!(vp.center.is_valid());
        assert!(vp.center.lng < 0.0);
    }

    #[test]
    fn visible_tiles_wrap_x() {
        let vp = Viewport::new(LatLng::new(0.0, 0.0), 1, 1200.0, 512.0);
        let slots = vp.visible_tiles();
        assert!(slots.iter().all(|s| s.key.x < 2 && s.key.y < 2));
        assert!(slots.len() > 4);
        assert!(slots.iter().any(|s| s.screen_x < 0.0));
    }

    #[test]
    fn ring_across_antimeridian_stays_compact() {
        let vp = Viewport::new(LatLng::new(0.0, 179.0), 6, 800.0, 600.0);
        let ring = [
            LatLng::new(1.0, 179.5),
            LatLng::new(1.0, -179.5),
            LatLng::new(-1.0, -179.5),
            LatLng::new(-1.0, 179.5),
        ];
        let screen = vp.to_screen_ring(&ring);
        let xs: Vec<f64> = screen.iter().map(|p| p.0).collect();
        let span = xs.iter().cloned().fold(f64::MIN, f64::max)
            - xs.iter().cloned().fold(f64::MAX, f64::min);
        assert!(span < vp.width);
        assert!(xs.iter().all(|x| *x > 0.0 && *x < vp.width));
    }

    #[test]
    fn ring_on_far_side_is_shifted_near() {
        let vp = Viewport::new(LatLng::new(0.0, 178.0), 6, 800.0, 600.0);
        let ring = [
            LatLng::new(0.5, -179.5),
            LatLng::new(0.5, -179.0),
            LatLng::new(-0.5, -179.0),
        ];
        let screen = vp.to_screen_ring(&ring);
        assert!(screen.iter().all(|(x, _)| *x > 400.0 && *x < 800.0));
    }
}
