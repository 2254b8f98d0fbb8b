pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_SUBDOMAINS: &[&str] = &["a", "b", "c"];
pub const TILE_ATTRIBUTION: &str = "\u{00A9} OpenStreetMap contributors";
pub const TILE_ATTRIBUTION_URL: &str = "https://www.openstreetmap.org/copyright";
pub const TILE_SIZE: f64 = 256.0;

pub const WORLD_ZOOM: u8 = 1;
pub const TERRITORY_ZOOM: u8 = 7;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 12;

pub const MAX_RESOLUTION: u8 = 9;
pub const DEFAULT_MAX_RINGS: u32 = 16;
pub const DEFAULT_MAX_HEXES: usize = 800;

/// Viewport the overlay is sized for when the real canvas size is unknown.
pub const REFERENCE_VIEWPORT_PX: (f64, f64) = (1200.0, 800.0);
pub const MIN_RADIUS_KM: f64 = 25.0;
pub const MAX_RADIUS_KM: f64 = 6_000.0;

/// Circumradius of the synthetic fallback hexagon, in degrees of latitude.
pub const FALLBACK_RADIUS_DEG: f64 = 0.5;

/// Tunables for overlay generation.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayConfig {
    pub max_rings: u32,
    pub max_hexes: usize,
    pub viewport_px: (f64, f64),
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            max_rings: DEFAULT_MAX_RINGS,
            max_hexes: DEFAULT_MAX_HEXES,
            viewport_px: REFERENCE_VIEWPORT_PX,
        }
    }
}
