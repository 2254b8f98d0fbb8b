use rand::Rng;

use crate::config::{MAX_ZOOM, MIN_ZOOM, OverlayConfig, TERRITORY_ZOOM, WORLD_ZOOM};
use crate::error::ViewError;
use crate::geo::LatLng;
use crate::overlay::{CellIndexer, H3Indexer, HexCell, HexSize, Overlay, generate};
use crate::random::random_coordinates;
use crate::territory::{self, WORLD, WORLD_CENTER};

/// View state of the map page. Every input change regenerates the overlay in
/// full; at most one hex is selected at a time.
#[derive(Debug, Clone)]
pub struct MapView<I: CellIndexer = H3Indexer> {
    indexer: I,
    config: OverlayConfig,
    center: LatLng,
    zoom: u8,
    hex_size: HexSize,
    territory: Option<String>,
    show_hexes: bool,
    selected: Option<String>,
    overlay: Overlay,
}

impl MapView<H3Indexer> {
    pub fn new(config: OverlayConfig) -> Self {
        Self::with_indexer(H3Indexer, config)
    }
}

impl Default for MapView<H3Indexer> {
    fn default() -> Self {
        Self::new(OverlayConfig::default())
    }
}

impl<I: CellIndexer> MapView<I> {
    /// Starts on the World view with hexes hidden.
    pub fn with_indexer(indexer: I, config: OverlayConfig) -> Self {
        let hex_size = HexSize::default();
        let overlay = generate(&indexer, &config, WORLD_CENTER, WORLD_ZOOM, hex_size);
        Self {
            indexer,
            config,
            center: WORLD_CENTER,
            zoom: WORLD_ZOOM,
            hex_size,
            territory: Some(WORLD.to_owned()),
            show_hexes: false,
            selected: None,
            overlay,
        }
    }

    pub fn center(&self) -> LatLng {
        self.center
    }

    pub fn zoom(&self) -> u8 {
        self.zoom
    }

    pub fn hex_size(&self) -> HexSize {
        self.hex_size
    }

    pub fn territory(&self) -> Option<&str> {
        self.territory.as_deref()
    }

    pub fn show_hexes(&self) -> bool {
        self.show_hexes
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// Cells to draw; empty while the overlay is hidden.
    pub fn visible_hexes(&self) -> &[HexCell] {
        if self.show_hexes {
            &self.overlay.cells
        } else {
            &[]
        }
    }

    /// Size of the generated overlay, shown whether or not it is visible.
    pub fn hex_count(&self) -> usize {
        self.overlay.cells.len()
    }

    pub fn selected_hex(&self) -> Option<&HexCell> {
        let id = self.selected.as_deref()?;
        self.overlay.cells.iter().find(|c| c.id == id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.as_deref() == Some(id)
    }

    /// Recenter on a catalog territory or the World view. Unknown names leave
    /// the view untouched.
    pub fn select_territory(&mut self, name: &str) -> Result<(), ViewError> {
        let (center, zoom) = if name == WORLD {
            (WORLD_CENTER, WORLD_ZOOM)
        } else {
            let territory = territory::find(name)
                .ok_or_else(|| ViewError::UnknownTerritory(name.to_owned()))?;
            (territory.center(), TERRITORY_ZOOM)
        };
        tracing::info!(territory = name, lat = center.lat, lng = center.lng, zoom, "territory selected");
        self.territory = Some(name.to_owned());
        self.center = center;
        self.zoom = zoom;
        self.selected = None;
        self.regenerate();
        Ok(())
    }

    /// Jump to a random point at the current zoom.
    pub fn randomize<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let center = random_coordinates(rng);
        tracing::info!(lat = center.lat, lng = center.lng, "randomized view");
        self.territory = None;
        self.center = center;
        self.selected = None;
        self.regenerate();
    }

    pub fn toggle_hexes(&mut self) {
        self.show_hexes = !self.show_hexes;
    }

    pub fn set_show_hexes(&mut self, show: bool) {
        self.show_hexes = show;
    }

    /// Toggle selection of `id`. Returns false when `id` is not in the
    /// current overlay.
    pub fn click_hex(&mut self, id: &str) -> bool {
        if !self.overlay.cells.iter().any(|c| c.id == id) {
            return false;
        }
        if self.is_selected(id) {
            self.selected = None;
        } else {
            self.selected = Some(id.to_owned());
        }
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn set_hex_size(&mut self, size: HexSize) {
        if size == self.hex_size {
            return;
        }
        self.hex_size = size;
        self.regenerate_keeping_selection();
    }

    pub fn set_zoom(&mut self, zoom: u8) {
        let zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        if zoom == self.zoom {
            return;
        }
        self.zoom = zoom;
        self.territory = None;
        self.regenerate_keeping_selection();
    }

    /// Move the view, e.g. after the map was dragged.
    pub fn set_center(&mut self, center: LatLng) {
        let center = center.clamped();
        if center == self.center {
            return;
        }
        self.center = center;
        self.territory = None;
        self.regenerate_keeping_selection();
    }

    fn regenerate(&mut self) {
        self.overlay = generate(
            &self.indexer,
            &self.config,
            self.center,
            self.zoom,
            self.hex_size,
        );
    }

    fn regenerate_keeping_selection(&mut self) {
        self.regenerate();
        if self.selected_hex().is_none() {
            self.selected = None;
        }
    }
}
