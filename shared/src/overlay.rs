use std::collections::HashSet;

use h3o::{CellIndex, Resolution};

use crate::config::{
    FALLBACK_RADIUS_DEG, MAX_RADIUS_KM, MAX_RESOLUTION, MIN_RADIUS_KM, OverlayConfig,
};
use crate::error::OverlayError;
use crate::geo::{LatLng, MERCATOR_MAX_LAT, centroid, haversine_km, wrap_lng};
use crate::water::{Terrain, classify};

/// Id given to the synthetic cell substituted when the index fails.
pub const FALLBACK_CELL_ID: &str = "fallback";

const METERS_PER_PIXEL_Z0: f64 = 156_543.033_92;

/// Access to a hierarchical hexagonal index. Cell ids are opaque strings.
pub trait CellIndexer {
    /// Cell containing `point` at `resolution`.
    fn cell_at(&self, point: LatLng, resolution: u8) -> Result<String, OverlayError>;
    /// Cells exactly `k` steps away from `cell`.
    fn ring(&self, cell: &str, k: u32) -> Result<Vec<String>, OverlayError>;
    fn boundary(&self, cell: &str) -> Result<Vec<LatLng>, OverlayError>;
}

/// [`CellIndexer`] backed by the H3 grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct H3Indexer;

impl CellIndexer for H3Indexer {
    fn cell_at(&self, point: LatLng, resolution: u8) -> Result<String, OverlayError> {
        let ll = h3o::LatLng::new(point.lat, point.lng)?;
        let resolution = Resolution::try_from(resolution)?;
        Ok(ll.to_cell(resolution).to_string())
    }

    fn ring(&self, cell: &str, k: u32) -> Result<Vec<String>, OverlayError> {
        let index = parse_cell(cell)?;
        // The fast walk yields `None` once it runs into pentagon distortion.
        let fast: Option<Vec<CellIndex>> = index.grid_ring_fast(k).collect();
        let cells = match fast {
            Some(cells) => cells,
            None => index
                .grid_disk_distances_safe(k)
                .filter_map(|(c, distance)| (distance == k).then_some(c))
                .collect(),
        };
        Ok(cells.into_iter().map(|c| c.to_string()).collect())
    }

    fn boundary(&self, cell: &str) -> Result<Vec<LatLng>, OverlayError> {
        let index = parse_cell(cell)?;
        Ok(index
            .boundary()
            .iter()
            .map(|ll| LatLng::new(ll.lat(), ll.lng()))
            .collect())
    }
}

fn parse_cell(id: &str) -> Result<CellIndex, OverlayError> {
    id.parse::<CellIndex>()
        .map_err(|source| OverlayError::InvalidCell {
            id: id.to_owned(),
            source,
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HexSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl HexSize {
    pub const ALL: [HexSize; 4] = [
        HexSize::Small,
        HexSize::Medium,
        HexSize::Large,
        HexSize::ExtraLarge,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            HexSize::Small => "Small",
            HexSize::Medium => "Medium",
            HexSize::Large => "Large",
            HexSize::ExtraLarge => "Extra Large",
        }
    }

    /// Stable lowercase key used in form values and URL parameters.
    pub const fn key(self) -> &'static str {
        match self {
            HexSize::Small => "small",
            HexSize::Medium => "medium",
            HexSize::Large => "large",
            HexSize::ExtraLarge => "xl",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|size| size.key() == key || size.label().eq_ignore_ascii_case(&key))
    }

    const fn resolution_delta(self) -> i32 {
        match self {
            HexSize::Small => 1,
            HexSize::Medium => 0,
            HexSize::Large => -1,
            HexSize::ExtraLarge => -2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HexCell {
    pub id: String,
    pub label: String,
    pub boundary: Vec<LatLng>,
    pub centroid: LatLng,
    pub terrain: Terrain,
    /// Grid distance from the center cell.
    pub ring: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Overlay {
    pub resolution: u8,
    pub radius_km: f64,
    pub cells: Vec<HexCell>,
    pub fallback: bool,
}

/// Index resolution for a map zoom and the user's hex size.
pub fn resolution_for(zoom: u8, size: HexSize) -> u8 {
    (zoom as i32 - 3 + size.resolution_delta()).clamp(0, MAX_RESOLUTION as i32) as u8
}

/// Distance from the center to a corner of the configured viewport.
pub fn view_radius_km(config: &OverlayConfig, center: LatLng, zoom: u8) -> f64 {
    let (w, h) = config.viewport_px;
    let half_diagonal_px = (w * w + h * h).sqrt() / 2.0;
    let lat = center.lat.clamp(-MERCATOR_MAX_LAT, MERCATOR_MAX_LAT);
    let meters_per_px = METERS_PER_PIXEL_Z0 * lat.to_radians().cos() / 2f64.powi(zoom as i32);
    let radius = half_diagonal_px * meters_per_px / 1_000.0;
    if radius.is_finite() {
        radius.clamp(MIN_RADIUS_KM, MAX_RADIUS_KM)
    } else {
        MAX_RADIUS_KM
    }
}

/// Sequential label: A01..A99, B01..B99, .., Z99, AA01, ..
pub fn hex_label(index: usize) -> String {
    let block = index / 99;
    let number = index % 99 + 1;
    format!("{}{number:02}", block_letters(block))
}

fn block_letters(mut n: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (n % 26) as u8));
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    letters.iter().rev().collect()
}

struct Candidate {
    id: String,
    boundary: Vec<LatLng>,
    centroid: LatLng,
    distance_km: f64,
    ring: u32,
}

fn sample<I: CellIndexer + ?Sized>(
    indexer: &I,
    id: String,
    ring: u32,
    center: LatLng,
) -> Result<Candidate, OverlayError> {
    let boundary = indexer.boundary(&id)?;
    let Some(centroid) = centroid(&boundary) else {
        return Err(OverlayError::EmptyBoundary(id));
    };
    Ok(Candidate {
        distance_km: haversine_km(center, centroid),
        id,
        boundary,
        centroid,
        ring,
    })
}

fn sample_cells<I: CellIndexer + ?Sized>(
    indexer: &I,
    config: &OverlayConfig,
    center: LatLng,
    resolution: u8,
    radius_km: f64,
) -> Result<Vec<Candidate>, OverlayError> {
    let max_hexes = config.max_hexes.max(1);
    let origin = indexer.cell_at(center, resolution)?;
    let mut seen: HashSet<String> = HashSet::from([origin.clone()]);
    let mut candidates = vec![sample(indexer, origin.clone(), 0, center)?];

    for k in 1..=config.max_rings {
        let ring = indexer.ring(&origin, k)?;
        // Only whole rings are added so the overlay edge stays even.
        if candidates.len() + ring.len() > max_hexes {
            break;
        }
        let mut any_inside = false;
        for id in ring {
            if !seen.insert(id.clone()) {
                continue;
            }
            let candidate = sample(indexer, id, k, center)?;
            any_inside |= candidate.distance_km <= radius_km;
            candidates.push(candidate);
        }
        if !any_inside {
            break;
        }
    }

    let mut kept: Vec<Candidate> = candidates
        .into_iter()
        .enumerate()
        .filter(|(i, c)| {
            *i == 0 || (c.distance_km <= radius_km && c.centroid.lat.abs() <= MERCATOR_MAX_LAT)
        })
        .map(|(_, c)| c)
        .collect();
    kept.truncate(max_hexes);
    Ok(kept)
}

/// Build the hex overlay around `center`. Never fails: index errors are
/// replaced by a single fallback cell.
pub fn generate<I: CellIndexer + ?Sized>(
    indexer: &I,
    config: &OverlayConfig,
    center: LatLng,
    zoom: u8,
    size: HexSize,
) -> Overlay {
    let resolution = resolution_for(zoom, size);
    let radius_km = view_radius_km(config, center, zoom);

    let candidates = match sample_cells(indexer, config, center, resolution, radius_km) {
        Ok(candidates) if !candidates.is_empty() => candidates,
        Ok(_) => {
            tracing::warn!(resolution, "overlay sampling produced no cells, using fallback");
            return fallback_overlay(center, resolution, radius_km);
        }
        Err(error) => {
            tracing::warn!(
                %error,
                lat = center.lat,
                lng = center.lng,
                resolution,
                "overlay generation failed, using fallback"
            );
            return fallback_overlay(center, resolution, radius_km);
        }
    };

    let cells: Vec<HexCell> = candidates
        .into_iter()
        .enumerate()
        .map(|(i, c)| HexCell {
            terrain: classify(c.centroid),
            label: hex_label(i),
            id: c.id,
            boundary: c.boundary,
            centroid: c.centroid,
            ring: c.ring,
        })
        .collect();

    tracing::debug!(
        resolution,
        radius_km,
        cells = cells.len(),
        water = cells.iter().filter(|c| c.terrain.is_water()).count(),
        "overlay generated"
    );

    Overlay {
        resolution,
        radius_km,
        cells,
        fallback: false,
    }
}

/// A small geometric hexagon around the (clamped) center. Needs no index.
pub fn fallback_cell(center: LatLng) -> HexCell {
    let c = center.clamped();
    let lng_scale = c.lat.to_radians().cos().max(0.1);
    let boundary: Vec<LatLng> = (0..6)
        .map(|i| {
            let angle = (60.0 * i as f64).to_radians();
            LatLng::new(
                c.lat + FALLBACK_RADIUS_DEG * angle.sin(),
                wrap_lng(c.lng + FALLBACK_RADIUS_DEG * angle.cos() / lng_scale),
            )
        })
        .collect();
    let centroid = centroid(&boundary).unwrap_or(c);
    HexCell {
        id: FALLBACK_CELL_ID.to_owned(),
        label: hex_label(0),
        terrain: classify(centroid),
        boundary,
        centroid,
        ring: 0,
    }
}

fn fallback_overlay(center: LatLng, resolution: u8, radius_km: f64) -> Overlay {
    Overlay {
        resolution,
        radius_km,
        cells: vec![fallback_cell(center)],
        fallback: true,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;

    use super::*;
    use crate::config::{MAX_ZOOM, TERRITORY_ZOOM, WORLD_ZOOM};
    use crate::territory::TERRITORIES;

    /// Indexer with hand-placed cells: one center cell plus one ring.
    pub(crate) struct FakeIndexer {
        pub boundaries: HashMap<String, Vec<LatLng>>,
        pub ring1: Vec<String>,
        pub fail_ring: bool,
    }

    pub(crate) fn small_hex(lat: f64, lng: f64) -> Vec<LatLng> {
        vec![
            LatLng::new(lat, lng),
            LatLng::new(lat + 0.1, lng + 0.1),
            LatLng::new(lat + 0.2, lng),
            LatLng::new(lat + 0.1, lng - 0.1),
            LatLng::new(lat, lng - 0.1),
            LatLng::new(lat - 0.1, lng),
        ]
    }

    impl FakeIndexer {
        pub(crate) fn new(center: (f64, f64), ring1: &[(&str, f64, f64)]) -> Self {
            let mut boundaries = HashMap::new();
            boundaries.insert("center".to_owned(), small_hex(center.0, center.1));
            for &(id, lat, lng) in ring1 {
                boundaries.insert(id.to_owned(), small_hex(lat, lng));
            }
            Self {
                boundaries,
                ring1: ring1.iter().map(|(id, _, _)| (*id).to_owned()).collect(),
                fail_ring: false,
            }
        }
    }

    impl CellIndexer for FakeIndexer {
        fn cell_at(&self, point: LatLng, _resolution: u8) -> Result<String, OverlayError> {
            h3o::LatLng::new(point.lat, point.lng)?;
            Ok("center".to_owned())
        }

        fn ring(&self, cell: &str, k: u32) -> Result<Vec<String>, OverlayError> {
            if self.fail_ring {
                return Err(OverlayError::Ring {
                    cell: cell.to_owned(),
                    k,
                });
            }
            Ok(if k == 1 { self.ring1.clone() } else { Vec::new() })
        }

        fn boundary(&self, cell: &str) -> Result<Vec<LatLng>, OverlayError> {
            self.boundaries
                .get(cell)
                .cloned()
                .ok_or_else(|| OverlayError::EmptyBoundary(cell.to_owned()))
        }
    }

    #[test]
    fn resolution_tracks_zoom_and_size() {
        assert_eq!(resolution_for(TERRITORY_ZOOM, HexSize::Medium), 4);
        assert_eq!(resolution_for(TERRITORY_ZOOM, HexSize::Small), 5);
        assert_eq!(resolution_for(TERRITORY_ZOOM, HexSize::ExtraLarge), 2);
        assert_eq!(resolution_for(WORLD_ZOOM, HexSize::Large), 0);
        assert_eq!(resolution_for(MAX_ZOOM, HexSize::Small), MAX_RESOLUTION);
    }

    #[test]
    fn labels_are_sequential_and_unique() {
        assert_eq!(hex_label(0), "A01");
        assert_eq!(hex_label(98), "A99");
        assert_eq!(hex_label(99), "B01");
        assert_eq!(hex_label(99 * 26 - 1), "Z99");
        assert_eq!(hex_label(99 * 26), "AA01");
        let labels: HashSet<_> = (0..5_000).map(hex_label).collect();
        assert_eq!(labels.len(), 5_000);
    }

    #[test]
    fn radius_is_clamped() {
        let config = OverlayConfig::default();
        let world = view_radius_km(&config, LatLng::new(0.0, 0.0), WORLD_ZOOM);
        assert_eq!(world, MAX_RADIUS_KM);
        let close = view_radius_km(&config, LatLng::new(0.0, 0.0), 20);
        assert_eq!(close, MIN_RADIUS_KM);
        let territory = view_radius_km(&config, LatLng::new(0.0, 0.0), TERRITORY_ZOOM);
        assert!(territory > 800.0 && territory < 900.0, "{territory}");
    }

    #[test]
    fn mixed_land_and_water_cells_are_classified() {
        let indexer = FakeIndexer::new(
            (40.0, -100.0),
            &[("colorado", 39.0, -105.0), ("gulf", 25.0, -90.0), ("pacific", 20.0, -140.0)],
        );
        let overlay = generate(
            &indexer,
            &OverlayConfig::default(),
            LatLng::new(40.0, -100.0),
            WORLD_ZOOM,
            HexSize::Medium,
        );
        assert!(!overlay.fallback);
        let terrains: Vec<_> = overlay
            .cells
            .iter()
            .map(|c| (c.id.as_str(), c.terrain))
            .collect();
        assert_eq!(
            terrains,
            vec![
                ("center", Terrain::Land),
                ("colorado", Terrain::Land),
                ("gulf", Terrain::Water),
                ("pacific", Terrain::Water),
            ]
        );
        let labels: Vec<_> = overlay.cells.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["A01", "A02", "A03", "A04"]);
    }

    #[test]
    fn cells_beyond_radius_are_dropped_but_center_is_kept() {
        let indexer = FakeIndexer::new((0.0, 0.0), &[("near", 0.5, 0.5), ("far", 40.0, 40.0)]);
        let overlay = generate(
            &indexer,
            &OverlayConfig::default(),
            LatLng::new(60.0, 60.0),
            TERRITORY_ZOOM,
            HexSize::Medium,
        );
        let ids: Vec<_> = overlay.cells.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["center"]);
    }

    #[test]
    fn budget_stops_before_a_ring_overflows() {
        let indexer = FakeIndexer::new((0.0, 0.0), &[("a", 0.2, 0.2), ("b", -0.2, -0.2)]);
        let config = OverlayConfig {
            max_hexes: 2,
            ..OverlayConfig::default()
        };
        let overlay = generate(&indexer, &config, LatLng::new(0.0, 0.0), TERRITORY_ZOOM, HexSize::Medium);
        assert_eq!(overlay.cells.len(), 1);
    }

    #[test]
    fn index_failure_yields_single_fallback_cell() {
        let mut indexer = FakeIndexer::new((10.0, 10.0), &[("a", 10.2, 10.2)]);
        indexer.fail_ring = true;
        let center = LatLng::new(10.0, 10.0);
        let overlay = generate(&indexer, &OverlayConfig::default(), center, TERRITORY_ZOOM, HexSize::Medium);
        assert!(overlay.fallback);
        assert_eq!(overlay.cells.len(), 1);
        let cell = &overlay.cells[0];
        assert_eq!(cell.id, FALLBACK_CELL_ID);
        assert_eq!(cell.boundary.len(), 6);
        assert!(haversine_km(cell.centroid, center) < 1.0);
    }

    #[test]
    fn invalid_center_falls_back_with_h3() {
        let overlay = generate(
            &H3Indexer,
            &OverlayConfig::default(),
            LatLng::new(f64::NAN, 10.0),
            TERRITORY_ZOOM,
            HexSize::Medium,
        );
        assert!(overlay.fallback);
        assert_eq!(overlay.cells.len(), 1);
        assert!(overlay.cells[0].centroid.is_valid());
    }

    #[test]
    fn h3_overlay_for_every_territory_is_non_empty_and_unique() {
        let config = OverlayConfig::default();
        for territory in TERRITORIES {
            let overlay = generate(&H3Indexer, &config, territory.center(), TERRITORY_ZOOM, HexSize::Medium);
            assert!(!overlay.fallback, "{} fell back", territory.name);
            assert!(overlay.cells.len() > 1, "{}", territory.name);
            assert!(overlay.cells.len() <= config.max_hexes, "{}", territory.name);
            let ids: HashSet<_> = overlay.cells.iter().map(|c| c.id.as_str()).collect();
            assert_eq!(ids.len(), overlay.cells.len(), "{}", territory.name);
            for cell in &overlay.cells[1..] {
                assert!(
                    haversine_km(cell.centroid, territory.center()) <= overlay.radius_km,
                    "{} kept a cell outside the radius",
                    territory.name
                );
            }
        }
    }

    #[test]
    fn h3_center_cell_contains_the_center() {
        let center = LatLng::new(-10.0, -52.0);
        let overlay = generate(&H3Indexer, &OverlayConfig::default(), center, TERRITORY_ZOOM, HexSize::Medium);
        let first = &overlay.cells[0];
        assert_eq!(first.ring, 0);
        assert_eq!(overlay.resolution, 4);
        assert!(first.boundary.len() >= 5);
        assert!(haversine_km(first.centroid, center) < 50.0);
    }

    #[test]
    fn h3_world_view_survives_pentagons() {
        for size in HexSize::ALL {
            let overlay = generate(
                &H3Indexer,
                &OverlayConfig::default(),
                LatLng::new(0.0, 0.0),
                WORLD_ZOOM,
                size,
            );
            assert!(!overlay.fallback, "{size:?}");
            assert_eq!(overlay.resolution, 0);
            assert!(overlay.cells.len() > 1, "{size:?}");
        }
    }

    #[test]
    fn h3_ring_around_pentagon_is_exact() {
        let pentagon = Resolution::Four
            .pentagons()
            .next()
            .expect("every resolution has pentagons");
        let ring = H3Indexer
            .ring(&pentagon.to_string(), 2)
            .expect("ring around pentagon");
        assert_eq!(ring.len(), 10);
        for id in &ring {
            let cell: CellIndex = id.parse().expect("valid id");
            assert_eq!(pentagon.grid_distance(cell).expect("distance"), 2, "{id}");
        }
    }

    #[test]
    fn h3_rejects_garbage_cell_ids() {
        assert!(matches!(
            H3Indexer.boundary("not-a-cell"),
            Err(OverlayError::InvalidCell { .. })
        ));
        assert!(matches!(
            H3Indexer.cell_at(LatLng::new(0.0, 0.0), 42),
            Err(OverlayError::InvalidResolution(_))
        ));
    }

    #[test]
    fn hex_size_keys_parse() {
        for size in HexSize::ALL {
            assert_eq!(HexSize::from_key(size.key()), Some(size));
            assert_eq!(HexSize::from_key(size.label()), Some(size));
        }
        assert_eq!(HexSize::from_key(" LARGE "), Some(HexSize::Large));
        assert_eq!(HexSize::from_key("gigantic"), None);
    }
}
