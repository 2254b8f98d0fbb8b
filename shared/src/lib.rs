pub mod config;
pub mod error;
pub mod geo;
pub mod overlay;
pub mod random;
pub mod style;
pub mod territory;
pub mod view;
pub mod water;

pub use config::OverlayConfig;
pub use error::{OverlayError, ViewError};
pub use geo::LatLng;
pub use overlay::{CellIndexer, H3Indexer, HexCell, HexSize, Overlay};
pub use style::{HexStyle, hex_style};
pub use territory::{Continent, Territory};
pub use view::MapView;
pub use water::Terrain;
