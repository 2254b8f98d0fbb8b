use thiserror::Error;

/// Failures surfaced by a [`crate::overlay::CellIndexer`].
#[derive(Debug, Error)]
pub enum OverlayError {
    #[error("invalid coordinate: {0}")]
    InvalidCoordinate(#[from] h3o::error::InvalidLatLng),
    #[error("invalid resolution: {0}")]
    InvalidResolution(#[from] h3o::error::InvalidResolution),
    #[error("invalid cell id {id:?}: {source}")]
    InvalidCell {
        id: String,
        #[source]
        source: h3o::error::InvalidCellIndex,
    },
    #[error("ring {k} around {cell} could not be computed")]
    Ring { cell: String, k: u32 },
    #[error("cell {0} has an empty boundary")]
    EmptyBoundary(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("unknown territory {0:?}")]
    UnknownTerritory(String),
}
