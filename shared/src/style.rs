use crate::water::Terrain;

pub const BORDER_COLOR: &str = "#1f2937";
pub const LAND_FILL: &str = "#10b981";
pub const WATER_FILL: &str = "#3b82f6";
pub const SELECTED_FILL: &str = "#f59e0b";
pub const WATER_DASH: &str = "5, 5";

const BASE_OPACITY: f64 = 0.8;
const WATER_OPACITY_FACTOR: f64 = 0.5;
const BASE_FILL_OPACITY: f64 = 0.25;
const SELECTED_FILL_OPACITY: f64 = 0.45;

/// Path options for one hex polygon.
#[derive(Debug, Clone, PartialEq)]
pub struct HexStyle {
    pub color: &'static str,
    pub weight: f64,
    pub opacity: f64,
    pub fill_color: &'static str,
    pub fill_opacity: f64,
    pub dash_array: Option<&'static str>,
}

impl HexStyle {
    /// Dash pattern as canvas segment lengths; empty means solid.
    pub fn dash_segments(&self) -> Vec<f64> {
        self.dash_array
            .map(|dash| {
                dash.split(|c: char| c == ',' || c.is_whitespace())
                    .filter_map(|part| part.trim().parse::<f64>().ok())
                    .collect()
            })
            .unwrap_or_default()
    }
}

pub fn hex_style(terrain: Terrain, selected: bool) -> HexStyle {
    let water = terrain.is_water();
    let opacity = if water {
        BASE_OPACITY * WATER_OPACITY_FACTOR
    } else {
        BASE_OPACITY
    };
    let fill_opacity = match (selected, water) {
        (true, _) => SELECTED_FILL_OPACITY,
        (false, true) => BASE_FILL_OPACITY * WATER_OPACITY_FACTOR,
        (false, false) => BASE_FILL_OPACITY,
    };
    let fill_color = match (selected, water) {
        (true, _) => SELECTED_FILL,
        (false, true) => WATER_FILL,
        (false, false) => LAND_FILL,
    };
    HexStyle {
        color: BORDER_COLOR,
        weight: if selected { 3.0 } else { 1.0 },
        opacity,
        fill_color,
        fill_opacity,
        dash_array: water.then_some(WATER_DASH),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn land_is_solid_and_opaque() {
        let style = hex_style(Terrain::Land, false);
        assert_eq!(style.color, "#1f2937");
        assert_eq!(style.opacity, 0.8);
        assert_eq!(style.dash_array, None);
        assert!(style.dash_segments().is_empty());
    }

    #[test]
    fn water_is_dashed_and_faded() {
        let water = hex_style(Terrain::Water, false);
        let land = hex_style(Terrain::Land, false);
        assert_eq!(water.opacity, 0.4);
        assert!(water.opacity < land.opacity);
        assert!(water.fill_opacity < land.fill_opacity);
        assert_eq!(water.dash_array, Some("5, 5"));
        assert_eq!(water.dash_segments(), vec![5.0, 5.0]);
    }

    #[test]
    fn selection_keeps_water_distinction() {
        let water = hex_style(Terrain::Water, true);
        let land = hex_style(Terrain::Land, true);
        assert_eq!(water.weight, 3.0);
        assert_eq!(water.fill_color, SELECTED_FILL);
        assert!(water.opacity < land.opacity);
        assert!(water.dash_array.is_some());
        assert!(land.dash_array.is_none());
    }
}
