use crate::geo::LatLng;

/// Name of the pseudo-territory that shows the whole globe.
pub const WORLD: &str = "World";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Africa,
    Asia,
    Australia,
}

impl Continent {
    /// Display order used by the territory dropdown.
    pub const ALL: [Continent; 6] = [
        Continent::NorthAmerica,
        Continent::SouthAmerica,
        Continent::Europe,
        Continent::Africa,
        Continent::Asia,
        Continent::Australia,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Continent::NorthAmerica => "North America",
            Continent::SouthAmerica => "South America",
            Continent::Europe => "Europe",
            Continent::Africa => "Africa",
            Continent::Asia => "Asia",
            Continent::Australia => "Australia",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Territory {
    pub name: &'static str,
    pub lat: f64,
    pub lng: f64,
    pub continent: Continent,
}

impl Territory {
    pub const fn center(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }
}

const fn t(name: &'static str, lat: f64, lng: f64, continent: Continent) -> Territory {
    Territory {
        name,
        lat,
        lng,
        continent,
    }
}

use Continent::*;

/// The classic 42 territories, each pinned to a representative point.
pub const TERRITORIES: &[Territory] = &[
    t("Alaska", 64.0, -153.0, NorthAmerica),
    t("Alberta", 55.0, -115.0, NorthAmerica),
    t("Central America", 15.0, -90.0, NorthAmerica),
    t("Eastern United States", 38.0, -80.0, NorthAmerica),
    t("Greenland", 72.0, -40.0, NorthAmerica),
    t("Northwest Territory", 64.0, -120.0, NorthAmerica),
    t("Ontario", 50.0, -85.0, NorthAmerica),
    t("Quebec", 52.0, -72.0, NorthAmerica),
    t("Western United States", 40.0, -112.0, NorthAmerica),
    t("Argentina", -34.0, -64.0, SouthAmerica),
    t("Brazil", -10.0, -52.0, SouthAmerica),
    t("Peru", -10.0, -75.0, SouthAmerica),
    t("Venezuela", 7.0, -66.0, SouthAmerica),
    t("Great Britain", 54.0, -2.0, Europe),
    t("Iceland", 65.0, -18.0, Europe),
    t("Northern Europe", 52.0, 14.0, Europe),
    t("Scandinavia", 62.0, 15.0, Europe),
    t("Southern Europe", 42.0, 13.0, Europe),
    t("Ukraine", 49.0, 32.0, Europe),
    t("Western Europe", 46.0, 2.0, Europe),
    t("Congo", -1.0, 22.0, Africa),
    t("East Africa", 1.0, 38.0, Africa),
    t("Egypt", 26.0, 30.0, Africa),
    t("Madagascar", -19.0, 47.0, Africa),
    t("North Africa", 28.0, 3.0, Africa),
    t("South Africa", -29.0, 24.0, Africa),
    t("Afghanistan", 33.0, 65.0, Asia),
    t("China", 35.0, 105.0, Asia),
    t("India", 21.0, 78.0, Asia),
    t("Irkutsk", 56.0, 104.0, Asia),
    t("Japan", 36.0, 138.0, Asia),
    t("Kamchatka", 56.0, 160.0, Asia),
    t("Middle East", 29.0, 45.0, Asia),
    t("Mongolia", 46.0, 105.0, Asia),
    t("Siam", 15.0, 101.0, Asia),
    t("Siberia", 62.0, 95.0, Asia),
    t("Ural", 60.0, 60.0, Asia),
    t("Yakutsk", 66.0, 129.0, Asia),
    t("Eastern Australia", -27.0, 148.0, Australia),
    t("Indonesia", -2.0, 118.0, Australia),
    t("New Guinea", -6.0, 145.0, Australia),
    t("Western Australia", -25.0, 122.0, Australia),
];

/// The World entry sits outside any continent; it only supplies a center.
pub const WORLD_CENTER: LatLng = LatLng::new(0.0, 0.0);

/// Look up a catalog territory by its exact display name. [`WORLD`] is not
/// in the catalog and yields `None`.
pub fn find(name: &str) -> Option<&'static Territory> {
    TERRITORIES.iter().find(|t| t.name == name)
}

/// Territories grouped by continent, in dropdown order.
pub fn by_continent() -> Vec<(Continent, Vec<&'static Territory>)> {
    Continent::ALL
        .iter()
        .map(|&continent| {
            let members = TERRITORIES
                .iter()
                .filter(|t| t.continent == continent)
                .collect();
            (continent, members)
        })
        .collect()
}
