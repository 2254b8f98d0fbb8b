use crate::geo::LatLng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Land,
    Water,
}

impl Terrain {
    pub const fn is_water(self) -> bool {
        matches!(self, Terrain::Water)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Terrain::Land => "Land",
            Terrain::Water => "Water",
        }
    }
}

/// Axis-aligned lat/lng box approximating (part of) a body of water.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaterBody {
    pub name: &'static str,
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl WaterBody {
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.min_lat && p.lat <= self.max_lat && p.lng >= self.min_lng && p.lng <= self.max_lng
    }
}

const fn w(name: &'static str, lat: (f64, f64), lng: (f64, f64)) -> WaterBody {
    WaterBody {
        name,
        min_lat: lat.0,
        max_lat: lat.1,
        min_lng: lng.0,
        max_lng: lng.1,
    }
}

/// Checked in order; the first hit names the water body. Coarse on purpose:
/// coastlines inside a box are misclassified.
pub const WATER_BODIES: &[WaterBody] = &[
    // Enclosed seas first so their names win over the surrounding ocean.
    w("Mediterranean Sea", (33.5, 37.5), (-5.5, 36.0)),
    w("Mediterranean Sea", (37.5, 44.0), (3.0, 9.5)),
    w("Adriatic Sea", (40.5, 45.5), (14.5, 19.0)),
    w("Aegean Sea", (37.5, 40.5), (23.0, 26.5)),
    w("Red Sea", (12.5, 28.0), (33.0, 43.0)),
    w("Persian Gulf", (24.0, 30.0), (48.0, 56.5)),
    w("Black Sea", (41.0, 46.5), (28.0, 41.5)),
    w("Caspian Sea", (37.0, 47.0), (47.0, 54.0)),
    w("Baltic Sea", (54.0, 60.0), (16.5, 24.0)),
    w("Gulf of Bothnia", (60.0, 65.5), (17.0, 25.5)),
    w("North Sea", (53.5, 58.0), (0.0, 7.5)),
    w("Bay of Biscay", (43.5, 48.0), (-10.0, -1.5)),
    w("Gulf of Mexico", (22.0, 29.0), (-96.0, -84.0)),
    w("Hudson Bay", (55.0, 63.0), (-94.0, -78.0)),
    w("Sea of Japan", (38.5, 48.0), (129.5, 139.0)),
    w("South China Sea", (7.0, 21.0), (110.0, 119.0)),
    w("Sea of Okhotsk", (46.0, 59.0), (143.0, 155.8)),
    w("Bering Sea", (52.0, 62.0), (165.0, 180.0)),
    w("Bering Sea", (52.0, 62.0), (-180.0, -160.0)),
    w("Coral Sea", (-22.0, -11.0), (150.0, 160.0)),
    w("Tasman Sea", (-44.0, -30.0), (154.0, 172.0)),
    w("Arabian Sea", (5.0, 22.0), (57.0, 72.0)),
    w("Bay of Bengal", (5.0, 20.0), (81.5, 94.0)),
    // Open ocean.
    w("Pacific Ocean", (-60.0, 58.0), (-180.0, -125.0)),
    w("Pacific Ocean", (-60.0, 20.0), (-125.0, -106.0)),
    w("Pacific Ocean", (-60.0, 5.0), (-106.0, -82.0)),
    w("Pacific Ocean", (-10.0, 50.0), (150.0, 180.0)),
    w("Pacific Ocean", (-60.0, -10.0), (155.0, 180.0)),
    w("Pacific Ocean", (5.0, 30.0), (130.0, 150.0)),
    w("Atlantic Ocean", (0.0, 60.0), (-60.0, -18.0)),
    w("Atlantic Ocean", (-5.0, 4.0), (-35.0, 8.0)),
    w("Atlantic Ocean", (-60.0, 0.0), (-35.0, 8.0)),
    w("Atlantic Ocean", (-60.0, -25.0), (-50.0, -35.0)),
    w("Indian Ocean", (-50.0, 5.0), (52.0, 95.0)),
    w("Indian Ocean", (-50.0, -12.0), (95.0, 112.0)),
    w("Indian Ocean", (-60.0, -44.0), (112.0, 155.0)),
    w("Southern Ocean", (-65.0, -55.0), (-180.0, 180.0)),
    w("Arctic Ocean", (84.0, 90.0), (-180.0, 180.0)),
];

/// First water body whose box contains `p`, if any.
pub fn water_body_at(p: LatLng) -> Option<&'static WaterBody> {
    WATER_BODIES.iter().find(|body| body.contains(p))
}

/// Land/water classification as a pure function of the point.
pub fn classify(p: LatLng) -> Terrain {
    if water_body_at(p).is_some() {
        Terrain::Water
    } else {
        Terrain::Land
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::territory::TERRITORIES;

    const WATER_SAMPLES: &[(f64, f64, &str)] = &[
        (0.0, 150.0, "Pacific Ocean"),
        (20.0, -140.0, "Pacific Ocean"),
        (-20.0, 170.0, "Pacific Ocean"),
        (30.0, -30.0, "Atlantic Ocean"),
        (10.0, -20.0, "Atlantic Ocean"),
        (-10.0, 80.0, "Indian Ocean"),
        (0.0, 60.0, "Indian Ocean"),
        (35.0, 15.0, "Mediterranean Sea"),
        (20.0, 35.0, "Red Sea"),
        (26.0, 50.0, "Persian Gulf"),
        (58.0, 20.0, "Baltic Sea"),
        (43.0, 32.0, "Black Sea"),
        (40.0, 50.0, "Caspian Sea"),
    ];

    const LAND_SAMPLES: &[(f64, f64)] = &[
        (50.0, 10.0),
        (40.0, -100.0),
        (-30.0, 25.0),
        (35.0, 105.0),
        (-15.0, -50.0),
        (60.0, 100.0),
        (-25.0, 135.0),
        (55.0, 40.0),
        (50.0, 70.0),
        (39.0, -105.0),
    ];

    #[test]
    fn known_water_points_are_water() {
        for &(lat, lng, name) in WATER_SAMPLES {
            let p = LatLng::new(lat, lng);
            assert_eq!(classify(p), Terrain::Water, "({lat}, {lng})");
            assert_eq!(water_body_at(p).map(|b| b.name), Some(name), "({lat}, {lng})");
        }
    }

    #[test]
    fn known_land_points_are_land() {
        for &(lat, lng) in LAND_SAMPLES {
            assert_eq!(classify(LatLng::new(lat, lng)), Terrain::Land, "({lat}, {lng})");
        }
    }

    #[test]
    fn territory_centers_are_on_land() {
        for territory in TERRITORIES {
            assert_eq!(
                classify(territory.center()),
                Terrain::Land,
                "{} center classified as water",
                territory.name
            );
        }
    }

    #[test]
    fn boxes_are_well_formed() {
        for body in WATER_BODIES {
            assert!(body.min_lat < body.max_lat, "{}", body.name);
            assert!(body.min_lng < body.max_lng, "{}", body.name);
            assert!(LatLng::new(body.min_lat, body.min_lng).is_valid(), "{}", body.name);
            assert!(LatLng::new(body.max_lat, body.max_lng).is_valid(), "{}", body.name);
        }
    }
}
