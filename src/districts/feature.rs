//! District identity and geometry part types

use geo::Polygon;

/// BoroCD codes for joint interest areas (parks, airports, cemeteries and
/// other unpopulated placeholders). These stay in the index for containment
/// queries but are excluded from selectable rendering and interaction.
const JOINT_INTEREST_AREAS: [u16; 12] = [
    164, 226, 227, 228, 355, 356, 480, 481, 482, 483, 484, 595,
];

const BOROUGH_NAMES: [&str; 5] = ["Manhattan", "Bronx", "Brooklyn", "Queens", "Staten Island"];

/// A community district code (BoroCD): the leading digit is the borough
/// index (1 = Manhattan .. 5 = Staten Island), the rest is the board number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DistrictId(u16);

impl DistrictId {
    pub fn new(code: u16) -> Self {
        Self(code)
    }

    /// The raw BoroCD code.
    pub fn code(&self) -> u16 {
        self.0
    }

    /// Board number within the borough (105 -> 5, 302 -> 2).
    pub fn board_number(&self) -> u16 {
        self.0 % 100
    }

    /// Borough display name, or `None` for codes outside the five boroughs.
    pub fn borough_name(&self) -> Option<&'static str> {
        let borough = self.0 / 100;
        match borough {
            1..=5 => Some(BOROUGH_NAMES[borough as usize - 1]),
            _ => None,
        }
    }

    /// Whether this district may appear as a selection. Joint interest areas
    /// are containment-queryable but never selectable.
    pub fn is_selectable(&self) -> bool {
        !JOINT_INTEREST_AREAS.contains(&self.0)
    }

    /// Human-readable label, e.g. "Manhattan CB5".
    pub fn display_text(&self) -> String {
        match self.borough_name() {
            Some(borough) => format!("{} CB{}", borough, self.board_number()),
            None => format!("District {}", self.0),
        }
    }
}

impl std::fmt::Display for DistrictId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

/// One polygon part of a district's geometry. A district may consist of
/// several parts sharing the same id.
#[derive(Clone, Debug)]
pub struct DistrictPart {
    pub id: DistrictId,
    pub polygon: Polygon<f64>,
}

impl DistrictPart {
    pub fn new(id: DistrictId, polygon: Polygon<f64>) -> Self {
        Self { id, polygon }
    }
}

/// A geographic point chosen by the user, produced by the search
/// collaborator. Compared by value: a re-submitted identical coordinate is
/// not a new selection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Location {
    pub lon: f64,
    pub lat: f64,
}

impl Location {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    pub fn point(&self) -> geo::Point<f64> {
        geo::Point::new(self.lon, self.lat)
    }
}
