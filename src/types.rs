use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Body {
    Sun,
    Moon,
    Mercury,
    Venus,
    Mars,
    Jupiter,
    Saturn,
    Uranus,
    Neptune,
    Pluto,
}

impl Body {
    pub const ALL: [Body; 10] = [
        Body::Sun,
        Body::Moon,
        Body::Mercury,
        Body::Venus,
        Body::Mars,
        Body::Jupiter,
        Body::Saturn,
        Body::Uranus,
        Body::Neptune,
        Body::Pluto,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Body::Sun => "sun",
            Body::Moon => "moon",
            Body::Mercury => "mercury",
            Body::Venus => "venus",
            Body::Mars => "mars",
            Body::Jupiter => "jupiter",
            Body::Saturn => "saturn",
            Body::Uranus => "uranus",
            Body::Neptune => "neptune",
            Body::Pluto => "pluto",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Body::Sun => "Sun",
            Body::Moon => "Moon",
            Body::Mercury => "Mercury",
            Body::Venus => "Venus",
            Body::Mars => "Mars",
            Body::Jupiter => "Jupiter",
            Body::Saturn => "Saturn",
            Body::Uranus => "Uranus",
            Body::Neptune => "Neptune",
            Body::Pluto => "Pluto",
        }
    }

    /// Glyph and color used by presentation layers.
    pub fn style(self) -> BodyStyle {
        let (symbol, color) = match self {
            Body::Sun => ("☉", "#FFB300"),
            Body::Moon => ("☽", "#90A4AE"),
            Body::Mercury => ("☿", "#7E57C2"),
            Body::Venus => ("♀", "#26A69A"),
            Body::Mars => ("♂", "#EF5350"),
            Body::Jupiter => ("♃", "#5C6BC0"),
            Body::Saturn => ("♄", "#8D6E63"),
            Body::Uranus => ("⛢", "#42A5F5"),
            Body::Neptune => ("♆", "#26C6DA"),
            Body::Pluto => ("♇", "#78909C"),
        };
        BodyStyle { symbol, color }
    }
}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Body {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Body::ALL
            .into_iter()
            .find(|b| b.name() == lower)
            .ok_or_else(|| EngineError::UnknownBody(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyStyle {
    pub symbol: &'static str,
    pub color: &'static str,
}

/// Ecliptic position of one body. Latitude and distance are placeholders
/// (0 and 1) under the circular model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub body: Body,
    pub longitude: f64,
    pub latitude: f64,
    pub distance: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectType {
    Conjunction,
    Sextile,
    Square,
    Trine,
    Opposition,
}

impl AspectType {
    /// Classification order. The first type whose window contains the
    /// separation wins.
    pub const PRIORITY: [AspectType; 5] = [
        AspectType::Conjunction,
        AspectType::Sextile,
        AspectType::Square,
        AspectType::Trine,
        AspectType::Opposition,
    ];

    pub fn angle(self) -> f64 {
        match self {
            AspectType::Conjunction => 0.0,
            AspectType::Sextile => 60.0,
            AspectType::Square => 90.0,
            AspectType::Trine => 120.0,
            AspectType::Opposition => 180.0,
        }
    }

    /// Maximum orb, in degrees, accepted for this type.
    pub fn orb_limit(self) -> f64 {
        match self {
            AspectType::Conjunction => 8.0,
            AspectType::Sextile => 4.0,
            AspectType::Square => 6.0,
            AspectType::Trine => 6.0,
            AspectType::Opposition => 8.0,
        }
    }

    pub fn from_angle(angle: u32) -> Option<AspectType> {
        match angle {
            0 => Some(AspectType::Conjunction),
            60 => Some(AspectType::Sextile),
            90 => Some(AspectType::Square),
            120 => Some(AspectType::Trine),
            180 => Some(AspectType::Opposition),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AspectType::Conjunction => "conjunction",
            AspectType::Sextile => "sextile",
            AspectType::Square => "square",
            AspectType::Trine => "trine",
            AspectType::Opposition => "opposition",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectType::Conjunction => "Conjunction",
            AspectType::Sextile => "Sextile",
            AspectType::Square => "Square",
            AspectType::Trine => "Trine",
            AspectType::Opposition => "Opposition",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AspectType::Conjunction => {
                "Planets in the same position, energies blend and intensify"
            }
            AspectType::Sextile => "Harmonious aspect representing opportunity and ease",
            AspectType::Square => "Challenging aspect representing tension and growth",
            AspectType::Trine => "Flowing aspect representing harmony and natural talents",
            AspectType::Opposition => {
                "Planets facing each other, representing balance and awareness"
            }
        }
    }

    pub fn style(self) -> AspectStyle {
        let (color, symbol) = match self {
            AspectType::Conjunction => ("yellow", "☌"),
            AspectType::Sextile => ("blue", "⚹"),
            AspectType::Square => ("red", "□"),
            AspectType::Trine => ("green", "△"),
            AspectType::Opposition => ("purple", "☍"),
        };
        AspectStyle { color, symbol }
    }

    fn bit(self) -> u8 {
        match self {
            AspectType::Conjunction => 1,
            AspectType::Sextile => 1 << 1,
            AspectType::Square => 1 << 2,
            AspectType::Trine => 1 << 3,
            AspectType::Opposition => 1 << 4,
        }
    }
}

impl fmt::Display for AspectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AspectStyle {
    pub color: &'static str,
    pub symbol: &'static str,
}

/// Classification of a single longitude pair, before body identities are
/// attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AspectMatch {
    pub aspect_type: AspectType,
    pub angle: f64,
    pub orb: f64,
    pub exact: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aspect {
    pub body_a: Body,
    pub body_b: Body,
    pub angle: f64,
    pub aspect_type: AspectType,
    pub orb: f64,
    pub exact: bool,
}

impl Aspect {
    pub fn between(body_a: Body, body_b: Body, m: AspectMatch) -> Self {
        Self {
            body_a,
            body_b,
            angle: m.angle,
            aspect_type: m.aspect_type,
            orb: m.orb,
            exact: m.exact,
        }
    }
}

/// Set of aspect types a caller wants evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AspectSelection {
    mask: u8,
}

impl AspectSelection {
    pub fn none() -> Self {
        Self { mask: 0 }
    }

    pub fn all() -> Self {
        AspectType::PRIORITY.into_iter().collect()
    }

    /// Builds a selection from canonical angles. Angles outside
    /// {0, 60, 90, 120, 180} are ignored.
    pub fn from_angles(angles: &[u32]) -> Self {
        let mut selection = Self::none();
        for &angle in angles {
            match AspectType::from_angle(angle) {
                Some(kind) => selection.insert(kind),
                None => log::debug!("ignoring non-canonical aspect angle {angle}"),
            }
        }
        selection
    }

    pub fn insert(&mut self, kind: AspectType) {
        self.mask |= kind.bit();
    }

    pub fn remove(&mut self, kind: AspectType) {
        self.mask &= !kind.bit();
    }

    /// Adds the type if absent, removes it otherwise.
    pub fn toggle(&mut self, kind: AspectType) {
        self.mask ^= kind.bit();
    }

    pub fn contains(&self, kind: AspectType) -> bool {
        self.mask & kind.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.mask == 0
    }

    /// Selected types in priority order.
    pub fn types(&self) -> impl Iterator<Item = AspectType> + '_ {
        AspectType::PRIORITY
            .into_iter()
            .filter(move |kind| self.contains(*kind))
    }

    pub fn angles(&self) -> Vec<u32> {
        self.types().map(|kind| kind.angle() as u32).collect()
    }
}

impl Default for AspectSelection {
    fn default() -> Self {
        Self::from_angles(&[0, 90, 180])
    }
}

impl FromIterator<AspectType> for AspectSelection {
    fn from_iter<I: IntoIterator<Item = AspectType>>(iter: I) -> Self {
        let mut selection = Self::none();
        for kind in iter {
            selection.insert(kind);
        }
        selection
    }
}

/// One calendar day of computed positions and aspects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EphemerisRecord {
    pub date: NaiveDate,
    pub positions: Vec<Position>,
    pub transit_aspects: Vec<Aspect>,
    pub natal_aspects: Vec<Aspect>,
}
