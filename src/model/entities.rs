use serde::{Deserialize, Serialize};
use std::fmt;

use super::fields;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StarSystem {
    #[serde(deserialize_with = "fields::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "fields::string")]
    pub name: String,
}

/// A planet, moon or space station. All three share the same shape upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Body {
    #[serde(deserialize_with = "fields::id")]
    pub id: u64,
    #[serde(default, deserialize_with = "fields::string")]
    pub name: String,
    #[serde(default, deserialize_with = "fields::optional_id")]
    pub id_star_system: Option<u64>,
}

pub type Planet = Body;
pub type Moon = Body;
pub type SpaceStation = Body;

/// Fields used to place a destination under a region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RegionKeys {
    #[serde(default, deserialize_with = "fields::optional_id")]
    pub id_planet: Option<u64>,
    #[serde(default, deserialize_with = "fields::optional_id")]
    pub id_moon: Option<u64>,
    #[serde(default, deserialize_with = "fields::optional_id")]
    pub id_space_station: Option<u64>,
    #[serde(default, deserialize_with = "fields::optional_string")]
    pub orbit_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: String,
    #[serde(flatten)]
    pub region: RegionKeys,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_available_live: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outpost {
    #[serde(default, deserialize_with = "fields::string")]
    pub name: String,
    #[serde(default, deserialize_with = "fields::string")]
    pub star_system_name: String,
    #[serde(flatten)]
    pub region: RegionKeys,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_available_live: u8,
    #[serde(default, deserialize_with = "fields::flag")]
    pub is_visible: u8,
    #[serde(default, deserialize_with = "fields::flag")]
    pub has_freight_elevator: u8,
}

impl Outpost {
    /// Live, visible and served by a freight elevator.
    pub fn qualifies(&self) -> bool {
        self.is_available_live == 1 && self.is_visible == 1 && self.has_freight_elevator == 1
    }
}

/// A POI or an outpost once both have entered the shared merge path.
#[derive(Debug, Clone, PartialEq)]
pub enum Destination {
    Poi(PointOfInterest),
    Outpost(Outpost),
}

impl Destination {
    pub fn name(&self) -> &str {
        match self {
            Destination::Poi(p) => &p.name,
            Destination::Outpost(o) => &o.name,
        }
    }

    pub fn region(&self) -> &RegionKeys {
        match self {
            Destination::Poi(p) => &p.region,
            Destination::Outpost(o) => &o.region,
        }
    }

    pub fn is_available_live(&self) -> bool {
        match self {
            Destination::Poi(p) => p.is_available_live == 1,
            Destination::Outpost(o) => o.is_available_live == 1,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            Destination::Poi(_) => "poi",
            Destination::Outpost(_) => "outpost",
        }
    }
}

impl From<PointOfInterest> for Destination {
    fn from(poi: PointOfInterest) -> Self {
        Destination::Poi(poi)
    }
}

impl From<Outpost> for Destination {
    fn from(outpost: Outpost) -> Self {
        Destination::Outpost(outpost)
    }
}

/// Kind of parent a POI query is filtered by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParentKind {
    Planet,
    Moon,
    SpaceStation,
    StarSystem,
}

impl ParentKind {
    /// Query parameter the POI endpoint filters on for this parent kind
    pub fn query_key(&self) -> &'static str {
        match self {
            ParentKind::Planet => "id_planet",
            ParentKind::Moon => "id_moon",
            ParentKind::SpaceStation => "id_space_station",
            ParentKind::StarSystem => "id_star_system",
        }
    }
}

impl fmt::Display for ParentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParentKind::Planet => write!(f, "planet"),
            ParentKind::Moon => write!(f, "moon"),
            ParentKind::SpaceStation => write!(f, "space station"),
            ParentKind::StarSystem => write!(f, "star system"),
        }
    }
}

/// Identifies the parent entity of a single POI request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParentRef {
    pub kind: ParentKind,
    pub id: u64,
    pub name: String,
}

impl ParentRef {
    pub fn new(kind: ParentKind, id: u64, name: impl Into<String>) -> Self {
        Self {
            kind,
            id,
            name: name.into(),
        }
    }
}

impl fmt::Display for ParentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.kind, self.id, self.name)
    }
}
