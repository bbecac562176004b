use std::collections::HashMap;

use crate::model::{Body, RegionKeys, StarSystem};

/// Fallback region when nothing else names a destination's location
pub const OTHER_REGION: &str = "Other";

/// Map of upstream id to display name
pub type IdNameMap = HashMap<u64, String>;

/// Anything with an id and a display name
pub trait Named {
    fn id(&self) -> u64;
    fn name(&self) -> &str;
}

impl Named for Body {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Named for StarSystem {
    fn id(&self) -> u64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Build an id -> name map. On duplicate ids the later entry wins.
pub fn build_id_name_map<'a, N, I>(entities: I) -> IdNameMap
where
    N: Named + 'a,
    I: IntoIterator<Item = &'a N>,
{
    entities
        .into_iter()
        .map(|e| (e.id(), e.name().to_string()))
        .collect()
}

/// Name lookups for one star system's planets, moons and stations
#[derive(Debug, Clone, Default)]
pub struct SystemLookups {
    pub planets: IdNameMap,
    pub moons: IdNameMap,
    pub stations: IdNameMap,
}

impl SystemLookups {
    pub fn new(planets: &[Body], moons: &[Body], stations: &[Body]) -> Self {
        Self {
            planets: build_id_name_map(planets),
            moons: build_id_name_map(moons),
            stations: build_id_name_map(stations),
        }
    }

    /// Resolve a region name: planet, then moon, then station, then orbit name,
    /// then [`OTHER_REGION`]. Misses and empty names fall through to the next source.
    pub fn resolve_region<'a>(&'a self, keys: &'a RegionKeys) -> &'a str {
        let by_id = |map: &'a IdNameMap, id: Option<u64>| {
            id.and_then(|id| map.get(&id))
                .map(String::as_str)
                .filter(|name| !name.is_empty())
        };

        by_id(&self.planets, keys.id_planet)
            .or_else(|| by_id(&self.moons, keys.id_moon))
            .or_else(|| by_id(&self.stations, keys.id_space_station))
            .or_else(|| keys.orbit_name.as_deref().filter(|o| !o.trim().is_empty()))
            .unwrap_or(OTHER_REGION)
    }
}
