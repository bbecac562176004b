//! Merge POIs and outposts into the per-system region tree.
//!
//! Order of operations for one system:
//! 1. keep outposts of this system that are live, visible and have a freight elevator
//! 2. append them after the system's POIs
//! 3. drop every repeat of a name already seen
//! 4. keep only entries available live
//! 5. resolve each entry's region and group names under it

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};

use crate::lookup::SystemLookups;
use crate::model::{Destination, Outpost, PointOfInterest, StarSystem};

/// Region name -> destination names in first-seen order
pub type RegionTree = BTreeMap<String, Vec<String>>;

/// System name -> region tree
pub type DestinationTree = BTreeMap<String, RegionTree>;

/// Outposts of `system_name` that pass all three gating flags
pub fn qualifying_outposts<'a>(
    outposts: &'a [Outpost],
    system_name: &'a str,
) -> impl Iterator<Item = &'a Outpost> + 'a {
    outposts
        .iter()
        .filter(move |o| o.star_system_name == system_name && o.qualifies())
}

/// POIs first, then this system's qualifying outposts.
pub fn merge(pois: Vec<PointOfInterest>, outposts: &[Outpost], system_name: &str) -> Vec<Destination> {
    let mut merged: Vec<Destination> = pois.into_iter().map(Destination::from).collect();
    merged.extend(
        qualifying_outposts(outposts, system_name)
            .cloned()
            .map(Destination::from),
    );
    merged
}

/// Keep the first entry for each name, whatever its source or flags.
pub fn dedup_by_name(destinations: Vec<Destination>) -> Vec<Destination> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut kept: Vec<Destination> = Vec::with_capacity(destinations.len());

    for dest in destinations {
        match seen.entry(dest.name().to_string()) {
            Entry::Vacant(slot) => {
                slot.insert(kept.len());
                kept.push(dest);
            }
            Entry::Occupied(slot) => {
                let first = &kept[*slot.get()];
                // The first entry wins even when it is the unavailable one.
                if !first.is_available_live() && dest.is_available_live() {
                    tracing::debug!(
                        name = dest.name(),
                        kept = first.source(),
                        dropped = dest.source(),
                        "Unavailable entry shadows an available one with the same name"
                    );
                }
            }
        }
    }

    kept
}

/// Build the region tree for one star system.
pub fn aggregate(
    pois: Vec<PointOfInterest>,
    outposts: &[Outpost],
    system: &StarSystem,
    lookups: &SystemLookups,
) -> RegionTree {
    let merged = merge(pois, outposts, &system.name);
    let merged_count = merged.len();
    let unique = dedup_by_name(merged);
    let unique_count = unique.len();

    let mut regions = RegionTree::new();
    let mut listed = 0usize;
    for dest in unique.iter().filter(|d| d.is_available_live()) {
        let region = lookups.resolve_region(dest.region());
        regions
            .entry(region.to_string())
            .or_default()
            .push(dest.name().to_string());
        listed += 1;
    }

    tracing::info!(
        system = %system.name,
        merged = merged_count,
        unique = unique_count,
        listed,
        regions = regions.len(),
        "Aggregated destinations"
    );

    regions
}

/// Sum of every region list across every system
pub fn total_destinations(tree: &DestinationTree) -> usize {
    tree.values()
        .flat_map(|regions| regions.values())
        .map(Vec::len)
        .sum()
}
