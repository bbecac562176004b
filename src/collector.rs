use futures::stream::{self, StreamExt};

use crate::error::Error;
use crate::model::{Body, ParentKind, ParentRef, PointOfInterest, StarSystem};
use crate::upstream::{ResourceClient, Transport};

pub const DEFAULT_CONCURRENCY: usize = 8;

/// Gathers every POI for one star system.
///
/// Four groups are fetched concurrently (per planet, per moon, per station and
/// one system-wide query). Results are concatenated in that order no matter
/// which request finishes first. A failed request for one parent is logged and
/// contributes nothing; it never aborts its siblings.
pub struct PoiCollector<'a, T> {
    client: &'a ResourceClient<T>,
    concurrency: usize,
}

impl<'a, T: Transport> PoiCollector<'a, T> {
    pub fn new(client: &'a ResourceClient<T>, concurrency: usize) -> Self {
        Self {
            client,
            concurrency: concurrency.max(1),
        }
    }

    pub async fn collect(
        &self,
        system: &StarSystem,
        planets: &[Body],
        moons: &[Body],
        stations: &[Body],
    ) -> Vec<PointOfInterest> {
        let system_parent = vec![ParentRef::new(ParentKind::StarSystem, system.id, &system.name)];

        let (from_planets, from_moons, from_stations, from_system) = futures::join!(
            self.fetch_group(parents(ParentKind::Planet, planets)),
            self.fetch_group(parents(ParentKind::Moon, moons)),
            self.fetch_group(parents(ParentKind::SpaceStation, stations)),
            self.fetch_group(system_parent),
        );

        tracing::info!(
            system = %system.name,
            planets = from_planets.len(),
            moons = from_moons.len(),
            stations = from_stations.len(),
            system_level = from_system.len(),
            "Collected POIs"
        );

        let mut pois = from_planets;
        pois.extend(from_moons);
        pois.extend(from_stations);
        pois.extend(from_system);
        pois
    }

    /// Fetch POIs for each parent with bounded concurrency, yielding results in parent order.
    async fn fetch_group(&self, parents: Vec<ParentRef>) -> Vec<PointOfInterest> {
        let client = self.client;

        stream::iter(parents)
            .map(|parent| async move {
                match client.points_of_interest(parent.kind, parent.id).await {
                    Ok(pois) => pois,
                    Err(source) => {
                        let err = Error::PartialFetch {
                            parent,
                            source: Box::new(source),
                        };
                        tracing::warn!("{}, skipping", err);
                        Vec::new()
                    }
                }
            })
            .buffered(self.concurrency)
            .concat()
            .await
    }
}

fn parents(kind: ParentKind, bodies: &[Body]) -> Vec<ParentRef> {
    bodies
        .iter()
        .map(|b| ParentRef::new(kind, b.id, &b.name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::{MemoryTransport, POINTS_OF_INTEREST};
    use serde_json::json;
    use std::time::Duration;

    fn body(id: u64, name: &str) -> Body {
        Body {
            id,
            name: name.to_string(),
            id_star_system: Some(1),
        }
    }

    fn poi(name: &str) -> serde_json::Value {
        json!({ "name": name, "is_available_live": 1 })
    }

    fn names(pois: &[PointOfInterest]) -> Vec<&str> {
        pois.iter().map(|p| p.name.as_str()).collect()
    }

    fn system() -> StarSystem {
        StarSystem {
            id: 1,
            name: "Stanton".into(),
        }
    }

    #[tokio::test]
    async fn test_concatenation_order_ignores_completion_order() {
        let transport = MemoryTransport::new()
            .respond_data(POINTS_OF_INTEREST, &[("id_planet", 10)], &[poi("P10")])
            .respond_data(POINTS_OF_INTEREST, &[("id_planet", 11)], &[poi("P11a"), poi("P11b")])
            .respond_data(POINTS_OF_INTEREST, &[("id_moon", 20)], &[poi("M20")])
            .respond_data(POINTS_OF_INTEREST, &[("id_space_station", 30)], &[poi("S30")])
            .respond_data(POINTS_OF_INTEREST, &[("id_star_system", 1)], &[poi("Sys")])
            // Slow the first groups down so later ones finish first.
            .delay(POINTS_OF_INTEREST, &[("id_planet", 10)], Duration::from_millis(30))
            .delay(POINTS_OF_INTEREST, &[("id_moon", 20)], Duration::from_millis(20));
        let client = ResourceClient::new(transport);
        let collector = PoiCollector::new(&client, 4);

        let pois = collector
            .collect(
                &system(),
                &[body(10, "Hurston"), body(11, "Crusader")],
                &[body(20, "Daymar")],
                &[body(30, "Port Olisar")],
            )
            .await;

        assert_eq!(names(&pois), vec!["P10", "P11a", "P11b", "M20", "S30", "Sys"]);
    }

    #[tokio::test]
    async fn test_failed_parent_does_not_abort_siblings() {
        let transport = MemoryTransport::new()
            .respond(POINTS_OF_INTEREST, &[("id_planet", 10)], r#"{"status": "error"}"#)
            .respond_data(POINTS_OF_INTEREST, &[("id_planet", 11)], &[poi("P11")])
            .respond_data(POINTS_OF_INTEREST, &[("id_star_system", 1)], &[poi("Sys")]);
        // Moon 20 has no route at all and fails like a missing page.
        let client = ResourceClient::new(transport);
        let collector = PoiCollector::new(&client, 2);

        let pois = collector
            .collect(
                &system(),
                &[body(10, "Hurston"), body(11, "Crusader")],
                &[body(20, "Daymar")],
                &[],
            )
            .await;

        assert_eq!(names(&pois), vec!["P11", "Sys"]);
    }

    #[tokio::test]
    async fn test_system_without_children_only_queries_system() {
        let transport = MemoryTransport::new()
            .respond_data(POINTS_OF_INTEREST, &[("id_star_system", 1)], &[poi("Sys")]);
        let client = ResourceClient::new(transport);

        let pois = PoiCollector::new(&client, 0)
            .collect(&system(), &[], &[], &[])
            .await;

        assert_eq!(names(&pois), vec!["Sys"]);
        assert_eq!(client.transport().requests(), vec!["poi?id_star_system=1"]);
    }
}
