use serde::de::DeserializeOwned;

use super::envelope::parse_envelope;
use super::transport::{Query, Transport};
use crate::error::Result;
use crate::model::{
    Commodity, Moon, Outpost, ParentKind, Planet, PointOfInterest, SpaceStation, StarSystem,
};

pub const STAR_SYSTEMS: &str = "star_systems";
pub const PLANETS: &str = "planets";
pub const MOONS: &str = "moons";
pub const SPACE_STATIONS: &str = "space_stations";
pub const POINTS_OF_INTEREST: &str = "poi";
pub const OUTPOSTS: &str = "outposts";
pub const COMMODITIES: &str = "commodities";

/// Typed access to each upstream collection
pub struct ResourceClient<T> {
    transport: T,
}

impl<T: Transport> ResourceClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Fetch one collection and unwrap its envelope. A single GET, no retries.
    pub async fn fetch_collection<E: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: Query<'_>,
    ) -> Result<Vec<E>> {
        let body = self.transport.get(endpoint, query).await?;
        let items: Vec<E> = parse_envelope(endpoint, &body)?;
        tracing::debug!(endpoint, ?query, count = items.len(), "Fetched collection");
        Ok(items)
    }

    pub async fn star_systems(&self) -> Result<Vec<StarSystem>> {
        self.fetch_collection(STAR_SYSTEMS, &[]).await
    }

    pub async fn planets(&self, system_id: u64) -> Result<Vec<Planet>> {
        self.fetch_collection(PLANETS, &[("id_star_system", system_id)])
            .await
    }

    pub async fn moons(&self, system_id: u64) -> Result<Vec<Moon>> {
        self.fetch_collection(MOONS, &[("id_star_system", system_id)])
            .await
    }

    pub async fn space_stations(&self, system_id: u64) -> Result<Vec<SpaceStation>> {
        self.fetch_collection(SPACE_STATIONS, &[("id_star_system", system_id)])
            .await
    }

    /// POIs filtered by exactly one parent
    pub async fn points_of_interest(
        &self,
        parent: ParentKind,
        parent_id: u64,
    ) -> Result<Vec<PointOfInterest>> {
        self.fetch_collection(POINTS_OF_INTEREST, &[(parent.query_key(), parent_id)])
            .await
    }

    pub async fn outposts(&self) -> Result<Vec<Outpost>> {
        self.fetch_collection(OUTPOSTS, &[]).await
    }

    pub async fn commodities(&self) -> Result<Vec<Commodity>> {
        self.fetch_collection(COMMODITIES, &[]).await
    }
}
