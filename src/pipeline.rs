use crate::aggregate::{aggregate, DestinationTree};
use crate::collector::{PoiCollector, DEFAULT_CONCURRENCY};
use crate::error::Result;
use crate::filter::{filter_commodities, log_commodity_summary};
use crate::lookup::{build_id_name_map, IdNameMap, SystemLookups};
use crate::model::{Body, StarSystem};
use crate::snapshot::{Sink, SnapshotWriter};
use crate::upstream::{ResourceClient, Transport};

/// Star systems aggregated when none are configured
pub const DEFAULT_SYSTEMS: &[&str] = &["Stanton", "Pyro"];

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Star system names to aggregate, processed in this order.
    /// The written tree is keyed by name and serializes sorted.
    pub systems: Vec<String>,
    /// Max in-flight POI requests per fetch group
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            systems: DEFAULT_SYSTEMS.iter().map(|s| s.to_string()).collect(),
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommodityReport {
    pub fetched: usize,
    pub kept: usize,
    pub audit_file: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub commodities: CommodityReport,
    pub destinations: usize,
}

/// Fetch, aggregate and write. Transport and sink are injected.
pub struct Pipeline<T, S> {
    client: ResourceClient<T>,
    writer: SnapshotWriter<S>,
    config: PipelineConfig,
}

impl<T: Transport, S: Sink> Pipeline<T, S> {
    pub fn new(transport: T, sink: S, config: PipelineConfig) -> Self {
        Self::with_writer(transport, SnapshotWriter::new(sink), config)
    }

    pub fn with_writer(transport: T, writer: SnapshotWriter<S>, config: PipelineConfig) -> Self {
        Self {
            client: ResourceClient::new(transport),
            writer,
            config,
        }
    }

    pub fn client(&self) -> &ResourceClient<T> {
        &self.client
    }

    pub fn writer(&self) -> &SnapshotWriter<S> {
        &self.writer
    }

    fn is_selected(&self, name: &str) -> bool {
        self.config.systems.iter().any(|s| s == name)
    }

    /// Every upstream star system, flagged when it is in the configured allow-list
    pub async fn list_systems(&self) -> Result<Vec<(StarSystem, bool)>> {
        let systems = self.client.star_systems().await?;
        Ok(systems
            .into_iter()
            .map(|s| {
                let selected = self.is_selected(&s.name);
                (s, selected)
            })
            .collect())
    }

    /// Build the full system -> region -> names tree.
    ///
    /// Star systems and outposts are required; any failure there aborts. Systems
    /// are processed one after another.
    pub async fn build_tree(&self) -> Result<DestinationTree> {
        tracing::info!("Fetching star systems and outposts");
        let systems = self.client.star_systems().await?;
        let system_names = build_id_name_map(&systems);
        let outposts = self.client.outposts().await?;
        tracing::info!(
            systems = systems.len(),
            outposts = outposts.len(),
            "Fetched top-level collections"
        );

        let collector = PoiCollector::new(&self.client, self.config.concurrency);
        let mut tree = DestinationTree::new();

        for name in &self.config.systems {
            let Some(system) = systems.iter().find(|s| &s.name == name) else {
                tracing::warn!(system = %name, "Configured star system not found upstream, skipping");
                continue;
            };

            let (planets, moons, stations) = futures::try_join!(
                self.client.planets(system.id),
                self.client.moons(system.id),
                self.client.space_stations(system.id),
            )?;
            let planets = in_system(planets, system, &system_names);
            let moons = in_system(moons, system, &system_names);
            let stations = in_system(stations, system, &system_names);

            let lookups = SystemLookups::new(&planets, &moons, &stations);
            let pois = collector.collect(system, &planets, &moons, &stations).await;
            let regions = aggregate(pois, &outposts, system, &lookups);

            tree.insert(system.name.clone(), regions);
        }

        Ok(tree)
    }

    /// Build the tree and overwrite `destinations.json`. Returns the total written.
    pub async fn run_destinations(&self) -> Result<usize> {
        let tree = self.build_tree().await?;
        self.writer.write_tree(tree)
    }

    /// Fetch commodities, write `resources.json` and the dated audit file.
    pub async fn run_commodities(&self) -> Result<CommodityReport> {
        tracing::info!("Fetching commodities");
        let all = self.client.commodities().await?;
        let kept = filter_commodities(&all);
        log_commodity_summary(&all, &kept);

        let report = CommodityReport {
            fetched: all.len(),
            kept: kept.len(),
            audit_file: self.writer.write_commodity_audit(&kept, &all)?,
        };
        self.writer.write_commodities(kept)?;
        Ok(report)
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let commodities = self.run_commodities().await?;
        let destinations = self.run_destinations().await?;
        Ok(RunSummary {
            commodities,
            destinations,
        })
    }
}

/// Drop bodies that upstream attached to another star system.
fn in_system(bodies: Vec<Body>, system: &StarSystem, system_names: &IdNameMap) -> Vec<Body> {
    bodies
        .into_iter()
        .filter(|b| match b.id_star_system {
            Some(id) if id != system.id => {
                tracing::debug!(
                    body = %b.name,
                    expected = %system.name,
                    actual = system_names.get(&id).map(String::as_str).unwrap_or("unknown"),
                    "Ignoring body from another star system"
                );
                false
            }
            _ => true,
        })
        .collect()
}
