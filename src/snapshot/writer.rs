use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::sink::Sink;
use crate::aggregate::{total_destinations, DestinationTree};
use crate::error::{Error, Result};
use crate::model::Commodity;

pub const RESOURCES_FILE: &str = "resources.json";
pub const DESTINATIONS_FILE: &str = "destinations.json";

/// Name of the dated commodity audit file, one per UTC day
pub fn audit_file_name(date: NaiveDate) -> String {
    format!("commodities_{}.json", date.format("%Y-%m-%d"))
}

/// Layout of `destinations.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DestinationsSnapshot {
    #[serde(default)]
    pub last_updated: String,
    /// Recomputed on every write; a file without it can still be recounted
    #[serde(default)]
    pub total_destinations: usize,
    pub hierarchical: DestinationTree,
    /// Keys we do not manage, carried through a recount untouched
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Layout of `resources.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourcesSnapshot {
    pub last_updated: String,
    pub total_commodities: usize,
    pub commodities: Vec<String>,
}

/// Layout of the dated commodity audit file
#[derive(Debug, Serialize)]
pub struct CommodityAudit<'a> {
    pub timestamp: String,
    pub total_commodities: usize,
    pub filtered_commodities: usize,
    pub commodities: &'a [String],
    pub all_commodities: &'a [Commodity],
}

/// Serializes snapshots into a [`Sink`], stamping them with a fixed run time
pub struct SnapshotWriter<S> {
    sink: S,
    now: DateTime<Utc>,
}

impl<S: Sink> SnapshotWriter<S> {
    pub fn new(sink: S) -> Self {
        Self::at(sink, Utc::now())
    }

    /// Writer with a pinned clock
    pub fn at(sink: S, now: DateTime<Utc>) -> Self {
        Self { sink, now }
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    fn timestamp(&self) -> String {
        self.now.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn write_json<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(value)?;
        self.sink.write(name, &bytes)
    }

    /// Overwrite `destinations.json`. Returns the recomputed total.
    pub fn write_tree(&self, tree: DestinationTree) -> Result<usize> {
        let total = total_destinations(&tree);
        let snapshot = DestinationsSnapshot {
            last_updated: self.timestamp(),
            total_destinations: total,
            hierarchical: tree,
            extra: Map::new(),
        };
        self.write_json(DESTINATIONS_FILE, &snapshot)?;
        tracing::info!(file = DESTINATIONS_FILE, total, "Wrote destinations");
        Ok(total)
    }

    /// Overwrite `resources.json` with the names sorted. Returns the count.
    pub fn write_commodities(&self, mut names: Vec<String>) -> Result<usize> {
        names.sort();
        let snapshot = ResourcesSnapshot {
            last_updated: self.timestamp(),
            total_commodities: names.len(),
            commodities: names,
        };
        self.write_json(RESOURCES_FILE, &snapshot)?;
        tracing::info!(
            file = RESOURCES_FILE,
            total = snapshot.total_commodities,
            "Wrote commodities"
        );
        Ok(snapshot.total_commodities)
    }

    /// Write the dated audit file holding kept names and every fetched commodity.
    /// Returns the file name.
    pub fn write_commodity_audit(&self, kept: &[String], all: &[Commodity]) -> Result<String> {
        let name = audit_file_name(self.now.date_naive());
        let audit = CommodityAudit {
            timestamp: self.timestamp(),
            total_commodities: all.len(),
            filtered_commodities: kept.len(),
            commodities: kept,
            all_commodities: all,
        };
        self.write_json(&name, &audit)?;
        tracing::info!(file = %name, "Saved detailed commodity data");
        Ok(name)
    }

    /// Re-read `destinations.json`, recompute its total and refresh its timestamp.
    pub fn recount(&self) -> Result<usize> {
        let bytes = self.sink.read(DESTINATIONS_FILE)?;
        let mut snapshot: DestinationsSnapshot =
            serde_json::from_slice(&bytes).map_err(Error::Serialize)?;

        let total = total_destinations(&snapshot.hierarchical);
        if total != snapshot.total_destinations {
            tracing::info!(
                previous = snapshot.total_destinations,
                total,
                "Stored destination total was stale"
            );
        }
        snapshot.total_destinations = total;
        snapshot.last_updated = self.timestamp();

        self.write_json(DESTINATIONS_FILE, &snapshot)?;
        tracing::info!(file = DESTINATIONS_FILE, total, "Recounted destinations");
        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MemorySink;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn read_json(sink: &MemorySink, name: &str) -> Value {
        serde_json::from_slice(&sink.get(name).unwrap()).unwrap()
    }

    #[test]
    fn test_write_tree_counts_and_stamps() {
        let writer = SnapshotWriter::at(MemorySink::new(), fixed_now());
        let mut tree = DestinationTree::new();
        tree.entry("Stanton".into()).or_default().insert(
            "Hurston".into(),
            vec!["Lorville".into(), "HDMS-Edmond".into()],
        );
        tree.entry("Pyro".into())
            .or_default()
            .insert("Other".into(), vec!["Ruin Station".into()]);

        assert_eq!(writer.write_tree(tree).unwrap(), 3);

        let json = read_json(writer.sink(), DESTINATIONS_FILE);
        assert_eq!(json["total_destinations"], 3);
        assert_eq!(json["last_updated"], "2026-03-14T09:30:00.000Z");
        assert_eq!(json["hierarchical"]["Stanton"]["Hurston"][1], "HDMS-Edmond");
    }

    #[test]
    fn test_commodities_sorted() {
        let writer = SnapshotWriter::at(MemorySink::new(), fixed_now());
        let names = vec!["Titanium".to_string(), "Agricium".into(), "Laranite".into()];

        assert_eq!(writer.write_commodities(names).unwrap(), 3);

        let snapshot: ResourcesSnapshot =
            serde_json::from_slice(&writer.sink().get(RESOURCES_FILE).unwrap()).unwrap();
        assert_eq!(snapshot.commodities, vec!["Agricium", "Laranite", "Titanium"]);
        assert_eq!(snapshot.total_commodities, 3);
    }

    #[test]
    fn test_audit_file_is_dated() {
        let writer = SnapshotWriter::at(MemorySink::new(), fixed_now());
        let all = vec![Commodity {
            name: "WiDoW".into(),
            code: "WIDO".into(),
            is_visible: 0,
            is_available: 1,
            is_illegal: 1,
            is_temporary: 0,
        }];

        let name = writer.write_commodity_audit(&[], &all).unwrap();
        assert_eq!(name, "commodities_2026-03-14.json");

        let json = read_json(writer.sink(), &name);
        assert_eq!(json["total_commodities"], 1);
        assert_eq!(json["filtered_commodities"], 0);
        assert_eq!(json["all_commodities"][0]["is_illegal"], 1);
        assert_eq!(json["all_commodities"][0]["code"], "WIDO");
    }

    #[test]
    fn test_recount_fixes_stale_total_and_keeps_extra_keys() {
        let sink = MemorySink::new();
        sink.write(
            DESTINATIONS_FILE,
            br#"{
                "last_updated": "2020-01-01T00:00:00.000Z",
                "total_destinations": 99,
                "hierarchical": {"Stanton": {"Hurston": ["Lorville"], "Other": ["A", "B"]}},
                "notes": "hand edited"
            }"#,
        )
        .unwrap();

        let writer = SnapshotWriter::at(&sink, fixed_now());
        assert_eq!(writer.recount().unwrap(), 3);

        let json = read_json(&sink, DESTINATIONS_FILE);
        assert_eq!(json["total_destinations"], 3);
        assert_eq!(json["last_updated"], "2026-03-14T09:30:00.000Z");
        assert_eq!(json["notes"], "hand edited");
    }

    #[test]
    fn test_recount_accepts_tree_only_file() {
        let sink = MemorySink::new();
        sink.write(
            DESTINATIONS_FILE,
            br#"{"hierarchical": {"Pyro": {"Other": ["Ruin Station"], "Pyro I": ["Checkmate", "Orbituary"]}}}"#,
        )
        .unwrap();

        let writer = SnapshotWriter::at(&sink, fixed_now());
        assert_eq!(writer.recount().unwrap(), 3);

        let json = read_json(&sink, DESTINATIONS_FILE);
        assert_eq!(json["total_destinations"], 3);
        assert_eq!(json["last_updated"], "2026-03-14T09:30:00.000Z");
        assert_eq!(json["hierarchical"]["Pyro"]["Pyro I"][1], "Orbituary");
    }

    #[test]
    fn test_recount_without_file_fails() {
        let writer = SnapshotWriter::at(MemorySink::new(), fixed_now());
        assert!(matches!(writer.recount(), Err(Error::Read { .. })));
    }
}
