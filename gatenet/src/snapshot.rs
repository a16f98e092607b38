//! Netlist Snapshot Format
//!
//! A JSON document holding everything needed to rebuild a netlist: gates
//! with their ids and types, and nets with id, name, source, destinations in
//! order, and both boundary flags. Importing replays each endpoint through the
//! normal editing path, so a document that would break a connectivity rule is
//! rejected instead of loaded.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::core::{NetlistConfig, NetlistError};
use crate::data::DataContainer;
use crate::endpoint::Endpoint;
use crate::ids::{GateId, NetId};
use crate::library::GateLibrary;
use crate::netlist::Netlist;

pub const SCHEMA_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    #[serde(default)]
    pub design_name: String,
    #[serde(default)]
    pub device_name: String,
    /// Name of the gate library the gate types refer to
    pub gate_library: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_schema_version")]
    pub schema_version: String,
}

fn default_schema_version() -> String {
    SCHEMA_VERSION.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    pub id: GateId,
    pub name: String,
    pub gate_type: String,
    #[serde(default, skip_serializing_if = "DataContainer::is_empty")]
    pub data: DataContainer,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NetRecord {
    pub id: NetId,
    #[serde(default)]
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<Endpoint>,
    #[serde(default)]
    pub dsts: Vec<Endpoint>,
    #[serde(default)]
    pub global_input: bool,
    #[serde(default)]
    pub global_output: bool,
    #[serde(default, skip_serializing_if = "DataContainer::is_empty")]
    pub data: DataContainer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetlistSnapshot {
    pub metadata: SnapshotMetadata,
    #[serde(default)]
    pub gates: Vec<GateRecord>,
    #[serde(default)]
    pub nets: Vec<NetRecord>,
}

impl NetlistSnapshot {
    pub fn from_json_str(json: &str) -> Result<Self, NetlistError> {
        let snapshot: Self = serde_json::from_str(json)?;
        if snapshot.metadata.schema_version != SCHEMA_VERSION {
            return Err(NetlistError::Snapshot(format!(
                "unsupported schema version {}",
                snapshot.metadata.schema_version
            )));
        }
        Ok(snapshot)
    }

    pub fn to_json_string(&self) -> Result<String, NetlistError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> Result<Self, NetlistError> {
        let content = std::fs::read_to_string(path)?;
        let snapshot = Self::from_json_str(&content)?;
        tracing::info!(
            "Loaded snapshot {} ({} gates, {} nets)",
            path.display(),
            snapshot.gates.len(),
            snapshot.nets.len()
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: &Path) -> Result<(), NetlistError> {
        std::fs::write(path, self.to_json_string()?)?;
        tracing::info!("Wrote snapshot {}", path.display());
        Ok(())
    }
}

impl Netlist {
    /// Capture the netlist as a serializable document.
    pub fn to_snapshot(&self) -> NetlistSnapshot {
        let gates = self
            .gates()
            .map(|g| GateRecord {
                id: g.id(),
                name: g.name().to_string(),
                gate_type: g.type_name().to_string(),
                data: g.data().clone(),
            })
            .collect();

        let nets = self
            .nets()
            .map(|n| NetRecord {
                id: n.id(),
                name: n.name().to_string(),
                src: n.src().cloned(),
                dsts: n.dsts(),
                global_input: n.is_global_input_net(),
                global_output: n.is_global_output_net(),
                data: n.data().clone(),
            })
            .collect();

        NetlistSnapshot {
            metadata: SnapshotMetadata {
                design_name: self.design_name().to_string(),
                device_name: self.device_name().to_string(),
                gate_library: self.library().name().to_string(),
                timestamp: Utc::now(),
                schema_version: default_schema_version(),
            },
            gates,
            nets,
        }
    }

    /// Rebuild a netlist from a snapshot against `library`.
    pub fn from_snapshot(snapshot: &NetlistSnapshot, library: GateLibrary) -> Result<Self, NetlistError> {
        if snapshot.metadata.gate_library != library.name() {
            tracing::warn!(
                "Snapshot was written against gate library '{}', loading with '{}'",
                snapshot.metadata.gate_library,
                library.name()
            );
        }

        let config = NetlistConfig {
            design_name: snapshot.metadata.design_name.clone(),
            device_name: snapshot.metadata.device_name.clone(),
            ..NetlistConfig::default()
        };
        let mut netlist = Netlist::with_config(library, config);

        for record in &snapshot.gates {
            let id = netlist.create_gate_with_id(record.id.raw(), &record.gate_type, record.name.clone())?;
            if let Some(gate) = netlist.gate_mut(id) {
                *gate.data_mut() = record.data.clone();
            }
        }

        for record in &snapshot.nets {
            let id = netlist.create_net_with_id(record.id.raw(), record.name.clone())?;
            let mut net = netlist.net_mut(id).ok_or(NetlistError::UnknownNet(id))?;
            if let Some(src) = &record.src {
                net.set_src_endpoint(src)?;
            }
            for dst in &record.dsts {
                net.add_dst_endpoint(dst)?;
            }
            if record.global_input {
                net.mark_global_input_net();
            }
            if record.global_output {
                net.mark_global_output_net();
            }
            *net.data_mut() = record.data.clone();
        }

        tracing::info!(
            "Imported netlist '{}' with {} gates and {} nets",
            netlist.design_name(),
            snapshot.gates.len(),
            snapshot.nets.len()
        );
        Ok(netlist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConnectivityError;

    fn sample() -> Netlist {
        let mut nl = Netlist::new(GateLibrary::builtin());
        nl.set_design_name("top");
        let drv = nl.create_gate("BUF", "drv").unwrap();
        let a = nl.create_gate("AND2", "a").unwrap();
        let b = nl.create_gate("AND2", "b").unwrap();
        nl.gate_mut(a)
            .unwrap()
            .data_mut()
            .set_data("generic", "LOC", "string", "X1Y1");

        let n = nl.create_net("sig").unwrap();
        let mut net = nl.net_mut(n).unwrap();
        net.set_src(drv, "O").unwrap();
        net.add_dst(b, "I1").unwrap();
        net.add_dst(a, "I0").unwrap();
        net.mark_global_output_net();
        net.data_mut().set_data("generic", "keep", "bool", "true");

        nl.create_net("floating").unwrap();
        nl
    }

    #[test]
    fn test_snapshot_round_trip_preserves_every_field() {
        let original = sample();
        let json = original.to_snapshot().to_json_string().unwrap();
        let snapshot = NetlistSnapshot::from_json_str(&json).unwrap();
        let restored = Netlist::from_snapshot(&snapshot, GateLibrary::builtin()).unwrap();

        assert_eq!(restored.design_name(), "top");
        assert_eq!(restored.stats(), original.stats());
        for net in original.nets() {
            let other = restored.net(net.id()).unwrap();
            assert_eq!(other.name(), net.name());
            assert_eq!(other.src(), net.src());
            assert_eq!(other.dsts(), net.dsts());
            assert_eq!(other.is_global_input_net(), net.is_global_input_net());
            assert_eq!(other.is_global_output_net(), net.is_global_output_net());
            assert_eq!(other.data(), net.data());
        }
        for gate in original.gates() {
            let other = restored.gate(gate.id()).unwrap();
            assert_eq!(other.name(), gate.name());
            assert_eq!(other.data(), gate.data());
        }
        assert!(restored.check_integrity().is_empty());
    }

    #[test]
    fn test_invalid_snapshot_is_rejected() {
        let mut snapshot = sample().to_snapshot();
        let dup = snapshot.nets[0].dsts[0].clone();
        snapshot.nets[0].dsts.push(dup);

        let err = Netlist::from_snapshot(&snapshot, GateLibrary::builtin()).unwrap_err();
        assert!(matches!(
            err,
            NetlistError::Connectivity(ConnectivityError::DuplicateDestination { .. })
        ));
    }

    #[test]
    fn test_unknown_schema_version() {
        let mut snapshot = sample().to_snapshot();
        snapshot.metadata.schema_version = "9.9".into();
        let json = serde_json::to_string(&snapshot).unwrap();

        assert!(matches!(
            NetlistSnapshot::from_json_str(&json),
            Err(NetlistError::Snapshot(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("top.json");
        sample().to_snapshot().save(&path).unwrap();

        let snapshot = NetlistSnapshot::load(&path).unwrap();
        assert_eq!(snapshot.gates.len(), 3);
        assert_eq!(snapshot.nets.len(), 2);
    }
}
