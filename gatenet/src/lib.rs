//! gatenet - gate-level netlist connectivity
//!
//! This library models the connectivity graph of a gate-level netlist: gates
//! with named pins, linked by nets that carry at most one driving source and
//! any number of destinations. Every edit keeps the nets and the gate-side pin
//! index in agreement, and a rejected edit changes nothing.
//!
//! # Quick Start
//!
//! ```
//! use gatenet::prelude::*;
//!
//! let mut netlist = Netlist::new(GateLibrary::builtin());
//! let inv = netlist.create_gate("INV", "u1").unwrap();
//! let ff = netlist.create_gate("DFF", "r0").unwrap();
//!
//! let n = netlist.create_net("d").unwrap();
//! let mut net = netlist.net_mut(n).unwrap();
//! net.set_src(inv, "O").unwrap();
//! net.add_dst(ff, "D").unwrap();
//!
//! assert_eq!(netlist.fan_in_net(ff, "D"), Some(n));
//! assert!(netlist.check_integrity().is_empty());
//! ```
//!
//! # Features
//!
//! - **Connectivity protocol**: sources, destinations, boundary flags
//! - **Pin index**: fan-in / fan-out lookups per gate pin
//! - **Gate libraries**: JSON-defined pin contracts, one built in
//! - **Snapshots**: JSON import/export that re-validates on load
//! - **Graph view**: petgraph-based traversal and loop detection

pub mod core;
pub mod data;
pub mod endpoint;
pub mod graph;
pub mod ids;
pub mod library;
pub mod netlist;
pub mod snapshot;

// Re-export main types
pub use crate::core::{ConnectivityError, NetlistConfig, NetlistError, PinRole};
pub use data::{DataContainer, DataEntry};
pub use endpoint::Endpoint;
pub use graph::{ConnectivityGraph, GraphStats, NetEdge};
pub use ids::{GateId, IdRegistry, NetId};
pub use library::{GateLibrary, GateType, PinDirection};
pub use netlist::{Gate, IntegrityIssue, IntegrityIssueKind, Net, NetMut, Netlist, NetlistStats};
pub use snapshot::NetlistSnapshot;

/// Load a snapshot file and rebuild the netlist (convenience wrapper).
pub fn load_netlist(path: &std::path::Path, library: GateLibrary) -> Result<Netlist, NetlistError> {
    let snapshot = NetlistSnapshot::load(path)?;
    Netlist::from_snapshot(&snapshot, library)
}

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{
        ConnectivityError, Endpoint, GateId, GateLibrary, NetId, Netlist, NetlistError, PinRole,
    };
}
