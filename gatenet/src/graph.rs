//! Connectivity Graph
//!
//! A read-only, gate-to-gate view of a netlist built on petgraph. Each gate
//! becomes a node; every (source endpoint, destination endpoint) pair of a net
//! becomes a directed edge. The view is a snapshot: edit the netlist, then
//! rebuild.
//!
//! Useful for:
//! - Fan-out / fan-in traversal
//! - Path finding between gates
//! - Detecting combinational loops

use petgraph::algo::{astar, is_cyclic_directed};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::Direction;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

use crate::ids::{GateId, NetId};
use crate::netlist::Netlist;

/// Edge payload: which net and pins carry the connection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetEdge {
    pub net: NetId,
    pub src_pin: String,
    pub dst_pin: String,
}

#[derive(Debug, Clone)]
pub struct ConnectivityGraph {
    graph: DiGraph<GateId, NetEdge>,
    gate_indices: HashMap<GateId, NodeIndex>,
}

impl ConnectivityGraph {
    pub fn from_netlist(netlist: &Netlist) -> Self {
        let mut graph = DiGraph::new();
        let mut gate_indices = HashMap::new();

        // Pass 1: one node per gate
        for gate in netlist.gates() {
            let idx = graph.add_node(gate.id());
            gate_indices.insert(gate.id(), idx);
        }

        // Pass 2: edges from each net's driver to each receiver
        for net in netlist.nets() {
            let Some(src) = net.src() else {
                continue;
            };
            let Some(&from) = gate_indices.get(&src.gate) else {
                continue;
            };
            for dst in net.dsts_iter() {
                if let Some(&to) = gate_indices.get(&dst.gate) {
                    graph.add_edge(
                        from,
                        to,
                        NetEdge {
                            net: net.id(),
                            src_pin: src.pin.clone(),
                            dst_pin: dst.pin.clone(),
                        },
                    );
                }
            }
        }

        Self {
            graph,
            gate_indices,
        }
    }

    /// Gates directly fed by `gate`.
    pub fn successors(&self, gate: GateId) -> BTreeSet<GateId> {
        self.neighbors(gate, Direction::Outgoing)
    }

    /// Gates directly feeding `gate`.
    pub fn predecessors(&self, gate: GateId) -> BTreeSet<GateId> {
        self.neighbors(gate, Direction::Incoming)
    }

    /// Connections leaving `gate`, as `(receiver, edge)` pairs.
    pub fn fan_out(&self, gate: GateId) -> Vec<(GateId, &NetEdge)> {
        let Some(&idx) = self.gate_indices.get(&gate) else {
            return Vec::new();
        };
        self.graph
            .edges_directed(idx, Direction::Outgoing)
            .map(|e| (self.graph[e.target()], e.weight()))
            .collect()
    }

    /// Shortest gate path from `from` to `to`, both ends included.
    pub fn find_path(&self, from: GateId, to: GateId) -> Option<Vec<GateId>> {
        let from_idx = *self.gate_indices.get(&from)?;
        let to_idx = *self.gate_indices.get(&to)?;

        astar(&self.graph, from_idx, |n| n == to_idx, |_| 1, |_| 0)
            .map(|(_, path)| path.into_iter().map(|idx| self.graph[idx]).collect())
    }

    /// True if no signal path loops back on itself.
    pub fn is_acyclic(&self) -> bool {
        !is_cyclic_directed(&self.graph)
    }

    pub fn stats(&self) -> GraphStats {
        let sources = self
            .graph
            .node_indices()
            .filter(|&n| self.graph.edges_directed(n, Direction::Incoming).next().is_none())
            .count();
        let sinks = self
            .graph
            .node_indices()
            .filter(|&n| self.graph.edges_directed(n, Direction::Outgoing).next().is_none())
            .count();

        GraphStats {
            gate_count: self.graph.node_count(),
            edge_count: self.graph.edge_count(),
            source_gate_count: sources,
            sink_gate_count: sinks,
        }
    }

    fn neighbors(&self, gate: GateId, dir: Direction) -> BTreeSet<GateId> {
        let Some(&idx) = self.gate_indices.get(&gate) else {
            return BTreeSet::new();
        };
        self.graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n])
            .collect()
    }
}

/// Statistics about a connectivity graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStats {
    pub gate_count: usize,
    pub edge_count: usize,
    /// Gates with no incoming connection
    pub source_gate_count: usize,
    /// Gates with no outgoing connection
    pub sink_gate_count: usize,
}
