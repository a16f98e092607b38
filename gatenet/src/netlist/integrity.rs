//! Cross-checks between nets, gates and the pin index.
//!
//! None of these findings can be produced through the public editing API;
//! the check exists to validate imported data and to guard refactors of the
//! internal manager.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use super::Netlist;
use crate::core::PinRole;
use crate::ids::{GateId, NetId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegrityIssueKind {
    /// An endpoint names a gate that is not in the netlist
    DanglingEndpoint,
    /// The same `(gate, pin)` appears twice among a net's destinations
    DuplicateDestination,
    /// A net's source is also one of its destinations
    SourceIsDestination,
    /// The pin cannot play the role it is bound in
    InvalidPin,
    /// A net endpoint has no matching entry in the pin index
    MissingBackReference,
    /// A pin index entry points at a net that does not hold the endpoint
    StaleBackReference,
    /// A boundary flag and the global registry disagree
    RegistryMismatch,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrityIssue {
    pub kind: IntegrityIssueKind,
    pub net: Option<NetId>,
    pub gate: Option<GateId>,
    pub message: String,
}

impl IntegrityIssue {
    fn new(kind: IntegrityIssueKind, net: Option<NetId>, gate: Option<GateId>, message: String) -> Self {
        Self {
            kind,
            net,
            gate,
            message,
        }
    }
}

impl std::fmt::Display for IntegrityIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Netlist {
    /// Verify that every net and the pin index describe the same graph.
    /// An empty result means all connectivity invariants hold.
    pub fn check_integrity(&self) -> Vec<IntegrityIssue> {
        let mut issues = Vec::new();

        for net in self.nets.values() {
            let id = net.id;

            if let Some(src) = &net.source {
                match self.gates.get(&src.gate) {
                    None => issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::DanglingEndpoint,
                        Some(id),
                        Some(src.gate),
                        format!("net {} is driven by missing gate {}", id, src.gate),
                    )),
                    Some(g) if !g.has_output_pin(&src.pin) => issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::InvalidPin,
                        Some(id),
                        Some(src.gate),
                        format!("net {} source {} is not an output pin", id, src),
                    )),
                    Some(_) => {}
                }
                if self.manager.bound_net(PinRole::Source, src.gate, &src.pin) != Some(id) {
                    issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::MissingBackReference,
                        Some(id),
                        Some(src.gate),
                        format!("source {} of net {} is not indexed", src, id),
                    ));
                }
                if net.destinations.contains(src) {
                    issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::SourceIsDestination,
                        Some(id),
                        Some(src.gate),
                        format!("{} is both source and destination of net {}", src, id),
                    ));
                }
            }

            let mut seen = HashSet::new();
            for dst in &net.destinations {
                if !seen.insert(dst) {
                    issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::DuplicateDestination,
                        Some(id),
                        Some(dst.gate),
                        format!("{} listed twice on net {}", dst, id),
                    ));
                }
                match self.gates.get(&dst.gate) {
                    None => issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::DanglingEndpoint,
                        Some(id),
                        Some(dst.gate),
                        format!("net {} feeds missing gate {}", id, dst.gate),
                    )),
                    Some(g) if !g.has_input_pin(&dst.pin) => issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::InvalidPin,
                        Some(id),
                        Some(dst.gate),
                        format!("net {} destination {} is not an input pin", id, dst),
                    )),
                    Some(_) => {}
                }
                if self.manager.bound_net(PinRole::Destination, dst.gate, &dst.pin) != Some(id) {
                    issues.push(IntegrityIssue::new(
                        IntegrityIssueKind::MissingBackReference,
                        Some(id),
                        Some(dst.gate),
                        format!("destination {} of net {} is not indexed", dst, id),
                    ));
                }
            }

            if net.global_input != self.manager.global_inputs().contains(&id)
                || net.global_output != self.manager.global_outputs().contains(&id)
            {
                issues.push(IntegrityIssue::new(
                    IntegrityIssueKind::RegistryMismatch,
                    Some(id),
                    None,
                    format!("boundary flags of net {} disagree with the global registry", id),
                ));
            }
        }

        for (gate, pin, net_id) in self.manager.entries(PinRole::Source) {
            let holds = self
                .nets
                .get(&net_id)
                .and_then(|n| n.source.as_ref())
                .map(|s| s.is(gate, pin))
                .unwrap_or(false);
            if !holds {
                issues.push(IntegrityIssue::new(
                    IntegrityIssueKind::StaleBackReference,
                    Some(net_id),
                    Some(gate),
                    format!("{}:{} is indexed as source of net {} but does not drive it", gate, pin, net_id),
                ));
            }
        }
        for (gate, pin, net_id) in self.manager.entries(PinRole::Destination) {
            let holds = self
                .nets
                .get(&net_id)
                .map(|n| n.destinations.iter().any(|d| d.is(gate, pin)))
                .unwrap_or(false);
            if !holds {
                issues.push(IntegrityIssue::new(
                    IntegrityIssueKind::StaleBackReference,
                    Some(net_id),
                    Some(gate),
                    format!("{}:{} is indexed as destination of net {} but not listed", gate, pin, net_id),
                ));
            }
        }

        let registered = self
            .manager
            .global_inputs()
            .iter()
            .chain(self.manager.global_outputs().iter());
        for id in registered {
            if !self.nets.contains_key(id) {
                issues.push(IntegrityIssue::new(
                    IntegrityIssueKind::RegistryMismatch,
                    Some(*id),
                    None,
                    format!("global registry lists deleted net {}", id),
                ));
            }
        }

        issues
    }
}
