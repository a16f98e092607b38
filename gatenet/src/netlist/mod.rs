//! Netlist Module
//!
//! The netlist owns every gate and net in one arena keyed by id, owns the
//! internal manager that keeps nets and gate pins consistent, and hands out
//! ids. Other code refers to nets and gates by [`NetId`] / [`GateId`] only.
//!
//! Connectivity is edited through [`NetMut`]:
//!
//! ```
//! use gatenet::prelude::*;
//!
//! let mut netlist = Netlist::new(GateLibrary::builtin());
//! let drv = netlist.create_gate("BUF", "drv").unwrap();
//! let ff = netlist.create_gate("DFF", "ff0").unwrap();
//! let clk = netlist.create_net("clk").unwrap();
//!
//! let mut net = netlist.net_mut(clk).unwrap();
//! net.set_src(drv, "O").unwrap();
//! net.add_dst(ff, "CLK").unwrap();
//! assert!(net.add_dst(ff, "CLK").is_err());
//! assert!(!net.is_unrouted());
//! ```

mod gate;
mod integrity;
mod manager;
mod net;

pub use gate::Gate;
pub use integrity::{IntegrityIssue, IntegrityIssueKind};
pub use net::{Net, NetMut};

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::core::{NetlistConfig, NetlistError, PinRole};
use crate::ids::{GateId, IdRegistry, NetId, ReserveError};
use crate::library::GateLibrary;
use gate::GateArena;
use manager::InternalManager;

#[derive(Debug)]
pub struct Netlist {
    config: NetlistConfig,
    library: GateLibrary,
    gates: GateArena,
    nets: BTreeMap<NetId, Net>,
    gate_ids: IdRegistry,
    net_ids: IdRegistry,
    manager: InternalManager,
}

impl Netlist {
    pub fn new(library: GateLibrary) -> Self {
        Self::with_config(library, NetlistConfig::default())
    }

    pub fn with_config(library: GateLibrary, config: NetlistConfig) -> Self {
        let gate_ids = IdRegistry::new(config.first_id, config.reuse_freed_ids);
        let net_ids = IdRegistry::new(config.first_id, config.reuse_freed_ids);
        Self {
            config,
            library,
            gates: GateArena::new(),
            nets: BTreeMap::new(),
            gate_ids,
            net_ids,
            manager: InternalManager::default(),
        }
    }

    pub fn config(&self) -> &NetlistConfig {
        &self.config
    }

    pub fn library(&self) -> &GateLibrary {
        &self.library
    }

    pub fn design_name(&self) -> &str {
        &self.config.design_name
    }

    pub fn set_design_name(&mut self, name: impl Into<String>) {
        self.config.design_name = name.into();
    }

    pub fn device_name(&self) -> &str {
        &self.config.device_name
    }

    pub fn set_device_name(&mut self, name: impl Into<String>) {
        self.config.device_name = name.into();
    }

    // ---- gates ----

    /// Instantiate a gate of a library type under a fresh id.
    pub fn create_gate(
        &mut self,
        gate_type: &str,
        name: impl Into<String>,
    ) -> Result<GateId, NetlistError> {
        let gt = self
            .library
            .gate_type(gate_type)
            .cloned()
            .ok_or_else(|| NetlistError::UnknownGateType(gate_type.to_string()))?;
        let id = GateId::new(self.gate_ids.allocate().ok_or(NetlistError::IdsExhausted("gate"))?);
        if self.gates.contains_key(&id) {
            return Err(NetlistError::DuplicateId(id.raw()));
        }
        self.gates.insert(id, Gate::new(id, name.into(), gt));
        Ok(id)
    }

    /// Instantiate a gate under a caller-chosen id.
    pub fn create_gate_with_id(
        &mut self,
        id: u32,
        gate_type: &str,
        name: impl Into<String>,
    ) -> Result<GateId, NetlistError> {
        let gt = self
            .library
            .gate_type(gate_type)
            .cloned()
            .ok_or_else(|| NetlistError::UnknownGateType(gate_type.to_string()))?;
        self.gate_ids.reserve(id).map_err(|e| reserve_error(e, id))?;
        let id = GateId::new(id);
        self.gates.insert(id, Gate::new(id, name.into(), gt));
        Ok(id)
    }

    /// Remove a gate, detaching it from every net it touches first.
    pub fn delete_gate(&mut self, id: GateId) -> Result<(), NetlistError> {
        if !self.gates.contains_key(&id) {
            return Err(NetlistError::UnknownGate(id));
        }

        for (_, net_id) in self.manager.bound_pins(PinRole::Source, id) {
            if let Some(net) = self.nets.get_mut(&net_id) {
                self.manager.unbind_source(net)?;
            }
        }
        for (pin, net_id) in self.manager.bound_pins(PinRole::Destination, id) {
            if let Some(net) = self.nets.get_mut(&net_id) {
                self.manager.unbind_destination(net, id, &pin)?;
            }
        }

        self.gates.remove(&id);
        self.gate_ids.release(id.raw());
        tracing::debug!("deleted gate {}", id);
        Ok(())
    }

    pub fn gate(&self, id: GateId) -> Option<&Gate> {
        self.gates.get(&id)
    }

    /// Gates hold no connectivity, so plain mutable access is safe.
    pub fn gate_mut(&mut self, id: GateId) -> Option<&mut Gate> {
        self.gates.get_mut(&id)
    }

    pub fn gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.values()
    }

    pub fn gates_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Gate> + 'a {
        self.gates.values().filter(move |g| g.name() == name)
    }

    pub fn is_gate_in_netlist(&self, id: GateId) -> bool {
        self.gates.contains_key(&id)
    }

    // ---- nets ----

    /// Create an unconnected net under a fresh id.
    pub fn create_net(&mut self, name: impl Into<String>) -> Result<NetId, NetlistError> {
        let id = NetId::new(self.net_ids.allocate().ok_or(NetlistError::IdsExhausted("net"))?);
        if self.nets.contains_key(&id) {
            return Err(NetlistError::DuplicateId(id.raw()));
        }
        self.nets.insert(id, Net::new(id, name.into()));
        Ok(id)
    }

    /// Create an unconnected net under a caller-chosen id.
    pub fn create_net_with_id(
        &mut self,
        id: u32,
        name: impl Into<String>,
    ) -> Result<NetId, NetlistError> {
        self.net_ids.reserve(id).map_err(|e| reserve_error(e, id))?;
        let id = NetId::new(id);
        self.nets.insert(id, Net::new(id, name.into()));
        Ok(id)
    }

    /// Remove a net together with all of its endpoints and registry entries.
    pub fn delete_net(&mut self, id: NetId) -> Result<(), NetlistError> {
        let mut net = self.nets.remove(&id).ok_or(NetlistError::UnknownNet(id))?;
        self.manager.detach_net(&mut net);
        self.net_ids.release(id.raw());
        tracing::debug!("deleted net {}", id);
        Ok(())
    }

    pub fn net(&self, id: NetId) -> Option<&Net> {
        self.nets.get(&id)
    }

    /// Borrow a net for editing. The handle holds the whole netlist
    /// exclusively for as long as it lives.
    pub fn net_mut(&mut self, id: NetId) -> Option<NetMut<'_>> {
        let net = self.nets.get_mut(&id)?;
        Some(NetMut {
            net,
            gates: &self.gates,
            manager: &mut self.manager,
        })
    }

    pub fn nets(&self) -> impl Iterator<Item = &Net> {
        self.nets.values()
    }

    pub fn nets_filtered<F>(&self, filter: F) -> Vec<&Net>
    where
        F: Fn(&Net) -> bool,
    {
        self.nets.values().filter(|n| filter(n)).collect()
    }

    pub fn nets_by_name<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Net> + 'a {
        self.nets.values().filter(move |n| n.name() == name)
    }

    pub fn is_net_in_netlist(&self, id: NetId) -> bool {
        self.nets.contains_key(&id)
    }

    pub fn unrouted_nets(&self) -> Vec<&Net> {
        self.nets_filtered(|n| n.is_unrouted())
    }

    // ---- global boundary nets ----

    pub fn global_input_nets(&self) -> Vec<&Net> {
        self.manager
            .global_inputs()
            .iter()
            .filter_map(|id| self.nets.get(id))
            .collect()
    }

    pub fn global_output_nets(&self) -> Vec<&Net> {
        self.manager
            .global_outputs()
            .iter()
            .filter_map(|id| self.nets.get(id))
            .collect()
    }

    pub fn is_global_input_net(&self, id: NetId) -> bool {
        self.manager.global_inputs().contains(&id)
    }

    pub fn is_global_output_net(&self, id: NetId) -> bool {
        self.manager.global_outputs().contains(&id)
    }

    // ---- pin index queries ----

    /// The net driving input `pin` of `gate`.
    pub fn fan_in_net(&self, gate: GateId, pin: &str) -> Option<NetId> {
        self.manager.bound_net(PinRole::Destination, gate, pin)
    }

    /// The net driven by output `pin` of `gate`.
    pub fn fan_out_net(&self, gate: GateId, pin: &str) -> Option<NetId> {
        self.manager.bound_net(PinRole::Source, gate, pin)
    }

    /// `(pin, net)` for every connected input pin of `gate`, by pin name.
    pub fn fan_in_nets(&self, gate: GateId) -> Vec<(String, NetId)> {
        self.manager.bound_pins(PinRole::Destination, gate)
    }

    /// `(pin, net)` for every connected output pin of `gate`, by pin name.
    pub fn fan_out_nets(&self, gate: GateId) -> Vec<(String, NetId)> {
        self.manager.bound_pins(PinRole::Source, gate)
    }

    /// Gates that receive a signal driven by `gate`.
    pub fn successors(&self, gate: GateId) -> BTreeSet<GateId> {
        self.fan_out_nets(gate)
            .into_iter()
            .filter_map(|(_, net)| self.nets.get(&net))
            .flat_map(|net| net.dsts_iter().map(|ep| ep.gate))
            .collect()
    }

    /// Gates that drive a signal `gate` receives.
    pub fn predecessors(&self, gate: GateId) -> BTreeSet<GateId> {
        self.fan_in_nets(gate)
            .into_iter()
            .filter_map(|(_, net)| self.nets.get(&net))
            .filter_map(|net| net.src().map(|ep| ep.gate))
            .collect()
    }

    pub fn stats(&self) -> NetlistStats {
        let connection_count = self
            .nets
            .values()
            .map(|n| n.num_of_dsts() + usize::from(n.src().is_some()))
            .sum();

        NetlistStats {
            gate_count: self.gates.len(),
            net_count: self.nets.len(),
            connection_count,
            global_input_count: self.manager.global_inputs().len(),
            global_output_count: self.manager.global_outputs().len(),
            unrouted_count: self.nets.values().filter(|n| n.is_unrouted()).count(),
        }
    }
}

fn reserve_error(e: ReserveError, id: u32) -> NetlistError {
    match e {
        ReserveError::Zero => NetlistError::InvalidId,
        ReserveError::InUse => NetlistError::DuplicateId(id),
    }
}

/// Size summary of a netlist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlistStats {
    pub gate_count: usize,
    pub net_count: usize,
    /// Endpoints attached to nets, sources and destinations together
    pub connection_count: usize,
    pub global_input_count: usize,
    pub global_output_count: usize,
    pub unrouted_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConnectivityError;
    use crate::endpoint::Endpoint;

    fn netlist() -> Netlist {
        Netlist::new(GateLibrary::builtin())
    }

    #[test]
    fn test_clk_net_scenario() {
        let mut nl = netlist();
        let gate_a = nl.create_gate("DFF", "gate_A").unwrap();
        let clk = nl.create_net("clk_net").unwrap();
        assert_eq!(clk.raw(), 1);

        let mut net = nl.net_mut(clk).unwrap();
        assert!(net.add_dst(gate_a, "CLK").is_ok());
        assert!(matches!(
            net.add_dst(gate_a, "CLK"),
            Err(ConnectivityError::DuplicateDestination { .. })
        ));
        assert_eq!(net.num_of_dsts(), 1);
        assert!(net.remove_dst(gate_a, "CLK").is_ok());
        assert_eq!(net.num_of_dsts(), 0);
        assert_eq!(nl.fan_in_net(gate_a, "CLK"), None);
    }

    #[test]
    fn test_net_ids_are_unique() {
        let mut nl = netlist();
        let ids: Vec<NetId> = (0..50).map(|i| nl.create_net(format!("n{}", i)).unwrap()).collect();
        let unique: BTreeSet<NetId> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());

        assert!(matches!(
            nl.create_net_with_id(ids[3].raw(), "dup"),
            Err(NetlistError::DuplicateId(_))
        ));
        assert!(matches!(nl.create_net_with_id(0, "zero"), Err(NetlistError::InvalidId)));
    }

    #[test]
    fn test_exhausted_id_space_never_overwrites() {
        let config = NetlistConfig {
            first_id: u32::MAX,
            ..NetlistConfig::default()
        };
        let mut nl = Netlist::with_config(GateLibrary::builtin(), config);

        let a = nl.create_net("a").unwrap();
        assert_eq!(a.raw(), u32::MAX);
        assert!(matches!(nl.create_net("b"), Err(NetlistError::IdsExhausted(_))));
        assert_eq!(nl.nets().count(), 1);
        assert_eq!(nl.net(a).unwrap().name(), "a");

        let g = nl.create_gate("BUF", "g").unwrap();
        assert!(matches!(nl.create_gate("BUF", "h"), Err(NetlistError::IdsExhausted(_))));
        assert_eq!(nl.gate(g).unwrap().name(), "g");
    }

    #[test]
    fn test_monotonic_ids_after_max_reservation() {
        let config = NetlistConfig {
            reuse_freed_ids: false,
            ..NetlistConfig::default()
        };
        let mut nl = Netlist::with_config(GateLibrary::builtin(), config);

        let far = nl.create_net_with_id(u32::MAX, "far").unwrap();
        assert!(matches!(nl.create_net("next"), Err(NetlistError::IdsExhausted(_))));
        assert!(nl.is_net_in_netlist(far));
        assert_eq!(nl.nets().count(), 1);
    }

    #[test]
    fn test_far_explicit_ids_leave_low_ids_allocatable() {
        let mut nl = netlist();
        let far = nl.create_net_with_id(u32::MAX - 1, "far").unwrap();
        let gate = nl.create_gate_with_id(4_000_000_000, "BUF", "far_gate").unwrap();

        assert_eq!(nl.create_net("near").unwrap().raw(), 1);
        assert_eq!(nl.create_gate("BUF", "near_gate").unwrap().raw(), 1);
        assert!(nl.is_net_in_netlist(far));
        assert!(nl.is_gate_in_netlist(gate));
    }

    #[test]
    fn test_source_exclusivity() {
        let mut nl = netlist();
        let g1 = nl.create_gate("BUF", "g1").unwrap();
        let g2 = nl.create_gate("BUF", "g2").unwrap();
        let n = nl.create_net("n").unwrap();

        let mut net = nl.net_mut(n).unwrap();
        net.set_src(g1, "O").unwrap();
        net.set_src(g2, "O").unwrap();
        assert_eq!(net.src(), Some(&Endpoint::new(g2, "O")));

        assert_eq!(nl.fan_out_net(g1, "O"), None);
        assert_eq!(nl.fan_out_net(g2, "O"), Some(n));
    }

    #[test]
    fn test_set_src_same_endpoint_is_noop() {
        let mut nl = netlist();
        let g = nl.create_gate("INV", "g").unwrap();
        let n = nl.create_net("n").unwrap();

        let mut net = nl.net_mut(n).unwrap();
        net.set_src(g, "O").unwrap();
        net.set_src(g, "O").unwrap();
        assert_eq!(net.src(), Some(&Endpoint::new(g, "O")));
        assert_eq!(nl.fan_out_net(g, "O"), Some(n));
    }

    #[test]
    fn test_invalid_pin_and_unknown_gate_leave_state_untouched() {
        let mut nl = netlist();
        let g = nl.create_gate("AND2", "and").unwrap();
        let n = nl.create_net("n").unwrap();

        let mut net = nl.net_mut(n).unwrap();
        assert!(matches!(
            net.set_src(g, "I0"),
            Err(ConnectivityError::InvalidPin { role: PinRole::Source, .. })
        ));
        assert!(matches!(
            net.add_dst(g, "O"),
            Err(ConnectivityError::InvalidPin { role: PinRole::Destination, .. })
        ));
        assert!(matches!(
            net.add_dst(GateId::new(99), "I0"),
            Err(ConnectivityError::UnknownGate(_))
        ));
        assert!(net.src().is_none());
        assert_eq!(net.num_of_dsts(), 0);
        assert!(nl.fan_in_nets(g).is_empty());
        assert!(nl.fan_out_nets(g).is_empty());
    }

    #[test]
    fn test_pin_receives_from_one_net_only() {
        let mut nl = netlist();
        let g = nl.create_gate("INV", "inv").unwrap();
        let a = nl.create_net("a").unwrap();
        let b = nl.create_net("b").unwrap();

        nl.net_mut(a).unwrap().add_dst(g, "I").unwrap();
        let err = nl.net_mut(b).unwrap().add_dst(g, "I").unwrap_err();
        assert_eq!(
            err,
            ConnectivityError::PinAlreadyBound {
                gate: g,
                pin: "I".into(),
                role: PinRole::Destination,
                bound_to: a,
            }
        );
        assert_eq!(nl.net(b).unwrap().num_of_dsts(), 0);
        assert_eq!(nl.fan_in_net(g, "I"), Some(a));
    }

    #[test]
    fn test_output_pin_drives_one_net_only() {
        let mut nl = netlist();
        let g = nl.create_gate("BUF", "buf").unwrap();
        let other = nl.create_gate("BUF", "other").unwrap();
        let a = nl.create_net("a").unwrap();
        let b = nl.create_net("b").unwrap();

        nl.net_mut(a).unwrap().set_src(g, "O").unwrap();
        nl.net_mut(b).unwrap().set_src(other, "O").unwrap();

        let err = nl.net_mut(b).unwrap().set_src(g, "O").unwrap_err();
        assert!(matches!(err, ConnectivityError::PinAlreadyBound { bound_to, .. } if bound_to == a));
        // the failed replacement kept b's original driver
        assert_eq!(nl.net(b).unwrap().src(), Some(&Endpoint::new(other, "O")));
        assert_eq!(nl.fan_out_net(other, "O"), Some(b));
    }

    #[test]
    fn test_inout_pin_cannot_be_source_and_destination_of_same_net() {
        let mut nl = netlist();
        let io = nl.create_gate("IOBUF", "pad").unwrap();
        let n = nl.create_net("pad_net").unwrap();

        let mut net = nl.net_mut(n).unwrap();
        net.set_src(io, "IO").unwrap();
        assert!(matches!(
            net.add_dst(io, "IO"),
            Err(ConnectivityError::SourceDestinationConflict { .. })
        ));

        net.remove_src().unwrap();
        net.add_dst(io, "IO").unwrap();
        assert!(matches!(
            net.set_src(io, "IO"),
            Err(ConnectivityError::SourceDestinationConflict { .. })
        ));
        assert!(net.src().is_none());
    }

    #[test]
    fn test_remove_src_without_source_fails() {
        let mut nl = netlist();
        let n = nl.create_net("n").unwrap();
        let mut net = nl.net_mut(n).unwrap();
        assert_eq!(net.remove_src(), Err(ConnectivityError::NoSource(n)));
    }

    #[test]
    fn test_remove_missing_dst_fails() {
        let mut nl = netlist();
        let g = nl.create_gate("INV", "g").unwrap();
        let n = nl.create_net("n").unwrap();
        let mut net = nl.net_mut(n).unwrap();
        assert!(matches!(
            net.remove_dst(g, "I"),
            Err(ConnectivityError::NotADestination { .. })
        ));
    }

    #[test]
    fn test_is_a_dst_variants() {
        let mut nl = netlist();
        let g = nl.create_gate("AND2", "and").unwrap();
        let n = nl.create_net("n").unwrap();
        let mut net = nl.net_mut(n).unwrap();
        net.add_dst(g, "I1").unwrap();

        assert!(net.is_a_dst_gate(g));
        assert!(net.is_a_dst(&Endpoint::new(g, "I1")));
        assert!(!net.is_a_dst(&Endpoint::new(g, "I0")));
    }

    #[test]
    fn test_unrouted_semantics() {
        let mut nl = netlist();
        let drv = nl.create_gate("BUF", "drv").unwrap();
        let rcv = nl.create_gate("BUF", "rcv").unwrap();
        let n = nl.create_net("n").unwrap();

        assert!(nl.net(n).unwrap().is_unrouted());
        nl.net_mut(n).unwrap().set_src(drv, "O").unwrap();
        assert!(nl.net(n).unwrap().is_unrouted());
        nl.net_mut(n).unwrap().add_dst(rcv, "I").unwrap();
        assert!(!nl.net(n).unwrap().is_unrouted());

        nl.net_mut(n).unwrap().remove_src().unwrap();
        assert!(nl.net(n).unwrap().is_unrouted());
        assert_eq!(nl.unrouted_nets().len(), 1);
    }

    #[test]
    fn test_filtered_dsts_keep_order() {
        let mut nl = netlist();
        let gates: Vec<GateId> = (0..4)
            .map(|i| nl.create_gate("AND2", format!("a{}", i)).unwrap())
            .collect();
        let n = nl.create_net("fanout").unwrap();
        let mut net = nl.net_mut(n).unwrap();
        for (i, g) in gates.iter().enumerate() {
            let pin = if i % 2 == 0 { "I0" } else { "I1" };
            net.add_dst(*g, pin).unwrap();
        }

        let all = net.dsts();
        assert_eq!(net.dsts_filtered(|_| true), all);

        let i0: Vec<Endpoint> = net.dsts_filtered(|ep| ep.pin == "I0");
        assert_eq!(i0, vec![Endpoint::new(gates[0], "I0"), Endpoint::new(gates[2], "I0")]);
    }

    #[test]
    fn test_global_marking_is_idempotent_and_independent() {
        let mut nl = netlist();
        let n = nl.create_net("io").unwrap();
        let mut net = nl.net_mut(n).unwrap();

        net.mark_global_input_net();
        net.mark_global_input_net();
        assert!(net.is_global_input_net());
        assert!(!net.is_global_output_net());

        net.mark_global_output_net();
        assert!(net.is_global_input_net() && net.is_global_output_net());

        assert_eq!(nl.global_input_nets().len(), 1);
        assert!(nl.is_global_output_net(n));

        nl.net_mut(n).unwrap().unmark_global_input_net();
        assert!(!nl.is_global_input_net(n));
        assert!(nl.global_input_nets().is_empty());
        assert!(nl.net(n).unwrap().is_global_output_net());
    }

    #[test]
    fn test_delete_gate_detaches_endpoints() {
        let mut nl = netlist();
        let drv = nl.create_gate("BUF", "drv").unwrap();
        let rcv = nl.create_gate("AND2", "rcv").unwrap();
        let a = nl.create_net("a").unwrap();
        let b = nl.create_net("b").unwrap();

        nl.net_mut(a).unwrap().set_src(drv, "O").unwrap();
        nl.net_mut(a).unwrap().add_dst(rcv, "I0").unwrap();
        nl.net_mut(b).unwrap().add_dst(rcv, "I1").unwrap();

        nl.delete_gate(rcv).unwrap();
        assert!(!nl.is_gate_in_netlist(rcv));
        assert_eq!(nl.net(a).unwrap().num_of_dsts(), 0);
        assert_eq!(nl.net(b).unwrap().num_of_dsts(), 0);
        assert!(nl.check_integrity().is_empty());

        nl.delete_gate(drv).unwrap();
        assert!(nl.net(a).unwrap().src().is_none());
        assert!(matches!(nl.delete_gate(drv), Err(NetlistError::UnknownGate(_))));
    }

    #[test]
    fn test_delete_net_clears_index_and_registries() {
        let mut nl = netlist();
        let drv = nl.create_gate("BUF", "drv").unwrap();
        let rcv = nl.create_gate("BUF", "rcv").unwrap();
        let n = nl.create_net("n").unwrap();
        {
            let mut net = nl.net_mut(n).unwrap();
            net.set_src(drv, "O").unwrap();
            net.add_dst(rcv, "I").unwrap();
            net.mark_global_output_net();
        }

        nl.delete_net(n).unwrap();
        assert!(!nl.is_net_in_netlist(n));
        assert_eq!(nl.fan_out_net(drv, "O"), None);
        assert_eq!(nl.fan_in_net(rcv, "I"), None);
        assert!(!nl.is_global_output_net(n));

        // the pins are free to be bound again
        let m = nl.create_net("m").unwrap();
        assert_eq!(m, n);
        nl.net_mut(m).unwrap().add_dst(rcv, "I").unwrap();
    }

    #[test]
    fn test_successors_and_predecessors() {
        let mut nl = netlist();
        let src = nl.create_gate("BUF", "src").unwrap();
        let a = nl.create_gate("INV", "a").unwrap();
        let b = nl.create_gate("AND2", "b").unwrap();
        let n = nl.create_net("n").unwrap();
        {
            let mut net = nl.net_mut(n).unwrap();
            net.set_src(src, "O").unwrap();
            net.add_dst(a, "I").unwrap();
            net.add_dst(b, "I0").unwrap();
        }

        assert_eq!(nl.successors(src), BTreeSet::from([a, b]));
        assert_eq!(nl.predecessors(b), BTreeSet::from([src]));
        assert!(nl.predecessors(src).is_empty());
    }

    #[test]
    fn test_stats() {
        let mut nl = netlist();
        let drv = nl.create_gate("BUF", "drv").unwrap();
        let rcv = nl.create_gate("BUF", "rcv").unwrap();
        let n = nl.create_net("n").unwrap();
        nl.create_net("floating").unwrap();
        {
            let mut net = nl.net_mut(n).unwrap();
            net.set_src(drv, "O").unwrap();
            net.add_dst(rcv, "I").unwrap();
            net.mark_global_input_net();
        }

        let stats = nl.stats();
        assert_eq!(stats.gate_count, 2);
        assert_eq!(stats.net_count, 2);
        assert_eq!(stats.connection_count, 2);
        assert_eq!(stats.global_input_count, 1);
        assert_eq!(stats.unrouted_count, 1);
    }

    #[test]
    fn test_unknown_gate_type() {
        let mut nl = netlist();
        assert!(matches!(
            nl.create_gate("LUT6", "lut"),
            Err(NetlistError::UnknownGateType(_))
        ));
        assert_eq!(nl.gates().count(), 0);
    }
}
