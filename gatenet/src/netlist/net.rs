//! Nets and the connectivity protocol
//!
//! [`Net`] is the read side: a net's id, name, optional source, ordered
//! destinations and boundary flags. Edits go through [`NetMut`], a handle
//! borrowed from [`Netlist::net_mut`](super::Netlist::net_mut) that holds
//! exclusive access to the netlist and forwards every cross-entity update to
//! the internal manager.

use std::ops::Deref;

use super::gate::GateArena;
use super::manager::InternalManager;
use crate::core::ConnectivityError;
use crate::data::DataContainer;
use crate::endpoint::Endpoint;
use crate::ids::{GateId, NetId};

/// A wire: at most one driving endpoint and any number of receivers.
#[derive(Debug)]
pub struct Net {
    pub(super) id: NetId,
    pub(super) name: String,
    pub(super) source: Option<Endpoint>,
    pub(super) destinations: Vec<Endpoint>,
    pub(super) global_input: bool,
    pub(super) global_output: bool,
    pub(super) data: DataContainer,
}

impl Net {
    pub(super) fn new(id: NetId, name: String) -> Self {
        Self {
            id,
            name,
            source: None,
            destinations: Vec::new(),
            global_input: false,
            global_output: false,
            data: DataContainer::new(),
        }
    }

    pub fn id(&self) -> NetId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The driving endpoint, if any.
    pub fn src(&self) -> Option<&Endpoint> {
        self.source.as_ref()
    }

    /// Number of destinations, without materializing the list.
    pub fn num_of_dsts(&self) -> usize {
        self.destinations.len()
    }

    /// Snapshot of the destinations in insertion order.
    pub fn dsts(&self) -> Vec<Endpoint> {
        self.destinations.clone()
    }

    /// Destinations for which `filter` returns true, in insertion order.
    pub fn dsts_filtered<F>(&self, filter: F) -> Vec<Endpoint>
    where
        F: Fn(&Endpoint) -> bool,
    {
        self.destinations
            .iter()
            .filter(|ep| filter(ep))
            .cloned()
            .collect()
    }

    pub fn dsts_iter(&self) -> impl Iterator<Item = &Endpoint> {
        self.destinations.iter()
    }

    /// Exact `(gate, pin)` match against the destinations.
    pub fn is_a_dst(&self, ep: &Endpoint) -> bool {
        self.destinations.contains(ep)
    }

    /// True if any pin of `gate` is a destination.
    pub fn is_a_dst_gate(&self, gate: GateId) -> bool {
        self.destinations.iter().any(|ep| ep.gate == gate)
    }

    /// A net counts as routed only once it has both a source and at least
    /// one destination.
    pub fn is_unrouted(&self) -> bool {
        self.source.is_none() || self.destinations.is_empty()
    }

    pub fn is_global_input_net(&self) -> bool {
        self.global_input
    }

    pub fn is_global_output_net(&self) -> bool {
        self.global_output
    }

    pub fn data(&self) -> &DataContainer {
        &self.data
    }
}

/// Mutable access to one net of a netlist.
///
/// Dereferences to [`Net`] for reads.
pub struct NetMut<'a> {
    pub(super) net: &'a mut Net,
    pub(super) gates: &'a GateArena,
    pub(super) manager: &'a mut InternalManager,
}

impl Deref for NetMut<'_> {
    type Target = Net;

    fn deref(&self) -> &Net {
        &*self.net
    }
}

impl NetMut<'_> {
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.net.name = name.into();
    }

    pub fn data_mut(&mut self) -> &mut DataContainer {
        &mut self.net.data
    }

    /// Drive this net from `gate:pin`, replacing the current source.
    pub fn set_src(&mut self, gate: GateId, pin: &str) -> Result<(), ConnectivityError> {
        self.manager.bind_source(self.gates, self.net, gate, pin)
    }

    pub fn set_src_endpoint(&mut self, src: &Endpoint) -> Result<(), ConnectivityError> {
        self.set_src(src.gate, &src.pin)
    }

    /// Detach the source. Returns the endpoint that was removed.
    pub fn remove_src(&mut self) -> Result<Endpoint, ConnectivityError> {
        self.manager.unbind_source(self.net)
    }

    /// Add `gate:pin` as a receiver of this net.
    pub fn add_dst(&mut self, gate: GateId, pin: &str) -> Result<(), ConnectivityError> {
        self.manager.bind_destination(self.gates, self.net, gate, pin)
    }

    pub fn add_dst_endpoint(&mut self, dst: &Endpoint) -> Result<(), ConnectivityError> {
        self.add_dst(dst.gate, &dst.pin)
    }

    pub fn remove_dst(&mut self, gate: GateId, pin: &str) -> Result<(), ConnectivityError> {
        self.manager.unbind_destination(self.net, gate, pin).map(|_| ())
    }

    pub fn remove_dst_endpoint(&mut self, dst: &Endpoint) -> Result<(), ConnectivityError> {
        self.remove_dst(dst.gate, &dst.pin)
    }

    /// Idempotent; also lists the net among the netlist's global inputs.
    pub fn mark_global_input_net(&mut self) {
        self.manager.set_global_input(self.net, true);
    }

    pub fn unmark_global_input_net(&mut self) {
        self.manager.set_global_input(self.net, false);
    }

    /// Idempotent; also lists the net among the netlist's global outputs.
    pub fn mark_global_output_net(&mut self) {
        self.manager.set_global_output(self.net, true);
    }

    pub fn unmark_global_output_net(&mut self) {
        self.manager.set_global_output(self.net, false);
    }
}
