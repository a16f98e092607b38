//! Graph consistency mediator
//!
//! The only place that writes gate-side back-references. Every change to a
//! net's source or destinations goes through here so that the pin index and
//! the net's own endpoint list always describe the same graph.
//!
//! Each operation checks all of its preconditions before touching either
//! side, so a rejected call leaves both the net and the index as they were.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::gate::GateArena;
use super::net::Net;
use crate::core::{ConnectivityError, PinRole};
use crate::endpoint::Endpoint;
use crate::ids::{GateId, NetId};

type PinTable = HashMap<GateId, BTreeMap<String, NetId>>;

#[derive(Debug, Default)]
pub(crate) struct InternalManager {
    /// gate output pin -> the net it drives
    sources: PinTable,
    /// gate input pin -> the net it receives from
    destinations: PinTable,
    global_inputs: BTreeSet<NetId>,
    global_outputs: BTreeSet<NetId>,
}

impl InternalManager {
    /// Make `gate:pin` the source of `net`, replacing any previous source.
    /// Rebinding the current source is a no-op.
    pub(super) fn bind_source(
        &mut self,
        gates: &GateArena,
        net: &mut Net,
        gate: GateId,
        pin: &str,
    ) -> Result<(), ConnectivityError> {
        if net.source.as_ref().map(|s| s.is(gate, pin)).unwrap_or(false) {
            return Ok(());
        }
        if net.destinations.iter().any(|ep| ep.is(gate, pin)) {
            return Err(ConnectivityError::SourceDestinationConflict {
                net: net.id,
                gate,
                pin: pin.to_string(),
            });
        }
        let g = gates.get(&gate).ok_or(ConnectivityError::UnknownGate(gate))?;
        if !g.has_output_pin(pin) {
            return Err(ConnectivityError::InvalidPin {
                gate,
                pin: pin.to_string(),
                role: PinRole::Source,
            });
        }
        if let Some(bound_to) = self.bound_net(PinRole::Source, gate, pin) {
            if bound_to != net.id {
                return Err(ConnectivityError::PinAlreadyBound {
                    gate,
                    pin: pin.to_string(),
                    role: PinRole::Source,
                    bound_to,
                });
            }
        }

        // old driver first, so no two gates ever claim the net at once
        if let Some(old) = net.source.take() {
            Self::unindex(&mut self.sources, old.gate, &old.pin);
            tracing::debug!("net {}: released source {}", net.id, old);
        }
        Self::index(&mut self.sources, gate, pin, net.id);
        let ep = Endpoint::new(gate, pin);
        tracing::debug!("net {}: bound source {}", net.id, ep);
        net.source = Some(ep);
        Ok(())
    }

    pub(super) fn unbind_source(&mut self, net: &mut Net) -> Result<Endpoint, ConnectivityError> {
        let old = net.source.take().ok_or(ConnectivityError::NoSource(net.id))?;
        Self::unindex(&mut self.sources, old.gate, &old.pin);
        tracing::debug!("net {}: removed source {}", net.id, old);
        Ok(old)
    }

    /// Append `gate:pin` to the destinations of `net`.
    pub(super) fn bind_destination(
        &mut self,
        gates: &GateArena,
        net: &mut Net,
        gate: GateId,
        pin: &str,
    ) -> Result<(), ConnectivityError> {
        if net.destinations.iter().any(|ep| ep.is(gate, pin)) {
            return Err(ConnectivityError::DuplicateDestination {
                net: net.id,
                gate,
                pin: pin.to_string(),
            });
        }
        if net.source.as_ref().map(|s| s.is(gate, pin)).unwrap_or(false) {
            return Err(ConnectivityError::SourceDestinationConflict {
                net: net.id,
                gate,
                pin: pin.to_string(),
            });
        }
        let g = gates.get(&gate).ok_or(ConnectivityError::UnknownGate(gate))?;
        if !g.has_input_pin(pin) {
            return Err(ConnectivityError::InvalidPin {
                gate,
                pin: pin.to_string(),
                role: PinRole::Destination,
            });
        }
        if let Some(bound_to) = self.bound_net(PinRole::Destination, gate, pin) {
            if bound_to != net.id {
                return Err(ConnectivityError::PinAlreadyBound {
                    gate,
                    pin: pin.to_string(),
                    role: PinRole::Destination,
                    bound_to,
                });
            }
        }

        Self::index(&mut self.destinations, gate, pin, net.id);
        let ep = Endpoint::new(gate, pin);
        tracing::debug!("net {}: bound destination {}", net.id, ep);
        net.destinations.push(ep);
        Ok(())
    }

    pub(super) fn unbind_destination(
        &mut self,
        net: &mut Net,
        gate: GateId,
        pin: &str,
    ) -> Result<Endpoint, ConnectivityError> {
        let pos = net
            .destinations
            .iter()
            .position(|ep| ep.is(gate, pin))
            .ok_or_else(|| ConnectivityError::NotADestination {
                net: net.id,
                gate,
                pin: pin.to_string(),
            })?;

        let old = net.destinations.remove(pos);
        Self::unindex(&mut self.destinations, gate, pin);
        tracing::debug!("net {}: removed destination {}", net.id, old);
        Ok(old)
    }

    pub(super) fn set_global_input(&mut self, net: &mut Net, marked: bool) {
        if marked {
            self.global_inputs.insert(net.id);
        } else {
            self.global_inputs.remove(&net.id);
        }
        net.global_input = marked;
    }

    pub(super) fn set_global_output(&mut self, net: &mut Net, marked: bool) {
        if marked {
            self.global_outputs.insert(net.id);
        } else {
            self.global_outputs.remove(&net.id);
        }
        net.global_output = marked;
    }

    /// Drop every back-reference and registry entry held for `net`.
    pub(super) fn detach_net(&mut self, net: &mut Net) {
        if net.source.is_some() {
            let _ = self.unbind_source(net);
        }
        for ep in std::mem::take(&mut net.destinations) {
            Self::unindex(&mut self.destinations, ep.gate, &ep.pin);
            tracing::debug!("net {}: removed destination {}", net.id, ep);
        }
        self.set_global_input(net, false);
        self.set_global_output(net, false);
    }

    pub(super) fn bound_net(&self, role: PinRole, gate: GateId, pin: &str) -> Option<NetId> {
        self.table(role).get(&gate).and_then(|pins| pins.get(pin)).copied()
    }

    /// All `(pin, net)` pairs bound for `gate` in the given role, by pin name.
    pub(super) fn bound_pins(&self, role: PinRole, gate: GateId) -> Vec<(String, NetId)> {
        self.table(role)
            .get(&gate)
            .map(|pins| pins.iter().map(|(p, n)| (p.clone(), *n)).collect())
            .unwrap_or_default()
    }

    /// Every `(gate, pin, net)` entry in the index for one role.
    pub(super) fn entries(&self, role: PinRole) -> impl Iterator<Item = (GateId, &str, NetId)> {
        self.table(role).iter().flat_map(|(gate, pins)| {
            pins.iter().map(move |(pin, net)| (*gate, pin.as_str(), *net))
        })
    }

    pub(super) fn global_inputs(&self) -> &BTreeSet<NetId> {
        &self.global_inputs
    }

    pub(super) fn global_outputs(&self) -> &BTreeSet<NetId> {
        &self.global_outputs
    }

    fn table(&self, role: PinRole) -> &PinTable {
        match role {
            PinRole::Source => &self.sources,
            PinRole::Destination => &self.destinations,
        }
    }

    fn index(table: &mut PinTable, gate: GateId, pin: &str, net: NetId) {
        table.entry(gate).or_default().insert(pin.to_string(), net);
    }

    fn unindex(table: &mut PinTable, gate: GateId, pin: &str) {
        if let Some(pins) = table.get_mut(&gate) {
            pins.remove(pin);
            if pins.is_empty() {
                table.remove(&gate);
            }
        }
    }
}
