use std::collections::BTreeMap;
use std::sync::Arc;

use crate::data::DataContainer;
use crate::ids::GateId;
use crate::library::GateType;

pub(crate) type GateArena = BTreeMap<GateId, Gate>;

/// A placed instance of a gate type.
///
/// A gate holds no connectivity of its own. Which nets its pins are attached
/// to is recorded in the netlist's pin index and queried through
/// [`Netlist::fan_in_net`](super::Netlist::fan_in_net) and friends.
#[derive(Debug)]
pub struct Gate {
    id: GateId,
    name: String,
    gate_type: Arc<GateType>,
    data: DataContainer,
}

impl Gate {
    pub(super) fn new(id: GateId, name: String, gate_type: Arc<GateType>) -> Self {
        Self {
            id,
            name,
            gate_type,
            data: DataContainer::new(),
        }
    }

    pub fn id(&self) -> GateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn gate_type(&self) -> &Arc<GateType> {
        &self.gate_type
    }

    pub fn type_name(&self) -> &str {
        &self.gate_type.name
    }

    pub fn has_input_pin(&self, pin: &str) -> bool {
        self.gate_type.has_input_pin(pin)
    }

    pub fn has_output_pin(&self, pin: &str) -> bool {
        self.gate_type.has_output_pin(pin)
    }

    pub fn data(&self) -> &DataContainer {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut DataContainer {
        &mut self.data
    }
}
