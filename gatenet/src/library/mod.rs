//! Gate Library
//!
//! Gate types describe the pin contract a gate exposes: which pin names exist
//! and whether each one can drive a net, receive from one, or both. The
//! connectivity layer only asks two questions of a gate type,
//! `has_input_pin` and `has_output_pin`.
//!
//! Libraries are plain JSON documents:
//!
//! ```json
//! { "name": "basic",
//!   "gate_types": [
//!     { "name": "AND2", "pins": [ { "name": "I0", "direction": "input" },
//!                                 { "name": "I1", "direction": "input" },
//!                                 { "name": "O",  "direction": "output" } ] } ] }
//! ```

pub mod builtin;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use crate::core::NetlistError;

/// Direction of a gate pin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinDirection {
    Input,
    Output,
    InOut,
}

impl PinDirection {
    pub fn can_receive(self) -> bool {
        matches!(self, PinDirection::Input | PinDirection::InOut)
    }

    pub fn can_drive(self) -> bool {
        matches!(self, PinDirection::Output | PinDirection::InOut)
    }
}

impl std::fmt::Display for PinDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinDirection::Input => write!(f, "input"),
            PinDirection::Output => write!(f, "output"),
            PinDirection::InOut => write!(f, "inout"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PinDef {
    pub name: String,
    pub direction: PinDirection,
}

/// A cell definition: name plus declared pins in declaration order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GateType {
    pub name: String,
    pub pins: Vec<PinDef>,
}

impl GateType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pins: Vec::new(),
        }
    }

    pub fn with_pin(mut self, name: impl Into<String>, direction: PinDirection) -> Self {
        self.pins.push(PinDef {
            name: name.into(),
            direction,
        });
        self
    }

    pub fn pin_direction(&self, pin: &str) -> Option<PinDirection> {
        self.pins.iter().find(|p| p.name == pin).map(|p| p.direction)
    }

    /// True if `pin` exists and can receive a signal.
    pub fn has_input_pin(&self, pin: &str) -> bool {
        self.pin_direction(pin).map(|d| d.can_receive()).unwrap_or(false)
    }

    /// True if `pin` exists and can drive a net.
    pub fn has_output_pin(&self, pin: &str) -> bool {
        self.pin_direction(pin).map(|d| d.can_drive()).unwrap_or(false)
    }

    pub fn input_pins(&self) -> impl Iterator<Item = &str> {
        self.pins
            .iter()
            .filter(|p| p.direction.can_receive())
            .map(|p| p.name.as_str())
    }

    pub fn output_pins(&self) -> impl Iterator<Item = &str> {
        self.pins
            .iter()
            .filter(|p| p.direction.can_drive())
            .map(|p| p.name.as_str())
    }
}

#[derive(Deserialize)]
struct LibraryFile {
    name: String,
    #[serde(default)]
    gate_types: Vec<GateType>,
}

/// Named collection of gate types
#[derive(Debug, Clone, Default)]
pub struct GateLibrary {
    name: String,
    gate_types: BTreeMap<String, Arc<GateType>>,
}

impl GateLibrary {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            gate_types: BTreeMap::new(),
        }
    }

    /// The library compiled into the crate.
    pub fn builtin() -> Self {
        builtin::basic_library()
    }

    pub fn from_json_str(json: &str) -> Result<Self, NetlistError> {
        let file: LibraryFile = serde_json::from_str(json)
            .map_err(|e| NetlistError::Library(format!("Failed to parse JSON: {}", e)))?;

        let mut library = Self::new(file.name);
        for gate_type in file.gate_types {
            library.add_gate_type(gate_type)?;
        }
        Ok(library)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, NetlistError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Register a gate type. Names must be unique within the library.
    pub fn add_gate_type(&mut self, gate_type: GateType) -> Result<Arc<GateType>, NetlistError> {
        if self.gate_types.contains_key(&gate_type.name) {
            return Err(NetlistError::Library(format!(
                "duplicate gate type '{}' in library '{}'",
                gate_type.name, self.name
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for pin in &gate_type.pins {
            if !seen.insert(pin.name.as_str()) {
                return Err(NetlistError::Library(format!(
                    "gate type '{}' declares pin '{}' twice",
                    gate_type.name, pin.name
                )));
            }
        }
        let gate_type = Arc::new(gate_type);
        self.gate_types
            .insert(gate_type.name.clone(), Arc::clone(&gate_type));
        Ok(gate_type)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn gate_type(&self, name: &str) -> Option<&Arc<GateType>> {
        self.gate_types.get(name)
    }

    pub fn gate_types(&self) -> impl Iterator<Item = &Arc<GateType>> {
        self.gate_types.values()
    }

    pub fn len(&self) -> usize {
        self.gate_types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gate_types.is_empty()
    }
}
