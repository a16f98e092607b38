//! Error types and netlist configuration shared by the library and the CLI.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::ids::{GateId, NetId};

/// Role a pin plays on a net
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PinRole {
    Source,
    Destination,
}

impl std::fmt::Display for PinRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PinRole::Source => write!(f, "source"),
            PinRole::Destination => write!(f, "destination"),
        }
    }
}

/// Rejected connectivity edit. The net and the pin index are left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectivityError {
    #[error("gate {0} is not part of this netlist")]
    UnknownGate(GateId),

    #[error("pin '{pin}' of gate {gate} cannot be used as a {role}")]
    InvalidPin {
        gate: GateId,
        pin: String,
        role: PinRole,
    },

    #[error("{gate}:{pin} is already a destination of net {net}")]
    DuplicateDestination { net: NetId, gate: GateId, pin: String },

    #[error("{gate}:{pin} is not a destination of net {net}")]
    NotADestination { net: NetId, gate: GateId, pin: String },

    #[error("net {0} has no source")]
    NoSource(NetId),

    #[error("{gate}:{pin} is already bound as {role} of net {bound_to}")]
    PinAlreadyBound {
        gate: GateId,
        pin: String,
        role: PinRole,
        bound_to: NetId,
    },

    #[error("{gate}:{pin} cannot be both source and destination of net {net}")]
    SourceDestinationConflict { net: NetId, gate: GateId, pin: String },
}

#[derive(Debug, thiserror::Error)]
pub enum NetlistError {
    #[error("Unknown gate type: {0}")]
    UnknownGateType(String),
    #[error("Unknown gate: {0}")]
    UnknownGate(GateId),
    #[error("Unknown net: {0}")]
    UnknownNet(NetId),
    #[error("Id {0} is already in use")]
    DuplicateId(u32),
    #[error("Id 0 is reserved")]
    InvalidId,
    #[error("No free {0} ids left")]
    IdsExhausted(&'static str),
    #[error("Connectivity error: {0}")]
    Connectivity(#[from] ConnectivityError),
    #[error("Gate library error: {0}")]
    Library(String),
    #[error("Snapshot error: {0}")]
    Snapshot(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Settings for a netlist instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetlistConfig {
    #[serde(default)]
    pub design_name: String,
    #[serde(default)]
    pub device_name: String,
    /// First id handed out for gates and nets; 0 is bumped to 1
    #[serde(default = "default_first_id")]
    pub first_id: u32,
    /// Hand released ids out again (smallest first)
    #[serde(default = "default_reuse_freed_ids")]
    pub reuse_freed_ids: bool,
}

fn default_first_id() -> u32 {
    1
}

fn default_reuse_freed_ids() -> bool {
    true
}

impl Default for NetlistConfig {
    fn default() -> Self {
        Self {
            design_name: String::new(),
            device_name: String::new(),
            first_id: default_first_id(),
            reuse_freed_ids: default_reuse_freed_ids(),
        }
    }
}

impl NetlistConfig {
    pub fn from_json_str(json: &str) -> Result<Self, NetlistError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, NetlistError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}
