use serde::{Deserialize, Serialize};

use crate::ids::GateId;

/// A connection point: one named pin on one gate.
///
/// Endpoints are plain values. They reference a gate by id and never keep it
/// alive; the netlist guarantees the id stays valid while the endpoint is
/// attached to a net.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    pub gate: GateId,
    pub pin: String,
}

impl Endpoint {
    pub fn new(gate: GateId, pin: impl Into<String>) -> Self {
        Self {
            gate,
            pin: pin.into(),
        }
    }

    pub fn gate(&self) -> GateId {
        self.gate
    }

    pub fn pin(&self) -> &str {
        &self.pin
    }

    /// True if this endpoint sits on `gate` at `pin`.
    pub fn is(&self, gate: GateId, pin: &str) -> bool {
        self.gate == gate && self.pin == pin
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.gate, self.pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_equality() {
        let a = Endpoint::new(GateId::new(1), "A");
        let b = Endpoint::new(GateId::new(1), "A".to_string());
        let c = Endpoint::new(GateId::new(1), "B");
        let d = Endpoint::new(GateId::new(2), "A");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert!(a.is(GateId::new(1), "A"));
    }

    #[test]
    fn test_display() {
        assert_eq!(Endpoint::new(GateId::new(4), "CLK").to_string(), "g4:CLK");
    }
}
