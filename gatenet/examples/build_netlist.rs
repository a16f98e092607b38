//! Build a small netlist, print its connectivity and write a snapshot.

use gatenet::prelude::*;
use std::path::Path;

fn main() -> Result<(), NetlistError> {
    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "half_adder.json".to_string());

    let mut nl = Netlist::new(GateLibrary::builtin());
    nl.set_design_name("half_adder");

    let a = nl.create_gate("BUF", "a_in")?;
    let b = nl.create_gate("BUF", "b_in")?;
    let xor = nl.create_gate("XOR2", "sum")?;
    let and = nl.create_gate("AND2", "carry")?;

    for (name, drv, dst_pin) in [("a", a, "I0"), ("b", b, "I1")] {
        let id = nl.create_net(name)?;
        let mut net = nl
            .net_mut(id)
            .ok_or(NetlistError::UnknownNet(id))?;
        net.set_src(drv, "O")?;
        net.add_dst(xor, dst_pin)?;
        net.add_dst(and, dst_pin)?;
    }
    for (name, drv) in [("s", xor), ("c", and)] {
        let id = nl.create_net(name)?;
        let mut net = nl
            .net_mut(id)
            .ok_or(NetlistError::UnknownNet(id))?;
        net.set_src(drv, "O")?;
        net.mark_global_output_net();
    }

    for net in nl.nets() {
        let src = net
            .src()
            .map(|ep| ep.to_string())
            .unwrap_or_else(|| "-".to_string());
        let dsts: Vec<String> = net.dsts_iter().map(|ep| ep.to_string()).collect();
        println!("{:<4} {} -> [{}]", net.name(), src, dsts.join(", "));
    }
    println!();
    println!("Unrouted nets: {}", nl.unrouted_nets().len());

    nl.to_snapshot().save(Path::new(&out))?;
    println!("Snapshot written to {}", out);
    Ok(())
}
