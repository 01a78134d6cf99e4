//! Switchsim - switch-level circuit simulator demo.
//!
//! Wires a NAND gate and an inverter out of transistor pairs, drives the
//! NAND inputs from two switches, resolves one step, and prints the
//! resulting levels of every labeled net.
//!
//! # Usage
//!
//! ```bash
//! switchsim --a true --b false
//! ```

use std::process;

use clap::{ArgAction, Parser};
use switchsim::{Nand, Netlist, Not, Result, Simulator};

/// Switch-level circuit simulator demo
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Drive level for switch A (true = high)
    #[arg(short, long, action = ArgAction::Set, default_value_t = true)]
    a: bool,

    /// Drive level for switch B (true = high)
    #[arg(short, long, action = ArgAction::Set, default_value_t = true)]
    b: bool,

    /// Also print the raw solver state (resolved roots, parent links)
    #[arg(long)]
    state: bool,
}

fn run(args: &Args) -> Result<()> {
    // NAND with its output inverted, i.e. an AND built from four
    // transistor pairs
    let mut netlist = Netlist::new();
    let nand = Nand::new(&mut netlist, "NAND1");
    let not = Not::new(&mut netlist, "NOT1");
    netlist.connect(not.input, nand.output);

    let a = netlist.add_switch("A");
    let b = netlist.add_switch("B");
    netlist.connect(nand.input_a, netlist.switch_out(a));
    netlist.connect(nand.input_b, netlist.switch_out(b));
    netlist.set_switch(a, args.a);
    netlist.set_switch(b, args.b);

    let mut sim = Simulator::new();
    sim.step(&netlist)?;

    print!("{}", sim.dump(&netlist));
    if args.state {
        print!("{}", sim.dump_state(&netlist));
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(err) = run(&args) {
        eprintln!("fatal: {err}");
        process::exit(1);
    }
}
