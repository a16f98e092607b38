//! gatenet CLI - inspect and check netlist snapshots from the command line.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use gatenet::library::builtin::load_libraries_from_directory;
use gatenet::{GateLibrary, IntegrityIssue, Net, Netlist, NetlistStats};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gatenet")]
#[command(about = "Gate-level netlist connectivity checker", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load a snapshot, verify connectivity and report unrouted nets
    Check {
        /// Path to a netlist snapshot (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Exit with error code if any net is unrouted
        #[arg(long)]
        fail_on_unrouted: bool,

        /// Gate library JSON to resolve gate types (default: builtin)
        #[arg(long, value_name = "PATH")]
        library: Option<PathBuf>,
    },

    /// Print size statistics of a snapshot
    Stats {
        /// Path to a netlist snapshot (.json)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,

        /// Gate library JSON to resolve gate types (default: builtin)
        #[arg(long, value_name = "PATH")]
        library: Option<PathBuf>,
    },

    /// List gate types of a library
    Gates {
        /// Gate library JSON (default: builtin)
        #[arg(long, value_name = "PATH")]
        library: Option<PathBuf>,

        /// Directory of gate library JSON files to list instead
        #[arg(long, value_name = "DIR", conflicts_with = "library")]
        library_dir: Option<PathBuf>,

        /// Show pin lists
        #[arg(short, long)]
        pins: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output for CI/CD
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let exit_code = match cli.command {
        Commands::Check {
            file,
            format,
            fail_on_unrouted,
            library,
        } => handle_check(&file, format, fail_on_unrouted, library.as_deref()),
        Commands::Stats {
            file,
            format,
            library,
        } => handle_stats(&file, format, library.as_deref()),
        Commands::Gates {
            library,
            library_dir,
            pins,
        } => handle_gates(library.as_deref(), library_dir.as_deref(), pins),
    };

    process::exit(exit_code);
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_library(path: Option<&Path>) -> Result<GateLibrary> {
    match path {
        Some(p) => GateLibrary::load_from_file(p)
            .with_context(|| format!("failed to load gate library {}", p.display())),
        None => Ok(GateLibrary::builtin()),
    }
}

fn load(file: &Path, library: Option<&Path>) -> Result<Netlist> {
    let library = load_library(library)?;
    let netlist = gatenet::load_netlist(file, library)
        .with_context(|| format!("failed to load netlist {}", file.display()))?;
    tracing::info!(
        "Loaded '{}' from {}: {} gates, {} nets",
        netlist.design_name(),
        file.display(),
        netlist.gates().count(),
        netlist.nets().count()
    );
    Ok(netlist)
}

fn handle_check(
    file: &Path,
    format: OutputFormat,
    fail_on_unrouted: bool,
    library: Option<&Path>,
) -> i32 {
    let netlist = match load(file, library) {
        Ok(nl) => nl,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };

    let issues = netlist.check_integrity();
    let unrouted = netlist.unrouted_nets();

    match format {
        OutputFormat::Human => output_check_human(file, &netlist, &issues, &unrouted),
        OutputFormat::Json => output_check_json(file, &netlist, &issues, &unrouted),
    }

    if !issues.is_empty() || (fail_on_unrouted && !unrouted.is_empty()) {
        return 1;
    }
    0
}

fn output_check_human(file: &Path, netlist: &Netlist, issues: &[IntegrityIssue], unrouted: &[&Net]) {
    println!("\nFile: {}", file.display());
    println!("{}", "─".repeat(60));

    if issues.is_empty() {
        println!("  Connectivity: OK");
    } else {
        println!("\n  INTEGRITY:");
        for issue in issues {
            println!("    - {}", issue);
        }
    }

    if !unrouted.is_empty() {
        println!("\n  UNROUTED:");
        for net in unrouted {
            let reason = if net.src().is_none() {
                "no source"
            } else {
                "no destinations"
            };
            println!("    - {} ({}): {}", display_name(net), net.id(), reason);
        }
    }

    println!("\n  Summary:");
    print_stats_human(&netlist.stats());
}

fn output_check_json(file: &Path, netlist: &Netlist, issues: &[IntegrityIssue], unrouted: &[&Net]) {
    let output = serde_json::json!({
        "file": file.display().to_string(),
        "design": netlist.design_name(),
        "integrity_issues": issues,
        "unrouted_nets": unrouted.iter().map(|n| {
            serde_json::json!({
                "id": n.id(),
                "name": n.name(),
                "has_source": n.src().is_some(),
                "destinations": n.num_of_dsts(),
            })
        }).collect::<Vec<_>>(),
        "stats": netlist.stats(),
    });
    print_json(&output);
}

fn handle_stats(file: &Path, format: OutputFormat, library: Option<&Path>) -> i32 {
    let netlist = match load(file, library) {
        Ok(nl) => nl,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            return 1;
        }
    };
    let stats = netlist.stats();
    let graph = gatenet::ConnectivityGraph::from_netlist(&netlist);

    match format {
        OutputFormat::Human => {
            println!("Design: {}", netlist.design_name());
            print_stats_human(&stats);
            println!("    Loops:     {}", if graph.is_acyclic() { "none" } else { "present" });
        }
        OutputFormat::Json => {
            let output = serde_json::json!({
                "design": netlist.design_name(),
                "stats": stats,
                "graph": graph.stats(),
                "acyclic": graph.is_acyclic(),
            });
            print_json(&output);
        }
    }
    0
}

fn handle_gates(library: Option<&Path>, library_dir: Option<&Path>, pins: bool) -> i32 {
    let libraries = match library_dir {
        Some(dir) => {
            if !dir.is_dir() {
                eprintln!("Error: {} is not a directory", dir.display());
                return 1;
            }
            let (libraries, errors) = load_libraries_from_directory(dir);
            for error in &errors {
                eprintln!("Warning: {}", error);
            }
            if libraries.is_empty() && !errors.is_empty() {
                return 1;
            }
            libraries
        }
        None => match load_library(library) {
            Ok(lib) => vec![lib],
            Err(e) => {
                eprintln!("Error: {:#}", e);
                return 1;
            }
        },
    };

    for library in &libraries {
        print_library(library, pins);
    }
    0
}

fn print_library(library: &GateLibrary, pins: bool) {
    println!("Gate library '{}' ({} types):\n", library.name(), library.len());
    for gate_type in library.gate_types() {
        println!("  {}", gate_type.name);
        if pins {
            let inputs: Vec<&str> = gate_type.input_pins().collect();
            let outputs: Vec<&str> = gate_type.output_pins().collect();
            println!("    in:  {}", inputs.join(", "));
            println!("    out: {}", outputs.join(", "));
        }
    }
}

fn print_stats_human(stats: &NetlistStats) {
    println!("    Gates:     {}", stats.gate_count);
    println!("    Nets:      {}", stats.net_count);
    println!("    Endpoints: {}", stats.connection_count);
    println!("    Inputs:    {}", stats.global_input_count);
    println!("    Outputs:   {}", stats.global_output_count);
    println!("    Unrouted:  {}", stats.unrouted_count);
}

fn print_json(value: &serde_json::Value) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn display_name(net: &Net) -> &str {
    if net.name().is_empty() {
        "<unnamed>"
    } else {
        net.name()
    }
}
