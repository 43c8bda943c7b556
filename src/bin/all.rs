//! Generic CLI for running algorithms.
//!
//! Usage:
//!   dot16-bench              # Run all algorithms
//!   dot16-bench --list       # List available algorithms
//!   dot16-bench dot_product  # Run specific algorithm
//!   dot16-bench --help      # Show help

use dot16_bench::registry::build_registry;
use dot16_bench::tui;
use dot16_bench::utils::cpu_affinity::PinTarget;
use dot16_bench::utils::runner::export_csv;
use dot16_bench::utils::timer::TimingConfig;
use std::env;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let registry = build_registry();

    // Parse arguments
    let mut show_list = false;
    let mut show_help = false;
    let mut sizes: Vec<usize> = vec![64, 256, 1024, 1027];
    let mut iterations: usize = 10000;
    let mut seed: Option<u64> = None;
    let mut csv_path: Option<String> = None;
    let mut pin_target = PinTarget::Current;
    let mut algorithm_filter: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--list" | "-l" => show_list = true,
            "--help" | "-h" => show_help = true,
            "--sizes" => {
                i += 1;
                if i < args.len() {
                    sizes = args[i]
                        .split(',')
                        .filter_map(|s| s.trim().parse().ok())
                        .collect();
                }
            }
            "--iter" => {
                i += 1;
                if i < args.len() {
                    iterations = args[i].parse().unwrap_or(10000);
                }
            }
            "--seed" => {
                i += 1;
                if i < args.len() {
                    seed = args[i].parse().ok();
                }
            }
            "--csv" => {
                i += 1;
                if i < args.len() {
                    csv_path = Some(args[i].clone());
                }
            }
            "--pin" => {
                i += 1;
                match args.get(i).map(|s| s.as_str()) {
                    Some("current") => pin_target = PinTarget::Current,
                    Some("first") => pin_target = PinTarget::First,
                    Some("last") => pin_target = PinTarget::Last,
                    other => {
                        eprintln!(
                            "Invalid --pin target {:?}; expected current, first, or last",
                            other.unwrap_or("")
                        );
                        std::process::exit(1);
                    }
                }
            }
            arg if !arg.starts_with('-') => {
                algorithm_filter = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if show_help {
        tui::print_help();
        return;
    }

    if show_list {
        tui::print_available_algorithms(&registry);
        return;
    }

    tui::print_header();

    let config = TimingConfig {
        seed,
        pin_target,
        ..Default::default()
    };

    let mut csv_rows = Vec::new();
    match algorithm_filter {
        Some(name) => match registry.find(&name) {
            Some(algo) => {
                csv_rows.extend(tui::run_and_display(algo, &sizes, iterations, &config));
            }
            None => {
                eprintln!("Algorithm '{}' not found.", name);
                eprintln!("Available: {:?}", registry.list_names());
                std::process::exit(1);
            }
        },
        None => {
            for algo in registry.all() {
                csv_rows.extend(tui::run_and_display(
                    algo.as_ref(),
                    &sizes,
                    iterations,
                    &config,
                ));
            }
        }
    }

    if let Some(path) = csv_path {
        match export_csv(&path, &csv_rows) {
            Ok(()) => println!("Raw timings written to {}", path),
            Err(e) => {
                eprintln!("Failed to write CSV '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }

    println!("Note: Speedup is relative to the scalar reference.");
}
