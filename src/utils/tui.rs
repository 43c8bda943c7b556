//! Text User Interface (TUI) utilities.
//!
//! Handles formatted output for the CLI.

use crate::registry::{AlgorithmRegistry, AlgorithmRunner};
use crate::utils::bench::format_raw;
use crate::utils::runner::RawTimingData;
use crate::utils::timer::{TimingConfig, VariantResult};
use terminal_size::{terminal_size, Width};

/// Get the current terminal width, constrained to a reasonable range
fn get_term_width() -> usize {
    if let Some((Width(w), _)) = terminal_size() {
        (w as usize).clamp(40, 200)
    } else {
        80
    }
}

/// Sorting priority for a variant. The scalar reference always leads so the
/// speedup baseline is unambiguous; narrow-load kernels come before the
/// double-width-load ones.
fn variant_sort_key(result: &VariantResult) -> (u8, String) {
    let name = result.name.to_lowercase();

    if name == "scalar" {
        (0, String::new())
    } else if name.starts_with("unroll") {
        (1, name)
    } else if name.starts_with("wide") {
        (2, name)
    } else {
        (3, name)
    }
}

/// Sort variants: scalar reference first, then by kernel family
pub fn sort_variants(results: &mut [VariantResult]) {
    results.sort_by_key(variant_sort_key);
}

/// Print algorithm info box
pub fn print_algo_info_box(algo: &dyn AlgorithmRunner) {
    let term_width = get_term_width();
    let max_content_width = term_width.saturating_sub(4).max(40);

    let variants_str = algo.available_variants().join(", ");
    let name_line = format!("Algorithm: {}", algo.name());
    let cat_line = format!("Category:  {}", algo.category());
    let desc_line = algo.description();
    let var_line = format!("Variants: {}", variants_str);

    let content_width = [
        name_line.len(),
        cat_line.len(),
        desc_line.len(),
        var_line.len(),
    ]
    .iter()
    .cloned()
    .max()
    .unwrap_or(60)
    .min(max_content_width);

    let border = "─".repeat(content_width + 2);

    println!("┌{}┐", border);
    println!(
        "│ {:<width$} │",
        truncate(&name_line, content_width),
        width = content_width
    );
    println!(
        "│ {:<width$} │",
        truncate(&cat_line, content_width),
        width = content_width
    );
    println!(
        "│ {:<width$} │",
        truncate(desc_line, content_width),
        width = content_width
    );
    println!("├{}┤", border);
    println!(
        "│ {:<width$} │",
        truncate(&var_line, content_width),
        width = content_width
    );
    println!("└{}┘", border);
    println!();
}

/// Truncate string with ellipsis if it exceeds width (character-wise)
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut result: String = s.chars().take(width.saturating_sub(3)).collect();
        result.push_str("...");
        result
    }
}

/// Print results table for a single size.
///
/// Speedup is relative to the first variant (the scalar reference after
/// sorting). The Agree column compares each variant's result value against
/// that same baseline; integer kernels either match exactly or not at all.
pub fn print_results_table(results: &[VariantResult], size: usize, runs: usize, show_size: bool) {
    if results.is_empty() {
        return;
    }

    let term_width = get_term_width();
    let fixed_width = 70;
    let variant_col_width = term_width.saturating_sub(fixed_width).max(10);
    let table_width = variant_col_width + 64 + 6;

    let baseline_avg = results
        .first()
        .map(|r| r.avg_raw_f64)
        .unwrap_or(1.0);
    let baseline_result = results.first().and_then(|r| r.result_sample);

    if show_size {
        println!("  Size: {} ({} runs)", size, runs);
    }
    println!("  {}", "─".repeat(table_width));
    println!(
        "  {:<v_width$} {:>12} {:>12} {:>12} {:>9} {:>9} {:>12} {:>6}",
        "Variant",
        "Average",
        "Min",
        "Max",
        "Speedup",
        "CV",
        "Result",
        "Agree",
        v_width = variant_col_width
    );
    println!("  {}", "─".repeat(table_width));

    for result in results {
        let speedup = if result.avg_raw_f64 > 0.0 {
            baseline_avg / result.avg_raw_f64
        } else {
            0.0
        };

        let std_dev = result.std_dev.as_nanos() as f64;
        let cv = if result.avg_raw_f64 > 0.0 {
            std_dev / result.avg_raw_f64
        } else {
            0.0
        };

        let (result_str, agree_str) = match (result.result_sample, baseline_result) {
            (Some(res), Some(base)) => (
                format!("{}", res as i64),
                if res == base { "yes" } else { "NO" },
            ),
            (Some(res), None) => (format!("{}", res as i64), "-"),
            _ => ("-".to_string(), "-"),
        };

        println!(
            "  {:<v_width$} {:>12} {:>12} {:>12} {:>8.2}x {:>8.2}% {:>12} {:>6}",
            truncate(&result.name, variant_col_width),
            format_raw(result.avg_time.as_nanos() as u64),
            format_raw(result.min_time.as_nanos() as u64),
            format_raw(result.max_time.as_nanos() as u64),
            speedup,
            cv * 100.0,
            result_str,
            agree_str,
            v_width = variant_col_width
        );
    }
    println!();
}

/// Print the application header
pub fn print_header() {
    let term_width = get_term_width().min(80);
    let title = " Integer Dot-Product Kernel Benchmarks ";
    let padding = term_width.saturating_sub(title.len() + 2) / 2;
    let right_padding = term_width.saturating_sub(padding + title.len());

    let border = "═".repeat(term_width);

    println!("╔{}╗", border);
    println!(
        "║{}{}{}║",
        " ".repeat(padding),
        title,
        " ".repeat(right_padding)
    );
    println!("╚{}╝", border);
    println!();
}

/// Print the help message
pub fn print_help() {
    println!("Usage: dot16-bench [OPTIONS] [ALGORITHM]");
    println!();
    println!("Options:");
    println!("  --list, -l     List all available algorithms");
    println!("  --help, -h     Show this help message");
    println!("  --sizes SIZES  Comma-separated vector lengths (default: 64,256,1024,1027)");
    println!("  --iter N       Kernel calls per timing sample (default: 10000)");
    println!("  --seed N       Seed for the sample interleaving order (default: time-based)");
    println!("  --csv PATH     Export raw timings to a CSV file");
    println!("  --pin TARGET   Core to pin to: current, first, last (default: current)");
    println!();
    println!("Arguments:");
    println!("  ALGORITHM      Name of specific algorithm to run (omit for all)");
    println!();
    println!("Examples:");
    println!("  dot16-bench                    # Run all algorithms");
    println!("  dot16-bench dot_product        # Run only dot_product");
    println!("  dot16-bench --sizes 1024,1027  # The lengths the kernels were tuned on");
    println!("  dot16-bench --pin last         # Pin to the performance core class");
    println!("  dot16-bench --csv data.csv     # Export raw timings to CSV");
}

/// Print the list of available algorithms
pub fn print_available_algorithms(registry: &AlgorithmRegistry) {
    println!("Available algorithms:");
    println!();
    for algo in registry.all() {
        println!(
            "  {:<20} [{}] - {}",
            algo.name(),
            algo.category(),
            algo.description()
        );
    }
}

/// Run one algorithm over all requested sizes, printing a table per size.
///
/// Returns the raw rows for optional CSV export.
pub fn run_and_display(
    algo: &dyn AlgorithmRunner,
    sizes: &[usize],
    iterations: usize,
    config: &TimingConfig,
) -> Vec<RawTimingData> {
    print_algo_info_box(algo);

    let mut csv_rows = Vec::new();
    for &size in sizes {
        let mut results = algo.run_benchmarks(size, iterations, config);
        if results.is_empty() {
            continue;
        }
        sort_variants(&mut results);

        csv_rows.extend(results.iter().map(|r| RawTimingData {
            algo_name: algo.name().to_string(),
            variant_name: r.name.clone(),
            input_size: size,
            avg_raw: r.avg_time.as_nanos() as u64,
            result_sample: r.result_sample,
        }));

        print_results_table(&results, size, config.runs_per_variant, true);
    }
    csv_rows
}
