//! Benchmark export utilities: raw timing rows and CSV output.

use super::bench::unit_name;

/// Raw timing data for a single variant at a single input size.
pub struct RawTimingData {
    pub algo_name: String,
    pub variant_name: String,
    pub input_size: usize,
    pub avg_raw: u64,
    pub result_sample: Option<f64>,
}

/// Export timing data to a CSV file.
pub fn export_csv(path: &str, data: &[RawTimingData]) -> std::io::Result<()> {
    use std::io::Write;

    let mut file = std::fs::File::create(path)?;

    writeln!(file, "algorithm,variant,input_size,avg_{},result", unit_name())?;

    for entry in data {
        writeln!(
            file,
            "{},{},{},{},{}",
            entry.algo_name,
            entry.variant_name,
            entry.input_size,
            entry.avg_raw,
            entry
                .result_sample
                .map(|v| (v as i64).to_string())
                .unwrap_or_default()
        )?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_roundtrip() {
        let rows = vec![RawTimingData {
            algo_name: "dot_product".to_string(),
            variant_name: "scalar".to_string(),
            input_size: 1024,
            avg_raw: 1234,
            result_sample: Some(409767424.0),
        }];

        let path = std::env::temp_dir().join("dot16_bench_csv_test.csv");
        let path = path.to_str().unwrap();
        export_csv(path, &rows).unwrap();

        let contents = std::fs::read_to_string(path).unwrap();
        let mut lines = contents.lines();
        assert!(lines.next().unwrap().starts_with("algorithm,variant,input_size,avg_"));
        assert_eq!(
            lines.next().unwrap(),
            "dot_product,scalar,1024,1234,409767424"
        );
        std::fs::remove_file(path).ok();
    }
}
