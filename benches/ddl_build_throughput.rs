/// Benchmark for schema DDL construction
///
/// Measures how fast tag/edge and space statements are assembled,
/// including identifier validation, for schemas of growing width.

use nebula_sdk::{SchemaSpec, SpaceSpec};
use std::hint::black_box;
use std::time::Instant;

fn main() {
    println!("=== DDL Build Throughput Benchmark ===\n");

    let iterations = 100_000;

    println!("📊 CREATE SPACE:");
    let start = Instant::now();
    for i in 0..iterations {
        let spec = SpaceSpec::new(format!("space_{}", i)).if_not_exists();
        black_box(spec.build().expect("valid space"));
    }
    let duration = start.elapsed();
    let space_ops_per_sec = iterations as f64 / duration.as_secs_f64();
    println!("  Iterations: {}", iterations);
    println!("  Time: {:?}", duration);
    println!("  Throughput: {:.0} statements/sec", space_ops_per_sec);
    println!();

    let mut tag_rates = Vec::new();
    for width in [1usize, 8, 32] {
        println!("📊 CREATE TAG with {} fields:", width);
        let spec = (0..width).fold(SchemaSpec::tag("player").if_not_exists(), |spec, i| {
            spec.field(format!("prop_{}", i), "string")
        });

        let start = Instant::now();
        for _ in 0..iterations {
            black_box(spec.build().expect("valid tag"));
        }
        let duration = start.elapsed();
        let ops_per_sec = iterations as f64 / duration.as_secs_f64();
        println!("  Time: {:?}", duration);
        println!("  Throughput: {:.0} statements/sec", ops_per_sec);
        println!();
        tag_rates.push((width, ops_per_sec));
    }

    println!("=== Summary ===");
    println!("  CREATE SPACE: {:.0} statements/sec", space_ops_per_sec);
    for (width, rate) in tag_rates {
        println!("  CREATE TAG ({:>2} fields): {:.0} statements/sec", width, rate);
    }
}
