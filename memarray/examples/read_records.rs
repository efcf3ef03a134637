//! Map the sample file back read-only and scan it sequentially

use memarray::{AccessPattern, FileSource};
use std::time::Instant;

fn main() -> memarray::Result<()> {
    let start = Instant::now();
    let source = FileSource::<f64>::open("records.bin", AccessPattern::Sequential)?;
    println!(
        "Mapped {} bytes ({} samples) in {:?}",
        source.byte_len(),
        source.len(),
        start.elapsed()
    );

    let scan_start = Instant::now();
    let sum: f64 = source.iter().sum();
    let scan_time = scan_start.elapsed();

    println!("Sum of samples: {sum:.3} (scanned in {scan_time:?})");
    if let Some(first) = source.get(0) {
        println!("First sample: {first}");
    }
    Ok(())
}
