//! Write a large file of f64 samples through a mapped sink

use memarray::FileSink;
use std::time::Instant;

fn main() -> memarray::Result<()> {
    let count = 10_000_000;
    println!("Writing {count} f64 samples through a mapped sink...");

    let start = Instant::now();
    let mut sink = FileSink::<f64>::open("records.bin", count)?;
    for (i, slot) in sink.iter_mut().enumerate() {
        *slot = (i as f64).sqrt();
    }
    sink.close()?;
    let write_time = start.elapsed();

    println!("Wrote {} bytes in {write_time:?}", count * 8);
    println!("\nRun 'cargo run --example read_records' to map it back!");
    Ok(())
}
