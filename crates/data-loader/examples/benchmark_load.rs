use data_loader::{CatalogCache, DatasetConfig, DatasetLoader};
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    let loader = DatasetLoader::new(
        DatasetConfig::with_data_dir("data"),
        Arc::new(CatalogCache::new()),
    )?;

    println!("Loading every platform catalog...\n");

    let start = Instant::now();
    let combined = loader.load_all()?;
    let cold = start.elapsed();

    let start = Instant::now();
    let _ = loader.load_all()?;
    let warm = start.elapsed();

    println!("=== Load Complete ===");
    println!("Cold load: {:?}", cold);
    println!("Cached load: {:?}", warm);
    for platform in combined.platforms() {
        println!("{}: {} titles", platform, combined.for_platform(platform).len());
    }
    for missing in combined.missing() {
        println!("{}: missing ({})", missing.platform, missing.path.display());
    }
    println!(
        "\nPerformance: {:.0} titles/second",
        combined.len() as f64 / cold.as_secs_f64()
    );
    Ok(())
}
