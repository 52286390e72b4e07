use pforte_core::scrape::storage;

use super::common;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let session = common::open_session().await?;
    let usage = storage::fetch(&session).await?;
    println!(
        "{} of {} used ({} free)",
        human(usage.used_bytes),
        human(usage.total_bytes),
        human(usage.free_bytes())
    );
    Ok(())
}

fn human(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KiB", "MiB", "GiB", "TiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
