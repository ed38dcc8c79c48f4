//! Prints today's schedule, qibla direction and the last third of the night.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p miqat --example today -- 21.3891 39.8579 en
//! ```

use chrono::Local;
use miqat::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let lat: f64 = args.first().map_or(Ok(21.3891), |s| s.parse())?;
    let lng: f64 = args.get(1).map_or(Ok(39.8579), |s| s.parse())?;
    let locale: Locale = args.get(2).map_or(Ok(Locale::Latin), |s| s.parse())?;

    let coords = Coordinate::new(lat, lng)?;
    let settings = Settings::new().locale(locale);
    let now = Local::now().naive_local();

    let view = today(coords, now, &settings)?;
    println!("📍 {coords}");
    if let Some(hijri) = view.hijri_display(locale) {
        println!("📅 {} / {hijri}", now.date());
    }
    println!();

    for t in view.schedule.iter() {
        let marker = if t.is_next { "→" } else { " " };
        println!("{marker} {:<14} {}", t.name.label(locale), t.display);
    }
    if let Some(next) = view.next {
        println!("\n⏳ {} in {}", next.name.label(locale), next.countdown_text());
    }

    let dir = qibla(coords, &settings)?;
    println!(
        "\n🕋 Qibla {:.2}° ({}), {:.0} km",
        dir.bearing,
        dir.compass.label(locale),
        dir.distance_km
    );

    let night = last_third(coords, now.date(), &settings)?;
    println!("🌙 Last third {} (middle {})", night.start.time(), night.middle.time());

    Ok(())
}
