mod app;
mod data;
mod util;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Path to the population CSV (columns: key, value, region).
    #[arg(long, default_value = "data/world-population.csv")]
    csv: String,
}

fn main() -> eframe::Result<()> {
    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1280.0, 860.0]),
        ..Default::default()
    };

    eframe::run_native(
        "world-bubbles",
        options,
        Box::new(move |cc| Ok(Box::new(app::BubbleApp::new(cc, args.csv.clone())))),
    )
}
