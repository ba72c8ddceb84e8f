use clap::{Parser, ValueEnum};
use tour_guide::Spot;
use tracing::instrument;

use super::{Guide, terminal::Colorize};

/// Command arguments for `tour list`.
#[derive(Debug, Default, Parser)]
#[command(about = "List the spots")]
pub struct List {
    /// Show only favorite spots.
    #[arg(long)]
    favorites: bool,

    /// Output format (default: pretty).
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

impl List {
    #[instrument(level = "debug", skip(guide))]
    pub fn run(self, guide: &Guide) -> anyhow::Result<()> {
        let state = guide.handler().state();

        // positions index the full list
        let rows: Vec<(usize, &Spot)> = state
            .spots
            .iter()
            .enumerate()
            .map(|(index, spot)| (index + 1, spot))
            .filter(|(_, spot)| !self.favorites || spot.is_favorite())
            .collect();

        match self.output {
            OutputFormat::Json => {
                let spots: Vec<&Spot> = rows.iter().map(|(_, spot)| *spot).collect();
                println!("{}", serde_json::to_string_pretty(&spots)?);
            }
            OutputFormat::Pretty => {
                if rows.is_empty() {
                    println!("{}", "No spots to show".dim());
                    return Ok(());
                }
                for (position, spot) in rows {
                    print_row(position, spot);
                }
                println!();
                println!(
                    "{}",
                    format!(
                        "{} spots, {} favorites",
                        state.spots.len(),
                        state.favorites_count()
                    )
                    .dim()
                );
            }
        }
        Ok(())
    }
}

fn print_row(position: usize, spot: &Spot) {
    let star = if spot.is_favorite() { "★" } else { " " };
    println!(
        "{position:>3}. {star} {}  {}  {:.1}",
        spot.name().info(),
        spot.location_description().dim(),
        spot.rating()
    );

    let highlights = spot.short_highlights();
    if !highlights.is_empty() {
        println!("       {}", highlights.dim());
    }
}
