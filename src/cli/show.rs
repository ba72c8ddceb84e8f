use clap::Parser;
use serde::Serialize;
use tour_guide::{Spot, UserSpotContent};
use tracing::instrument;

use super::{Guide, Reference, list::OutputFormat, parse_reference, terminal::Colorize};

#[derive(Debug, Parser)]
#[command(about = "Display a spot with its reviews, note and checklist")]
pub struct Show {
    /// The spot's id or list position
    #[clap(value_parser = parse_reference)]
    spot: Reference,

    /// Output format
    #[arg(long, value_enum, default_value_t)]
    output: OutputFormat,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SpotDetails<'a> {
    #[serde(flatten)]
    spot: &'a Spot,
    user_content: &'a UserSpotContent,
}

impl Show {
    #[instrument(level = "debug", skip(guide))]
    pub fn run(self, guide: &Guide) -> anyhow::Result<()> {
        let spot = guide.spot(self.spot)?;
        let content = guide.handler().state().content_for(&spot);

        match self.output {
            OutputFormat::Json => {
                let details = SpotDetails {
                    spot: &spot,
                    user_content: &content,
                };
                println!("{}", serde_json::to_string_pretty(&details)?);
            }
            OutputFormat::Pretty => output_pretty(&spot, &content),
        }
        Ok(())
    }
}

fn output_pretty(spot: &Spot, content: &UserSpotContent) {
    let star = if spot.is_favorite() { " ★" } else { "" };
    println!("# {}{star}", spot.name());
    println!(
        "{}\n",
        format!(
            "{} · {:.1} · {}",
            spot.location_description(),
            spot.rating(),
            spot.icon_or_default()
        )
        .dim()
    );
    println!("{}\n", spot.description());

    if !spot.highlights().is_empty() {
        println!("{}", "Highlights".dim());
        for highlight in spot.highlights() {
            println!("  • {highlight}");
        }
        println!();
    }

    if !spot.tags().is_empty() {
        println!("{} {}\n", "Tags:".dim(), spot.tags().join(", "));
    }

    if !spot.reviews().is_empty() {
        println!("{}", "Reviews".dim());
        for review in spot.reviews() {
            println!(
                "  {} {}",
                format!("{:.1}", review.rating).info(),
                review.title
            );
            println!(
                "      {}",
                format!("{}, {}", review.author, review.visit_date.format("%Y-%m-%d")).dim()
            );
            println!("      {}", review.body);
        }
        println!();
    }

    println!("{}", "Note".dim());
    if content.note.is_empty() {
        println!("  {}", "(none)".dim());
    } else {
        println!("  {}", content.note);
    }
    println!();

    println!(
        "{}",
        format!(
            "Checklist ({}/{})",
            content.completed_count(),
            content.checklist.len()
        )
        .dim()
    );
    for (index, item) in content.checklist.iter().enumerate() {
        let mark = if item.completed { "[x]" } else { "[ ]" };
        println!("  {:>2}. {mark} {}", index + 1, item.title);
    }
}
