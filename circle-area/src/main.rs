mod area;

use anyhow::{Context, Result};
use clap::Parser;

/// Compute the area of a circle given its radius
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Radius of the circle (non-negative real number)
    #[arg(allow_negative_numbers = true)]
    radius: f64,

    /// Round the result to N decimal places
    #[arg(long, short = 'p', value_name = "N")]
    precision: Option<u32>,

    /// Output as JSON with fields radius and area
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let circle = match area::circle(cli.radius, cli.precision) {
        Ok(circle) => circle,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    if cli.json {
        let json = serde_json::to_string(&circle).context("Failed to serialize result")?;
        println!("{}", json);
    } else {
        println!("{}", circle.area);
    }

    Ok(())
}
