use clap::Parser;
use std::fs;
use std::path::PathBuf;
use pixel_palette_wasm::{PaletteOptions, extract_palette_bytes};
use anyhow::Context;
use anyhow::Result;
use serde_json::json;

/// Print the exact color palette of pixel-art images.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// One or more input image paths
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// ΔE below which a color is folded into an earlier one (0 = exact matches only)
    #[arg(short, long, default_value_t = 1.0)]
    threshold: f64,

    /// Pixels with alpha at or below this value are ignored
    #[arg(short = 'a', long, default_value_t = 10)]
    min_alpha: u8,

    /// Stop after this many colors
    #[arg(short = 'm', long, default_value_t = 30)]
    max_colors: i64,

    /// Emit one JSON object per input instead of plain hex codes
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let options = PaletteOptions::from_signed(args.threshold, i64::from(args.min_alpha), args.max_colors)
        .context("invalid palette options")?;

    for input in &args.inputs {
        let bytes = fs::read(input).with_context(|| format!("reading {}", input.display()))?;
        let palette = extract_palette_bytes(&bytes, &options)
            .with_context(|| format!("palette extraction failed for {}", input.display()))?;

        if args.json {
            let doc = json!({
                "file": input.display().to_string(),
                "colors": palette.hex_codes(),
                "overflowed": palette.overflowed,
                "count": palette.count,
            });
            println!("{doc}");
        } else {
            if args.inputs.len() > 1 {
                println!("{} ({}):", input.display(), palette.count);
            }
            for hex in palette.hex_codes() {
                println!("{hex}");
            }
            if palette.overflowed {
                println!("+");
            }
        }
    }

    Ok(())
}
