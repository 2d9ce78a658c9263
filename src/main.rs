mod module_builder;
mod svg_extract;

use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "svg2ripple")]
#[command(about = "Convert SVG icons to Ripple icon registry modules")]
struct Cli {
    /// Input directory containing SVG files
    #[arg(short, long, default_value = "./icons")]
    input: PathBuf,

    /// Output directory for generated modules (must already exist)
    #[arg(short, long, default_value = "./ripple-icon")]
    output: PathBuf,

    /// Module specifier of the icon registry imported by each generated file
    #[arg(short, long, default_value = "@dpc-sdp/ripple-icon")]
    registry: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    convert_icons(&cli.input, &cli.output, &cli.registry, cli.verbose)?;

    println!("Done! Check out {} to see your icons", cli.output.display());

    Ok(())
}

/// Convert every file in the input directory into a registry module.
fn convert_icons(input: &Path, output: &Path, registry: &str, verbose: bool) -> Result<()> {
    if verbose {
        println!("Scanning icons in: {}", input.display());
    }

    let files = svg_extract::scan_icon_dir(input)?;

    if verbose {
        println!("Found {} icons", files.len());
    }

    for file in &files {
        let icon = svg_extract::extract_icon(file, input)?;
        let module_path = module_builder::write_module(&icon, registry, output)?;

        if verbose {
            println!("  Converted: {} -> {}", icon.name, module_path.display());
        }
    }

    Ok(())
}
