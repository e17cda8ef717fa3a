//! Better Leaves generator CLI
//!
//! Generate blockstates, models and stitched textures for the Better
//! Leaves resourcepack, then zip them up.

use betterleaves_gen::{pack, GenConfig, GenPaths, Generator, Overrides};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "betterleaves-gen")]
#[command(author, version, about = "Generate the Better Leaves resourcepack", long_about = None)]
struct Cli {
    /// Pack version string (e.g. "9.0")
    version: String,

    /// Edition label; remaining words are joined with spaces
    #[arg(num_args = 0..)]
    edition: Vec<String>,

    /// Use legacy models for all leaves
    #[arg(short, long)]
    legacy: bool,

    /// Use programmer art textures
    #[arg(short, long)]
    programmer: bool,

    /// Minify all JSON output files
    #[arg(short, long)]
    minify: bool,

    /// Also generate snowy overlay textures, models and predicates
    #[arg(long)]
    snowy: bool,

    /// Input tree root
    #[arg(long, default_value = "input")]
    input: PathBuf,

    /// Template tree holding the static model parts
    #[arg(long, default_value = "base")]
    base: PathBuf,

    /// Output root for the assets tree, pack.mcmeta and the archive
    #[arg(long, default_value = ".")]
    output: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();
    let start = Instant::now();

    println!("Better Leaves pack generator");
    println!();

    let edition = if cli.edition.is_empty() {
        "§cCustom Edition".to_string()
    } else {
        cli.edition.join(" ")
    };
    let config = GenConfig {
        version: cli.version.clone(),
        edition,
        legacy_models: cli.legacy,
        programmer_art: cli.programmer,
        minify: cli.minify,
        snowy: cli.snowy,
    };

    let overrides = Overrides::load(&cli.input.join("overrides.json"))?;
    let paths = GenPaths::new(cli.input, cli.base, cli.output);

    let generator = Generator::new(config.clone(), paths.clone(), overrides);
    generator.run()?;

    pack::write_pack_metadata(&paths.input, &paths.output, &config.version, &config.edition)?;

    println!();
    println!("Zipping it up...");
    let archive_name = if cli.programmer {
        format!("Better-Leaves-(Programmer-Art)-{}.zip", config.version)
    } else {
        format!("Better-Leaves-{}.zip", config.version)
    };
    let archive = pack::make_zip(&paths.output, &archive_name, cli.programmer)?;
    println!("Done! Wrote {}", archive.display());
    println!(
        "--- Finished in {:.3} seconds ---",
        start.elapsed().as_secs_f64()
    );
    Ok(())
}
