mod brand;
mod catalog;
mod discover;
mod parser;
mod patcher;

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "evora_tools", about = "Maintenance tools for the Evora Electronics storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract all products from listing pages into one JSON catalog
    Extract {
        /// Site root to scan
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Catalog file to write
        #[arg(short, long, default_value = "products.json")]
        output: PathBuf,
        /// JSON brand table replacing the built-in one
        #[arg(long)]
        brands: Option<PathBuf>,
    },
    /// Add the navbar search widget to every page missing it
    Patch {
        /// Site root to scan
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Extract { root, output, brands } => run_extract(&root, &output, brands.as_deref()),
        Commands::Patch { root } => run_patch(&root),
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

fn run_extract(root: &Path, output: &Path, brands: Option<&Path>) -> anyhow::Result<()> {
    let table = match brands {
        Some(path) => brand::BrandTable::load(path)?,
        None => brand::BrandTable::default(),
    };

    let pages = discover::listing_pages(root)?;
    println!("Found {} HTML files to process", pages.len());

    let mut records = Vec::new();
    for page in &pages {
        println!("Processing {}", page.display());
        let found = parser::extract_page(page, root, &table)?;
        println!("  Found {} products", found.len());
        records.extend(found);
    }

    println!("Total products found: {}", records.len());
    catalog::write(output, &records)?;
    println!("{} created successfully!", output.display());
    Ok(())
}

fn run_patch(root: &Path) -> anyhow::Result<()> {
    let pages = discover::patchable_pages(root)?;
    println!("Found {} HTML files to update", pages.len());

    let stats = patcher::patch_pages(&pages);
    println!(
        "\nUpdated {} files successfully! ({} skipped, {} failed)",
        stats.updated, stats.skipped, stats.failed
    );
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}
