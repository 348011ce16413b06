//! Data-prep helpers for the product and location catalogs.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::Context;
use clap::{Parser, Subcommand};
use common::utils::logging::LogFormat;
use dotenvy::dotenv;
use tracing::info;

use service::catalog::CatalogSource;
use service::products::{convert, ProductCatalog};

#[derive(Debug, Parser)]
#[command(name = "catalog-tool", about = "Convert and sample catalog data")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a product CSV into products.yaml and categories.yaml
    Convert {
        /// CSV file with one product per row and a header line
        csv: PathBuf,
        /// Output products file (defaults to catalog.products_path)
        #[arg(long)]
        products: Option<PathBuf>,
        /// Output categories file (defaults to catalog.categories_path)
        #[arg(long)]
        categories: Option<PathBuf>,
    },
    /// Print the products belonging to the given categories as YAML
    Sample {
        /// Products YAML file (defaults to catalog.products_path)
        #[arg(long)]
        products: Option<PathBuf>,
        /// Category to keep; repeatable
        #[arg(long = "category", short = 'c', required = true)]
        categories: Vec<String>,
    },
    /// Load the locations catalog and print index statistics
    Check {
        /// Locations file (defaults to catalog.locations_path)
        path: Option<PathBuf>,
        /// Tag field (defaults to catalog.tag_field)
        #[arg(long)]
        tag_field: Option<String>,
    },
}

async fn create_output(path: &Path) -> anyhow::Result<BufWriter<File>> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        common::env::ensure_data_dir(parent).await?;
    }
    let file = File::create(path).with_context(|| format!("cannot create {}", path.display()))?;
    Ok(BufWriter::new(file))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    dotenv().ok();
    common::utils::logging::init_logging(LogFormat::Compact);
    let cfg = configs::AppConfig::load_or_env()?;

    match cli.command {
        Command::Convert { csv, products, categories } => {
            let input = File::open(&csv).with_context(|| format!("cannot open {}", csv.display()))?;
            let converted = convert::convert_csv(input)?;

            let products_path = products.unwrap_or(cfg.catalog.products_path);
            let categories_path = categories.unwrap_or(cfg.catalog.categories_path);
            let mut out = create_output(&products_path).await?;
            converted.write_products(&mut out)?;
            out.flush()?;
            let mut out = create_output(&categories_path).await?;
            converted.write_categories(&mut out)?;
            out.flush()?;

            info!(
                event = "catalog_converted",
                products = converted.products.len(),
                categories = converted.categories.len(),
                products_path = %products_path.display(),
                categories_path = %categories_path.display(),
                "catalog converted"
            );
        }
        Command::Sample { products, categories } => {
            let path = products.unwrap_or(cfg.catalog.products_path);
            let catalog = ProductCatalog::load(&path)?;
            let sample = catalog.subcategory_sample(&categories);
            info!(event = "catalog_sampled", matched = sample.len(), total = catalog.records().len(), "sampled products");
            serde_yaml::to_writer(io::stdout().lock(), &sample)?;
        }
        Command::Check { path, tag_field } => {
            let source = CatalogSource::new(
                path.unwrap_or(cfg.catalog.locations_path),
                tag_field.unwrap_or(cfg.catalog.tag_field),
            );
            let index = source.load_index()?;
            println!("locations: {}", index.len());
            println!("{}: {}", index.tag_field(), index.tag_count());
            let mut tags: Vec<_> = index.tags().collect();
            tags.sort_unstable();
            for tag in tags {
                let count = index.by_tag(tag).map(|b| b.len()).unwrap_or_default();
                println!("  {tag}: {count}");
            }
        }
    }
    Ok(())
}
