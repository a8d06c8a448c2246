//! Main entry point for the kmz2csv CLI application.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::Path;

use kmz2csv::cli::Command;
use kmz2csv::kml::inspect::{self, StyleLookup};
use kmz2csv::{Classification, Cli, KmzArchive, analyze, logging, record};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_level());

    match cli.command {
        Command::Convert {
            file,
            output,
            classification,
        } => {
            let table = match classification {
                Some(path) => Classification::from_path(&path)?,
                None => Classification::builtin()?,
            };
            kmz2csv::convert(&file, &output, &table)
                .with_context(|| format!("Failed to convert {}", file.display()))?;
        }
        Command::Analyze { csv } => {
            let records = record::read_csv(&csv)
                .with_context(|| format!("Failed to read {}", csv.display()))?;
            print!("{}", analyze::render(&analyze::summarize(&records)));
        }
        Command::List { file, long } => list_entries(&file, long)?,
        Command::Structure { file } => print_structure(&file)?,
        Command::Style { file, id } => print_style(&file, &id)?,
        Command::Fields { file } => print_fields(&file)?,
        Command::Linestring { file } => print_linestring(&file)?,
    }

    Ok(())
}

/// List archive entries; the long format adds sizes and compression
fn list_entries(path: &Path, long: bool) -> Result<()> {
    let archive = KmzArchive::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    if long {
        println!(
            "{:>10}  {:<6}  {:>10}  {:>5}  Name",
            "Length", "Method", "Size", "Cmpr"
        );
        println!("{}", "-".repeat(60));
    }

    for entry in archive.entries() {
        if long {
            // Percentage saved by compression
            let ratio = if entry.uncompressed_size > 0 {
                100u64.saturating_sub(entry.compressed_size * 100 / entry.uncompressed_size)
            } else {
                0
            };
            println!(
                "{:>10}  {:<6}  {:>10}  {:>4}%  {}",
                entry.uncompressed_size,
                entry.compression_method.label(),
                entry.compressed_size,
                ratio,
                entry.file_name
            );
        } else {
            println!("{}", entry.file_name);
        }
    }

    Ok(())
}

fn print_structure(path: &Path) -> Result<()> {
    let source = kmz2csv::load_document(path)?;
    let doc = source.parse()?;

    for entry in inspect::outline(&doc) {
        let indent = "  ".repeat(entry.depth);
        println!(
            "{indent}{}: {}",
            entry.kind,
            entry.name.as_deref().unwrap_or("Unnamed")
        );
        if entry.placemarks > 0 {
            println!("{indent}  Contains {} Placemarks", entry.placemarks);
            println!(
                "{indent}  Sample Placemark StyleUrl: {}",
                entry.sample_style.as_deref().unwrap_or("None")
            );
        }
    }

    Ok(())
}

fn print_style(path: &Path, id: &str) -> Result<()> {
    let source = kmz2csv::load_document(path)?;
    let doc = source.parse()?;

    match inspect::find_style(&doc, id) {
        Some(StyleLookup::Style { id, icon_style }) => {
            println!("Found Style with ID: {id}");
            if let Some(icon) = icon_style {
                println!("  IconStyle:");
                println!("    Color: {}", icon.color.as_deref().unwrap_or("None"));
                println!("    Scale: {}", icon.scale.as_deref().unwrap_or("None"));
                println!("    Icon href: {}", icon.href.as_deref().unwrap_or("None"));
            }
        }
        Some(StyleLookup::StyleMap { id, pairs }) => {
            println!("Found StyleMap with ID: {id}");
            for (key, url) in pairs {
                println!(
                    "  Pair: {} -> {}",
                    key.as_deref().unwrap_or("None"),
                    url.as_deref().unwrap_or("None")
                );
            }
        }
        None => println!(
            "Style or StyleMap with ID {} not found.",
            id.trim_matches('#')
        ),
    }

    Ok(())
}

fn print_fields(path: &Path) -> Result<()> {
    let source = kmz2csv::load_document(path)?;
    let doc = source.parse()?;
    let inventory = inspect::field_inventory(&doc);

    println!("Found {} Placemarks.", inventory.placemarks);
    println!("\nUnique Tags within Placemark:");
    for tag in &inventory.tags {
        println!("- {tag}");
    }

    if inventory.extended_fields.is_empty() {
        println!("\nNo ExtendedData fields found.");
    } else {
        println!("\nExtendedData Fields:");
        for field in &inventory.extended_fields {
            println!("- {field}");
        }
    }

    Ok(())
}

fn print_linestring(path: &Path) -> Result<()> {
    let source = kmz2csv::load_document(path)?;
    let doc = source.parse()?;

    match inspect::first_linestring(&doc) {
        Some(sample) => {
            println!("Found Placemark with LineString:");
            println!("Name: {}", sample.name.as_deref().unwrap_or("None"));
            println!(
                "Description: {}",
                sample.description.as_deref().unwrap_or("None")
            );
            println!(
                "Coordinates (snippet): {}...",
                sample.coordinates.as_deref().unwrap_or("None")
            );
        }
        None => println!("No LineString found."),
    }

    Ok(())
}
