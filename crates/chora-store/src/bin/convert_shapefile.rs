//! Helper binary to convert Shapefiles to layer GeoJSON files.
//!
//! Usage: convert-shapefile <input.shp> <output.geojson>

use anyhow::Context;
use std::path::PathBuf;
use std::process;

use chora_store::shapefile::convert_shapefile;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    let [input, output] = args.as_slice() else {
        eprintln!("Usage: convert-shapefile <input.shp> <output.geojson>");
        eprintln!("Example: convert-shapefile data/pottery.shp public/data/pottery.geojson");
        process::exit(1);
    };

    let input = PathBuf::from(input);
    let output = PathBuf::from(output);

    println!("Converting {} to GeoJSON...", input.display());
    let count = convert_shapefile(&input, &output)
        .with_context(|| format!("converting {}", input.display()))?;

    println!("Successfully converted to {}", output.display());
    println!("  Features: {count}");
    Ok(())
}
