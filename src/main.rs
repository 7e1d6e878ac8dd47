//! # wadmap
//!
//! Command-line front end for the WAD map reader. With only a file argument
//! it lists every map entry as JSON; with an entry id it decodes that map
//! and prints its record counts.
//!
//! ## License
//! Licensed under the MIT License.

use std::env;
use std::error::Error;
use std::fs;
use std::process;

use log::info;

use wadmap::geom::MapGeometry;
use wadmap::wad::{macbinary, Wad};

fn usage() -> ! {
    eprintln!("usage: wadmap <file.wad> [entry-id]");
    process::exit(2);
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let path = match args.get(1) {
        Some(path) => path,
        None => usage(),
    };
    let entry_id = match args.get(2) {
        Some(raw) => Some(raw.parse::<u16>().map_err(|_| "entry id must be a number")?),
        None => None,
    };
    if args.len() > 3 {
        usage();
    }

    info!("reading {}", path);
    let file = fs::read(path)?;
    // Files that went through a Mac file-transfer tool carry a MacBinary
    // wrapper; strip it when present.
    let wad = Wad::from_bytes(macbinary::data_fork(&file).to_vec())?;

    match entry_id {
        None => {
            let summaries = wad.read_map_summaries()?;
            println!("{}", serde_json::to_string_pretty(&summaries)?);
        }
        Some(id) => {
            let map = MapGeometry::from_wad(&wad, id)?;
            if let Some(info) = &map.info {
                println!("{} ({})", info.name, id);
            } else {
                println!("entry {}", id);
            }
            println!("  points:    {}", map.points.len());
            println!("  lines:     {}", map.lines.len());
            println!("  sides:     {}", map.sides.len());
            println!("  polygons:  {}", map.polygons.len());
            println!("  lights:    {}", map.lights.len());
            println!("  objects:   {}", map.objects.len());
            println!("  media:     {}", map.media.len());
            println!("  platforms: {}", map.platforms.len());
            println!("  notes:     {}", map.notes.len());
            println!("  checksum:  {:08x}", map.checksum());
        }
    }

    info!("done");
    Ok(())
}
