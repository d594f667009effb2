use std::path::PathBuf;

use clap::Parser;
use topview_world::{RegionCoord, parse_region_file_name};

const MODES_HELP: &str = "\
Modes:
  topview <region-dir> <x> <z>     four 256x256 quadrant tiles of r.<x>.<z>.mca
  topview <region-file> <output>   one 512x512 image of a single region
  topview <region-dir>             quadrant tiles for every region in the directory";

#[derive(Parser, Debug)]
#[command(name = "topview")]
#[command(about = "Render top-down PNG tiles from Minecraft region files")]
#[command(after_help = MODES_HELP)]
pub struct Cli {
    /// Region directory, or a single `.mca` file
    pub source: PathBuf,

    /// Region X coordinate, or the output image path when `source` is a file
    #[arg(allow_negative_numbers = true)]
    pub first: Option<String>,

    /// Region Z coordinate
    #[arg(allow_negative_numbers = true)]
    pub second: Option<String>,

    /// Number of render worker threads [default: 2]
    #[arg(short = 'j', long = "procs", visible_alias = "jobs", value_parser = parse_workers)]
    pub procs: Option<usize>,

    /// Log per-quadrant progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory quadrant tiles are written to [default: .]
    #[arg(short = 'o', long)]
    pub out_dir: Option<PathBuf>,

    /// TOML palette merged over the builtin block colors
    #[arg(long)]
    pub palette: Option<PathBuf>,

    /// TOML config file with a `[render]` table
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Scan from y=127 and look through the bedrock roof
    #[arg(short = 'n', long)]
    pub nether: bool,

    /// Write `chunk_range.json` with the rendered region bounds (directory mode)
    #[arg(short = 'r', long)]
    pub gen_range: bool,
}

/// What a command line asks to render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    /// All four quadrants of one region.
    Quadrants { source: PathBuf, region: RegionCoord },
    /// One region file rendered whole into `output`.
    Single { source: PathBuf, region: RegionCoord, output: PathBuf },
    /// All quadrants of every region file found in `dir`.
    Directory { dir: PathBuf },
}

impl Cli {
    pub fn mode(&self) -> Result<Mode, String> {
        match (&self.first, &self.second) {
            (Some(x), Some(z)) => {
                let x = parse_coord("region-x", x)?;
                let z = parse_coord("region-z", z)?;
                Ok(Mode::Quadrants {
                    source: self.source.clone(),
                    region: RegionCoord::new(x, z),
                })
            }
            (Some(output), None) => {
                if self.source.is_dir() {
                    return Err(format!(
                        "{} is a directory; pass <region-x> <region-z> or a single region file",
                        self.source.display()
                    ));
                }
                // Chunk slots are addressed relative to the file, so an
                // unconventional file name still renders.
                let region = parse_region_file_name(&self.source).unwrap_or_default();
                Ok(Mode::Single {
                    source: self.source.clone(),
                    region,
                    output: PathBuf::from(output),
                })
            }
            (None, _) => {
                if !self.source.is_dir() {
                    return Err(format!(
                        "{} is not a directory; pass <region-x> <region-z> or an output path",
                        self.source.display()
                    ));
                }
                Ok(Mode::Directory {
                    dir: self.source.clone(),
                })
            }
        }
    }
}

fn parse_coord(name: &str, value: &str) -> Result<i32, String> {
    value
        .parse()
        .map_err(|_| format!("<{name}> must be an integer, got '{value}'"))
}

fn parse_workers(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("at least one worker is required".into()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
