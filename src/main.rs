#[macro_use]
extern crate error_chain;

use docopt::Docopt;
use mazegen::{
    cells::Cartesian2DCoordinate,
    generators,
    grid::MazeGrid,
    renderers::{
        svg::{self, SvgOptionsBuilder},
        world::{self, WorldOptionsBuilder},
    },
    units::{Length, Width},
};
use rand::{rngs::StdRng, SeedableRng};
use serde_derive::Deserialize;
use std::{
    fs::File,
    io,
    io::prelude::*,
    path::Path,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Mazegen

Generates a perfect maze with a randomised depth first search and saves it as an svg image
and/or a Webots world.

Usage:
    mazegen_driver [options]
    mazegen_driver -h | --help

Options:
    -h --help              Show this screen.
    -x --width=<w>         Number of cells wide the maze will be [default: 10].
    -y --length=<l>        Number of cells long the maze will be [default: 10].
    --start-x=<x>          Column of the cell carving starts from [default: 0].
    --start-y=<y>          Row of the cell carving starts from [default: 0].
    --seed=<n>             Random number generator seed. A random seed is logged if not given.
    --svg=<path>           Output svg file, `.svg` is appended if missing.
    --wbt=<path>           Output Webots world file, `.wbt` is appended if missing.
    --svg-scale=<n>        Image units per cell in the svg output [default: 10].
    --svg-padding=<n>      Margin around the maze in the svg output [default: 10].
    --wbt-scale=<f>        World units per cell in the Webots output [default: 0.1].
    --text-out=<path>      Write the text preview of the maze to a file instead of the console.
    --no-preview           Do not show the text preview.
    --save-edges=<path>    Serialize the maze to a text file: each line is a pair of numbers. Line 1: n(#cells) m(#passages). Line 2+ passage between cells. Uses 1-based row major cell indices.

Set RUST_LOG (e.g. RUST_LOG=debug) to change the logging level, default info.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_width: usize,
    flag_length: usize,
    flag_start_x: u32,
    flag_start_y: u32,
    flag_seed: Option<u64>,
    flag_svg: Option<String>,
    flag_wbt: Option<String>,
    flag_svg_scale: u32,
    flag_svg_padding: u32,
    flag_wbt_scale: f64,
    flag_text_out: Option<String>,
    flag_no_preview: bool,
    flag_save_edges: Option<String>,
}

mod errors {
    error_chain! {

        links {
            Maze(::mazegen::errors::Error, ::mazegen::errors::ErrorKind);
        }

        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    init_logging();

    let args: MazeArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());
    debug!(?args, "parsed arguments");

    if !(args.flag_wbt_scale > 0.0 && args.flag_wbt_scale.is_finite()) {
        bail!("--wbt-scale must be a positive number, got {}", args.flag_wbt_scale);
    }
    if args.flag_svg_scale == 0 {
        bail!("--svg-scale must be at least 1");
    }

    let mut maze_grid = MazeGrid::new(Width(args.flag_width),
                                      Length(args.flag_length),
                                      Cartesian2DCoordinate::new(args.flag_start_x, args.flag_start_y))?;

    let seed = args.flag_seed.unwrap_or_else(rand::random);
    info!(seed,
          width = args.flag_width,
          length = args.flag_length,
          "generating maze");
    let mut rng = StdRng::seed_from_u64(seed);
    generators::recursive_backtracker(&mut maze_grid, &mut rng)?;

    if let Some(ref text_path) = args.flag_text_out {
        write_text_to_file(&maze_grid.to_string(), text_path)
            .chain_err(|| format!("Failed to write maze to text file {}", text_path))?;
    } else if !args.flag_no_preview {
        println!("{}", maze_grid);
    }

    if let Some(ref edges_path) = args.flag_save_edges {
        save_maze_graph(&maze_grid, edges_path)?;
    }

    if let Some(ref svg_path) = args.flag_svg {
        let options = SvgOptionsBuilder::new()
            .scale(args.flag_svg_scale)
            .padding(args.flag_svg_padding)
            .build();
        svg::save_svg(&maze_grid, &options, Path::new(svg_path))?;
    }

    if let Some(ref wbt_path) = args.flag_wbt {
        let options = WorldOptionsBuilder::new()
            .scale(args.flag_wbt_scale)
            .build();
        world::save_world(&maze_grid, &options, Path::new(wbt_path))?;
    }

    Ok(())
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    f.write_all(b"\n")?;
    Ok(())
}

fn save_maze_graph(maze_grid: &MazeGrid, file_path: &str) -> Result<()> {

    let mut graph_data = String::new();
    let vertices_count = maze_grid.size();
    let edges_count = maze_grid.passages_count();
    graph_data.push_str(vertices_count.to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(edges_count.to_string().as_ref());
    graph_data.push('\n');

    for (src, dst) in maze_grid.iter_passages() {
        let (index_a, index_b) = match (maze_grid.grid_coordinate_to_index(src),
                                        maze_grid.grid_coordinate_to_index(dst)) {
            (Some(a), Some(b)) => (a, b),
            _ => bail!("passage {:?} - {:?} leaves the grid", src, dst),
        };
        let src_as_1_based_index = index_a + 1;
        let dst_as_1_based_index = index_b + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(graph_data.trim_end(), file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!(path = file_path, "Written passages");

    Ok(())
}
