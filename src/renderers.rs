//! Serialisers turning a carved maze's walls into external geometry.
//!
//! Both formats walk the grid through `walk_walls`, so they see the same walls in the same order.
//! Renderers only take `&MazeGrid`; rendering can be repeated or retried without regenerating.

pub mod svg;
pub mod world;

use std::env;
use std::ffi::OsString;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use tracing::info;

use crate::cells::CompassPrimary;
use crate::errors::*;
use crate::grid::MazeGrid;

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallSide {
    South,
    East,
}

impl WallSide {
    #[inline]
    pub fn direction(self) -> CompassPrimary {
        match self {
            WallSide::South => CompassPrimary::South,
            WallSide::East => CompassPrimary::East,
        }
    }
}

/// A standing South or East wall of the cell at (x, y).
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallSegment {
    pub x: u32,
    pub y: u32,
    pub side: WallSide,
    /// The wall lies on the maze's outer boundary (last row for South, last column for East).
    pub on_boundary: bool,
}

pub trait WallVisitor {
    fn visit_wall(&mut self, wall: &WallSegment) -> Result<()>;
}

/// Visit every standing South and East wall: rows north to south, cells west to east,
/// South before East within a cell.
///
/// North and West walls are the South and East walls of the neighbouring cells, apart from
/// those on the outer boundary which are left for each format to draw.
pub fn walk_walls<V: WallVisitor + ?Sized>(grid: &MazeGrid, visitor: &mut V) -> Result<()> {
    let last_column = grid.width() - 1;
    let last_row = grid.length() - 1;

    for row in grid.iter_row() {
        for cell in row {
            let coord = cell.coord();
            for &side in &[WallSide::South, WallSide::East] {
                if cell.has_wall(side.direction()) {
                    let on_boundary = match side {
                        WallSide::South => coord.y as usize == last_row,
                        WallSide::East => coord.x as usize == last_column,
                    };
                    visitor.visit_wall(&WallSegment {
                        x: coord.x,
                        y: coord.y,
                        side,
                        on_boundary,
                    })?;
                }
            }
        }
    }
    Ok(())
}

/// Append `.extension` unless the path already ends with it. Other extensions are kept,
/// so `maze.txt` becomes `maze.txt.svg`.
pub fn with_extension_appended(path: &Path, extension: &str) -> PathBuf {
    if path.extension().map_or(false, |ext| ext == extension) {
        path.to_path_buf()
    } else {
        let mut file_name: OsString = path.as_os_str().to_owned();
        file_name.push(".");
        file_name.push(extension);
        PathBuf::from(file_name)
    }
}

/// Create (or truncate) the file at `path`, hand a buffered writer to `render` and flush it.
pub(crate) fn save_with<F>(path: &Path, format_name: &str, render: F) -> Result<PathBuf>
    where F: FnOnce(&mut BufWriter<File>) -> Result<()>
{
    let file = File::create(path)
        .chain_err(|| format!("Failed to create {} file {}", format_name, path.display()))?;
    let mut writer = BufWriter::new(file);
    render(&mut writer).chain_err(|| format!("Failed to write {} file {}", format_name, path.display()))?;
    writer.flush()
        .chain_err(|| format!("Failed to write {} file {}", format_name, path.display()))?;

    let written = if path.is_absolute() {
        path.to_path_buf()
    } else {
        env::current_dir().map(|dir| dir.join(path)).unwrap_or_else(|_| path.to_path_buf())
    };
    info!(path = %written.display(), "Written {}", format_name);
    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cells::Cartesian2DCoordinate;
    use crate::units::{Length, Width};

    #[derive(Default)]
    struct Collect(Vec<WallSegment>);

    impl WallVisitor for Collect {
        fn visit_wall(&mut self, wall: &WallSegment) -> Result<()> {
            self.0.push(*wall);
            Ok(())
        }
    }

    fn seg(x: u32, y: u32, side: WallSide, on_boundary: bool) -> WallSegment {
        WallSegment { x, y, side, on_boundary }
    }

    #[test]
    fn uncarved_walls_in_shared_order() {
        let grid = MazeGrid::new(Width(2), Length(2), Cartesian2DCoordinate::new(0, 0)).unwrap();
        let mut walls = Collect::default();
        walk_walls(&grid, &mut walls).unwrap();
        assert_eq!(walls.0,
                   vec![seg(0, 0, WallSide::South, false),
                        seg(0, 0, WallSide::East, false),
                        seg(1, 0, WallSide::South, false),
                        seg(1, 0, WallSide::East, true),
                        seg(0, 1, WallSide::South, true),
                        seg(0, 1, WallSide::East, false),
                        seg(1, 1, WallSide::South, true),
                        seg(1, 1, WallSide::East, true)]);
    }

    #[test]
    fn broken_walls_are_skipped() {
        let mut grid = MazeGrid::new(Width(2), Length(1), Cartesian2DCoordinate::new(0, 0)).unwrap();
        grid.knock_down_wall(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East).unwrap();
        let mut walls = Collect::default();
        walk_walls(&grid, &mut walls).unwrap();
        assert_eq!(walls.0,
                   vec![seg(0, 0, WallSide::South, true),
                        seg(1, 0, WallSide::South, true),
                        seg(1, 0, WallSide::East, true)]);
    }

    #[test]
    fn extension_appended_only_when_missing() {
        assert_eq!(with_extension_appended(Path::new("maze"), "svg"), PathBuf::from("maze.svg"));
        assert_eq!(with_extension_appended(Path::new("out/maze.svg"), "svg"),
                   PathBuf::from("out/maze.svg"));
        assert_eq!(with_extension_appended(Path::new("maze.txt"), "wbt"),
                   PathBuf::from("maze.txt.wbt"));
        assert_eq!(with_extension_appended(Path::new("maze.svg"), "wbt"),
                   PathBuf::from("maze.svg.wbt"));
    }
}
