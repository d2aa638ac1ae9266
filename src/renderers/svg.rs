use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::grid::MazeGrid;
use crate::renderers::{save_with, walk_walls, with_extension_appended, WallSegment, WallSide,
                       WallVisitor};

pub const SVG_EXTENSION: &str = "svg";

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct SvgOptions {
    /// Image units per cell side.
    pub scale: u32,
    /// Blank margin around the maze.
    pub padding: u32,
}

impl Default for SvgOptions {
    fn default() -> SvgOptions {
        SvgOptions {
            scale: 10,
            padding: 10,
        }
    }
}

impl SvgOptions {
    pub fn image_width(&self, grid: &MazeGrid) -> u64 {
        grid.width() as u64 * u64::from(self.scale) + 2 * u64::from(self.padding)
    }

    pub fn image_height(&self, grid: &MazeGrid) -> u64 {
        grid.length() as u64 * u64::from(self.scale) + 2 * u64::from(self.padding)
    }
}

#[derive(Debug, Default)]
pub struct SvgOptionsBuilder {
    options: SvgOptions,
}

impl SvgOptionsBuilder {
    pub fn new() -> SvgOptionsBuilder {
        SvgOptionsBuilder { options: SvgOptions::default() }
    }

    pub fn scale(mut self, scale: u32) -> SvgOptionsBuilder {
        self.options.scale = scale;
        self
    }

    pub fn padding(mut self, padding: u32) -> SvgOptionsBuilder {
        self.options.padding = padding;
        self
    }

    pub fn build(self) -> SvgOptions {
        self.options
    }
}

struct SvgLines<'a, W: Write + ?Sized> {
    out: &'a mut W,
    scale: u64,
}

impl<'a, W: Write + ?Sized> WallVisitor for SvgLines<'a, W> {
    fn visit_wall(&mut self, wall: &WallSegment) -> Result<()> {
        let s = self.scale;
        let (x, y) = (u64::from(wall.x), u64::from(wall.y));
        let ((x1, y1, x2, y2), colour) = match wall.side {
            WallSide::South => ((x * s, (y + 1) * s, (x + 1) * s, (y + 1) * s), "red"),
            WallSide::East => (((x + 1) * s, y * s, (x + 1) * s, (y + 1) * s), "green"),
        };
        write_line(self.out, x1, y1, x2, y2, colour)
    }
}

fn write_line<W: Write + ?Sized>(out: &mut W,
                                 x1: u64,
                                 y1: u64,
                                 x2: u64,
                                 y2: u64,
                                 colour: &str)
                                 -> Result<()> {
    writeln!(out,
             r#"<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}"/>"#,
             x1,
             y1,
             x2,
             y2,
             colour)?;
    Ok(())
}

/// Write the maze as an SVG document.
///
/// Every standing South wall is a red line and every standing East wall a green one, in cell
/// units times `scale`. The viewBox starts at `-padding` so the maze sits inside the margin.
/// The North and West borders are closed with two extra black lines.
pub fn render_svg<W: Write + ?Sized>(grid: &MazeGrid, options: &SvgOptions, out: &mut W) -> Result<()> {
    let width = options.image_width(grid);
    let height = options.image_height(grid);
    let padding = options.padding;

    writeln!(out, r#"<?xml version="1.0" encoding="utf-8"?>"#)?;
    writeln!(out, r#"<svg xmlns="http://www.w3.org/2000/svg""#)?;
    writeln!(out, r#"    xmlns:xlink="http://www.w3.org/1999/xlink""#)?;
    writeln!(out,
             r#"    width="{}" height="{}" viewBox="-{} -{} {} {}">"#,
             width,
             height,
             padding,
             padding,
             width,
             height)?;
    writeln!(out, r#"<defs>"#)?;
    writeln!(out, r#"<style type="text/css"><![CDATA["#)?;
    writeln!(out, "line {{")?;
    writeln!(out, "    stroke-width: 2;")?;
    writeln!(out, "}}")?;
    writeln!(out, "]]></style>")?;
    writeln!(out, "</defs>")?;

    let scale = u64::from(options.scale);
    walk_walls(grid, &mut SvgLines { out: &mut *out, scale })?;

    let maze_width = grid.width() as u64 * scale;
    let maze_height = grid.length() as u64 * scale;
    write_line(out, 0, 0, maze_width, 0, "black")?;
    write_line(out, 0, 0, 0, maze_height, "black")?;
    writeln!(out, "</svg>")?;
    Ok(())
}

/// Save the maze as an SVG file, appending `.svg` to the path if it is missing.
/// Returns the path written.
pub fn save_svg(grid: &MazeGrid, options: &SvgOptions, path: &Path) -> Result<PathBuf> {
    let svg_path = with_extension_appended(path, SVG_EXTENSION);
    save_with(&svg_path, "svg", |out| render_svg(grid, options, out))
}
