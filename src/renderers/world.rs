use std::io::Write;
use std::path::{Path, PathBuf};

use crate::errors::*;
use crate::grid::MazeGrid;
use crate::renderers::{save_with, walk_walls, with_extension_appended, WallSegment, WallSide,
                       WallVisitor};

pub const WORLD_EXTENSION: &str = "wbt";

const PREAMBLE: &str = r#"#VRML_SIM R2022a utf8
WorldInfo {
info [
    "Simple e-puck simulation that can be controlled with ROS2."
]
    title "ROS2 simulation of the e-puck robot"
}"#;

// Webots wants the viewpoint second, so this follows it.
const POST_VIEW: &str = "TexturedBackground {
}

TexturedBackgroundLight {
}

Solid {
    children [";

const POSTAMBLE: &str = "\t]\n}";

#[derive(PartialEq, Copy, Clone, Debug)]
pub struct WorldOptions {
    /// World units per cell side, also the wall height.
    pub scale: f64,
    pub wall_thickness: f64,
}

impl Default for WorldOptions {
    fn default() -> WorldOptions {
        WorldOptions {
            scale: 0.1,
            wall_thickness: 0.01,
        }
    }
}

#[derive(Debug, Default)]
pub struct WorldOptionsBuilder {
    options: WorldOptions,
}

impl WorldOptionsBuilder {
    pub fn new() -> WorldOptionsBuilder {
        WorldOptionsBuilder { options: WorldOptions::default() }
    }

    pub fn scale(mut self, scale: f64) -> WorldOptionsBuilder {
        self.options.scale = scale;
        self
    }

    pub fn wall_thickness(mut self, thickness: f64) -> WorldOptionsBuilder {
        self.options.wall_thickness = thickness;
        self
    }

    pub fn build(self) -> WorldOptions {
        self.options
    }
}

/// `wall_<x>_<y>_<s|e>`, unique for each wall of a grid.
pub fn wall_name(wall: &WallSegment) -> String {
    let side = match wall.side {
        WallSide::South => 's',
        WallSide::East => 'e',
    };
    format!("wall_{}_{}_{}", wall.x, wall.y, side)
}

struct WorldWalls<'a, W: Write + ?Sized> {
    out: &'a mut W,
    options: &'a WorldOptions,
    length: f64,
}

impl<'a, W: Write + ?Sized> WallVisitor for WorldWalls<'a, W> {
    fn visit_wall(&mut self, wall: &WallSegment) -> Result<()> {
        // The outer boundary is not made of wall objects.
        if wall.on_boundary {
            return Ok(());
        }

        let s = self.options.scale;
        let thickness = self.options.wall_thickness;
        let x = f64::from(wall.x);
        let rows_below = self.length - f64::from(wall.y);

        // Axes flipped relative to the svg image: y = 0 is the most negative row.
        let (tx, ty, size_x, size_y, colour) = match wall.side {
            WallSide::South => (-(s * x + s / 2.0), -(s * rows_below - s), s, thickness, "1 0 0"),
            WallSide::East => (-(s * x + s), -(s * rows_below - s / 2.0), thickness, s, "0 1 0"),
        };

        writeln!(self.out)?;
        writeln!(self.out, "\t\tWall {{")?;
        writeln!(self.out, "\t\t\ttranslation {} {} 0", tx, ty)?;
        writeln!(self.out, "\t\t\trotation 1 0 0 0")?;
        writeln!(self.out, "\t\t\tname \"{}\"", wall_name(wall))?;
        writeln!(self.out, "\t\t\tsize {} {} {}", size_x, size_y, s)?;
        writeln!(self.out, "\t\t\tappearance Roughcast {{")?;
        writeln!(self.out, "\t\t\t\tcolorOverride {}", colour)?;
        writeln!(self.out, "\t\t\t}}")?;
        writeln!(self.out, "\t\t}}")?;
        Ok(())
    }
}

/// Write the maze as a Webots world.
///
/// Internal standing South walls (red) and East walls (green) each become a `Wall` solid
/// inside one arena. The maze's outer boundary is left to the arena's own walls.
pub fn render_world<W: Write + ?Sized>(grid: &MazeGrid,
                                       options: &WorldOptions,
                                       out: &mut W)
                                       -> Result<()> {
    let s = options.scale;
    let width = grid.width() as f64;
    let length = grid.length() as f64;

    writeln!(out, "{}", PREAMBLE)?;
    writeln!(out, "Viewpoint {{")?;
    writeln!(out, "    orientation 0 2 0 1.52")?;
    writeln!(out,
             "    position {} {} {}",
             -((s * width) / 2.0 + 0.2),
             -((s * length) / 2.0),
             (width + length) * s)?;
    writeln!(out, "    follow \"e-puck\"")?;
    writeln!(out, "}}")?;
    writeln!(out, "{}", POST_VIEW)?;

    writeln!(out)?;
    writeln!(out, "        RectangleArena {{")?;
    writeln!(out,
             "            translation {} {} 0",
             -(width * s) / 2.0,
             -(length * s) / 2.0)?;
    writeln!(out, "            rotation 1 0 0 0")?;
    writeln!(out,
             "            floorSize {} {}",
             f64::max(1.0, width * s),
             f64::max(1.0, length * s))?;
    writeln!(out, "        }}")?;

    walk_walls(grid,
               &mut WorldWalls {
                   out: &mut *out,
                   options,
                   length,
               })?;

    writeln!(out, "{}", POSTAMBLE)?;
    Ok(())
}

/// Save the maze as a Webots world file, appending `.wbt` to the path if it is missing.
/// Returns the path written.
pub fn save_world(grid: &MazeGrid, options: &WorldOptions, path: &Path) -> Result<PathBuf> {
    let world_path = with_extension_appended(path, WORLD_EXTENSION);
    save_with(&world_path, "wbt", |out| render_world(grid, options, out))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use fnv::FnvHashSet;
    use quickcheck::{quickcheck, TestResult};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::cells::{Cartesian2DCoordinate, CompassPrimary};
    use crate::generators::recursive_backtracker;
    use crate::units::{Length, Width};

    fn carved(w: usize, l: usize, seed: u64) -> MazeGrid {
        let mut grid = MazeGrid::new(Width(w), Length(l), Cartesian2DCoordinate::new(0, 0)).unwrap();
        recursive_backtracker(&mut grid, &mut StdRng::seed_from_u64(seed)).unwrap();
        grid
    }

    fn world_text(grid: &MazeGrid, options: &WorldOptions) -> String {
        let mut out = Vec::new();
        render_world(grid, options, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn wall_names(text: &str) -> Vec<&str> {
        text.lines()
            .filter_map(|line| line.trim().strip_prefix("name \""))
            .map(|rest| rest.trim_end_matches('"'))
            .collect()
    }

    #[test]
    fn single_cell_world_has_arena_and_no_walls() {
        let grid = carved(1, 1, 0);
        let text = world_text(&grid, &WorldOptions::default());

        assert!(text.starts_with("#VRML_SIM R2022a utf8\nWorldInfo {\n"));
        assert!(text.contains("Viewpoint {\n    orientation 0 2 0 1.52\n"));
        assert!(text.contains("        RectangleArena {\n            translation -0.05 -0.05 0\n"));
        assert!(text.contains("            floorSize 1 1\n"));
        assert!(text.ends_with("\t]\n}\n"));
        assert!(wall_names(&text).is_empty());
        assert!(!text.contains("Wall {"));
    }

    #[test]
    fn internal_walls_placed_and_named() {
        let mut grid = MazeGrid::new(Width(2), Length(2), Cartesian2DCoordinate::new(0, 0)).unwrap();
        grid.knock_down_wall(Cartesian2DCoordinate::new(0, 0), CompassPrimary::East).unwrap();
        grid.knock_down_wall(Cartesian2DCoordinate::new(0, 0), CompassPrimary::South).unwrap();

        let options = WorldOptionsBuilder::new().scale(1.0).build();
        let text = world_text(&grid, &options);

        assert_eq!(wall_names(&text), vec!["wall_1_0_s", "wall_0_1_e"]);
        assert!(text.contains("\t\tWall {\n\t\t\ttranslation -1.5 -1 0\n\t\t\trotation 1 0 0 0\n\
                               \t\t\tname \"wall_1_0_s\"\n\t\t\tsize 1 0.01 1\n\
                               \t\t\tappearance Roughcast {\n\t\t\t\tcolorOverride 1 0 0\n"));
        assert!(text.contains("\t\tWall {\n\t\t\ttranslation -1 -0.5 0\n\t\t\trotation 1 0 0 0\n\
                               \t\t\tname \"wall_0_1_e\"\n\t\t\tsize 0.01 1 1\n\
                               \t\t\tappearance Roughcast {\n\t\t\t\tcolorOverride 0 1 0\n"));
        assert!(text.contains("            translation -1 -1 0\n"));
        assert!(text.contains("            floorSize 2 2\n"));
        assert!(text.contains("    position -1.2 -1 4\n"));
    }

    #[test]
    fn no_name_collisions_on_large_mazes() {
        let grid = carved(50, 50, 2024);
        let text = world_text(&grid, &WorldOptions::default());
        let names = wall_names(&text);
        let unique: FnvHashSet<&str> = names.iter().cloned().collect();
        assert_eq!(unique.len(), names.len());

        // Internal walls of the full grid minus those carved away.
        let internal = 50 * 49 * 2;
        assert_eq!(names.len(), internal - (50 * 50 - 1));
    }

    #[test]
    fn saving_appends_extension() {
        let dir = tempfile::tempdir().unwrap();
        let grid = carved(3, 3, 1);
        let written = save_world(&grid, &WorldOptions::default(), &dir.path().join("arena.world"))
            .unwrap();
        assert_eq!(written, dir.path().join("arena.world.wbt"));
        assert_eq!(fs::read_to_string(&written).unwrap(),
                   world_text(&grid, &WorldOptions::default()));
    }

    quickcheck! {
        fn wall_names_are_unique(w: u8, l: u8, seed: u64) -> TestResult {
            let (w, l) = (w as usize % 30 + 1, l as usize % 30 + 1);
            let grid = carved(w, l, seed);
            let text = world_text(&grid, &WorldOptions::default());
            let names = wall_names(&text);
            let unique: FnvHashSet<&str> = names.iter().cloned().collect();

            let internal = w * (l - 1) + l * (w - 1);
            TestResult::from_bool(unique.len() == names.len() &&
                                  names.len() == internal - (w * l - 1) &&
                                  text.matches("Wall {").count() == names.len())
        }

        fn rendering_is_repeatable(w: u8, l: u8, seed: u64) -> TestResult {
            let (w, l) = (w as usize % 30 + 1, l as usize % 30 + 1);
            let grid = carved(w, l, seed);
            TestResult::from_bool(world_text(&grid, &WorldOptions::default()) ==
                                  world_text(&grid, &WorldOptions::default()))
        }
    }
}
