use std::fmt;

use crate::cells::CompassPrimary;
use crate::grid::MazeGrid;

/// A crude text drawing of the maze, two characters per cell.
///
/// The top border is a row of `-`, each cell row is drawn as its East walls (`|`) followed by
/// its South walls (`-`) with `+` at the corners.
impl fmt::Display for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = "-".repeat(self.width() * 2);

        for row in self.iter_row() {
            let mut row_middle_section_render = String::from("|");
            let mut row_bottom_section_render = String::from("|");

            for cell in row {
                row_middle_section_render.push_str(if cell.has_wall(CompassPrimary::East) {
                    " |"
                } else {
                    "  "
                });
                row_bottom_section_render.push_str(if cell.has_wall(CompassPrimary::South) {
                    "-+"
                } else {
                    " +"
                });
            }

            output.push('\n');
            output.push_str(&row_middle_section_render);
            output.push('\n');
            output.push_str(&row_bottom_section_render);
        }

        write!(f, "{}", output)
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::cells::Cartesian2DCoordinate;
    use crate::generators::recursive_backtracker;
    use crate::grid::MazeGrid;
    use crate::units::{Length, Width};

    use super::*;

    fn grid(w: usize, l: usize) -> MazeGrid {
        MazeGrid::new(Width(w), Length(l), Cartesian2DCoordinate::new(0, 0)).unwrap()
    }

    #[test]
    fn single_cell() {
        assert_eq!(grid(1, 1).to_string(), "--\n| |\n|-+");
    }

    #[test]
    fn two_cells_open_between() {
        let mut g = grid(2, 1);
        recursive_backtracker(&mut g, &mut StdRng::seed_from_u64(3)).unwrap();
        assert_eq!(g.to_string(), "----\n|   |\n|-+-+");
    }

    #[test]
    fn hand_carved_square() {
        let mut g = grid(2, 2);
        let gc = Cartesian2DCoordinate::new;
        g.knock_down_wall(gc(0, 0), CompassPrimary::East).unwrap();
        g.knock_down_wall(gc(1, 0), CompassPrimary::South).unwrap();
        g.knock_down_wall(gc(1, 1), CompassPrimary::West).unwrap();
        let expected = "----\n\
                        |   |\n\
                        |-+ +\n\
                        |   |\n\
                        |-+-+";
        assert_eq!(g.to_string(), expected);
    }

    #[test]
    fn line_widths_are_fixed() {
        let mut g = grid(7, 4);
        recursive_backtracker(&mut g, &mut StdRng::seed_from_u64(8)).unwrap();
        let text = g.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 1 + 2 * 4);
        assert_eq!(lines[0].len(), 14);
        assert!(lines[1..].iter().all(|line| line.len() == 15));
    }
}
