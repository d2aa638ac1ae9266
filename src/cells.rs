use std::convert::From;

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct Cartesian2DCoordinate {
    pub x: u32,
    pub y: u32,
}

impl Cartesian2DCoordinate {
    pub fn new(x: u32, y: u32) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate { x, y }
    }
}

impl From<(u32, u32)> for Cartesian2DCoordinate {
    fn from(x_y_pair: (u32, u32)) -> Cartesian2DCoordinate {
        Cartesian2DCoordinate::new(x_y_pair.0, x_y_pair.1)
    }
}

#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

pub const ALL_DIRECTIONS: [CompassPrimary; 4] = [CompassPrimary::North,
                                                 CompassPrimary::South,
                                                 CompassPrimary::East,
                                                 CompassPrimary::West];

impl CompassPrimary {
    /// The wall pair relation: the side of the neighbouring cell that faces this direction.
    #[inline]
    pub fn opposite(self) -> CompassPrimary {
        match self {
            CompassPrimary::North => CompassPrimary::South,
            CompassPrimary::South => CompassPrimary::North,
            CompassPrimary::East => CompassPrimary::West,
            CompassPrimary::West => CompassPrimary::East,
        }
    }

    /// (dx, dy) with y growing southwards.
    #[inline]
    pub fn offset(self) -> (i64, i64) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }

    #[inline]
    fn wall_index(self) -> usize {
        match self {
            CompassPrimary::North => 0,
            CompassPrimary::South => 1,
            CompassPrimary::East => 2,
            CompassPrimary::West => 3,
        }
    }
}

/// A single grid position surrounded by up to four walls.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct WallCell {
    coord: Cartesian2DCoordinate,
    walls: [bool; 4],
}

impl WallCell {
    /// A new cell starts with every wall standing.
    pub fn new(coord: Cartesian2DCoordinate) -> WallCell {
        WallCell {
            coord,
            walls: [true; 4],
        }
    }

    #[inline]
    pub fn coord(&self) -> Cartesian2DCoordinate {
        self.coord
    }

    #[inline]
    pub fn has_wall(&self, direction: CompassPrimary) -> bool {
        self.walls[direction.wall_index()]
    }

    #[inline]
    pub fn has_all_walls(&self) -> bool {
        self.walls.iter().all(|&standing| standing)
    }

    pub fn walls_count(&self) -> usize {
        self.walls.iter().filter(|&&standing| standing).count()
    }

    /// Knock down the wall between `self` and `other`.
    ///
    /// `other` must be the grid neighbour of `self` in `wall` direction, the cell does not check.
    pub fn knock_down_wall(&mut self, other: &mut WallCell, wall: CompassPrimary) {
        self.walls[wall.wall_index()] = false;
        other.walls[wall.opposite().wall_index()] = false;
    }
}
