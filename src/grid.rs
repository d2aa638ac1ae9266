use std::fmt;
use std::slice;
use std::u32;

use petgraph::algo;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};
use smallvec::SmallVec;

use crate::cells::{Cartesian2DCoordinate, CompassPrimary, WallCell, ALL_DIRECTIONS};
use crate::errors::*;
use crate::units::{EdgesCount, Length, NodesCount, Width};

/// Adjacent cells paired with the direction taken to reach them.
pub type NeighbourSmallVec = SmallVec<[(CompassPrimary, Cartesian2DCoordinate); 4]>;

/// Undirected graph of carved passages, one node per cell in row major order.
pub type PassageGraph = Graph<Cartesian2DCoordinate, (), Undirected>;

const NEIGHBOUR_SEARCH_ORDER: [CompassPrimary; 4] = [CompassPrimary::West,
                                                     CompassPrimary::East,
                                                     CompassPrimary::South,
                                                     CompassPrimary::North];

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallBreakError {
    InvalidGridCoordinate,
    NoNeighbour,
}

/// A rectangular maze of `width * length` walled cells.
///
/// Every cell exists from construction onwards, only wall state changes afterwards.
#[derive(Clone)]
pub struct MazeGrid {
    width: Width,
    length: Length,
    start: Cartesian2DCoordinate,
    cells: Vec<WallCell>,
}

impl fmt::Debug for MazeGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "MazeGrid :: width: {:?}, length: {:?}, start: {:?}, passages: {:?}",
               self.width.0,
               self.length.0,
               self.start,
               self.passages_count())
    }
}

impl MazeGrid {
    pub fn new(width: Width, length: Length, start: Cartesian2DCoordinate) -> Result<MazeGrid> {

        let (Width(w), Length(l)) = (width, length);
        let representable = w <= u32::MAX as usize && l <= u32::MAX as usize &&
                            w.checked_mul(l).is_some();
        if w == 0 || l == 0 || !representable {
            bail!(ErrorKind::InvalidDimensions(w, l));
        }
        if start.x as usize >= w || start.y as usize >= l {
            bail!(ErrorKind::InvalidStartCoordinate(start.x, start.y));
        }

        let cells = (0..l)
            .flat_map(|y| (0..w).map(move |x| WallCell::new(Cartesian2DCoordinate::new(x as u32, y as u32))))
            .collect();

        Ok(MazeGrid {
            width,
            length,
            start,
            cells,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width.0
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length.0
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn start(&self) -> Cartesian2DCoordinate {
        self.start
    }

    /// Node and edge counts of any spanning tree over this grid.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (NodesCount(cells_count), EdgesCount(cells_count - 1))
    }

    /// Is the grid coordinate valid for this grid - within the grid's dimensions
    #[inline]
    pub fn is_valid_coordinate(&self, coord: Cartesian2DCoordinate) -> bool {
        (coord.x as usize) < self.width.0 && (coord.y as usize) < self.length.0
    }

    /// Convert a grid coordinate to a one dimensional index in the range 0...grid.size().
    /// Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: Cartesian2DCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.y as usize * self.width.0 + coord.x as usize)
        } else {
            None
        }
    }

    /// The cell at (x, y).
    ///
    /// Panics if the coordinate is outside of the grid.
    pub fn cell_at(&self, x: u32, y: u32) -> &WallCell {
        match self.grid_coordinate_to_index(Cartesian2DCoordinate::new(x, y)) {
            Some(index) => &self.cells[index],
            None => {
                panic!("cell ({}, {}) is outside of the {}x{} maze",
                       x,
                       y,
                       self.width.0,
                       self.length.0)
            }
        }
    }

    #[inline]
    pub fn get(&self, coord: Cartesian2DCoordinate) -> Option<&WallCell> {
        self.grid_coordinate_to_index(coord).map(|index| &self.cells[index])
    }

    /// Cells in row major order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<WallCell> {
        self.cells.iter()
    }

    /// Rows from north to south, each row ordered west to east.
    #[inline]
    pub fn iter_row(&self) -> slice::Chunks<WallCell> {
        self.cells.chunks(self.width.0)
    }

    pub fn neighbour_at_direction(&self,
                                  coord: Cartesian2DCoordinate,
                                  direction: CompassPrimary)
                                  -> Option<Cartesian2DCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        let (dx, dy) = direction.offset();
        let x = i64::from(coord.x) + dx;
        let y = i64::from(coord.y) + dy;
        if x >= 0 && y >= 0 && (x as usize) < self.width.0 && (y as usize) < self.length.0 {
            Some(Cartesian2DCoordinate::new(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Cells to the West, East, South or North of a cell, whether or not a wall separates them.
    pub fn neighbours(&self, coord: Cartesian2DCoordinate) -> NeighbourSmallVec {
        NEIGHBOUR_SEARCH_ORDER.iter()
            .filter_map(|&dir| self.neighbour_at_direction(coord, dir).map(|n| (dir, n)))
            .collect()
    }

    /// Neighbours that still have all four walls standing, i.e. untouched by carving so far.
    pub fn find_valid_neighbours(&self, coord: Cartesian2DCoordinate) -> NeighbourSmallVec {
        self.neighbours(coord)
            .into_iter()
            .filter(|&(_, n)| self.get(n).map_or(false, WallCell::has_all_walls))
            .collect()
    }

    /// Knock down the wall on the `direction` side of `coord` and the facing wall of the
    /// neighbouring cell. Returns the neighbour.
    pub fn knock_down_wall(&mut self,
                           coord: Cartesian2DCoordinate,
                           direction: CompassPrimary)
                           -> ::std::result::Result<Cartesian2DCoordinate, WallBreakError> {

        let cell_index = self.grid_coordinate_to_index(coord)
            .ok_or(WallBreakError::InvalidGridCoordinate)?;
        let neighbour = self.neighbour_at_direction(coord, direction)
            .ok_or(WallBreakError::NoNeighbour)?;
        let neighbour_index = self.grid_coordinate_to_index(neighbour)
            .ok_or(WallBreakError::NoNeighbour)?;

        let (cell, other) = pair_mut(&mut self.cells, cell_index, neighbour_index);
        cell.knock_down_wall(other, direction);
        Ok(neighbour)
    }

    /// Is there a passage (no wall) from `coord` to its neighbour in `direction`?
    pub fn is_neighbour_linked(&self, coord: Cartesian2DCoordinate, direction: CompassPrimary) -> bool {
        match (self.get(coord), self.neighbour_at_direction(coord, direction)) {
            (Some(cell), Some(_)) => !cell.has_wall(direction),
            _ => false,
        }
    }

    /// Every carved passage once, as the (west or north cell, east or south cell) pair.
    pub fn iter_passages<'a>(&'a self)
                             -> impl Iterator<Item = (Cartesian2DCoordinate, Cartesian2DCoordinate)> + 'a {
        self.cells.iter().flat_map(move |cell| {
            let coord = cell.coord();
            [CompassPrimary::East, CompassPrimary::South]
                .iter()
                .filter_map(move |&dir| {
                    if self.is_neighbour_linked(coord, dir) {
                        self.neighbour_at_direction(coord, dir).map(|n| (coord, n))
                    } else {
                        None
                    }
                })
                .collect::<SmallVec<[_; 2]>>()
        })
    }

    pub fn passages_count(&self) -> usize {
        self.iter_passages().count()
    }

    pub fn passage_graph(&self) -> PassageGraph {
        let (NodesCount(nodes), EdgesCount(edges)) = self.graph_size();
        let mut graph = PassageGraph::with_capacity(nodes, edges);
        for cell in &self.cells {
            let _ = graph.add_node(cell.coord());
        }
        for (a, b) in self.iter_passages() {
            if let (Some(a_index), Some(b_index)) = (self.grid_coordinate_to_index(a),
                                                     self.grid_coordinate_to_index(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// Every pair of adjacent cells agrees on whether a wall separates them, and the outer
    /// boundary is intact.
    pub fn is_wall_state_consistent(&self) -> bool {
        self.cells.iter().all(|cell| {
            ALL_DIRECTIONS.iter().all(|&dir| {
                match self.neighbour_at_direction(cell.coord(), dir).and_then(|n| self.get(n)) {
                    Some(neighbour) => cell.has_wall(dir) == neighbour.has_wall(dir.opposite()),
                    None => cell.has_wall(dir),
                }
            })
        })
    }

    /// A perfect maze: the passages form a spanning tree over all the cells.
    pub fn is_perfect(&self) -> bool {
        let graph = self.passage_graph();
        let (_, EdgesCount(tree_edges)) = self.graph_size();
        self.is_wall_state_consistent() && graph.edge_count() == tree_edges &&
        algo::connected_components(&graph) == 1
    }
}

fn pair_mut<T>(items: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (low, high) = items.split_at_mut(b);
        (&mut low[a], &mut high[0])
    } else {
        let (low, high) = items.split_at_mut(a);
        (&mut high[0], &mut low[b])
    }
}
