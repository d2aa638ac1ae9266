use bit_set::BitSet;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, debug_span};

use crate::cells::{Cartesian2DCoordinate, WallCell};
use crate::errors::*;
use crate::grid::{MazeGrid, NeighbourSmallVec};

#[derive(Eq, PartialEq, Copy, Clone, Debug, Default)]
pub struct CarveStats {
    pub walls_broken: usize,
    pub backtracks: usize,
    pub max_stack_depth: usize,
}

/// Carve a perfect maze into the grid with a randomised depth first search from the grid's
/// start cell.
///
/// From the current cell pick a random unvisited neighbour, knock down the wall between them
/// and move on, remembering where we came from. At a dead end (no unvisited neighbours) step
/// back to the most recently remembered cell. Every cell becomes the current cell exactly once
/// via a broken wall, except the start, so the passages form a spanning tree.
///
/// Visited cells are tracked separately from wall state. The outcome is fully determined by
/// the random number generator, so a seeded generator reproduces the same maze.
pub fn recursive_backtracker<R>(grid: &mut MazeGrid, rng: &mut R) -> Result<CarveStats>
    where R: Rng + ?Sized
{
    let _span = debug_span!("recursive_backtracker",
                            width = grid.width(),
                            length = grid.length())
        .entered();

    let cells_count = grid.size();
    let mut visited = BitSet::with_capacity(cells_count);
    let mut visited_count = 0;
    let mut stack: Vec<Cartesian2DCoordinate> = Vec::new();
    let mut stats = CarveStats::default();

    let mut current = grid.start();
    mark_visited(grid, &mut visited, current);
    visited_count += 1;

    while visited_count < cells_count {

        let unvisited_neighbours: NeighbourSmallVec = grid.neighbours(current)
            .into_iter()
            .filter(|&(_, neighbour)| !is_visited(grid, &visited, neighbour))
            .collect();

        match unvisited_neighbours.choose(rng) {
            None => {
                // Dead end, backtrack.
                current = stack.pop()
                    .ok_or_else(|| ErrorKind::BacktrackExhausted(visited_count, cells_count))?;
                stats.backtracks += 1;
            }
            Some(&(direction, next)) => {
                debug_assert!(grid.get(next).map_or(false, WallCell::has_all_walls));

                grid.knock_down_wall(current, direction)
                    .map_err(|e| {
                        format!("cannot knock down the {:?} wall of {:?}: {:?}",
                                direction,
                                current,
                                e)
                    })?;
                stats.walls_broken += 1;

                stack.push(current);
                if stack.len() > stats.max_stack_depth {
                    stats.max_stack_depth = stack.len();
                }

                current = next;
                mark_visited(grid, &mut visited, current);
                visited_count += 1;
            }
        }
    }

    debug!(walls_broken = stats.walls_broken,
           backtracks = stats.backtracks,
           max_stack_depth = stats.max_stack_depth,
           "maze carved");

    Ok(stats)
}

#[inline]
fn mark_visited(grid: &MazeGrid, visited: &mut BitSet, coord: Cartesian2DCoordinate) {
    if let Some(index) = grid.grid_coordinate_to_index(coord) {
        let _ = visited.insert(index);
    }
}

#[inline]
fn is_visited(grid: &MazeGrid, visited: &BitSet, coord: Cartesian2DCoordinate) -> bool {
    grid.grid_coordinate_to_index(coord)
        .map_or(true, |index| visited.contains(index))
}
