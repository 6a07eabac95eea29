use crate::grid::{CellKind, Direction, RoutingGrid, UNREACHED, WaveTag, row_major};
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WaveOutcome {
    /// The wave grew by one hop; call again.
    Expanded { round: u32 },
    /// An unrouted target of the net was reached at `distance` hops.
    Found { target: GridCoord, distance: u32 },
    /// No frontier was left at the start of the round.
    Exhausted,
}

/// Starts a search for `net`: its connected tiles become the distance-0
/// frontier, everything else is unvisited.
pub fn seed<G: RoutingGrid + ?Sized>(grid: &mut G, net: NetId) {
    for c in row_major(grid.cols(), grid.rows()) {
        if grid.belongs_to(c, net) && grid.kind(c).is_net_structure() {
            grid.set_tag(c, WaveTag::Frontier);
            grid.set_distance(c, 0);
        } else {
            grid.set_tag(c, WaveTag::Unvisited);
            grid.set_distance(c, UNREACHED);
        }
    }
}

/// One Lee-Moore expansion round.
///
/// Frontier tiles are scanned row by row; each looks right, left, down, up.
/// Empty unvisited neighbors join the next frontier at `d + 1`. The first
/// unrouted target of `net` touched in that order ends the search.
pub fn expand<G: RoutingGrid + ?Sized>(grid: &mut G, net: NetId) -> WaveOutcome {
    let mut expandable = false;
    let mut found: Option<(GridCoord, u32)> = None;
    let mut round = 0;

    'scan: for c in row_major(grid.cols(), grid.rows()) {
        if grid.tag(c) != WaveTag::Frontier {
            continue;
        }
        expandable = true;
        let d = grid.distance(c);
        round = d + 1;

        for dir in Direction::EXPANSION_ORDER {
            let Some(n) = grid.step(c, dir) else {
                continue;
            };
            match grid.kind(n) {
                CellKind::Empty if grid.tag(n) == WaveTag::Unvisited => {
                    grid.set_tag(n, WaveTag::NewFrontier);
                    grid.set_distance(n, d + 1);
                }
                CellKind::TargetUnrouted if grid.belongs_to(n, net) => {
                    found = Some((n, d + 1));
                    break;
                }
                _ => {}
            }
        }
        grid.set_tag(c, WaveTag::Visited);

        if found.is_some() {
            break 'scan;
        }
    }

    if let Some((target, distance)) = found {
        grid.set_distance(target, distance);
        log::trace!("Net {} reached target {} at distance {}", net, target, distance);
        return WaveOutcome::Found { target, distance };
    }
    if !expandable {
        return WaveOutcome::Exhausted;
    }

    for c in row_major(grid.cols(), grid.rows()) {
        if grid.tag(c) == WaveTag::NewFrontier {
            grid.set_tag(c, WaveTag::Frontier);
        }
    }
    WaveOutcome::Expanded { round }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DenseGrid;
    use crate::testing::*;

    fn run(grid: &mut DenseGrid, net: NetId) -> (WaveOutcome, u32) {
        seed(grid, net);
        let mut rounds = 0;
        loop {
            match expand(grid, net) {
                WaveOutcome::Expanded { .. } => rounds += 1,
                done => return (done, rounds),
            }
        }
    }

    #[test]
    fn seeding_marks_only_net_structure() {
        let mut grid = grid_with_blockages(4, 4, &[(1, 1)]);
        place_net(&mut grid, 0, (0, 0), &[(3, 3)]);
        place_net(&mut grid, 1, (3, 0), &[(0, 3)]);
        lay_wire(&mut grid, 0, CellKind::WirePartial, &[(1, 0)]);

        seed(&mut grid, NetId::new(0));
        assert_eq!(grid.tag(at(0, 0)), WaveTag::Frontier);
        assert_eq!(grid.distance(at(1, 0)), 0);
        assert_eq!(grid.tag(at(3, 3)), WaveTag::Unvisited);
        assert_eq!(grid.tag(at(3, 0)), WaveTag::Unvisited);
        assert_eq!(grid.distance(at(2, 2)), UNREACHED);
    }

    #[test]
    fn finds_target_at_manhattan_distance() {
        let mut grid = DenseGrid::new(6, 5);
        place_net(&mut grid, 0, (1, 1), &[(4, 3)]);
        let (outcome, rounds) = run(&mut grid, NetId::new(0));
        assert_eq!(
            outcome,
            WaveOutcome::Found {
                target: at(4, 3),
                distance: 5
            }
        );
        assert_eq!(rounds, 4);
        assert_eq!(grid.distance(at(4, 3)), 5);
    }

    #[test]
    fn rounds_grow_distance_by_one() {
        let mut grid = DenseGrid::new(5, 1);
        place_net(&mut grid, 0, (0, 0), &[(4, 0)]);
        seed(&mut grid, NetId::new(0));
        assert_eq!(expand(&mut grid, NetId::new(0)), WaveOutcome::Expanded { round: 1 });
        assert_eq!(grid.tag(at(1, 0)), WaveTag::Frontier);
        assert_eq!(grid.tag(at(0, 0)), WaveTag::Visited);
        assert_eq!(expand(&mut grid, NetId::new(0)), WaveOutcome::Expanded { round: 2 });
        assert_eq!(grid.distance(at(2, 0)), 2);
    }

    #[test]
    fn detours_around_blockage() {
        let mut grid = grid_with_blockages(5, 5, &[(2, 2)]);
        place_net(&mut grid, 0, (0, 2), &[(4, 2)]);
        let (outcome, _) = run(&mut grid, NetId::new(0));
        assert_eq!(
            outcome,
            WaveOutcome::Found {
                target: at(4, 2),
                distance: 6
            }
        );
    }

    #[test]
    fn nearest_target_wins() {
        let mut grid = DenseGrid::new(7, 1);
        place_net(&mut grid, 0, (3, 0), &[(0, 0), (5, 0)]);
        let (outcome, _) = run(&mut grid, NetId::new(0));
        assert_eq!(
            outcome,
            WaveOutcome::Found {
                target: at(5, 0),
                distance: 2
            }
        );
    }

    #[test]
    fn equal_distance_tie_follows_scan_order() {
        // Both targets are two hops away; the upper one is met first in row-major order.
        let mut grid = DenseGrid::new(3, 5);
        place_net(&mut grid, 0, (1, 2), &[(1, 4), (1, 0)]);
        let (outcome, _) = run(&mut grid, NetId::new(0));
        assert_eq!(
            outcome,
            WaveOutcome::Found {
                target: at(1, 0),
                distance: 2
            }
        );
    }

    #[test]
    fn left_neighbor_beats_down_neighbor() {
        let mut grid = DenseGrid::new(3, 3);
        place_net(&mut grid, 0, (1, 1), &[(1, 2), (0, 1)]);
        let (outcome, rounds) = run(&mut grid, NetId::new(0));
        assert_eq!(
            outcome,
            WaveOutcome::Found {
                target: at(0, 1),
                distance: 1
            }
        );
        assert_eq!(rounds, 0);
    }

    #[test]
    fn right_neighbor_beats_left_and_up() {
        let mut grid = DenseGrid::new(3, 3);
        place_net(&mut grid, 0, (1, 1), &[(1, 0), (0, 1), (2, 1)]);
        let (outcome, _) = run(&mut grid, NetId::new(0));
        assert_eq!(
            outcome,
            WaveOutcome::Found {
                target: at(2, 1),
                distance: 1
            }
        );
    }

    #[test]
    fn foreign_pins_and_wires_are_walls() {
        let mut grid = DenseGrid::new(3, 3);
        place_net(&mut grid, 0, (0, 0), &[(2, 2)]);
        place_net(&mut grid, 1, (1, 0), &[(1, 1)]);
        lay_wire(&mut grid, 1, CellKind::WireFull, &[(0, 1)]);
        let (outcome, _) = run(&mut grid, NetId::new(0));
        assert_eq!(outcome, WaveOutcome::Exhausted);
    }

    #[test]
    fn routed_targets_are_not_found_again() {
        let mut grid = DenseGrid::new(4, 1);
        place_net(&mut grid, 0, (0, 0), &[(1, 0)]);
        grid.set_kind(at(1, 0), CellKind::TargetRouted);
        let (outcome, _) = run(&mut grid, NetId::new(0));
        assert_eq!(outcome, WaveOutcome::Exhausted);
    }
}
