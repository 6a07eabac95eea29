use crate::error::RouteError;
use crate::grid::{CellKind, Direction, RoutingGrid, WaveTag};
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;
use maze_common::util::config::TracebackMode;
use std::cmp::Ordering;

use Direction::{Down, Left, Right, Up};

fn min_turn_order(previous: Direction) -> [Direction; 4] {
    match previous {
        Right => [Right, Down, Left, Up],
        Down => [Down, Left, Up, Right],
        Left => [Left, Up, Right, Down],
        Up => [Up, Right, Down, Left],
    }
}

/// Priority that points at the source; vertical offset takes precedence.
fn direct_order(source: GridCoord, at: GridCoord, current: [Direction; 4]) -> [Direction; 4] {
    match (source.x.cmp(&at.x), source.y.cmp(&at.y)) {
        (Ordering::Greater, Ordering::Greater) => [Down, Right, Left, Up],
        (Ordering::Greater, Ordering::Equal) => [Right, Up, Left, Down],
        (Ordering::Greater, Ordering::Less) => [Up, Right, Left, Down],
        (Ordering::Less, Ordering::Greater) => [Down, Left, Right, Up],
        (Ordering::Less, Ordering::Equal) => [Left, Up, Right, Down],
        (Ordering::Less, Ordering::Less) => [Up, Left, Right, Down],
        (Ordering::Equal, Ordering::Greater) => [Down, Left, Right, Up],
        (Ordering::Equal, Ordering::Less) => [Up, Left, Right, Down],
        (Ordering::Equal, Ordering::Equal) => current,
    }
}

/// Walks from a found target back to the net's existing tiles along strictly
/// decreasing distances, committing each step as `WirePartial`. The target
/// becomes `TargetRouted`. Returns the committed tiles, target side first.
///
/// Must run right after the search that produced the distances; a missing
/// predecessor means that state was corrupted and is reported as fatal.
pub fn trace<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    net: NetId,
    target: GridCoord,
    source: GridCoord,
    mode: TracebackMode,
) -> Result<Vec<GridCoord>, RouteError> {
    let mut distance = grid.distance(target);
    let mut at = target;
    let mut previous = Right;
    let mut order = [Right, Down, Left, Up];
    let mut wire = Vec::with_capacity(distance.saturating_sub(1) as usize);

    if distance == 0 {
        return Err(RouteError::TracebackStalled { net, at, distance });
    }

    while distance > 1 {
        order = match mode {
            TracebackMode::MinTurn => min_turn_order(previous),
            TracebackMode::Direct => direct_order(source, at, order),
        };

        let step = order.iter().find_map(|&dir| {
            grid.step(at, dir)
                .filter(|&n| {
                    grid.kind(n) == CellKind::Empty
                        && grid.tag(n) == WaveTag::Visited
                        && grid.distance(n) == distance - 1
                })
                .map(|n| (dir, n))
        });
        let Some((dir, next)) = step else {
            return Err(RouteError::TracebackStalled { net, at, distance });
        };

        grid.set_cell(next, CellKind::WirePartial, Some(net));
        wire.push(next);
        previous = dir;
        at = next;
        distance -= 1;
    }

    let touches_net = [Right, Down, Left, Up].into_iter().any(|dir| {
        grid.step(at, dir).is_some_and(|n| {
            grid.distance(n) == 0 && grid.belongs_to(n, net) && grid.kind(n).is_net_structure()
        })
    });
    if !touches_net {
        return Err(RouteError::TracebackStalled { net, at, distance });
    }

    grid.set_kind(target, CellKind::TargetRouted);
    Ok(wire)
}
