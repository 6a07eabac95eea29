use crate::grid::{CellKind, RoutingGrid, WaveTag, cells_of};
use crate::utils::counters::ConflictCounters;
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;
use std::collections::VecDeque;

/// 8-connected flood fill over empty tiles starting at `seed`. Each time a
/// filled tile borders a wire of a net other than `net`, that net's current
/// counter is bumped. Search state is cleared afterwards.
pub fn count_blockage<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    seed: GridCoord,
    net: NetId,
    counters: &mut ConflictCounters,
) {
    let mut queue = VecDeque::new();
    grid.set_tag(seed, WaveTag::Visited);
    queue.push_back(seed);

    while let Some(c) = queue.pop_front() {
        for n in grid.ring(c) {
            let kind = grid.kind(n);
            if kind == CellKind::Empty {
                if grid.tag(n) == WaveTag::Unvisited {
                    grid.set_tag(n, WaveTag::Visited);
                    queue.push_back(n);
                }
            } else if kind.is_wire() {
                if let Some(other) = grid.owner(n).filter(|&o| o != net) {
                    counters.bump(other);
                }
            }
        }
    }

    grid.reset_search();
}

/// Picks the net to rip up so that `net` can be routed.
///
/// Each still-unrouted pin of `net` is flooded in turn. A pin fenced in by
/// exactly one other net names that net immediately; otherwise the net with
/// the largest tally summed over all pins is chosen. `None` when no foreign
/// wire touches any of the flooded regions.
pub fn find_blocking_net<G: RoutingGrid + ?Sized>(
    grid: &mut G,
    counters: &mut ConflictCounters,
    net: NetId,
) -> Option<NetId> {
    let pins = cells_of(grid, net, |k| {
        matches!(k, CellKind::SourceUnrouted | CellKind::TargetUnrouted)
    });

    let mut blocker = None;
    for pin in pins {
        counters.clear_current();
        count_blockage(grid, pin, net, counters);
        if let Some(sole) = counters.sole_blocker() {
            log::debug!("Net {} is fenced in at {} by net {} alone", net, pin, sole);
            blocker = Some(sole);
            break;
        }
        counters.accumulate();
    }

    let blocker = blocker.or_else(|| counters.strongest_blocker());
    counters.clear();
    blocker
}
