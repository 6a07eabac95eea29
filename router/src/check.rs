use crate::grid::{CellKind, Direction, RoutingGrid, cells_of, row_major};
use crate::registry::{Net, NetRegistry};
use maze_common::db::indices::NetId;
use rayon::prelude::*;
use std::collections::{HashSet, VecDeque};

/// Post-route verification of the grid against the netlist.
///
/// Routed nets must reach every target through their own tiles and carry no
/// partial wire. Unrouted nets must own nothing but their unrouted pins.
pub fn run<G: RoutingGrid>(grid: &G, nets: &NetRegistry) -> Result<(), String> {
    log::info!("Starting Routing Verification");

    let (opens_result, leftovers_result) =
        rayon::join(|| check_opens(grid, nets), || check_leftovers(grid, nets));

    let mut msgs = Vec::new();

    match opens_result {
        Err(e) => {
            log::error!("\x1b[31mFAIL\x1b[0m: Open Net (Disconnected) Detected");
            log::error!("{}", e);
            msgs.push(e);
        }
        Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: All routed nets are fully connected."),
    }

    match leftovers_result {
        Err(e) => {
            log::error!("\x1b[31mFAIL\x1b[0m: Stray Wiring Detected");
            log::error!("{}", e);
            msgs.push(e);
        }
        Ok(_) => log::info!("\x1b[32mPASS\x1b[0m: No stray or partial wiring found."),
    }

    if msgs.is_empty() {
        Ok(())
    } else {
        Err(msgs.join("; "))
    }
}

/// Total wire tiles on the grid.
pub fn total_wirelength<G: RoutingGrid>(grid: &G) -> usize {
    row_major(grid.cols(), grid.rows())
        .filter(|&c| grid.kind(c).is_wire())
        .count()
}

fn check_opens<G: RoutingGrid>(grid: &G, nets: &NetRegistry) -> Result<(), String> {
    let errors: Vec<String> = nets
        .ids()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter(|&id| grid.kind(nets.get(id).source) == CellKind::SourceRouted)
        .filter_map(|id| check_connected(grid, nets.get(id), id).err())
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

fn check_connected<G: RoutingGrid>(grid: &G, net: &Net, id: NetId) -> Result<(), String> {
    let mut seen = HashSet::new();
    let mut queue = VecDeque::new();
    seen.insert(net.source);
    queue.push_back(net.source);

    while let Some(c) = queue.pop_front() {
        for dir in [Direction::Right, Direction::Down, Direction::Left, Direction::Up] {
            if let Some(n) = grid.step(c, dir) {
                if grid.belongs_to(n, id) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
    }

    for &t in &net.targets {
        if grid.kind(t) != CellKind::TargetRouted {
            return Err(format!("Net {} is marked routed but target {} is not", id, t));
        }
        if !seen.contains(&t) {
            return Err(format!("Net {} target {} is disconnected from its source", id, t));
        }
    }

    let owned = cells_of(grid, id, |_| true).len();
    if owned != seen.len() {
        return Err(format!(
            "Net {} has {} tiles not connected to its source",
            id,
            owned - seen.len()
        ));
    }
    Ok(())
}

fn check_leftovers<G: RoutingGrid>(grid: &G, nets: &NetRegistry) -> Result<(), String> {
    let partial = row_major(grid.cols(), grid.rows())
        .filter(|&c| grid.kind(c) == CellKind::WirePartial)
        .count();
    if partial > 0 {
        return Err(format!("{} partial wire tiles left on the grid", partial));
    }

    let errors: Vec<String> = nets
        .ids()
        .collect::<Vec<_>>()
        .into_par_iter()
        .filter(|&id| grid.kind(nets.get(id).source) != CellKind::SourceRouted)
        .filter_map(|id| {
            let net = nets.get(id);
            if grid.kind(net.source) != CellKind::SourceUnrouted {
                return Some(format!("Net {} source {} was overwritten", id, net.source));
            }
            let routed_pins = net
                .targets
                .iter()
                .filter(|&&t| grid.kind(t) != CellKind::TargetUnrouted)
                .count();
            let wires = cells_of(grid, id, CellKind::is_wire).len();
            (routed_pins > 0 || wires > 0).then(|| {
                format!(
                    "Unrouted net {} still holds {} wire tiles and {} routed targets",
                    id, wires, routed_pins
                )
            })
        })
        .collect();

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::DenseGrid;
    use crate::testing::*;
    use maze_common::db::core::NetData;

    fn registry(nets: &[((u32, u32), &[(u32, u32)])]) -> NetRegistry {
        NetRegistry::new(
            nets.iter()
                .map(|(s, ts)| {
                    let data = NetData::new(at(s.0, s.1), ts.iter().map(|&(x, y)| at(x, y)).collect());
                    Net::from_data(&data)
                })
                .collect(),
        )
    }

    fn routed_line() -> (DenseGrid, NetRegistry) {
        let mut grid = DenseGrid::new(4, 2);
        place_net(&mut grid, 0, (0, 0), &[(3, 0)]);
        lay_wire(&mut grid, 0, CellKind::WireFull, &[(1, 0), (2, 0)]);
        grid.set_kind(at(0, 0), CellKind::SourceRouted);
        grid.set_kind(at(3, 0), CellKind::TargetRouted);
        (grid, registry(&[((0, 0), &[(3, 0)])]))
    }

    #[test]
    fn accepts_connected_route() {
        let (grid, nets) = routed_line();
        assert!(run(&grid, &nets).is_ok());
        assert_eq!(total_wirelength(&grid), 2);
    }

    #[test]
    fn flags_open_route() {
        let (mut grid, nets) = routed_line();
        grid.set_cell(at(2, 0), CellKind::Empty, None);
        let err = run(&grid, &nets).unwrap_err();
        assert!(err.contains("disconnected"), "{err}");
    }

    #[test]
    fn flags_partial_wire() {
        let (mut grid, nets) = routed_line();
        grid.set_kind(at(1, 0), CellKind::WirePartial);
        let err = run(&grid, &nets).unwrap_err();
        assert!(err.contains("partial"), "{err}");
    }

    #[test]
    fn flags_wire_of_unrouted_net() {
        let mut grid = DenseGrid::new(4, 2);
        place_net(&mut grid, 0, (0, 0), &[(3, 0)]);
        lay_wire(&mut grid, 0, CellKind::WireFull, &[(1, 0)]);
        let nets = registry(&[((0, 0), &[(3, 0)])]);
        let err = run(&grid, &nets).unwrap_err();
        assert!(err.contains("Unrouted net #0"), "{err}");
    }

    #[test]
    fn untouched_unrouted_net_is_fine() {
        let mut grid = DenseGrid::new(4, 2);
        place_net(&mut grid, 0, (0, 0), &[(3, 1)]);
        let nets = registry(&[((0, 0), &[(3, 1)])]);
        assert!(run(&grid, &nets).is_ok());
    }
}
