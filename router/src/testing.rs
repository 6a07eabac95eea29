use crate::grid::{CellKind, DenseGrid, RoutingGrid};
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;

pub fn at(x: u32, y: u32) -> GridCoord {
    GridCoord::new(x, y)
}

pub fn grid_with_blockages(cols: u32, rows: u32, blockages: &[(u32, u32)]) -> DenseGrid {
    let mut grid = DenseGrid::new(cols, rows);
    for &(x, y) in blockages {
        grid.set_cell(at(x, y), CellKind::Blockage, None);
    }
    grid
}

pub fn place_net(grid: &mut DenseGrid, net: usize, source: (u32, u32), targets: &[(u32, u32)]) {
    let id = Some(NetId::new(net));
    grid.set_cell(at(source.0, source.1), CellKind::SourceUnrouted, id);
    for &(x, y) in targets {
        grid.set_cell(at(x, y), CellKind::TargetUnrouted, id);
    }
}

pub fn lay_wire(grid: &mut DenseGrid, net: usize, kind: CellKind, cells: &[(u32, u32)]) {
    for &(x, y) in cells {
        grid.set_cell(at(x, y), kind, Some(NetId::new(net)));
    }
}
