pub mod dense;

pub use dense::DenseGrid;

use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;

/// Distance value of a tile the current search has not reached.
pub const UNREACHED: u32 = u32::MAX;

/// What occupies a tile. Everything but `Empty` and `Blockage` has an owner net.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellKind {
    Empty,
    Blockage,
    WireFull,
    WirePartial,
    SourceUnrouted,
    SourceRouted,
    TargetUnrouted,
    TargetRouted,
}

impl CellKind {
    #[inline]
    pub fn is_owned(self) -> bool {
        !matches!(self, CellKind::Empty | CellKind::Blockage)
    }

    #[inline]
    pub fn is_wire(self) -> bool {
        matches!(self, CellKind::WireFull | CellKind::WirePartial)
    }

    /// Tiles already connected to their net's source; wavefronts start here.
    #[inline]
    pub fn is_net_structure(self) -> bool {
        matches!(
            self,
            CellKind::SourceUnrouted
                | CellKind::SourceRouted
                | CellKind::WirePartial
                | CellKind::WireFull
                | CellKind::TargetRouted
        )
    }
}

/// Per-tile search bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WaveTag {
    Unvisited,
    Visited,
    Frontier,
    NewFrontier,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// Neighbor order used by wave expansion.
    pub const EXPANSION_ORDER: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Down,
        Direction::Up,
    ];
}

pub trait RoutingGrid: Sync + Send {
    fn cols(&self) -> u32;
    fn rows(&self) -> u32;

    fn kind(&self, at: GridCoord) -> CellKind;
    fn owner(&self, at: GridCoord) -> Option<NetId>;
    /// Sets kind and owner together. Unowned kinds drop the owner.
    fn set_cell(&mut self, at: GridCoord, kind: CellKind, owner: Option<NetId>);
    /// Changes the kind of an owned tile, keeping its owner.
    fn set_kind(&mut self, at: GridCoord, kind: CellKind);

    fn tag(&self, at: GridCoord) -> WaveTag;
    fn set_tag(&mut self, at: GridCoord, tag: WaveTag);
    fn distance(&self, at: GridCoord) -> u32;
    fn set_distance(&mut self, at: GridCoord, distance: u32);

    /// Every tile back to `Unvisited` / `UNREACHED`.
    fn reset_search(&mut self);

    #[inline]
    fn in_bounds(&self, at: GridCoord) -> bool {
        at.is_within(self.cols(), self.rows())
    }

    #[inline]
    fn belongs_to(&self, at: GridCoord, net: NetId) -> bool {
        self.owner(at) == Some(net)
    }

    #[inline]
    fn step(&self, at: GridCoord, dir: Direction) -> Option<GridCoord> {
        match dir {
            Direction::Right if at.x + 1 < self.cols() => Some(GridCoord::new(at.x + 1, at.y)),
            Direction::Left if at.x > 0 => Some(GridCoord::new(at.x - 1, at.y)),
            Direction::Down if at.y + 1 < self.rows() => Some(GridCoord::new(at.x, at.y + 1)),
            Direction::Up if at.y > 0 => Some(GridCoord::new(at.x, at.y - 1)),
            _ => None,
        }
    }

    /// In-bounds tiles around `at`, diagonals included.
    fn ring(&self, at: GridCoord) -> Vec<GridCoord> {
        let mut out = Vec::with_capacity(8);
        for dx in -1i64..=1 {
            for dy in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = at.x as i64 + dx;
                let ny = at.y as i64 + dy;
                if nx >= 0 && ny >= 0 && nx < self.cols() as i64 && ny < self.rows() as i64 {
                    out.push(GridCoord::new(nx as u32, ny as u32));
                }
            }
        }
        out
    }
}

/// All tiles, row by row.
pub fn row_major(cols: u32, rows: u32) -> impl Iterator<Item = GridCoord> {
    (0..rows).flat_map(move |y| (0..cols).map(move |x| GridCoord::new(x, y)))
}

/// Tiles owned by `net` whose kind matches `filter`, in row-major order.
pub fn cells_of<G: RoutingGrid + ?Sized>(
    grid: &G,
    net: NetId,
    filter: impl Fn(CellKind) -> bool,
) -> Vec<GridCoord> {
    row_major(grid.cols(), grid.rows())
        .filter(|&c| grid.belongs_to(c, net) && filter(grid.kind(c)))
        .collect()
}
