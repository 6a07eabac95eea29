use super::{CellKind, RoutingGrid, UNREACHED, WaveTag};
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;

#[derive(Clone, Copy, Debug)]
struct Tile {
    kind: CellKind,
    owner: Option<NetId>,
    tag: WaveTag,
    distance: u32,
}

impl Default for Tile {
    fn default() -> Self {
        Self {
            kind: CellKind::Empty,
            owner: None,
            tag: WaveTag::Unvisited,
            distance: UNREACHED,
        }
    }
}

/// Row-major `cols x rows` tile array holding occupancy and search state.
#[derive(Clone, Debug)]
pub struct DenseGrid {
    cols: u32,
    rows: u32,
    tiles: Vec<Tile>,
}

impl DenseGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        let size = (cols as usize) * (rows as usize);

        if size > 50_000_000 {
            log::warn!(
                "Allocating large DenseGrid: {} tiles. Every wave round scans all of them.",
                size
            );
        }

        Self {
            cols,
            rows,
            tiles: vec![Tile::default(); size],
        }
    }

    #[inline(always)]
    fn index(&self, at: GridCoord) -> usize {
        debug_assert!(self.in_bounds(at), "{} outside {}x{}", at, self.cols, self.rows);
        (at.y as usize) * (self.cols as usize) + (at.x as usize)
    }
}

impl RoutingGrid for DenseGrid {
    fn cols(&self) -> u32 {
        self.cols
    }
    fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    fn kind(&self, at: GridCoord) -> CellKind {
        self.tiles[self.index(at)].kind
    }

    #[inline]
    fn owner(&self, at: GridCoord) -> Option<NetId> {
        self.tiles[self.index(at)].owner
    }

    fn set_cell(&mut self, at: GridCoord, kind: CellKind, owner: Option<NetId>) {
        debug_assert_eq!(kind.is_owned(), owner.is_some(), "{:?} at {}", kind, at);
        let idx = self.index(at);
        let tile = &mut self.tiles[idx];
        tile.kind = kind;
        tile.owner = if kind.is_owned() { owner } else { None };
    }

    fn set_kind(&mut self, at: GridCoord, kind: CellKind) {
        let idx = self.index(at);
        let tile = &mut self.tiles[idx];
        debug_assert!(tile.owner.is_some() && kind.is_owned(), "{:?} at {}", kind, at);
        tile.kind = kind;
    }

    #[inline]
    fn tag(&self, at: GridCoord) -> WaveTag {
        self.tiles[self.index(at)].tag
    }

    #[inline]
    fn set_tag(&mut self, at: GridCoord, tag: WaveTag) {
        let idx = self.index(at);
        self.tiles[idx].tag = tag;
    }

    #[inline]
    fn distance(&self, at: GridCoord) -> u32 {
        self.tiles[self.index(at)].distance
    }

    #[inline]
    fn set_distance(&mut self, at: GridCoord, distance: u32) {
        let idx = self.index(at);
        self.tiles[idx].distance = distance;
    }

    fn reset_search(&mut self) {
        for tile in &mut self.tiles {
            tile.tag = WaveTag::Unvisited;
            tile.distance = UNREACHED;
        }
    }
}
