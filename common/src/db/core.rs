use crate::geom::coord::GridCoord;
use crate::geom::rect::Rect;

/// One net as read from the input: a source pin and its targets, in file order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetData {
    pub source: GridCoord,
    pub targets: Vec<GridCoord>,
}

impl NetData {
    pub fn new(source: GridCoord, targets: Vec<GridCoord>) -> Self {
        Self { source, targets }
    }

    pub fn pins(&self) -> impl Iterator<Item = GridCoord> + '_ {
        std::iter::once(self.source).chain(self.targets.iter().copied())
    }

    /// `(max_x - min_x + 1) * (max_y - min_y + 1)` over the source and all targets.
    pub fn bbox_area(&self) -> u64 {
        Rect::bounding(self.pins()).map(|r| r.area()).unwrap_or(1)
    }
}

/// The parsed floorplan handed to the router: grid size, blockages and nets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Floorplan {
    pub cols: u32,
    pub rows: u32,
    pub blockages: Vec<GridCoord>,
    pub nets: Vec<NetData>,
}

impl Floorplan {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            cols,
            rows,
            blockages: Vec::new(),
            nets: Vec::new(),
        }
    }

    pub fn num_nets(&self) -> usize {
        self.nets.len()
    }

    pub fn add_blockage(&mut self, at: GridCoord) {
        self.blockages.push(at);
    }

    pub fn add_net(&mut self, source: GridCoord, targets: Vec<GridCoord>) -> usize {
        self.nets.push(NetData::new(source, targets));
        self.nets.len() - 1
    }

    pub fn in_bounds(&self, p: GridCoord) -> bool {
        p.is_within(self.cols, self.rows)
    }
}
