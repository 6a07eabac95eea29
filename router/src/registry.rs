use crate::utils::counters::ConflictCounters;
use maze_common::db::core::NetData;
use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;

#[derive(Clone, Debug)]
pub struct Net {
    pub source: GridCoord,
    /// Targets in input order.
    pub targets: Vec<GridCoord>,
    pub bbox_area: u64,
}

impl Net {
    pub fn from_data(data: &NetData) -> Self {
        Self {
            source: data.source,
            targets: data.targets.clone(),
            bbox_area: data.bbox_area(),
        }
    }

    pub fn num_targets(&self) -> usize {
        self.targets.len()
    }
}

/// Per-net geometry plus the scratch state the router keeps for every net.
#[derive(Clone, Debug, Default)]
pub struct NetRegistry {
    nets: Vec<Net>,
    pub conflicts: ConflictCounters,
    pub route_order: Vec<NetId>,
}

impl NetRegistry {
    pub fn new(nets: Vec<Net>) -> Self {
        let n = nets.len();
        Self {
            nets,
            conflicts: ConflictCounters::new(n),
            route_order: (0..n).map(NetId::new).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nets.is_empty()
    }

    pub fn get(&self, id: NetId) -> &Net {
        &self.nets[id.index()]
    }

    pub fn ids(&self) -> impl Iterator<Item = NetId> + '_ {
        (0..self.nets.len()).map(NetId::new)
    }

    pub fn bbox_areas(&self) -> Vec<u64> {
        self.nets.iter().map(|n| n.bbox_area).collect()
    }
}
