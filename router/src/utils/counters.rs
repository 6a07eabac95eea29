use maze_common::db::indices::NetId;

/// Index of the first smallest element.
pub fn min_index<T: PartialOrd + Copy>(values: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v >= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the first largest element.
pub fn max_index<T: PartialOrd + Copy>(values: &[T]) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}

/// Index of the only non-zero element, if exactly one exists.
pub fn sole_positive_index(values: &[u32]) -> Option<usize> {
    let mut found = None;
    for (i, &v) in values.iter().enumerate() {
        if v > 0 {
            if found.is_some() {
                return None;
            }
            found = Some(i);
        }
    }
    found
}

/// Per-net tallies of how often a net's wires fence in a flood fill.
#[derive(Clone, Debug, Default)]
pub struct ConflictCounters {
    current: Vec<u32>,
    accumulated: Vec<u32>,
}

impl ConflictCounters {
    pub fn new(num_nets: usize) -> Self {
        Self {
            current: vec![0; num_nets],
            accumulated: vec![0; num_nets],
        }
    }

    #[inline]
    pub fn bump(&mut self, net: NetId) {
        self.current[net.index()] += 1;
    }

    pub fn current(&self, net: NetId) -> u32 {
        self.current[net.index()]
    }

    pub fn clear_current(&mut self) {
        self.current.fill(0);
    }

    /// Adds the current tallies into the running total.
    pub fn accumulate(&mut self) {
        for (acc, &c) in self.accumulated.iter_mut().zip(&self.current) {
            *acc += c;
        }
    }

    pub fn clear(&mut self) {
        self.current.fill(0);
        self.accumulated.fill(0);
    }

    pub fn sole_blocker(&self) -> Option<NetId> {
        sole_positive_index(&self.current).map(NetId::new)
    }

    /// Net with the highest accumulated tally; `None` if every tally is zero.
    pub fn strongest_blocker(&self) -> Option<NetId> {
        max_index(&self.accumulated)
            .filter(|&i| self.accumulated[i] > 0)
            .map(NetId::new)
    }
}
