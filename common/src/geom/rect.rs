use super::coord::GridCoord;

/// Inclusive tile rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub min: GridCoord,
    pub max: GridCoord,
}

impl Rect {
    pub fn new(min: GridCoord, max: GridCoord) -> Self {
        Self { min, max }
    }

    /// Smallest rectangle covering every point. `None` for an empty iterator.
    pub fn bounding<I: IntoIterator<Item = GridCoord>>(points: I) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut rect = Rect::new(first, first);
        for p in iter {
            rect.min.x = rect.min.x.min(p.x);
            rect.min.y = rect.min.y.min(p.y);
            rect.max.x = rect.max.x.max(p.x);
            rect.max.y = rect.max.y.max(p.y);
        }
        Some(rect)
    }

    pub fn width(&self) -> u32 {
        self.max.x - self.min.x + 1
    }
    pub fn height(&self) -> u32 {
        self.max.y - self.min.y + 1
    }
    pub fn area(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    pub fn contains(&self, p: GridCoord) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}
