use crate::utils::counters::min_index;
use maze_common::db::indices::NetId;

/// Routing order: ascending bounding-box area, lower net index first on ties.
///
/// Repeatedly takes the first minimum of a scratch copy and retires it with
/// `u64::MAX`, which no real area reaches (`u32 * u32` fits well below it).
pub fn order_by_bbox(areas: &[u64]) -> Vec<NetId> {
    let mut scratch = areas.to_vec();
    let mut order = Vec::with_capacity(areas.len());
    for _ in 0..areas.len() {
        let Some(pick) = min_index(&scratch) else {
            break;
        };
        scratch[pick] = u64::MAX;
        order.push(NetId::new(pick));
    }
    order
}
