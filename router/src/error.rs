use maze_common::db::indices::NetId;
use maze_common::geom::coord::GridCoord;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("floorplan has no tiles ({cols}x{rows})")]
    EmptyGrid { cols: u32, rows: u32 },

    #[error("{what} at {at} lies outside the {cols}x{rows} grid")]
    OutOfBounds {
        what: &'static str,
        at: GridCoord,
        cols: u32,
        rows: u32,
    },

    #[error("net {net} has no targets")]
    EmptyNet { net: NetId },

    #[error("net {net} has a pin on the blockage at {at}")]
    PinOnBlockage { net: NetId, at: GridCoord },

    #[error("tile {at} is claimed by both net {first} and net {second}")]
    PinConflict {
        first: NetId,
        second: NetId,
        at: GridCoord,
    },

    #[error("traceback of net {net} found no predecessor at {at} (distance {distance})")]
    TracebackStalled {
        net: NetId,
        at: GridCoord,
        distance: u32,
    },
}
