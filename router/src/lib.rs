pub mod algo;
pub mod check;
pub mod error;
pub mod grid;
pub mod maze;
pub mod observer;
pub mod registry;
pub mod utils;

#[cfg(test)]
mod testing;

pub use error::RouteError;
pub use maze::{NetOutcome, RoutingContext};

use maze_common::db::core::Floorplan;
use maze_common::util::config::RouterConfig;

/// Routes a whole floorplan headless and hands back the finished context.
pub fn route(floorplan: &Floorplan, config: &RouterConfig) -> Result<RoutingContext, RouteError> {
    let mut ctx = RoutingContext::new(floorplan, config.clone())?;
    ctx.route_all()?;
    Ok(ctx)
}
