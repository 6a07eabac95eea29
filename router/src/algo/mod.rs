pub mod blockage;
pub mod order;
pub mod traceback;
pub mod wavefront;
