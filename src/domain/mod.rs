// Domain layer: the submission entity and the ports the core talks through.

pub mod model;
pub mod ports;
