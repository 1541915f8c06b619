// Domain layer: card and wire models plus the ports the adapters implement.

pub mod model;
pub mod ports;
