// Domain layer: core models and ports (interfaces). Only std, serde and thiserror here.

pub mod model;
pub mod ports;
