// Domain layer: core models and ports (interfaces). No I/O happens here.

pub mod model;
pub mod ports;

pub mod services;
