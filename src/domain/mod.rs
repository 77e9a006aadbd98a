// Domain layer: catalog models and the API port. No HTTP here.

pub mod model;
pub mod ports;
