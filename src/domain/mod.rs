// Domain layer: models and ports. Concrete storage and randomness live under adapters.

pub mod model;
pub mod ports;
