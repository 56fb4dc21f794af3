// Domain layer: descriptor model and the loader port. No transport concerns here.

pub mod model;
pub mod ports;
