// Domain layer: core models and ports (interfaces) to the storage collaborator.

pub mod model;
pub mod ports;
