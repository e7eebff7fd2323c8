// Adapters layer: concrete storage collaborators behind the domain ports.

pub mod local;
pub mod memory;
pub mod snapshot;
