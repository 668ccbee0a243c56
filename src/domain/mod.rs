// Domain layer: models, the profile record handed to sinks, and the ports sources/sinks implement.

pub mod model;
pub mod ports;
pub mod record;
