// Domain layer: data model and ports. Adapters implement the ports; core never sees I/O.

pub mod model;
pub mod ports;
