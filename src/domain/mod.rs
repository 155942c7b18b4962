// Domain layer: note/session models and the ports the hosted service is reached through.

pub mod model;
pub mod ports;
