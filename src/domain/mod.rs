// Domain layer: record types, validation rules and ports. No transport code here.

pub mod model;
pub mod objects;
pub mod ports;
pub mod record;
pub mod rules;
