//! classsync: class schedule with conflict detection and a weekly timetable,
//! laid out as a hexagon (domain, ports, use cases, adapters).

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
