//! Domain Layer
//!
//! Value objects, entities, ports and pure services. Nothing here touches
//! the network or a concrete database library.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;

pub use value_objects::{DatabaseEdition, IpVersion};
