//! Location and address resolution
//!
//! Both resolvers are total: every outcome of the underlying service,
//! including faults, maps to a value the screen can show.

pub mod address;
pub mod location;

pub use address::{AddressResolver, AddressText};
pub use location::LocationResolver;
