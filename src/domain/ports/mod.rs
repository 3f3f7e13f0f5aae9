mod address_resolver;
mod location_repository;

pub use address_resolver::{AddressResolver, ResolveError};
pub use location_repository::{LocationRepository, StoreError};
