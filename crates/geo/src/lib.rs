pub mod bounds;
pub mod lnglat;
pub mod time;

// Geo crate: small, well-tested primitives only.
pub use bounds::*;
pub use lnglat::*;
pub use time::*;
