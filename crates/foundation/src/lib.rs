pub mod bounds;
pub mod padding;
pub mod time;

// Foundation crate: small, well-tested value objects only.
pub use bounds::*;
pub use padding::*;
pub use time::*;
