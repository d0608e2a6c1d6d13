pub mod previous;
pub mod signal;
pub mod throttle;

pub use previous::*;
pub use signal::*;
pub use throttle::*;
