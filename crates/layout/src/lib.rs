pub mod breakpoint;
pub mod navigation;
pub mod padding;
pub mod sidebar;

pub use breakpoint::*;
pub use navigation::*;
pub use padding::*;
pub use sidebar::*;
