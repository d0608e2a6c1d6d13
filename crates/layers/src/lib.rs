pub mod settings;
pub mod style;
pub mod toggle;
pub mod visibility;

pub use settings::*;
pub use style::*;
pub use toggle::*;
pub use visibility::*;
