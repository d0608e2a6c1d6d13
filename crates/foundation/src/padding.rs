use serde::{Deserialize, Serialize};

/// Four-sided inset in CSS pixels, in the shape `fitBounds` takes.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Padding {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Padding {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    pub fn with_extra_left(self, extra: f64) -> Self {
        Self {
            left: self.left + extra,
            ..self
        }
    }
}
