/// Browser clock timestamp in milliseconds (`performance.now()` / `Date.now()`).
#[derive(Copy, Clone, Debug, Default, PartialEq, PartialOrd)]
pub struct Millis(pub f64);

impl Millis {
    pub const ZERO: Millis = Millis(0.0);

    pub fn new(ms: f64) -> Self {
        Millis(ms)
    }

    /// Milliseconds elapsed since `earlier`, never negative.
    pub fn elapsed_since(self, earlier: Millis) -> f64 {
        (self.0 - earlier.0).max(0.0)
    }

    pub fn add_ms(self, ms: f64) -> Self {
        Millis(self.0 + ms)
    }
}

#[cfg(test)]
mod tests {
    use super::Millis;

    #[test]
    fn elapsed_is_clamped_at_zero() {
        assert_eq!(Millis(1500.0).elapsed_since(Millis(500.0)), 1000.0);
        assert_eq!(Millis(10.0).elapsed_since(Millis(20.0)), 0.0);
    }

    #[test]
    fn add_ms_moves_forward() {
        assert_eq!(Millis::ZERO.add_ms(250.0), Millis(250.0));
    }
}
