/// Runtime switches for the format engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Render `-0.0` as `-0.000000` instead of `0.000000`.
    pub signed_zero: bool,
}

impl Config {
    pub const DEFAULT: Self = Self { signed_zero: true };

    #[inline]
    pub const fn with_signed_zero(mut self, signed_zero: bool) -> Self {
        self.signed_zero = signed_zero;
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}
