/// A closed range of `f32` values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f32,
    pub max: f32,
}

impl Interval {
    /// Displayable range of a color channel.
    pub const UNIT: Interval = Interval { min: 0.0, max: 1.0 };

    /// Valid range of a cosine.
    pub const COSINE: Interval = Interval {
        min: -1.0,
        max: 1.0,
    };

    /// Returns true if x is within the interval [min, max] (inclusive).
    pub fn contains(&self, x: f32) -> bool {
        self.min <= x && x <= self.max
    }

    /// Clamps x to be within the interval [min, max].
    pub fn clamp(&self, x: f32) -> f32 {
        x.clamp(self.min, self.max)
    }
}
