/// Maps layout data coordinates to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain_start: f32,
    domain_end: f32,
    range_start: f32,
    range_end: f32,
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain_start: 0.0,
            domain_end: 1.0,
            range_start: 0.0,
            range_end: 1.0,
        }
    }
}

impl LinearScale {
    pub fn new(domain: (f32, f32), range: (f32, f32)) -> Self {
        Self::default().with_domain(domain).with_range(range)
    }

    pub fn with_domain(mut self, domain: (f32, f32)) -> Self {
        self.domain_start = domain.0;
        self.domain_end = domain.1;
        self
    }

    pub fn with_range(mut self, range: (f32, f32)) -> Self {
        self.range_start = range.0;
        self.range_end = range.1;
        self
    }

    fn is_degenerate(&self) -> bool {
        self.domain_start == self.domain_end
            || self.domain_start.is_nan()
            || self.domain_end.is_nan()
            || self.range_start.is_nan()
            || self.range_end.is_nan()
    }

    /// Pixels per data unit, negative when the range is flipped
    pub fn factor(&self) -> f32 {
        if self.is_degenerate() {
            return 0.0;
        }
        (self.range_end - self.range_start) / (self.domain_end - self.domain_start)
    }

    pub fn scale(&self, value: f64) -> f32 {
        if self.is_degenerate() {
            return self.range_start;
        }
        self.range_start + self.factor() * (value as f32 - self.domain_start)
    }

    /// Scale a data length to a non-negative pixel length
    pub fn scale_length(&self, length: f64) -> f32 {
        (self.factor() * length as f32).abs()
    }
}
