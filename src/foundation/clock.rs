/// Microseconds per second, the unit conversion constant for the master clock.
pub const MICROS_PER_SEC: u64 = 1_000_000;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(transparent)]
/// An absolute position or length on the master clock, in microseconds.
pub struct Micros(pub u64);

impl Micros {
    /// Zero point of the master clock.
    pub const ZERO: Micros = Micros(0);

    /// Convert to seconds as `f64` (used only at the encoder boundary).
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / MICROS_PER_SEC as f64
    }

    /// Convert to whole milliseconds, rounding down.
    pub fn as_millis(self) -> u64 {
        self.0 / 1_000
    }

    /// Saturating subtraction.
    pub fn saturating_sub(self, other: Micros) -> Micros {
        Micros(self.0.saturating_sub(other.0))
    }
}

/// Raised when a span constructor receives `end <= start`.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("span end {end:?} must be greater than start {start:?}")]
pub struct InvalidSpan {
    /// Offending start value.
    pub start: Micros,
    /// Offending end value.
    pub end: Micros,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// A half-open interval `[start, end)` on the master clock.
pub struct TimelineSpan {
    /// Inclusive start.
    pub start: Micros,
    /// Exclusive end.
    pub end: Micros,
}

impl TimelineSpan {
    /// Build a span, rejecting empty or inverted intervals.
    pub fn new(start: Micros, end: Micros) -> Result<Self, InvalidSpan> {
        if end.0 <= start.0 {
            return Err(InvalidSpan { start, end });
        }
        Ok(Self { start, end })
    }

    /// Build a span from raw microsecond values.
    pub fn from_raw(start: u64, end: u64) -> Result<Self, InvalidSpan> {
        Self::new(Micros(start), Micros(end))
    }

    /// Span length in microseconds.
    pub fn len(self) -> Micros {
        Micros(self.end.0 - self.start.0)
    }

    /// Whether `t` falls inside the half-open interval.
    pub fn contains(self, t: Micros) -> bool {
        self.start.0 <= t.0 && t.0 < self.end.0
    }

    /// Whether two half-open spans share any instant.
    pub fn overlaps(self, other: TimelineSpan) -> bool {
        self.start.0 < other.end.0 && other.start.0 < self.end.0
    }
}

impl std::fmt::Display for TimelineSpan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start.0, self.end.0)
    }
}
