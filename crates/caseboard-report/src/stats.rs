/// Running sum and count for one bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct Tally {
    pub sum: u64,
    pub count: u64,
}

impl Tally {
    pub fn add(&mut self, value: u64) {
        self.sum += value;
        self.count += 1;
    }

    /// Mean rounded half-up, or 0 for an empty tally.
    pub fn rounded_mean(&self) -> u64 {
        rounded_mean(self.sum, self.count)
    }
}

/// `round(sum / count)` with halves rounded up; 0 when `count` is 0.
pub(crate) fn rounded_mean(sum: u64, count: u64) -> u64 {
    if count == 0 {
        return 0;
    }
    (2 * sum + count) / (2 * count)
}
