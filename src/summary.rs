/// Running aggregate for one station.
///
/// `sum` is kept in `f64`: every `f32` observation is exact in `f64`, so totals over realistic
/// inputs carry no rounding and do not depend on the order chunks are merged in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    min: f32,
    max: f32,
    sum: f64,
    count: u64,
}

impl From<f32> for Summary {
    fn from(value: f32) -> Self {
        Summary {
            min: value,
            max: value,
            sum: value as f64,
            count: 1,
        }
    }
}

impl Summary {
    pub fn new(value: f32) -> Self {
        Self::from(value)
    }

    pub fn add(&mut self, v: f32) {
        self.min = self.min.min(v);
        self.max = self.max.max(v);
        self.sum += v as f64;
        self.count += 1;
    }

    /// Folds in a summary of a disjoint set of observations of the same station.
    pub fn merge(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
        self.sum += other.sum;
        self.count += other.count;
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn sum(&self) -> f64 {
        self.sum
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }
}
