//! Rolling mean and variance over a fixed-capacity window.

/// Fixed-capacity rolling window with O(1) mean and population variance.
///
/// Maintains the running sum and sum of squares alongside a circular buffer,
/// so evicting the oldest sample restores exactly the statistics of the
/// remaining window contents.
#[derive(Debug, Clone)]
pub struct RollingStats {
    buf: Vec<f64>,
    capacity: usize,
    cursor: usize,
    sum: f64,
    sum_sq: f64,
}

impl RollingStats {
    /// Create a window holding up to `capacity` samples. A zero capacity is
    /// treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            buf: Vec::with_capacity(capacity),
            capacity,
            cursor: 0,
            sum: 0.0,
            sum_sq: 0.0,
        }
    }

    /// Add a sample, evicting the oldest when the window is full.
    pub fn push(&mut self, x: f64) {
        if self.buf.len() < self.capacity {
            self.buf.push(x);
        } else {
            let old = self.buf[self.cursor];
            self.sum -= old;
            self.sum_sq -= old * old;
            self.buf[self.cursor] = x;
        }
        self.cursor = (self.cursor + 1) % self.capacity;
        self.sum += x;
        self.sum_sq += x * x;
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Mean of the current window contents. Zero when empty.
    pub fn mean(&self) -> f64 {
        if self.buf.is_empty() {
            return 0.0;
        }
        self.sum / self.buf.len() as f64
    }

    /// Population variance of the current window contents. Zero when empty.
    pub fn variance(&self) -> f64 {
        if self.buf.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        // Floating-point cancellation can push this slightly negative.
        (self.sum_sq / self.buf.len() as f64 - mean * mean).max(0.0)
    }

    pub fn std_dev(&self) -> f64 {
        self.variance().sqrt()
    }
}
