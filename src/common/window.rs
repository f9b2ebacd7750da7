//! Fixed-capacity sliding window over a numeric stream.
//!
//! Backed by a preallocated buffer indexed by position modulo capacity;
//! the buffer never grows after construction.

#[derive(Debug, Clone)]
pub struct RollingWindow {
    buf: Vec<f64>,
    head: usize,
    len: usize,
}

impl RollingWindow {
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: vec![0.0; capacity.max(1)],
            head: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == self.buf.len()
    }

    /// Push a value, overwriting the oldest one once full.
    pub fn push(&mut self, value: f64) {
        let cap = self.buf.len();
        self.buf[(self.head + self.len) % cap] = value;
        if self.len < cap {
            self.len += 1;
        } else {
            self.head = (self.head + 1) % cap;
        }
    }

    /// Values oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        let cap = self.buf.len();
        (0..self.len).map(move |i| self.buf[(self.head + i) % cap])
    }

    pub fn max(&self) -> Option<f64> {
        self.iter().reduce(f64::max)
    }

    pub fn min(&self) -> Option<f64> {
        self.iter().reduce(f64::min)
    }

    pub fn sum(&self) -> f64 {
        self.iter().sum()
    }

    pub fn sample_std(&self) -> Option<f64> {
        if self.len < 2 {
            return None;
        }
        let mean = self.sum() / self.len as f64;
        let var = self.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (self.len - 1) as f64;
        Some(var.sqrt())
    }
}

/// Rolling statistic over a full series; `None` until the window fills.
pub fn rolling<F>(values: &[f64], window: usize, stat: F) -> Vec<Option<f64>>
where
    F: Fn(&RollingWindow) -> Option<f64>,
{
    let mut win = RollingWindow::new(window);
    values
        .iter()
        .map(|&v| {
            win.push(v);
            if win.is_full() {
                stat(&win)
            } else {
                None
            }
        })
        .collect()
}
