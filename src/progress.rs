//! Coarse-grained progress reporting over a plain callback.

/// Reports a completion fraction roughly every 2% of `total` items.
///
/// Fractions are clamped to [0.0, 1.0] and never decrease; [`Meter::finish`]
/// always emits exactly 1.0. The host owns rendering and any event pumping
/// it wants to do inside the callback.
pub struct Meter<'a> {
    total: usize,
    step: usize,
    done: usize,
    sink: &'a mut dyn FnMut(f64),
}

impl<'a> Meter<'a> {
    pub fn new(total: usize, sink: &'a mut dyn FnMut(f64)) -> Self {
        Self {
            total,
            step: (total / 50).max(1),
            done: 0,
            sink,
        }
    }

    /// Record one completed item, emitting a fraction on step boundaries
    /// and on the final item.
    pub fn tick(&mut self) {
        self.done += 1;
        if self.done % self.step == 0 || self.done == self.total {
            let fraction = self.done as f64 / self.total as f64;
            (self.sink)(fraction.clamp(0.0, 1.0));
        }
    }

    /// Report completion.
    pub fn finish(&mut self) {
        (self.sink)(1.0);
    }
}
