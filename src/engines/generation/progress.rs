/// Per-generation progress notifications from the engine.
pub trait ProgressCallback {
    fn on_generation_start(&mut self, generation: usize);
    fn on_generation_complete(&mut self, generation: usize, best: f64, mean: f64);
}

/// Prints a progress line every tenth generation.
pub struct ConsoleProgressCallback {
    interval: usize,
}

impl ConsoleProgressCallback {
    pub fn new(interval: usize) -> Self {
        Self {
            interval: interval.max(1),
        }
    }
}

impl Default for ConsoleProgressCallback {
    fn default() -> Self {
        Self::new(10)
    }
}

impl ProgressCallback for ConsoleProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, generation: usize, best: f64, mean: f64) {
        if generation % self.interval == 0 {
            println!(
                "Generation {:>4} | best fitness: {:.3} | mean fitness: {:.3}",
                generation, best, mean
            );
        }
    }
}

/// Discards all notifications; handy for tests and library callers.
pub struct NullProgressCallback;

impl ProgressCallback for NullProgressCallback {
    fn on_generation_start(&mut self, _generation: usize) {}

    fn on_generation_complete(&mut self, _generation: usize, _best: f64, _mean: f64) {}
}
