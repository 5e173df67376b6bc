use crate::input_modeling::UniformRNG;

/// The simulator provides a uniform random number generator and simulation
/// clock to models during the execution of a simulation.  The clock is only
/// advanced by the `Scheduler`.
#[derive(Debug, Clone, Default)]
pub struct Services {
    uniform_rng: UniformRNG,
    global_time: f64,
}

impl Services {
    pub fn new(seed: u64) -> Self {
        Self {
            uniform_rng: UniformRNG::new(seed),
            global_time: 0.0,
        }
    }

    pub fn uniform_rng(&mut self) -> &mut UniformRNG {
        &mut self.uniform_rng
    }

    pub fn global_time(&self) -> f64 {
        self.global_time
    }

    pub(crate) fn set_global_time(&mut self, time: f64) {
        self.global_time = time;
    }
}
