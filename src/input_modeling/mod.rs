//! The input modeling module provides the random sampling behind the
//! network: a seeded uniform random number generator, and the random
//! variable distributions built on top of it.

pub mod random_variable;
pub mod uniform_rng;

pub use random_variable::Continuous as ContinuousRandomVariable;
pub use uniform_rng::UniformRNG;
