use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};

/// Source of uniform samples in `[0, 1)` consumed one per trial.
pub trait DrawSource {
    fn next_draw(&mut self) -> f64;
}

impl<T: DrawSource + ?Sized> DrawSource for &mut T {
    fn next_draw(&mut self) -> f64 {
        (**self).next_draw()
    }
}

pub struct UniformDraws<R: Rng> {
    rng: R,
    unit: Uniform<f64>,
}

impl<R: Rng> UniformDraws<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            unit: Uniform::new(0.0, 1.0),
        }
    }
}

impl<R: Rng> DrawSource for UniformDraws<R> {
    fn next_draw(&mut self) -> f64 {
        self.unit.sample(&mut self.rng)
    }
}

/// Seeded draws are reproducible; without a seed the generator is seeded
/// from the operating system.
pub fn draws_from_seed(seed: Option<u64>) -> UniformDraws<StdRng> {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    UniformDraws::new(rng)
}
