//! RNG module - seedable randomness for the simulation
//!
//! A small LCG threaded through `Board` construction so that template
//! selection and piece colors are reproducible from a seed. Nothing here is
//! cryptographic; it only has to be cheap and deterministic.

use blockfall_types::Rgb;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        self.next_u32() % max
    }

    /// Uniform random color, one byte per channel.
    ///
    /// Assigned to each piece at spawn and constant for its lifetime.
    pub fn next_rgb(&mut self) -> Rgb {
        Rgb::new(
            self.next_range(256) as u8,
            self.next_range(256) as u8,
            self.next_range(256) as u8,
        )
    }
}
