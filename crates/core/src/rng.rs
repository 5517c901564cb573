//! RNG module - seeded piece sampling
//!
//! Pieces are drawn with replacement: the shape and the color are each picked
//! uniformly and independently from the catalog. A simple LCG keeps every game
//! reproducible from its seed.

use crate::catalog::{Catalog, Piece};
use crate::types::TRAY_SLOTS;

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
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // High bits of an LCG are far better distributed than the low ones.
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }
}

/// Draws random pieces from a catalog
#[derive(Debug, Clone)]
pub struct PieceSampler {
    catalog: Catalog,
    rng: SimpleRng,
}

impl PieceSampler {
    pub fn new(catalog: Catalog, seed: u32) -> Self {
        Self {
            catalog,
            rng: SimpleRng::new(seed),
        }
    }

    /// Sample one piece
    pub fn draw(&mut self) -> Piece {
        let shapes = self.catalog.shapes();
        let colors = self.catalog.colors();
        let shape = shapes[self.rng.next_range(shapes.len() as u32) as usize];
        let color = colors[self.rng.next_range(colors.len() as u32) as usize];
        Piece::new(shape, color)
    }

    /// Sample a full tray
    pub fn draw_tray(&mut self) -> [Piece; TRAY_SLOTS] {
        std::array::from_fn(|_| self.draw())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for PieceSampler {
    fn default() -> Self {
        Self::new(Catalog::standard(), 1)
    }
}
