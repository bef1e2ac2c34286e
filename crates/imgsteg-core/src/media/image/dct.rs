//! Orthonormal two dimensional DCT-II on 8x8 blocks and its inverse.
//!
//! `forward` and `inverse` are exact inverses of each other (up to floating
//! point noise). Coefficients are stored row-major: `coeffs[v * 8 + u]` holds
//! vertical frequency `v` and horizontal frequency `u`.

use std::f32::consts::{FRAC_1_SQRT_2, PI};
use std::sync::OnceLock;

pub(crate) const BLOCK_SIZE: usize = 8;

pub(crate) type Block = [f32; BLOCK_SIZE * BLOCK_SIZE];

/// `basis[u][x] = C(u) * cos((2x + 1) * u * PI / 16)`
fn basis() -> &'static [[f32; BLOCK_SIZE]; BLOCK_SIZE] {
    static BASIS: OnceLock<[[f32; BLOCK_SIZE]; BLOCK_SIZE]> = OnceLock::new();
    BASIS.get_or_init(|| {
        let mut basis = [[0.0; BLOCK_SIZE]; BLOCK_SIZE];
        for (u, row) in basis.iter_mut().enumerate() {
            let norm = if u == 0 { FRAC_1_SQRT_2 } else { 1.0 } * 0.5;
            for (x, b) in row.iter_mut().enumerate() {
                *b = norm * ((2 * x + 1) as f32 * u as f32 * PI / 16.0).cos();
            }
        }
        basis
    })
}

pub(crate) fn forward(block: &Block) -> Block {
    let basis = basis();
    let mut rows = [0.0f32; 64];
    for y in 0..BLOCK_SIZE {
        for u in 0..BLOCK_SIZE {
            rows[y * 8 + u] = (0..BLOCK_SIZE).map(|x| basis[u][x] * block[y * 8 + x]).sum();
        }
    }

    let mut coeffs = [0.0f32; 64];
    for u in 0..BLOCK_SIZE {
        for v in 0..BLOCK_SIZE {
            coeffs[v * 8 + u] = (0..BLOCK_SIZE).map(|y| basis[v][y] * rows[y * 8 + u]).sum();
        }
    }
    coeffs
}

pub(crate) fn inverse(coeffs: &Block) -> Block {
    let basis = basis();
    let mut cols = [0.0f32; 64];
    for u in 0..BLOCK_SIZE {
        for y in 0..BLOCK_SIZE {
            cols[y * 8 + u] = (0..BLOCK_SIZE).map(|v| basis[v][y] * coeffs[v * 8 + u]).sum();
        }
    }

    let mut block = [0.0f32; 64];
    for y in 0..BLOCK_SIZE {
        for x in 0..BLOCK_SIZE {
            block[y * 8 + x] = (0..BLOCK_SIZE).map(|u| basis[u][x] * cols[y * 8 + u]).sum();
        }
    }
    block
}
