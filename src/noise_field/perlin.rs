//! Gradient (Perlin) noise in one, two and three dimensions.

use super::hash::{hash_1d, hash_2d, hash_3d};

const GRAD_1D: [f32; 2] = [1.0, -1.0];

const GRAD_2D: [(f32, f32); 8] = [
    (1.0, 0.0),
    (-1.0, 0.0),
    (0.0, 1.0),
    (0.0, -1.0),
    (1.0, 1.0),
    (-1.0, 1.0),
    (1.0, -1.0),
    (-1.0, -1.0),
];

const GRAD_3D: [(f32, f32, f32); 12] = [
    (1.0, 1.0, 0.0),
    (-1.0, 1.0, 0.0),
    (1.0, -1.0, 0.0),
    (-1.0, -1.0, 0.0),
    (1.0, 0.0, 1.0),
    (-1.0, 0.0, 1.0),
    (1.0, 0.0, -1.0),
    (-1.0, 0.0, -1.0),
    (0.0, 1.0, 1.0),
    (0.0, -1.0, 1.0),
    (0.0, 1.0, -1.0),
    (0.0, -1.0, -1.0),
];

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline]
pub fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn grad_2d(hash: u32, dx: f32, dy: f32) -> f32 {
    let (gx, gy) = GRAD_2D[(hash & 7) as usize];
    gx * dx + gy * dy
}

#[inline]
fn grad_3d(hash: u32, dx: f32, dy: f32, dz: f32) -> f32 {
    let (gx, gy, gz) = GRAD_3D[(hash % 12) as usize];
    gx * dx + gy * dy + gz * dz
}

pub fn perlin_1d(x: f32, seed: u32) -> f32 {
    let x0 = x.floor();
    let ix = x0 as i32;
    let fx = x - x0;

    let n0 = GRAD_1D[(hash_1d(ix, seed) & 1) as usize] * fx;
    let n1 = GRAD_1D[(hash_1d(ix.wrapping_add(1), seed) & 1) as usize] * (fx - 1.0);

    // 1D gradient noise peaks at 0.5; rescale to [-1, 1]
    (lerp(n0, n1, fade(fx)) * 2.0).clamp(-1.0, 1.0)
}

pub fn perlin_2d(x: f32, y: f32, seed: u32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let ix = x0 as i32;
    let iy = y0 as i32;
    let fx = x - x0;
    let fy = y - y0;

    let n00 = grad_2d(hash_2d(ix, iy, seed), fx, fy);
    let n10 = grad_2d(hash_2d(ix.wrapping_add(1), iy, seed), fx - 1.0, fy);
    let n01 = grad_2d(hash_2d(ix, iy.wrapping_add(1), seed), fx, fy - 1.0);
    let n11 = grad_2d(
        hash_2d(ix.wrapping_add(1), iy.wrapping_add(1), seed),
        fx - 1.0,
        fy - 1.0,
    );

    let u = fade(fx);
    let v = fade(fy);
    lerp(lerp(n00, n10, u), lerp(n01, n11, u), v).clamp(-1.0, 1.0)
}

pub fn perlin_3d(x: f32, y: f32, z: f32, seed: u32) -> f32 {
    let x0 = x.floor();
    let y0 = y.floor();
    let z0 = z.floor();
    let (ix, iy, iz) = (x0 as i32, y0 as i32, z0 as i32);
    let (fx, fy, fz) = (x - x0, y - y0, z - z0);

    let corner = |cx: i32, cy: i32, cz: i32| {
        let h = hash_3d(
            ix.wrapping_add(cx),
            iy.wrapping_add(cy),
            iz.wrapping_add(cz),
            seed,
        );
        grad_3d(h, fx - cx as f32, fy - cy as f32, fz - cz as f32)
    };

    let u = fade(fx);
    let v = fade(fy);
    let w = fade(fz);

    let x00 = lerp(corner(0, 0, 0), corner(1, 0, 0), u);
    let x10 = lerp(corner(0, 1, 0), corner(1, 1, 0), u);
    let x01 = lerp(corner(0, 0, 1), corner(1, 0, 1), u);
    let x11 = lerp(corner(0, 1, 1), corner(1, 1, 1), u);

    lerp(lerp(x00, x10, v), lerp(x01, x11, v), w).clamp(-1.0, 1.0)
}
