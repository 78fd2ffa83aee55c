//! Contrast limited adaptive histogram equalization (CLAHE).
//!
//! The plane is split into an 8×8 grid of tiles. Each tile gets its own
//! equalization table built from a clipped histogram, and every output pixel
//! bilinearly blends the tables of the four nearest tile centers.
//!
//! When the plane dimensions are not both multiples of the grid, the tiles
//! are laid over a plane extended at the bottom and right by reflection
//! (`dcb|abcd|cba`), and histograms include those reflected samples.

use crate::histogram::BINS;

/// Tiles along each axis.
pub const GRID: usize = 8;

/// Equalize a single-channel plane with the given clip limit.
///
/// `clip_limit` is relative to a flat histogram: a limit of 2 allows any bin to
/// hold at most twice the average count per level. A non-positive limit
/// disables clipping.
///
/// # Panics
/// Panics if `plane.len() != width * height`.
pub fn clahe(plane: &[u8], width: usize, height: usize, clip_limit: f64) -> Vec<u8> {
    assert_eq!(
        plane.len(),
        width * height,
        "Plane size mismatch. Expected {}x{}, got {} samples",
        width,
        height,
        plane.len()
    );
    if plane.is_empty() {
        return Vec::new();
    }

    let (ext_width, ext_height) = if width % GRID == 0 && height % GRID == 0 {
        (width, height)
    } else {
        (
            width + GRID - width % GRID,
            height + GRID - height % GRID,
        )
    };
    let tile_w = ext_width / GRID;
    let tile_h = ext_height / GRID;
    let tile_area = tile_w * tile_h;

    let clip = if clip_limit > 0.0 {
        ((clip_limit * tile_area as f64 / BINS as f64) as u32).max(1)
    } else {
        0
    };

    let luts = tile_luts(plane, width, height, tile_w, tile_h, clip);
    interpolate(plane, width, height, tile_w, tile_h, &luts)
}

/// Build one equalization table per tile, row-major over the grid.
fn tile_luts(
    plane: &[u8],
    width: usize,
    height: usize,
    tile_w: usize,
    tile_h: usize,
    clip: u32,
) -> Vec<[u8; BINS]> {
    let lut_scale = (BINS - 1) as f32 / (tile_w * tile_h) as f32;
    let mut luts = Vec::with_capacity(GRID * GRID);

    for ty in 0..GRID {
        for tx in 0..GRID {
            let mut hist = [0u32; BINS];
            for y in ty * tile_h..(ty + 1) * tile_h {
                let row = reflect_101(y, height) * width;
                for x in tx * tile_w..(tx + 1) * tile_w {
                    hist[plane[row + reflect_101(x, width)] as usize] += 1;
                }
            }

            if clip > 0 {
                clip_histogram(&mut hist, clip);
            }

            let mut lut = [0u8; BINS];
            let mut sum = 0u32;
            for (value, &count) in lut.iter_mut().zip(hist.iter()) {
                sum += count;
                *value = (sum as f32 * lut_scale).round_ties_even().clamp(0.0, 255.0) as u8;
            }
            luts.push(lut);
        }
    }

    luts
}

/// Clip bins at `clip` and hand the excess back evenly.
///
/// Whatever does not divide evenly is spread one count at a time at a fixed
/// stride starting from bin 0.
fn clip_histogram(hist: &mut [u32; BINS], clip: u32) {
    let mut clipped = 0u32;
    for count in hist.iter_mut() {
        if *count > clip {
            clipped += *count - clip;
            *count = clip;
        }
    }

    let batch = clipped / BINS as u32;
    let mut residual = clipped - batch * BINS as u32;
    for count in hist.iter_mut() {
        *count += batch;
    }

    if residual > 0 {
        let step = (BINS / residual as usize).max(1);
        let mut i = 0;
        while i < BINS && residual > 0 {
            hist[i] += 1;
            i += step;
            residual -= 1;
        }
    }
}

fn interpolate(
    plane: &[u8],
    width: usize,
    height: usize,
    tile_w: usize,
    tile_h: usize,
    luts: &[[u8; BINS]],
) -> Vec<u8> {
    let inv_tw = 1.0 / tile_w as f32;
    let inv_th = 1.0 / tile_h as f32;

    // Horizontal neighbours and weights are the same for every row.
    let columns: Vec<(usize, usize, f32)> = (0..width)
        .map(|x| neighbours(x as f32 * inv_tw - 0.5))
        .collect();

    let mut out = vec![0u8; plane.len()];
    for y in 0..height {
        let (ty1, ty2, ya) = neighbours(y as f32 * inv_th - 0.5);
        let ya1 = 1.0 - ya;
        let row = y * width;
        for (x, &(tx1, tx2, xa)) in columns.iter().enumerate() {
            let xa1 = 1.0 - xa;
            let v = plane[row + x] as usize;
            let top = luts[ty1 * GRID + tx1][v] as f32 * xa1 + luts[ty1 * GRID + tx2][v] as f32 * xa;
            let bottom = luts[ty2 * GRID + tx1][v] as f32 * xa1 + luts[ty2 * GRID + tx2][v] as f32 * xa;
            let res = top * ya1 + bottom * ya;
            out[row + x] = res.round_ties_even().clamp(0.0, 255.0) as u8;
        }
    }
    out
}

/// Tile indices on either side of a tile-space coordinate plus the weight of
/// the second one.
fn neighbours(t: f32) -> (usize, usize, f32) {
    let t1 = t.floor();
    let weight = t - t1;
    let t1 = t1 as isize;
    let first = t1.max(0) as usize;
    let second = ((t1 + 1).max(0) as usize).min(GRID - 1);
    (first.min(GRID - 1), second, weight)
}

/// Mirror an index into `0..n` without repeating the edge sample.
fn reflect_101(i: usize, n: usize) -> usize {
    if n == 1 {
        return 0;
    }
    let period = 2 * (n - 1);
    let i = i % period;
    if i < n {
        i
    } else {
        period - i
    }
}
