//! Access Grid: the persisted per-origin, per-iteration indicator format
//! used for regional bootstrapping. Distinct from the opportunity
//! grid's binary format: this one carries a whole iteration axis per pixel,
//! delta-coded per cell rather than across the entire body.

use std::io::{Read, Write};

use access_common::{AccessError, AccessResult, WebMercatorExtents};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;

const MAGIC: &[u8; 8] = b"ACCESSGR";
const VERSION: i32 = 0;

/// Per-origin, per-iteration accessibility indicator values over a
/// regional origin grid. `values[(y * width + x) * n_iterations +
/// iteration]`; iteration `0` is the point estimate.
#[derive(Debug, Clone)]
pub struct AccessGrid {
    pub extents: WebMercatorExtents,
    pub n_iterations: usize,
    values: Vec<i32>,
}

impl AccessGrid {
    pub fn new(extents: WebMercatorExtents, n_iterations: usize) -> Self {
        let values = vec![0; extents.len() * n_iterations];
        Self {
            extents,
            n_iterations,
            values,
        }
    }

    fn index(&self, x: u32, y: u32, iteration: usize) -> usize {
        (y as usize * self.extents.width as usize + x as usize) * self.n_iterations + iteration
    }

    pub fn get(&self, x: u32, y: u32, iteration: usize) -> i32 {
        self.values[self.index(x, y, iteration)]
    }

    pub fn set(&mut self, x: u32, y: u32, iteration: usize, value: i32) {
        let i = self.index(x, y, iteration);
        self.values[i] = value;
    }

    /// All iteration values for one origin pixel, point estimate first.
    pub fn iterations_at(&self, x: u32, y: u32) -> &[i32] {
        let start = self.index(x, y, 0);
        &self.values[start..start + self.n_iterations]
    }
}

pub fn write<W: Write>(mut w: W, grid: &AccessGrid) -> AccessResult<()> {
    w.write_all(MAGIC)?;
    w.write_all(&VERSION.to_le_bytes())?;

    let e = &grid.extents;
    for field in [
        e.zoom as i32,
        e.west,
        e.north,
        e.width as i32,
        e.height as i32,
        grid.n_iterations as i32,
    ] {
        w.write_all(&field.to_le_bytes())?;
    }

    for y in 0..e.height {
        for x in 0..e.width {
            let mut prev = 0i32;
            for value in grid.iterations_at(x, y) {
                let delta = value - prev;
                prev = *value;
                w.write_all(&delta.to_le_bytes())?;
            }
        }
    }

    Ok(())
}

pub fn read<R: Read>(mut r: R) -> AccessResult<AccessGrid> {
    let mut magic = [0u8; 8];
    r.read_exact(&mut magic)?;
    if &magic != MAGIC {
        return Err(AccessError::BadMagic {
            expected: String::from_utf8_lossy(MAGIC).to_string(),
            actual: String::from_utf8_lossy(&magic).to_string(),
        });
    }

    let version = read_i32(&mut r)?;
    if version != VERSION {
        return Err(AccessError::VersionMismatch {
            expected: VERSION,
            actual: version,
        });
    }

    let zoom = read_i32(&mut r)? as u8;
    let west = read_i32(&mut r)?;
    let north = read_i32(&mut r)?;
    let width = read_i32(&mut r)? as u32;
    let height = read_i32(&mut r)? as u32;
    let n_iterations = read_i32(&mut r)? as usize;

    let extents = WebMercatorExtents::new(zoom, west, north, width, height);
    let mut grid = AccessGrid::new(extents, n_iterations);

    for y in 0..height {
        for x in 0..width {
            let mut prev = 0i32;
            for iteration in 0..n_iterations {
                let delta = read_i32(&mut r)?;
                let value = prev + delta;
                prev = value;
                grid.set(x, y, iteration, value);
            }
        }
    }

    Ok(grid)
}

/// Write gzip-framed at rest, as streams typically are.
pub fn write_gz<W: Write>(w: W, grid: &AccessGrid) -> AccessResult<()> {
    let mut encoder = GzEncoder::new(w, Compression::default());
    write(&mut encoder, grid)?;
    encoder.finish()?;
    Ok(())
}

/// Read a gzip-framed stream written by [`write_gz`].
pub fn read_gz<R: Read>(r: R) -> AccessResult<AccessGrid> {
    read(GzDecoder::new(r))
}

fn read_i32<R: Read>(r: &mut R) -> AccessResult<i32> {
    let mut buf = [0u8; 4];
    r.read_exact(&mut buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            AccessError::Truncated {
                expected: 4,
                actual: 0,
            }
        } else {
            AccessError::from(e)
        }
    })?;
    Ok(i32::from_le_bytes(buf))
}
