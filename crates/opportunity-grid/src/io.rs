//! Bit-exact little-endian binary format for opportunity grids.
//!
//! Layout:
//!   magic:   8 bytes, ASCII "OPPGRID\0"
//!   version: i32
//!   header:  6 x i32 — zoom, west, north, width, height, reserved (0)
//!   body:    width*height x i32, row-major (x inner, y outer), delta-coded
//!            against the previous value in iteration order (first value
//!            delta-coded against 0). Densities are rounded to the nearest
//!            integer (half away from zero) before delta-coding; fractional
//!            opportunity mass below 0.5 at a single pixel is lost by design,
//!            the same way the access-grid format trades fractional seconds
//!            for compactness.
use std::io::{Read, Write};

use access_common::{round_half_away_from_zero, AccessError, AccessResult, WebMercatorExtents};

use crate::grid::Grid;

const MAGIC: &[u8; 8] = b"OPPGRID\0";
const VERSION: i32 = 1;

pub fn write<W: Write>(mut w: W, grid: &Grid) -> AccessResult<()> {
    w.write_all(MAGIC)?;
    w.write_all(&VERSION.to_le_bytes())?;

    let e = &grid.extents;
    for field in [
        e.zoom as i32,
        e.west,
        e.north,
        e.width as i32,
        e.height as i32,
        0,
    ] {
        w.write_all(&field.to_le_bytes())?;
    }

    let mut prev: i64 = 0;
    for i in 0..e.len() {
        let value = round_half_away_from_zero(grid.opportunities(i));
        let delta = value - prev;
        prev = value;
        let delta_i32 = i32::try_from(delta).map_err(|_| {
            AccessError::InvariantViolation(format!("delta {delta} overflows i32"))
        })?;
        w.write_all(&delta_i32.to_le_bytes())?;
    }

    Ok(())
}

pub fn read<R: Read>(mut r: R) -> AccessResult<Grid> {
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

    let zoom = read_i32(&mut r)?;
    let west = read_i32(&mut r)?;
    let north = read_i32(&mut r)?;
    let width = read_i32(&mut r)?;
    let height = read_i32(&mut r)?;
    let _reserved = read_i32(&mut r)?;

    let zoom = u8::try_from(zoom)
        .map_err(|_| AccessError::InvariantViolation(format!("zoom {zoom} out of range")))?;
    let extents = WebMercatorExtents::new(zoom, west, north, width as u32, height as u32);
    let mut grid = Grid::new(extents);

    let mut prev: i64 = 0;
    for i in 0..extents.len() {
        let delta = read_i32(&mut r)? as i64;
        let value = prev + delta;
        prev = value;
        grid.density_mut()[i] = value as f64;
    }

    Ok(grid)
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
