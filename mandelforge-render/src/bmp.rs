use std::io::Write;
use std::path::Path;

use crate::error::RenderError;
use crate::raster::Raster;

const FILE_HEADER_SIZE: i32 = 14;
const INFO_HEADER_SIZE: i32 = 40;
const TOTAL_HEADER_SIZE: i32 = FILE_HEADER_SIZE + INFO_HEADER_SIZE;
const BITS_PER_PIXEL: i16 = 24;

/// Reverse the byte order of an integer's in-memory representation.
///
/// Grounded on the original renderer's generic `byte_swap<T>` template:
/// every multi-byte header field is produced by swapping a native value's
/// bytes rather than hand-writing little-endian constants.
fn byte_swap_i32(v: i32) -> i32 {
    v.swap_bytes()
}

fn byte_swap_i16(v: i16) -> i16 {
    v.swap_bytes()
}

/// Number of zero bytes appended to each row so its length is a multiple
/// of four, per the BMP row-alignment rule.
fn row_padding(width: u32) -> usize {
    ((4 - (width as usize * 3) % 4) % 4) as usize
}

/// Write `raster` to `path` as an uncompressed 24-bpp BMP (§4.9).
///
/// Layout: 14-byte file header, 40-byte `BITMAPINFOHEADER`, then pixel
/// rows in increasing `j` order (row `j=0`, at `ymin`, written first — see
/// [`Raster::rows_by_increasing_j`]), each row BGR triples padded to a
/// multiple of four bytes. All multi-byte header fields are little-endian.
pub fn write(raster: &Raster, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let width = raster.width();
    let height = raster.height();
    let padding = row_padding(width);
    let row_bytes = width as usize * 3 + padding;
    let image_data_size = row_bytes * height as usize;
    let file_size = TOTAL_HEADER_SIZE as usize + image_data_size;

    let mut buf = Vec::with_capacity(file_size);

    // File header.
    buf.extend_from_slice(b"BM");
    buf.extend_from_slice(&to_le_i32(file_size as i32));
    buf.extend_from_slice(&to_le_i32(0)); // reserved
    buf.extend_from_slice(&to_le_i32(TOTAL_HEADER_SIZE));

    // BITMAPINFOHEADER.
    buf.extend_from_slice(&to_le_i32(INFO_HEADER_SIZE));
    buf.extend_from_slice(&to_le_i32(width as i32));
    buf.extend_from_slice(&to_le_i32(height as i32));
    buf.extend_from_slice(&to_le_i16(1)); // color planes
    buf.extend_from_slice(&to_le_i16(BITS_PER_PIXEL));
    buf.extend_from_slice(&to_le_i32(0)); // compression method
    buf.extend_from_slice(&to_le_i32(image_data_size as i32));
    buf.extend_from_slice(&to_le_i32(0)); // horizontal resolution
    buf.extend_from_slice(&to_le_i32(0)); // vertical resolution
    buf.extend_from_slice(&to_le_i32(0)); // palette colors
    buf.extend_from_slice(&to_le_i32(0)); // important colors

    for row in raster.rows_by_increasing_j() {
        let mut written = 0usize;
        for pixel in row {
            buf.push(pixel.b);
            buf.push(pixel.g);
            buf.push(pixel.r);
            written += 3;
        }
        buf.resize(buf.len() + padding, 0);
        debug_assert_eq!(written + padding, row_bytes);
    }

    let mut file = std::fs::File::create(path).map_err(RenderError::Io)?;
    file.write_all(&buf).map_err(RenderError::Io)?;
    Ok(())
}

fn to_le_i32(v: i32) -> [u8; 4] {
    if cfg!(target_endian = "big") {
        byte_swap_i32(v).to_ne_bytes()
    } else {
        v.to_ne_bytes()
    }
}

fn to_le_i16(v: i16) -> [u8; 2] {
    if cfg!(target_endian = "big") {
        byte_swap_i16(v).to_ne_bytes()
    } else {
        v.to_ne_bytes()
    }
}
