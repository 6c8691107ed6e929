//! Monochrome bitmap to PPLA hex graphics.
//!
//! Graphics are downloaded to the printer as ASCII hex. Each pixel row
//! becomes a record
//!
//! ```text
//! 80 <bytes per row:2hex> <byte:2hex> <byte:2hex> ...
//! ```
//!
//! and the block ends with `FFFF`. Bytes pack 8 pixels with the leftmost
//! pixel in the most significant bit, a set bit printing a dot.
//!
//! The firmware does not read the hex digits as plain hexadecimal, so each
//! packed byte goes through [`SUBSTITUTION_TABLE`] before being written.
//! Rows are emitted top to bottom as stored; rotating or mirroring the image
//! to match the feed direction is up to the caller.

/// Pixels with an intensity below this value are printed.
pub const INK_THRESHOLD: u8 = 127;

/// Leading marker of every row record.
pub const ROW_MARKER: &[u8; 2] = b"80";

/// Terminates a raster block.
pub const SENTINEL: &[u8; 4] = b"FFFF";

/// Device code for every packed pixel byte.
///
/// Found by printing test patterns. Low nibbles `0`-`9` pass through, low
/// nibbles `a`-`f` come with the high nibble lowered by two (mod 16).
#[rustfmt::skip]
pub const SUBSTITUTION_TABLE: [u8; 256] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0xEA, 0xEB, 0xEC, 0xED, 0xEE, 0xEF,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0xFA, 0xFB, 0xFC, 0xFD, 0xFE, 0xFF,
    0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x0A, 0x0B, 0x0C, 0x0D, 0x0E, 0x0F,
    0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E, 0x1F,
    0x40, 0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x2A, 0x2B, 0x2C, 0x2D, 0x2E, 0x2F,
    0x50, 0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x3A, 0x3B, 0x3C, 0x3D, 0x3E, 0x3F,
    0x60, 0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F,
    0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x5A, 0x5B, 0x5C, 0x5D, 0x5E, 0x5F,
    0x80, 0x81, 0x82, 0x83, 0x84, 0x85, 0x86, 0x87, 0x88, 0x89, 0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F,
    0x90, 0x91, 0x92, 0x93, 0x94, 0x95, 0x96, 0x97, 0x98, 0x99, 0x7A, 0x7B, 0x7C, 0x7D, 0x7E, 0x7F,
    0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6, 0xA7, 0xA8, 0xA9, 0x8A, 0x8B, 0x8C, 0x8D, 0x8E, 0x8F,
    0xB0, 0xB1, 0xB2, 0xB3, 0xB4, 0xB5, 0xB6, 0xB7, 0xB8, 0xB9, 0x9A, 0x9B, 0x9C, 0x9D, 0x9E, 0x9F,
    0xC0, 0xC1, 0xC2, 0xC3, 0xC4, 0xC5, 0xC6, 0xC7, 0xC8, 0xC9, 0xAA, 0xAB, 0xAC, 0xAD, 0xAE, 0xAF,
    0xD0, 0xD1, 0xD2, 0xD3, 0xD4, 0xD5, 0xD6, 0xD7, 0xD8, 0xD9, 0xBA, 0xBB, 0xBC, 0xBD, 0xBE, 0xBF,
    0xE0, 0xE1, 0xE2, 0xE3, 0xE4, 0xE5, 0xE6, 0xE7, 0xE8, 0xE9, 0xCA, 0xCB, 0xCC, 0xCD, 0xCE, 0xCF,
    0xF0, 0xF1, 0xF2, 0xF3, 0xF4, 0xF5, 0xF6, 0xF7, 0xF8, 0xF9, 0xDA, 0xDB, 0xDC, 0xDD, 0xDE, 0xDF,
];

/// Read-only access to a monochrome image.
pub trait Bitmap {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    /// Intensity of the pixel at `(x, y)`, 0 being black.
    fn pixel(&self, x: u32, y: u32) -> u8;
}

/// Row-major 8 bit intensity buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct MonoBitmap {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl MonoBitmap {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, String> {
        if pixels.len() != (width as usize) * (height as usize) {
            return Err(format!(
                "Pixel buffer holds {} values, expected {} x {}",
                pixels.len(),
                width,
                height
            ));
        }
        Ok(MonoBitmap {
            width,
            height,
            pixels,
        })
    }

    /// Build a bitmap from equally long rows.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, String> {
        let width = rows.first().map(|row| row.len()).unwrap_or(0);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(format!("Row {} has mismatched width", i));
            }
        }
        let pixels = rows.iter().flatten().copied().collect();
        Self::new(width as u32, rows.len() as u32, pixels)
    }
}

impl Bitmap for MonoBitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> u8 {
        self.pixels[y as usize * self.width as usize + x as usize]
    }
}

const HEX_DIGITS: &[u8; 16] = b"0123456789abcdef";

fn push_hex(buf: &mut Vec<u8>, value: u8) {
    buf.push(HEX_DIGITS[(value >> 4) as usize]);
    buf.push(HEX_DIGITS[(value & 0x0F) as usize]);
}

/// Encode a bitmap as a PPLA raster block.
///
/// Only whole bytes are sent, the last `width % 8` pixels of every row are
/// dropped. A bitmap narrower than 8 pixels yields zero-length rows.
///
/// The byte count is meant to fit two hex digits. Rows of 2048 pixels or
/// more get a longer count (`100` for 256 bytes), which the firmware
/// misreads, so keep images below that width.
pub fn transcode<B: Bitmap + ?Sized>(bitmap: &B) -> Vec<u8> {
    let width = bitmap.width();
    let height = bitmap.height();
    let usable_width = width - (width % 8);
    let row_bytes = usable_width / 8;

    let mut result =
        Vec::with_capacity(height as usize * (4 + 2 * row_bytes as usize) + SENTINEL.len());

    for y in 0..height {
        result.extend_from_slice(ROW_MARKER);
        result.extend_from_slice(format!("{:02x}", row_bytes).as_bytes());
        for x in (0..usable_width).step_by(8) {
            let mut byte: u8 = 0x00;
            for i in 0..8 {
                if bitmap.pixel(x + i, y) < INK_THRESHOLD {
                    byte |= 1 << (7 - i);
                }
            }
            push_hex(&mut result, SUBSTITUTION_TABLE[byte as usize]);
        }
    }
    result.extend_from_slice(SENTINEL);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const WHITE: u8 = 255;
    const BLACK: u8 = 0;

    fn row(pattern: &str) -> Vec<u8> {
        pattern
            .chars()
            .map(|c| if c == '#' { BLACK } else { WHITE })
            .collect()
    }

    #[test]
    fn table_is_a_bijection() {
        let mut seen = [false; 256];
        for code in SUBSTITUTION_TABLE.iter() {
            assert!(!seen[*code as usize], "duplicate code {:02x}", code);
            seen[*code as usize] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }

    #[test]
    fn row_length_matches_declared_count() {
        let bitmap = MonoBitmap::from_rows(&[
            row("#.#.#.#.#.#.#.#."),
            row("................"),
            row("################"),
        ])
        .unwrap();
        let block = transcode(&bitmap);

        assert_eq!(block.len(), 3 * (2 + 2 + 2 * 2) + 4);
        for record in block[..block.len() - 4].chunks(8) {
            assert_eq!(&record[..4], b"8002");
        }
        assert_eq!(&block[block.len() - 4..], b"FFFF");
    }

    #[test]
    fn white_row_goes_through_table() {
        let bitmap = MonoBitmap::from_rows(&[row("........")]).unwrap();
        let expected = format!("8001{:02x}FFFF", SUBSTITUTION_TABLE[0x00]);
        assert_eq!(transcode(&bitmap), expected.into_bytes());
    }

    #[test]
    fn ink_bytes_are_substituted() {
        // 0x0A, 0x2A and 0xFF all change on the way out
        let bitmap = MonoBitmap::from_rows(&[row("....#.#...#.#.#.##")]).unwrap();
        assert_eq!(transcode(&bitmap), b"8002ea0aFFFF".to_vec());

        let bitmap = MonoBitmap::from_rows(&[row("########")]).unwrap();
        assert_eq!(transcode(&bitmap), b"8001dfFFFF".to_vec());
    }

    #[test]
    fn first_pixel_is_most_significant_bit() {
        let bitmap = MonoBitmap::from_rows(&[row("#......."), row(".......#")]).unwrap();
        assert_eq!(transcode(&bitmap), b"800180800101FFFF".to_vec());
    }

    #[test]
    fn trailing_pixels_are_dropped() {
        let bitmap = MonoBitmap::from_rows(&[row("........##")]).unwrap();
        assert_eq!(transcode(&bitmap), b"800100FFFF".to_vec());
    }

    #[test]
    fn narrow_bitmap_yields_empty_rows() {
        let bitmap = MonoBitmap::from_rows(&[row("###"), row("###")]).unwrap();
        assert_eq!(transcode(&bitmap), b"80008000FFFF".to_vec());
    }

    #[test]
    fn empty_bitmap_is_just_the_sentinel() {
        let bitmap = MonoBitmap::new(16, 0, Vec::new()).unwrap();
        assert_eq!(transcode(&bitmap), b"FFFF".to_vec());
    }

    #[test]
    fn threshold_separates_ink() {
        let bitmap = MonoBitmap::new(8, 1, vec![126, 127, 128, 0, 255, 255, 255, 255]).unwrap();
        // 0b1001_0000
        assert_eq!(transcode(&bitmap), b"800190FFFF".to_vec());
    }

    #[test]
    fn wide_rows_get_a_longer_count() {
        let bitmap = MonoBitmap::new(2048, 1, vec![WHITE; 2048]).unwrap();
        let block = transcode(&bitmap);

        assert_eq!(&block[..5], b"80100");
        assert_eq!(block.len(), 2 + 3 + 2 * 256 + 4);
        assert_eq!(&block[block.len() - 4..], b"FFFF");

        let bitmap = MonoBitmap::new(2040, 1, vec![WHITE; 2040]).unwrap();
        assert_eq!(&transcode(&bitmap)[..4], b"80ff");
    }

    #[test]
    fn bitmap_size_is_checked() {
        assert!(MonoBitmap::new(8, 2, vec![0; 15]).is_err());
        assert!(MonoBitmap::from_rows(&[vec![0; 8], vec![0; 7]]).is_err());
    }
}
