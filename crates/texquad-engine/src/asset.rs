//! Embedded image asset.
//!
//! The quad texture is a fixed RGBA8 pixel buffer baked into the binary: an
//! 8x8 two-tone checkerboard with a red texel marking the top-left corner so
//! orientation is visible on screen.

pub const IMAGE_WIDTH: u32 = 8;
pub const IMAGE_HEIGHT: u32 = 8;

/// Bytes per texel (RGBA8).
pub const IMAGE_BYTES_PER_PIXEL: u32 = 4;

const IMAGE_LEN: usize = (IMAGE_WIDTH * IMAGE_HEIGHT * IMAGE_BYTES_PER_PIXEL) as usize;

const LIGHT: [u8; 4] = [0xf2, 0xf2, 0xf2, 0xff];
const DARK: [u8; 4] = [0x1e, 0x5a, 0x8c, 0xff];
const MARKER: [u8; 4] = [0xd8, 0x2a, 0x2a, 0xff];

/// Row-major, tightly packed pixel data.
pub static IMAGE_DATA: [u8; IMAGE_LEN] = checkerboard();

/// Bytes per image row as expected by texture uploads.
pub const fn bytes_per_row() -> u32 {
    IMAGE_WIDTH * IMAGE_BYTES_PER_PIXEL
}

const fn checkerboard() -> [u8; IMAGE_LEN] {
    let mut data = [0u8; IMAGE_LEN];
    let mut y = 0;
    while y < IMAGE_HEIGHT {
        let mut x = 0;
        while x < IMAGE_WIDTH {
            let texel = if x == 0 && y == 0 {
                MARKER
            } else if (x + y) % 2 == 0 {
                LIGHT
            } else {
                DARK
            };

            let base = ((y * IMAGE_WIDTH + x) * IMAGE_BYTES_PER_PIXEL) as usize;
            let mut c = 0;
            while c < 4 {
                data[base + c] = texel[c];
                c += 1;
            }
            x += 1;
        }
        y += 1;
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texel(x: u32, y: u32) -> [u8; 4] {
        let base = ((y * IMAGE_WIDTH + x) * IMAGE_BYTES_PER_PIXEL) as usize;
        [
            IMAGE_DATA[base],
            IMAGE_DATA[base + 1],
            IMAGE_DATA[base + 2],
            IMAGE_DATA[base + 3],
        ]
    }

    #[test]
    fn buffer_length_matches_dimensions() {
        assert_eq!(IMAGE_DATA.len() as u32, IMAGE_WIDTH * IMAGE_HEIGHT * 4);
        assert_eq!(bytes_per_row(), IMAGE_WIDTH * 4);
    }

    #[test]
    fn every_texel_is_opaque() {
        assert!(IMAGE_DATA.chunks_exact(4).all(|px| px[3] == 0xff));
    }

    #[test]
    fn checker_alternates_and_corner_is_marked() {
        assert_eq!(texel(0, 0), MARKER);
        assert_eq!(texel(1, 0), DARK);
        assert_eq!(texel(1, 1), LIGHT);
        assert_eq!(texel(IMAGE_WIDTH - 1, IMAGE_HEIGHT - 1), LIGHT);
    }
}
