use image::RgbaImage;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// File name of the default tilesheet inside the data directory.
pub const DEFAULT_TILESHEET: &str = "dejavu16x16_gs_tc.png";
/// Glyph grid of the default tilesheet: 32 columns, 8 rows.
pub const DEFAULT_LAYOUT: (usize, usize) = (32, 8);

const TCOD_ROWS: [[u32; 32]; 5] = [
    [
        0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29, 0x2A, 0x2B, 0x2C, 0x2D, 0x2E,
        0x2F, 0x30, 0x31, 0x32, 0x33, 0x34, 0x35, 0x36, 0x37, 0x38, 0x39, 0x3A, 0x3B, 0x3C, 0x3D,
        0x3E, 0x3F,
    ],
    [
        0x40, 0x5B, 0x5C, 0x5D, 0x5E, 0x5F, 0x60, 0x7B, 0x7C, 0x7D, 0x7E, 0x2591, 0x2592, 0x2593,
        0x2502, 0x2500, 0x253C, 0x2524, 0x2534, 0x251C, 0x252C, 0x2514, 0x250C, 0x2510, 0x2518,
        0x2598, 0x259D, 0x2580, 0x2596, 0x259A, 0x2590, 0x2597,
    ],
    [
        0x2191, 0x2193, 0x2190, 0x2192, 0x25B2, 0x25BC, 0x25C4, 0x25BA, 0x2195, 0x2194, 0x2610,
        0x2611, 0x25CB, 0x25C9, 0x2551, 0x2550, 0x256C, 0x2563, 0x2569, 0x2560, 0x2566, 0x255A,
        0x2554, 0x2557, 0x255D, 0, 0, 0, 0, 0, 0, 0,
    ],
    [
        0x41, 0x42, 0x43, 0x44, 0x45, 0x46, 0x47, 0x48, 0x49, 0x4A, 0x4B, 0x4C, 0x4D, 0x4E, 0x4F,
        0x50, 0x51, 0x52, 0x53, 0x54, 0x55, 0x56, 0x57, 0x58, 0x59, 0x5A, 0, 0, 0, 0, 0, 0,
    ],
    [
        0x61, 0x62, 0x63, 0x64, 0x65, 0x66, 0x67, 0x68, 0x69, 0x6A, 0x6B, 0x6C, 0x6D, 0x6E, 0x6F,
        0x70, 0x71, 0x72, 0x73, 0x74, 0x75, 0x76, 0x77, 0x78, 0x79, 0x7A, 0, 0, 0, 0, 0, 0,
    ],
];

const fn build_tcod_charmap() -> [u32; 256] {
    let mut out = [0u32; 256];
    let mut row = 0;
    while row < TCOD_ROWS.len() {
        let mut col = 0;
        while col < 32 {
            out[row * 32 + col] = TCOD_ROWS[row][col];
            col += 1;
        }
        row += 1;
    }
    out
}

/// The TCOD tilesheet layout: tile index to Unicode codepoint. Zero marks an
/// unused slot.
pub const CHARMAP_TCOD: [u32; 256] = build_tcod_charmap();

/// A single glyph as an 8-bit coverage mask, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tile {
    pub width: usize,
    pub height: usize,
    pub coverage: Vec<u8>,
}

impl Tile {
    #[inline]
    pub fn coverage_at(&self, x: usize, y: usize) -> u8 {
        self.coverage[x + y * self.width]
    }
}

#[derive(Debug, Clone)]
pub struct Tileset {
    tile_width: usize,
    tile_height: usize,
    tiles: Vec<Tile>,
    charmap: HashMap<char, usize>,
    pub path: PathBuf,
}

impl Tileset {
    /// Load a tilesheet laid out as `columns x rows` equally sized glyphs, with
    /// `charmap[i]` naming the codepoint drawn by tile `i`.
    pub fn load_tilesheet(path: &Path, layout: (usize, usize), charmap: &[u32]) -> Result<Self> {
        let img = image::open(path).map_err(|e| {
            log::error!("Failed to load tilesheet '{}': {}", path.display(), e);
            Error::ResourceNotFound {
                what: format!("a readable tilesheet ({e})"),
                path: path.to_path_buf(),
            }
        })?;

        let mut tileset = Self::from_image(&img.to_rgba8(), layout, charmap).ok_or_else(|| {
            Error::ResourceNotFound {
                what: format!("a tilesheet divisible into {}x{} tiles", layout.0, layout.1),
                path: path.to_path_buf(),
            }
        })?;
        tileset.path = path.to_path_buf();

        log::info!(
            "Loaded tilesheet {} ({} tiles of {}x{})",
            path.display(),
            tileset.tile_count(),
            tileset.tile_width,
            tileset.tile_height
        );
        Ok(tileset)
    }

    /// Slice an already decoded image. Returns `None` if the image does not
    /// divide evenly into the requested layout.
    pub fn from_image(img: &RgbaImage, layout: (usize, usize), charmap: &[u32]) -> Option<Self> {
        let (columns, rows) = layout;
        let (width, height) = (img.width() as usize, img.height() as usize);
        if columns == 0 || rows == 0 || width % columns != 0 || height % rows != 0 {
            return None;
        }
        let tile_width = width / columns;
        let tile_height = height / rows;
        if tile_width == 0 || tile_height == 0 {
            return None;
        }

        let mut tiles = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for col in 0..columns {
                let mut coverage = Vec::with_capacity(tile_width * tile_height);
                for y in 0..tile_height {
                    for x in 0..tile_width {
                        let px = img.get_pixel((col * tile_width + x) as u32, (row * tile_height + y) as u32);
                        coverage.push(pixel_coverage(px.0));
                    }
                }
                tiles.push(Tile {
                    width: tile_width,
                    height: tile_height,
                    coverage,
                });
            }
        }

        let mut lookup = HashMap::new();
        for (index, &codepoint) in charmap.iter().enumerate().take(tiles.len()) {
            if codepoint == 0 {
                continue;
            }
            if let Some(ch) = char::from_u32(codepoint) {
                lookup.entry(ch).or_insert(index);
            }
        }

        Some(Tileset {
            tile_width,
            tile_height,
            tiles,
            charmap: lookup,
            path: PathBuf::new(),
        })
    }

    pub fn tile_size(&self) -> (usize, usize) {
        (self.tile_width, self.tile_height)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn tile_for(&self, ch: char) -> Option<&Tile> {
        self.charmap.get(&ch).map(|&i| &self.tiles[i])
    }
}

/// Greyscale sheets carry the glyph in luminance, alpha sheets in alpha. The
/// product covers both.
fn pixel_coverage([r, g, b, a]: [u8; 4]) -> u8 {
    let luminance = (r as u32 + g as u32 + b as u32) / 3;
    ((luminance * a as u32 + 127) / 255) as u8
}
