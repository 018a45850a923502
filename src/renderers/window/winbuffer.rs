use rayon::iter::{IndexedParallelIterator, ParallelIterator};
use rayon::slice::ParallelSliceMut;

use crate::core::{Console, Tileset};

/// Pixel buffer in minifb's 0x00RRGGBB layout, sized to console x tile.
pub struct WinBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
}

impl WinBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        WinBuffer {
            width,
            height,
            data: vec![0; width * height],
        }
    }

    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Rasterize every cell: background first, then the glyph's coverage
    /// blended toward the foreground. Chars missing from the tileset draw as
    /// plain background.
    pub fn draw_console(&mut self, console: &Console, tileset: &Tileset) {
        let (tile_w, tile_h) = tileset.tile_size();
        let width = self.width;
        let columns = console.width().min(width / tile_w.max(1));
        let band = width * tile_h;
        if band == 0 {
            return;
        }

        // One band of pixel rows per console row; bands never overlap.
        self.data
            .par_chunks_mut(band)
            .enumerate()
            .take(console.height())
            .for_each(|(cy, pixels)| {
                let cells = console.row(cy);
                for (cx, cell) in cells.iter().take(columns).enumerate() {
                    let tile = tileset.tile_for(cell.ch);
                    for y in 0..tile_h {
                        let start = y * width + cx * tile_w;
                        if start + tile_w > pixels.len() {
                            break;
                        }
                        let line = &mut pixels[start..start + tile_w];
                        for (x, px) in line.iter_mut().enumerate() {
                            let alpha = tile.map_or(0, |t| t.coverage_at(x, y));
                            *px = cell.bg.blend(&cell.fg, alpha).to_u32();
                        }
                    }
                }
            });
    }
}
