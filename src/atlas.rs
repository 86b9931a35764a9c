//! Sprite atlas: sheet slicing and nearest-neighbor scaling
//!
//! The sheet is sliced into fixed-size cells, each cell is magnified by an
//! integer factor with plain pixel replication, and the results are uploaded
//! once as immutable textures indexed by tile id.

use std::path::Path;

use image::RgbaImage;
use macroquad::prelude::{FilterMode, Texture2D};

use crate::level::TileId;

/// Sprite size in pixels in the sprite sheet
pub const NATIVE_TILE_SIZE: u32 = 8;
/// Magnification applied to each sheet cell
pub const TILE_SCALE: u32 = 5;
/// (column, row) cell coordinates of the tiles in the sheet
pub const SHEET_CELLS: [(u32, u32); 5] = [(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)];

/// Error type for atlas construction
#[derive(Debug)]
pub enum AtlasError {
    Image(image::ImageError),
    /// A cell rectangle falls outside the sheet
    CellOutOfBounds {
        col: u32,
        row: u32,
        sheet_w: u32,
        sheet_h: u32,
    },
}

impl From<image::ImageError> for AtlasError {
    fn from(e: image::ImageError) -> Self {
        AtlasError::Image(e)
    }
}

impl std::fmt::Display for AtlasError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AtlasError::Image(e) => write!(f, "Image error: {}", e),
            AtlasError::CellOutOfBounds {
                col,
                row,
                sheet_w,
                sheet_h,
            } => write!(
                f,
                "sheet cell ({}, {}) falls outside the {}x{} sheet",
                col, row, sheet_w, sheet_h
            ),
        }
    }
}

/// Extract one sub-image per `(col, row)` cell coordinate.
///
/// Each cell covers the rectangle `(col * size.0, row * size.1, size.0, size.1)`;
/// a cell that leaves the sheet is an error.
pub fn slice_sheet(
    sheet: &RgbaImage,
    cells: &[(u32, u32)],
    cell_size: (u32, u32),
) -> Result<Vec<RgbaImage>, AtlasError> {
    let (sheet_w, sheet_h) = sheet.dimensions();
    let mut frames = Vec::with_capacity(cells.len());
    for &(col, row) in cells {
        let x = col * cell_size.0;
        let y = row * cell_size.1;
        if x + cell_size.0 > sheet_w || y + cell_size.1 > sheet_h {
            return Err(AtlasError::CellOutOfBounds {
                col,
                row,
                sheet_w,
                sheet_h,
            });
        }
        frames.push(image::imageops::crop_imm(sheet, x, y, cell_size.0, cell_size.1).to_image());
    }
    Ok(frames)
}

/// Magnify an image by an integer factor using nearest-neighbor replication.
///
/// Every source pixel becomes a `factor x factor` block of identical color;
/// the output is exactly `factor` times the source in each dimension.
pub fn scale_nearest(src: &RgbaImage, factor: u32) -> RgbaImage {
    let (w, h) = src.dimensions();
    let mut out = RgbaImage::new(w * factor, h * factor);
    for y in 0..h {
        for x in 0..w {
            let pixel = *src.get_pixel(x, y);
            for dy in 0..factor {
                for dx in 0..factor {
                    out.put_pixel(x * factor + dx, y * factor + dy, pixel);
                }
            }
        }
    }
    out
}

/// Pre-sliced, pre-scaled tile images indexed by tile id
pub struct SpriteAtlas {
    tiles: Vec<Texture2D>,
}

impl SpriteAtlas {
    /// Load a sheet from a PNG file, slice the given cells, and scale each
    /// one up for drawing
    pub fn from_sheet_file<P: AsRef<Path>>(
        path: P,
        cells: &[(u32, u32)],
        native_size: u32,
        scale: u32,
    ) -> Result<Self, AtlasError> {
        let sheet = image::open(path)?.to_rgba8();
        let frames = slice_sheet(&sheet, cells, (native_size, native_size))?;

        let tiles = frames
            .iter()
            .map(|frame| {
                let scaled = scale_nearest(frame, scale);
                let texture = Texture2D::from_rgba8(
                    scaled.width() as u16,
                    scaled.height() as u16,
                    scaled.as_raw(),
                );
                texture.set_filter(FilterMode::Nearest);
                texture
            })
            .collect();

        Ok(Self { tiles })
    }

    /// Number of tiles in the atlas
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Texture for a tile id, if the id is within the atlas
    pub fn texture(&self, id: TileId) -> Option<&Texture2D> {
        self.tiles.get(id as usize)
    }
}
