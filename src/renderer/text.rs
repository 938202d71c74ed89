//! Glyph atlas text rendering
//!
//! Rasterizes printable ASCII once at startup with `fontdue` into a single
//! RGBA atlas (white, coverage in alpha), then lays text out as textured
//! quads against that atlas.

use std::collections::HashMap;

use fontdue::Font;
use glam::Vec2;
use image::{Rgba, RgbaImage};

use super::shapes::textured_quad;
use super::vertex::TexVertex;

/// Glyphs per atlas row
const ATLAS_COLS: usize = 12;

/// Placement and UV metadata for a single glyph
#[derive(Debug, Clone)]
pub struct GlyphInfo {
    /// UV coordinates in the atlas (normalized), top-left corner
    pub uv_min: Vec2,
    /// UV coordinates in the atlas (normalized), bottom-right corner
    pub uv_max: Vec2,
    /// Glyph bitmap size in pixels
    pub size: Vec2,
    /// Offset from the pen position (on the baseline) to the glyph's
    /// top-left corner, in y-down screen coordinates
    pub offset: Vec2,
    /// Horizontal advance for cursor positioning
    pub advance: f32,
}

/// Font atlas holding the CPU-side image and per-glyph metadata
pub struct GlyphAtlas {
    pub image: RgbaImage,
    glyphs: HashMap<char, GlyphInfo>,
    /// Pixel size the atlas was rasterized at
    pub px: f32,
}

impl GlyphAtlas {
    /// Rasterize printable ASCII at the given pixel size
    pub fn new(font: &Font, px: f32) -> Self {
        let rasterized: Vec<(char, fontdue::Metrics, Vec<u8>)> = (32u8..=126)
            .map(|byte| {
                let c = byte as char;
                let (metrics, bitmap) = font.rasterize(c, px);
                (c, metrics, bitmap)
            })
            .collect();

        // Uniform grid cells sized to the largest glyph, 1px padding
        let cell_w = rasterized.iter().map(|(_, m, _)| m.width).max().unwrap_or(1) + 2;
        let cell_h = rasterized.iter().map(|(_, m, _)| m.height).max().unwrap_or(1) + 2;
        let rows = rasterized.len().div_ceil(ATLAS_COLS);
        let atlas_w = (ATLAS_COLS * cell_w) as u32;
        let atlas_h = (rows * cell_h) as u32;

        let mut image = RgbaImage::new(atlas_w, atlas_h);
        let mut glyphs = HashMap::new();

        for (i, (c, metrics, bitmap)) in rasterized.iter().enumerate() {
            let cx = (i % ATLAS_COLS) * cell_w + 1;
            let cy = (i / ATLAS_COLS) * cell_h + 1;

            for y in 0..metrics.height {
                for x in 0..metrics.width {
                    let coverage = bitmap[y * metrics.width + x];
                    image.put_pixel(
                        (cx + x) as u32,
                        (cy + y) as u32,
                        Rgba([255, 255, 255, coverage]),
                    );
                }
            }

            glyphs.insert(
                *c,
                GlyphInfo {
                    uv_min: Vec2::new(cx as f32 / atlas_w as f32, cy as f32 / atlas_h as f32),
                    uv_max: Vec2::new(
                        (cx + metrics.width) as f32 / atlas_w as f32,
                        (cy + metrics.height) as f32 / atlas_h as f32,
                    ),
                    size: Vec2::new(metrics.width as f32, metrics.height as f32),
                    offset: Vec2::new(
                        metrics.xmin as f32,
                        -(metrics.height as f32 + metrics.ymin as f32),
                    ),
                    advance: metrics.advance_width,
                },
            );
        }

        Self { image, glyphs, px }
    }

    pub fn glyph(&self, c: char) -> Option<&GlyphInfo> {
        self.glyphs.get(&c)
    }

    /// Lay out a line of text as textured quads. `origin` is the start of
    /// the baseline; `scale` 1.0 renders at the atlas pixel size. Characters
    /// missing from the atlas are skipped.
    pub fn layout(&self, text: &str, origin: Vec2, scale: f32, color: [f32; 4]) -> Vec<TexVertex> {
        let mut vertices = Vec::new();
        let mut pen_x = origin.x;

        for c in text.chars() {
            let Some(glyph) = self.glyphs.get(&c) else {
                continue;
            };
            if glyph.size.x > 0.0 && glyph.size.y > 0.0 {
                let pos = Vec2::new(pen_x, origin.y) + glyph.offset * scale;
                vertices.extend(textured_quad(
                    pos,
                    glyph.size * scale,
                    glyph.uv_min,
                    glyph.uv_max,
                    color,
                ));
            }
            pen_x += glyph.advance * scale;
        }

        vertices
    }

    /// Width of a laid-out line in pixels
    pub fn measure(&self, text: &str, scale: f32) -> f32 {
        text.chars()
            .filter_map(|c| self.glyphs.get(&c))
            .map(|g| g.advance * scale)
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_atlas() -> GlyphAtlas {
        let mut glyphs = HashMap::new();
        glyphs.insert(
            'A',
            GlyphInfo {
                uv_min: Vec2::ZERO,
                uv_max: Vec2::new(0.5, 1.0),
                size: Vec2::new(8.0, 10.0),
                offset: Vec2::new(0.0, -10.0),
                advance: 10.0,
            },
        );
        glyphs.insert(
            'B',
            GlyphInfo {
                uv_min: Vec2::new(0.5, 0.0),
                uv_max: Vec2::ONE,
                size: Vec2::new(8.0, 10.0),
                offset: Vec2::new(1.0, -10.0),
                advance: 12.0,
            },
        );
        GlyphAtlas {
            image: RgbaImage::new(4, 4),
            glyphs,
            px: 10.0,
        }
    }

    #[test]
    fn test_layout_advances_monotonically() {
        let atlas = test_atlas();
        let verts = atlas.layout("AB", Vec2::new(5.0, 20.0), 1.0, [1.0; 4]);
        assert_eq!(verts.len(), 12);
        // Second glyph starts to the right of the first
        assert!(verts[6].position[0] > verts[0].position[0]);
        assert_eq!(verts[6].position[0], 5.0 + 10.0 + 1.0);
    }

    #[test]
    fn test_measure_sums_advances() {
        let atlas = test_atlas();
        assert_eq!(atlas.measure("AB", 1.0), 22.0);
        assert_eq!(atlas.measure("AB", 0.5), 11.0);
    }

    #[test]
    fn test_layout_skips_unknown_chars() {
        let atlas = test_atlas();
        let verts = atlas.layout("A?B", Vec2::ZERO, 1.0, [1.0; 4]);
        assert_eq!(verts.len(), 12);
    }

    #[test]
    fn test_scale_shrinks_quads() {
        let atlas = test_atlas();
        let full = atlas.layout("A", Vec2::new(0.0, 20.0), 1.0, [1.0; 4]);
        let half = atlas.layout("A", Vec2::new(0.0, 20.0), 0.5, [1.0; 4]);
        let width_full = full[1].position[0] - full[0].position[0];
        let width_half = half[1].position[0] - half[0].position[0];
        assert!((width_half - width_full / 2.0).abs() < 1e-4);
    }
}
