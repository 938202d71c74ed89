//! WebGPU rendering: solid shapes, textured sprites, glyph atlas text

pub mod pipeline;
pub mod shapes;
pub mod text;
pub mod texture;
pub mod vertex;

pub use pipeline::{DrawBatch, RenderState};
pub use text::{GlyphAtlas, GlyphInfo};
pub use texture::GpuTexture;
pub use vertex::{TexVertex, Vertex, colors};
