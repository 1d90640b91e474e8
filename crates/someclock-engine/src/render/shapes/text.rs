use std::collections::HashMap;
use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout, LayoutSettings, TextStyle};

use crate::render::RenderCtx;
use crate::scene::shapes::TextCmd;
use crate::text::FontSystem;

use super::common::{QuadPipeline, QuadPipelineDesc};

const ATLAS_SIZE: u32 = 1024;
const GLYPH_PADDING: u32 = 1; // pixels between glyphs in the atlas

// ── atlas packing ─────────────────────────────────────────────────────────

/// Shelf allocator for the glyph atlas.
///
/// Glyphs are placed left to right; a new shelf starts below the tallest glyph
/// of the current one. Space is never reclaimed.
#[derive(Debug)]
pub(crate) struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
    full: bool,
}

impl ShelfPacker {
    pub(crate) fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_PADDING,
            cursor_y: GLYPH_PADDING,
            row_height: 0,
            full: false,
        }
    }

    /// Reserves a `w × h` cell and returns its top-left corner.
    pub(crate) fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if self.full || w + 2 * GLYPH_PADDING > self.size {
            return None;
        }

        if self.cursor_x + w + GLYPH_PADDING > self.size {
            self.cursor_y += self.row_height + GLYPH_PADDING;
            self.cursor_x = GLYPH_PADDING;
            self.row_height = 0;
        }

        if self.cursor_y + h + GLYPH_PADDING > self.size {
            self.full = true;
            return None;
        }

        let at = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_PADDING;
        self.row_height = self.row_height.max(h);
        Some(at)
    }

    pub(crate) fn is_full(&self) -> bool {
        self.full
    }
}

// ── renderer ──────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone)]
struct CachedGlyph {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

/// Renderer for `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue at the window's scale factor on first use
/// and cached in a single R8 atlas for the renderer's lifetime. The cache key
/// (`GlyphRasterConfig`) already encodes font, glyph and pixel size.
pub struct TextRenderer {
    pipeline: QuadPipeline,

    atlas_texture: Option<wgpu::Texture>,
    atlas_view: Option<wgpu::TextureView>,
    sampler: Option<wgpu::Sampler>,
    atlas_group: Option<wgpu::BindGroup>,
    packer: ShelfPacker,

    glyph_cache: HashMap<GlyphRasterConfig, CachedGlyph>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline: QuadPipeline::new(QuadPipelineDesc {
                label: "someclock text",
                shader: include_str!("shaders/text.wgsl"),
                instance_layout: GlyphInstance::layout,
                instance_size: std::mem::size_of::<GlyphInstance>(),
                textured: true,
            }),
            atlas_texture: None,
            atlas_view: None,
            sampler: None,
            atlas_group: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            glyph_cache: HashMap::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lays out `cmd` and appends one instance per visible glyph to `out`.
    ///
    /// Glyphs missing from the atlas are rasterized and uploaded here.
    pub fn layout_cmd(
        &mut self,
        ctx: &RenderCtx<'_>,
        cmd: &TextCmd,
        fonts: &FontSystem,
        out: &mut Vec<GlyphInstance>,
    ) {
        let Some(font) = fonts.get(cmd.font) else {
            log::warn!("TextRenderer: unknown {:?}, skipping", cmd.font);
            return;
        };
        self.ensure_atlas(ctx);

        let scale = ctx.scale_factor.max(0.1);
        let color = cmd.color.to_array();

        self.layout.reset(&LayoutSettings {
            x: cmd.origin.x * scale,
            y: cmd.origin.y * scale,
            ..LayoutSettings::default()
        });
        self.layout.append(&[font], &TextStyle::new(&cmd.text, cmd.size * scale, 0));

        // Copy positions out so the layout borrow ends before atlas uploads.
        let glyphs: Vec<(GlyphRasterConfig, f32, f32, usize, usize)> = self
            .layout
            .glyphs()
            .iter()
            .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
            .map(|g| (g.key, g.x, g.y, g.width, g.height))
            .collect();

        for (key, x, y, w, h) in glyphs {
            let cached = match self.glyph_cache.get(&key) {
                Some(cached) => *cached,
                None => {
                    let (metrics, bitmap) = font.rasterize_config(key);
                    let Some(cached) =
                        self.upload_glyph(ctx, &bitmap, metrics.width as u32, metrics.height as u32)
                    else {
                        continue;
                    };
                    self.glyph_cache.insert(key, cached);
                    cached
                }
            };

            out.push(GlyphInstance {
                dst_min: [x / scale, y / scale],
                dst_max: [(x + w as f32) / scale, (y + h as f32) / scale],
                uv_min: cached.uv_min,
                uv_max: cached.uv_max,
                color,
            });
        }
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[GlyphInstance]) -> bool {
        if !self.pipeline.prepare(ctx, instances) {
            return false;
        }
        self.ensure_atlas_group(ctx);
        self.atlas_group.is_some()
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        self.pipeline.draw(rpass, range, self.atlas_group.as_ref());
    }

    // ── atlas helpers ──────────────────────────────────────────────────────

    fn upload_glyph(
        &mut self,
        ctx: &RenderCtx<'_>,
        bitmap: &[u8],
        w: u32,
        h: u32,
    ) -> Option<CachedGlyph> {
        if w == 0 || h == 0 {
            return None;
        }
        let was_full = self.packer.is_full();
        let Some((gx, gy)) = self.packer.place(w, h) else {
            if !was_full && self.packer.is_full() {
                log::warn!(
                    "TextRenderer: glyph atlas is full ({ATLAS_SIZE}x{ATLAS_SIZE}); \
                     new glyphs will not be rendered"
                );
            }
            return None;
        };

        let atlas = self.atlas_texture.as_ref()?;
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: atlas,
                mip_level: 0,
                origin: wgpu::Origin3d { x: gx, y: gy, z: 0 },
                aspect: wgpu::TextureAspect::All,
            },
            bitmap,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(w),
                rows_per_image: Some(h),
            },
            wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
        );

        let atlas_f = ATLAS_SIZE as f32;
        Some(CachedGlyph {
            uv_min: [gx as f32 / atlas_f, gy as f32 / atlas_f],
            uv_max: [(gx + w) as f32 / atlas_f, (gy + h) as f32 / atlas_f],
        })
    }

    fn ensure_atlas(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_texture.is_some() {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("someclock text atlas"),
            size: wgpu::Extent3d {
                width: ATLAS_SIZE,
                height: ATLAS_SIZE,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::R8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        self.atlas_view = Some(texture.create_view(&wgpu::TextureViewDescriptor::default()));
        self.atlas_texture = Some(texture);
        self.sampler = Some(ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("someclock text sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        }));
        self.atlas_group = None;
    }

    fn ensure_atlas_group(&mut self, ctx: &RenderCtx<'_>) {
        if self.atlas_group.is_some() {
            return;
        }
        let Some(layout)  = self.pipeline.texture_layout() else { return };
        let Some(view)    = self.atlas_view.as_ref()       else { return };
        let Some(sampler) = self.sampler.as_ref()          else { return };

        self.atlas_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("someclock text atlas group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        }));
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  dst_min  [f32; 2]   loc 1
///  offset  8  dst_max  [f32; 2]   loc 2
///  offset 16  uv_min   [f32; 2]   loc 3
///  offset 24  uv_max   [f32; 2]   loc 4
///  offset 32  color    [f32; 4]   loc 5
#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
pub struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min:  [f32; 2],
    uv_max:  [f32; 2],
    color:   [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2, // dst_min
        2 => Float32x2, // dst_max
        3 => Float32x2, // uv_min
        4 => Float32x2, // uv_max
        5 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_a_shelf_left_to_right() {
        let mut p = ShelfPacker::new(64);
        assert_eq!(p.place(10, 12), Some((1, 1)));
        assert_eq!(p.place(10, 8), Some((12, 1)));
    }

    #[test]
    fn packer_starts_new_shelf_below_tallest_glyph() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(20, 12), Some((1, 1)));
        assert_eq!(p.place(8, 4), Some((22, 1)));
        // 31 + 8 + 1 > 32: wraps under the 12 px row.
        assert_eq!(p.place(8, 4), Some((1, 14)));
    }

    #[test]
    fn packer_reports_full_once_out_of_rows() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(14, 14).is_some());
        assert!(p.place(14, 14).is_none());
        assert!(p.is_full());
        assert!(p.place(1, 1).is_none());
    }

    #[test]
    fn packer_rejects_glyph_wider_than_atlas() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(15, 2).is_none());
        assert!(!p.is_full());
    }

    #[test]
    fn glyph_instance_is_48_bytes() {
        assert_eq!(std::mem::size_of::<GlyphInstance>(), 48);
    }
}
