use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::LineCmd;

use super::common::{QuadPipeline, QuadPipelineDesc};

/// Renderer for `DrawCmd::Line`.
///
/// Each segment is an oriented quad padded by one pixel on every side; the
/// fragment shader computes coverage against the butt-capped segment.
pub struct LineRenderer {
    pipeline: QuadPipeline,
}

impl Default for LineRenderer {
    fn default() -> Self {
        Self {
            pipeline: QuadPipeline::new(QuadPipelineDesc {
                label: "someclock line",
                shader: include_str!("shaders/line.wgsl"),
                instance_layout: LineInstance::layout,
                instance_size: std::mem::size_of::<LineInstance>(),
                textured: false,
            }),
        }
    }
}

impl LineRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[LineInstance]) -> bool {
        self.pipeline.prepare(ctx, instances)
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        self.pipeline.draw(rpass, range, None);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (40 bytes):
///
///  offset  0  endpoints  [f32; 4]   loc 1  (.xy = from, .zw = to)
///  offset 16  width      [f32; 2]   loc 2  (.x = stroke width, .y unused)
///  offset 24  color      [f32; 4]   loc 3
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct LineInstance {
    endpoints: [f32; 4],
    width: [f32; 2],
    color: [f32; 4],
}

impl LineInstance {
    const ATTRS: [wgpu::VertexAttribute; 3] = wgpu::vertex_attr_array![
        1 => Float32x4, // endpoints
        2 => Float32x2, // width
        3 => Float32x4  // color
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<LineInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Converts a command into GPU form; `None` for degenerate segments.
    pub fn from_cmd(cmd: &LineCmd) -> Option<Self> {
        let len = (cmd.to - cmd.from).length();
        if !(len > f32::EPSILON) || !(cmd.stroke.width > 0.0) || cmd.stroke.color.a <= 0.0 {
            return None;
        }
        Some(Self {
            endpoints: [cmd.from.x, cmd.from.y, cmd.to.x, cmd.to.y],
            width: [cmd.stroke.width, 0.0],
            color: cmd.stroke.color.to_array(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::Vec2;
    use crate::paint::Color;
    use crate::scene::Stroke;

    fn line(from: Vec2, to: Vec2, width: f32) -> LineCmd {
        LineCmd { from, to, stroke: Stroke::new(width, Color::rgb_hex(0xEF4444)) }
    }

    #[test]
    fn instance_is_40_bytes() {
        assert_eq!(std::mem::size_of::<LineInstance>(), 40);
    }

    #[test]
    fn segment_endpoints_are_packed() {
        let inst = LineInstance::from_cmd(&line(Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0), 2.0)).unwrap();
        assert_eq!(inst.endpoints, [1.0, 2.0, 3.0, 4.0]);
        assert_eq!(inst.width[0], 2.0);
    }

    #[test]
    fn zero_length_segment_is_dropped() {
        let p = Vec2::new(10.0, 10.0);
        assert!(LineInstance::from_cmd(&line(p, p, 2.0)).is_none());
    }

    #[test]
    fn zero_width_segment_is_dropped() {
        assert!(LineInstance::from_cmd(&line(Vec2::zero(), Vec2::new(5.0, 0.0), 0.0)).is_none());
    }
}
