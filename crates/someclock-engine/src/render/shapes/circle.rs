use std::ops::Range;

use bytemuck::{Pod, Zeroable};

use crate::render::RenderCtx;
use crate::scene::shapes::CircleCmd;

use super::common::{QuadPipeline, QuadPipelineDesc};

/// Renderer for `DrawCmd::Circle`.
///
/// Fill and stroke are resolved per pixel from the distance to the center, so
/// both edges are anti-aliased.
pub struct CircleRenderer {
    pipeline: QuadPipeline,
}

impl Default for CircleRenderer {
    fn default() -> Self {
        Self {
            pipeline: QuadPipeline::new(QuadPipelineDesc {
                label: "someclock circle",
                shader: include_str!("shaders/circle.wgsl"),
                instance_layout: CircleInstance::layout,
                instance_size: std::mem::size_of::<CircleInstance>(),
                textured: false,
            }),
        }
    }
}

impl CircleRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prepare(&mut self, ctx: &RenderCtx<'_>, instances: &[CircleInstance]) -> bool {
        self.pipeline.prepare(ctx, instances)
    }

    pub fn draw(&self, rpass: &mut wgpu::RenderPass<'_>, range: Range<u32>) {
        self.pipeline.draw(rpass, range, None);
    }
}

// ── GPU types ─────────────────────────────────────────────────────────────

/// Instance data layout (48 bytes):
///
///  offset  0  center         [f32; 2]   loc 1
///  offset  8  radius_stroke  [f32; 2]   loc 2  (.x = radius, .y = stroke width)
///  offset 16  fill           [f32; 4]   loc 3
///  offset 32  stroke         [f32; 4]   loc 4
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct CircleInstance {
    center: [f32; 2],
    radius_stroke: [f32; 2],
    fill: [f32; 4],
    stroke: [f32; 4],
}

impl CircleInstance {
    const ATTRS: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        1 => Float32x2, // center
        2 => Float32x2, // radius_stroke
        3 => Float32x4, // fill
        4 => Float32x4  // stroke
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<CircleInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }

    /// Converts a command into GPU form; `None` when it would paint nothing.
    pub fn from_cmd(cmd: &CircleCmd) -> Option<Self> {
        if !(cmd.radius > 0.0) || !cmd.center.is_finite() {
            return None;
        }

        let fill = cmd.fill.map_or([0.0; 4], |c| c.to_array());
        let (stroke_width, stroke) = match cmd.stroke {
            Some(s) if s.width > 0.0 => (s.width, s.color.to_array()),
            _ => (0.0, [0.0; 4]),
        };
        if fill[3] <= 0.0 && stroke[3] <= 0.0 {
            return None;
        }

        Some(Self {
            center: [cmd.center.x, cmd.center.y],
            radius_stroke: [cmd.radius, stroke_width],
            fill,
            stroke,
        })
    }
}
