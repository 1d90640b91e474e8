use std::ops::Range;

use crate::render::shapes::circle::{CircleInstance, CircleRenderer};
use crate::render::shapes::line::{LineInstance, LineRenderer};
use crate::render::shapes::text::{GlyphInstance, TextRenderer};
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::FontSystem;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum BatchKind {
    Circle,
    Line,
    Text,
}

/// Run of consecutive same-kind draw items, as indices into that kind's upload.
#[derive(Debug, Clone, Eq, PartialEq)]
struct Batch {
    kind: BatchKind,
    instances: Range<u32>,
}

/// Appends `start..end` of `kind`, merging with the previous batch when possible.
fn push_batch(batches: &mut Vec<Batch>, kind: BatchKind, start: usize, end: usize) {
    if start >= end {
        return;
    }
    let (start, end) = (start as u32, end as u32);
    if let Some(last) = batches.last_mut() {
        if last.kind == kind && last.instances.end == start {
            last.instances.end = end;
            return;
        }
    }
    batches.push(Batch { kind, instances: start..end });
}

/// Renders a whole `DrawList` in paint order.
///
/// Each shape kind is uploaded once per frame; the render pass then switches
/// pipelines per batch, so a circle recorded after a line is drawn on top of it.
#[derive(Default)]
pub struct SceneRenderer {
    circles: CircleRenderer,
    lines: LineRenderer,
    text: TextRenderer,

    // per-frame scratch, kept for its capacity
    circle_instances: Vec<CircleInstance>,
    line_instances: Vec<LineInstance>,
    glyph_instances: Vec<GlyphInstance>,
    batches: Vec<Batch>,
}

impl SceneRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        self.circle_instances.clear();
        self.line_instances.clear();
        self.glyph_instances.clear();
        self.batches.clear();

        for item in draw_list.iter_in_paint_order() {
            match &item.cmd {
                DrawCmd::Circle(cmd) => {
                    if let Some(inst) = CircleInstance::from_cmd(cmd) {
                        let start = self.circle_instances.len();
                        self.circle_instances.push(inst);
                        push_batch(&mut self.batches, BatchKind::Circle, start, start + 1);
                    }
                }
                DrawCmd::Line(cmd) => {
                    if let Some(inst) = LineInstance::from_cmd(cmd) {
                        let start = self.line_instances.len();
                        self.line_instances.push(inst);
                        push_batch(&mut self.batches, BatchKind::Line, start, start + 1);
                    }
                }
                DrawCmd::Text(cmd) => {
                    let start = self.glyph_instances.len();
                    self.text.layout_cmd(ctx, cmd, fonts, &mut self.glyph_instances);
                    let end = self.glyph_instances.len();
                    push_batch(&mut self.batches, BatchKind::Text, start, end);
                }
            }
        }

        if self.batches.is_empty() {
            return;
        }

        let circles_ready = self.circles.prepare(ctx, &self.circle_instances);
        let lines_ready = self.lines.prepare(ctx, &self.line_instances);
        let text_ready = self.text.prepare(ctx, &self.glyph_instances);

        log::trace!(
            "scene: {} batch(es), {} circle(s), {} line(s), {} glyph(s)",
            self.batches.len(),
            self.circle_instances.len(),
            self.line_instances.len(),
            self.glyph_instances.len(),
        );

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("someclock scene pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        for batch in &self.batches {
            let range = batch.instances.clone();
            match batch.kind {
                BatchKind::Circle if circles_ready => self.circles.draw(&mut rpass, range),
                BatchKind::Line if lines_ready => self.lines.draw(&mut rpass, range),
                BatchKind::Text if text_ready => self.text.draw(&mut rpass, range),
                _ => {}
            }
        }
    }
}
