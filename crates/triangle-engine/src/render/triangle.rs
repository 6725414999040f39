use crate::render::{RenderCtx, RenderTarget};

/// Draws the fixed red/green/blue triangle.
///
/// Vertex positions and colors live in the shader and are selected by vertex
/// index, so the pipeline has no vertex buffers and no bind groups.
pub struct TriangleRenderer {
    pipeline: wgpu::RenderPipeline,
    pipeline_format: wgpu::TextureFormat,
}

impl TriangleRenderer {
    pub const VERTEX_COUNT: u32 = 3;

    /// Compiles the shader and builds the pipeline for `ctx.target_format`.
    pub fn new(ctx: &RenderCtx<'_>) -> Self {
        let shader_src = include_str!("shaders/triangle.wgsl");
        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("triangle shader"),
            source: wgpu::ShaderSource::Wgsl(shader_src.into()),
        });

        let pipeline_layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("triangle pipeline layout"),
            bind_group_layouts: &[],
            immediate_size: 0,
        });

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("triangle pipeline"),
            layout: Some(&pipeline_layout),

            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[],
            },

            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),

            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },

            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            pipeline_format: ctx.target_format,
        }
    }

    /// Clears `target` to `clear` and draws the triangle over the full target.
    pub fn render(&self, ctx: &RenderCtx<'_>, target: &mut RenderTarget<'_>, clear: wgpu::Color) {
        debug_assert_eq!(self.pipeline_format, ctx.target_format);

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("triangle pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target.color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        rpass.set_viewport(0.0, 0.0, ctx.width as f32, ctx.height as f32, 0.0, 1.0);
        rpass.set_pipeline(&self.pipeline);
        rpass.draw(0..Self::VERTEX_COUNT, 0..1);
    }
}
