// src/rendering_lib/renderer.rs

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use super::shader::WGSL_SHADER_SOURCE;
use super::vertex::Vertex;
use crate::scene::{DemoScene, DRIFT_SCALE};

// Room for a dense cut: on the order of a thousand pieces of ~8 vertices
// each. Indices stay u16, so the vertex cap must remain below 65536.
const MAX_FRAME_VERTICES: usize = 32768;
const MAX_FRAME_INDICES: usize = 3 * MAX_FRAME_VERTICES;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct ViewUniform {
    scale: [f32; 2],
    offset: [f32; 2],
}

impl ViewUniform {
    /// World-to-NDC mapping that keeps the fully spread mesh on screen:
    /// pieces drift up to `DRIFT_SCALE` extra half-sides outward, so the
    /// visible world is a square of `(1 + DRIFT_SCALE) * side` centered on
    /// the mesh, fit into the window's shorter axis with a small margin.
    fn fit(side: f32, screen_width: f32, screen_height: f32) -> Self {
        let extent = (1.0 + DRIFT_SCALE) * side * 0.5;
        let margin = 0.95;
        let min_dim = screen_width.min(screen_height).max(1.0);
        let sx = margin * (min_dim / screen_width.max(1.0)) / extent;
        let sy = -margin * (min_dim / screen_height.max(1.0)) / extent;
        let center = side * 0.5;
        Self {
            scale: [sx, sy],
            offset: [-center * sx, -center * sy],
        }
    }
}

pub struct Renderer {
    render_pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,

    frame_vertices: Vec<Vertex>,
    frame_indices: Vec<u16>,

    view_uniform_buffer: wgpu::Buffer,
    view_bind_group: wgpu::BindGroup,
}

impl Renderer {
    pub fn new(device: &wgpu::Device, surface_format: wgpu::TextureFormat) -> Self {
        let shader_module = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Renderer Shader Module"),
            source: wgpu::ShaderSource::Wgsl(WGSL_SHADER_SOURCE.into()),
        });

        let view_uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("View Transform Uniform Buffer"),
            contents: bytemuck::bytes_of(&ViewUniform::fit(1.0, 1.0, 1.0)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let view_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                }],
                label: Some("view_transform_bind_group_layout"),
            });

        let view_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &view_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: view_uniform_buffer.as_entire_binding(),
            }],
            label: Some("view_transform_bind_group"),
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Renderer Pipeline Layout"),
                bind_group_layouts: &[&view_bind_group_layout],
                push_constant_ranges: &[],
            });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Renderer Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader_module,
                entry_point: "vs_main",
                buffers: &[Vertex::desc()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader_module,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Vertex Buffer"),
            size: (MAX_FRAME_VERTICES * std::mem::size_of::<Vertex>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let index_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Mesh Index Buffer"),
            size: (MAX_FRAME_INDICES * std::mem::size_of::<u16>()) as u64,
            usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            render_pipeline,
            vertex_buffer,
            index_buffer,
            frame_vertices: Vec::with_capacity(MAX_FRAME_VERTICES),
            frame_indices: Vec::with_capacity(MAX_FRAME_INDICES),
            view_uniform_buffer,
            view_bind_group,
        }
    }

    /// Fan-triangulates one piece, translated by its drift, into the frame
    /// buffers. Returns false when the buffers are out of room.
    fn add_piece_to_frame(&mut self, piece: &crate::scene::Piece, spread: f32) -> bool {
        let verts = piece.polygon.vertices();
        if verts.len() < 3 {
            return true;
        }
        if self.frame_vertices.len() + verts.len() > MAX_FRAME_VERTICES
            || self.frame_indices.len() + 3 * (verts.len() - 2) > MAX_FRAME_INDICES
        {
            return false;
        }

        let offset = piece.drift * spread;
        let base = self.frame_vertices.len() as u16;
        for p in verts {
            self.frame_vertices.push(Vertex::new(
                [p.x as f32 + offset.x, p.y as f32 + offset.y],
                piece.color,
            ));
        }
        for i in 1..(verts.len() as u16 - 1) {
            self.frame_indices.push(base);
            self.frame_indices.push(base + i);
            self.frame_indices.push(base + i + 1);
        }
        true
    }

    pub fn render_scene(
        &mut self,
        queue: &wgpu::Queue,
        encoder: &mut wgpu::CommandEncoder,
        output_view: &wgpu::TextureView,
        scene: &DemoScene,
        spread: f32,
        screen_width: f32,
        screen_height: f32,
        clear_color: wgpu::Color,
    ) {
        queue.write_buffer(
            &self.view_uniform_buffer,
            0,
            bytemuck::bytes_of(&ViewUniform::fit(scene.side, screen_width, screen_height)),
        );

        self.frame_vertices.clear();
        self.frame_indices.clear();

        let mut dropped = 0usize;
        for (index, piece) in scene.pieces.iter().enumerate() {
            if !self.add_piece_to_frame(piece, spread) {
                dropped = scene.pieces.len() - index;
                break;
            }
        }
        if dropped > 0 {
            log::warn!("frame buffers full: dropped {dropped} pieces");
        }

        if !self.frame_vertices.is_empty() && !self.frame_indices.is_empty() {
            queue.write_buffer(
                &self.vertex_buffer,
                0,
                bytemuck::cast_slice(&self.frame_vertices),
            );
            // Index data must stay 4-byte aligned for webgl.
            let mut padded_indices = self.frame_indices.clone();
            if padded_indices.len() % 2 == 1 {
                padded_indices.push(0);
            }
            queue.write_buffer(&self.index_buffer, 0, bytemuck::cast_slice(&padded_indices));
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Mesh Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if !self.frame_vertices.is_empty() && !self.frame_indices.is_empty() {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.view_bind_group, &[]);

                let vertex_slice_size =
                    (self.frame_vertices.len() * std::mem::size_of::<Vertex>()) as u64;
                let padded_index_count = self.frame_indices.len() + self.frame_indices.len() % 2;
                let index_slice_size = (padded_index_count * std::mem::size_of::<u16>()) as u64;

                render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..vertex_slice_size));
                render_pass.set_index_buffer(
                    self.index_buffer.slice(..index_slice_size),
                    wgpu::IndexFormat::Uint16,
                );
                render_pass.draw_indexed(0..self.frame_indices.len() as u32, 0, 0..1);
            }
        }
    }
}
