use std::ops::Range;

use bytemuck::{Pod, Zeroable};
use wgpu::VertexAttribute;

use crate::math::{Rect, Vec2i};

/// A queued copy of a texture into a destination rectangle
#[derive(Debug, Clone)]
pub(crate) struct DrawCommand<T> {
    pub texture: T,
    pub dst: Rect,
}

#[repr(C)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex2d {
    pub position: [f32; 2],
    pub uv: [f32; 2],
}

impl Vertex2d {
    pub fn descriptor() -> wgpu::VertexBufferLayout<'static> {
        const ATTRS: [VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x2];
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &ATTRS,
        }
    }
}

/// A run of indices that all sample the same texture
#[derive(Debug)]
pub(crate) struct DrawCall<T> {
    pub texture: T,
    pub indices: Range<u32>,
}

#[derive(Debug)]
pub(crate) struct DrawList<T> {
    pub vertices: Vec<Vertex2d>,
    pub indices: Vec<u32>,
    pub calls: Vec<DrawCall<T>>,
}

/// Pixel position to normalized device coordinates, y pointing down on screen
fn to_ndc(x: f32, y: f32, screen: Vec2i) -> [f32; 2] {
    [
        x / screen.x() as f32 * 2.0 - 1.0,
        1.0 - y / screen.y() as f32 * 2.0,
    ]
}

/// Top left and bottom right corners of `dst` in clip space.
///
/// Summed in floats so origins anywhere in the `i32` range can't overflow.
fn rect_to_ndc(dst: Rect, screen: Vec2i) -> ([f32; 2], [f32; 2]) {
    let (x, y) = (dst.pos.x() as f32, dst.pos.y() as f32);
    (
        to_ndc(x, y, screen),
        to_ndc(x + dst.size.x() as f32, y + dst.size.y() as f32, screen),
    )
}

/// Turn queued commands into one quad each, merging consecutive commands on the same
/// texture into a single draw call. Order is preserved so later commands draw on top.
pub(crate) fn build<T: PartialEq + Clone>(
    commands: &[DrawCommand<T>],
    screen: Vec2i,
) -> DrawList<T> {
    let mut list = DrawList {
        vertices: Vec::with_capacity(commands.len() * 4),
        indices: Vec::with_capacity(commands.len() * 6),
        calls: Vec::new(),
    };
    for command in commands {
        let n = list.vertices.len() as u32;
        let start = list.indices.len() as u32;
        let ([left, top], [right, bottom]) = rect_to_ndc(command.dst, screen);
        list.vertices.extend_from_slice(&[
            Vertex2d {
                position: [left, top],
                uv: [0.0, 0.0],
            },
            Vertex2d {
                position: [right, top],
                uv: [1.0, 0.0],
            },
            Vertex2d {
                position: [left, bottom],
                uv: [0.0, 1.0],
            },
            Vertex2d {
                position: [right, bottom],
                uv: [1.0, 1.0],
            },
        ]);
        list.indices
            .extend_from_slice(&[n, n + 1, n + 2, n + 2, n + 1, n + 3]);
        let end = list.indices.len() as u32;
        match list.calls.last_mut() {
            Some(call) if call.texture == command.texture => call.indices.end = end,
            _ => list.calls.push(DrawCall {
                texture: command.texture.clone(),
                indices: start..end,
            }),
        }
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cmd(texture: u8, pos: (i32, i32), size: (i32, i32)) -> DrawCommand<u8> {
        DrawCommand {
            texture,
            dst: Rect::new(pos, size),
        }
    }

    #[test]
    fn full_screen_quad_spans_clip_space() {
        let list = build(&[cmd(0, (0, 0), (640, 480))], Vec2i::new(640, 480));
        let corners: Vec<_> = list.vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            corners,
            vec![[-1.0, 1.0], [1.0, 1.0], [-1.0, -1.0], [1.0, -1.0]]
        );
        assert_eq!(list.indices, vec![0, 1, 2, 2, 1, 3]);
    }

    #[test]
    fn quarter_quad_lands_in_bottom_right() {
        let list = build(&[cmd(0, (320, 240), (320, 240))], Vec2i::new(640, 480));
        assert_eq!(list.vertices[0].position, [0.0, 0.0]);
        assert_eq!(list.vertices[3].position, [1.0, -1.0]);
    }

    #[test]
    fn far_off_origin_stays_off_screen() {
        let list = build(
            &[cmd(0, (i32::MAX - 5, i32::MAX - 5), (320, 240))],
            Vec2i::new(640, 480),
        );
        assert_eq!(list.vertices.len(), 4);
        for vertex in &list.vertices {
            let [x, y] = vertex.position;
            assert!(x.is_finite() && x > 1.0, "{x}");
            assert!(y.is_finite() && y < -1.0, "{y}");
        }
    }

    #[test]
    fn consecutive_commands_on_one_texture_share_a_call() {
        let screen = Vec2i::new(640, 480);
        let list = build(
            &[
                cmd(1, (0, 0), (10, 10)),
                cmd(1, (10, 0), (10, 10)),
                cmd(2, (5, 5), (4, 4)),
                cmd(1, (0, 10), (10, 10)),
            ],
            screen,
        );
        let calls: Vec<_> = list
            .calls
            .iter()
            .map(|c| (c.texture, c.indices.clone()))
            .collect();
        assert_eq!(calls, vec![(1, 0..12), (2, 12..18), (1, 18..24)]);
        assert_eq!(list.vertices.len(), 16);
    }

    #[test]
    fn nothing_queued_builds_nothing() {
        let list = build::<u8>(&[], Vec2i::new(640, 480));
        assert!(list.vertices.is_empty() && list.indices.is_empty() && list.calls.is_empty());
    }
}
