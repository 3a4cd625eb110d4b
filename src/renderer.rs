//! glow (OpenGL 3.3) renderer for the survival field.
//!
//! Everything draws in screen-space pixels through four small pipelines:
//! a fullscreen radial visibility gradient, instanced circles (backdrop
//! speckle, enemies, bullets), a batched colored-triangle list (weapon
//! bodies, health bars) and a single textured quad for the player sprite.
//! Circle and shape draws are batched on the CPU and flushed in draw order.

use std::mem;
use std::sync::Arc;

use glam::Vec2;
use glow::*;
use thiserror::Error;

use crate::camera::Camera;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("shader compile error: {0}")]
    ShaderCompile(String),
    #[error("program link error: {0}")]
    ProgramLink(String),
    #[error("gl resource error: {0}")]
    Resource(String),
}

const CIRCLE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aCenter;
layout (location = 2) in float aRadius;
layout (location = 3) in vec4 aColor;

uniform mat4 uProjection;

out vec2 vLocal;
out vec4 vColor;

void main() {
    vec2 pos = aCenter + aPos * aRadius;
    gl_Position = uProjection * vec4(pos, 0.0, 1.0);
    vLocal = aPos;
    vColor = aColor;
}
"#;

const CIRCLE_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec2 vLocal;
in vec4 vColor;
out vec4 FragColor;

void main() {
    float d = length(vLocal);
    if (d > 1.0) {
        discard;
    }
    float edge = 1.0 - smoothstep(0.85, 1.0, d);
    FragColor = vec4(vColor.rgb, vColor.a * edge);
}
"#;

const SHAPE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec4 aColor;

uniform mat4 uProjection;

out vec4 vColor;

void main() {
    gl_Position = uProjection * vec4(aPos, 0.0, 1.0);
    vColor = aColor;
}
"#;

const SHAPE_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec4 vColor;
out vec4 FragColor;

void main() {
    FragColor = vColor;
}
"#;

const GRADIENT_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;

void main() {
    gl_Position = vec4(aPos, 0.0, 1.0);
}
"#;

const GRADIENT_FRAGMENT_SHADER: &str = r#"#version 330 core
uniform vec2 uCenter;
uniform float uRadius;
uniform vec4 uColor;

out vec4 FragColor;

void main() {
    float d = distance(gl_FragCoord.xy, uCenter);
    float t = clamp(d / uRadius, 0.0, 1.0);
    FragColor = vec4(uColor.rgb, uColor.a * (1.0 - t));
}
"#;

const SPRITE_VERTEX_SHADER: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec2 aUV;

uniform mat4 uProjection;

out vec2 vUV;

void main() {
    gl_Position = uProjection * vec4(aPos, 0.0, 1.0);
    vUV = aUV;
}
"#;

const SPRITE_FRAGMENT_SHADER: &str = r#"#version 330 core
in vec2 vUV;
uniform sampler2D uTexture;
out vec4 FragColor;

void main() {
    FragColor = texture(uTexture, vUV);
}
"#;

/// Floats per circle instance: center (2) + radius (1) + color (4)
const CIRCLE_INSTANCE_FLOATS: usize = 7;
/// Floats per shape vertex: position (2) + color (4)
const SHAPE_VERTEX_FLOATS: usize = 6;

pub struct Renderer {
    gl: Arc<glow::Context>,

    circle_program: NativeProgram,
    circle_vao: NativeVertexArray,
    circle_vbo: NativeBuffer,
    circle_instance_vbo: NativeBuffer,
    circle_projection_loc: NativeUniformLocation,
    circle_instances: Vec<f32>,

    shape_program: NativeProgram,
    shape_vao: NativeVertexArray,
    shape_vbo: NativeBuffer,
    shape_projection_loc: NativeUniformLocation,
    shape_vertices: Vec<f32>,

    gradient_program: NativeProgram,
    gradient_vao: NativeVertexArray,
    gradient_vbo: NativeBuffer,
    gradient_center_loc: NativeUniformLocation,
    gradient_radius_loc: NativeUniformLocation,
    gradient_color_loc: NativeUniformLocation,

    sprite_program: NativeProgram,
    sprite_vao: NativeVertexArray,
    sprite_vbo: NativeBuffer,
    sprite_projection_loc: NativeUniformLocation,
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self, RenderError> {
        unsafe {
            // ------------------- circle pipeline -------------------
            let circle_program = compile_program(&gl, CIRCLE_VERTEX_SHADER, CIRCLE_FRAGMENT_SHADER)?;
            let circle_projection_loc = uniform_location(&gl, circle_program, "uProjection")?;

            // Unit quad spanning [-1, 1] so instances scale by radius
            let quad: [f32; 12] = [
                -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, //
                -1.0, -1.0, 1.0, 1.0, -1.0, 1.0,
            ];

            let circle_vao = gl
                .create_vertex_array()
                .map_err(RenderError::Resource)?;
            gl.bind_vertex_array(Some(circle_vao));

            let circle_vbo = gl.create_buffer().map_err(RenderError::Resource)?;
            gl.bind_buffer(ARRAY_BUFFER, Some(circle_vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&quad), STATIC_DRAW);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            let circle_instance_vbo = gl.create_buffer().map_err(RenderError::Resource)?;
            gl.bind_buffer(ARRAY_BUFFER, Some(circle_instance_vbo));

            let stride = (CIRCLE_INSTANCE_FLOATS * mem::size_of::<f32>()) as i32;
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, stride, 0);
            gl.vertex_attrib_divisor(1, 1);
            gl.enable_vertex_attrib_array(2);
            gl.vertex_attrib_pointer_f32(2, 1, FLOAT, false, stride, 8);
            gl.vertex_attrib_divisor(2, 1);
            gl.enable_vertex_attrib_array(3);
            gl.vertex_attrib_pointer_f32(3, 4, FLOAT, false, stride, 12);
            gl.vertex_attrib_divisor(3, 1);

            gl.bind_vertex_array(None);

            // ------------------- shape pipeline -------------------
            let shape_program = compile_program(&gl, SHAPE_VERTEX_SHADER, SHAPE_FRAGMENT_SHADER)?;
            let shape_projection_loc = uniform_location(&gl, shape_program, "uProjection")?;

            let shape_vao = gl.create_vertex_array().map_err(RenderError::Resource)?;
            gl.bind_vertex_array(Some(shape_vao));

            let shape_vbo = gl.create_buffer().map_err(RenderError::Resource)?;
            gl.bind_buffer(ARRAY_BUFFER, Some(shape_vbo));

            let stride = (SHAPE_VERTEX_FLOATS * mem::size_of::<f32>()) as i32;
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 4, FLOAT, false, stride, 8);

            gl.bind_vertex_array(None);

            // ------------------- gradient pipeline -------------------
            let gradient_program =
                compile_program(&gl, GRADIENT_VERTEX_SHADER, GRADIENT_FRAGMENT_SHADER)?;
            let gradient_center_loc = uniform_location(&gl, gradient_program, "uCenter")?;
            let gradient_radius_loc = uniform_location(&gl, gradient_program, "uRadius")?;
            let gradient_color_loc = uniform_location(&gl, gradient_program, "uColor")?;

            let gradient_vao = gl.create_vertex_array().map_err(RenderError::Resource)?;
            gl.bind_vertex_array(Some(gradient_vao));

            let gradient_vbo = gl.create_buffer().map_err(RenderError::Resource)?;
            gl.bind_buffer(ARRAY_BUFFER, Some(gradient_vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&quad), STATIC_DRAW);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            gl.bind_vertex_array(None);

            // ------------------- sprite pipeline -------------------
            let sprite_program =
                compile_program(&gl, SPRITE_VERTEX_SHADER, SPRITE_FRAGMENT_SHADER)?;
            let sprite_projection_loc = uniform_location(&gl, sprite_program, "uProjection")?;

            let sprite_vao = gl.create_vertex_array().map_err(RenderError::Resource)?;
            gl.bind_vertex_array(Some(sprite_vao));

            let sprite_vbo = gl.create_buffer().map_err(RenderError::Resource)?;
            gl.bind_buffer(ARRAY_BUFFER, Some(sprite_vbo));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 16, 0);
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, FLOAT, false, 16, 8);

            gl.bind_vertex_array(None);

            // Dusk-grey field
            gl.clear_color(0.93, 0.92, 0.90, 1.0);
            gl.enable(BLEND);
            gl.blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);

            Ok(Self {
                gl,
                circle_program,
                circle_vao,
                circle_vbo,
                circle_instance_vbo,
                circle_projection_loc,
                circle_instances: Vec::new(),
                shape_program,
                shape_vao,
                shape_vbo,
                shape_projection_loc,
                shape_vertices: Vec::new(),
                gradient_program,
                gradient_vao,
                gradient_vbo,
                gradient_center_loc,
                gradient_radius_loc,
                gradient_color_loc,
                sprite_program,
                sprite_vao,
                sprite_vbo,
                sprite_projection_loc,
            })
        }
    }

    pub fn resize(&self, width: i32, height: i32) {
        unsafe {
            self.gl.viewport(0, 0, width, height);
        }
    }

    pub fn begin_frame(&self) {
        unsafe {
            self.gl.clear(COLOR_BUFFER_BIT);
        }
    }

    /// Fullscreen radial falloff centered on the player: bright near the
    /// center, fading to nothing at `radius` pixels.
    pub fn draw_visibility_gradient(&self, camera: &Camera, radius: f32, color: [f32; 4]) {
        unsafe {
            self.gl.use_program(Some(self.gradient_program));
            self.gl.bind_vertex_array(Some(self.gradient_vao));

            // gl_FragCoord has a bottom-left origin; the center is symmetric
            // so no flip is needed.
            self.gl.uniform_2_f32(
                Some(&self.gradient_center_loc),
                camera.viewport_width / 2.0,
                camera.viewport_height / 2.0,
            );
            self.gl.uniform_1_f32(Some(&self.gradient_radius_loc), radius);
            self.gl.uniform_4_f32(
                Some(&self.gradient_color_loc),
                color[0],
                color[1],
                color[2],
                color[3],
            );

            self.gl.draw_arrays(TRIANGLES, 0, 6);
            self.gl.bind_vertex_array(None);
        }
    }

    pub fn push_circle(&mut self, center: Vec2, radius: f32, color: [f32; 4]) {
        self.circle_instances
            .extend_from_slice(&[center.x, center.y, radius, color[0], color[1], color[2], color[3]]);
    }

    /// Draw and clear the pending circle batch.
    pub fn flush_circles(&mut self, camera: &Camera) {
        if self.circle_instances.is_empty() {
            return;
        }
        unsafe {
            self.gl.use_program(Some(self.circle_program));
            self.gl.bind_vertex_array(Some(self.circle_vao));

            self.gl
                .bind_buffer(ARRAY_BUFFER, Some(self.circle_instance_vbo));
            self.gl.buffer_data_u8_slice(
                ARRAY_BUFFER,
                as_u8_slice(&self.circle_instances),
                DYNAMIC_DRAW,
            );

            let projection = camera.projection_matrix();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.circle_projection_loc),
                false,
                projection.as_ref(),
            );

            let count = self.circle_instances.len() / CIRCLE_INSTANCE_FLOATS;
            self.gl.draw_arrays_instanced(TRIANGLES, 0, 6, count as i32);
            self.gl.bind_vertex_array(None);
        }
        self.circle_instances.clear();
    }

    pub fn push_triangle(&mut self, a: Vec2, b: Vec2, c: Vec2, color: [f32; 4]) {
        for p in [a, b, c] {
            self.shape_vertices
                .extend_from_slice(&[p.x, p.y, color[0], color[1], color[2], color[3]]);
        }
    }

    /// Axis-aligned rectangle from its top-left corner.
    pub fn push_rect(&mut self, top_left: Vec2, size: Vec2, color: [f32; 4]) {
        self.push_quad(
            top_left,
            top_left + Vec2::new(size.x, 0.0),
            top_left + size,
            top_left + Vec2::new(0.0, size.y),
            color,
        );
    }

    /// Rectangle rotated around an arbitrary pivot, for weapon bodies that
    /// spin about the wielder rather than their own center.
    pub fn push_rect_rotated(
        &mut self,
        top_left: Vec2,
        size: Vec2,
        pivot: Vec2,
        angle: f32,
        color: [f32; 4],
    ) {
        let corners = [
            top_left,
            top_left + Vec2::new(size.x, 0.0),
            top_left + size,
            top_left + Vec2::new(0.0, size.y),
        ]
        .map(|p| rotate_around(p, pivot, angle));
        self.push_quad(corners[0], corners[1], corners[2], corners[3], color);
    }

    /// Thin outline of a rectangle, drawn as four bars.
    pub fn push_rect_outline(&mut self, top_left: Vec2, size: Vec2, width: f32, color: [f32; 4]) {
        self.push_rect(top_left, Vec2::new(size.x, width), color);
        self.push_rect(
            top_left + Vec2::new(0.0, size.y - width),
            Vec2::new(size.x, width),
            color,
        );
        self.push_rect(top_left, Vec2::new(width, size.y), color);
        self.push_rect(
            top_left + Vec2::new(size.x - width, 0.0),
            Vec2::new(width, size.y),
            color,
        );
    }

    pub fn push_quad(&mut self, a: Vec2, b: Vec2, c: Vec2, d: Vec2, color: [f32; 4]) {
        self.push_triangle(a, b, c, color);
        self.push_triangle(a, c, d, color);
    }

    /// Draw and clear the pending shape batch.
    pub fn flush_shapes(&mut self, camera: &Camera) {
        if self.shape_vertices.is_empty() {
            return;
        }
        unsafe {
            self.gl.use_program(Some(self.shape_program));
            self.gl.bind_vertex_array(Some(self.shape_vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.shape_vbo));
            self.gl.buffer_data_u8_slice(
                ARRAY_BUFFER,
                as_u8_slice(&self.shape_vertices),
                DYNAMIC_DRAW,
            );

            let projection = camera.projection_matrix();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.shape_projection_loc),
                false,
                projection.as_ref(),
            );

            let count = self.shape_vertices.len() / SHAPE_VERTEX_FLOATS;
            self.gl.draw_arrays(TRIANGLES, 0, count as i32);
            self.gl.bind_vertex_array(None);
        }
        self.shape_vertices.clear();
    }

    /// One textured quad centered at `center`, for the player sprite.
    pub fn draw_sprite(&self, camera: &Camera, texture: glow::Texture, center: Vec2, size: Vec2) {
        let half = size / 2.0;
        let (x0, y0) = (center.x - half.x, center.y - half.y);
        let (x1, y1) = (center.x + half.x, center.y + half.y);
        // The projection's y points down, so v=0 (image top) goes with y0.
        let vertices: [f32; 24] = [
            x0, y0, 0.0, 0.0, //
            x1, y0, 1.0, 0.0, //
            x1, y1, 1.0, 1.0, //
            x0, y0, 0.0, 0.0, //
            x1, y1, 1.0, 1.0, //
            x0, y1, 0.0, 1.0,
        ];

        unsafe {
            self.gl.use_program(Some(self.sprite_program));
            self.gl.bind_vertex_array(Some(self.sprite_vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.sprite_vbo));
            self.gl
                .buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), DYNAMIC_DRAW);

            let projection = camera.projection_matrix();
            self.gl.uniform_matrix_4_f32_slice(
                Some(&self.sprite_projection_loc),
                false,
                projection.as_ref(),
            );

            self.gl.active_texture(TEXTURE0);
            self.gl.bind_texture(TEXTURE_2D, Some(texture));

            self.gl.draw_arrays(TRIANGLES, 0, 6);
            self.gl.bind_vertex_array(None);
            self.gl.bind_texture(TEXTURE_2D, None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.circle_program);
            self.gl.delete_vertex_array(self.circle_vao);
            self.gl.delete_buffer(self.circle_vbo);
            self.gl.delete_buffer(self.circle_instance_vbo);
            self.gl.delete_program(self.shape_program);
            self.gl.delete_vertex_array(self.shape_vao);
            self.gl.delete_buffer(self.shape_vbo);
            self.gl.delete_program(self.gradient_program);
            self.gl.delete_vertex_array(self.gradient_vao);
            self.gl.delete_buffer(self.gradient_vbo);
            self.gl.delete_program(self.sprite_program);
            self.gl.delete_vertex_array(self.sprite_vao);
            self.gl.delete_buffer(self.sprite_vbo);
        }
    }
}

/// Rotate a point around a pivot.
pub fn rotate_around(p: Vec2, pivot: Vec2, angle: f32) -> Vec2 {
    let (sin, cos) = angle.sin_cos();
    let d = p - pivot;
    pivot + Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos)
}

/// Compile and link one shader pair.
fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<NativeProgram, RenderError> {
    unsafe {
        let vertex_shader = gl
            .create_shader(VERTEX_SHADER)
            .map_err(RenderError::Resource)?;
        gl.shader_source(vertex_shader, vertex_src);
        gl.compile_shader(vertex_shader);
        if !gl.get_shader_compile_status(vertex_shader) {
            return Err(RenderError::ShaderCompile(
                gl.get_shader_info_log(vertex_shader),
            ));
        }

        let fragment_shader = gl
            .create_shader(FRAGMENT_SHADER)
            .map_err(RenderError::Resource)?;
        gl.shader_source(fragment_shader, fragment_src);
        gl.compile_shader(fragment_shader);
        if !gl.get_shader_compile_status(fragment_shader) {
            return Err(RenderError::ShaderCompile(
                gl.get_shader_info_log(fragment_shader),
            ));
        }

        let program = gl.create_program().map_err(RenderError::Resource)?;
        gl.attach_shader(program, vertex_shader);
        gl.attach_shader(program, fragment_shader);
        gl.link_program(program);
        if !gl.get_program_link_status(program) {
            return Err(RenderError::ProgramLink(gl.get_program_info_log(program)));
        }

        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        Ok(program)
    }
}

fn uniform_location(
    gl: &glow::Context,
    program: NativeProgram,
    name: &str,
) -> Result<NativeUniformLocation, RenderError> {
    unsafe {
        gl.get_uniform_location(program, name)
            .ok_or_else(|| RenderError::Resource(format!("missing uniform {name}")))
    }
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_around_quarter_turn() {
        let p = rotate_around(
            Vec2::new(1.0, 0.0),
            Vec2::ZERO,
            std::f32::consts::FRAC_PI_2,
        );
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 1.0).abs() < 1e-5);
    }

    #[test]
    fn rotate_around_offset_pivot() {
        let p = rotate_around(
            Vec2::new(11.0, 10.0),
            Vec2::new(10.0, 10.0),
            std::f32::consts::PI,
        );
        assert!((p.x - 9.0).abs() < 1e-5);
        assert!((p.y - 10.0).abs() < 1e-5);
    }
}
