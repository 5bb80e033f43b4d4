// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ordered-dither wave background rendered with WebGL2.
//!
//! A fullscreen quad runs a fragment shader that sums a few octaves of value
//! noise into a drifting wave, darkens it around the pointer, and quantises
//! the result through an 8x8 Bayer matrix into `palette_size` levels per
//! channel.

use alloc::format;

use kurbo::{Point, Size};
use strata_core::backend::BackgroundSurface;
use strata_core::config::BackgroundConfig;
use wasm_bindgen::prelude::*;
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext, WebGlProgram, WebGlShader, WebGlUniformLocation};

/// Size of one dither cell, in device pixels.
const PIXEL_SIZE: f32 = 2.0;

const VERTEX_SHADER: &str = r"#version 300 es
layout(location = 0) in vec2 a_position;
void main() {
    gl_Position = vec4(a_position, 0.0, 1.0);
}
";

const FRAGMENT_SHADER: &str = r"#version 300 es
precision highp float;

uniform vec2 u_resolution;
uniform float u_time;
uniform float u_wave_speed;
uniform float u_wave_frequency;
uniform float u_wave_amplitude;
uniform vec3 u_wave_color;
uniform vec2 u_mouse;
uniform float u_mouse_active;
uniform float u_mouse_radius;
uniform float u_color_num;
uniform float u_pixel_size;

out vec4 frag_color;

const int BAYER[64] = int[64](
     0, 32,  8, 40,  2, 34, 10, 42,
    48, 16, 56, 24, 50, 18, 58, 26,
    12, 44,  4, 36, 14, 46,  6, 38,
    60, 28, 52, 20, 62, 30, 54, 22,
     3, 35, 11, 43,  1, 33,  9, 41,
    51, 19, 59, 27, 49, 17, 57, 25,
    15, 47,  7, 39, 13, 45,  5, 37,
    63, 31, 55, 23, 61, 29, 53, 21
);

float hash(vec2 p) {
    return fract(sin(dot(p, vec2(127.1, 311.7))) * 43758.5453);
}

float noise(vec2 p) {
    vec2 i = floor(p);
    vec2 f = fract(p);
    vec2 u = f * f * (3.0 - 2.0 * f);
    float a = hash(i);
    float b = hash(i + vec2(1.0, 0.0));
    float c = hash(i + vec2(0.0, 1.0));
    float d = hash(i + vec2(1.0, 1.0));
    return mix(mix(a, b, u.x), mix(c, d, u.x), u.y);
}

float fbm(vec2 p) {
    float value = 0.0;
    float amp = 1.0;
    float freq = u_wave_frequency;
    for (int i = 0; i < 4; i++) {
        value += amp * abs(noise(p * freq) * 2.0 - 1.0);
        freq *= 2.0;
        amp *= u_wave_amplitude;
    }
    return value;
}

void main() {
    vec2 cell = floor(gl_FragCoord.xy / u_pixel_size) * u_pixel_size;
    float aspect = u_resolution.x / u_resolution.y;
    vec2 uv = cell / u_resolution - 0.5;
    uv.x *= aspect;

    vec2 q = uv - u_time * u_wave_speed;
    float f = fbm(q + fbm(q));

    if (u_mouse_active > 0.5) {
        vec2 m = u_mouse - 0.5;
        m.x *= aspect;
        float d = length(uv - m);
        f -= 0.5 * (1.0 - smoothstep(0.0, u_mouse_radius, d));
    }

    vec3 color = mix(vec3(0.0), u_wave_color, clamp(f, 0.0, 1.0));

    ivec2 b = ivec2(mod(gl_FragCoord.xy / u_pixel_size, 8.0));
    float threshold = float(BAYER[b.y * 8 + b.x]) / 64.0 - 0.25;
    float levels = max(u_color_num - 1.0, 1.0);
    color += threshold / levels;
    color = clamp(color - 0.2, 0.0, 1.0);
    color = floor(color * levels + 0.5) / levels;
    frag_color = vec4(color, 1.0);
}
";

/// Fullscreen quad: two triangles covering clip space.
#[rustfmt::skip]
const FULLSCREEN_QUAD: [f32; 12] = [
    -1.0, -1.0,   1.0, -1.0,   1.0, 1.0,
    -1.0, -1.0,   1.0,  1.0,  -1.0, 1.0,
];

struct Uniforms {
    resolution: Option<WebGlUniformLocation>,
    time: Option<WebGlUniformLocation>,
    wave_speed: Option<WebGlUniformLocation>,
    wave_frequency: Option<WebGlUniformLocation>,
    wave_amplitude: Option<WebGlUniformLocation>,
    wave_color: Option<WebGlUniformLocation>,
    mouse: Option<WebGlUniformLocation>,
    mouse_active: Option<WebGlUniformLocation>,
    mouse_radius: Option<WebGlUniformLocation>,
    color_num: Option<WebGlUniformLocation>,
    pixel_size: Option<WebGlUniformLocation>,
}

impl Uniforms {
    fn locate(gl: &WebGl2RenderingContext, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            resolution: at("u_resolution"),
            time: at("u_time"),
            wave_speed: at("u_wave_speed"),
            wave_frequency: at("u_wave_frequency"),
            wave_amplitude: at("u_wave_amplitude"),
            wave_color: at("u_wave_color"),
            mouse: at("u_mouse"),
            mouse_active: at("u_mouse_active"),
            mouse_radius: at("u_mouse_radius"),
            color_num: at("u_color_num"),
            pixel_size: at("u_pixel_size"),
        }
    }
}

/// The dither background drawn into one canvas.
pub(crate) struct DitherSurface {
    canvas: HtmlCanvasElement,
    gl: WebGl2RenderingContext,
    program: WebGlProgram,
    uniforms: Uniforms,
    config: BackgroundConfig,
    /// Canvas size in CSS pixels.
    size: Size,
    /// Pointer position, normalised with the origin at the top left.
    mouse: Option<Point>,
}

impl core::fmt::Debug for DitherSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DitherSurface")
            .field("config", &self.config)
            .field("size", &self.size)
            .field("mouse", &self.mouse)
            .finish_non_exhaustive()
    }
}

impl DitherSurface {
    /// Compiles the shaders and uploads the quad.
    pub(crate) fn new(canvas: HtmlCanvasElement, config: &BackgroundConfig) -> Result<Self, JsValue> {
        let gl: WebGl2RenderingContext = canvas
            .get_context("webgl2")?
            .ok_or_else(|| JsValue::from_str("browser does not support WebGL2"))?
            .unchecked_into();

        let vs = compile_shader(&gl, WebGl2RenderingContext::VERTEX_SHADER, VERTEX_SHADER)?;
        let fs = compile_shader(&gl, WebGl2RenderingContext::FRAGMENT_SHADER, FRAGMENT_SHADER)?;

        let program = gl
            .create_program()
            .ok_or_else(|| JsValue::from_str("could not create GL program"))?;
        gl.attach_shader(&program, &vs);
        gl.attach_shader(&program, &fs);
        gl.link_program(&program);
        if !gl
            .get_program_parameter(&program, WebGl2RenderingContext::LINK_STATUS)
            .as_bool()
            .unwrap_or(false)
        {
            let log = gl.get_program_info_log(&program).unwrap_or_default();
            return Err(JsValue::from_str(&format!("GL program link failed: {log}")));
        }
        gl.use_program(Some(&program));

        let buffer = gl
            .create_buffer()
            .ok_or_else(|| JsValue::from_str("could not create GL buffer"))?;
        gl.bind_buffer(WebGl2RenderingContext::ARRAY_BUFFER, Some(&buffer));
        let vertices = js_sys::Float32Array::from(&FULLSCREEN_QUAD[..]);
        gl.buffer_data_with_array_buffer_view(
            WebGl2RenderingContext::ARRAY_BUFFER,
            &vertices,
            WebGl2RenderingContext::STATIC_DRAW,
        );
        gl.enable_vertex_attrib_array(0);
        gl.vertex_attrib_pointer_with_i32(0, 2, WebGl2RenderingContext::FLOAT, false, 0, 0);

        let uniforms = Uniforms::locate(&gl, &program);
        Ok(Self {
            canvas,
            gl,
            program,
            uniforms,
            config: config.clone(),
            size: Size::ZERO,
            mouse: None,
        })
    }

    /// Returns the canvas size in CSS pixels.
    pub(crate) fn size(&self) -> Size {
        self.size
    }

    /// Matches the drawing buffer to a viewport of `size` CSS pixels at the
    /// given device pixel ratio.
    pub(crate) fn resize(&mut self, size: Size, pixel_ratio: f64) {
        self.size = size;
        let width = device_pixels(size.width, pixel_ratio);
        let height = device_pixels(size.height, pixel_ratio);
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        self.gl.viewport(
            0,
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
    }
}

impl BackgroundSurface for DitherSurface {
    fn configure(&mut self, config: &BackgroundConfig) {
        self.config = config.clone();
        if !config.mouse_interactive {
            self.mouse = None;
        }
    }

    fn pointer_moved(&mut self, position: Point) {
        if self.config.mouse_interactive {
            self.mouse = Some(position);
        }
    }

    fn pointer_left(&mut self) {
        self.mouse = None;
    }

    fn render(&mut self, time_secs: f64) {
        let gl = &self.gl;
        let u = &self.uniforms;
        let c = &self.config;
        let time = if c.animated { time_secs } else { 0.0 };
        let [r, g, b] = c.base_color.to_array();
        let [mx, my] = shader_mouse(self.mouse.unwrap_or(Point::new(0.5, 0.5)));

        gl.use_program(Some(&self.program));
        gl.uniform2f(
            u.resolution.as_ref(),
            single(f64::from(self.canvas.width())),
            single(f64::from(self.canvas.height())),
        );
        gl.uniform1f(u.time.as_ref(), single(time));
        gl.uniform1f(u.wave_speed.as_ref(), c.speed);
        gl.uniform1f(u.wave_frequency.as_ref(), c.frequency);
        gl.uniform1f(u.wave_amplitude.as_ref(), c.amplitude);
        gl.uniform3f(u.wave_color.as_ref(), r, g, b);
        gl.uniform2f(u.mouse.as_ref(), mx, my);
        gl.uniform1f(u.mouse_active.as_ref(), if self.mouse.is_some() { 1.0 } else { 0.0 });
        gl.uniform1f(u.mouse_radius.as_ref(), c.mouse_radius);
        gl.uniform1f(u.color_num.as_ref(), palette_levels(c.palette_size));
        gl.uniform1f(u.pixel_size.as_ref(), PIXEL_SIZE);
        gl.draw_arrays(WebGl2RenderingContext::TRIANGLES, 0, 6);
    }
}

fn compile_shader(
    gl: &WebGl2RenderingContext,
    shader_type: u32,
    source: &str,
) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| JsValue::from_str("could not create GL shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl
        .get_shader_parameter(&shader, WebGl2RenderingContext::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        return Err(JsValue::from_str(&format!("GL shader compile failed: {log}")));
    }

    Ok(shader)
}

/// Converts a CSS length to whole device pixels, never less than one.
#[expect(
    clippy::cast_possible_truncation,
    reason = "rounded and clamped to a canvas dimension"
)]
fn device_pixels(css: f64, pixel_ratio: f64) -> u32 {
    (css * pixel_ratio).round().clamp(1.0, f64::from(u32::MAX)) as u32
}

#[expect(clippy::cast_possible_truncation, reason = "uniforms are single precision")]
fn single(x: f64) -> f32 {
    x as f32
}

/// Shader-space pointer position: the shader's origin is at the bottom left.
fn shader_mouse(position: Point) -> [f32; 2] {
    [single(position.x), single(1.0 - position.y)]
}

/// A palette needs at least two levels to quantise into.
fn palette_levels(palette_size: u32) -> f32 {
    single(f64::from(palette_size.max(2)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_is_flipped_into_shader_space() {
        assert_eq!(shader_mouse(Point::new(0.25, 0.0)), [0.25, 1.0]);
        assert_eq!(shader_mouse(Point::new(1.0, 0.75)), [1.0, 0.25]);
    }

    #[test]
    fn device_pixels_scale_and_round() {
        assert_eq!(device_pixels(800.0, 1.0), 800);
        assert_eq!(device_pixels(800.0, 1.5), 1200);
        assert_eq!(device_pixels(333.3, 2.0), 667);
    }

    #[test]
    fn empty_canvas_keeps_one_pixel() {
        assert_eq!(device_pixels(0.0, 2.0), 1);
    }

    #[test]
    fn palette_has_at_least_two_levels() {
        assert_eq!(palette_levels(4), 4.0);
        assert_eq!(palette_levels(1), 2.0);
        assert_eq!(palette_levels(0), 2.0);
    }
}
