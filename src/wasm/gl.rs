use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    HtmlCanvasElement, WebGl2RenderingContext as GL, WebGlProgram, WebGlShader,
    WebGlUniformLocation, WebGlVertexArrayObject,
};

use crate::color_scheme::SCHEME_SIZE;
use crate::error::{Result, ViewerError};
use crate::render_state::{Graphics, Uniforms};

const VERTEX_SHADER: &str = include_str!("../../shaders/fractal.vert");
const FRAGMENT_SHADER: &str = include_str!("../../shaders/fractal.frag");

/// Two triangles covering clip space.
const QUAD: [f32; 18] = [
    -1.0, -1.0, 0.0, 1.0, -1.0, 0.0, -1.0, 1.0, 0.0, //
    -1.0, 1.0, 0.0, 1.0, -1.0, 0.0, 1.0, 1.0, 0.0,
];

struct UniformLocations {
    resolution: Option<WebGlUniformLocation>,
    zoom_center: Option<WebGlUniformLocation>,
    zoom_size: Option<WebGlUniformLocation>,
    phi: Option<WebGlUniformLocation>,
    colors: [Option<WebGlUniformLocation>; SCHEME_SIZE],
    mode: Option<WebGlUniformLocation>,
    max_iterations: Option<WebGlUniformLocation>,
}

impl UniformLocations {
    fn lookup(gl: &GL, program: &WebGlProgram) -> Self {
        let at = |name: &str| gl.get_uniform_location(program, name);
        Self {
            resolution: at("resolution"),
            zoom_center: at("zoomCenter"),
            zoom_size: at("zoomSize"),
            phi: at("phi"),
            colors: std::array::from_fn(|i| at(&format!("color{i}"))),
            mode: at("mode"),
            max_iterations: at("maxIterations"),
        }
    }
}

/// WebGL2 backend drawing the fractal quad into a canvas.
pub struct WebGlGraphics {
    gl: GL,
    canvas: HtmlCanvasElement,
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    uniforms: UniformLocations,
}

impl WebGlGraphics {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self> {
        let gl: GL = canvas
            .get_context("webgl2")
            .map_err(js_error)?
            .ok_or_else(|| ViewerError::Graphics("WebGL2 not supported".into()))?
            .dyn_into()
            .map_err(|_| ViewerError::Graphics("context is not WebGL2".into()))?;

        let vertex = compile_shader(&gl, GL::VERTEX_SHADER, "vertex", VERTEX_SHADER)?;
        let fragment = compile_shader(&gl, GL::FRAGMENT_SHADER, "fragment", FRAGMENT_SHADER)?;
        let program = link_program(&gl, &vertex, &fragment)?;
        let vao = build_quad(&gl, &program)?;
        let uniforms = UniformLocations::lookup(&gl, &program);

        let graphics = Self {
            gl,
            canvas,
            program,
            vao,
            uniforms,
        };
        graphics.resize_to_display_size();
        let (width, height) = graphics.display_size();
        if width == 0 || height == 0 {
            return Err(ViewerError::ZeroSizeCanvas { width, height });
        }
        log::info!("WebGL2 ready, canvas {width}x{height}");
        Ok(graphics)
    }

    /// Match the drawing buffer to the CSS size and reset the GL viewport.
    pub fn resize_to_display_size(&self) {
        let (width, height) = self.display_size();
        if self.canvas.width() != width || self.canvas.height() != height {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            log::debug!("canvas resized to {width}x{height}");
        }
        self.gl.viewport(0, 0, width as i32, height as i32);
    }
}

impl Graphics for WebGlGraphics {
    fn display_size(&self) -> (u32, u32) {
        (
            self.canvas.client_width().max(0) as u32,
            self.canvas.client_height().max(0) as u32,
        )
    }

    fn drawing_size(&self) -> (u32, u32) {
        (self.canvas.width(), self.canvas.height())
    }

    fn draw(&mut self, uniforms: &Uniforms) {
        let gl = &self.gl;
        let loc = &self.uniforms;
        gl.use_program(Some(&self.program));
        gl.bind_vertex_array(Some(&self.vao));

        let [rx, ry] = uniforms.resolution;
        gl.uniform2f(loc.resolution.as_ref(), rx, ry);
        let [cx, cy] = uniforms.zoom_center;
        gl.uniform2f(loc.zoom_center.as_ref(), cx, cy);
        gl.uniform1f(loc.zoom_size.as_ref(), uniforms.zoom_size);
        gl.uniform1f(loc.phi.as_ref(), uniforms.phi);
        for (slot, [r, g, b]) in loc.colors.iter().zip(uniforms.colors) {
            gl.uniform3f(slot.as_ref(), r, g, b);
        }
        gl.uniform1i(loc.mode.as_ref(), uniforms.mode);
        gl.uniform1i(loc.max_iterations.as_ref(), uniforms.max_iterations);

        gl.draw_arrays(GL::TRIANGLES, 0, (QUAD.len() / 3) as i32);
        gl.bind_vertex_array(None);
    }
}

fn js_error(err: JsValue) -> ViewerError {
    ViewerError::Graphics(format!("{err:?}"))
}

fn compile_shader(gl: &GL, kind: u32, stage: &'static str, source: &str) -> Result<WebGlShader> {
    let shader = gl
        .create_shader(kind)
        .ok_or_else(|| ViewerError::Graphics(format!("unable to create {stage} shader")))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(ViewerError::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vertex: &WebGlShader, fragment: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or_else(|| ViewerError::Graphics("unable to create program".into()))?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(ViewerError::ProgramLink(log))
    }
}

fn build_quad(gl: &GL, program: &WebGlProgram) -> Result<WebGlVertexArrayObject> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| ViewerError::Graphics("unable to create vertex array".into()))?;
    gl.bind_vertex_array(Some(&vao));

    let buffer = gl
        .create_buffer()
        .ok_or_else(|| ViewerError::Graphics("unable to create vertex buffer".into()))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let positions = js_sys::Float32Array::from(&QUAD[..]);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &positions, GL::STATIC_DRAW);

    let location = gl.get_attrib_location(program, "position");
    if location < 0 {
        return Err(ViewerError::Graphics(
            "vertex shader has no `position` attribute".into(),
        ));
    }
    gl.enable_vertex_attrib_array(location as u32);
    gl.vertex_attrib_pointer_with_i32(location as u32, 3, GL::FLOAT, false, 0, 0);

    gl.bind_vertex_array(None);
    Ok(vao)
}
