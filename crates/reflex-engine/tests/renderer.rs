use reflex_engine::device::{CLEAR_ALL, Device, ShaderStage, Surface};
use reflex_engine::headless::{Command, HeadlessDevice, HeadlessProvider, HeadlessSurface};
use reflex_engine::{
    AttribBinding, BufferUsage, ContextAttributes, ContextVersion, GlslVersion, RenderError,
    Renderer, RendererConfig, Topology, UniformValue,
};

type HeadlessRenderer = Renderer<HeadlessDevice, HeadlessSurface>;

fn build(config: RendererConfig) -> HeadlessRenderer {
    let mut provider = HeadlessProvider::new();
    Renderer::new(&mut provider, config).expect("renderer builds")
}

const UNIFORMS_FS: &str = "#version 100
precision mediump float;
uniform float u_F;
uniform vec2 u_V2;
uniform vec3 u_V3;
uniform vec4 u_V4;
uniform int u_I;
uniform bool u_B;
uniform mat4 u_M;
void main() {
    vec4 c = u_M * u_V4 + vec4(u_V3, u_F) + vec4(u_V2, 0.0, 0.0);
    if (u_B) { c = c * float(u_I); }
    gl_FragColor = c;
}
";

const MESH_VS: &str = "#version 100
attribute vec3 a_Pos;
attribute vec4 a_Color;
varying vec4 v_Color;
void main() {
    v_Color = a_Color;
    gl_Position = vec4(a_Pos, 1.0);
}
";

const MESH_FS: &str = "#version 100
precision mediump float;
varying vec4 v_Color;
void main() {
    gl_FragColor = v_Color;
}
";

// ── raster mode ──────────────────────────────────────────────────────────────

#[test]
fn raster_quad_draws_six_vertices() {
    let mut r = build(RendererConfig::new().with_size(640, 480).with_raster(true));
    assert!(r.has_vertex_buffer("vertices"));
    assert_eq!(r.attribute_bound_buffer("a_VertPos"), Some("vertices"));
    assert_eq!(r.attribute_component_count("a_VertPos"), Some(2));
    assert_eq!(r.is_attribute_array_normalized("a_VertPos"), Some(true));
    assert_eq!(r.element_count(), 6);

    r.device().clear_commands();
    r.render();

    let cmds = r.device().commands();
    assert!(matches!(cmds[0], Command::Clear { mask, .. } if mask == CLEAR_ALL));
    assert_eq!(cmds[1], Command::DrawArrays { mode: Topology::Triangles, first: 0, count: 6 });
    assert!(!cmds.iter().any(|c| matches!(c, Command::DrawElements { .. })));

    let fb = r.device().framebuffer();
    assert_eq!((fb.width, fb.height), (640, 480));
    assert_eq!(fb.fill, Some([0.0, 0.0, 0.0, 0.0]));
}

#[test]
fn raster_without_dimensions_uniform_still_builds() {
    // Default fragment shader declares no uniforms.
    let r = build(RendererConfig::new().with_raster(true));
    assert!(!r.has_uniform("u_Dimensions"));
    assert_eq!(r.dimensions(), [300, 150]);
}

#[test]
fn raster_sets_dimensions_uniform() {
    let fs = "#version 100\nprecision mediump float;\nuniform vec2 u_Dimensions;\n\
              void main() { gl_FragColor = vec4(u_Dimensions, 0.0, 1.0); }\n";
    let r = build(RendererConfig::new().with_size(64, 32).with_fragment(fs).with_raster(true));
    assert_eq!(r.get_uniform("u_Dimensions"), Some(UniformValue::Vec2([64.0, 32.0])));
}

// ── element buffer ───────────────────────────────────────────────────────────

#[test]
fn element_array_switches_to_indexed_draws_until_destroyed() {
    let mut r = build(RendererConfig::new().with_raster(true));

    r.set_element_array(&[0u16, 1, 2, 2, 1, 3], BufferUsage::Static).unwrap();
    assert!(r.has_element_array());
    r.device().clear_commands();
    r.render();
    assert_eq!(
        r.device().commands()[1],
        Command::DrawElements {
            mode: Topology::Triangles,
            count: 6,
            index_type: glow::UNSIGNED_SHORT,
            offset: 0,
        }
    );

    r.destroy_element_array();
    assert!(!r.has_element_array());
    r.device().clear_commands();
    r.render();
    assert_eq!(
        r.device().commands()[1],
        Command::DrawArrays { mode: Topology::Triangles, first: 0, count: 6 }
    );
    assert_eq!(r.device().take_error(), glow::NO_ERROR);
}

#[test]
fn replacing_element_array_frees_the_old_buffer() {
    let mut r = build(RendererConfig::new().with_raster(true));
    let before = r.device().live_buffer_count();

    r.set_element_array(&[0u16, 1, 2], BufferUsage::Static).unwrap();
    r.set_element_array(6usize, BufferUsage::Dynamic).unwrap();
    assert_eq!(r.device().live_buffer_count(), before + 1);

    r.destroy_element_array();
    assert_eq!(r.device().live_buffer_count(), before);
}

// ── uniforms ─────────────────────────────────────────────────────────────────

#[test]
fn uniform_values_round_trip() {
    let mut r = build(RendererConfig::new().with_fragment(UNIFORMS_FS));

    let mut m = [0.0f32; 16];
    for (i, v) in m.iter_mut().enumerate() {
        *v = i as f32;
    }

    r.set_uniform("u_F", 0.5f32).unwrap();
    r.set_uniform("u_V2", [1.0f32, 2.0]).unwrap();
    r.set_uniform("u_V3", [1.0f32, 2.0, 3.0]).unwrap();
    r.set_uniform("u_V4", [1.0f32, 2.0, 3.0, 4.0]).unwrap();
    r.set_uniform("u_I", 7i32).unwrap();
    r.set_uniform("u_B", true).unwrap();
    r.set_uniform("u_M", m).unwrap();

    assert_eq!(r.get_uniform("u_F"), Some(UniformValue::Float(0.5)));
    assert_eq!(r.get_uniform("u_V2"), Some(UniformValue::Vec2([1.0, 2.0])));
    assert_eq!(r.get_uniform("u_V3"), Some(UniformValue::Vec3([1.0, 2.0, 3.0])));
    assert_eq!(r.get_uniform("u_V4"), Some(UniformValue::Vec4([1.0, 2.0, 3.0, 4.0])));
    assert_eq!(r.get_uniform("u_I"), Some(UniformValue::Int(7)));
    assert_eq!(r.get_uniform("u_B"), Some(UniformValue::Bool(true)));
    assert_eq!(r.get_uniform("u_M"), Some(UniformValue::Mat4(m)));
    assert_eq!(r.device().take_error(), glow::NO_ERROR);
}

#[test]
fn uniforms_start_zeroed() {
    let r = build(RendererConfig::new().with_fragment(UNIFORMS_FS));
    assert_eq!(r.get_uniform("u_F"), Some(UniformValue::Float(0.0)));
    assert_eq!(r.get_uniform("u_B"), Some(UniformValue::Bool(false)));
}

#[test]
fn short_uniform_value_is_rejected() {
    let mut r = build(RendererConfig::new().with_fragment(UNIFORMS_FS));
    let err = r.set_uniform("u_V3", [1.0f32, 2.0]).unwrap_err();
    assert!(matches!(
        err,
        RenderError::UniformValueLength { ref name, expected: 3, got: 2 } if name == "u_V3"
    ));
    assert_eq!(r.get_uniform("u_V3"), Some(UniformValue::Vec3([0.0; 3])));
}

#[test]
fn sampler_uniform_has_no_upload() {
    let fs = "#version 100\nprecision mediump float;\nuniform sampler2D u_Tex;\n\
              void main() { gl_FragColor = texture2D(u_Tex, vec2(0.5)); }\n";
    let mut r = build(RendererConfig::new().with_fragment(fs));
    assert!(r.has_uniform("u_Tex"));

    let err = r.set_uniform("u_Tex", 3i32).unwrap_err();
    assert!(matches!(
        err,
        RenderError::UnknownUniformType { ref name, tag } if name == "u_Tex" && tag == glow::SAMPLER_2D
    ));

    assert_eq!(r.get_uniform("u_Tex"), Some(UniformValue::Int(0)));
    assert_eq!(r.device().current_program(), Some(r.program()));
    assert_eq!(r.device().take_error(), glow::NO_ERROR);
}

#[test]
fn unknown_names_are_no_ops() {
    let mut r = build(RendererConfig::new().with_raster(true));

    assert!(r.set_uniform("u_Missing", 1.0f32).is_ok());
    assert_eq!(r.get_uniform("u_Missing"), None);
    assert!(!r.has_uniform("u_Missing"));

    r.set_vertex_buffer_attrib("vertices", "a_Missing", AttribBinding::new(2));
    r.set_vertex_buffer_attrib("missing", "a_VertPos", AttribBinding::new(3));
    assert_eq!(r.element_count(), 6);
    assert_eq!(r.attribute_bound_buffer("a_VertPos"), Some("vertices"));

    r.set_attribute_array_enabled("a_Missing", true);
    assert_eq!(r.attribute_location("a_Missing"), None);
    assert_eq!(r.is_attribute_array_enabled("a_Missing"), None);
    assert_eq!(r.current_attribute_value("a_Missing"), None);
    assert_eq!(r.device().take_error(), glow::NO_ERROR);
}

// ── attributes ───────────────────────────────────────────────────────────────

#[test]
fn attribute_binding_is_queryable() {
    let mut r = build(RendererConfig::new().with_vertex(MESH_VS).with_fragment(MESH_FS));

    let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    r.set_vertex_buffer("positions", &positions, BufferUsage::Static).unwrap();
    r.set_vertex_buffer_attrib("positions", "a_Pos", AttribBinding::new(3));

    assert_eq!(r.element_count(), 3);
    assert_eq!(r.is_attribute_array_enabled("a_Pos"), Some(true));
    assert_eq!(r.attribute_bound_buffer("a_Pos"), Some("positions"));
    assert_eq!(r.attribute_component_count("a_Pos"), Some(3));
    assert_eq!(r.attribute_array_format("a_Pos"), Some(glow::FLOAT));
    assert_eq!(r.is_attribute_array_normalized("a_Pos"), Some(false));
    assert_eq!(r.attribute_array_stride("a_Pos"), Some(0));
    assert_eq!(r.attribute_offset("a_Pos"), Some(0));

    // Unfed slot keeps its constant value.
    assert_eq!(r.is_attribute_array_enabled("a_Color"), Some(false));
    assert_eq!(r.attribute_bound_buffer("a_Color"), None);
    assert_eq!(r.current_attribute_value("a_Color"), Some([0.0, 0.0, 0.0, 1.0]));
}

#[test]
fn interleaved_binding_converts_stride_and_offset_to_bytes() {
    let mut r = build(RendererConfig::new().with_vertex(MESH_VS).with_fragment(MESH_FS));

    let interleaved = [0.0f32; 12];
    r.set_vertex_buffer("mesh", &interleaved, BufferUsage::Static).unwrap();
    r.set_vertex_buffer_attrib("mesh", "a_Pos", AttribBinding::new(3).stride(6).offset(3));

    assert_eq!(r.element_count(), 2);
    assert_eq!(r.attribute_array_stride("a_Pos"), Some(24));
    assert_eq!(r.attribute_offset("a_Pos"), Some(12));
}

#[test]
fn rebinding_a_slot_moves_it_to_the_new_buffer() {
    let mut r = build(RendererConfig::new().with_vertex(MESH_VS).with_fragment(MESH_FS));

    r.set_vertex_buffer("a", &[0.0f32; 9], BufferUsage::Static).unwrap();
    r.set_vertex_buffer("b", &[0.0f32; 12], BufferUsage::Dynamic).unwrap();
    r.set_vertex_buffer_attrib("a", "a_Pos", AttribBinding::new(3));
    r.set_vertex_buffer_attrib("b", "a_Pos", AttribBinding::new(3));

    assert_eq!(r.attribute_bound_buffer("a_Pos"), Some("b"));
    assert_eq!(r.element_count(), 4);

    r.set_attribute_array_enabled("a_Pos", false);
    assert_eq!(r.is_attribute_array_enabled("a_Pos"), Some(false));
}

#[test]
fn attribute_bindings_pin_slots() {
    let r = build(
        RendererConfig::new()
            .with_vertex(MESH_VS)
            .with_fragment(MESH_FS)
            .with_attribute_binding("a_Color", 0)
            .with_attribute_binding("a_Pos", 3),
    );
    assert_eq!(r.attribute_location("a_Color"), Some(0));
    assert_eq!(r.attribute_location("a_Pos"), Some(3));
    assert_eq!(
        r.describe_attributes(),
        "attribute: { name: a_Color, loc: 0, type: float-vec4, size: 1 }\n\
         attribute: { name: a_Pos, loc: 3, type: float-vec3, size: 1 }"
    );
}

#[test]
fn empty_program_reflects_nothing() {
    let vs = "#version 100\nvoid main() { gl_Position = vec4(0.0); }\n";
    let r = build(RendererConfig::new().with_vertex(vs));

    assert_eq!(r.describe_attributes(), "");
    assert_eq!(r.describe_uniforms(), "");
    assert_eq!(r.element_count(), 0);
    assert!(!r.has_attribute("a_VertPos"));
    assert_eq!(r.attribute_location("a_VertPos"), None);
    assert!(!r.has_uniform("u_Time"));
    assert_eq!(r.get_uniform("u_Time"), None);
}

// ── construction failures ────────────────────────────────────────────────────

#[test]
fn invalid_fragment_shader_reports_compile_error() {
    let fs = "#version 100\nprecision mediump float;\nuniform vec5 u_X;\n\
              void main() { gl_FragColor = vec4(0.0); }\n";
    let mut provider = HeadlessProvider::new();
    let err = HeadlessRenderer::new(&mut provider, RendererConfig::new().with_fragment(fs))
        .err()
        .expect("build fails");

    match err {
        RenderError::ShaderCompile { stage, log } => {
            assert_eq!(stage, ShaderStage::Fragment);
            assert!(log.contains("vec5"), "log: {log}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn location_past_the_slot_range_fails_to_link() {
    let vs = "#version 300 es\nlayout(location = 4294967295) in vec4 a_P;\n\
              void main() { gl_Position = a_P; }\n";
    let mut provider = HeadlessProvider::new();
    let err = HeadlessRenderer::new(
        &mut provider,
        RendererConfig::new().with_glsl_version(GlslVersion::Es300).with_vertex(vs),
    )
    .err()
    .expect("link fails");

    match err {
        RenderError::ProgramLink { log } => assert!(log.contains("a_P"), "log: {log}"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn attribute_binding_past_the_slot_range_is_ignored() {
    let r = build(
        RendererConfig::new()
            .with_vertex(MESH_VS)
            .with_fragment(MESH_FS)
            .with_attribute_binding("a_Pos", u32::MAX),
    );
    assert_eq!(r.device().take_error(), glow::INVALID_VALUE);
    assert!(r.attribute_location("a_Pos").is_some_and(|loc| loc < 16));
}

#[test]
fn oversized_array_fails_to_compile() {
    let vs = "#version 100\nattribute vec2 a_VertPos;\nuniform vec4 u_Huge[4294967295];\n\
              void main() { gl_Position = vec4(a_VertPos, 0.0, 1.0) + u_Huge[0]; }\n";
    let mut provider = HeadlessProvider::new();
    let err = HeadlessRenderer::new(&mut provider, RendererConfig::new().with_vertex(vs))
        .err()
        .expect("compile fails");
    assert!(matches!(err, RenderError::ShaderCompile { stage: ShaderStage::Vertex, .. }));
}

#[test]
fn requested_version_is_never_downgraded() {
    let mut provider = HeadlessProvider::with_identifiers(&["webgl"]);
    let err = HeadlessRenderer::new(
        &mut provider,
        RendererConfig::new().with_version(ContextVersion::WebGl2),
    )
    .err()
    .expect("no version 2 context");
    assert!(matches!(
        err,
        RenderError::UnsupportedContext { version: Some(ContextVersion::WebGl2) }
    ));
}

#[test]
fn unspecified_version_falls_back_but_300_es_sources_do_not() {
    let mut provider = HeadlessProvider::with_identifiers(&["experimental-webgl"]);
    let r = HeadlessRenderer::new(&mut provider, RendererConfig::new()).unwrap();
    assert_eq!(r.device().version(), ContextVersion::WebGl1);

    let mut provider = HeadlessProvider::with_identifiers(&["webgl"]);
    let err = HeadlessRenderer::new(
        &mut provider,
        RendererConfig::new().with_glsl_version(GlslVersion::Es300),
    )
    .err()
    .expect("300 es needs version 2");
    assert!(matches!(err, RenderError::ShaderCompile { stage: ShaderStage::Vertex, .. }));
}

#[test]
fn context_attributes_are_defaults_plus_overrides() {
    let attributes = ContextAttributes::default().with_alpha(true).with_stencil(true);
    let r = build(RendererConfig::new().with_attributes(attributes));

    let got = *r.device().attributes();
    assert!(got.alpha);
    assert!(got.stencil);
    assert!(got.depth);
    assert!(got.fail_if_major_performance_caveat);
    assert!(!got.antialias);
    assert!(!got.premultiplied_alpha);
    assert!(!got.preserve_drawing_buffer);
}

// ── surface lifecycle ────────────────────────────────────────────────────────

#[test]
fn set_dimensions_is_idempotent() {
    let mut r = build(RendererConfig::new());

    r.set_dimensions(320.0, 200.0);
    let first = (r.dimensions(), r.viewport(), r.device().framebuffer());
    r.set_dimensions(320.0, 200.0);
    let second = (r.dimensions(), r.viewport(), r.device().framebuffer());

    assert_eq!(first, second);
    assert_eq!(first.0, [320, 200]);
}

#[test]
fn set_viewport_does_not_resize_the_surface() {
    let mut r = build(RendererConfig::new().with_size(100, 100));
    r.set_viewport(10, 10, 50, 50);
    assert_eq!(r.viewport(), [10, 10, 50, 50]);
    assert_eq!(r.dimensions(), [100, 100]);
}

#[test]
fn supplied_surface_size_is_the_fallback() {
    let mut provider = HeadlessProvider::new();
    let r = HeadlessRenderer::with_surface(
        &mut provider,
        HeadlessSurface::new(123, 45),
        RendererConfig::new(),
    )
    .unwrap();
    assert_eq!(r.dimensions(), [123, 45]);
    assert_eq!(provider.surfaces_created(), 0);
}

#[test]
fn attach_and_dispose_hand_back_the_surface() {
    let mut provider = HeadlessProvider::new().with_default_size(80, 60);
    let mut r = HeadlessRenderer::new(&mut provider, RendererConfig::new().with_raster(true))
        .unwrap();
    assert_eq!(provider.surfaces_created(), 1);
    assert!(!r.surface().is_attached());

    r.attach_surface();
    let surface = r.dispose();
    assert!(surface.is_attached());
    assert_eq!(surface.size(), (80, 60));
}
