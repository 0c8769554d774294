use log::info;
use reflex_engine::device::Device;
use reflex_engine::logging::{LoggingConfig, init_logging};
use reflex_engine::window::{App, AppControl, NativeRenderer, Runtime, RuntimeConfig};
use reflex_engine::{RendererConfig, UniformValue};
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{Key, NamedKey};

const PLASMA_FRAGMENT: &str = r#"#version 100
precision mediump float;

uniform vec2 u_Dimensions;
uniform float u_Time;
uniform vec3 u_Tint;

void main() {
    vec2 uv = gl_FragCoord.xy / u_Dimensions;
    float v = sin(uv.x * 10.0 + u_Time)
            + sin((uv.y * 10.0 + u_Time) * 0.5)
            + sin((uv.x * 10.0 + uv.y * 10.0 + u_Time) * 0.5);
    vec3 color = 0.5 + 0.5 * cos(v + vec3(0.0, 2.0, 4.0));
    gl_FragColor = vec4(color * u_Tint, 1.0);
}
"#;

const TINTS: [[f32; 3]; 3] = [[1.0, 1.0, 1.0], [1.0, 0.6, 0.4], [0.4, 0.8, 1.0]];

struct Plasma {
    tint: usize,
    tint_dirty: bool,
    frames: u64,
}

impl App for Plasma {
    fn renderer_config(&self) -> RendererConfig {
        RendererConfig::new()
            .with_id("plasma")
            .with_fragment(PLASMA_FRAGMENT)
            .with_raster(true)
    }

    fn init(&mut self, renderer: &mut NativeRenderer) -> anyhow::Result<()> {
        info!("{} context acquired", renderer.device().version());
        info!("reflected attributes:\n{}", renderer.describe_attributes());
        info!("reflected uniforms:\n{}", renderer.describe_uniforms());
        renderer.set_uniform("u_Tint", TINTS[self.tint])?;
        Ok(())
    }

    fn on_window_event(&mut self, event: &WindowEvent) -> AppControl {
        let WindowEvent::KeyboardInput { event, .. } = event else {
            return AppControl::Continue;
        };
        if event.state != ElementState::Pressed {
            return AppControl::Continue;
        }

        match &event.logical_key {
            Key::Named(NamedKey::Escape) => AppControl::Exit,
            Key::Named(NamedKey::Space) => {
                self.tint = (self.tint + 1) % TINTS.len();
                self.tint_dirty = true;
                AppControl::Continue
            }
            _ => AppControl::Continue,
        }
    }

    fn on_frame(&mut self, renderer: &mut NativeRenderer) -> AppControl {
        if self.tint_dirty {
            if let Err(e) = renderer.set_uniform("u_Tint", TINTS[self.tint]) {
                log::warn!("tint not applied: {e}");
            }
            self.tint_dirty = false;
        }

        self.frames += 1;
        if self.frames % 600 == 0 {
            if let Some(UniformValue::Float(t)) = renderer.get_uniform("u_Time") {
                info!("frame {} at t={t:.2}s", self.frames);
            }
        }
        AppControl::Continue
    }
}

fn main() -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());

    let config = RuntimeConfig::default().with_title("Reflex Studio").with_size(960.0, 540.0);
    Runtime::run(config, Plasma { tint: 0, tint_dirty: false, frames: 0 })
}
