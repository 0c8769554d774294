use std::ffi::CStr;
use std::num::NonZeroU32;

use anyhow::{Context, Result};
use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, PossiblyCurrentContext, Version};
use glutin::display::{Display, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{SurfaceAttributesBuilder, WindowSurface};
use log::{debug, warn};
use raw_window_handle::{HasDisplayHandle, HasWindowHandle};
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::Window;

use crate::device::{
    ContextAttributes, ContextProvider, ContextVersion, GlowDevice, Presenter, Surface,
};
use crate::error::RenderError;
use crate::renderer::Renderer;

use super::RuntimeConfig;

/// Renderer hosted in a native window.
pub type NativeRenderer = Renderer<GlowDevice, NativeSurface>;

// ── surface ──────────────────────────────────────────────────────────────────

/// A `winit` window used as a drawing surface.
///
/// Created hidden; `attach` shows it.
pub struct NativeSurface {
    window: Window,
    attached: bool,
}

impl NativeSurface {
    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Surface for NativeSurface {
    fn size(&self) -> (u32, u32) {
        self.window.inner_size().into()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        if self.size() == (width, height) {
            return;
        }
        // The platform may apply the size later and report it via `Resized`.
        let _ = self.window.request_inner_size(PhysicalSize::new(width, height));
    }

    fn attach(&mut self) {
        self.window.set_visible(true);
        self.attached = true;
    }
}

// ── presentation ─────────────────────────────────────────────────────────────

/// Swaps and resizes the `glutin` window surface.
struct GlutinPresenter {
    surface: glutin::surface::Surface<WindowSurface>,
    context: PossiblyCurrentContext,
}

impl Presenter for GlutinPresenter {
    fn resize(&self, width: u32, height: u32) {
        self.surface.resize(&self.context, non_zero(width), non_zero(height));
    }

    fn present(&self) {
        if let Err(e) = self.surface.swap_buffers(&self.context) {
            warn!("swap_buffers failed: {e}");
        }
    }
}

fn non_zero(v: u32) -> NonZeroU32 {
    NonZeroU32::new(v).unwrap_or(NonZeroU32::MIN)
}

// ── provider ─────────────────────────────────────────────────────────────────

/// Creates windows and OpenGL ES contexts on the active event loop.
///
/// Version 1 identifiers map to an ES 2.0 context, version 2 identifiers to
/// ES 3.0.
pub struct NativeProvider<'a> {
    event_loop: &'a ActiveEventLoop,
    config: &'a RuntimeConfig,
}

impl<'a> NativeProvider<'a> {
    pub fn new(event_loop: &'a ActiveEventLoop, config: &'a RuntimeConfig) -> Self {
        Self { event_loop, config }
    }
}

impl ContextProvider for NativeProvider<'_> {
    type Surface = NativeSurface;
    type Device = GlowDevice;

    fn create_surface(&mut self) -> crate::error::Result<NativeSurface> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_visible(false);

        let window = self
            .event_loop
            .create_window(attrs)
            .map_err(|e| RenderError::ResourceCreation { what: "window", message: e.to_string() })?;

        Ok(NativeSurface { window, attached: false })
    }

    fn default_surface_size(&self) -> (u32, u32) {
        let size = self.config.initial_size;
        (size.width.round() as u32, size.height.round() as u32)
    }

    fn get_context(
        &mut self,
        surface: &mut NativeSurface,
        identifier: &str,
        attributes: &ContextAttributes,
    ) -> Option<GlowDevice> {
        let version = ContextVersion::from_identifier(identifier)?;
        match create_gl_context(&surface.window, version, attributes) {
            Ok(device) => Some(device),
            Err(e) => {
                debug!("'{identifier}' context creation failed: {e:#}");
                None
            }
        }
    }

    fn is_supported_identifier(&self, identifier: &str) -> bool {
        ContextVersion::from_identifier(identifier).is_some()
    }
}

fn display_preference() -> DisplayApiPreference {
    #[cfg(target_os = "windows")]
    {
        DisplayApiPreference::Wgl(None)
    }
    #[cfg(target_os = "macos")]
    {
        DisplayApiPreference::Cgl
    }
    #[cfg(all(unix, not(target_os = "macos")))]
    {
        DisplayApiPreference::Egl
    }
}

fn create_gl_context(
    window: &Window,
    version: ContextVersion,
    attributes: &ContextAttributes,
) -> Result<GlowDevice> {
    let display_handle = window.display_handle().context("no display handle")?.as_raw();
    let display = unsafe { Display::new(display_handle, display_preference()) }
        .context("failed to open GL display")?;

    let mut template = ConfigTemplateBuilder::new()
        .with_alpha_size(if attributes.alpha { 8 } else { 0 })
        .with_depth_size(if attributes.depth { 24 } else { 0 })
        .with_stencil_size(if attributes.stencil { 8 } else { 0 })
        .with_transparency(attributes.alpha);
    if attributes.antialias {
        template = template.with_multisampling(4);
    }
    if attributes.fail_if_major_performance_caveat {
        template = template.prefer_hardware_accelerated(Some(true));
    }

    let config = unsafe { display.find_configs(template.build()) }
        .context("failed to query GL configs")?
        .next()
        .context("no GL config matches the requested attributes")?;

    let (width, height): (u32, u32) = window.inner_size().into();
    let raw_window_handle = window.window_handle().context("no window handle")?.as_raw();
    let surface_attributes = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window_handle,
        non_zero(width),
        non_zero(height),
    );
    let gl_surface = unsafe { display.create_window_surface(&config, &surface_attributes) }
        .context("failed to create window surface")?;

    let major = match version {
        ContextVersion::WebGl1 => 2,
        ContextVersion::WebGl2 => 3,
    };
    let context_attributes = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(Version::new(major, 0))))
        .build(Some(raw_window_handle));
    let context = unsafe { display.create_context(&config, &context_attributes) }
        .context("failed to create GL context")?
        .make_current(&gl_surface)
        .context("failed to make GL context current")?;

    let gl = unsafe {
        glow::Context::from_loader_function_cstr(|s: &CStr| display.get_proc_address(s))
    };

    let presenter = GlutinPresenter { surface: gl_surface, context };
    Ok(GlowDevice::new(gl, version, *attributes).with_presenter(presenter))
}
