use crate::device::{
    ContextAttributes, ContextProvider, ContextVersion, Surface, WEBGL1_IDENTIFIERS,
    WEBGL2_IDENTIFIERS,
};
use crate::error::Result;

use super::HeadlessDevice;

/// Off-screen surface: a size and an attached flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessSurface {
    width: u32,
    height: u32,
    attached: bool,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, attached: false }
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }
}

impl Default for HeadlessSurface {
    /// Same default size a fresh HTML canvas has.
    fn default() -> Self {
        Self::new(300, 150)
    }
}

impl Surface for HeadlessSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn attach(&mut self) {
        self.attached = true;
    }
}

/// Provider backed by [`HeadlessDevice`].
///
/// Answers every known identifier by default; restrict the set to emulate
/// hosts without version 2 (or any) support.
#[derive(Debug, Clone)]
pub struct HeadlessProvider {
    identifiers: Vec<String>,
    default_size: (u32, u32),
    surfaces_created: usize,
}

impl Default for HeadlessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessProvider {
    pub fn new() -> Self {
        let all: Vec<&str> = WEBGL2_IDENTIFIERS.iter().chain(WEBGL1_IDENTIFIERS.iter()).copied().collect();
        Self::with_identifiers(&all)
    }

    pub fn with_identifiers(identifiers: &[&str]) -> Self {
        Self {
            identifiers: identifiers.iter().map(|s| s.to_string()).collect(),
            default_size: (300, 150),
            surfaces_created: 0,
        }
    }

    pub fn with_default_size(mut self, width: u32, height: u32) -> Self {
        self.default_size = (width, height);
        self
    }

    /// Surfaces handed out by `create_surface` so far.
    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created
    }
}

impl ContextProvider for HeadlessProvider {
    type Surface = HeadlessSurface;
    type Device = HeadlessDevice;

    fn create_surface(&mut self) -> Result<HeadlessSurface> {
        self.surfaces_created += 1;
        let (w, h) = self.default_size;
        Ok(HeadlessSurface::new(w, h))
    }

    fn default_surface_size(&self) -> (u32, u32) {
        self.default_size
    }

    fn get_context(
        &mut self,
        surface: &mut HeadlessSurface,
        identifier: &str,
        attributes: &ContextAttributes,
    ) -> Option<HeadlessDevice> {
        if !self.is_supported_identifier(identifier) {
            return None;
        }
        let version = ContextVersion::from_identifier(identifier)?;
        Some(HeadlessDevice::new(version, *attributes, surface.size()))
    }

    fn is_supported_identifier(&self, identifier: &str) -> bool {
        self.identifiers.iter().any(|id| id == identifier)
    }
}
