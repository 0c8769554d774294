use std::fmt;

use crate::error::{RenderError, Result};

use super::{Device, Surface};

/// Identifiers tried, in order, for a version 1 context.
pub const WEBGL1_IDENTIFIERS: [&str; 3] = ["experimental-webgl", "webgl", "webkit-3d"];

/// Identifiers tried, in order, for a version 2 context.
pub const WEBGL2_IDENTIFIERS: [&str; 2] = ["experimental-webgl2", "webgl2"];

/// Major API version of a device context.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ContextVersion {
    WebGl1,
    WebGl2,
}

impl ContextVersion {
    /// Maps `1` and `2` to a version; anything else is unspecified.
    pub const fn from_major(major: u8) -> Option<Self> {
        match major {
            1 => Some(Self::WebGl1),
            2 => Some(Self::WebGl2),
            _ => None,
        }
    }

    #[inline]
    pub const fn major(self) -> u8 {
        match self {
            Self::WebGl1 => 1,
            Self::WebGl2 => 2,
        }
    }

    /// Equivalent identifier strings for this version, in probe order.
    pub const fn identifiers(self) -> &'static [&'static str] {
        match self {
            Self::WebGl1 => &WEBGL1_IDENTIFIERS,
            Self::WebGl2 => &WEBGL2_IDENTIFIERS,
        }
    }

    /// Resolves a known identifier string back to its version.
    pub fn from_identifier(identifier: &str) -> Option<Self> {
        if WEBGL2_IDENTIFIERS.contains(&identifier) {
            Some(Self::WebGl2)
        } else if WEBGL1_IDENTIFIERS.contains(&identifier) {
            Some(Self::WebGl1)
        } else {
            None
        }
    }
}

impl fmt::Display for ContextVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::WebGl1 => "WebGL",
            Self::WebGl2 => "WebGL2",
        })
    }
}

/// Capability flags requested when a context is created.
///
/// Defaults: no alpha channel, no anti-aliasing, a depth buffer of at least
/// 16 bits, fail on a major performance caveat, no premultiplied alpha, the
/// drawing buffer is cleared after presentation, no stencil buffer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ContextAttributes {
    pub alpha: bool,
    pub antialias: bool,
    pub depth: bool,
    pub fail_if_major_performance_caveat: bool,
    pub premultiplied_alpha: bool,
    pub preserve_drawing_buffer: bool,
    /// Stencil buffer of at least 8 bits.
    pub stencil: bool,
}

impl Default for ContextAttributes {
    fn default() -> Self {
        Self {
            alpha: false,
            antialias: false,
            depth: true,
            fail_if_major_performance_caveat: true,
            premultiplied_alpha: false,
            preserve_drawing_buffer: false,
            stencil: false,
        }
    }
}

impl ContextAttributes {
    pub fn with_alpha(mut self, on: bool) -> Self {
        self.alpha = on;
        self
    }

    pub fn with_antialias(mut self, on: bool) -> Self {
        self.antialias = on;
        self
    }

    pub fn with_depth(mut self, on: bool) -> Self {
        self.depth = on;
        self
    }

    pub fn with_fail_if_major_performance_caveat(mut self, on: bool) -> Self {
        self.fail_if_major_performance_caveat = on;
        self
    }

    pub fn with_premultiplied_alpha(mut self, on: bool) -> Self {
        self.premultiplied_alpha = on;
        self
    }

    pub fn with_preserve_drawing_buffer(mut self, on: bool) -> Self {
        self.preserve_drawing_buffer = on;
        self
    }

    pub fn with_stencil(mut self, on: bool) -> Self {
        self.stencil = on;
        self
    }
}

/// Host collaborator that creates surfaces and device contexts.
pub trait ContextProvider {
    type Surface: Surface;
    type Device: Device;

    /// Creates a fresh, unattached surface.
    fn create_surface(&mut self) -> Result<Self::Surface>;

    /// Size used for a surface when neither the caller nor the config gives one.
    fn default_surface_size(&self) -> (u32, u32);

    /// Attempts to create a context for one identifier string.
    fn get_context(
        &mut self,
        surface: &mut Self::Surface,
        identifier: &str,
        attributes: &ContextAttributes,
    ) -> Option<Self::Device>;

    /// Whether the host knows how to create a context for `identifier`.
    fn is_supported_identifier(&self, identifier: &str) -> bool;

    fn supports_version(&self, version: ContextVersion) -> bool {
        version
            .identifiers()
            .iter()
            .any(|id| self.is_supported_identifier(id))
    }
}

/// Obtains a device context for `surface`.
///
/// A requested version is never downgraded. With no version, version 2 is
/// tried first and version 1 second. Within a version each equivalent
/// identifier is tried in order; the first valid handle wins.
pub fn acquire_context<P: ContextProvider>(
    provider: &mut P,
    surface: &mut P::Surface,
    version: Option<ContextVersion>,
    attributes: &ContextAttributes,
) -> Result<P::Device> {
    let candidates: &[ContextVersion] = match version {
        Some(ContextVersion::WebGl1) => &[ContextVersion::WebGl1],
        Some(ContextVersion::WebGl2) => &[ContextVersion::WebGl2],
        None => &[ContextVersion::WebGl2, ContextVersion::WebGl1],
    };

    for candidate in candidates {
        for identifier in candidate.identifiers() {
            if let Some(device) = provider.get_context(surface, identifier, attributes) {
                log::info!("acquired {candidate} context via '{identifier}'");
                return Ok(device);
            }
            log::debug!("context identifier '{identifier}' unavailable");
        }
    }

    Err(RenderError::UnsupportedContext { version })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessProvider;

    fn acquire(provider: &mut HeadlessProvider, version: Option<ContextVersion>) -> Result<ContextVersion> {
        let mut surface = provider.create_surface()?;
        acquire_context(provider, &mut surface, version, &ContextAttributes::default())
            .map(|d| d.version())
    }

    // ── version resolution ────────────────────────────────────────────────

    #[test]
    fn unspecified_version_prefers_webgl2() {
        let mut p = HeadlessProvider::new();
        assert_eq!(acquire(&mut p, None).unwrap(), ContextVersion::WebGl2);
    }

    #[test]
    fn unspecified_version_falls_back_to_webgl1() {
        let mut p = HeadlessProvider::with_identifiers(&["webgl"]);
        assert_eq!(acquire(&mut p, None).unwrap(), ContextVersion::WebGl1);
    }

    #[test]
    fn requested_webgl2_never_downgrades() {
        let mut p = HeadlessProvider::with_identifiers(&["experimental-webgl", "webgl"]);
        let err = acquire(&mut p, Some(ContextVersion::WebGl2)).unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnsupportedContext { version: Some(ContextVersion::WebGl2) }
        ));
    }

    #[test]
    fn requested_webgl1_ignores_webgl2_support() {
        let mut p = HeadlessProvider::new();
        assert_eq!(acquire(&mut p, Some(ContextVersion::WebGl1)).unwrap(), ContextVersion::WebGl1);
    }

    #[test]
    fn later_equivalent_identifier_is_accepted() {
        // Only the last identifier of the version 1 list works.
        let mut p = HeadlessProvider::with_identifiers(&["webkit-3d"]);
        assert_eq!(acquire(&mut p, Some(ContextVersion::WebGl1)).unwrap(), ContextVersion::WebGl1);
    }

    #[test]
    fn no_identifiers_is_unsupported() {
        let mut p = HeadlessProvider::with_identifiers(&[]);
        assert!(matches!(
            acquire(&mut p, None).unwrap_err(),
            RenderError::UnsupportedContext { version: None }
        ));
    }

    // ── attributes ────────────────────────────────────────────────────────

    #[test]
    fn attributes_are_defaults_overridden_by_setters() {
        let mut p = HeadlessProvider::new();
        let mut surface = p.create_surface().unwrap();
        let requested = ContextAttributes::default().with_alpha(true).with_stencil(true);
        let device = acquire_context(&mut p, &mut surface, None, &requested).unwrap();

        let got = *device.attributes();
        assert!(got.alpha);
        assert!(got.stencil);
        assert!(!got.antialias);
        assert!(got.depth);
        assert!(got.fail_if_major_performance_caveat);
        assert!(!got.premultiplied_alpha);
        assert!(!got.preserve_drawing_buffer);
    }

    // ── identifiers ───────────────────────────────────────────────────────

    #[test]
    fn identifier_maps_back_to_version() {
        assert_eq!(ContextVersion::from_identifier("webgl2"), Some(ContextVersion::WebGl2));
        assert_eq!(ContextVersion::from_identifier("webkit-3d"), Some(ContextVersion::WebGl1));
        assert_eq!(ContextVersion::from_identifier("2d"), None);
    }

    #[test]
    fn supports_version_follows_identifier_support() {
        let p = HeadlessProvider::with_identifiers(&["webgl"]);
        assert!(p.supports_version(ContextVersion::WebGl1));
        assert!(!p.supports_version(ContextVersion::WebGl2));
    }

    #[test]
    fn from_major_rejects_other_numbers() {
        assert_eq!(ContextVersion::from_major(2), Some(ContextVersion::WebGl2));
        assert_eq!(ContextVersion::from_major(3), None);
    }
}
