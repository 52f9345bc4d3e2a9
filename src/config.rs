//! Encoder and renderer settings
//!
//! Every setting has a built-in default and can be overridden from the
//! environment (`QR_VERSION`, `QR_MODE`, `QR_MASK`, `QR_MODULE_PX`,
//! `QR_QUIET_ZONE`). Unparseable values fall back to the default.

use crate::models::{DataMode, MaskPattern, Version};

fn parse_env_u8(name: &str) -> Option<u8> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
}

fn parse_env_u32(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u32>().ok())
        .unwrap_or(default)
}

fn parse_env_str(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_ascii_lowercase())
        .filter(|v| !v.is_empty())
}

/// Parse a mode name as used by `QR_MODE` and the CLI
pub fn parse_mode(name: &str) -> Option<DataMode> {
    match name.trim().to_ascii_lowercase().as_str() {
        "numeric" => Some(DataMode::Numeric),
        "alphanumeric" | "alnum" => Some(DataMode::Alphanumeric),
        "byte" => Some(DataMode::Byte),
        _ => None,
    }
}

/// Overrides for the encoder's automatic choices
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Force a version instead of the smallest one that fits
    pub version: Option<Version>,
    /// Force a data mode instead of the most compact one
    pub mode: Option<DataMode>,
    /// Force a mask instead of the lowest-penalty one
    pub mask: Option<MaskPattern>,
}

impl EncodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_version(mut self, version: Version) -> Self {
        self.version = Some(version);
        self
    }

    pub fn with_mode(mut self, mode: DataMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_mask(mut self, mask: MaskPattern) -> Self {
        self.mask = Some(mask);
        self
    }

    /// Defaults overridden by `QR_VERSION`, `QR_MODE` and `QR_MASK`
    pub fn from_env() -> Self {
        let version = parse_env_u8("QR_VERSION").and_then(|n| Version::from_number(n).ok());
        let mode = parse_env_str("QR_MODE").and_then(|name| parse_mode(&name));
        let mask = parse_env_u8("QR_MASK").and_then(|id| MaskPattern::from_id(id).ok());
        Self {
            version,
            mode,
            mask,
        }
    }
}

/// Pixel geometry of rendered symbols
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Side of one module in pixels
    pub module_px: u32,
    /// Light border width in modules
    pub quiet_zone: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module_px: 10,
            quiet_zone: 4,
        }
    }
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_module_px(mut self, module_px: u32) -> Self {
        self.module_px = module_px.max(1);
        self
    }

    pub fn with_quiet_zone(mut self, quiet_zone: u32) -> Self {
        self.quiet_zone = quiet_zone;
        self
    }

    /// Defaults overridden by `QR_MODULE_PX` and `QR_QUIET_ZONE`
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            module_px: parse_env_u32("QR_MODULE_PX", defaults.module_px).max(1),
            quiet_zone: parse_env_u32("QR_QUIET_ZONE", defaults.quiet_zone),
        }
    }

    /// Side length in pixels of a rendered symbol of `size` modules
    pub fn image_side(&self, size: usize) -> u32 {
        (size as u32 + 2 * self.quiet_zone) * self.module_px
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("Numeric"), Some(DataMode::Numeric));
        assert_eq!(parse_mode(" alnum "), Some(DataMode::Alphanumeric));
        assert_eq!(parse_mode("byte"), Some(DataMode::Byte));
        assert_eq!(parse_mode("kanji"), None);
    }

    #[test]
    fn test_encode_options_builder() {
        let options = EncodeOptions::new()
            .with_version(Version::V2)
            .with_mask(MaskPattern::Pattern4);
        assert_eq!(options.version, Some(Version::V2));
        assert_eq!(options.mode, None);
        assert_eq!(options.mask, Some(MaskPattern::Pattern4));
    }

    #[test]
    fn test_render_options() {
        let options = RenderOptions::new().with_module_px(0).with_quiet_zone(2);
        assert_eq!(options.module_px, 1);
        assert_eq!(options.image_side(21), 25);
        assert_eq!(RenderOptions::default().image_side(21), 290);
    }

    #[test]
    fn test_from_env() {
        // Only this test touches these variables
        unsafe {
            std::env::set_var("QR_VERSION", "3");
            std::env::set_var("QR_MODE", "BYTE");
            std::env::set_var("QR_MASK", "9");
            std::env::set_var("QR_MODULE_PX", "4");
            std::env::set_var("QR_QUIET_ZONE", "x");
        }
        let encode = EncodeOptions::from_env();
        assert_eq!(encode.version, Some(Version::V3));
        assert_eq!(encode.mode, Some(DataMode::Byte));
        assert_eq!(encode.mask, None);

        let render = RenderOptions::from_env();
        assert_eq!(render.module_px, 4);
        assert_eq!(render.quiet_zone, 4);

        unsafe {
            for name in ["QR_VERSION", "QR_MODE", "QR_MASK", "QR_MODULE_PX", "QR_QUIET_ZONE"] {
                std::env::remove_var(name);
            }
        }
    }
}
