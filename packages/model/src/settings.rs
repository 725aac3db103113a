//! Layout, responsive and animation settings attached to every section.

use crate::device::Device;
use serde::{Deserialize, Serialize};

fn default_true() -> bool {
    true
}

/// Box spacing in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Spacing {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Spacing {
    pub fn uniform(value: u32) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    pub fn symmetric(vertical: u32, horizontal: u32) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// CSS shorthand, e.g. `64px 24px 64px 24px`
    pub fn to_css(&self) -> String {
        format!(
            "{}px {}px {}px {}px",
            self.top, self.right, self.bottom, self.left
        )
    }
}

/// Section background
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Background {
    #[default]
    None,
    Color {
        value: String,
    },
    Gradient {
        from: String,
        to: String,
        #[serde(default)]
        angle: u16,
    },
    Image {
        url: String,
        /// Dark overlay strength, 0..=100
        #[serde(default)]
        overlay_opacity: u8,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// Overrides for a single breakpoint. `None` means "inherit".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakpointSettings {
    #[serde(default = "default_true")]
    pub visible: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding: Option<Spacing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub margin: Option<Spacing>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,

    /// Grid columns for item-based sections
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u8>,

    /// Font scale in percent of the base size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_scale: Option<u16>,
}

impl Default for BreakpointSettings {
    fn default() -> Self {
        Self {
            visible: true,
            padding: None,
            margin: None,
            text_align: None,
            columns: None,
            font_scale: None,
        }
    }
}

impl BreakpointSettings {
    /// Fill every unset field from `parent`. Visibility is never inherited.
    pub fn inherit(&self, parent: &BreakpointSettings) -> BreakpointSettings {
        BreakpointSettings {
            visible: self.visible,
            padding: self.padding.or(parent.padding),
            margin: self.margin.or(parent.margin),
            text_align: self.text_align.or(parent.text_align),
            columns: self.columns.or(parent.columns),
            font_scale: self.font_scale.or(parent.font_scale),
        }
    }

    /// True when nothing but the default visibility is set
    pub fn is_empty(&self) -> bool {
        *self == BreakpointSettings::default()
    }
}

/// Per-device overrides. Tablet layers on desktop, mobile on tablet.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponsiveSettings {
    #[serde(default)]
    pub desktop: BreakpointSettings,
    #[serde(default)]
    pub tablet: BreakpointSettings,
    #[serde(default)]
    pub mobile: BreakpointSettings,
}

impl ResponsiveSettings {
    pub fn for_device(&self, device: Device) -> &BreakpointSettings {
        match device {
            Device::Desktop => &self.desktop,
            Device::Tablet => &self.tablet,
            Device::Mobile => &self.mobile,
        }
    }

    pub fn for_device_mut(&mut self, device: Device) -> &mut BreakpointSettings {
        match device {
            Device::Desktop => &mut self.desktop,
            Device::Tablet => &mut self.tablet,
            Device::Mobile => &mut self.mobile,
        }
    }

    /// Effective settings for `device` after cascading from larger breakpoints
    pub fn resolve(&self, device: Device) -> BreakpointSettings {
        let own = self.for_device(device);
        match device.parent() {
            Some(parent) => own.inherit(&self.resolve(parent)),
            None => own.clone(),
        }
    }

    pub fn visible_on(&self, device: Device) -> bool {
        self.for_device(device).visible
    }

    pub fn is_hidden_everywhere(&self) -> bool {
        Device::ALL.iter().all(|d| !self.visible_on(*d))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnimationKind {
    #[default]
    None,
    FadeIn,
    SlideUp,
    SlideDown,
    SlideLeft,
    SlideRight,
    ZoomIn,
    Bounce,
}

impl AnimationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationKind::None => "none",
            AnimationKind::FadeIn => "fade-in",
            AnimationKind::SlideUp => "slide-up",
            AnimationKind::SlideDown => "slide-down",
            AnimationKind::SlideLeft => "slide-left",
            AnimationKind::SlideRight => "slide-right",
            AnimationKind::ZoomIn => "zoom-in",
            AnimationKind::Bounce => "bounce",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

impl Easing {
    pub fn as_css(&self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// Entrance animation for a section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnimationSettings {
    #[serde(default)]
    pub kind: AnimationKind,
    #[serde(default = "default_duration")]
    pub duration_ms: u32,
    #[serde(default)]
    pub delay_ms: u32,
    #[serde(default)]
    pub easing: Easing,
    /// Play only the first time the section scrolls into view
    #[serde(default = "default_true")]
    pub once: bool,
}

fn default_duration() -> u32 {
    600
}

impl Default for AnimationSettings {
    fn default() -> Self {
        Self {
            kind: AnimationKind::None,
            duration_ms: default_duration(),
            delay_ms: 0,
            easing: Easing::default(),
            once: true,
        }
    }
}

impl AnimationSettings {
    pub fn new(kind: AnimationKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.kind != AnimationKind::None
    }
}

/// Everything about a section that is not its content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSettings {
    #[serde(default)]
    pub background: Background,

    #[serde(default = "default_padding")]
    pub padding: Spacing,

    #[serde(default)]
    pub margin: Spacing,

    #[serde(default)]
    pub full_width: bool,

    /// In-page anchor (`#pricing`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anchor_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_class: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_css: Option<String>,

    #[serde(default)]
    pub responsive: ResponsiveSettings,

    #[serde(default)]
    pub animation: AnimationSettings,
}

fn default_padding() -> Spacing {
    Spacing::symmetric(64, 24)
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            background: Background::None,
            padding: default_padding(),
            margin: Spacing::default(),
            full_width: false,
            anchor_id: None,
            custom_class: None,
            custom_css: None,
            responsive: ResponsiveSettings::default(),
            animation: AnimationSettings::default(),
        }
    }
}

impl SectionSettings {
    /// Padding in effect on `device`: breakpoint override or section padding
    pub fn padding_for(&self, device: Device) -> Spacing {
        self.responsive
            .resolve(device)
            .padding
            .unwrap_or(self.padding)
    }

    pub fn margin_for(&self, device: Device) -> Spacing {
        self.responsive.resolve(device).margin.unwrap_or(self.margin)
    }
}
