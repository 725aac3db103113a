use pagecraft_common::CommonError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named viewport profile used for previews and responsive overrides
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl Device {
    pub const ALL: [Device; 3] = [Device::Desktop, Device::Tablet, Device::Mobile];

    /// Preview viewport width in CSS pixels
    pub fn viewport_width(&self) -> u32 {
        match self {
            Device::Desktop => 1440,
            Device::Tablet => 768,
            Device::Mobile => 375,
        }
    }

    /// Upper bound of the media query that activates this device's overrides.
    /// Desktop is the base layer and has none.
    pub fn media_max_width(&self) -> Option<u32> {
        match self {
            Device::Desktop => None,
            Device::Tablet => Some(1024),
            Device::Mobile => Some(640),
        }
    }

    /// The device whose settings this one inherits from
    pub fn parent(&self) -> Option<Device> {
        match self {
            Device::Desktop => None,
            Device::Tablet => Some(Device::Desktop),
            Device::Mobile => Some(Device::Tablet),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Tablet => "tablet",
            Device::Mobile => "mobile",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "desktop" => Ok(Device::Desktop),
            "tablet" => Ok(Device::Tablet),
            "mobile" => Ok(Device::Mobile),
            other => Err(CommonError::unknown("device", other)),
        }
    }
}
