//! Section: one independently rendered area of the dashboard.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The five dashboard sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionId {
    Network,
    Proxmox,
    Services,
    Media,
    SmartHome,
}

impl SectionId {
    /// Every section, in display order.
    pub const ALL: [Self; 5] = [
        Self::Network,
        Self::Proxmox,
        Self::Services,
        Self::Media,
        Self::SmartHome,
    ];

    /// Stable id of the container element the section is rendered into.
    #[must_use]
    pub const fn container_id(self) -> &'static str {
        match self {
            Self::Network => "network-body",
            Self::Proxmox => "proxmox-body",
            Self::Services => "services-body",
            Self::Media => "media-body",
            Self::SmartHome => "smarthome-body",
        }
    }

    /// Short slug used in tab links (`?tab=…`).
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Proxmox => "proxmox",
            Self::Services => "services",
            Self::Media => "media",
            Self::SmartHome => "smarthome",
        }
    }

    /// Tab label.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Network => "Network",
            Self::Proxmox => "Proxmox",
            Self::Services => "Services",
            Self::Media => "Media",
            Self::SmartHome => "Smart Home",
        }
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Error returned when a tab slug does not name a section.
#[derive(Debug, thiserror::Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

impl FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.slug() == value)
            .ok_or_else(|| UnknownSection(value.to_string()))
    }
}
