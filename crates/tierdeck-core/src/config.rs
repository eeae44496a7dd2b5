//! Application settings and the preset table.

use crate::color::Rgba;
use std::time::Duration;
use url::form_urlencoded;

/// A named board configuration, selected by the `preset` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Preset {
    /// Query-parameter key.
    pub key: &'static str,
    /// Display name.
    pub name: &'static str,
    /// Heading shown above the board.
    pub title: &'static str,
    /// Path of the startup manifest, relative to the asset root.
    pub manifest_path: &'static str,
    /// Text template for the share intent.
    pub share_text: &'static str,
}

/// The fixed preset table. The first entry is the default.
pub const PRESETS: &[Preset] = &[
    Preset {
        key: "default",
        name: "TierDeck",
        title: "TIER MAKER",
        manifest_path: "default/manifest.txt",
        share_text: "I built my own tier list with TierDeck\nhttps://tierdeck.example/",
    },
    Preset {
        key: "weekly-cup",
        name: "Weekly Cup",
        title: "WEEKLY CUP TIER MAKER",
        manifest_path: "weekly-cup/manifest.txt",
        share_text: "My Weekly Cup tier list, made with TierDeck\nhttps://tierdeck.example/?preset=weekly-cup",
    },
];

impl Preset {
    /// The default preset.
    pub fn default_preset() -> &'static Preset {
        &PRESETS[0]
    }

    /// Look up a preset by key, falling back to the default.
    pub fn by_key(key: &str) -> &'static Preset {
        PRESETS
            .iter()
            .find(|preset| preset.key == key)
            .unwrap_or_else(Preset::default_preset)
    }

    /// Select a preset from a raw URL query string (`preset=<key>&...`).
    /// Unknown or absent keys fall back to the default preset.
    pub fn from_query(query: &str) -> &'static Preset {
        let query = query.strip_prefix('?').unwrap_or(query);
        form_urlencoded::parse(query.as_bytes())
            .find(|(name, _)| name == "preset")
            .map(|(_, value)| Preset::by_key(&value))
            .unwrap_or_else(Preset::default_preset)
    }
}

/// Runtime constants for export, share, and notices.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Fixed filename of the exported PNG.
    pub download_filename: String,
    /// Base URL of the share intent endpoint.
    pub share_intent_url: String,
    /// Background fill of the exported capture.
    pub capture_background: Rgba,
    /// Device-pixel scale factor of the exported capture.
    pub capture_scale: f64,
    /// How long a notice stays fully visible.
    pub notice_duration: Duration,
    /// Fade-out time appended to the visible window.
    pub notice_fade: Duration,
    /// Delay before the share fallback fires after a capture failure.
    pub share_fallback_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            download_filename: "tier-list.png".to_string(),
            share_intent_url: "https://twitter.com/intent/tweet".to_string(),
            capture_background: Rgba::from_hex("#f2f2f2").unwrap_or(Rgba::white()),
            capture_scale: 2.0,
            notice_duration: Duration::from_millis(3000),
            notice_fade: Duration::from_millis(300),
            share_fallback_delay: Duration::from_millis(2000),
        }
    }
}
