//! Crop label table and the crop encyclopedia.
//!
//! The classifier emits integer labels in `1..=22`. Each label maps to exactly
//! one [`Crop`]; anything else resolves to [`UNKNOWN_CROP`]. Only a subset of
//! crops carries a detailed [`CropInfo`] record.

use serde::Serialize;
use std::fmt;

/// Name returned for labels outside the crop table.
pub const UNKNOWN_CROP: &str = "Unknown";

/// Icon shown for crops without an info record.
pub const DEFAULT_ICON: &str = "🌱";

/// Crops the classifier can recommend, keyed by their training label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Crop {
    Rice = 1,
    Maize = 2,
    Jute = 3,
    Cotton = 4,
    Coconut = 5,
    Papaya = 6,
    Orange = 7,
    Apple = 8,
    Muskmelon = 9,
    Watermelon = 10,
    Grapes = 11,
    Mango = 12,
    Banana = 13,
    Pomegranate = 14,
    Lentil = 15,
    Blackgram = 16,
    Mungbean = 17,
    Mothbeans = 18,
    Pigeonpeas = 19,
    Kidneybeans = 20,
    Chickpea = 21,
    Coffee = 22,
}

impl Crop {
    /// All crops in label order.
    pub const ALL: [Crop; 22] = [
        Crop::Rice,
        Crop::Maize,
        Crop::Jute,
        Crop::Cotton,
        Crop::Coconut,
        Crop::Papaya,
        Crop::Orange,
        Crop::Apple,
        Crop::Muskmelon,
        Crop::Watermelon,
        Crop::Grapes,
        Crop::Mango,
        Crop::Banana,
        Crop::Pomegranate,
        Crop::Lentil,
        Crop::Blackgram,
        Crop::Mungbean,
        Crop::Mothbeans,
        Crop::Pigeonpeas,
        Crop::Kidneybeans,
        Crop::Chickpea,
        Crop::Coffee,
    ];

    /// Resolve a classifier label.
    pub fn from_label(label: i64) -> Option<Crop> {
        if (1..=Self::ALL.len() as i64).contains(&label) {
            Some(Self::ALL[(label - 1) as usize])
        } else {
            None
        }
    }

    /// Resolve a crop by display name, ignoring case.
    pub fn from_name(name: &str) -> Option<Crop> {
        let name = name.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|crop| crop.name().eq_ignore_ascii_case(name))
    }

    /// Classifier label for this crop.
    pub fn label(self) -> i64 {
        self as i64
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Crop::Rice => "Rice",
            Crop::Maize => "Maize",
            Crop::Jute => "Jute",
            Crop::Cotton => "Cotton",
            Crop::Coconut => "Coconut",
            Crop::Papaya => "Papaya",
            Crop::Orange => "Orange",
            Crop::Apple => "Apple",
            Crop::Muskmelon => "Muskmelon",
            Crop::Watermelon => "Watermelon",
            Crop::Grapes => "Grapes",
            Crop::Mango => "Mango",
            Crop::Banana => "Banana",
            Crop::Pomegranate => "Pomegranate",
            Crop::Lentil => "Lentil",
            Crop::Blackgram => "Blackgram",
            Crop::Mungbean => "Mungbean",
            Crop::Mothbeans => "Mothbeans",
            Crop::Pigeonpeas => "Pigeonpeas",
            Crop::Kidneybeans => "Kidneybeans",
            Crop::Chickpea => "Chickpea",
            Crop::Coffee => "Coffee",
        }
    }

    /// Growing information, when the encyclopedia has an entry.
    pub fn info(self) -> Option<&'static CropInfo> {
        ENCYCLOPEDIA
            .iter()
            .find(|(crop, _)| *crop == self)
            .map(|(_, info)| info)
    }
}

impl fmt::Display for Crop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Map a classifier label to a crop name, falling back to [`UNKNOWN_CROP`].
pub fn crop_name(label: i64) -> &'static str {
    Crop::from_label(label).map_or(UNKNOWN_CROP, Crop::name)
}

/// Static growing profile for a crop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CropInfo {
    pub season: &'static str,
    pub water_requirement: &'static str,
    pub temperature_range: &'static str,
    pub ph_range: &'static str,
    pub icon: &'static str,
}

static ENCYCLOPEDIA: [(Crop, CropInfo); 10] = [
    (
        Crop::Rice,
        CropInfo {
            season: "Kharif (Jun-Oct)",
            water_requirement: "High (1200-1800mm)",
            temperature_range: "20-35°C",
            ph_range: "5.5-7.0",
            icon: "🌾",
        },
    ),
    (
        Crop::Maize,
        CropInfo {
            season: "Kharif/Rabi",
            water_requirement: "Medium (600-1000mm)",
            temperature_range: "20-30°C",
            ph_range: "6.0-7.5",
            icon: "🌽",
        },
    ),
    (
        Crop::Cotton,
        CropInfo {
            season: "Kharif (Apr-Oct)",
            water_requirement: "Medium (700-1200mm)",
            temperature_range: "20-30°C",
            ph_range: "5.8-8.0",
            icon: "🌸",
        },
    ),
    (
        Crop::Apple,
        CropInfo {
            season: "Spring (Mar-May)",
            water_requirement: "Medium (800-1200mm)",
            temperature_range: "21-24°C",
            ph_range: "6.0-7.0",
            icon: "🍎",
        },
    ),
    (
        Crop::Mango,
        CropInfo {
            season: "Summer (Mar-Jun)",
            water_requirement: "Medium (750-1200mm)",
            temperature_range: "24-27°C",
            ph_range: "5.5-7.5",
            icon: "🥭",
        },
    ),
    (
        Crop::Coffee,
        CropInfo {
            season: "Year-round",
            water_requirement: "High (1500-2000mm)",
            temperature_range: "15-28°C",
            ph_range: "6.0-6.5",
            icon: "☕",
        },
    ),
    (
        Crop::Banana,
        CropInfo {
            season: "Year-round",
            water_requirement: "High (1200-2000mm)",
            temperature_range: "26-30°C",
            ph_range: "6.0-7.5",
            icon: "🍌",
        },
    ),
    (
        Crop::Grapes,
        CropInfo {
            season: "Winter (Nov-Feb)",
            water_requirement: "Medium (600-800mm)",
            temperature_range: "15-25°C",
            ph_range: "6.0-7.0",
            icon: "🍇",
        },
    ),
    (
        Crop::Orange,
        CropInfo {
            season: "Winter (Oct-Feb)",
            water_requirement: "Medium (800-1200mm)",
            temperature_range: "13-26°C",
            ph_range: "6.0-7.5",
            icon: "🍊",
        },
    ),
    (
        Crop::Coconut,
        CropInfo {
            season: "Year-round",
            water_requirement: "High (1200-2000mm)",
            temperature_range: "27-30°C",
            ph_range: "5.2-8.0",
            icon: "🥥",
        },
    ),
];

/// Encyclopedia entries in display order.
pub fn encyclopedia() -> impl Iterator<Item = (Crop, &'static CropInfo)> {
    ENCYCLOPEDIA.iter().map(|(crop, info)| (*crop, info))
}

/// Render one encyclopedia card as plain text.
pub fn render_card(crop_name: &str, info: Option<&CropInfo>) -> String {
    match info {
        Some(info) => format!(
            "{icon} {name}\n  Season:       {season}\n  Water needs:  {water}\n  Temperature:  {temp}\n  pH range:     {ph}\n",
            icon = info.icon,
            name = crop_name,
            season = info.season,
            water = info.water_requirement,
            temp = info.temperature_range,
            ph = info.ph_range,
        ),
        None => format!(
            "{DEFAULT_ICON} {crop_name}\n  No detailed information available for this crop.\n"
        ),
    }
}
