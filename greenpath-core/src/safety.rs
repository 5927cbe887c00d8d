//! Safety-point markers around the user's location.
//!
//! The Overpass lookup is best-effort; the deterministic fallback pins here
//! always render, and any live results are merged on top of them.

use geo::Point;
use serde::Serialize;

/// Category of a safety point of interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SafetyCategory {
    Police,
    Hospital,
    FireStation,
    Pharmacy,
    Shelter,
    Transit,
}

impl SafetyCategory {
    pub const ALL: [SafetyCategory; 6] = [
        SafetyCategory::Police,
        SafetyCategory::Hospital,
        SafetyCategory::FireStation,
        SafetyCategory::Pharmacy,
        SafetyCategory::Shelter,
        SafetyCategory::Transit,
    ];

    pub fn marker_color(self) -> &'static str {
        match self {
            SafetyCategory::Police => "#dc2626",
            SafetyCategory::Hospital => "#ea580c",
            SafetyCategory::FireStation => "#ef4444",
            SafetyCategory::Pharmacy => "#10b981",
            SafetyCategory::Shelter => "#0891b2",
            SafetyCategory::Transit => "#14b8a6",
        }
    }

    fn labels(self) -> &'static [&'static str] {
        match self {
            SafetyCategory::Police => &["Police Station", "Police Precinct", "Police Post"],
            SafetyCategory::Hospital => &["General Hospital", "Medical Center", "Health Clinic"],
            SafetyCategory::FireStation => {
                &["Fire Station", "Fire Brigade", "Emergency Services"]
            }
            SafetyCategory::Pharmacy => &["24/7 Pharmacy", "Medical Store", "Drug Store"],
            SafetyCategory::Shelter => &["Emergency Shelter", "Community Center", "Safe House"],
            SafetyCategory::Transit => &["Bus Stop", "Metro Station", "Transit Hub"],
        }
    }
}

/// A marker on the map surface.
#[derive(Debug, Clone, Serialize)]
pub struct SafetyPin {
    pub category: SafetyCategory,
    pub label: String,
    pub color: &'static str,
    pub lat: f64,
    pub lon: f64,
    /// False for the locally generated ring pins.
    pub live: bool,
}

/// Generates deterministic fallback pins: five per category, evenly spaced
/// around the center at category-staggered radii of roughly 1-3.5 km.
pub fn fallback_pins(center: Point<f64>) -> Vec<SafetyPin> {
    const PINS_PER_CATEGORY: usize = 5;

    let mut pins = Vec::with_capacity(SafetyCategory::ALL.len() * PINS_PER_CATEGORY);
    for (cat_idx, category) in SafetyCategory::ALL.into_iter().enumerate() {
        let labels = category.labels();
        // ~0.01 deg is about 1.1 km of latitude.
        let radius_deg = 0.010 + 0.005 * cat_idx as f64;
        for i in 0..PINS_PER_CATEGORY {
            let angle = (i as f64 / PINS_PER_CATEGORY as f64) * std::f64::consts::TAU
                + cat_idx as f64 * 0.35;
            pins.push(SafetyPin {
                category,
                label: labels[i % labels.len()].to_string(),
                color: category.marker_color(),
                lat: center.y() + angle.cos() * radius_deg,
                lon: center.x() + angle.sin() * radius_deg,
                live: false,
            });
        }
    }
    pins
}
