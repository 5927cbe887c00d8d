//! Static emission-reduction tips shown alongside the comparison.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TipImpact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tip {
    pub title: &'static str,
    pub description: &'static str,
    pub impact: TipImpact,
    pub savings: &'static str,
}

pub const TIPS: [Tip; 8] = [
    Tip {
        title: "Bike Short Distances",
        description: "For trips under 5km, biking is faster than driving in urban areas and produces zero emissions.",
        impact: TipImpact::High,
        savings: "Up to 1.1kg CO₂ per trip",
    },
    Tip {
        title: "Carpool When Possible",
        description: "Share rides with colleagues or friends to reduce per-person emissions by up to 50%.",
        impact: TipImpact::High,
        savings: "550g CO₂ per 10km",
    },
    Tip {
        title: "Use Public Transit",
        description: "Buses and trains produce 45-95% less CO₂ per passenger compared to single-occupancy vehicles.",
        impact: TipImpact::High,
        savings: "175g CO₂ per 10km",
    },
    Tip {
        title: "Walk When You Can",
        description: "Walking is the healthiest and greenest option for short trips.",
        impact: TipImpact::Medium,
        savings: "100% emissions free",
    },
    Tip {
        title: "Plan Combined Trips",
        description: "Combine multiple errands into one trip to reduce total distance traveled.",
        impact: TipImpact::Medium,
        savings: "20-30% fuel reduction",
    },
    Tip {
        title: "Choose Electric Transit",
        description: "Electric buses and trains have around 70% lower emissions than diesel equivalents.",
        impact: TipImpact::Medium,
        savings: "25g CO₂ per 10km",
    },
    Tip {
        title: "Avoid Peak Hours",
        description: "Congestion increases fuel consumption by 20-40%. Travel off-peak when possible.",
        impact: TipImpact::Low,
        savings: "80g CO₂ per trip",
    },
    Tip {
        title: "Use Route Optimization",
        description: "Plan the most efficient route to minimize distance and avoid traffic delays.",
        impact: TipImpact::Low,
        savings: "10-15% fuel savings",
    },
];
