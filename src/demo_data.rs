//! Seed activities for the Hub feed and destinations for smart booking

use crate::activity::{Activity, ActivityKind};
use crate::suggest::{Climate, Destination, Vibe};

/// The fixed demo catalog loaded at startup
pub fn demo_activities() -> Vec<Activity> {
    vec![
        Activity::new(
            "tokyo-teamlab",
            "teamLab Planets (Immersive Art)",
            "Tokyo",
            "Japan",
            ActivityKind::Group,
            5.0,
            6,
            0,
        ),
        Activity::new(
            "osaka-matcha",
            "Traditional Matcha Ceremony Experience",
            "Osaka",
            "Japan",
            ActivityKind::Solo,
            4.9,
            3,
            2,
        ),
        Activity::new(
            "osaka-shuriken",
            "Shuriken (Ninja Star) Making Experience",
            "Osaka",
            "Japan",
            ActivityKind::Group,
            4.7,
            5,
            5,
        ),
    ]
}

/// Destinations considered by `vair suggest`, in tie-break order
pub fn demo_destinations() -> Vec<Destination> {
    vec![
        Destination::new("alula", "AlUla", "Saudi Arabia", Vibe::Nature, Climate::Mild, (1800, 4500)),
        Destination::new("tbilisi", "Tbilisi", "Georgia", Vibe::City, Climate::Mild, (2200, 5000)),
        Destination::new("salalah", "Salalah", "Oman", Vibe::Nature, Climate::Cool, (2500, 5200)),
    ]
}
