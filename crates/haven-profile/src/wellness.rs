// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Fixed catalog of wellness activities and their point values.

/// A wellness activity the user can complete for points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WellnessActivity {
    /// Stable identifier used by the CLI.
    pub slug: &'static str,
    pub label: &'static str,
    pub points: u64,
}

/// All activities, in presentation order.
pub const ACTIVITIES: [WellnessActivity; 4] = [
    WellnessActivity {
        slug: "breathing",
        label: "Breathing Practice",
        points: 10,
    },
    WellnessActivity {
        slug: "mood",
        label: "Mood Check",
        points: 5,
    },
    WellnessActivity {
        slug: "yoga",
        label: "Trauma-Sensitive Yoga Flow",
        points: 50,
    },
    WellnessActivity {
        slug: "vagal",
        label: "Vagal Nerve Regulation",
        points: 30,
    },
];

/// Looks up an activity by slug.
pub fn find_activity(slug: &str) -> Option<&'static WellnessActivity> {
    ACTIVITIES.iter().find(|a| a.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_point_values() {
        assert_eq!(find_activity("breathing").unwrap().points, 10);
        assert_eq!(find_activity("mood").unwrap().points, 5);
        assert_eq!(find_activity("yoga").unwrap().points, 50);
        assert_eq!(find_activity("vagal").unwrap().points, 30);
    }

    #[test]
    fn unknown_slug_finds_nothing() {
        assert!(find_activity("napping").is_none());
    }
}
