use chrono::{DateTime, Duration, Utc};

/// Hours a pull request may sit open before it stops being fresh
const AGING_AFTER_HOURS: i64 = 24;
/// Hours after which an open pull request counts as stale
const STALE_AFTER_HOURS: i64 = 72;

/// How urgently an open pull request needs attention, judged purely by how
/// long it has been open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrgencyZone {
    Fresh,
    Aging,
    Stale,
}

impl UrgencyZone {
    /// Display label shown on the dashboard badge
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyZone::Fresh => "fresh",
            UrgencyZone::Aging => "aging",
            UrgencyZone::Stale => "stale",
        }
    }

    /// CSS class carried by the dashboard row for this zone
    pub fn css_class(&self) -> &'static str {
        match self {
            UrgencyZone::Fresh => "zone-fresh",
            UrgencyZone::Aging => "zone-aging",
            UrgencyZone::Stale => "zone-stale",
        }
    }
}

/// Assign a pull request to an urgency zone from how long it has been open.
///
/// Lower bounds are inclusive: exactly 24 hours open is already `Aging`,
/// exactly 72 hours is already `Stale`. An `opened_at` in the future (clock
/// skew between us and the API) yields a negative age and classifies as
/// `Fresh`. Comparisons use the full-precision duration, not truncated
/// hours, so a PR flips zones at the exact instant it crosses a threshold.
pub fn classify(now: DateTime<Utc>, opened_at: DateTime<Utc>) -> UrgencyZone {
    let age = now - opened_at;

    if age < Duration::hours(AGING_AFTER_HOURS) {
        UrgencyZone::Fresh
    } else if age < Duration::hours(STALE_AFTER_HOURS) {
        UrgencyZone::Aging
    } else {
        UrgencyZone::Stale
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_hours_is_fresh() {
        let now = Utc::now();
        assert_eq!(classify(now, now - Duration::hours(5)), UrgencyZone::Fresh);
    }

    #[test]
    fn test_twenty_five_hours_is_aging() {
        let now = Utc::now();
        assert_eq!(classify(now, now - Duration::hours(25)), UrgencyZone::Aging);
    }

    #[test]
    fn test_seventy_three_hours_is_stale() {
        let now = Utc::now();
        assert_eq!(classify(now, now - Duration::hours(73)), UrgencyZone::Stale);
    }

    #[test]
    fn test_extreme_age_stays_stale() {
        // A thousand hours must not wrap back into a lower zone.
        let now = Utc::now();
        assert_eq!(
            classify(now, now - Duration::hours(1000)),
            UrgencyZone::Stale
        );
    }

    #[test]
    fn test_exactly_twenty_four_hours_is_aging() {
        let now = Utc::now();
        assert_eq!(classify(now, now - Duration::hours(24)), UrgencyZone::Aging);
    }

    #[test]
    fn test_exactly_seventy_two_hours_is_stale() {
        let now = Utc::now();
        assert_eq!(classify(now, now - Duration::hours(72)), UrgencyZone::Stale);
    }

    #[test]
    fn test_just_under_a_threshold_stays_in_lower_zone() {
        let now = Utc::now();
        let almost_aging = now - Duration::hours(24) + Duration::seconds(1);
        assert_eq!(classify(now, almost_aging), UrgencyZone::Fresh);

        let almost_stale = now - Duration::hours(72) + Duration::seconds(1);
        assert_eq!(classify(now, almost_stale), UrgencyZone::Aging);
    }

    #[test]
    fn test_future_opened_at_is_fresh() {
        // Clock skew can put opened_at ahead of now; never an error.
        let now = Utc::now();
        assert_eq!(classify(now, now + Duration::hours(2)), UrgencyZone::Fresh);
    }

    #[test]
    fn test_same_inputs_same_zone() {
        let now = Utc::now();
        let opened_at = now - Duration::hours(30);
        assert_eq!(classify(now, opened_at), classify(now, opened_at));
    }

    #[test]
    fn test_labels_and_classes_are_distinct() {
        let zones = [UrgencyZone::Fresh, UrgencyZone::Aging, UrgencyZone::Stale];
        for (i, a) in zones.iter().enumerate() {
            for b in &zones[i + 1..] {
                assert_ne!(a.label(), b.label());
                assert_ne!(a.css_class(), b.css_class());
            }
        }
    }
}
