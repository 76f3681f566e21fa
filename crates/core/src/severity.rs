//! Blood-pressure severity classification.
//!
//! Maps a predicted (systolic, diastolic) pair to a clinical urgency
//! tier and its display label. Pure logic, no state.

use serde::{Deserialize, Serialize};

/// Clinical urgency tier derived from predicted blood pressure.
///
/// Ordered by urgency: `Low < Medium < High < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Low,
    Medium,
    High,
    Critical,
}

impl SeverityTier {
    /// Human-readable label shown on dashboards.
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Normal",
            Self::Medium => "Elevated",
            Self::High => "High BP Stage 1",
            Self::Critical => "High BP Stage 2",
        }
    }

    /// Whether this tier triggers an alert broadcast.
    pub fn is_alerting(self) -> bool {
        self >= Self::High
    }

    /// Canonical lowercase name, matching the serde representation and
    /// the database `severity` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl std::fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SeverityTier {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(crate::error::CoreError::Validation(format!(
                "unknown severity tier: {other}"
            ))),
        }
    }
}

/// Classify a blood-pressure estimate into a [`SeverityTier`].
///
/// Rules are checked in order; diastolic only participates in the first
/// rule. This asymmetry is inherited from the deployed classifier and
/// must not be changed without clinical sign-off.
pub fn classify(systolic: f64, diastolic: f64) -> SeverityTier {
    if systolic < 120.0 && diastolic < 80.0 {
        SeverityTier::Low
    } else if systolic < 130.0 {
        SeverityTier::Medium
    } else if systolic < 140.0 {
        SeverityTier::High
    } else {
        SeverityTier::Critical
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal_range_is_low() {
        assert_eq!(classify(119.0, 79.0), SeverityTier::Low);
    }

    #[test]
    fn elevated_systolic_is_medium() {
        assert_eq!(classify(125.0, 70.0), SeverityTier::Medium);
        assert_eq!(classify(125.0, 95.0), SeverityTier::Medium);
    }

    #[test]
    fn stage_one_is_high() {
        assert_eq!(classify(135.0, 60.0), SeverityTier::High);
        assert_eq!(classify(135.0, 100.0), SeverityTier::High);
    }

    #[test]
    fn stage_two_is_critical() {
        assert_eq!(classify(145.0, 70.0), SeverityTier::Critical);
        assert_eq!(classify(200.0, 120.0), SeverityTier::Critical);
    }

    #[test]
    fn high_diastolic_alone_does_not_make_low() {
        // Diastolic below 80 but systolic at or above 120 falls through
        // to the systolic-only rules.
        assert_eq!(classify(121.0, 70.0), SeverityTier::Medium);
    }

    #[test]
    fn boundary_values() {
        assert_eq!(classify(119.99, 79.99), SeverityTier::Low);
        assert_eq!(classify(120.0, 79.0), SeverityTier::Medium);
        assert_eq!(classify(119.0, 80.0), SeverityTier::Medium);
        assert_eq!(classify(130.0, 0.0), SeverityTier::High);
        assert_eq!(classify(140.0, 0.0), SeverityTier::Critical);
    }

    #[test]
    fn tiers_are_ordered_by_urgency() {
        assert!(SeverityTier::Low < SeverityTier::Medium);
        assert!(SeverityTier::Medium < SeverityTier::High);
        assert!(SeverityTier::High < SeverityTier::Critical);
    }

    #[test]
    fn alerting_tiers() {
        assert!(!SeverityTier::Low.is_alerting());
        assert!(!SeverityTier::Medium.is_alerting());
        assert!(SeverityTier::High.is_alerting());
        assert!(SeverityTier::Critical.is_alerting());
    }

    #[test]
    fn labels() {
        assert_eq!(SeverityTier::Low.label(), "Normal");
        assert_eq!(SeverityTier::Medium.label(), "Elevated");
        assert_eq!(SeverityTier::High.label(), "High BP Stage 1");
        assert_eq!(SeverityTier::Critical.label(), "High BP Stage 2");
    }

    #[test]
    fn round_trips_through_str() {
        for tier in [
            SeverityTier::Low,
            SeverityTier::Medium,
            SeverityTier::High,
            SeverityTier::Critical,
        ] {
            assert_eq!(tier.as_str().parse::<SeverityTier>().unwrap(), tier);
        }
        assert!("elevated".parse::<SeverityTier>().is_err());
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&SeverityTier::Critical).unwrap(),
            "\"critical\""
        );
    }
}
