//! Drawdown classification and the exposure ladder.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::ratios::percent_of;

/// A drawdown bracket with its target attack exposure.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Tier {
    /// Position in the ladder
    pub index: usize,
    /// Inclusive lower bound, in percent
    pub min_drawdown: Decimal,
    /// Exclusive upper bound, in percent; `None` for the last tier
    pub max_drawdown: Option<Decimal>,
    /// Target attack exposure, in percent of total assets
    pub target_exposure: Decimal,
    pub label: &'static str,
    pub description: &'static str,
}

impl Tier {
    /// Check if a drawdown falls inside this tier.
    pub fn contains(&self, drawdown: Decimal) -> bool {
        drawdown >= self.min_drawdown && self.max_drawdown.map_or(true, |max| drawdown < max)
    }

    /// Range as text, e.g. "10% ~ 25%" or ">= 50%".
    pub fn range_label(&self) -> String {
        match self.max_drawdown {
            Some(max) => format!("{}% ~ {}%", self.min_drawdown, max),
            None => format!(">= {}%", self.min_drawdown),
        }
    }
}

/// The exposure ladder. Contiguous from 0 with an unbounded last tier.
pub const TIERS: [Tier; 6] = [
    Tier {
        index: 0,
        min_drawdown: dec!(0),
        max_drawdown: Some(dec!(5)),
        target_exposure: dec!(23),
        label: "Tier1",
        description: "near highs",
    },
    Tier {
        index: 1,
        min_drawdown: dec!(5),
        max_drawdown: Some(dec!(10)),
        target_exposure: dec!(23),
        label: "Tier1-Warn",
        description: "caution",
    },
    Tier {
        index: 2,
        min_drawdown: dec!(10),
        max_drawdown: Some(dec!(25)),
        target_exposure: dec!(28),
        label: "Tier2",
        description: "early decline",
    },
    Tier {
        index: 3,
        min_drawdown: dec!(25),
        max_drawdown: Some(dec!(40)),
        target_exposure: dec!(33),
        label: "Tier3",
        description: "main decline",
    },
    Tier {
        index: 4,
        min_drawdown: dec!(40),
        max_drawdown: Some(dec!(50)),
        target_exposure: dec!(40),
        label: "Tier4",
        description: "panic",
    },
    Tier {
        index: 5,
        min_drawdown: dec!(50),
        max_drawdown: None,
        target_exposure: dec!(50),
        label: "Tier5",
        description: "collapse",
    },
];

/// Percentage decline of the index from its all-time high.
///
/// Returns zero when the ATH is unknown (zero) or the index sits above it.
pub fn drawdown_pct(current_index: Decimal, ath_index: Decimal) -> Decimal {
    if ath_index <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    percent_of(ath_index.saturating_sub(current_index), ath_index).max(Decimal::ZERO)
}

/// Find the tier for a drawdown percentage.
pub fn classify(drawdown: Decimal) -> &'static Tier {
    // Negative input cannot come out of drawdown_pct; pin it to the first tier.
    TIERS
        .iter()
        .find(|tier| tier.contains(drawdown))
        .unwrap_or(&TIERS[0])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawdown_saturates() {
        let drawdown = drawdown_pct(Decimal::MIN, dec!(0.0001));
        assert_eq!(drawdown, Decimal::MAX);
        assert_eq!(classify(drawdown).label, "Tier5");
    }

    #[test]
    fn test_drawdown_from_ath() {
        assert_eq!(drawdown_pct(dec!(90), dec!(100)), dec!(10));
        assert_eq!(drawdown_pct(dec!(100), dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_drawdown_above_ath_is_zero() {
        assert_eq!(drawdown_pct(dec!(110), dec!(100)), Decimal::ZERO);
    }

    #[test]
    fn test_unknown_ath_forces_first_tier() {
        let drawdown = drawdown_pct(dec!(23000), Decimal::ZERO);
        assert_eq!(drawdown, Decimal::ZERO);
        assert_eq!(classify(drawdown).label, "Tier1");
    }

    #[test]
    fn test_ladder_is_contiguous() {
        assert_eq!(TIERS[0].min_drawdown, Decimal::ZERO);
        for pair in TIERS.windows(2) {
            assert_eq!(pair[0].max_drawdown, Some(pair[1].min_drawdown));
        }
        assert!(TIERS[TIERS.len() - 1].max_drawdown.is_none());
        for (i, tier) in TIERS.iter().enumerate() {
            assert_eq!(tier.index, i);
        }
    }

    #[test]
    fn test_exactly_one_tier_matches() {
        let mut d = Decimal::ZERO;
        while d <= dec!(120) {
            let matches: Vec<_> = TIERS.iter().filter(|t| t.contains(d)).collect();
            assert_eq!(matches.len(), 1, "drawdown {} matched {} tiers", d, matches.len());
            let tier = classify(d);
            assert!(tier.min_drawdown <= d);
            if let Some(max) = tier.max_drawdown {
                assert!(d < max);
            }
            d += dec!(0.25);
        }
    }

    #[test]
    fn test_boundaries_inclusive_lower() {
        assert_eq!(classify(dec!(4.99)).label, "Tier1");
        assert_eq!(classify(dec!(5)).label, "Tier1-Warn");
        assert_eq!(classify(dec!(10)).label, "Tier2");
        assert_eq!(classify(dec!(24.999)).label, "Tier2");
        assert_eq!(classify(dec!(25)).label, "Tier3");
        assert_eq!(classify(dec!(40)).label, "Tier4");
        assert_eq!(classify(dec!(50)).label, "Tier5");
        assert_eq!(classify(dec!(99)).target_exposure, dec!(50));
    }

    #[test]
    fn test_range_label() {
        assert_eq!(TIERS[2].range_label(), "10% ~ 25%");
        assert_eq!(TIERS[5].range_label(), ">= 50%");
    }
}
