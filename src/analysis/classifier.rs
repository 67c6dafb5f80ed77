/// Holding status classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Remaining/bought ratio at or above which a wallet still counts as holding.
/// Absorbs fee and dust noise in balance tracking.
pub const HOLDING_RATIO: f64 = 0.98;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HolderStatus {
    #[serde(rename = "HOLDING")]
    Holding,
    #[serde(rename = "SOLD PART")]
    SoldPart,
    #[serde(rename = "SOLD ALL")]
    SoldAll,
    #[serde(rename = "NO ACTIVITY")]
    NoActivity,
}

impl HolderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolderStatus::Holding => "HOLDING",
            HolderStatus::SoldPart => "SOLD PART",
            HolderStatus::SoldAll => "SOLD ALL",
            HolderStatus::NoActivity => "NO ACTIVITY",
        }
    }
}

impl fmt::Display for HolderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a wallet from what it first received and what it holds now.
///
/// `remaining` is `None` when the balance lookup failed.
pub fn classify(token_bought: f64, remaining: Option<f64>) -> HolderStatus {
    let Some(remaining) = remaining else {
        return HolderStatus::NoActivity;
    };
    if remaining <= 0.0 {
        return HolderStatus::SoldAll;
    }

    // Zero recorded acquisition but a positive balance counts as holding
    let ratio = if token_bought > 0.0 { remaining / token_bought } else { 1.0 };
    if ratio >= HOLDING_RATIO {
        HolderStatus::Holding
    } else {
        HolderStatus::SoldPart
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_boundary() {
        assert_eq!(classify(100.0, Some(98.0)), HolderStatus::Holding);
        assert_eq!(classify(100.0, Some(97.9999)), HolderStatus::SoldPart);
    }

    #[test]
    fn test_sold_all_and_no_activity() {
        assert_eq!(classify(100.0, Some(0.0)), HolderStatus::SoldAll);
        assert_eq!(classify(100.0, Some(-1.0)), HolderStatus::SoldAll);
        assert_eq!(classify(100.0, None), HolderStatus::NoActivity);
        assert_eq!(classify(0.0, None), HolderStatus::NoActivity);
    }

    #[test]
    fn test_zero_bought_with_balance_is_holding() {
        assert_eq!(classify(0.0, Some(5.0)), HolderStatus::Holding);
        assert_eq!(classify(0.0, Some(0.0)), HolderStatus::SoldAll);
    }

    #[test]
    fn test_accumulated_more_than_bought() {
        assert_eq!(classify(10.0, Some(500.0)), HolderStatus::Holding);
    }

    #[test]
    fn test_every_input_gets_exactly_one_status() {
        let bought = [0.0, 0.5, 1.0, 100.0, 1e12];
        let remaining = [None, Some(0.0), Some(0.01), Some(0.98), Some(1.0), Some(99.0), Some(1e15)];
        for b in bought {
            for r in remaining {
                let status = classify(b, r);
                let expected = match r {
                    None => HolderStatus::NoActivity,
                    Some(r) if r <= 0.0 => HolderStatus::SoldAll,
                    Some(r) if b <= 0.0 || r / b >= HOLDING_RATIO => HolderStatus::Holding,
                    Some(_) => HolderStatus::SoldPart,
                };
                assert_eq!(status, expected, "bought={} remaining={:?}", b, r);
            }
        }
    }

    #[test]
    fn test_display_labels() {
        assert_eq!(HolderStatus::SoldPart.to_string(), "SOLD PART");
        assert_eq!(serde_json::to_string(&HolderStatus::SoldAll).unwrap(), "\"SOLD ALL\"");
    }
}
