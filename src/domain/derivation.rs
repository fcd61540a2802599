//! Implied total wealth and holding percentages.
//!
//! Each fund (level 3) states a target percentage and holds currency amounts
//! in its holdings (level 4). If both hold at once, the whole portfolio must
//! be worth `sum(holdings) / (fund% / 100)`. The largest such figure is the
//! implied total; holdings are then rewritten as percentages of it.

use serde::Serialize;
use tracing::debug;

use crate::domain::RadialNode;

/// Figures shown next to the chart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Largest implied total over all funds, 0 when none can be computed
    pub implied_total: f64,
    /// Sum of the currency amounts of all holdings
    pub current_total: f64,
    /// `implied_total - current_total`
    pub remaining: f64,
}

/// Derived radial snapshot together with its summary.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Derivation {
    pub snapshot: Vec<RadialNode>,
    pub summary: Summary,
}

/// Total wealth implied by a single fund, if it has non-zero holdings and a
/// non-zero target percentage.
pub fn fund_implied_total(fund: &RadialNode) -> Option<f64> {
    if fund.children.is_empty() {
        return None;
    }
    let level_total: f64 = fund.children.iter().map(|holding| holding.value).sum();
    if level_total == 0.0 {
        return None;
    }
    let implied = level_total / (fund.value / 100.0);
    implied.is_finite().then_some(implied)
}

/// Maximum implied total across all funds; 0 if no fund yields one.
pub fn implied_total(snapshot: &[RadialNode]) -> f64 {
    funds(snapshot)
        .filter_map(fund_implied_total)
        .fold(0.0, f64::max)
}

/// Sum of holding prices; holdings without a price count as 0.
pub fn current_total(snapshot: &[RadialNode]) -> f64 {
    funds(snapshot)
        .flat_map(|fund| fund.children.iter())
        .map(|holding| holding.price.unwrap_or(0.0))
        .sum()
}

fn funds(snapshot: &[RadialNode]) -> impl Iterator<Item = &RadialNode> {
    snapshot
        .iter()
        .flat_map(|root| root.children.iter())
        .flat_map(|class| class.children.iter())
}

/// Run the derivation over a freshly projected snapshot.
///
/// When an implied total exists, every holding keeps its entered amount in
/// `price` and its `value` becomes `price * 100 / implied_total`. Otherwise
/// the snapshot passes through untouched.
pub fn derive(mut snapshot: Vec<RadialNode>) -> Derivation {
    let max_total = implied_total(&snapshot);
    debug!("derive: implied total {}", max_total);

    if max_total > 0.0 {
        for root in &mut snapshot {
            for class in &mut root.children {
                for fund in &mut class.children {
                    for holding in &mut fund.children {
                        let price = holding.value;
                        holding.price = Some(price);
                        holding.value = price * 100.0 / max_total;
                    }
                }
            }
        }
    }

    let current = current_total(&snapshot);
    debug!("derive: current total {}", current);

    Derivation {
        snapshot,
        summary: Summary {
            implied_total: max_total,
            current_total: current,
            remaining: max_total - current,
        },
    }
}
