//! Chart model for the nested-ring renderer
//!
//! The renderer itself is external; this module only assembles the data it
//! consumes. The model is recomputed from scratch on every change.

use serde::Serialize;
use termtree::Tree;

use crate::domain::{Derivation, Presenter, RadialNode, Summary};

/// Radial band of one hierarchy level, as fractions of the chart radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RingLevel {
    pub depth: usize,
    pub inner_radius: &'static str,
    pub outer_radius: &'static str,
    pub border_width: u32,
    /// Labels drawn outside the ring instead of along it.
    pub label_outside: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartModel {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    pub summary: Summary,
    pub series: Vec<RadialNode>,
    pub levels: Vec<RingLevel>,
}

fn ring_levels() -> Vec<RingLevel> {
    vec![
        RingLevel {
            depth: 1,
            inner_radius: "0%",
            outer_radius: "30%",
            border_width: 2,
            label_outside: false,
        },
        RingLevel {
            depth: 2,
            inner_radius: "30%",
            outer_radius: "50%",
            border_width: 2,
            label_outside: false,
        },
        RingLevel {
            depth: 3,
            inner_radius: "50%",
            outer_radius: "70%",
            border_width: 2,
            label_outside: false,
        },
        RingLevel {
            depth: 4,
            inner_radius: "70%",
            outer_radius: "72%",
            border_width: 3,
            label_outside: true,
        },
    ]
}

/// Build the chart model for a derived snapshot.
///
/// The subtitle is only present when an implied total could be determined.
pub fn compute_chart_model(derivation: &Derivation, presenter: &Presenter, title: &str) -> ChartModel {
    let summary = derivation.summary;
    let subtitle = (summary.implied_total > 0.0).then(|| {
        format!(
            "Implied total {}, current {}, remaining {}",
            presenter.money(summary.implied_total),
            presenter.money(summary.current_total),
            presenter.money(summary.remaining),
        )
    });

    ChartModel {
        title: title.to_string(),
        subtitle,
        summary,
        series: derivation.snapshot.clone(),
        levels: ring_levels(),
    }
}

impl ChartModel {
    /// Text rendering of the rings, one tree per root, labelled as the
    /// renderer labels segments.
    pub fn ring_trees(&self, presenter: &Presenter) -> Vec<Tree<String>> {
        fn ring(node: &RadialNode, presenter: &Presenter) -> Tree<String> {
            Tree::new(presenter.ring_label(&node.name, node.value))
                .with_leaves(node.children.iter().map(|c| ring(c, presenter)).collect::<Vec<_>>())
        }
        self.series.iter().map(|root| ring(root, presenter)).collect()
    }
}
