//! Group-prefix layer toggling.
//!
//! Pre-authored styles tag layers with a group id, and the style's group
//! table names each group (`basemap-light`, `labels-dark`, ...). Switching a
//! basemap or label set is then a matter of flipping `visibility` on the
//! layers of every group sharing a prefix, without re-fetching the style.

use std::collections::HashMap;

use crate::style::StyleDocument;
use crate::visibility::Visibility;

/// Anything whose layers can be shown or hidden by id.
pub trait LayerVisibilityTarget {
    fn set_layer_visibility(&mut self, layer_id: &str, visibility: Visibility);
}

impl LayerVisibilityTarget for StyleDocument {
    fn set_layer_visibility(&mut self, layer_id: &str, visibility: Visibility) {
        if let Some(layer) = self.layer_mut(layer_id) {
            layer.set_visibility(visibility);
        }
    }
}

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ToggleSummary {
    pub shown: usize,
    pub hidden: usize,
}

impl ToggleSummary {
    pub fn touched(&self) -> usize {
        self.shown + self.hidden
    }
}

/// Visibility changes implied by a prefix and predicate, in layer order.
///
/// The predicate is evaluated once per matching group, against the group's
/// name. Layers without a group, or in a group outside the prefix, produce
/// no entry.
pub fn plan_group_toggle(
    style: &StyleDocument,
    group_prefix: &str,
    mut predicate: impl FnMut(&str) -> bool,
) -> Vec<(String, Visibility)> {
    let matching: HashMap<&str, Visibility> = style
        .groups()
        .filter(|(_, group)| group.name.starts_with(group_prefix))
        .map(|(id, group)| (id, Visibility::from_bool(predicate(&group.name))))
        .collect();

    if matching.is_empty() {
        return Vec::new();
    }

    style
        .layers
        .iter()
        .filter_map(|layer| {
            let visibility = *matching.get(layer.group()?)?;
            Some((layer.id.clone(), visibility))
        })
        .collect()
}

/// Show or hide every layer in the groups whose name starts with `group_prefix`.
pub fn toggle_group_layers<T: LayerVisibilityTarget + ?Sized>(
    style: &StyleDocument,
    target: &mut T,
    group_prefix: &str,
    predicate: impl FnMut(&str) -> bool,
) -> ToggleSummary {
    let plan = plan_group_toggle(style, group_prefix, predicate);
    apply_plan(target, &plan)
}

pub fn apply_plan<T: LayerVisibilityTarget + ?Sized>(
    target: &mut T,
    plan: &[(String, Visibility)],
) -> ToggleSummary {
    let mut summary = ToggleSummary::default();
    for (layer_id, visibility) in plan {
        target.set_layer_visibility(layer_id, *visibility);
        if visibility.is_visible() {
            summary.shown += 1;
        } else {
            summary.hidden += 1;
        }
    }
    tracing::debug!(
        shown = summary.shown,
        hidden = summary.hidden,
        "applied layer visibility plan"
    );
    summary
}
