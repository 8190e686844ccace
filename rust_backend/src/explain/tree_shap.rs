//! Path-dependent TreeSHAP.
//!
//! Exact Shapley values for a single tree in polynomial time (Lundberg et al.,
//! "Consistent Individualized Feature Attribution for Tree Ensembles").
//! Features missing from a coalition follow both branches, weighted by
//! training cover, so the reference output is [`Tree::expected_value`].

use crate::models::tree::{SplitRule, Tree, TreeNode};

/// One feature on the current root-to-node path.
#[derive(Debug, Clone, Copy)]
struct PathElement {
    /// `None` for the root sentinel.
    feature: Option<usize>,
    /// Fraction of coalitions without the feature that reach this node.
    zero_fraction: f64,
    /// 1 if the row itself follows this path for the feature, else 0.
    one_fraction: f64,
    /// Permutation weight of subsets of the current size.
    pweight: f64,
}

/// Adds the SHAP values of `tree` at `x` into `phi`.
pub(crate) fn accumulate(tree: &Tree, rule: SplitRule, x: &[f64], phi: &mut [f64]) {
    recurse(tree, rule, x, phi, 0, &[], 1.0, 1.0, None);
}

#[allow(clippy::too_many_arguments)]
fn recurse(
    tree: &Tree,
    rule: SplitRule,
    x: &[f64],
    phi: &mut [f64],
    node: usize,
    parent_path: &[PathElement],
    zero_fraction: f64,
    one_fraction: f64,
    feature: Option<usize>,
) {
    let mut path = parent_path.to_vec();
    extend(&mut path, zero_fraction, one_fraction, feature);

    match tree.nodes[node] {
        TreeNode::Leaf { value, .. } => {
            for i in 1..path.len() {
                let weight = unwound_sum(&path, i);
                let element = path[i];
                if let Some(f) = element.feature {
                    phi[f] += weight * (element.one_fraction - element.zero_fraction) * value;
                }
            }
        }
        TreeNode::Split {
            feature: split_feature,
            threshold,
            left,
            right,
            cover,
        } => {
            let (hot, cold) = if rule.goes_left(x[split_feature], threshold) {
                (left, right)
            } else {
                (right, left)
            };
            let hot_zero_fraction = tree.nodes[hot].cover() / cover;
            let cold_zero_fraction = tree.nodes[cold].cover() / cover;

            // A feature split on twice along one path is undone and redone here.
            let mut incoming_zero = 1.0;
            let mut incoming_one = 1.0;
            if let Some(index) = path.iter().position(|e| e.feature == Some(split_feature)) {
                incoming_zero = path[index].zero_fraction;
                incoming_one = path[index].one_fraction;
                unwind(&mut path, index);
            }

            recurse(
                tree,
                rule,
                x,
                phi,
                hot,
                &path,
                hot_zero_fraction * incoming_zero,
                incoming_one,
                Some(split_feature),
            );
            recurse(
                tree,
                rule,
                x,
                phi,
                cold,
                &path,
                cold_zero_fraction * incoming_zero,
                0.0,
                Some(split_feature),
            );
        }
    }
}

fn extend(path: &mut Vec<PathElement>, zero_fraction: f64, one_fraction: f64, feature: Option<usize>) {
    let depth = path.len();
    path.push(PathElement {
        feature,
        zero_fraction,
        one_fraction,
        pweight: if depth == 0 { 1.0 } else { 0.0 },
    });

    let denom = (depth + 1) as f64;
    for i in (0..depth).rev() {
        path[i + 1].pweight += one_fraction * path[i].pweight * (i + 1) as f64 / denom;
        path[i].pweight = zero_fraction * path[i].pweight * (depth - i) as f64 / denom;
    }
}

/// Removes `path[index]`, undoing its [`extend`].
fn unwind(path: &mut Vec<PathElement>, index: usize) {
    let depth = path.len() - 1;
    let one_fraction = path[index].one_fraction;
    let zero_fraction = path[index].zero_fraction;
    let denom = (depth + 1) as f64;
    let mut next_one_portion = path[depth].pweight;

    for i in (0..depth).rev() {
        if one_fraction != 0.0 {
            let tmp = path[i].pweight;
            path[i].pweight = next_one_portion * denom / ((i + 1) as f64 * one_fraction);
            next_one_portion = tmp - path[i].pweight * zero_fraction * (depth - i) as f64 / denom;
        } else {
            path[i].pweight = path[i].pweight * denom / (zero_fraction * (depth - i) as f64);
        }
    }

    // Weights stay in place; only the feature data shifts down.
    for i in index..depth {
        path[i].feature = path[i + 1].feature;
        path[i].zero_fraction = path[i + 1].zero_fraction;
        path[i].one_fraction = path[i + 1].one_fraction;
    }
    path.truncate(depth);
}

/// Total permutation weight of the path with `path[index]` unwound.
fn unwound_sum(path: &[PathElement], index: usize) -> f64 {
    let depth = path.len() - 1;
    let one_fraction = path[index].one_fraction;
    let zero_fraction = path[index].zero_fraction;
    let mut next_one_portion = path[depth].pweight;
    let mut total = 0.0;

    if one_fraction != 0.0 {
        for i in (0..depth).rev() {
            let tmp = next_one_portion / ((i + 1) as f64 * one_fraction);
            total += tmp;
            next_one_portion = path[i].pweight - tmp * zero_fraction * (depth - i) as f64;
        }
    } else {
        for i in (0..depth).rev() {
            total += path[i].pweight / (zero_fraction * (depth - i) as f64);
        }
    }

    total * (depth + 1) as f64
}
