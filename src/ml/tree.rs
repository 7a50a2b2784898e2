// ============================================================
// Layer 5 — CART Decision Tree
// ============================================================
// A binary classification tree grown greedily on Gini impurity.
//
// Storage:
//   Nodes live in one Vec (an arena). Children are referenced by
//   index, so the tree is a flat, serde-friendly structure with
//   no Box/Rc pointers. The root is always node 0.
//
// Growth (one node at a time, explicit stack, no recursion):
//   1. Weighted class counts for the samples reaching the node
//   2. Stop and emit a leaf if the node is pure, too small,
//      or at max_depth
//   3. Shuffle feature order; examine features until
//      `max_features` non-constant ones have been tried
//   4. For each feature: sort samples, sweep every midpoint
//      between distinct neighbouring values, keep the split
//      with the lowest weighted child impurity
//   5. No valid split → leaf; otherwise push both children
//
// Sample weights carry the bootstrap: a sample drawn k times
// has weight k, a sample never drawn is not passed in at all.
//
// Reference: Breiman et al. (1984) Classification and Regression Trees

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Index of a node inside `DecisionTree::nodes`
pub type NodeId = usize;

/// A single tree node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Node {
    /// Samples with `x[feature] <= threshold` go left, the rest go right.
    Split {
        feature:   usize,
        threshold: f64,
        left:      NodeId,
        right:     NodeId,
    },
    /// Class probability distribution of the training samples
    /// that reached this leaf.
    Leaf { distribution: Vec<f64> },
}

/// Growth limits for a single tree.
#[derive(Debug, Clone, Copy)]
pub struct TreeParams {
    pub max_depth:         Option<usize>,
    pub min_samples_split: usize,
    pub min_samples_leaf:  usize,
    /// Number of non-constant features examined per split
    pub max_features:      usize,
}

/// A fitted classification tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    nodes:      Vec<Node>,
    n_classes:  usize,
    n_features: usize,
}

/// Best split found for one node.
struct Candidate {
    feature:   usize,
    threshold: f64,
    /// Weighted impurity of the two children (lower is better)
    child_impurity: f64,
}

/// Work item for the growth stack.
struct Pending {
    node:    NodeId,
    samples: Vec<usize>,
    depth:   usize,
}

impl DecisionTree {
    /// Grow a tree.
    ///
    /// * `x`       - all training rows (only `samples` are used)
    /// * `y`       - class index per row, `< n_classes`
    /// * `weights` - per-row weight, indexed like `x`
    /// * `samples` - rows that reach the root (weight > 0)
    ///
    /// Returns the tree and its un-normalised impurity decrease per feature.
    pub fn fit<R: Rng>(
        x:         &[Vec<f64>],
        y:         &[usize],
        weights:   &[f64],
        samples:   Vec<usize>,
        n_classes: usize,
        params:    &TreeParams,
        rng:       &mut R,
    ) -> (Self, Vec<f64>) {
        let n_features      = x.first().map_or(0, Vec::len);
        let mut importances = vec![0.0; n_features];
        let mut nodes       = vec![Node::Leaf { distribution: Vec::new() }];
        let mut stack       = vec![Pending { node: 0, samples, depth: 0 }];

        while let Some(Pending { node, samples, depth }) = stack.pop() {
            let counts = class_counts(y, weights, &samples, n_classes);
            let w_node: f64 = counts.iter().sum();
            let impurity = gini(&counts, w_node);

            let depth_reached = params.max_depth.is_some_and(|d| depth >= d);
            let too_small = samples.len() < params.min_samples_split
                || samples.len() < 2 * params.min_samples_leaf;

            if depth_reached || too_small || impurity <= f64::EPSILON {
                nodes[node] = leaf(&counts, w_node);
                continue;
            }

            let best = best_split(x, y, weights, &samples, &counts, w_node, params, rng);
            let Some(best) = best else {
                nodes[node] = leaf(&counts, w_node);
                continue;
            };

            let (left_samples, right_samples): (Vec<usize>, Vec<usize>) = samples
                .iter()
                .copied()
                .partition(|&i| x[i][best.feature] <= best.threshold);

            // A split that sends everything one way would be found again
            // on the child, forever
            if left_samples.is_empty() || right_samples.is_empty() {
                nodes[node] = leaf(&counts, w_node);
                continue;
            }

            importances[best.feature] += w_node * impurity - best.child_impurity;

            let left  = nodes.len();
            let right = left + 1;
            nodes.push(Node::Leaf { distribution: Vec::new() });
            nodes.push(Node::Leaf { distribution: Vec::new() });
            nodes[node] = Node::Split {
                feature:   best.feature,
                threshold: best.threshold,
                left,
                right,
            };

            stack.push(Pending { node: right, samples: right_samples, depth: depth + 1 });
            stack.push(Pending { node: left,  samples: left_samples,  depth: depth + 1 });
        }

        (Self { nodes, n_classes, n_features }, importances)
    }

    /// Class distribution of the leaf that `row` falls into
    pub fn predict_proba(&self, row: &[f64]) -> &[f64] {
        debug_assert_eq!(row.len(), self.n_features);
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Leaf { distribution } => return distribution,
                Node::Split { feature, threshold, left, right } => {
                    id = if row[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|n| matches!(n, Node::Leaf { .. })).count()
    }

    /// Length of the longest root-to-leaf path (a lone root has depth 0)
    pub fn depth(&self) -> usize {
        let mut max   = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((id, d)) = stack.pop() {
            max = max.max(d);
            if let Node::Split { left, right, .. } = &self.nodes[id] {
                stack.push((*left, d + 1));
                stack.push((*right, d + 1));
            }
        }
        max
    }
}

// ─── Split Search ─────────────────────────────────────────────────────────────

#[allow(clippy::too_many_arguments)]
fn best_split<R: Rng>(
    x:       &[Vec<f64>],
    y:       &[usize],
    weights: &[f64],
    samples: &[usize],
    counts:  &[f64],
    w_node:  f64,
    params:  &TreeParams,
    rng:     &mut R,
) -> Option<Candidate> {
    let n_features = x[samples[0]].len();
    let mut features: Vec<usize> = (0..n_features).collect();
    features.shuffle(rng);

    let mut order   = samples.to_vec();
    let mut best    = None::<Candidate>;
    let mut visited = 0usize;

    for f in features {
        if visited >= params.max_features {
            break;
        }

        order.sort_by(|&a, &b| x[a][f].total_cmp(&x[b][f]));
        let lo = x[order[0]][f];
        let hi = x[order[order.len() - 1]][f];
        // Constant features do not count towards max_features
        if lo == hi {
            continue;
        }
        visited += 1;

        let mut left_counts = vec![0.0; counts.len()];
        let mut w_left      = 0.0;

        for pos in 0..order.len() - 1 {
            let i = order[pos];
            left_counts[y[i]] += weights[i];
            w_left += weights[i];

            let v    = x[i][f];
            let next = x[order[pos + 1]][f];
            if !(next > v) {
                continue;
            }

            let n_left  = pos + 1;
            let n_right = order.len() - n_left;
            if n_left < params.min_samples_leaf || n_right < params.min_samples_leaf {
                continue;
            }

            let w_right = w_node - w_left;
            let right_counts: Vec<f64> = counts
                .iter()
                .zip(&left_counts)
                .map(|(c, l)| c - l)
                .collect();

            let child_impurity =
                w_left * gini(&left_counts, w_left) + w_right * gini(&right_counts, w_right);

            if best.as_ref().map_or(true, |b| child_impurity < b.child_impurity) {
                let mut threshold = v / 2.0 + next / 2.0;
                // Must satisfy v <= threshold < next: the midpoint can round
                // up to `next`, and is NaN for a -inf/+inf pair
                if !(threshold >= v && threshold < next) {
                    threshold = v;
                }
                best = Some(Candidate { feature: f, threshold, child_impurity });
            }
        }
    }

    best
}

// ─── Helpers ──────────────────────────────────────────────────────────────────

fn class_counts(y: &[usize], weights: &[f64], samples: &[usize], n_classes: usize) -> Vec<f64> {
    let mut counts = vec![0.0; n_classes];
    for &i in samples {
        counts[y[i]] += weights[i];
    }
    counts
}

/// Gini impurity: 1 - Σ p_k²
pub fn gini(counts: &[f64], total: f64) -> f64 {
    if total <= 0.0 {
        return 0.0;
    }
    1.0 - counts.iter().map(|c| (c / total).powi(2)).sum::<f64>()
}

fn leaf(counts: &[f64], total: f64) -> Node {
    let distribution = if total > 0.0 {
        counts.iter().map(|c| c / total).collect()
    } else {
        vec![0.0; counts.len()]
    };
    Node::Leaf { distribution }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn params(max_features: usize) -> TreeParams {
        TreeParams {
            max_depth:         None,
            min_samples_split: 2,
            min_samples_leaf:  1,
            max_features,
        }
    }

    fn grow(x: &[Vec<f64>], y: &[usize], p: &TreeParams) -> (DecisionTree, Vec<f64>) {
        let weights = vec![1.0; x.len()];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        DecisionTree::fit(x, y, &weights, (0..x.len()).collect(), 2, p, &mut rng)
    }

    #[test]
    fn test_gini_values() {
        assert_eq!(gini(&[4.0, 0.0], 4.0), 0.0);
        assert!((gini(&[2.0, 2.0], 4.0) - 0.5).abs() < 1e-12);
        assert_eq!(gini(&[0.0, 0.0], 0.0), 0.0);
    }

    #[test]
    fn test_separable_data_is_fit_exactly() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![10.0], vec![11.0], vec![12.0]];
        let y = vec![0, 0, 0, 1, 1, 1];
        let (tree, _) = grow(&x, &y, &params(1));

        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
        assert_eq!(tree.predict_proba(&[0.0]), &[1.0, 0.0]);
        assert_eq!(tree.predict_proba(&[50.0]), &[0.0, 1.0]);

        // Midpoint threshold between 3 and 10
        match &tree.nodes()[0] {
            Node::Split { threshold, .. } => assert_eq!(*threshold, 6.5),
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn test_pure_node_is_single_leaf() {
        let x = vec![vec![1.0], vec![2.0]];
        let y = vec![1, 1];
        let (tree, imp) = grow(&x, &y, &params(1));
        assert_eq!(tree.nodes().len(), 1);
        assert_eq!(imp, vec![0.0]);
    }

    #[test]
    fn test_constant_features_give_leaf() {
        let x = vec![vec![5.0, 5.0], vec![5.0, 5.0], vec![5.0, 5.0]];
        let y = vec![0, 1, 0];
        let (tree, _) = grow(&x, &y, &params(2));
        assert_eq!(tree.nodes().len(), 1);
        let p = tree.predict_proba(&[5.0, 5.0]);
        assert!((p[0] - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_constant_feature_skipped_for_informative_one() {
        // Feature 0 is constant, feature 1 separates the classes.
        // With max_features = 1 the constant one must not use up the budget.
        let x = vec![vec![0.0, 1.0], vec![0.0, 2.0], vec![0.0, 8.0], vec![0.0, 9.0]];
        let y = vec![0, 0, 1, 1];
        let (tree, imp) = grow(&x, &y, &params(1));
        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(imp[0], 0.0);
        assert!(imp[1] > 0.0);
    }

    #[test]
    fn test_max_depth_limits_growth() {
        let x: Vec<Vec<f64>> = (0..16).map(|i| vec![i as f64]).collect();
        let y: Vec<usize>    = (0..16).map(|i| i % 2).collect();
        let mut p = params(1);
        p.max_depth = Some(2);
        let (tree, _) = grow(&x, &y, &p);
        assert!(tree.depth() <= 2);
    }

    #[test]
    fn test_min_samples_leaf_respected() {
        let x = vec![vec![1.0], vec![2.0], vec![3.0], vec![4.0]];
        let y = vec![0, 1, 1, 1];
        let mut p = params(1);
        p.min_samples_leaf = 2;
        let (tree, _) = grow(&x, &y, &p);
        // Only the 2|2 split is allowed
        match &tree.nodes()[0] {
            Node::Split { threshold, .. } => assert_eq!(*threshold, 2.5),
            other => panic!("expected split, got {other:?}"),
        }
    }

    #[test]
    fn test_infinite_neighbours_split_cleanly() {
        let x = vec![vec![f64::NEG_INFINITY], vec![f64::INFINITY]];
        let y = vec![0, 1];
        let mut p = params(1);
        p.max_depth = Some(50);
        let (tree, _) = grow(&x, &y, &p);

        assert_eq!(tree.n_leaves(), 2);
        assert_eq!(tree.depth(), 1);
        match &tree.nodes()[0] {
            Node::Split { threshold, .. } => assert_eq!(*threshold, f64::NEG_INFINITY),
            other => panic!("expected split, got {other:?}"),
        }
        assert_eq!(tree.predict_proba(&[f64::NEG_INFINITY]), &[1.0, 0.0]);
        assert_eq!(tree.predict_proba(&[f64::INFINITY]), &[0.0, 1.0]);
    }

    #[test]
    fn test_weights_shift_leaf_distribution() {
        let x       = vec![vec![1.0], vec![1.0]];
        let y       = vec![0, 1];
        let weights = vec![3.0, 1.0];
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let (tree, _) =
            DecisionTree::fit(&x, &y, &weights, vec![0, 1], 2, &params(1), &mut rng);
        assert_eq!(tree.predict_proba(&[1.0]), &[0.75, 0.25]);
    }
}
