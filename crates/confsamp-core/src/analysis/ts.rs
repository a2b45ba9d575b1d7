use super::error::AnalysisError;

/// The transition state selected from one reaction path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TsNode {
    /// Index of the transition-state node along the path.
    pub index: usize,
    /// Absolute energy of the transition-state node, kcal/mol.
    pub energy: f64,
    /// The one-sided forward energy drop that selected the node:
    /// `energies[index] - min(energies[index+1..])`.
    pub max_diff: f64,
    /// Barrier relative to the first node: `energies[index] - energies[0]`.
    pub activation_energy: f64,
}

/// Selects the transition state of an ordered energy profile.
///
/// For each index `i`, the one-sided forward drop is the node's energy minus
/// the lowest energy among all later nodes; the transition state is the index
/// maximizing that drop (the first such index on ties). This is the
/// highest-energy point the path still has to descend from, so a profile that
/// only ever goes downhill has its transition state at the first node and an
/// activation energy of zero.
///
/// # Errors
///
/// Returns [`AnalysisError::TooFewNodes`] for profiles with fewer than two
/// points; a single point has no later node to compare against.
pub fn ts_node(energies: &[f64]) -> Result<TsNode, AnalysisError> {
    if energies.len() < 2 {
        return Err(AnalysisError::TooFewNodes {
            found: energies.len(),
        });
    }

    let mut best_index = 0;
    let mut best_diff = f64::NEG_INFINITY;
    for i in 0..energies.len() - 1 {
        let later_min = energies[i + 1..]
            .iter()
            .fold(f64::INFINITY, |acc, &e| acc.min(e));
        let diff = energies[i] - later_min;
        if diff > best_diff {
            best_diff = diff;
            best_index = i;
        }
    }

    Ok(TsNode {
        index: best_index,
        energy: energies[best_index],
        max_diff: best_diff,
        activation_energy: energies[best_index] - energies[0],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn canonical_profile_selects_index_3() {
        let ts = ts_node(&[0.0, 5.0, 2.0, 8.0, 1.0]).unwrap();
        assert_eq!(ts.index, 3);
        assert!(f64_approx_equal(ts.energy, 8.0));
        assert!(f64_approx_equal(ts.max_diff, 7.0));
        assert!(f64_approx_equal(ts.activation_energy, 8.0));
    }

    #[test]
    fn monotonically_decreasing_profile_has_zero_barrier() {
        let ts = ts_node(&[5.0, 4.0, 3.0, 2.0]).unwrap();
        assert_eq!(ts.index, 0);
        assert!(f64_approx_equal(ts.activation_energy, 0.0));
    }

    #[test]
    fn hand_computed_small_profiles() {
        // drops: [1-2, 3-2] -> ts at index 1
        let ts = ts_node(&[1.0, 3.0, 2.0]).unwrap();
        assert_eq!((ts.index, ts.energy), (1, 3.0));
        assert!(f64_approx_equal(ts.max_diff, 1.0));
        assert!(f64_approx_equal(ts.activation_energy, 2.0));

        // drops: [0-1, 2-1, 6-1, 4-1] -> the peak at index 2 wins
        let ts = ts_node(&[0.0, 2.0, 6.0, 4.0, 1.0]).unwrap();
        assert_eq!(ts.index, 2);
        assert!(f64_approx_equal(ts.max_diff, 5.0));
        assert!(f64_approx_equal(ts.activation_energy, 6.0));

        // strictly uphill: every drop is -1, ties resolve to the first node
        let ts = ts_node(&[0.0, 1.0, 2.0, 3.0]).unwrap();
        assert_eq!(ts.index, 0);
        assert!(f64_approx_equal(ts.max_diff, -1.0));
        assert!(f64_approx_equal(ts.activation_energy, 0.0));

        // drops: [2-0, 9-0, 9-0, 0-1, 5-1] -> twin peaks, first one wins
        let ts = ts_node(&[2.0, 9.0, 9.0, 0.0, 5.0, 1.0]).unwrap();
        assert_eq!(ts.index, 1);
        assert!(f64_approx_equal(ts.max_diff, 9.0));
        assert!(f64_approx_equal(ts.activation_energy, 7.0));
    }

    #[test]
    fn ties_pick_the_first_index() {
        // drops: [5-3, 4-3] -> index 0 wins outright
        let ts = ts_node(&[5.0, 4.0, 3.0]).unwrap();
        assert_eq!(ts.index, 0);

        // drops: [2, 0, 2] -> indices 0 and 2 tie, first wins
        let ts = ts_node(&[5.0, 3.0, 5.0, 3.0]).unwrap();
        assert_eq!(ts.index, 0);
    }

    #[test]
    fn fewer_than_two_nodes_is_an_error() {
        assert!(matches!(
            ts_node(&[]).unwrap_err(),
            AnalysisError::TooFewNodes { found: 0 }
        ));
        assert!(matches!(
            ts_node(&[1.0]).unwrap_err(),
            AnalysisError::TooFewNodes { found: 1 }
        ));
    }

    #[test]
    fn two_nodes_select_the_first() {
        let ts = ts_node(&[1.0, 4.0]).unwrap();
        assert_eq!(ts.index, 0);
        assert!(f64_approx_equal(ts.max_diff, -3.0));
        assert!(f64_approx_equal(ts.activation_energy, 0.0));
    }
}
