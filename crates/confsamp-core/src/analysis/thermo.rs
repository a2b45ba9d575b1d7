use super::error::AnalysisError;
use crate::core::utils::units::GAS_CONSTANT_KCAL;

/// Boltzmann-weighted conformational free energy of an ensemble, kcal/mol:
/// `G = -RT ln Σᵢ exp(-Eᵢ/RT)`.
///
/// Energies are relative to any common reference; the reference cancels in
/// [`free_energy_diff`]. Evaluated against the ensemble minimum for numerical
/// stability, so large absolute energies do not overflow the exponentials.
pub fn ensemble_free_energy(energies: &[f64], temperature: f64) -> Result<f64, AnalysisError> {
    if energies.is_empty() {
        return Err(AnalysisError::EmptyEnsemble);
    }
    let rt = GAS_CONSTANT_KCAL * temperature;
    let min = energies.iter().fold(f64::INFINITY, |acc, &e| acc.min(e));
    let partition: f64 = energies.iter().map(|&e| (-(e - min) / rt).exp()).sum();
    Ok(min - rt * partition.ln())
}

/// Free energy difference `G(a) - G(b)` between two conformer ensembles at
/// the given temperature (kelvin), with energies in kcal/mol.
pub fn free_energy_diff(a: &[f64], b: &[f64], temperature: f64) -> Result<f64, AnalysisError> {
    Ok(ensemble_free_energy(a, temperature)? - ensemble_free_energy(b, temperature)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-9;

    #[test]
    fn single_conformer_free_energy_is_its_energy() {
        let g = ensemble_free_energy(&[3.2], 358.15).unwrap();
        assert!((g - 3.2).abs() < TOLERANCE);
    }

    #[test]
    fn identical_ensembles_have_zero_difference() {
        let energies = [0.0, 1.5, 2.0];
        let diff = free_energy_diff(&energies, &energies, 358.15).unwrap();
        assert!(diff.abs() < TOLERANCE);
    }

    #[test]
    fn extra_degenerate_conformers_lower_the_free_energy() {
        let t = 358.15;
        let rt = GAS_CONSTANT_KCAL * t;
        let one = ensemble_free_energy(&[1.0], t).unwrap();
        let two = ensemble_free_energy(&[1.0, 1.0], t).unwrap();
        // doubling the degeneracy lowers G by RT ln 2
        assert!((one - two - rt * 2.0f64.ln()).abs() < TOLERANCE);
    }

    #[test]
    fn ensemble_minimum_dominates_at_low_temperature() {
        let g = ensemble_free_energy(&[0.0, 5.0, 10.0], 10.0).unwrap();
        assert!(g.abs() < 1e-6);
    }

    #[test]
    fn large_absolute_energies_do_not_overflow() {
        let g = ensemble_free_energy(&[-95000.0, -94999.0], 358.15).unwrap();
        assert!(g.is_finite());
        assert!(g <= -95000.0 + TOLERANCE);
    }

    #[test]
    fn empty_ensemble_is_an_error() {
        assert!(matches!(
            free_energy_diff(&[], &[1.0], 358.15).unwrap_err(),
            AnalysisError::EmptyEnsemble
        ));
    }
}
