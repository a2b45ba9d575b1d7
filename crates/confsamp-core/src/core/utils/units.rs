//! Physical constants and unit conversions.
//!
//! Energies cross two unit systems in this toolkit: the external driver
//! reports hartree (atomic units), while every derived quantity is kept in
//! kcal/mol.

/// Conversion factor from hartree to kcal/mol.
pub const KCAL_PER_HARTREE: f64 = 627.5094740631;

/// Molar gas constant in kcal/(mol·K).
pub const GAS_CONSTANT_KCAL: f64 = 1.987204259e-3;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_hartree_is_about_627_kcal() {
        assert!((KCAL_PER_HARTREE - 627.509).abs() < 1e-3);
    }

    #[test]
    fn rt_at_room_temperature_is_about_0_6_kcal() {
        let rt = GAS_CONSTANT_KCAL * 298.15;
        assert!((rt - 0.5925).abs() < 1e-3);
    }
}
