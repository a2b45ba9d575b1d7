use super::conformer::Conformer;
use super::error::AnalysisError;
use super::stereo::{Approach, Facial, Orientation, StereoDescriptor};
use super::thermo::free_energy_diff;
use std::io::Write;

/// One conformer's worth of derived quantities, flattened for display and
/// export.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Numeric job index parsed from the string's working directory.
    pub conformer_index: usize,
    pub activation_energy: f64,
    pub reactant_energy: f64,
    pub ts_energy: f64,
    /// TS energy relative to the lowest reactant energy across the whole
    /// ensemble, kcal/mol.
    pub relative_ts_energy: f64,
    pub forming_bond_torsion: f64,
    pub formed_bond_torsion: f64,
    pub facial_torsion: f64,
    pub facial: Facial,
    pub approach: Approach,
    pub orientation: Orientation,
    pub product_stereo: StereoDescriptor,
}

/// The cross-conformer summary table of a finished search.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
}

impl SummaryTable {
    /// Assembles the table, computing each TS energy relative to the lowest
    /// reactant energy over all conformers.
    pub fn build<'a, I>(conformers: I) -> Self
    where
        I: IntoIterator<Item = (usize, &'a Conformer)>,
    {
        let mut rows: Vec<SummaryRow> = conformers
            .into_iter()
            .map(|(conformer_index, c)| SummaryRow {
                conformer_index,
                activation_energy: c.ts.activation_energy,
                reactant_energy: c.path.energies()[0],
                ts_energy: c.ts.energy,
                relative_ts_energy: 0.0, // filled in below
                forming_bond_torsion: c.forming_bond_torsion,
                formed_bond_torsion: c.formed_bond_torsion,
                facial_torsion: c.facial_torsion,
                facial: c.facial,
                approach: c.approach,
                orientation: c.orientation,
                product_stereo: c.product_stereo,
            })
            .collect();

        if let Some(min_reactant) = rows
            .iter()
            .map(|r| r.reactant_energy)
            .min_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        {
            for row in &mut rows {
                row.relative_ts_energy = row.ts_energy - min_reactant;
            }
        }

        rows.sort_by_key(|r| r.conformer_index);
        Self { rows }
    }

    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Free energy gap `G(S) - G(R)` between the two product stereochemistry
    /// ensembles, built from relative TS energies at the given temperature.
    ///
    /// Returns `None` when either ensemble is empty; the gap is undefined
    /// until both stereochemical outcomes have been observed.
    pub fn stereo_free_energy_gap(
        &self,
        temperature: f64,
    ) -> Result<Option<f64>, AnalysisError> {
        let energies_of = |descriptor: StereoDescriptor| -> Vec<f64> {
            self.rows
                .iter()
                .filter(|r| r.product_stereo == descriptor)
                .map(|r| r.relative_ts_energy)
                .collect()
        };
        let s = energies_of(StereoDescriptor::S);
        let r = energies_of(StereoDescriptor::R);
        if s.is_empty() || r.is_empty() {
            return Ok(None);
        }
        free_energy_diff(&s, &r, temperature).map(Some)
    }

    /// Writes the table as CSV.
    pub fn write_csv(&self, writer: impl Write) -> Result<(), AnalysisError> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record([
            "conf_idx",
            "activation_energy_kcal_mol",
            "reactant_energy_kcal_mol",
            "ts_energy_kcal_mol",
            "relative_ts_energy_kcal_mol",
            "forming_bond_torsion_deg",
            "formed_bond_torsion_deg",
            "facial_torsion_deg",
            "facial",
            "approach",
            "orientation",
            "product_stereo",
        ])?;
        for row in &self.rows {
            csv.write_record([
                row.conformer_index.to_string(),
                format!("{:.6}", row.activation_energy),
                format!("{:.6}", row.reactant_energy),
                format!("{:.6}", row.ts_energy),
                format!("{:.6}", row.relative_ts_energy),
                format!("{:.4}", row.forming_bond_torsion),
                format!("{:.4}", row.formed_bond_torsion),
                format!("{:.4}", row.facial_torsion),
                row.facial.to_string(),
                row.approach.to_string(),
                row.orientation.to_string(),
                row.product_stereo.to_string(),
            ])?;
        }
        csv.flush().map_err(|e| AnalysisError::Csv(e.into()))?;
        Ok(())
    }
}
