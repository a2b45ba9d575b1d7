use super::error::AnalysisError;
use super::stereo::{self, Approach, Facial, Orientation, StereoDescriptor};
use super::ts::{TsNode, ts_node};
use crate::core::io::energy::read_base_energy_hartree;
use crate::core::io::traits::TrajectoryFile;
use crate::core::io::xyz::{XyzFile, XyzFrame};
use crate::core::models::molecule::Molecule;
use crate::core::models::path::ReactionPath;
use crate::core::utils::geometry::dihedral_degrees;
use crate::core::utils::units::KCAL_PER_HARTREE;
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Four 0-based atom indices defining a measured torsion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TorsionSpec(pub [usize; 4]);

impl TorsionSpec {
    /// Measures this torsion on a structure, in degrees on (-180, 180].
    pub fn measure(&self, molecule: &Molecule) -> Result<f64, AnalysisError> {
        let [a, b, c, d] = self.0;
        let position = |index: usize| {
            molecule
                .position(index)
                .ok_or(AnalysisError::TorsionIndexOutOfRange {
                    index,
                    atom_count: molecule.atom_count(),
                })
        };
        dihedral_degrees(position(a)?, position(b)?, position(c)?, position(d)?)
            .ok_or(AnalysisError::DegenerateTorsion { atoms: self.0 })
    }
}

/// The torsions a conformer record measures: the bond being formed (measured
/// on both the transition state and the product) and the torsion judging
/// which face of the catalyst the substrate sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct TorsionSpecs {
    pub forming_bond: TorsionSpec,
    pub facial: TorsionSpec,
}

/// One reaction-path trajectory plus everything derived from it.
///
/// Constructed once per string output file when an analysis loads data;
/// immutable thereafter, and rebuilt wholesale on refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct Conformer {
    pub path: ReactionPath,
    pub ts: TsNode,
    /// Torsion of the bond being formed, measured on the transition state.
    pub forming_bond_torsion: f64,
    /// Facial torsion, measured on the transition state.
    pub facial_torsion: f64,
    /// Torsion of the formed bond, measured on the product.
    pub formed_bond_torsion: f64,
    pub facial: Facial,
    pub approach: Approach,
    pub orientation: Orientation,
    pub product_stereo: StereoDescriptor,
}

impl Conformer {
    /// Builds a conformer record from an already-assembled reaction path.
    pub fn from_path(path: ReactionPath, torsions: &TorsionSpecs) -> Result<Self, AnalysisError> {
        let ts = ts_node(path.energies())?;
        let ts_structure = path
            .node(ts.index)
            .expect("ts_node returns an index within the path");
        let product = path.product();

        let forming_bond_torsion = torsions.forming_bond.measure(ts_structure)?;
        let facial_torsion = torsions.facial.measure(ts_structure)?;
        let formed_bond_torsion = torsions.forming_bond.measure(product)?;

        let facial = stereo::facial(facial_torsion);
        let approach = stereo::approach(forming_bond_torsion, facial);
        let orientation = stereo::orientation(forming_bond_torsion);
        let product_stereo = stereo::product_stereo(formed_bond_torsion);

        Ok(Self {
            path,
            ts,
            forming_bond_torsion,
            facial_torsion,
            formed_bond_torsion,
            facial,
            approach,
            orientation,
            product_stereo,
        })
    }

    /// Loads a conformer record from a converged string output file.
    ///
    /// `path_file` is the multi-structure XYZ written by the external driver
    /// (e.g. `scratch/string_0003/opt_converged_003.xyz`). The node energies
    /// are reconstructed from the driver's scratch base energy
    /// (`scratch/000/E_0.txt` next to the path file) plus the per-node offset
    /// stored as the first token of each frame's comment line, and converted
    /// to kcal/mol.
    pub fn load(path_file: &Path, torsions: &TorsionSpecs) -> Result<Self, AnalysisError> {
        let frames = XyzFile::read_from_path(path_file)?;

        let job_dir = path_file.parent().unwrap_or_else(|| Path::new("."));
        let base_energy_path = job_dir.join("scratch").join("000").join("E_0.txt");
        let base_hartree = read_base_energy_hartree(&base_energy_path)?;
        debug!(
            "Base energy {:.8} hartree from {}",
            base_hartree,
            base_energy_path.display()
        );

        let energies = node_energies_kcal(&frames, base_hartree)?;
        let nodes = frames.into_iter().map(|f| f.molecule).collect();
        let path = ReactionPath::new(nodes, energies)?;
        Self::from_path(path, torsions)
    }
}

/// Absolute node energies in kcal/mol: scratch base energy plus the offset
/// each frame carries as the first token of its comment line.
fn node_energies_kcal(frames: &[XyzFrame], base_hartree: f64) -> Result<Vec<f64>, AnalysisError> {
    frames
        .iter()
        .enumerate()
        .map(|(node, frame)| {
            let token = frame.comment.split_whitespace().next().unwrap_or("");
            let offset: f64 = token
                .parse()
                .map_err(|_| AnalysisError::MalformedNodeEnergy {
                    node,
                    value: token.to_string(),
                })?;
            Ok((base_hartree + offset) * KCAL_PER_HARTREE)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::element::Element;
    use crate::core::models::molecule::Atom;
    use nalgebra::Point3;
    use std::io::Write;

    const TOLERANCE: f64 = 1e-9;

    /// Four-carbon chain whose 0-1-2-3 torsion is the given angle, built by
    /// rotating the last atom around the 1→2 axis (the x axis).
    fn chain_with_torsion(angle_degrees: f64) -> Molecule {
        let c: Element = "C".parse().unwrap();
        let theta = angle_degrees.to_radians();
        Molecule::new(vec![
            Atom::new(c, Point3::new(1.0, 1.0, 0.0)),
            Atom::new(c, Point3::new(1.0, 0.0, 0.0)),
            Atom::new(c, Point3::new(2.5, 0.0, 0.0)),
            // at theta = 0 the chain is cis (torsion 0); positive theta turns
            // toward -z, which the sign convention reports as positive
            Atom::new(c, Point3::new(2.5, theta.cos(), -theta.sin())),
        ])
    }

    fn specs() -> TorsionSpecs {
        TorsionSpecs {
            forming_bond: TorsionSpec([0, 1, 2, 3]),
            facial: TorsionSpec([0, 1, 2, 3]),
        }
    }

    fn path_with_ts_torsions(ts_angle: f64, product_angle: f64) -> ReactionPath {
        let nodes = vec![
            chain_with_torsion(10.0),
            chain_with_torsion(ts_angle),
            chain_with_torsion(product_angle),
        ];
        // profile [0, 20, -5]: drops [0-(-5), 20-(-5)] -> ts at index 1
        ReactionPath::new(nodes, vec![0.0, 20.0, -5.0]).unwrap()
    }

    #[test]
    fn torsion_spec_measures_the_built_angle() {
        let mol = chain_with_torsion(60.0);
        let angle = TorsionSpec([0, 1, 2, 3]).measure(&mol).unwrap();
        assert!((angle - 60.0).abs() < TOLERANCE);

        let mol = chain_with_torsion(-120.0);
        let angle = TorsionSpec([0, 1, 2, 3]).measure(&mol).unwrap();
        assert!((angle - (-120.0)).abs() < TOLERANCE);
    }

    #[test]
    fn torsion_spec_rejects_out_of_range_indices() {
        let mol = chain_with_torsion(0.0);
        let err = TorsionSpec([0, 1, 2, 9]).measure(&mol).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::TorsionIndexOutOfRange {
                index: 9,
                atom_count: 4
            }
        ));
    }

    #[test]
    fn conformer_derives_labels_from_the_right_structures() {
        let path = path_with_ts_torsions(45.0, -30.0);
        let conformer = Conformer::from_path(path, &specs()).unwrap();

        assert_eq!(conformer.ts.index, 1);
        assert!((conformer.forming_bond_torsion - 45.0).abs() < TOLERANCE);
        assert!((conformer.formed_bond_torsion - (-30.0)).abs() < TOLERANCE);
        assert_eq!(conformer.facial, Facial::Proximal);
        assert_eq!(conformer.approach, Approach::Exo);
        assert_eq!(conformer.orientation, Orientation::Syn);
        assert_eq!(conformer.product_stereo, StereoDescriptor::R);
    }

    #[test]
    fn distal_transition_state_flips_the_approach() {
        let path = path_with_ts_torsions(135.0, 30.0);
        let conformer = Conformer::from_path(path, &specs()).unwrap();

        assert_eq!(conformer.facial, Facial::Distal);
        assert_eq!(conformer.approach, Approach::Endo);
        assert_eq!(conformer.orientation, Orientation::Anti);
        assert_eq!(conformer.product_stereo, StereoDescriptor::S);
    }

    #[test]
    fn load_reconstructs_energies_from_scratch_base() {
        let dir = tempfile::tempdir().unwrap();
        let job_dir = dir.path().join("string_0000");
        std::fs::create_dir_all(job_dir.join("scratch").join("000")).unwrap();
        std::fs::write(job_dir.join("scratch").join("000").join("E_0.txt"), "0 0 -2.0\n")
            .unwrap();

        let frames: Vec<XyzFrame> = [("0.000000", 10.0), ("0.050000", 45.0), ("0.010000", -30.0)]
            .iter()
            .map(|(offset, angle)| XyzFrame {
                comment: offset.to_string(),
                molecule: chain_with_torsion(*angle),
            })
            .collect();
        let path_file = job_dir.join("opt_converged_000.xyz");
        XyzFile::write_to_path(&frames, &path_file).unwrap();

        let conformer = Conformer::load(&path_file, &specs()).unwrap();
        let energies = conformer.path.energies();
        assert_eq!(energies.len(), 3);
        assert!((energies[0] - (-2.0 * KCAL_PER_HARTREE)).abs() < 1e-6);
        assert!((energies[1] - (-1.95 * KCAL_PER_HARTREE)).abs() < 1e-6);
        // highest node is the middle one
        assert_eq!(conformer.ts.index, 1);
        assert!(
            (conformer.ts.activation_energy - 0.05 * KCAL_PER_HARTREE).abs() < 1e-6
        );
    }

    #[test]
    fn malformed_comment_energy_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("scratch").join("000")).unwrap();
        let mut file =
            std::fs::File::create(dir.path().join("scratch").join("000").join("E_0.txt")).unwrap();
        writeln!(file, "0 0 -2.0").unwrap();

        let frames = vec![
            XyzFrame {
                comment: "converged".to_string(),
                molecule: chain_with_torsion(0.0),
            },
            XyzFrame {
                comment: "0.5".to_string(),
                molecule: chain_with_torsion(5.0),
            },
        ];
        let path_file = dir.path().join("opt_converged_000.xyz");
        XyzFile::write_to_path(&frames, &path_file).unwrap();

        let err = Conformer::load(&path_file, &specs()).unwrap_err();
        assert!(matches!(
            err,
            AnalysisError::MalformedNodeEnergy { node: 0, .. }
        ));
    }
}
