use nalgebra::Point3;

/// Minimum norm below which a bond or normal vector is treated as degenerate.
const DEGENERACY_EPS: f64 = 1e-10;

/// Signed dihedral angle defined by four points, in degrees on (-180, 180].
///
/// The angle is measured between the plane (p0, p1, p2) and the plane
/// (p1, p2, p3), with the sign following the IUPAC convention (positive for a
/// clockwise rotation looking down the p1→p2 axis). Returns `None` when any
/// three consecutive points are collinear, which leaves the torsion undefined.
pub fn dihedral_degrees(
    p0: &Point3<f64>,
    p1: &Point3<f64>,
    p2: &Point3<f64>,
    p3: &Point3<f64>,
) -> Option<f64> {
    let b0 = p1 - p0;
    let b1 = p2 - p1;
    let b2 = p3 - p2;

    let n0 = b0.cross(&b1);
    let n1 = b1.cross(&b2);
    if n0.norm() < DEGENERACY_EPS || n1.norm() < DEGENERACY_EPS || b1.norm() < DEGENERACY_EPS {
        return None;
    }

    let m = n0.cross(&b1.normalize());
    let x = n0.dot(&n1);
    let y = m.dot(&n1);
    let mut angle = y.atan2(x).to_degrees();

    // Canonical range is (-180, 180]; atan2 yields [-180, 180].
    if angle <= -180.0 {
        angle += 360.0;
    }
    Some(angle)
}
