use crate::Vec3;

/// Build two unit vectors completing `w` to a right-handed orthonormal frame.
///
/// `w` must be unit length. The helper axis switches from X to Y once `w`
/// leans more than 0.1 towards X so the cross product never degenerates.
pub fn orthonormal_basis(w: Vec3) -> (Vec3, Vec3) {
    let helper = if w.x.abs() > 0.1 { Vec3::Y } else { Vec3::X };
    let u = helper.cross(w).normalize();
    let v = w.cross(u);
    (u, v)
}
