use glam::{DMat4, DQuat, DVec3, EulerRot};

/// Local transform as the host stores it: location, Euler XYZ rotation in
/// radians and per-axis scale.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    translation: DVec3,
    rotation: DVec3,
    scale: DVec3,
}

impl Transform {
    pub fn new(translation: DVec3, rotation: DVec3, scale: DVec3) -> Self {
        Self {
            translation,
            rotation,
            scale,
        }
    }

    pub fn from_translation(translation: DVec3) -> Self {
        Self::new(translation, DVec3::ZERO, DVec3::ONE)
    }

    /// Builds a transform from a quaternion, e.g. a glTF node rotation.
    pub fn from_quat(translation: DVec3, rotation: DQuat, scale: DVec3) -> Self {
        let (z, y, x) = rotation.to_euler(EulerRot::ZYX);
        Self::new(translation, DVec3::new(x, y, z), scale)
    }

    // Euler XYZ applies X first, so the matrix is Rz * Ry * Rx.
    pub fn rotation_quat(&self) -> DQuat {
        DQuat::from_euler(
            EulerRot::ZYX,
            self.rotation.z,
            self.rotation.y,
            self.rotation.x,
        )
    }

    pub fn local_matrix(&self) -> DMat4 {
        DMat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }

    pub fn translation(&self) -> DVec3 {
        self.translation
    }

    pub fn rotation(&self) -> DVec3 {
        self.rotation
    }

    pub fn scale(&self) -> DVec3 {
        self.scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::from_translation(DVec3::ZERO)
    }
}
