//! Model-matrix composition for placing primitives.

use cgmath::{Deg, Matrix, Matrix3, Matrix4, SquareMatrix, Vector3};

/// Scale, then rotate about X, Y and Z (degrees), then translate.
///
/// Equivalent to `T * Rz * Ry * Rx * S`.
pub fn model_matrix(
    scale: Vector3<f32>,
    x_rotation_degrees: f32,
    y_rotation_degrees: f32,
    z_rotation_degrees: f32,
    position: Vector3<f32>,
) -> Matrix4<f32> {
    Matrix4::from_translation(position)
        * Matrix4::from_angle_z(Deg(z_rotation_degrees))
        * Matrix4::from_angle_y(Deg(y_rotation_degrees))
        * Matrix4::from_angle_x(Deg(x_rotation_degrees))
        * Matrix4::from_nonuniform_scale(scale.x, scale.y, scale.z)
}

/// Inverse-transpose of the upper 3x3 of `model`, widened back to 4x4 so it
/// packs like the other matrices. Singular models (a zero scale axis) get the
/// identity.
pub fn normal_matrix(model: &Matrix4<f32>) -> Matrix4<f32> {
    let upper = Matrix3::from_cols(
        model.x.truncate(),
        model.y.truncate(),
        model.z.truncate(),
    );
    match upper.invert() {
        Some(inverse) => Matrix4::from(inverse.transpose()),
        None => Matrix4::identity(),
    }
}

/// Translation column of an affine matrix.
pub fn translation(matrix: &Matrix4<f32>) -> Vector3<f32> {
    matrix.w.truncate()
}
