/// Fixed-size vector and 4x4 matrix algebra
///
/// Everything here is a `Copy` value type and every operation returns a fresh
/// value; operands are never mutated. Matrices are row-major and act on
/// column vectors, so in `matmul(a, b)` the transform `b` is applied first.
use nalgebra::{Matrix4, Vector3, Vector4};

/// A direction or position in world/camera space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Right-handed cross product `self × other`.
    pub fn cross(self, other: Vec3) -> Vec3 {
        Vec3::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Scale to unit length.
    ///
    /// The caller must pass a vector of non-zero length. A zero vector yields
    /// NaN components; nothing here checks for it.
    pub fn normalize(self) -> Vec3 {
        let length = self.length();
        Vec3::new(self.x / length, self.y / length, self.z / length)
    }

    pub fn add(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// `self - other`
    pub fn sub(self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    pub fn neg(self) -> Vec3 {
        Vec3::new(-self.x, -self.y, -self.z)
    }

    pub fn scale(self, factor: f32) -> Vec3 {
        Vec3::new(self.x * factor, self.y * factor, self.z * factor)
    }

    /// Lift into homogeneous coordinates with the given `w`.
    pub fn extend(self, w: f32) -> Vec4 {
        Vec4::new(self.x, self.y, self.z, w)
    }
}

/// A homogeneous point (`w = 1`) or direction (`w = 0`). After projection
/// `w` carries the perspective depth.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Vec4 {
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    pub const fn point(x: f32, y: f32, z: f32) -> Self {
        Self::new(x, y, z, 1.0)
    }

    pub fn dot(self, other: Vec4) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    pub fn xyz(self) -> Vec3 {
        Vec3::new(self.x, self.y, self.z)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.x, self.y, self.z, self.w]
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(v: [f32; 4]) -> Self {
        Vec4::new(v[0], v[1], v[2], v[3])
    }
}

/// Row-major 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub rows: [[f32; 4]; 4],
}

impl Mat4 {
    pub const IDENTITY: Mat4 = Mat4::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        Self { rows }
    }

    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.rows[row][col]
    }

    pub fn row(&self, index: usize) -> Vec4 {
        Vec4::from(self.rows[index])
    }

    pub fn column(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.rows[0][index],
            self.rows[1][index],
            self.rows[2][index],
            self.rows[3][index],
        )
    }

    pub fn max_abs_diff(&self, other: &Mat4) -> f32 {
        self.rows
            .iter()
            .flatten()
            .zip(other.rows.iter().flatten())
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f32::max)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Compose two transforms: `a · b`. Not commutative; applied to a vector,
/// `b` acts first.
pub fn matmul(a: &Mat4, b: &Mat4) -> Mat4 {
    let mut rows = [[0.0; 4]; 4];
    for (i, out_row) in rows.iter_mut().enumerate() {
        let row = a.row(i);
        for (j, cell) in out_row.iter_mut().enumerate() {
            *cell = row.dot(b.column(j));
        }
    }
    Mat4::from_rows(rows)
}

/// Apply `m` to the homogeneous vector `v`.
pub fn matvec(m: &Mat4, v: Vec4) -> Vec4 {
    Vec4::new(
        m.row(0).dot(v),
        m.row(1).dot(v),
        m.row(2).dot(v),
        m.row(3).dot(v),
    )
}

/// Chain several transforms left to right: `chain(&[p, v, m]) == p · v · m`.
pub fn chain(matrices: &[Mat4]) -> Mat4 {
    matrices
        .iter()
        .fold(Mat4::IDENTITY, |acc, m| matmul(&acc, m))
}

impl From<Mat4> for Matrix4<f32> {
    fn from(m: Mat4) -> Self {
        let r = m.rows;
        Matrix4::new(
            r[0][0], r[0][1], r[0][2], r[0][3],
            r[1][0], r[1][1], r[1][2], r[1][3],
            r[2][0], r[2][1], r[2][2], r[2][3],
            r[3][0], r[3][1], r[3][2], r[3][3],
        )
    }
}

impl From<Matrix4<f32>> for Mat4 {
    fn from(m: Matrix4<f32>) -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = m[(i, j)];
            }
        }
        Mat4::from_rows(rows)
    }
}

impl From<Vec3> for Vector3<f32> {
    fn from(v: Vec3) -> Self {
        Vector3::new(v.x, v.y, v.z)
    }
}

impl From<Vector3<f32>> for Vec3 {
    fn from(v: Vector3<f32>) -> Self {
        Vec3::new(v.x, v.y, v.z)
    }
}

impl From<Vec4> for Vector4<f32> {
    fn from(v: Vec4) -> Self {
        Vector4::new(v.x, v.y, v.z, v.w)
    }
}

impl From<Vector4<f32>> for Vec4 {
    fn from(v: Vector4<f32>) -> Self {
        Vec4::new(v.x, v.y, v.z, v.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Mat4 {
        Mat4::from_rows([
            [1.0, 2.0, 3.0, 4.0],
            [5.0, 6.0, 7.0, 8.0],
            [9.0, 10.0, 11.0, 12.0],
            [13.0, 14.0, 15.0, 16.0],
        ])
    }

    #[test]
    fn test_dot_and_cross() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
        assert_eq!(a.cross(b), b.cross(a).neg());
        assert_eq!(
            Vec4::new(1.0, 2.0, 3.0, 4.0).dot(Vec4::new(1.0, 1.0, 1.0, 1.0)),
            10.0
        );
    }

    #[test]
    fn test_cross_is_right_handed() {
        let x = Vec3::new(1.0, 0.0, 0.0);
        let y = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(x.cross(y), Vec3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn test_normalize() {
        let v = Vec3::new(3.0, 0.0, 4.0).normalize();
        assert!((v.length() - 1.0).abs() < 1e-6);
        assert!((v.x - 0.6).abs() < 1e-6);
        assert!((v.z - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_normalize_zero_is_not_finite() {
        let v = Vec3::ZERO.normalize();
        assert!(!v.x.is_finite());
    }

    #[test]
    fn test_nan_propagates() {
        let v = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(v.dot(Vec3::new(1.0, 1.0, 1.0)).is_nan());
    }

    #[test]
    fn test_sub_and_neg_leave_operands_alone() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(0.5, 0.5, 0.5);
        assert_eq!(a.sub(b), Vec3::new(0.5, 1.5, 2.5));
        assert_eq!(a.neg(), Vec3::new(-1.0, -2.0, -3.0));
        assert_eq!(a, Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_identity_round_trip() {
        let m = sample();
        assert_eq!(matmul(&m, &Mat4::IDENTITY), m);
        assert_eq!(matmul(&Mat4::IDENTITY, &m), m);

        let v = Vec4::new(-1.5, 2.25, 7.0, 1.0);
        assert_eq!(matvec(&Mat4::IDENTITY, v), v);
    }

    #[test]
    fn test_matmul_matches_nalgebra() {
        let a = sample();
        let b = Mat4::from_rows([
            [0.0, 1.0, 0.0, 2.0],
            [-1.0, 0.0, 0.0, 0.5],
            [0.0, 0.0, 1.0, -3.0],
            [0.0, 0.0, 0.0, 1.0],
        ]);
        let expected = Matrix4::from(a) * Matrix4::from(b);
        assert_eq!(matmul(&a, &b), Mat4::from(expected));

        let v = Vec4::new(1.0, -2.0, 0.5, 1.0);
        let expected = Matrix4::from(a) * Vector4::from(v);
        assert_eq!(matvec(&a, v), Vec4::from(expected));
    }

    #[test]
    fn test_chain_order() {
        let a = sample();
        let b = Mat4::from_rows([
            [2.0, 0.0, 0.0, 0.0],
            [0.0, 3.0, 0.0, 0.0],
            [0.0, 0.0, 4.0, 0.0],
            [1.0, 0.0, 0.0, 1.0],
        ]);
        assert_eq!(chain(&[a, b]), matmul(&a, &b));
        assert_eq!(chain(&[]), Mat4::IDENTITY);
    }

    #[test]
    fn test_nalgebra_round_trip() {
        let m = sample();
        assert_eq!(Mat4::from(Matrix4::from(m)), m);
        // nalgebra indexes (row, col) regardless of storage order
        assert_eq!(Matrix4::from(m)[(0, 3)], 4.0);
    }
}
