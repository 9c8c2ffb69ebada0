//! Fixed-size vector and matrix primitives.

use std::fmt;

/// 3D vector `[x, y, z]`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3::new(0.0, 0.0, 0.0);

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(&self, other: &Vec3) -> f64 {
        dot_product(self, other)
    }

    /// Components in `x, y, z` order.
    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(v: [f64; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// 3x3 matrix stored column-major.
///
/// ```text
/// col[0]  col[1]  col[2]
///
///   x1      x2      x3
///   y1      y2      y3
///   z1      z2      z3
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Mat33 {
    pub cols: [Vec3; 3],
}

impl Mat33 {
    pub const ZERO: Mat33 = Mat33::from_columns([Vec3::ZERO, Vec3::ZERO, Vec3::ZERO]);

    pub const IDENTITY: Mat33 = Mat33::from_columns([
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
    ]);

    pub const fn from_columns(cols: [Vec3; 3]) -> Self {
        Self { cols }
    }

    /// Build from three `[x, y, z]` column arrays.
    pub fn from_column_arrays(cols: [[f64; 3]; 3]) -> Self {
        Self::from_columns([cols[0].into(), cols[1].into(), cols[2].into()])
    }

    /// # Panics
    /// If `i >= 3`.
    pub fn col(&self, i: usize) -> &Vec3 {
        &self.cols[i]
    }

    /// # Panics
    /// If `i >= 3`.
    pub fn col_mut(&mut self, i: usize) -> &mut Vec3 {
        &mut self.cols[i]
    }

    /// Display rows, top to bottom. The matrix itself is left untouched.
    pub fn rows(&self) -> [Vec3; 3] {
        self.transposed().cols
    }

    pub fn transpose(&mut self) {
        transpose_mat(self);
    }

    pub fn transposed(&self) -> Mat33 {
        let mut copy = copy_mat(self);
        transpose_mat(&mut copy);
        copy
    }
}

/// `a.x*b.x + a.y*b.y + a.z*b.z`
pub fn dot_product(a: &Vec3, b: &Vec3) -> f64 {
    (a.x * b.x) + (a.y * b.y) + (a.z * b.z)
}

/// Transpose in place; the diagonal is left as is.
pub fn transpose_mat(mat: &mut Mat33) {
    let [c0, c1, c2] = &mut mat.cols;

    // y1 <-> x2
    std::mem::swap(&mut c0.y, &mut c1.x);
    // z1 <-> x3
    std::mem::swap(&mut c0.z, &mut c2.x);
    // z2 <-> y3
    std::mem::swap(&mut c1.z, &mut c2.y);
}

/// Independent copy of `mat`.
pub fn copy_mat(mat: &Mat33) -> Mat33 {
    let mut copy = Mat33::ZERO;
    for (dst, src) in copy.cols.iter_mut().zip(mat.cols.iter()) {
        *dst = Vec3::new(src.x, src.y, src.z);
    }
    copy
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product_zero_vector() {
        let v = Vec3::new(4.0, 7.4, -800.0);
        assert_eq!(dot_product(&Vec3::ZERO, &v), 0.0);
        assert_eq!(dot_product(&v, &Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_dot_product_method_matches_free_function() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(-4.0, -5.0, 6.0);
        assert_eq!(a.dot(&b), dot_product(&a, &b));
        assert_eq!(a.dot(&b), 4.0);
    }

    #[test]
    fn test_transpose_twice_is_identity() {
        let original = Mat33::from_column_arrays([[1.0, 2.0, 3.5], [4.0, 5.0, 6.65], [7.0, 8.0, 9.0]]);
        let mut mat = original;
        mat.transpose();
        assert_ne!(mat, original);
        mat.transpose();
        assert_eq!(mat, original);
    }

    #[test]
    fn test_rows_do_not_mutate() {
        let mat = Mat33::from_column_arrays([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]]);
        let rows = mat.rows();
        assert_eq!(rows[0], Vec3::new(1.0, 4.0, 7.0));
        assert_eq!(rows[2], Vec3::new(3.0, 6.0, 9.0));
        assert_eq!(mat.col(0), &Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_copy_is_independent() {
        let mat = Mat33::IDENTITY;
        let mut copy = copy_mat(&mat);
        copy.col_mut(1).y = 42.0;
        assert_eq!(mat.col(1).y, 1.0);
        assert_eq!(copy.col(1).y, 42.0);
    }
}
