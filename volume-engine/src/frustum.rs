use glam::Vec4Swizzles;
use glam::{Mat4, Vec3, Vec4};
use volume_physics::AABB;

#[derive(Debug, Clone, Copy)]
pub struct Plane {
    pub normal: Vec3,
    pub distance: f32,
}

impl Plane {
    pub fn new(coeffs: Vec4) -> Self {
        let len = coeffs.xyz().length();
        if len == 0.0 {
            Self {
                normal: Vec3::ZERO,
                distance: 0.0,
            }
        } else {
            Self {
                normal: coeffs.xyz() / len,
                distance: coeffs.w / len,
            }
        }
    }

    #[inline]
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Tests the box corner furthest along the plane normal.
    #[inline]
    fn keeps(&self, aabb: &AABB) -> bool {
        let p_vertex = Vec3::select(self.normal.cmpgt(Vec3::ZERO), aabb.max, aabb.min);
        self.distance_to_point(p_vertex) >= 0.0
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    planes: [Plane; 6],
}

impl Frustum {
    pub fn from_view_proj(matrix: &Mat4) -> Self {
        let row0 = matrix.row(0);
        let row1 = matrix.row(1);
        let row2 = matrix.row(2);
        let row3 = matrix.row(3);

        let planes = [
            Plane::new(row3 + row0),
            Plane::new(row3 - row0),
            Plane::new(row3 + row1),
            Plane::new(row3 - row1),
            Plane::new(row2),
            Plane::new(row3 - row2),
        ];
        Self { planes }
    }

    #[inline]
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| plane.keeps(aabb))
    }
}
