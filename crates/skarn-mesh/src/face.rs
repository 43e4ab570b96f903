use skarn_geom::Vec3;

/// Axis-aligned quad orientation. The world is Z-up; Front faces +Y.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Face {
    Top = 0,
    Bottom = 1,
    Left = 2,
    Right = 3,
    Front = 4,
    Back = 5,
}

impl Face {
    pub const COUNT: usize = 6;

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn from_index(i: usize) -> Face {
        match i {
            0 => Face::Top,
            1 => Face::Bottom,
            2 => Face::Left,
            3 => Face::Right,
            4 => Face::Front,
            _ => Face::Back,
        }
    }

    /// Outward unit normal; also the offset to the cell the face abuts.
    #[inline]
    pub fn normal(self) -> (i32, i32, i32) {
        match self {
            Face::Top => (0, 0, 1),
            Face::Bottom => (0, 0, -1),
            Face::Left => (-1, 0, 0),
            Face::Right => (1, 0, 0),
            Face::Front => (0, 1, 0),
            Face::Back => (0, -1, 0),
        }
    }

    #[inline]
    pub fn normal_vec3(self) -> Vec3 {
        let (x, y, z) = self.normal();
        Vec3::new(x as f32, y as f32, z as f32)
    }
}

/// Tangent frame a renderer attaches per face direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TangentBasis {
    pub tangent: Vec3,
    pub normal: Vec3,
    /// Bitangent handedness, +1.0 or -1.0.
    pub sign: f32,
}

/// The six per-face tangent frames, indexed by [`Face::index`]. Tangents are
/// the fixed up-tangent (1,-1,0) projected onto each face plane.
pub fn tangent_bases() -> [TangentBasis; 6] {
    let up_tangent = Vec3::new(1.0, -1.0, 0.0).normalized();
    let mut bases = [TangentBasis {
        tangent: Vec3::ZERO,
        normal: Vec3::ZERO,
        sign: 1.0,
    }; 6];
    for (i, basis) in bases.iter_mut().enumerate() {
        let normal = Face::from_index(i).normal_vec3();
        let tangent = (up_tangent - normal * up_tangent.dot(normal)).normalized();
        let handed = Vec3::new(-1.0, -1.0, -1.0).dot(normal.cross(tangent));
        *basis = TangentBasis {
            tangent,
            normal,
            sign: if handed < 0.0 { -1.0 } else { 1.0 },
        };
    }
    bases
}
