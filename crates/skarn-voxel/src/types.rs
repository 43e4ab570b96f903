/// One cell of the terrain grid. Id 0 is always air; every non-zero id is
/// solid and must have a palette entry before it reaches the mesher.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Voxel(pub u8);

impl Voxel {
    pub const AIR: Voxel = Voxel(0);

    #[inline]
    pub const fn id(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_solid(self) -> bool {
        self.0 != 0
    }
}

impl From<u8> for Voxel {
    #[inline]
    fn from(id: u8) -> Self {
        Voxel(id)
    }
}
