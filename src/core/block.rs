/// Discrete category of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    Air,
    Grass,
    Dirt,
    Stone,
    Wood,
    Leaves,
}

impl Default for BlockKind {
    fn default() -> Self {
        Self::Air
    }
}

impl BlockKind {
    /// Numeric id baked into vertex data for material lookup in shaders.
    /// Air never reaches the mesher; it maps to the -1 sentinel.
    pub fn shader_id(self) -> i32 {
        match self {
            Self::Air => -1,
            Self::Grass => 0,
            Self::Dirt => 1,
            Self::Stone => 2,
            Self::Wood => 3,
            Self::Leaves => 4,
        }
    }

    /// Base face tint. Grass stays neutral so only the top face reads green.
    pub fn color(self) -> [f32; 3] {
        match self {
            Self::Grass => [1.0, 1.0, 1.0],
            Self::Dirt => [0.545, 0.271, 0.075],
            Self::Stone => [0.5, 0.5, 0.5],
            Self::Wood => [0.64, 0.32, 0.16],
            Self::Leaves => [0.3, 0.8, 0.3],
            // Magenta error color
            Self::Air => [1.0, 0.0, 1.0],
        }
    }

    /// Tint for the +Y face; grass tops get the green recolor.
    pub fn top_color(self) -> [f32; 3] {
        match self {
            Self::Grass => [0.2, 0.9, 0.2],
            other => other.color(),
        }
    }
}

/// A single grid cell. Copied by value, never shared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Block {
    pub kind: BlockKind,
}

impl Block {
    pub const AIR: Self = Self {
        kind: BlockKind::Air,
    };

    pub fn new(kind: BlockKind) -> Self {
        Self { kind }
    }

    /// Solidity is derived: everything but air is solid.
    pub fn is_solid(self) -> bool {
        self.kind != BlockKind::Air
    }
}
