use crate::core::block::BlockKind;

/// Texture-lookup category for a cube face. All four horizontal
/// directions share the one SIDE entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceClass {
    Top,
    Side,
    Bottom,
}

/// Maps (block kind, face class) to texture-atlas tiles. Injected into
/// the mesher so geometry construction works the same whether tiles come
/// from a parsed resource pack or the built-in fallback.
pub trait FaceTextureResolver {
    /// Atlas tile column for the given kind and face class.
    fn tile_for(&self, kind: BlockKind, class: FaceClass) -> usize;

    /// Overlay tile blended onto faces of the given kind, if the texture
    /// source provides one (e.g. the grass side overlay).
    fn overlay_for(&self, kind: BlockKind) -> Option<usize>;

    /// Number of tile columns in the atlas.
    fn tile_count(&self) -> usize;
}

/// Fixed fallback mapping used when no resource pack is loaded: one tile
/// per block kind, no overlays.
pub struct FlatTileResolver;

impl FaceTextureResolver for FlatTileResolver {
    fn tile_for(&self, kind: BlockKind, _class: FaceClass) -> usize {
        match kind {
            BlockKind::Air | BlockKind::Grass => 0,
            BlockKind::Dirt => 1,
            BlockKind::Stone => 2,
            BlockKind::Wood => 3,
            BlockKind::Leaves => 4,
        }
    }

    fn overlay_for(&self, _kind: BlockKind) -> Option<usize> {
        None
    }

    fn tile_count(&self) -> usize {
        5
    }
}
