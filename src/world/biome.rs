//! 生物群系定义

use crate::world::block::BlockKind;

/// 生物群系类型 - 决定列的表面方块、植被和环境特征
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Biome {
    Plains,
    Forest,
    Desert,
    Snowy,
    Ocean,
    Beach,
}

impl Biome {
    /// 获取该生物群系的表面方块类型（地表最顶层的方块）
    pub fn surface_block(self) -> BlockKind {
        match self {
            Biome::Plains | Biome::Forest => BlockKind::Grass,
            Biome::Desert | Biome::Beach => BlockKind::Sand,
            Biome::Snowy => BlockKind::Snow,
            Biome::Ocean => BlockKind::Sand,
        }
    }

    /// 获取该生物群系的次表层方块类型（表层下方的方块）
    pub fn subsurface_block(self) -> BlockKind {
        match self {
            Biome::Plains | Biome::Forest | Biome::Snowy => BlockKind::Dirt,
            Biome::Desert | Biome::Beach | Biome::Ocean => BlockKind::Sand,
        }
    }

    /// 树木生成概率
    pub fn tree_chance(self) -> f64 {
        match self {
            Biome::Forest => 0.08,
            Biome::Snowy => 0.03,
            Biome::Plains => 0.01,
            _ => 0.0,
        }
    }

    /// 树干高度（单位：方块）
    pub fn trunk_height(self) -> i32 {
        match self {
            Biome::Snowy => 6,
            Biome::Forest => 5,
            _ => 4,
        }
    }
}
