//! 方块类型定义

use bevy::prelude::*;
use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// 方块特性标志位
    ///
    /// 每种方块类型拥有一组固定的特性，决定碰撞、破坏与生成行为
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BlockTraits: u8 {
        const NONE = 0;
        /// 实心方块，阻挡玩家移动
        const SOLID = 1 << 0;
        /// 矿石方块
        const ORE = 1 << 1;
        /// 植被方块（树干、树叶）
        const FOLIAGE = 1 << 2;
        /// 液体方块，可以穿过
        const LIQUID = 1 << 3;
        /// 不可破坏（基岩、虚空）
        const UNBREAKABLE = 1 << 4;
    }
}

/// 方块种类枚举 - 定义游戏中所有可用的方块类型
///
/// 方块按类型值相等，没有逐方块的可变字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BlockKind {
    #[default]
    Air,
    Grass,
    Dirt,
    Stone,
    Sand,
    Snow,
    Ice,
    Water,
    Wood,
    Leaves,
    CoalOre,
    IronOre,
    GoldOre,
    Bedrock,
    /// 世界底部以下的哨兵方块 - 越界查询返回它而不是报错
    Void,
}

/// 方块定义 - 包含方块的所有基础信息
#[derive(Debug, Clone, Copy)]
pub struct BlockDef {
    /// 方块名称
    pub name: &'static str,
    /// 方块颜色（供表现层使用）
    pub color: Color,
    /// 方块特性
    pub traits: BlockTraits,
    /// 硬度（0.0-1.0，值越大越难破坏）
    pub hardness: f32,
}

impl BlockKind {
    /// 获取当前方块种类的完整定义信息
    pub fn def(self) -> BlockDef {
        match self {
            BlockKind::Air => BlockDef {
                name: "空气",
                color: Color::NONE,
                traits: BlockTraits::NONE,
                hardness: 0.0,
            },
            BlockKind::Grass => BlockDef {
                name: "草方块",
                color: Color::srgb(0.28, 0.62, 0.25),
                traits: BlockTraits::SOLID,
                hardness: 0.2,
            },
            BlockKind::Dirt => BlockDef {
                name: "泥土",
                color: Color::srgb(0.42, 0.30, 0.18),
                traits: BlockTraits::SOLID,
                hardness: 0.35,
            },
            BlockKind::Stone => BlockDef {
                name: "石头",
                color: Color::srgb(0.50, 0.50, 0.52),
                traits: BlockTraits::SOLID,
                hardness: 0.7,
            },
            BlockKind::Sand => BlockDef {
                name: "沙子",
                color: Color::srgb(0.86, 0.80, 0.55),
                traits: BlockTraits::SOLID,
                hardness: 0.25,
            },
            BlockKind::Snow => BlockDef {
                name: "雪",
                color: Color::srgb(0.95, 0.96, 0.98),
                traits: BlockTraits::SOLID,
                hardness: 0.15,
            },
            BlockKind::Ice => BlockDef {
                name: "冰",
                color: Color::srgb(0.65, 0.80, 0.95),
                traits: BlockTraits::SOLID,
                hardness: 0.3,
            },
            BlockKind::Water => BlockDef {
                name: "水",
                color: Color::srgb(0.20, 0.40, 0.80),
                traits: BlockTraits::LIQUID,
                hardness: 0.0,
            },
            BlockKind::Wood => BlockDef {
                name: "木头",
                color: Color::srgb(0.45, 0.33, 0.18),
                traits: BlockTraits::SOLID.union(BlockTraits::FOLIAGE),
                hardness: 0.45,
            },
            BlockKind::Leaves => BlockDef {
                name: "树叶",
                color: Color::srgb(0.20, 0.50, 0.18),
                traits: BlockTraits::FOLIAGE,
                hardness: 0.1,
            },
            BlockKind::CoalOre => BlockDef {
                name: "煤矿",
                color: Color::srgb(0.30, 0.30, 0.30),
                traits: BlockTraits::SOLID.union(BlockTraits::ORE),
                hardness: 0.75,
            },
            BlockKind::IronOre => BlockDef {
                name: "铁矿",
                color: Color::srgb(0.70, 0.55, 0.45),
                traits: BlockTraits::SOLID.union(BlockTraits::ORE),
                hardness: 0.8,
            },
            BlockKind::GoldOre => BlockDef {
                name: "金矿",
                color: Color::srgb(0.85, 0.75, 0.30),
                traits: BlockTraits::SOLID.union(BlockTraits::ORE),
                hardness: 0.85,
            },
            BlockKind::Bedrock => BlockDef {
                name: "基岩",
                color: Color::srgb(0.15, 0.15, 0.15),
                traits: BlockTraits::SOLID.union(BlockTraits::UNBREAKABLE),
                hardness: 1.0,
            },
            BlockKind::Void => BlockDef {
                name: "虚空",
                color: Color::NONE,
                traits: BlockTraits::SOLID.union(BlockTraits::UNBREAKABLE),
                hardness: 1.0,
            },
        }
    }

    /// 是否为实心方块（阻挡移动）
    #[inline]
    pub fn is_solid(self) -> bool {
        self.def().traits.contains(BlockTraits::SOLID)
    }

    /// 是否为空气
    #[inline]
    pub fn is_air(self) -> bool {
        matches!(self, BlockKind::Air)
    }

    /// 是否可以被玩家破坏
    #[inline]
    pub fn is_breakable(self) -> bool {
        !self.is_air() && !self.def().traits.contains(BlockTraits::UNBREAKABLE)
    }
}
