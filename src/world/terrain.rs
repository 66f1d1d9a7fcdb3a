//! 地形生成器

use noise::NoiseFn;

use crate::world::biome::Biome;
use crate::world::block::BlockKind;
use crate::world::column::ColumnData;
use crate::world::constants::{SEA_LEVEL, SURFACE_BASE, WORLD_HEIGHT};
use crate::world::seed::WorldSeed;

/// 树冠最大水平半径（单位：列数）
/// 生成列时需要检查这个范围内的邻居是否长有树木
pub const TREE_RADIUS: i32 = 2;

/// 地形生成器 - 使用程序化生成算法创建列状地形
/// 基于柏林噪声（Perlin Noise）生成自然的地形特征
///
/// 所有查询都是 x 和种子的纯函数，与调用顺序无关，
/// 因此重新生成同一列总是得到相同的方块序列
pub struct TerrainGenerator<'a> {
    seed: &'a WorldSeed,
}

impl<'a> TerrainGenerator<'a> {
    /// 创建新的地形生成器
    pub fn new(seed: &'a WorldSeed) -> Self {
        Self { seed }
    }

    /// 计算指定列的地表高度
    /// 使用多层噪声叠加（分形噪声）生成更自然的地形
    /// - 第一层：大尺度地形特征（山脉、山谷）
    /// - 第二层：中等尺度起伏
    /// - 第三层：小尺度细节
    pub fn surface_height(&self, x: i32) -> i32 {
        let scale = 0.02;
        let fx = x as f64 * scale;

        let mut height = 0.0;
        // 大尺度地形
        height += self.seed.terrain_noise.get([fx, 0.5]) * 12.0;
        // 中等尺度起伏
        height += self.seed.terrain_noise.get([fx * 2.0, 7.5]) * 6.0;
        // 小尺度细节
        height += self.seed.detail_noise.get([fx * 4.0, 3.5]) * 3.0;

        ((SURFACE_BASE as f64 + height) as i32).clamp(1, WORLD_HEIGHT - 10)
    }

    /// 根据温度和高度确定生物群系类型
    pub fn biome(&self, x: i32) -> Biome {
        let temp = self.seed.biome_noise.get([x as f64 * 0.008, 0.5]);
        let height = self.surface_height(x);

        // 低海拔地区为海洋
        if height < SEA_LEVEL - 1 {
            return Biome::Ocean;
        }
        // 海拔稍高的地区为海滩
        if height <= SEA_LEVEL + 1 {
            return Biome::Beach;
        }

        if temp < -0.3 {
            Biome::Snowy
        } else if temp > 0.35 {
            Biome::Desert
        } else if temp > 0.0 {
            Biome::Forest
        } else {
            Biome::Plains
        }
    }

    /// 根据位置和深度生成矿石
    /// 越深的地方生成越稀有的矿石
    /// - 金矿：Y < 12，最稀有
    /// - 铁矿：Y < 20，稀有
    /// - 煤矿：其余深度，最常见
    pub fn ore(&self, x: i32, y: i32) -> Option<BlockKind> {
        let scale = 0.15;
        let noise = self
            .seed
            .detail_noise
            .get([x as f64 * scale, y as f64 * scale]);

        if noise > 0.7 {
            if y < 12 && noise > 0.85 {
                Some(BlockKind::GoldOre)
            } else if y < 20 && noise > 0.78 {
                Some(BlockKind::IronOre)
            } else {
                Some(BlockKind::CoalOre)
            }
        } else {
            None
        }
    }

    /// 判断指定列是否长有树木，返回树干高度
    /// 不同生物群系有不同的树木生成概率
    pub fn tree_at(&self, x: i32) -> Option<i32> {
        let biome = self.biome(x);
        let tree_chance = biome.tree_chance();
        if tree_chance == 0.0 {
            return None;
        }

        // 水边不长树
        if self.surface_height(x) <= SEA_LEVEL + 1 {
            return None;
        }

        // 使用噪声函数随机决定是否生成树木
        let noise = self.seed.detail_noise.get([x as f64 * 0.5, 11.5]);
        if noise > 1.0 - tree_chance * 2.0 {
            Some(biome.trunk_height())
        } else {
            None
        }
    }

    /// 生成指定列的完整地形数据
    /// 生成步骤：
    /// 1. 底部放置基岩
    /// 2. 填充地下的方块（石头、矿石、次表层）
    /// 3. 放置地表方块
    /// 4. 填充水体（寒冷生物群系的水面结冰）
    /// 5. 生成树木（包括邻居树冠伸入本列的部分）
    pub fn generate_column(&self, x: i32) -> ColumnData {
        let height = self.surface_height(x);
        let biome = self.biome(x);
        let mut column = ColumnData::new();

        for y in 0..WORLD_HEIGHT {
            let kind = if y == 0 {
                BlockKind::Bedrock
            } else if y < height - 3 {
                // 深层 - 石头或矿石
                self.ore(x, y).unwrap_or(BlockKind::Stone)
            } else if y < height {
                // 次表层（地表下1-3层）
                biome.subsurface_block()
            } else if y == height {
                // 地表层
                biome.surface_block()
            } else if y <= SEA_LEVEL {
                // 地表以上，水位以下
                if biome == Biome::Snowy && y == SEA_LEVEL {
                    BlockKind::Ice
                } else {
                    BlockKind::Water
                }
            } else {
                BlockKind::Air
            };

            column.set(y, kind);
        }

        self.apply_trees(x, &mut column);

        debug_assert_eq!(column.get(0), BlockKind::Bedrock);
        debug_assert!(column.highest_block() >= height);

        column
    }

    /// 把树木写入本列
    ///
    /// 树冠会跨越多列，因此检查 TREE_RADIUS 范围内的每个邻居：
    /// 邻居的树木位置由纯噪声查询决定，本列的结果不依赖邻居列是否已生成
    fn apply_trees(&self, x: i32, column: &mut ColumnData) {
        for dx in -TREE_RADIUS..=TREE_RADIUS {
            let tx = x + dx;
            let Some(trunk_h) = self.tree_at(tx) else {
                continue;
            };
            let base = self.surface_height(tx) + 1;

            // 树干（只在树的所在列）
            if dx == 0 {
                for dy in 0..trunk_h {
                    if column.get(base + dy).is_air() {
                        column.set(base + dy, BlockKind::Wood);
                    }
                }
            }

            // 树冠：下宽上窄
            let leaf_start = trunk_h - 2;
            for dy in leaf_start..trunk_h + 2 {
                let radius: i32 = if dy >= trunk_h { 1 } else { 2 };
                // 树干位置不放置树叶
                if dx == 0 && dy < trunk_h {
                    continue;
                }
                if dx.abs() <= radius && column.get(base + dy).is_air() {
                    column.set(base + dy, BlockKind::Leaves);
                }
            }
        }
    }
}
