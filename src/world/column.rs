//! 列数据结构与世界存储

use bevy::prelude::*;
use std::collections::HashMap;

use crate::world::block::BlockKind;
use crate::world::change::BlockChange;
use crate::world::constants::{SPAWN_RADIUS, SPAWN_X, WORLD_HEIGHT};
use crate::world::seed::WorldSeed;
use crate::world::terrain::TerrainGenerator;

/// 列数据 - 存储一列内所有方块的类型
///
/// 列是懒加载生成的最小单位，垂直范围固定为 [0, WORLD_HEIGHT)
pub struct ColumnData {
    /// 方块数组，索引即高度 y
    blocks: Vec<BlockKind>,
}

impl ColumnData {
    /// 创建一个空的列数据，所有方块初始化为空气
    pub fn new() -> Self {
        Self {
            blocks: vec![BlockKind::Air; WORLD_HEIGHT as usize],
        }
    }

    /// 获取指定高度的方块类型
    /// 世界底部以下返回虚空，顶部以上返回空气
    pub fn get(&self, y: i32) -> BlockKind {
        if y < 0 {
            return BlockKind::Void;
        }
        if y >= WORLD_HEIGHT {
            return BlockKind::Air;
        }
        self.blocks[y as usize]
    }

    /// 设置指定高度的方块类型
    /// 如果高度超出边界，不执行操作
    pub fn set(&mut self, y: i32, kind: BlockKind) {
        if y < 0 || y >= WORLD_HEIGHT {
            return;
        }
        self.blocks[y as usize] = kind;
    }

    /// 最高非空气方块的高度
    /// 列底部始终有基岩，所以最小返回 0
    pub fn highest_block(&self) -> i32 {
        for y in (0..WORLD_HEIGHT).rev() {
            if !self.blocks[y as usize].is_air() {
                return y;
            }
        }
        0
    }
}

impl Default for ColumnData {
    fn default() -> Self {
        Self::new()
    }
}

/// 方块世界 - 管理整个世界的所有列
///
/// 列按需懒加载生成：任何查询过的列都拥有完整的垂直剖面。
/// 玩家修改过的方块记录在稀疏覆盖表中，存档时只保存这个 diff，
/// 其余地形由种子确定性地重新生成
#[derive(Resource)]
pub struct BlockWorld {
    /// 世界名称（存档文件名）
    pub name: String,
    /// 世界种子与噪声生成器
    seed: WorldSeed,
    /// 已生成的列，按列坐标 x 索引
    columns: HashMap<i32, ColumnData>,
    /// 玩家修改的方块（相对程序化基线的稀疏 diff）
    overrides: HashMap<IVec2, BlockKind>,
    /// 本帧的变更日志（用于表现层脏重绘/同步）
    pub changes: Vec<BlockChange>,
}

impl Default for BlockWorld {
    fn default() -> Self {
        Self::new("world", WorldSeed::default())
    }
}

impl BlockWorld {
    /// 创建新世界
    pub fn new(name: impl Into<String>, seed: WorldSeed) -> Self {
        Self {
            name: name.into(),
            seed,
            columns: HashMap::new(),
            overrides: HashMap::new(),
            changes: Vec::new(),
        }
    }

    /// 从存档数据重建世界
    ///
    /// 覆盖表先行安装；列在懒加载生成时重新应用各自的覆盖项
    pub fn from_parts(
        name: impl Into<String>,
        seed: WorldSeed,
        overrides: HashMap<IVec2, BlockKind>,
    ) -> Self {
        Self {
            name: name.into(),
            seed,
            columns: HashMap::new(),
            overrides,
            changes: Vec::new(),
        }
    }

    /// 主种子值
    pub fn seed(&self) -> u32 {
        self.seed.seed
    }

    /// 玩家修改的方块（稀疏 diff，供存档使用）
    pub fn overrides(&self) -> &HashMap<IVec2, BlockKind> {
        &self.overrides
    }

    /// 已生成的列数
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// 指定列是否已生成
    pub fn is_generated(&self, x: i32) -> bool {
        self.columns.contains_key(&x)
    }

    /// 预生成出生区域的列
    pub fn generate_spawn_region(&mut self) {
        for x in (SPAWN_X - SPAWN_RADIUS)..=(SPAWN_X + SPAWN_RADIUS) {
            self.ensure_column(x);
        }
    }

    /// 预生成指定中心周围的列
    pub fn preload(&mut self, center: i32, radius: i32) {
        for x in (center - radius)..=(center + radius) {
            self.ensure_column(x);
        }
    }

    /// 确保指定列已生成
    /// 生成后应用该列已知的覆盖项（来自存档）
    fn ensure_column(&mut self, x: i32) {
        if self.columns.contains_key(&x) {
            return;
        }

        let mut column = TerrainGenerator::new(&self.seed).generate_column(x);
        for (pos, kind) in &self.overrides {
            if pos.x == x {
                column.set(pos.y, *kind);
            }
        }
        self.columns.insert(x, column);
    }

    /// 获取世界中指定位置的方块类型
    /// 未生成的列会按需生成；任何整数坐标都有定义的答案
    pub fn block_at(&mut self, pos: IVec2) -> BlockKind {
        if pos.y < 0 {
            return BlockKind::Void;
        }
        if pos.y >= WORLD_HEIGHT {
            return BlockKind::Air;
        }
        self.ensure_column(pos.x);
        self.columns
            .get(&pos.x)
            .map(|column| column.get(pos.y))
            .unwrap_or(BlockKind::Air)
    }

    /// 设置世界中指定位置的方块类型（放置/破坏）
    ///
    /// 只改写单个方块，不触发邻居重新生成。
    /// 覆盖表同步更新：改回程序化基线值的方块会从 diff 中移除
    pub fn set_block(&mut self, pos: IVec2, kind: BlockKind) {
        if pos.y < 0 || pos.y >= WORLD_HEIGHT {
            warn!("set_block out of range: {:?}", pos);
            return;
        }

        self.ensure_column(pos.x);
        // 程序化基线值，用于维护稀疏 diff
        let baseline = TerrainGenerator::new(&self.seed)
            .generate_column(pos.x)
            .get(pos.y);

        let Some(column) = self.columns.get_mut(&pos.x) else {
            return;
        };
        let old = column.get(pos.y);
        if old == kind {
            return;
        }
        column.set(pos.y, kind);

        if kind == baseline {
            self.overrides.remove(&pos);
        } else {
            self.overrides.insert(pos, kind);
        }

        self.changes.push(if kind.is_air() {
            BlockChange::Removed { pos, old }
        } else {
            BlockChange::Placed { pos, old, new: kind }
        });
    }

    /// 最高非空气方块的高度，反映玩家的修改
    /// 未生成的列会按需生成
    pub fn surface_height(&mut self, x: i32) -> i32 {
        self.ensure_column(x);
        self.columns
            .get(&x)
            .map(|column| column.highest_block())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_generation() {
        let mut world = BlockWorld::new("test", WorldSeed::new(1));
        assert_eq!(world.column_count(), 0);

        let kind = world.block_at(IVec2::new(77, 0));
        assert_eq!(kind, BlockKind::Bedrock);
        assert!(world.is_generated(77));
        assert_eq!(world.column_count(), 1);
    }

    #[test]
    fn test_query_determinism_across_instances() {
        let mut a = BlockWorld::new("a", WorldSeed::new(31337));
        let mut b = BlockWorld::new("b", WorldSeed::new(31337));

        for x in (-1000..=1000).step_by(13) {
            assert_eq!(a.surface_height(x), b.surface_height(x));
            for y in [0, 5, 20, 40, 100] {
                let pos = IVec2::new(x, y);
                assert_eq!(a.block_at(pos), b.block_at(pos));
            }
        }
    }

    #[test]
    fn test_out_of_range_queries() {
        let mut world = BlockWorld::default();
        // 世界底部以下是虚空哨兵
        assert_eq!(world.block_at(IVec2::new(0, -1)), BlockKind::Void);
        // 世界顶部以上是空气
        assert_eq!(world.block_at(IVec2::new(0, WORLD_HEIGHT)), BlockKind::Air);
        assert_eq!(world.block_at(IVec2::new(0, WORLD_HEIGHT + 500)), BlockKind::Air);
    }

    #[test]
    fn test_set_block_and_diff() {
        let mut world = BlockWorld::new("test", WorldSeed::new(9));
        let x = 3;
        let top = world.surface_height(x);
        let pos = IVec2::new(x, top + 5);

        assert_eq!(world.block_at(pos), BlockKind::Air);
        world.set_block(pos, BlockKind::Stone);
        assert_eq!(world.block_at(pos), BlockKind::Stone);
        assert_eq!(world.overrides().get(&pos), Some(&BlockKind::Stone));

        // 地表被抬高
        assert_eq!(world.surface_height(x), top + 5);

        // 改回基线值后，覆盖项被移除
        world.set_block(pos, BlockKind::Air);
        assert!(world.overrides().is_empty());
        assert_eq!(world.surface_height(x), top);
    }

    #[test]
    fn test_set_block_out_of_range_ignored() {
        let mut world = BlockWorld::default();
        world.set_block(IVec2::new(0, -5), BlockKind::Stone);
        world.set_block(IVec2::new(0, WORLD_HEIGHT), BlockKind::Stone);
        assert!(world.overrides().is_empty());
        assert_eq!(world.block_at(IVec2::new(0, -5)), BlockKind::Void);
    }

    #[test]
    fn test_change_log() {
        let mut world = BlockWorld::new("test", WorldSeed::new(9));
        let top = world.surface_height(0);
        let pos = IVec2::new(0, top + 1);

        world.set_block(pos, BlockKind::Dirt);
        world.set_block(pos, BlockKind::Air);

        assert_eq!(world.changes.len(), 2);
        assert!(!world.changes[0].is_removal());
        assert!(world.changes[1].is_removal());

        // 重复写入相同值不产生变更
        world.changes.clear();
        let kind = world.block_at(pos);
        world.set_block(pos, kind);
        assert!(world.changes.is_empty());
    }

    #[test]
    fn test_overrides_survive_reconstruction() {
        let mut world = BlockWorld::new("test", WorldSeed::new(777));
        let pos = IVec2::new(-12, 50);
        world.set_block(pos, BlockKind::GoldOre);

        let rebuilt_overrides = world.overrides().clone();
        let mut rebuilt =
            BlockWorld::from_parts("test", WorldSeed::new(777), rebuilt_overrides);

        // 懒加载生成的列重新应用覆盖项
        assert_eq!(rebuilt.block_at(pos), BlockKind::GoldOre);
        // 未修改的坐标回答与原世界一致
        for x in -20..20 {
            assert_eq!(rebuilt.surface_height(x), world.surface_height(x));
        }
    }
}
