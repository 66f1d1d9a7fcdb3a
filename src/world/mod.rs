//! 方块世界模块
//!
//! 这个模块包含了 2D 侧视世界的核心系统，包括：
//!
//! - **constants**: 常量定义（世界高度、海平面、加载半径等）
//! - **block**: 方块类型定义（方块种类、特性、颜色）
//! - **biome**: 生物群系（平原、森林、沙漠等）
//! - **seed**: 世界种子与噪声生成器
//! - **terrain**: 地形生成器（程序化列状地形、矿石、树木）
//! - **column**: 列数据结构（懒加载列存储、稀疏覆盖表、世界管理）
//! - **change**: 方块变更日志
//! - **systems**: ECS系统函数（列流式加载、日志清理）
//! - **plugin**: Bevy插件

pub mod biome;
pub mod block;
pub mod change;
pub mod column;
pub mod constants;
pub mod plugin;
pub mod seed;
pub mod systems;
pub mod terrain;

// 重新导出常用类型，方便外部使用
pub use biome::Biome;
pub use block::{BlockDef, BlockKind, BlockTraits};
pub use change::BlockChange;
pub use column::{BlockWorld, ColumnData};
pub use constants::{SEA_LEVEL, SPAWN_X, WORLD_HEIGHT};
pub use plugin::WorldPlugin;
pub use seed::WorldSeed;
pub use terrain::TerrainGenerator;
