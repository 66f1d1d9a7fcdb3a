//! 方块世界常量定义

/// 世界垂直高度（单位：方块）- 所有列的统一垂直范围 [0, WORLD_HEIGHT)
pub const WORLD_HEIGHT: i32 = 128;

/// 海平面高度 - 地表低于此高度的区域会被水填充
pub const SEA_LEVEL: i32 = 30;

/// 地表基准高度 - 噪声叠加的中心值
pub const SURFACE_BASE: i32 = 32;

/// 列流式加载半径（单位：列数）- 控制玩家周围预先物化多少列
pub const LOAD_RADIUS: i32 = 32;

/// 出生区域预生成半径（单位：列数）
pub const SPAWN_RADIUS: i32 = 16;

/// 玩家出生列
pub const SPAWN_X: i32 = 0;
