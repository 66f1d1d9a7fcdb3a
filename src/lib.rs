//! flatworld - 2D 侧视方块世界模拟核心
//!
//! 程序化生成的列状地形、可控制的玩家实体、固定网格物品栏
//! 和文本存档。渲染、输入轮询、UI 和窗口生命周期属于表现层，
//! 由外部的场景控制器提供；本 crate 只暴露查询与命令接口：
//!
//! - **world**: 方块世界（懒加载列存储、地形生成、稀疏 diff）
//! - **player**: 玩家状态机（移动、跳跃、碰撞）
//! - **inventory**: 物品栏（装备指针、槽位网格）
//! - **save**: 存档（序列化/反序列化、saves/ 目录）
//!
//! 表现层只需构建一个 Bevy `App`，添加 [`WorldPlugin`] 和
//! [`PlayerPlugin`]，再挂上自己的渲染/输入系统

pub mod inventory;
pub mod player;
pub mod save;
pub mod world;

pub use inventory::{Inventory, InventoryError, ItemStack};
pub use player::{Facing, Player, PlayerPlugin};
pub use save::SaveError;
pub use world::{BlockChange, BlockKind, BlockWorld, WorldPlugin, WorldSeed};
