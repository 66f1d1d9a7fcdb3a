//! 方块世界的系统函数

use bevy::prelude::*;

use crate::player::{Player, round_coord};
use crate::world::column::BlockWorld;
use crate::world::constants::LOAD_RADIUS;

/// 列流式加载系统
/// 根据玩家位置决定哪些列需要物化，保证玩家周围的地形随时可查询
pub fn stream_columns_system(world: Option<ResMut<BlockWorld>>, player: Option<Res<Player>>) {
    let (Some(mut world), Some(player)) = (world, player) else {
        return;
    };

    let center = round_coord(player.position.x);
    world.preload(center, LOAD_RADIUS);
}

/// 清理变更日志系统
/// 在帧末运行，表现层必须在此之前消费本帧的变更
pub fn flush_changes_system(world: Option<ResMut<BlockWorld>>) {
    let Some(mut world) = world else {
        return;
    };
    world.changes.clear();
}
