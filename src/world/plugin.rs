//! 方块世界插件

use bevy::prelude::*;

use crate::world::column::BlockWorld;
use crate::world::systems::{flush_changes_system, stream_columns_system};

/// 方块世界插件 - 负责注册世界资源和列加载系统
///
/// 外部的场景控制器（表现层）只需添加这个插件，
/// 然后通过 `BlockWorld` 资源进行查询和方块放置/破坏
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<BlockWorld>()
            .add_systems(Startup, setup_world)
            .add_systems(Update, stream_columns_system)
            .add_systems(PostUpdate, flush_changes_system);
    }
}

/// 初始化世界：预生成出生区域
fn setup_world(mut world: ResMut<BlockWorld>) {
    world.generate_spawn_region();
    info!(
        "World '{}' ready (seed {}, {} columns pre-generated)",
        world.name,
        world.seed(),
        world.column_count()
    );
}
