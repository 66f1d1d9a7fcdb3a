//! 存档文件的文本格式
//!
//! 镜像结构体通过 serde 序列化为 JSON，与运行时类型解耦。
//! 地形只保存种子和玩家修改过的方块（稀疏 diff）；
//! 其余方块在载入后由种子确定性地重新生成

use bevy::math::{IVec2, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::inventory::{Inventory, ItemStack};
use crate::player::{Facing, Player};
use crate::world::{BlockKind, BlockWorld, WorldSeed};

/// 存档格式版本号
pub const SAVE_VERSION: u32 = 1;

/// 存档文件根结构
#[derive(Debug, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: u32,
    pub name: String,
    pub seed: u32,
    /// 玩家修改过的方块（相对程序化基线）
    pub overrides: Vec<SavedBlock>,
    pub player: SavedPlayer,
}

/// 单个被覆盖的方块
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedBlock {
    pub x: i32,
    pub y: i32,
    pub block: BlockKind,
}

/// 玩家状态
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedPlayer {
    pub x: f32,
    pub y: f32,
    pub velocity_y: f32,
    pub is_jumping: bool,
    pub facing: Facing,
    pub inventory: SavedInventory,
}

/// 物品栏状态
#[derive(Debug, Serialize, Deserialize)]
pub struct SavedInventory {
    pub width: usize,
    pub height: usize,
    pub equip_index: usize,
    pub slots: Vec<Option<SavedStack>>,
}

/// 一叠物品
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SavedStack {
    pub block: BlockKind,
    pub count: u32,
}

impl SaveFile {
    /// 捕获当前世界和玩家的快照
    /// 覆盖项按坐标排序，保证相同状态产生相同的存档文本
    pub fn capture(world: &BlockWorld, player: &Player) -> Self {
        let mut overrides: Vec<SavedBlock> = world
            .overrides()
            .iter()
            .map(|(pos, kind)| SavedBlock {
                x: pos.x,
                y: pos.y,
                block: *kind,
            })
            .collect();
        overrides.sort_by_key(|b| (b.x, b.y));

        Self {
            version: SAVE_VERSION,
            name: world.name.clone(),
            seed: world.seed(),
            overrides,
            player: SavedPlayer::capture(player),
        }
    }

    /// 从快照重建世界和玩家
    pub fn into_state(self) -> (BlockWorld, Player) {
        let overrides: HashMap<IVec2, BlockKind> = self
            .overrides
            .into_iter()
            .map(|b| (IVec2::new(b.x, b.y), b.block))
            .collect();
        let world = BlockWorld::from_parts(self.name, WorldSeed::new(self.seed), overrides);
        let player = self.player.into_player();
        (world, player)
    }
}

impl SavedPlayer {
    fn capture(player: &Player) -> Self {
        Self {
            x: player.position.x,
            y: player.position.y,
            velocity_y: player.velocity_y,
            is_jumping: player.is_jumping,
            facing: player.facing,
            inventory: SavedInventory::capture(player.inventory()),
        }
    }

    fn into_player(self) -> Player {
        Player::from_parts(
            Vec2::new(self.x, self.y),
            self.velocity_y,
            self.is_jumping,
            self.facing,
            self.inventory.into_inventory(),
        )
    }
}

impl SavedInventory {
    fn capture(inventory: &Inventory) -> Self {
        let (width, height) = inventory.dimensions();
        Self {
            width,
            height,
            equip_index: inventory.equip_index(),
            slots: inventory
                .slots()
                .iter()
                .map(|slot| {
                    slot.map(|stack| SavedStack {
                        block: stack.block,
                        count: stack.count,
                    })
                })
                .collect(),
        }
    }

    fn into_inventory(self) -> Inventory {
        let slots = self
            .slots
            .into_iter()
            .map(|slot| slot.map(|stack| ItemStack::new(stack.block, stack.count)))
            .collect();
        Inventory::from_parts(self.width, self.height, self.equip_index, slots)
    }
}
