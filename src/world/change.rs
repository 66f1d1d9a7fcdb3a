//! 方块变更记录
//!
//! 用于每帧的 diff 日志，供表现层（重绘脏方块）和存档消费

use bevy::math::IVec2;

use super::block::BlockKind;

/// 单个方块的变更操作
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockChange {
    /// 放置方块
    Placed {
        pos: IVec2,
        old: BlockKind,
        new: BlockKind,
    },

    /// 破坏方块（设置为空气）
    Removed { pos: IVec2, old: BlockKind },
}

impl BlockChange {
    /// 获取影响的方块坐标
    pub fn pos(&self) -> IVec2 {
        match self {
            BlockChange::Placed { pos, .. } => *pos,
            BlockChange::Removed { pos, .. } => *pos,
        }
    }

    /// 判断是否为破坏操作
    pub fn is_removal(&self) -> bool {
        matches!(self, BlockChange::Removed { .. })
    }
}
