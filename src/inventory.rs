//! 物品栏
//!
//! 固定大小的格子网格：宽度是快捷栏的槽位数，高度是行数。
//! 装备指针只在快捷栏宽度范围内移动，滚动时按真模运算回绕

use thiserror::Error;

use crate::world::BlockKind;

/// 快捷栏槽位数（对应数字键 1-9）
pub const HOTBAR_WIDTH: usize = 9;

/// 物品栏行数
pub const INVENTORY_ROWS: usize = 4;

/// 一叠物品：物品种类加数量
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemStack {
    pub block: BlockKind,
    pub count: u32,
}

impl ItemStack {
    pub fn new(block: BlockKind, count: u32) -> Self {
        Self { block, count }
    }
}

/// 物品栏错误
///
/// 槽位索引越界是调用方的编程错误，在调用边界上报，
/// 不同于装备指针滚动的有意回绕
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InventoryError {
    #[error("slot index {index} out of range (capacity {capacity})")]
    SlotIndex { index: usize, capacity: usize },
    #[error("equip index {index} out of range (width {width})")]
    EquipIndex { index: usize, width: usize },
}

/// 物品栏 - 固定宽高的槽位网格加装备指针
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inventory {
    width: usize,
    height: usize,
    slots: Vec<Option<ItemStack>>,
    equip_index: usize,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::new(HOTBAR_WIDTH, INVENTORY_ROWS)
    }
}

impl Inventory {
    /// 创建空的物品栏
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            slots: vec![None; width * height],
            equip_index: 0,
        }
    }

    /// 从存档数据重建物品栏
    /// 装备指针按宽度取模，保证不变量 equip_index ∈ [0, width)
    pub fn from_parts(
        width: usize,
        height: usize,
        equip_index: usize,
        slots: Vec<Option<ItemStack>>,
    ) -> Self {
        let mut slots = slots;
        slots.resize(width * height, None);
        Self {
            width,
            height,
            slots,
            equip_index: if width == 0 { 0 } else { equip_index % width },
        }
    }

    /// 获取物品栏尺寸 (宽, 高)
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// 槽位总数
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// 当前装备指针
    pub fn equip_index(&self) -> usize {
        self.equip_index
    }

    /// 直接选择快捷栏槽位（数字键）
    pub fn equip(&mut self, index: usize) -> Result<(), InventoryError> {
        if index >= self.width {
            return Err(InventoryError::EquipIndex {
                index,
                width: self.width,
            });
        }
        self.equip_index = index;
        Ok(())
    }

    /// 滚动装备指针
    /// 任何整数增量（包括大负数）都按真模运算回绕到 [0, width)
    pub fn scroll(&mut self, delta: i32) {
        if self.width == 0 {
            return;
        }
        let width = self.width as i64;
        self.equip_index = (self.equip_index as i64 + delta as i64).rem_euclid(width) as usize;
    }

    /// 当前装备槽位的物品
    pub fn equipped(&self) -> Option<ItemStack> {
        self.slots[self.equip_index]
    }

    /// 获取指定槽位的物品
    pub fn slot(&self, index: usize) -> Result<Option<ItemStack>, InventoryError> {
        self.check_index(index)?;
        Ok(self.slots[index])
    }

    /// 设置指定槽位的物品
    pub fn set_slot(
        &mut self,
        index: usize,
        stack: Option<ItemStack>,
    ) -> Result<(), InventoryError> {
        self.check_index(index)?;
        self.slots[index] = stack;
        Ok(())
    }

    /// 所有槽位（供存档使用）
    pub fn slots(&self) -> &[Option<ItemStack>] {
        &self.slots
    }

    /// 拾取一叠物品：先叠加到同类物品，否则放入第一个空槽
    /// 物品栏已满时返回 false
    pub fn insert(&mut self, stack: ItemStack) -> bool {
        for slot in self.slots.iter_mut() {
            if let Some(existing) = slot {
                if existing.block == stack.block {
                    existing.count += stack.count;
                    return true;
                }
            }
        }
        for slot in self.slots.iter_mut() {
            if slot.is_none() {
                *slot = Some(stack);
                return true;
            }
        }
        false
    }

    fn check_index(&self, index: usize) -> Result<(), InventoryError> {
        if index >= self.slots.len() {
            return Err(InventoryError::SlotIndex {
                index,
                capacity: self.slots.len(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_wraps() {
        let mut inventory = Inventory::new(5, 1);
        assert_eq!(inventory.equip_index(), 0);

        // 负方向回绕
        inventory.scroll(-1);
        assert_eq!(inventory.equip_index(), 4);

        inventory.scroll(1);
        assert_eq!(inventory.equip_index(), 0);

        // 大增量
        inventory.scroll(12);
        assert_eq!(inventory.equip_index(), 2);
        inventory.scroll(-100);
        assert_eq!(inventory.equip_index(), 2);
        inventory.scroll(i32::MIN);
        assert!(inventory.equip_index() < 5);
    }

    #[test]
    fn test_scroll_always_in_range() {
        let mut inventory = Inventory::default();
        for delta in [-37, -9, -1, 0, 1, 8, 9, 10, 1000, -1000] {
            inventory.scroll(delta);
            assert!(inventory.equip_index() < HOTBAR_WIDTH);
        }
    }

    #[test]
    fn test_slot_index_error() {
        let mut inventory = Inventory::new(9, 4);
        assert_eq!(
            inventory.slot(36),
            Err(InventoryError::SlotIndex {
                index: 36,
                capacity: 36
            })
        );
        assert!(inventory.set_slot(100, None).is_err());
        // 范围内的访问成功
        assert_eq!(inventory.slot(35), Ok(None));
    }

    #[test]
    fn test_equip_digit_keys() {
        let mut inventory = Inventory::default();
        assert!(inventory.equip(8).is_ok());
        assert_eq!(inventory.equip_index(), 8);
        // 装备指针不接受快捷栏宽度以外的索引
        assert!(inventory.equip(9).is_err());
        assert_eq!(inventory.equip_index(), 8);
    }

    #[test]
    fn test_insert_stacks() {
        let mut inventory = Inventory::new(2, 1);
        assert!(inventory.insert(ItemStack::new(BlockKind::Dirt, 3)));
        assert!(inventory.insert(ItemStack::new(BlockKind::Dirt, 2)));
        assert_eq!(
            inventory.slot(0).unwrap(),
            Some(ItemStack::new(BlockKind::Dirt, 5))
        );

        assert!(inventory.insert(ItemStack::new(BlockKind::Stone, 1)));
        // 已满
        assert!(!inventory.insert(ItemStack::new(BlockKind::Sand, 1)));
    }

    #[test]
    fn test_equipped() {
        let mut inventory = Inventory::default();
        inventory
            .set_slot(2, Some(ItemStack::new(BlockKind::Wood, 7)))
            .unwrap();
        assert_eq!(inventory.equipped(), None);
        inventory.scroll(2);
        assert_eq!(inventory.equipped(), Some(ItemStack::new(BlockKind::Wood, 7)));
    }
}
