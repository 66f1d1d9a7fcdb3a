//! 世界存档
//!
//! 每个世界对应一个文本文件 `saves/<名称>.world`；
//! 重复保存会整体覆盖，不追加也不保留历史版本。
//! 存档只包含种子、稀疏方块 diff 和玩家/物品栏状态，
//! 载入后地形由种子确定性地重新生成

pub mod format;

use std::fs;
use std::io::Write;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use bevy::log::info;
use thiserror::Error;

use crate::player::Player;
use crate::world::BlockWorld;

use format::{SAVE_VERSION, SaveFile};

/// 存档目录
pub const SAVE_DIR: &str = "saves";

/// 存档文件扩展名
pub const SAVE_EXT: &str = "world";

/// 存档错误
///
/// 目录创建或文件写入失败直接上报调用方，不在内部重试；
/// 格式错误的存档会中止载入，不会返回半成品世界
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("save io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed save data: {detail}")]
    Format { detail: String },
    #[error("unsupported save version {0} (expected {SAVE_VERSION})")]
    Version(u32),
}

/// 存档文件路径
fn save_path(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{SAVE_EXT}"))
}

/// 指定名称的存档是否存在
pub fn save_exists(name: &str) -> bool {
    save_path(Path::new(SAVE_DIR), name).exists()
}

/// 保存世界到默认存档目录
pub fn save_world(world: &BlockWorld, player: &Player) -> Result<PathBuf, SaveError> {
    save_world_to(SAVE_DIR, world, player)
}

/// 保存世界到指定目录
/// 目录不存在时自动创建；文件整体覆盖写入
pub fn save_world_to(
    dir: impl AsRef<Path>,
    world: &BlockWorld,
    player: &Player,
) -> Result<PathBuf, SaveError> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let path = save_path(dir, &world.name);
    let file = fs::File::create(&path)?;
    let mut writer = BufWriter::new(file);

    let snapshot = SaveFile::capture(world, player);
    serde_json::to_writer_pretty(&mut writer, &snapshot).map_err(|e| SaveError::Format {
        detail: e.to_string(),
    })?;
    writer.flush()?;

    info!(
        "Saved world '{}' ({} overridden blocks) to {}",
        world.name,
        snapshot.overrides.len(),
        path.display()
    );
    Ok(path)
}

/// 从默认存档目录载入世界
pub fn load_world(name: &str) -> Result<(BlockWorld, Player), SaveError> {
    load_world_from(SAVE_DIR, name)
}

/// 从指定目录载入世界
/// 先完整解析再重建状态，解析失败时不会产生任何世界对象
pub fn load_world_from(
    dir: impl AsRef<Path>,
    name: &str,
) -> Result<(BlockWorld, Player), SaveError> {
    let path = save_path(dir.as_ref(), name);
    let text = fs::read_to_string(&path)?;

    let snapshot: SaveFile = serde_json::from_str(&text).map_err(|e| SaveError::Format {
        detail: e.to_string(),
    })?;

    if snapshot.version != SAVE_VERSION {
        return Err(SaveError::Version(snapshot.version));
    }

    info!(
        "Loaded world '{}' (seed {}, {} overridden blocks)",
        snapshot.name,
        snapshot.seed,
        snapshot.overrides.len()
    );
    Ok(snapshot.into_state())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::ItemStack;
    use crate::player::Facing;
    use crate::world::{BlockKind, WorldSeed};
    use bevy::math::{IVec2, Vec2};

    /// 每个测试使用独立的临时目录，避免并行冲突
    fn temp_save_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("flatworld_save_{tag}_{}", std::process::id()));
        fs::remove_dir_all(&dir).ok();
        dir
    }

    #[test]
    fn test_save_creates_named_file() {
        let dir = temp_save_dir("named");
        let mut world = BlockWorld::new("test", WorldSeed::new(5));
        world.generate_spawn_region();
        let player = Player::spawn_at_surface(&mut world);

        let path = save_world_to(&dir, &world, &player).unwrap();
        assert_eq!(path, dir.join("test.world"));
        assert!(path.exists());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_roundtrip() {
        let dir = temp_save_dir("roundtrip");
        let mut world = BlockWorld::new("roundtrip", WorldSeed::new(31337));
        let mut player = Player::spawn_at_surface(&mut world);

        // 任意的方块修改
        let edits = [
            (IVec2::new(4, 60), BlockKind::Stone),
            (IVec2::new(-9, 70), BlockKind::Wood),
            (IVec2::new(120, 2), BlockKind::Air),
        ];
        for (pos, kind) in edits {
            world.set_block(pos, kind);
        }

        // 玩家与物品栏状态
        player.position = Vec2::new(17.25, 44.0);
        player.velocity_y = -0.3;
        player.is_jumping = true;
        player.facing = Facing::Left;
        player
            .inventory_mut()
            .set_slot(3, Some(ItemStack::new(BlockKind::Dirt, 12)))
            .unwrap();
        player.inventory_mut().scroll(-2);

        save_world_to(&dir, &world, &player).unwrap();
        let (mut loaded_world, loaded_player) = load_world_from(&dir, "roundtrip").unwrap();

        // 每个被覆盖的坐标回答一致
        for (pos, kind) in edits {
            assert_eq!(loaded_world.block_at(pos), kind);
        }
        // 未修改的坐标抽样一致
        for x in (-300..=300).step_by(41) {
            assert_eq!(loaded_world.surface_height(x), world.surface_height(x));
            for y in [1, 25, 50] {
                let pos = IVec2::new(x, y);
                assert_eq!(loaded_world.block_at(pos), world.block_at(pos));
            }
        }

        assert_eq!(loaded_world.name, "roundtrip");
        assert_eq!(loaded_world.seed(), 31337);
        assert_eq!(loaded_player.position, player.position);
        assert_eq!(loaded_player.velocity_y, player.velocity_y);
        assert_eq!(loaded_player.is_jumping, player.is_jumping);
        assert_eq!(loaded_player.facing, Facing::Left);
        assert_eq!(loaded_player.inventory(), player.inventory());

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_save_overwrites() {
        let dir = temp_save_dir("overwrite");
        let mut world = BlockWorld::new("test", WorldSeed::new(8));
        let player = Player::spawn_at_surface(&mut world);

        save_world_to(&dir, &world, &player).unwrap();
        let first = fs::read_to_string(dir.join("test.world")).unwrap();

        let pos = IVec2::new(0, 100);
        world.set_block(pos, BlockKind::Stone);
        save_world_to(&dir, &world, &player).unwrap();
        let second = fs::read_to_string(dir.join("test.world")).unwrap();

        // 文件只反映最新状态，没有重复内容
        assert_ne!(first, second);
        let (mut reloaded, _) = load_world_from(&dir, "test").unwrap();
        assert_eq!(reloaded.block_at(pos), BlockKind::Stone);

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_malformed_save_is_format_error() {
        let dir = temp_save_dir("malformed");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("broken.world"), "{ not valid json").unwrap();

        match load_world_from(&dir, "broken") {
            Err(SaveError::Format { .. }) => {}
            other => panic!("expected format error, got {:?}", other.map(|_| ())),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_version_mismatch() {
        let dir = temp_save_dir("version");
        let mut world = BlockWorld::new("test", WorldSeed::new(8));
        let player = Player::spawn_at_surface(&mut world);
        save_world_to(&dir, &world, &player).unwrap();

        let path = dir.join("test.world");
        let text = fs::read_to_string(&path)
            .unwrap()
            .replacen("\"version\": 1", "\"version\": 99", 1);
        fs::write(&path, text).unwrap();

        match load_world_from(&dir, "test") {
            Err(SaveError::Version(99)) => {}
            other => panic!("expected version error, got {:?}", other.map(|_| ())),
        }

        fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_missing_save_is_io_error() {
        let dir = temp_save_dir("missing");
        match load_world_from(&dir, "nothing") {
            Err(SaveError::Io(_)) => {}
            other => panic!("expected io error, got {:?}", other.map(|_| ())),
        }
    }
}
