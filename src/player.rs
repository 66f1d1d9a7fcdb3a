use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::inventory::Inventory;
use crate::world::{BlockWorld, SPAWN_X};

/// Horizontal distance covered per walking tick, in blocks.
pub const WALK_SPEED: f32 = 0.25;
/// Downward acceleration per tick.
pub const GRAVITY: f32 = -0.08;
/// Upward velocity applied by a jump.
pub const JUMP_IMPULSE: f32 = 0.62;

/// Facing derived from the last horizontal input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Idle,
    Right,
}

/// The controllable entity. One per session, spawned on the surface at the
/// spawn column. Consumes `BlockWorld` queries to resolve collision and
/// ground height; never mutates terrain itself.
#[derive(Resource, Debug, Clone)]
pub struct Player {
    /// Continuous position; `y` is the cell the feet occupy.
    pub position: Vec2,
    pub velocity_y: f32,
    /// Guards re-entrant jump commands until the player lands.
    pub is_jumping: bool,
    pub facing: Facing,
    /// Horizontal intent queued by `move_input`, consumed by the next tick.
    walk_intent: f32,
    inventory: Inventory,
}

impl Player {
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity_y: 0.0,
            is_jumping: false,
            facing: Facing::Idle,
            walk_intent: 0.0,
            inventory: Inventory::default(),
        }
    }

    /// Spawn standing on the highest block of the spawn column.
    pub fn spawn_at_surface(world: &mut BlockWorld) -> Self {
        let ground = world.surface_height(SPAWN_X) + 1;
        Self::new(Vec2::new(SPAWN_X as f32, ground as f32))
    }

    /// Rebuild from save data.
    pub fn from_parts(
        position: Vec2,
        velocity_y: f32,
        is_jumping: bool,
        facing: Facing,
        inventory: Inventory,
    ) -> Self {
        Self {
            position,
            velocity_y,
            is_jumping,
            facing,
            walk_intent: 0.0,
            inventory,
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn inventory_mut(&mut self) -> &mut Inventory {
        &mut self.inventory
    }

    /// Queue horizontal movement for the next tick and update facing.
    /// Vertical state is never changed here.
    pub fn move_input(&mut self, dx: i32, _dy: i32, walk: bool) {
        if dx < 0 {
            self.facing = Facing::Left;
        } else if dx > 0 {
            self.facing = Facing::Right;
        }
        if walk {
            self.walk_intent = dx as f32 * WALK_SPEED;
        }
    }

    /// Idle facing when no movement key is active.
    pub fn face_direction(&mut self, dx: i32, _dy: i32) {
        if dx == 0 {
            self.facing = Facing::Idle;
        } else {
            self.facing = if dx < 0 { Facing::Left } else { Facing::Right };
        }
    }

    /// Start a jump. Ignored while airborne.
    pub fn jump(&mut self) {
        if self.is_jumping {
            return;
        }
        self.is_jumping = true;
        self.velocity_y = JUMP_IMPULSE;
    }

    /// Advance physics by one tick: resolve queued horizontal movement
    /// against solid terrain, then apply gravity and clamp to the ground
    /// height of the current column. Landing re-arms the jump.
    pub fn tick(&mut self, world: &mut BlockWorld) {
        // Horizontal: halt at the boundary cell when the target is solid.
        let step = self.walk_intent;
        if step != 0.0 {
            let target_x = self.position.x + step;
            let target_cell = IVec2::new(round_coord(target_x), round_coord(self.position.y));
            if !world.block_at(target_cell).is_solid() {
                self.position.x = target_x;
            }
            self.walk_intent = 0.0;
        }

        // Vertical: gravity, then ground clamp.
        self.velocity_y += GRAVITY;
        self.position.y += self.velocity_y;

        let ground = world.surface_height(round_coord(self.position.x)) as f32 + 1.0;
        if self.position.y <= ground {
            self.position.y = ground;
            self.velocity_y = 0.0;
            self.is_jumping = false;
        }
    }
}

/// Round half away from zero, so -0.5 maps to -1 rather than 0.
/// Used to turn continuous positions into block coordinates.
pub fn round_coord(value: f32) -> i32 {
    let sign = if value < 0.0 { -1 } else { 1 };
    let magnitude = value.abs();
    if magnitude % 1.0 >= 0.5 {
        sign * magnitude.ceil() as i32
    } else {
        sign * magnitude.floor() as i32
    }
}

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_player)
            .add_systems(Update, player_physics_system);
    }
}

/// Spawn the player on the surface, unless a loaded save already provided one.
fn setup_player(
    mut commands: Commands,
    player: Option<Res<Player>>,
    world: Option<ResMut<BlockWorld>>,
) {
    if player.is_some() {
        return;
    }
    let Some(mut world) = world else {
        return;
    };
    let player = Player::spawn_at_surface(&mut world);
    info!("Player spawned at {:?}", player.position);
    commands.insert_resource(player);
}

/// One physics tick per update pass.
pub fn player_physics_system(
    player: Option<ResMut<Player>>,
    world: Option<ResMut<BlockWorld>>,
) {
    let (Some(mut player), Some(mut world)) = (player, world) else {
        return;
    };
    player.tick(&mut world);
}
