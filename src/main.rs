use bevy::prelude::*;

use flatworld::player::{Player, PlayerPlugin, player_physics_system};
use flatworld::save;
use flatworld::world::{BlockWorld, WorldPlugin, WorldSeed};

/// Number of simulation ticks the headless session runs before saving.
const SESSION_TICKS: u32 = 600;

fn main() {
    let name = parse_world_name();

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins(bevy::log::LogPlugin::default());

    // Resume an existing save, otherwise generate a fresh world.
    if save::save_exists(&name) {
        match save::load_world(&name) {
            Ok((world, player)) => {
                app.insert_resource(world);
                app.insert_resource(player);
            }
            Err(err) => {
                eprintln!("Failed to load world '{name}': {err}");
                std::process::exit(1);
            }
        }
    } else {
        app.insert_resource(BlockWorld::new(name.clone(), parse_seed()));
    }

    app.add_plugins((WorldPlugin, PlayerPlugin))
        .add_systems(Update, scripted_input_system.before(player_physics_system));

    // Headless session: one update pass per tick. A real presentation layer
    // would add its own plugins and drive the app loop instead.
    for _ in 0..SESSION_TICKS {
        app.update();
    }

    let world = app.world().resource::<BlockWorld>();
    let player = app.world().resource::<Player>();
    info!(
        "Session over at position {:?} ({} columns generated)",
        player.position,
        world.column_count()
    );

    if let Err(err) = save::save_world(world, player) {
        eprintln!("Failed to save world '{}': {err}", world.name);
        std::process::exit(1);
    }
}

/// Stand-in for the (out of scope) scene controller: wander right and hop
/// every couple of seconds so the session exercises streaming and physics.
fn scripted_input_system(player: Option<ResMut<Player>>, mut ticks: Local<u32>) {
    let Some(mut player) = player else {
        return;
    };
    *ticks += 1;
    player.move_input(1, 0, true);
    if *ticks % 120 == 0 {
        player.jump();
    }
}

fn parse_seed() -> WorldSeed {
    // Check command line arguments: --seed <value> or -s <value>
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--seed" || args[i] == "-s") && i + 1 < args.len() {
            let seed_str = &args[i + 1];
            // Try to parse as number first
            if let Ok(num) = seed_str.parse::<u32>() {
                return WorldSeed::new(num);
            } else {
                // Use string as seed
                return WorldSeed::from_string(seed_str);
            }
        }
    }

    // Check environment variable
    if let Ok(seed_str) = std::env::var("FLATWORLD_SEED") {
        if let Ok(num) = seed_str.parse::<u32>() {
            return WorldSeed::new(num);
        } else {
            return WorldSeed::from_string(&seed_str);
        }
    }

    // Generate random seed based on current time
    let random_seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u32)
        .unwrap_or(12345);
    WorldSeed::new(random_seed)
}

fn parse_world_name() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--world" || args[i] == "-w") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    std::env::var("FLATWORLD_WORLD").unwrap_or_else(|_| "world".to_string())
}
