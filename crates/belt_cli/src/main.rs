use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use belt_core::{
    allowed_moves, debris_targets, deploy_debris, end_turn, hijack_robot, is_game_over,
    manual_mine, move_player, purchase_module, remote_plant_robot, remote_plant_targets,
    remove_module, update_discovered, upgrade_all_robots, upgrade_module, Cell, GameState,
    ModuleKind, Occupant, Rules,
};
use belt_world::{build_initial_state, default_rules, load_rules};
use clap::{Parser, Subcommand};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(name = "belt_cli", about = "Hotseat asteroid-belt mining game")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start a hotseat session on this terminal.
    Play {
        /// World seed; random when omitted.
        #[arg(long)]
        seed: Option<u64>,
        /// JSON rules file; built-in defaults when omitted.
        #[arg(long)]
        rules: Option<String>,
    },
}

enum Step {
    Continue,
    EndTurn,
    Quit,
}

// ---------------------------------------------------------------------------
// Game loop
// ---------------------------------------------------------------------------

fn play(seed: Option<u64>, rules_path: Option<String>) -> Result<()> {
    let rules = match rules_path {
        Some(path) => load_rules(Path::new(&path))?,
        None => default_rules(),
    };
    let seed = seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut state = build_initial_state(&rules, seed, &mut rng);
    println!("Seed {seed}. Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        update_discovered(&mut state, &rules);
        render(&state, &rules);
        if is_game_over(&state) {
            println!("Every asteroid is exhausted — game over.");
            print_standings(&state);
            return Ok(());
        }
        let p = state.current_player();
        print!("{} [round {}] ${:.0} > ", p.symbol, state.meta.turn, p.money);
        io::stdout().flush()?;
        let Some(line) = stdin.lock().lines().next() else {
            return Ok(());
        };
        match dispatch(&mut state, &rules, line?.trim(), &mut rng) {
            Step::Continue => {}
            Step::EndTurn => finish_turn(&mut state),
            Step::Quit => return Ok(()),
        }
    }
}

fn finish_turn(state: &mut GameState) {
    let report = end_turn(state);
    for entry in &report.mining {
        println!("{}", entry.message);
    }
}

fn dispatch(state: &mut GameState, rules: &Rules, line: &str, rng: &mut ChaCha8Rng) -> Step {
    let parts: Vec<&str> = line.split_whitespace().collect();
    match parts.as_slice() {
        [] => Step::Continue,
        ["help"] => {
            print_help();
            Step::Continue
        }
        ["quit"] => Step::Quit,
        ["pass"] => {
            println!("{} passes.", state.current_player().symbol);
            Step::EndTurn
        }
        ["status"] => {
            print_status(state);
            Step::Continue
        }
        ["moves"] => {
            print_cells("Reachable", allowed_moves(state, rules).map(|s| s.into_iter().collect()));
            Step::Continue
        }
        ["targets"] => {
            print_cells("Plant targets", Ok(remote_plant_targets(state, rules).into_iter().collect()));
            print_cells("Debris targets", Ok(debris_targets(state, rules).into_iter().collect()));
            Step::Continue
        }
        ["move", x, y] => handle_move(state, rules, parse_cell(x, y), rng),
        ["mine"] => report(manual_mine(state).map(|o| (o.message, o.ends_turn))),
        ["plant", x, y] => match parse_cell(x, y) {
            Some(cell) => report(
                remote_plant_robot(state, rules, cell).map(|o| (o.message, o.ends_turn)),
            ),
            None => bad_cell(),
        },
        ["hijack"] => report(hijack_robot(state, rules).map(|o| (o.message, o.ends_turn))),
        ["robots"] => match upgrade_all_robots(state) {
            Ok(outcome) => {
                for message in &outcome.messages {
                    println!("{message}");
                }
                Step::Continue
            }
            Err(err) => {
                println!("{err}");
                Step::Continue
            }
        },
        ["debris", x, y] => match parse_cell(x, y) {
            Some(cell) => report(deploy_debris(state, rules, cell).map(|o| (o.message, o.ends_turn))),
            None => bad_cell(),
        },
        ["buy", kind] => module_command(kind, |k| {
            report(purchase_module(state, rules, k).map(|o| (o.message, o.ends_turn)))
        }),
        ["upgrade", kind] => module_command(kind, |k| {
            report(upgrade_module(state, rules, k).map(|o| (o.message, o.ends_turn)))
        }),
        ["drop", kind] => module_command(kind, |k| {
            report(remove_module(state, k).map(|o| (o.message, o.ends_turn)))
        }),
        _ => {
            println!("Unrecognized command. Type 'help'.");
            Step::Continue
        }
    }
}

fn handle_move(state: &mut GameState, rules: &Rules, cell: Option<Cell>, rng: &mut ChaCha8Rng) -> Step {
    let Some(dest) = cell else { return bad_cell() };
    match move_player(state, rules, dest, rng) {
        Ok(outcome) => {
            println!("{}", outcome.message);
            if let Some(event) = &outcome.event {
                println!("Event: {event}");
            }
            if outcome.ends_turn {
                Step::EndTurn
            } else {
                Step::Continue
            }
        }
        Err(err) => {
            println!("{err}");
            Step::Continue
        }
    }
}

fn report(result: std::result::Result<(String, bool), belt_core::ActionError>) -> Step {
    match result {
        Ok((message, ends_turn)) => {
            println!("{message}");
            if ends_turn {
                Step::EndTurn
            } else {
                Step::Continue
            }
        }
        Err(err) => {
            println!("{err}");
            Step::Continue
        }
    }
}

fn module_command(name: &str, run: impl FnOnce(ModuleKind) -> Step) -> Step {
    match parse_kind(name) {
        Some(kind) => run(kind),
        None => {
            println!("Unknown module '{name}'. Try drill, telescope, reactor, launchbay, factory, icepenetrator, nerva, explosiveslab, warpdrive.");
            Step::Continue
        }
    }
}

fn parse_kind(name: &str) -> Option<ModuleKind> {
    match name.to_ascii_lowercase().as_str() {
        "drill" => Some(ModuleKind::Drill),
        "telescope" => Some(ModuleKind::Telescope),
        "reactor" => Some(ModuleKind::Reactor),
        "launchbay" => Some(ModuleKind::LaunchBay),
        "factory" => Some(ModuleKind::Factory),
        "icepenetrator" => Some(ModuleKind::IcePenetrator),
        "nerva" | "fusionreactor" => Some(ModuleKind::FusionReactor),
        "explosiveslab" => Some(ModuleKind::ExplosivesLab),
        "warpdrive" => Some(ModuleKind::WarpDrive),
        _ => None,
    }
}

fn parse_cell(x: &str, y: &str) -> Option<Cell> {
    Some(Cell::new(x.parse().ok()?, y.parse().ok()?))
}

fn bad_cell() -> Step {
    println!("Expected two integer coordinates.");
    Step::Continue
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

fn tile_char(state: &GameState, cell: Cell) -> char {
    let info = state.tile_info(cell);
    if !info.discovered {
        return '~';
    }
    if let Some(player) = info.players.first() {
        return char::from_digit(player.0 as u32 + 1, 10).unwrap_or('?');
    }
    if info.debris {
        return '#';
    }
    match info.occupant {
        Occupant::Asteroid { kind, exhausted, .. } => {
            let c = match kind {
                belt_core::AsteroidKind::Ice => 'I',
                belt_core::AsteroidKind::Hematite => 'H',
                belt_core::AsteroidKind::Malachite => 'M',
                belt_core::AsteroidKind::Sperrylite => 'S',
            };
            if exhausted {
                c.to_ascii_lowercase()
            } else {
                c
            }
        }
        Occupant::Empty => '.',
    }
}

fn render(state: &GameState, rules: &Rules) {
    for y in 0..rules.grid_height {
        let row: String = (0..rules.grid_width)
            .map(|x| tile_char(state, Cell::new(x, y)))
            .collect();
        println!("{row}");
    }
    println!("~ unknown  . empty  # debris  I/H/M/S asteroid (lowercase = exhausted)  1..{} players", state.players.len());
}

fn print_status(state: &GameState) {
    let p = state.current_player();
    println!(
        "{} at {}  ${:.0}  mined {:.0}  upgrades {}  robot income this round ${:.0}",
        p.symbol, p.pos, p.money, p.total_mined, p.upgrades_purchased, p.robot_earnings_this_turn
    );
    for kind in ModuleKind::ALL {
        if p.modules.has(kind) {
            println!("  {kind} installed");
        }
    }
}

fn print_cells(label: &str, cells: std::result::Result<Vec<Cell>, belt_core::ActionError>) {
    match cells {
        Ok(mut cells) => {
            cells.sort_by_key(|c| (c.y, c.x));
            let rendered: Vec<String> = cells.iter().map(ToString::to_string).collect();
            println!("{label}: {}", rendered.join(" "));
        }
        Err(err) => println!("{label}: {err}"),
    }
}

fn print_standings(state: &GameState) {
    let mut players: Vec<_> = state.players.iter().collect();
    players.sort_by(|a, b| b.money.total_cmp(&a.money));
    for (rank, p) in players.iter().enumerate() {
        println!(
            "{}. {}  ${:.0}  mined {:.0}  upgrades {}",
            rank + 1,
            p.symbol,
            p.money,
            p.total_mined,
            p.upgrades_purchased
        );
    }
}

fn print_help() {
    println!(
        "Commands:\n  \
         moves | targets | status     show legal cells / your stats\n  \
         move X Y                     walk or warp (may end the turn)\n  \
         mine                         mine the asteroid under you (ends turn)\n  \
         plant X Y                    deploy a robot remotely\n  \
         hijack                       seize the robot under you (ends turn)\n  \
         robots                       raise owned robots to factory capacity\n  \
         debris X Y                   deploy debris (ends turn)\n  \
         buy/upgrade/drop MODULE      manage modules\n  \
         pass                         end your turn\n  \
         quit"
    );
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Play { seed, rules } => play(seed, rules),
    }
}
