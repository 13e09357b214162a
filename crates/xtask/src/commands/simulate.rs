//! Run an AI-vs-AI battle and print what happens.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use battle_core::{BattleResult, CommandOutcome, Side};
use battle_runtime::{AiCommandProvider, BattleEvent, BattleRuntime, RuntimeConfig, Topic};
use clap::Parser;
use console::style;
use tokio::sync::broadcast;

/// Run an AI-vs-AI battle between two roster fighters
#[derive(Parser)]
pub struct Simulate {
    /// Roster id of the player-side fighter
    #[arg(long, default_value = "wanderer")]
    player: String,

    /// Roster id of the enemy-side fighter
    #[arg(long, default_value = "warden")]
    enemy: String,

    /// RNG seed (overrides BATTLE_SEED)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Content directory (defaults to the embedded roster)
    #[arg(short, long, value_name = "DIR")]
    content_dir: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "log")]
    format: OutputFormat,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum OutputFormat {
    /// Final result only
    Summary,
    /// Turn-by-turn battle log
    Log,
    /// One JSON event per line
    Json,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let (catalog, battle_config) = super::load_content(self.content_dir.as_deref())?;

        let mut config = RuntimeConfig::from_env()?;
        if self.seed.is_some() {
            config.seed = self.seed;
        }

        let battle = config
            .configure(catalog.battle(&self.player, &self.enemy)?, battle_config)
            .build();
        let profile = |id: &str| {
            catalog
                .fighter(id)
                .and_then(|entry| entry.ai.clone())
                .unwrap_or_default()
        };
        let mut runtime = BattleRuntime::builder(battle)
            .config(config)
            .player_provider(AiCommandProvider::new(profile(&self.player)))
            .enemy_provider(AiCommandProvider::new(profile(&self.enemy)))
            .build()?;

        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to start async runtime")?;
        let result = rt.block_on(self.drive(&mut runtime))?;

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(&BattleEvent::Ended(result))?)
            }
            OutputFormat::Summary | OutputFormat::Log => print_result(&runtime, result),
        }
        Ok(())
    }

    /// Plays turn by turn so each turn's events can be printed in order.
    async fn drive(&self, runtime: &mut BattleRuntime) -> Result<BattleResult> {
        let mut battle_rx = runtime.subscribe(Topic::Battle);
        let mut turn_rx = runtime.subscribe(Topic::Turn);
        let mut command_rx = runtime.subscribe(Topic::Command);

        runtime.start()?;
        self.emit(runtime, drain(&mut battle_rx))?;

        loop {
            if let Some(result) = runtime.battle().result() {
                return Ok(result);
            }
            if runtime.turn_limit_reached() {
                bail!("No winner after {} turns", runtime.config().max_turns);
            }
            runtime.play_turn().await?;

            let mut turn = drain(&mut turn_rx).into_iter();
            let mut ordered: Vec<_> = turn.next().into_iter().collect();
            ordered.extend(drain(&mut command_rx));
            ordered.extend(turn);
            self.emit(runtime, ordered)?;
        }
    }

    fn emit(&self, runtime: &BattleRuntime, events: Vec<BattleEvent>) -> Result<()> {
        match self.format {
            OutputFormat::Summary => {}
            OutputFormat::Json => {
                for event in &events {
                    println!("{}", serde_json::to_string(event)?);
                }
            }
            OutputFormat::Log => {
                for event in &events {
                    print_event(runtime, event);
                }
            }
        }
        Ok(())
    }
}

fn drain(rx: &mut broadcast::Receiver<BattleEvent>) -> Vec<BattleEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn name(runtime: &BattleRuntime, side: Side) -> String {
    runtime.battle().fighter(side).name().to_owned()
}

fn print_event(runtime: &BattleRuntime, event: &BattleEvent) {
    match event {
        BattleEvent::Started { first, player, enemy } => {
            println!(
                "{} {} vs {} ({} opens, seed {})",
                style("Battle:").bold(),
                style(player).cyan(),
                style(enemy).magenta(),
                name(runtime, *first),
                runtime.battle().context().seed()
            );
        }
        BattleEvent::TurnOpened(opening) => {
            println!(
                "\n{} {} {}",
                style(format!("Round {}", opening.turn_number)).bold(),
                name(runtime, opening.side),
                style(format!("({} AP)", opening.ap)).dim()
            );
            if opening.tick_damage > 0 {
                println!("  takes {} damage from statuses", opening.tick_damage);
            }
            if let Some(companion) = &opening.companion {
                let how = companion
                    .action
                    .as_ref()
                    .map_or_else(|| "strikes".to_owned(), |action| format!("uses {action}"));
                println!(
                    "  companion {} for {}",
                    how,
                    companion.damage.unwrap_or_default()
                );
            }
        }
        BattleEvent::CommandResolved { side, outcome, .. } => match outcome {
            CommandOutcome::Action(action) => {
                let mut line = format!(
                    "  {} uses {}",
                    name(runtime, *side),
                    style(&action.action).green()
                );
                if let Some(damage) = action.damage {
                    line.push_str(&format!(", {damage} damage"));
                }
                if let Some(healing) = action.healing {
                    line.push_str(&format!(", heals {healing}"));
                }
                if let Some(counter) = action.counter_damage {
                    line.push_str(&format!(", countered for {counter}"));
                }
                if action.target_defeated && action.target != action.actor {
                    line.push_str(&format!(", {}", style("knockout").red().bold()));
                }
                println!("{line}");
            }
            CommandOutcome::MaskChanged(change) => {
                println!(
                    "  {} switches {} -> {}",
                    name(runtime, *side),
                    change.from,
                    style(&change.to).yellow()
                );
            }
            CommandOutcome::TurnEnded => println!("  {} ends the turn", name(runtime, *side)),
        },
        BattleEvent::CommandRejected { command, reason, .. } => {
            println!("  {} {:?}: {}", style("rejected").yellow(), command, reason);
        }
        BattleEvent::TurnClosed(closing) => {
            if closing.tick_damage > 0 {
                println!("  takes {} damage from statuses", closing.tick_damage);
            }
            if closing.forced {
                println!("  {}", style("command limit reached").yellow());
            }
            let battle = runtime.battle();
            let player = battle.fighter(Side::Player);
            let enemy = battle.fighter(Side::Enemy);
            println!(
                "  {}",
                style(format!(
                    "{} {}/{} | {} {}/{}",
                    player.name(),
                    player.hp(),
                    player.max_hp(),
                    enemy.name(),
                    enemy.hp(),
                    enemy.max_hp()
                ))
                .dim()
            );
        }
        BattleEvent::Ended(_) => {}
    }
}

fn print_result(runtime: &BattleRuntime, result: BattleResult) {
    let verdict = match result.winner {
        Some(side) => format!("{} wins", name(runtime, side)),
        None => "Double knockout".to_owned(),
    };
    println!(
        "\n{} after {} rounds",
        style(verdict).green().bold(),
        result.turns
    );
    for side in [Side::Player, Side::Enemy] {
        let fighter = runtime.battle().fighter(side);
        println!(
            "  {:<20} HP {:>4}/{:<4} mask {}",
            fighter.name(),
            fighter.hp(),
            fighter.max_hp(),
            fighter.mask().id
        );
    }
}
