use std::sync::Arc;

use battle_content::Catalog;
use battle_core::{
    ActionCategory, ActionDefinition, Battle, BattleResult, Command, FighterProfile,
    MaskDefinition, Side, StatBlock,
};
use battle_runtime::{
    AiCommandProvider, BattleEvent, BattleRuntime, ChannelProvider, RuntimeConfig, RuntimeError,
    ScriptedProvider, Topic,
};

const STATS: StatBlock = StatBlock::new(100, 20, 10, 10, 10, 10, 10);

fn duel() -> Battle {
    let mask = Arc::new(MaskDefinition::new("plain").with_action(Arc::new(
        ActionDefinition::new("strike", ActionCategory::Attack).with_power(5),
    )));
    Battle::new(
        FighterProfile::new("hero", STATS, Arc::clone(&mask)),
        FighterProfile::new("brute", STATS, mask),
    )
}

fn idle() -> ScriptedProvider {
    ScriptedProvider::default()
}

fn ai_battle(player: &str, enemy: &str, seed: u64) -> BattleRuntime {
    let catalog = Catalog::embedded().unwrap();
    let battle = catalog.battle(player, enemy).unwrap().seed(seed).build();
    let profile = |id: &str| {
        catalog
            .fighter(id)
            .and_then(|entry| entry.ai.clone())
            .unwrap_or_default()
    };
    BattleRuntime::builder(battle)
        .player_provider(AiCommandProvider::new(profile(player)))
        .enemy_provider(AiCommandProvider::new(profile(enemy)))
        .build()
        .unwrap()
}

#[test]
fn both_providers_are_required() {
    let missing = BattleRuntime::builder(duel()).player_provider(idle()).build();
    assert!(matches!(
        missing,
        Err(RuntimeError::ProviderNotSet { side: Side::Enemy })
    ));
}

#[tokio::test]
async fn knockout_ends_the_run() {
    let mut battle = duel();
    battle.force_next_damage(Side::Player, 500);
    let mut runtime = BattleRuntime::builder(battle)
        .player_provider(ScriptedProvider::new([Command::use_action("strike")]))
        .enemy_provider(idle())
        .build()
        .unwrap();
    let mut results = runtime.subscribe(Topic::Battle);

    let result = runtime.run().await.unwrap();
    assert_eq!(
        result,
        BattleResult {
            winner: Some(Side::Player),
            turns: 1,
        }
    );
    assert!(matches!(results.recv().await, Ok(BattleEvent::Started { first: Side::Player, .. })));
    assert_eq!(results.recv().await.ok(), Some(BattleEvent::Ended(result)));
    assert_eq!(runtime.battle().fighter(Side::Enemy).hp(), 0);
}

#[tokio::test]
async fn passive_fighters_hit_the_turn_limit() {
    let config = RuntimeConfig {
        max_turns: 3,
        ..RuntimeConfig::default()
    };
    let mut runtime = BattleRuntime::builder(duel())
        .config(config)
        .player_provider(idle())
        .enemy_provider(idle())
        .build()
        .unwrap();

    let error = runtime.run().await.unwrap_err();
    assert!(matches!(error, RuntimeError::TurnLimitReached(3)));
    assert_eq!(runtime.battle().context().turn_number(), 3);
}

#[tokio::test]
async fn rejected_commands_are_reported_and_skipped() {
    let mut runtime = BattleRuntime::builder(duel())
        .player_provider(ScriptedProvider::new([
            Command::use_action("fireball"),
            Command::use_action("strike"),
        ]))
        .enemy_provider(idle())
        .build()
        .unwrap();
    let mut commands = runtime.subscribe(Topic::Command);

    runtime.start().unwrap();
    runtime.play_turn().await.unwrap();

    match commands.recv().await.unwrap() {
        BattleEvent::CommandRejected { side, command, code, .. } => {
            assert_eq!(side, Side::Player);
            assert_eq!(command, Command::use_action("fireball"));
            assert_eq!(code, "COMMAND_ACTION_NOT_AVAILABLE");
        }
        other => panic!("expected a rejection, got {other:?}"),
    }
    assert!(matches!(
        commands.recv().await.unwrap(),
        BattleEvent::CommandResolved { side: Side::Player, .. }
    ));
    assert_eq!(runtime.battle().fighter(Side::Enemy).hp(), 95);
    // fireball, strike, then the empty script ends the turn
    assert_eq!(runtime.battle().commands_this_turn(), 3);
}

#[tokio::test]
async fn channel_provider_feeds_commands() {
    let (tx, provider) = ChannelProvider::channel(4);
    let mut runtime = BattleRuntime::builder(duel())
        .player_provider(provider)
        .enemy_provider(idle())
        .build()
        .unwrap();
    runtime.start().unwrap();

    tx.send(Command::use_action("strike")).await.unwrap();
    tx.send(Command::EndTurn).await.unwrap();
    runtime.play_turn().await.unwrap();
    assert_eq!(runtime.battle().fighter(Side::Enemy).hp(), 95);

    runtime.play_turn().await.unwrap();
    drop(tx);
    let error = runtime.play_turn().await.unwrap_err();
    assert!(matches!(
        error,
        RuntimeError::ProviderChannelClosed { side: Side::Player }
    ));
}

#[tokio::test]
async fn embedded_roster_fights_to_a_result() {
    let mut runtime = ai_battle("wanderer", "warden", 7);
    let mut outcome = runtime.subscribe(Topic::Battle);

    let result = runtime.run().await.unwrap();
    assert!(runtime.battle().is_finished());
    assert!(result.turns >= 1);
    if let Some(winner) = result.winner {
        assert!(runtime.battle().fighter(winner).is_alive());
        assert!(!runtime.battle().fighter(winner.opponent()).is_alive());
    }
    assert!(matches!(outcome.try_recv(), Ok(BattleEvent::Started { .. })));
    assert_eq!(outcome.try_recv().ok(), Some(BattleEvent::Ended(result)));
}

#[tokio::test]
async fn same_seed_replays_the_same_battle() {
    let mut first = ai_battle("jester", "stalker", 42);
    let mut second = ai_battle("jester", "stalker", 42);

    let a = first.run().await.unwrap();
    let b = second.run().await.unwrap();
    assert_eq!(a, b);
    for side in [Side::Player, Side::Enemy] {
        assert_eq!(first.battle().fighter(side).hp(), second.battle().fighter(side).hp());
    }
}

#[test]
fn events_serialize_for_presentation() {
    let event = BattleEvent::CommandRejected {
        side: Side::Enemy,
        command: Command::EndTurn,
        code: "BATTLE_TURN_ALREADY_ENDED".into(),
        reason: "turn already ended".into(),
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: BattleEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(back, event);
}
