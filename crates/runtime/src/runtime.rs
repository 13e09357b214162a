//! Battle loop orchestrator.
//!
//! [`BattleRuntime`] owns a [`Battle`] and one [`CommandProvider`] per side.
//! Each turn it opens the turn, asks the active provider for commands until
//! the battle reports the turn over, then closes it. Every step is published
//! on the [`EventBus`].

use std::str::FromStr;

use battle_core::{
    Battle, BattleBuilder, BattleConfig, BattleError, BattlePhase, BattleResult, GameError, Side,
};
use tokio::sync::broadcast;

use crate::api::{CommandProvider, Result, RuntimeError};
use crate::events::{BattleEvent, EventBus, Topic};

/// Runtime settings, usually read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Seed for the battle RNG. `None` keeps the builder's seed.
    pub seed: Option<u64>,
    pub event_buffer_size: usize,
    /// Overrides [`BattleConfig::max_commands_per_turn`] when set.
    pub max_commands_per_turn: Option<u32>,
    /// Rounds after which [`BattleRuntime::run`] gives up.
    pub max_turns: u32,
}

impl RuntimeConfig {
    pub const DEFAULT_EVENT_BUFFER: usize = EventBus::DEFAULT_CAPACITY;
    pub const DEFAULT_MAX_TURNS: u32 = 200;

    pub const ENV_SEED: &'static str = "BATTLE_SEED";
    pub const ENV_EVENT_BUFFER: &'static str = "BATTLE_EVENT_BUFFER";
    pub const ENV_MAX_COMMANDS: &'static str = "BATTLE_MAX_COMMANDS";
    pub const ENV_MAX_TURNS: &'static str = "BATTLE_MAX_TURNS";

    /// Reads `BATTLE_SEED`, `BATTLE_EVENT_BUFFER`, `BATTLE_MAX_COMMANDS` and
    /// `BATTLE_MAX_TURNS`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            seed: read_env(Self::ENV_SEED)?,
            event_buffer_size: read_env(Self::ENV_EVENT_BUFFER)?
                .unwrap_or(defaults.event_buffer_size),
            max_commands_per_turn: read_env(Self::ENV_MAX_COMMANDS)?,
            max_turns: read_env(Self::ENV_MAX_TURNS)?.unwrap_or(defaults.max_turns),
        })
    }

    /// Applies the overrides to `base`.
    pub fn battle_config(&self, mut base: BattleConfig) -> BattleConfig {
        if let Some(limit) = self.max_commands_per_turn {
            base.max_commands_per_turn = limit;
        }
        base
    }

    /// Applies the seed and battle overrides to a battle builder.
    pub fn configure(&self, builder: BattleBuilder, base: BattleConfig) -> BattleBuilder {
        let builder = builder.config(self.battle_config(base));
        match self.seed {
            Some(seed) => builder.seed(seed),
            None => builder,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            seed: None,
            event_buffer_size: Self::DEFAULT_EVENT_BUFFER,
            max_commands_per_turn: None,
            max_turns: Self::DEFAULT_MAX_TURNS,
        }
    }
}

fn read_env<T: FromStr>(key: &'static str) -> Result<Option<T>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| RuntimeError::InvalidConfig { key, value: raw }),
        Err(_) => Ok(None),
    }
}

/// Drives one battle from start to result.
pub struct BattleRuntime {
    battle: Battle,
    providers: [Box<dyn CommandProvider>; 2],
    events: EventBus,
    config: RuntimeConfig,
    announced: bool,
}

impl BattleRuntime {
    pub fn builder(battle: Battle) -> BattleRuntimeBuilder {
        BattleRuntimeBuilder::new(battle)
    }

    pub fn battle(&self) -> &Battle {
        &self.battle
    }

    pub fn into_battle(self) -> Battle {
        self.battle
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Cloneable handle to the bus this runtime publishes on.
    pub fn events(&self) -> EventBus {
        self.events.clone()
    }

    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<BattleEvent> {
        self.events.subscribe(topic)
    }

    /// Rolls initiative if needed and plays turns until the battle ends.
    pub async fn run(&mut self) -> Result<BattleResult> {
        if self.battle.phase() == BattlePhase::NotStarted {
            self.start()?;
        }

        loop {
            if let Some(result) = self.battle.result() {
                self.announce(result);
                return Ok(result);
            }
            if self.turn_limit_reached() {
                tracing::warn!(turns = self.config.max_turns, "battle exceeded turn limit");
                return Err(RuntimeError::TurnLimitReached(self.config.max_turns));
            }
            self.play_turn().await?;
        }
    }

    /// True between rounds once `max_turns` rounds have been played.
    pub fn turn_limit_reached(&self) -> bool {
        let between_rounds =
            self.battle.phase() == BattlePhase::AwaitingTurn(self.battle.first_mover());
        between_rounds && self.battle.context().turn_number() >= self.config.max_turns
    }

    /// Rolls initiative and announces the battle.
    pub fn start(&mut self) -> Result<Side> {
        let first = self.battle.start()?;
        let player = self.battle.fighter(Side::Player).name().to_owned();
        let enemy = self.battle.fighter(Side::Enemy).name().to_owned();
        tracing::info!(
            %player,
            %enemy,
            first = %first,
            seed = self.battle.context().seed(),
            "battle started"
        );
        self.events.publish(BattleEvent::Started {
            first,
            player,
            enemy,
        });
        Ok(first)
    }

    /// Plays the next turn. Returns the result when the battle ended during it.
    pub async fn play_turn(&mut self) -> Result<Option<BattleResult>> {
        let opening = self.battle.begin_turn()?;
        let side = opening.side;
        tracing::info!(side = %side, turn = opening.turn_number, ap = opening.ap, "turn opened");
        if let Some(companion) = &opening.companion {
            tracing::debug!(side = %side, damage = ?companion.damage, "companion struck");
        }
        let opened_with = opening.result;
        self.events.publish(BattleEvent::TurnOpened(opening));
        if opened_with.is_some() {
            return Ok(opened_with);
        }

        while !self.battle.turn_over() {
            let command = self.providers[side.index()]
                .next_command(side, &self.battle)
                .await?;
            match self.battle.submit(command.clone()) {
                Ok(outcome) => {
                    tracing::debug!(side = %side, ?command, "command resolved");
                    self.events.publish(BattleEvent::CommandResolved {
                        side,
                        command,
                        outcome,
                    });
                }
                Err(BattleError::Command(error)) => {
                    tracing::warn!(
                        side = %side,
                        ?command,
                        code = error.error_code(),
                        "command rejected: {error}"
                    );
                    self.events.publish(BattleEvent::CommandRejected {
                        side,
                        command,
                        code: error.error_code().to_owned(),
                        reason: error.to_string(),
                    });
                }
                Err(other) => return Err(other.into()),
            }
        }

        if let Some(result) = self.battle.result() {
            return Ok(Some(result));
        }

        let closing = self.battle.end_turn()?;
        if closing.forced {
            tracing::warn!(
                side = %side,
                limit = self.battle.config().max_commands_per_turn,
                "command limit reached, turn force-ended"
            );
        }
        tracing::info!(side = %side, tick_damage = closing.tick_damage, "turn closed");
        let closed_with = closing.result;
        self.events.publish(BattleEvent::TurnClosed(closing));
        Ok(closed_with)
    }

    fn announce(&mut self, result: BattleResult) {
        if self.announced {
            return;
        }
        self.announced = true;
        match result.winner {
            Some(winner) => {
                let name = self.battle.fighter(winner).name();
                tracing::info!(winner = %winner, %name, turns = result.turns, "battle ended");
            }
            None => tracing::info!(turns = result.turns, "battle ended in a double knockout"),
        }
        self.events.publish(BattleEvent::Ended(result));
    }
}

/// Builder for [`BattleRuntime`].
pub struct BattleRuntimeBuilder {
    battle: Battle,
    config: RuntimeConfig,
    events: Option<EventBus>,
    providers: [Option<Box<dyn CommandProvider>>; 2],
}

impl BattleRuntimeBuilder {
    fn new(battle: Battle) -> Self {
        Self {
            battle,
            config: RuntimeConfig::default(),
            events: None,
            providers: [None, None],
        }
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Publish on an existing bus instead of creating one.
    pub fn event_bus(mut self, events: EventBus) -> Self {
        self.events = Some(events);
        self
    }

    pub fn provider(mut self, side: Side, provider: impl CommandProvider + 'static) -> Self {
        self.providers[side.index()] = Some(Box::new(provider));
        self
    }

    pub fn player_provider(self, provider: impl CommandProvider + 'static) -> Self {
        self.provider(Side::Player, provider)
    }

    pub fn enemy_provider(self, provider: impl CommandProvider + 'static) -> Self {
        self.provider(Side::Enemy, provider)
    }

    pub fn build(self) -> Result<BattleRuntime> {
        let [player, enemy] = self.providers;
        let player = player.ok_or(RuntimeError::ProviderNotSet { side: Side::Player })?;
        let enemy = enemy.ok_or(RuntimeError::ProviderNotSet { side: Side::Enemy })?;
        let events = self
            .events
            .unwrap_or_else(|| EventBus::with_capacity(self.config.event_buffer_size));

        Ok(BattleRuntime {
            battle: self.battle,
            providers: [player, enemy],
            events,
            config: self.config,
            announced: false,
        })
    }
}
