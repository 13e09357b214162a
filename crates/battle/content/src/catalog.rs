//! Resolved content catalog.
//!
//! Specs reference each other by id (actions name statuses, masks name
//! actions, fighters name masks and AI profiles). [`Catalog::resolve`]
//! turns them into shared definitions. An unresolved reference is logged and
//! dropped; a fighter whose starting mask cannot be resolved is skipped.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use battle_core::{
    ActionDefinition, ActionId, ActionModifiers, AiProfile, Battle, BattleBuilder,
    ConditionalBonus, FighterProfile, MaskDefinition, MaskId, Side, StatusDefinition, StatusId,
    StatusRemoval, StatusType,
};
use tracing::warn;

use crate::loaders::{
    ActionLoader, ActionSpec, AiLoader, FighterLoader, FighterSpec, LoadResult, MaskLoader,
    MaskSpec, ModifierSpec, StatusLoader, StatusSpec,
};

/// Raw catalog files, one string per file.
#[derive(Clone, Copy, Debug)]
pub struct ContentSources<'a> {
    pub statuses: &'a str,
    pub actions: &'a str,
    pub masks: &'a str,
    pub fighters: &'a str,
    pub ai: &'a str,
}

impl ContentSources<'static> {
    /// Default roster shipped with the crate.
    pub const EMBEDDED: Self = Self {
        statuses: include_str!("../data/statuses.ron"),
        actions: include_str!("../data/actions.ron"),
        masks: include_str!("../data/masks.ron"),
        fighters: include_str!("../data/fighters.ron"),
        ai: include_str!("../data/ai.ron"),
    };
}

/// A fighter ready to enter battle.
#[derive(Clone, Debug)]
pub struct FighterEntry {
    pub id: String,
    pub profile: FighterProfile,
    pub companion: Option<Arc<MaskDefinition>>,
    pub ai: Option<AiProfile>,
}

#[derive(Clone, Debug, Default)]
pub struct Catalog {
    /// Every status definition by id, variants included.
    statuses: BTreeMap<StatusId, Arc<StatusDefinition>>,
    /// Base definition per type; the battle's status library.
    base_statuses: BTreeMap<StatusType, Arc<StatusDefinition>>,
    actions: BTreeMap<ActionId, Arc<ActionDefinition>>,
    masks: BTreeMap<MaskId, Arc<MaskDefinition>>,
    fighters: BTreeMap<String, FighterEntry>,
    ai_profiles: HashMap<String, AiProfile>,
}

impl Catalog {
    /// Catalog built from the embedded default roster.
    pub fn embedded() -> LoadResult<Self> {
        Self::from_sources(&ContentSources::EMBEDDED)
    }

    pub fn from_sources(sources: &ContentSources<'_>) -> LoadResult<Self> {
        Ok(Self::resolve(
            StatusLoader::parse(sources.statuses)?,
            ActionLoader::parse(sources.actions)?,
            MaskLoader::parse(sources.masks)?,
            FighterLoader::parse(sources.fighters)?,
            AiLoader::parse(sources.ai)?,
        ))
    }

    /// Resolve specs bottom-up: statuses, actions, masks, then fighters.
    pub fn resolve(
        statuses: Vec<StatusSpec>,
        actions: Vec<ActionSpec>,
        masks: Vec<MaskSpec>,
        fighters: Vec<FighterSpec>,
        ai_profiles: HashMap<String, AiProfile>,
    ) -> Self {
        let mut catalog = Self {
            ai_profiles,
            ..Self::default()
        };

        for spec in statuses {
            let id = spec.reference();
            let base = spec.is_base();
            let status = Arc::new(spec.into_definition());
            if base {
                catalog.base_statuses.insert(status.kind, Arc::clone(&status));
            }
            if catalog.statuses.insert(id.clone(), status).is_some() {
                warn!(status = %id, "duplicate status definition, keeping the last one");
            }
        }
        for spec in actions {
            let action = catalog.resolve_action(spec);
            if let Some(previous) = catalog.actions.insert(action.id.clone(), Arc::new(action)) {
                warn!(action = %previous.id, "duplicate action definition, keeping the last one");
            }
        }
        for spec in masks {
            let mask = catalog.resolve_mask(spec);
            if let Some(previous) = catalog.masks.insert(mask.id.clone(), Arc::new(mask)) {
                warn!(mask = %previous.id, "duplicate mask definition, keeping the last one");
            }
        }
        for spec in fighters {
            if let Some(entry) = catalog.resolve_fighter(spec) {
                catalog.fighters.insert(entry.id.clone(), entry);
            }
        }
        catalog
    }

    // ===== lookups =====

    /// Base definition of a status type.
    pub fn status(&self, kind: StatusType) -> Option<&Arc<StatusDefinition>> {
        self.base_statuses.get(&kind)
    }

    pub fn status_by_id(&self, id: &StatusId) -> Option<&Arc<StatusDefinition>> {
        self.statuses.get(id)
    }

    pub fn action(&self, id: &ActionId) -> Option<&Arc<ActionDefinition>> {
        self.actions.get(id)
    }

    pub fn mask(&self, id: &MaskId) -> Option<&Arc<MaskDefinition>> {
        self.masks.get(id)
    }

    pub fn fighter(&self, id: &str) -> Option<&FighterEntry> {
        self.fighters.get(id)
    }

    pub fn ai_profile(&self, name: &str) -> Option<&AiProfile> {
        self.ai_profiles.get(name)
    }

    pub fn statuses(&self) -> impl Iterator<Item = (&StatusId, &Arc<StatusDefinition>)> {
        self.statuses.iter()
    }

    pub fn actions(&self) -> impl Iterator<Item = &Arc<ActionDefinition>> {
        self.actions.values()
    }

    pub fn masks(&self) -> impl Iterator<Item = &Arc<MaskDefinition>> {
        self.masks.values()
    }

    pub fn fighters(&self) -> impl Iterator<Item = &FighterEntry> {
        self.fighters.values()
    }

    /// Battle builder for two roster entries, with companions and the status
    /// library wired in.
    pub fn battle(&self, player: &str, enemy: &str) -> LoadResult<BattleBuilder> {
        let player = self
            .fighter(player)
            .ok_or_else(|| anyhow::anyhow!("Unknown fighter '{}'", player))?;
        let enemy = self
            .fighter(enemy)
            .ok_or_else(|| anyhow::anyhow!("Unknown fighter '{}'", enemy))?;

        let mut builder = Battle::builder(player.profile.clone(), enemy.profile.clone())
            .statuses(self.base_statuses.values().cloned());
        for (side, entry) in [(Side::Player, player), (Side::Enemy, enemy)] {
            if let Some(companion) = &entry.companion {
                builder = builder.companion(side, Arc::clone(companion));
            }
        }
        Ok(builder)
    }

    // ===== resolution =====

    fn status_ref(&self, id: &StatusId, owner: &str) -> Option<Arc<StatusDefinition>> {
        let status = self.statuses.get(id).cloned();
        if status.is_none() {
            warn!(status = %id, owner, "unresolved status reference");
        }
        status
    }

    fn resolve_action(&self, spec: ActionSpec) -> ActionDefinition {
        let owner = spec.id.as_str();
        let mut action = ActionDefinition::new(spec.id.clone(), spec.category)
            .with_cost(spec.ap_cost, spec.mp_cost)
            .with_power(spec.power)
            .with_flags(spec.flags())
            .with_modifiers(self.resolve_modifiers(&spec.modifiers, owner));
        if let Some(name) = &spec.name {
            action.name = name.clone();
        }
        if let Some(status) = spec.inflicts.as_ref().and_then(|id| self.status_ref(id, owner)) {
            action = action.inflicting(status);
        }
        if let Some(multiplier) = spec.enhanced_counter {
            action = action.with_enhanced_counter(multiplier);
        }
        action
    }

    fn resolve_modifiers(&self, spec: &ModifierSpec, owner: &str) -> ActionModifiers {
        let status = |id: &Option<StatusId>| id.as_ref().and_then(|id| self.status_ref(id, owner));
        ActionModifiers {
            status_removal: (!spec.remove_statuses.is_empty()).then(|| StatusRemoval {
                kinds: spec.remove_statuses.clone(),
                reduce_by: spec.reduce_status_by,
            }),
            secondary_status: status(&spec.secondary_status),
            conditional: spec.conditional.as_ref().map(|conditional| ConditionalBonus {
                required: conditional.required,
                multiplier: conditional.multiplier,
                debuff_on_fail: status(&conditional.debuff_on_fail),
            }),
            self_status: status(&spec.self_status),
            ap_gain: spec.ap_gain,
            guard_multiplier: spec.guard_multiplier,
            reactive_guard_status: status(&spec.reactive_guard_status),
            last_action_multiplier: spec.last_action_multiplier,
            first_turn_multiplier: spec.first_turn_multiplier,
        }
    }

    fn resolve_mask(&self, spec: MaskSpec) -> MaskDefinition {
        let mut mask = MaskDefinition::new(spec.id.clone())
            .with_multiplier(spec.multiplier)
            .with_passive(spec.passive)
            .with_ap_bonus(spec.ap_bonus)
            .with_change_rules(spec.change_cooldown, spec.disallow_consecutive_change);
        if let Some(name) = spec.name {
            mask.name = name;
        }
        if let Some(vulnerability) = spec.vulnerability {
            mask = mask.with_vulnerability(vulnerability);
        }
        if let Some(inertia) = spec.inertia {
            mask = mask.with_inertia(inertia);
        }
        for id in &spec.actions {
            match self.actions.get(id) {
                Some(action) => mask = mask.with_action(Arc::clone(action)),
                None => warn!(mask = %spec.id, action = %id, "unresolved action reference"),
            }
        }
        mask
    }

    fn resolve_fighter(&self, spec: FighterSpec) -> Option<FighterEntry> {
        let Some(starting) = self.masks.get(&spec.starting_mask) else {
            warn!(
                fighter = %spec.id,
                mask = %spec.starting_mask,
                "unresolved starting mask, fighter skipped"
            );
            return None;
        };

        let name = spec.name.clone().unwrap_or_else(|| spec.id.clone());
        let mut profile = FighterProfile::new(name, spec.stats, Arc::clone(starting));
        for id in &spec.masks {
            match self.masks.get(id) {
                Some(mask) => profile = profile.with_mask(Arc::clone(mask)),
                None => warn!(fighter = %spec.id, mask = %id, "unresolved mask reference"),
            }
        }

        let companion = spec.companion.as_ref().and_then(|id| {
            let mask = self.masks.get(id).cloned();
            if mask.is_none() {
                warn!(fighter = %spec.id, mask = %id, "unresolved companion mask");
            }
            mask
        });
        let ai = spec.ai.as_ref().and_then(|name| {
            let profile = self.ai_profiles.get(name).cloned();
            if profile.is_none() {
                warn!(fighter = %spec.id, profile = %name, "unresolved AI profile");
            }
            profile
        });

        Some(FighterEntry {
            id: spec.id,
            profile,
            companion,
            ai,
        })
    }
}
