//! List what the content catalog contains.

use std::path::PathBuf;

use anyhow::Result;
use battle_content::Catalog;
use clap::Parser;
use console::style;

/// List the content catalog
#[derive(Parser)]
pub struct Content {
    /// Which part of the catalog to print
    #[arg(value_enum, default_value = "all")]
    kind: ContentKind,

    /// Content directory (defaults to the embedded roster)
    #[arg(short, long, value_name = "DIR")]
    content_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
enum ContentKind {
    All,
    Fighters,
    Masks,
    Actions,
    Statuses,
}

impl Content {
    pub fn execute(self) -> Result<()> {
        let (catalog, config) = super::load_content(self.content_dir.as_deref())?;
        let wants = |kind: ContentKind| self.kind == ContentKind::All || self.kind == kind;

        if self.kind == ContentKind::All {
            println!(
                "{} {} AP per turn, mask change {} AP, {} commands per turn",
                style("Rules:").bold(),
                config.base_ap_per_turn,
                config.mask_change_ap_cost,
                config.max_commands_per_turn
            );
        }
        if wants(ContentKind::Fighters) {
            print_fighters(&catalog);
        }
        if wants(ContentKind::Masks) {
            print_masks(&catalog);
        }
        if wants(ContentKind::Actions) {
            print_actions(&catalog);
        }
        if wants(ContentKind::Statuses) {
            print_statuses(&catalog);
        }
        Ok(())
    }
}

fn heading(title: &str, count: usize) {
    println!("\n{} {}", style(title).bold().underlined(), style(format!("({count})")).dim());
}

fn print_fighters(catalog: &Catalog) {
    heading("Fighters", catalog.fighters().count());
    for entry in catalog.fighters() {
        let stats = &entry.profile.stats;
        println!(
            "  {:<16} {:<20} HP {:>3} MP {:>3} ATK {:>2} DEF {:>2} MAG {:>2} RES {:>2} SPD {:>2}",
            style(&entry.id).cyan(),
            entry.profile.name,
            stats.hp,
            stats.mp,
            stats.atk,
            stats.def,
            stats.mag,
            stats.res,
            stats.spd
        );
        let masks: Vec<_> = entry.profile.masks.iter().map(|mask| mask.id.to_string()).collect();
        println!("  {:<16} masks: {}", "", masks.join(", "));
        if let Some(companion) = &entry.companion {
            println!("  {:<16} companion: {}", "", companion.id);
        }
        if entry.ai.is_none() {
            println!("  {:<16} {}", "", style("no AI profile").dim());
        }
    }
}

fn print_masks(catalog: &Catalog) {
    heading("Masks", catalog.masks().count());
    for mask in catalog.masks() {
        let actions: Vec<_> = mask.actions.iter().map(|action| action.id.to_string()).collect();
        let weakness = mask
            .vulnerability
            .map(|kind| format!(" weak to {kind}"))
            .unwrap_or_default();
        println!(
            "  {:<16} {:<20} passive {}{}",
            style(&mask.id).yellow(),
            mask.name,
            mask.passive,
            style(weakness).red()
        );
        println!("  {:<16} actions: {}", "", actions.join(", "));
    }
}

fn print_actions(catalog: &Catalog) {
    heading("Actions", catalog.actions().count());
    for action in catalog.actions() {
        let inflicts = action
            .inflicts
            .as_ref()
            .map(|status| format!(" inflicts {}", status.kind))
            .unwrap_or_default();
        println!(
            "  {:<16} {:<8} {} AP {} MP power {:>2}{}",
            style(&action.id).green(),
            action.category,
            action.ap_cost,
            action.mp_cost,
            action.power,
            inflicts
        );
    }
}

fn print_statuses(catalog: &Catalog) {
    heading("Statuses", catalog.statuses().count());
    for (id, status) in catalog.statuses() {
        println!(
            "  {:<14} {:<10} {} turns  {}",
            style(id).magenta(),
            status.kind,
            status.duration,
            style(&status.description).dim()
        );
    }
}
