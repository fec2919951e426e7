//! Everything the card shows, computed up front from a [`CreatureRecord`].
use crate::{
    catalog::{CreatureRecord, LegendarySet, StatKind},
    ui::{stat_color, type_color},
};
use bevy::prelude::*;

/// Base stats top out at 255, bars are full from there on.
pub const STAT_CAP: f32 = 255.0;

#[derive(Debug, Clone, PartialEq)]
pub struct CardView {
    pub id: u32,
    pub name: String,
    pub number: String,
    pub sprite_url: Option<String>,
    pub types: Vec<TypeBadge>,
    pub rows: Vec<StatRow>,
    pub total: u32,
    pub legendary: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeBadge {
    pub label: String,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatRow {
    pub kind: StatKind,
    pub label: &'static str,
    pub value: u32,
    /// Bar width in `0.0..=1.0`.
    pub fill: f32,
    pub color: Color,
}

impl CardView {
    pub fn from_record(record: &CreatureRecord, legendary: &LegendarySet) -> Self {
        Self {
            id: record.id,
            name: display_name(&record.name),
            number: dex_number(record.id),
            sprite_url: pick_sprite(record),
            types: record
                .types
                .iter()
                .map(|t| TypeBadge {
                    label: t.to_uppercase(),
                    color: type_color(t),
                })
                .collect(),
            rows: record
                .stats
                .iter()
                .map(|s| StatRow {
                    kind: s.kind,
                    label: s.kind.label(),
                    value: s.value,
                    fill: stat_fill(s.value),
                    color: stat_color(s.kind),
                })
                .collect(),
            total: record.stats.iter().map(|s| s.value).sum(),
            legendary: legendary.contains(record.id),
        }
    }

    pub fn total_label(&self) -> String {
        format!("TOTAL: {}", self.total)
    }
}

pub fn stat_fill(value: u32) -> f32 {
    (value as f32 / STAT_CAP).min(1.0)
}

/// `#025`, `#150`, `#1010`.
pub fn dex_number(id: u32) -> String {
    format!("#{id:03}")
}

fn pick_sprite(record: &CreatureRecord) -> Option<String> {
    record
        .artwork_url
        .clone()
        .or_else(|| record.sprite_url.clone())
}

/// `mr-mime` reads as `Mr Mime`.
pub fn display_name(raw: &str) -> String {
    raw.split('-')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
