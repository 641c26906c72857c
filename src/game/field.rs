// Field items and their random placement.

use super::builder::{AssetPaths, GameConfig};
use crate::rng::RandomSource;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ItemKind {
    Carrot,
    Bug,
}

impl ItemKind {
    /// CSS class carried by the item's `<img>`; click delegation keys off it.
    pub fn class_name(self) -> &'static str {
        match self {
            ItemKind::Carrot => "carrot",
            ItemKind::Bug => "bug",
        }
    }

    pub fn from_class_name(name: &str) -> Option<Self> {
        match name {
            "carrot" => Some(ItemKind::Carrot),
            "bug" => Some(ItemKind::Bug),
            _ => None,
        }
    }

    pub fn image_path(self, assets: &AssetPaths) -> &str {
        match self {
            ItemKind::Carrot => &assets.carrot_img,
            ItemKind::Bug => &assets.bug_img,
        }
    }
}

/// Field size in CSS pixels, taken from its bounding rect once per round.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FieldBounds {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner of an item, relative to the field.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ItemPlacement {
    pub kind: ItemKind,
    pub x: f64,
    pub y: f64,
}

/// Place `count` items of one kind uniformly so each icon fits inside `bounds`.
pub fn scatter(
    bounds: FieldBounds,
    item_size: f64,
    kind: ItemKind,
    count: u32,
    rng: &mut impl RandomSource,
) -> Vec<ItemPlacement> {
    let max_x = (bounds.width - item_size).max(0.0);
    let max_y = (bounds.height - item_size).max(0.0);
    (0..count)
        .map(|_| ItemPlacement {
            kind,
            x: rng.range(0.0, max_x),
            y: rng.range(0.0, max_y),
        })
        .collect()
}

/// A full board for one round: carrots first, then bugs (bugs draw on top).
pub fn populate(
    bounds: FieldBounds,
    config: &GameConfig,
    rng: &mut impl RandomSource,
) -> Vec<ItemPlacement> {
    let mut items = scatter(bounds, config.item_size, ItemKind::Carrot, config.carrot_count, rng);
    items.extend(scatter(bounds, config.item_size, ItemKind::Bug, config.bug_count, rng));
    items
}
