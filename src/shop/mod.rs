//! Shop stock and the pity (anti-streak) table.

pub mod generator;

pub use generator::{price_for_rarity, PitySnapshot, ShopGenerator, ShopItem, ShopSnapshot, SHOP_SIZE};
