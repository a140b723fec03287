pub mod profile;
pub mod tiers;
