pub mod card;
pub mod composite;
pub mod context;
pub mod sheet;
