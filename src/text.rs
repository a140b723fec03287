pub mod draw;
pub mod fonts;
pub mod width;
