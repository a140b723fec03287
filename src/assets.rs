pub mod decode;
pub mod key;
pub mod resolver;
