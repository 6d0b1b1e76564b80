pub mod cursor;
pub mod network;
pub mod particle;
pub mod sparkle;
