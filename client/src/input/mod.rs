pub mod data;
pub mod keyboard;
pub mod pointer;
