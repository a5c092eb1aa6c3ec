//! Render planning: decides per frame which layers are drawn and with
//! which image, without touching pixels.

pub mod context;
pub mod frame;
pub mod image;
pub mod renderer;
