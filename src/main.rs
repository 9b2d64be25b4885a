#![cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]

mod config;
mod confetti;
mod error;
mod log;
mod observer;
mod reveal;
mod starfield;
mod theme;
mod timeline;
mod typewriter;
mod video;

#[cfg(target_arch = "wasm32")]
mod frontend;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    eprintln!("This crate only runs in the browser. Run `trunk serve` or `trunk build --release`.");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    frontend::run();
}
