// Library surface for the scoring pipeline and HTTP handlers.
// Keep this lean to avoid coupling to bin-only wiring in main.rs.
pub mod config;
pub mod error;
pub mod normalize;
pub mod score;
pub mod server;
pub mod telemetry;
pub mod util;
pub mod window;
