pub mod autopilot;
pub mod headless;
pub mod realtime;

pub use autopilot::Autopilot;
pub use headless::{GameOutcome, HeadlessConfig, HeadlessMode};
pub use realtime::{RealtimeConfig, RealtimeMode};
