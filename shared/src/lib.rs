//! Rendering-free core of the glass rain scene: droplets, their registry,
//! the fixed-step clock and the pointer interaction rules.

pub mod camera;
pub mod clock;
pub mod config;
pub mod constants;
pub mod droplet;
pub mod interaction;
pub mod registry;
pub mod scene;
pub mod sets;
pub mod simulation;

pub use camera::{screen_to_ndc, PerspectiveRig, PointerCamera};
pub use clock::SimulationClock;
pub use config::{ConfigError, FragmentStyle, RainConfig};
pub use constants::*;
pub use droplet::Droplet;
pub use interaction::{
    InteractionController, InteractionEvent, InteractionOutcome, RainState, Shatter,
};
pub use registry::{DropletId, DropletRegistry, RayHit};
pub use scene::{DropletMaterial, DropletScene, HeadlessRenderable, HeadlessScene};
pub use simulation::{RainSimulation, TickReport};
