use bevy::prelude::*;

/// Per-frame ordering of the rain systems.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RainUpdateSet {
    Input,
    Interaction,
    Simulation,
    Camera,
    Ui,
}
