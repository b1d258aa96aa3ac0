//! Turns pointer and window events into rain actions.

use bevy::math::{Vec2, Vec3};
use bevy_log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::camera::{screen_to_ndc, PointerCamera};
use crate::config::FragmentStyle;
use crate::constants::DEFAULT_CLICK_SLOP;
use crate::registry::{DropletId, DropletRegistry};
use crate::scene::DropletScene;

/// Whether droplets move this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RainState {
    #[default]
    Raining,
    Paused,
}

impl RainState {
    pub fn toggle(&mut self) {
        *self = match *self {
            RainState::Raining => RainState::Paused,
            RainState::Paused => RainState::Raining,
        };
    }

    pub fn is_raining(self) -> bool {
        self == RainState::Raining
    }
}

/// Input delivered to the controller. Positions are logical screen pixels
/// with the origin at the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionEvent {
    /// A click already told apart from a drag by the input source.
    PrimaryClick,
    /// Toggle request from a non-pointer source, such as a key binding.
    ToggleRain,
    PointerDown { position: Vec2 },
    PointerUp { position: Vec2 },
    Resize { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shatter {
    pub parent: DropletId,
    pub fragments: Vec<DropletId>,
    pub impact: Vec3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InteractionOutcome {
    Toggled(RainState),
    Shattered(Shatter),
    /// The pointer went down over empty space.
    Missed,
    Resized(Vec2),
    /// The event had no effect (e.g. the end of a drag).
    Ignored,
}

/// Everything a shatter touches besides the controller itself.
pub struct ShatterTarget<'a, S: DropletScene, R: ?Sized> {
    pub registry: &'a mut DropletRegistry<S::Handle>,
    pub scene: &'a mut S,
    pub rng: &'a mut R,
}

#[derive(Debug, Clone)]
pub struct InteractionController {
    state: RainState,
    viewport: Vec2,
    press_origin: Option<Vec2>,
    click_slop: f32,
    fragment_style: FragmentStyle,
}

impl Default for InteractionController {
    fn default() -> Self {
        Self::new(DEFAULT_CLICK_SLOP, FragmentStyle::default())
    }
}

impl InteractionController {
    pub fn new(click_slop: f32, fragment_style: FragmentStyle) -> Self {
        Self {
            state: RainState::Raining,
            viewport: Vec2::ZERO,
            press_origin: None,
            click_slop,
            fragment_style,
        }
    }

    pub fn state(&self) -> RainState {
        self.state
    }

    pub fn is_raining(&self) -> bool {
        self.state.is_raining()
    }

    pub fn viewport(&self) -> Vec2 {
        self.viewport
    }

    /// Single entry point for every input event.
    pub fn dispatch<S, R, C>(
        &mut self,
        event: InteractionEvent,
        camera: &C,
        target: ShatterTarget<'_, S, R>,
    ) -> InteractionOutcome
    where
        S: DropletScene,
        R: Rng + ?Sized,
        C: PointerCamera + ?Sized,
    {
        match event {
            InteractionEvent::PrimaryClick | InteractionEvent::ToggleRain => {
                InteractionOutcome::Toggled(self.on_primary_click())
            }
            InteractionEvent::PointerDown { position } => {
                self.on_pointer_down(position, camera, target)
            }
            InteractionEvent::PointerUp { position } => self.on_pointer_up(position),
            InteractionEvent::Resize { width, height } => {
                InteractionOutcome::Resized(self.on_resize(width, height))
            }
        }
    }

    pub fn on_primary_click(&mut self) -> RainState {
        self.state.toggle();
        debug!("Rain state is now {:?}", self.state);
        self.state
    }

    /// Shatters the droplet under `screen`, if any.
    ///
    /// Runs whatever the rain state is: a paused droplet can still be hit.
    pub fn on_pointer_down<S, R, C>(
        &mut self,
        screen: Vec2,
        camera: &C,
        target: ShatterTarget<'_, S, R>,
    ) -> InteractionOutcome
    where
        S: DropletScene,
        R: Rng + ?Sized,
        C: PointerCamera + ?Sized,
    {
        self.press_origin = Some(screen);

        let Some(ndc) = screen_to_ndc(screen, self.viewport) else {
            warn!("Pointer down at {} before the viewport size is known", screen);
            return InteractionOutcome::Ignored;
        };
        let Some(ray) = camera.ray_from_ndc(ndc) else {
            return InteractionOutcome::Ignored;
        };
        let Some(hit) = target.registry.hit_test(ray) else {
            return InteractionOutcome::Missed;
        };
        let Some(parent) = target.registry.remove(hit.id) else {
            return InteractionOutcome::Missed;
        };

        let fragments = parent
            .fragment(hit.point, self.fragment_style, target.rng, target.scene)
            .into_iter()
            .map(|fragment| target.registry.add(fragment))
            .collect::<Vec<_>>();

        debug!(
            "Shattered droplet {:?} at {} into {} fragments",
            hit.id,
            hit.point,
            fragments.len()
        );

        InteractionOutcome::Shattered(Shatter {
            parent: hit.id,
            fragments,
            impact: hit.point,
        })
    }

    /// Completes a press. Releasing close to where the press started is a
    /// click and toggles the rain; anything further is a drag.
    pub fn on_pointer_up(&mut self, screen: Vec2) -> InteractionOutcome {
        let Some(origin) = self.press_origin.take() else {
            return InteractionOutcome::Ignored;
        };

        if origin.distance(screen) <= self.click_slop {
            InteractionOutcome::Toggled(self.on_primary_click())
        } else {
            InteractionOutcome::Ignored
        }
    }

    pub fn on_resize(&mut self, width: f32, height: f32) -> Vec2 {
        self.viewport = Vec2::new(width.max(0.0), height.max(0.0));
        self.viewport
    }
}
