pub mod braille;
pub mod snapshot;
pub mod terminal;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::color::ColorTheme;
use crate::config::{CanvasConfig, Config};
use crate::controller::{AngleController, EventOutcome, InputEvent};
use crate::geometry::TrigFunction;
use crate::panel;
use crate::renderer::{self, SceneParams};
use crate::surface::{DrawSurface, MemorySink};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, ValueEnum, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Terminal,
    Snapshot,
}

/// One running diagram: the controller, the panel labels it writes, and
/// the styling resolved from config. Shared by every display mode.
pub struct Session {
    pub controller: AngleController,
    pub panel: MemorySink,
    pub theme: ColorTheme,
    pub canvas: CanvasConfig,
    pub functions: &'static [TrigFunction],
}

impl Session {
    pub fn new(config: &Config) -> Self {
        let checked = config.display.unit == crate::geometry::AngleUnit::Radians;
        let mut session = Self {
            controller: AngleController::new(&config.canvas),
            panel: MemorySink::with_toggle(checked),
            theme: ColorTheme::from_config(&config.colors),
            canvas: config.canvas.clone(),
            functions: config.display.variant.functions(),
        };
        // Pick up the toggle's starting state and fill the panel
        session.dispatch(InputEvent::ToggleChanged);
        session
    }

    /// Run one input event to completion, refreshing the panel if it asks for a redraw.
    pub fn dispatch(&mut self, event: InputEvent) -> EventOutcome {
        let outcome = self.controller.handle(event, &mut self.panel);
        if outcome.redraw {
            panel::update(&mut self.panel, self.controller.state(), self.functions);
        }
        outcome
    }

    /// Flip the unit toggle as if the user clicked it.
    pub fn flip_unit(&mut self) -> EventOutcome {
        self.panel.flip_toggle();
        self.dispatch(InputEvent::ToggleChanged)
    }

    pub fn draw(&self, surface: &mut dyn DrawSurface) {
        let params = SceneParams {
            canvas: &self.canvas,
            theme: &self.theme,
            functions: self.functions,
        };
        renderer::render_scene(
            surface,
            self.controller.state(),
            self.controller.transform(),
            &params,
        );
    }
}
