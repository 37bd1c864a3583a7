//! One-way render: engine state → presentation instructions.
//!
//! The engine never touches widgets.  The UI shell calls [`render`] after
//! every operation and applies the resulting [`DisplayModel`] verbatim:
//!
//! | Mode        | Banner              | Gauge            | Buttons          |
//! |-------------|---------------------|------------------|------------------|
//! | Calibration | "Calibration Mode"  | hidden           | radio            |
//! | Run         | "Run Mode"          | tiered colour    | radio            |
//! | Error       | "ERROR"             | grey, empty      | all disabled     |
//!
//! Dialog texts for the mode-switch confirmation and the fatal notice
//! live here too, so that every user-facing string comes from one place.

use serde::Serialize;

use crate::config::EngineConfig;
use crate::fsm::Mode;
use crate::fsm::context::EngineState;
use crate::power::PowerLevel;

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

pub const COLOUR_CALIBRATION: Rgb = (0, 139, 139); // dark cyan
pub const COLOUR_RUN: Rgb = (139, 0, 0); // dark red
pub const COLOUR_ERROR: Rgb = (128, 128, 128); // grey

pub const COLOUR_GAUGE_HIGH: Rgb = (0, 128, 0);
pub const COLOUR_GAUGE_GOOD: Rgb = (154, 205, 50);
pub const COLOUR_GAUGE_LOW: Rgb = (255, 69, 0);
pub const COLOUR_GAUGE_CRITICAL: Rgb = (255, 0, 0);
pub const COLOUR_GAUGE_EMPTY: Rgb = (139, 0, 0);

// ---------------------------------------------------------------------------
// Display model
// ---------------------------------------------------------------------------

/// Fuel level band, highest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GaugeTier {
    High,
    Good,
    Low,
    Critical,
    Empty,
}

impl GaugeTier {
    /// Classify a clamped fraction against the configured thresholds.
    pub fn classify(fraction: f64, cfg: &EngineConfig) -> Self {
        if fraction > cfg.gauge_high_threshold {
            Self::High
        } else if fraction > cfg.gauge_good_threshold {
            Self::Good
        } else if fraction > cfg.gauge_low_threshold {
            Self::Low
        } else if fraction > cfg.gauge_critical_threshold {
            Self::Critical
        } else {
            Self::Empty
        }
    }

    pub const fn colour(self) -> Rgb {
        match self {
            Self::High => COLOUR_GAUGE_HIGH,
            Self::Good => COLOUR_GAUGE_GOOD,
            Self::Low => COLOUR_GAUGE_LOW,
            Self::Critical => COLOUR_GAUGE_CRITICAL,
            Self::Empty => COLOUR_GAUGE_EMPTY,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Banner {
    pub label: &'static str,
    pub colour: Rgb,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gauge {
    /// Fill level, clamped to 0.0–1.0.
    pub fraction: f64,
    /// `None` in the error presentation.
    pub tier: Option<GaugeTier>,
    pub colour: Rgb,
}

/// Everything the UI shell needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayModel {
    pub mode: Mode,
    pub banner: Banner,
    /// Theme colour for buttons and slider track.
    pub accent: Rgb,
    /// `None` hides the gauge.
    pub gauge: Option<Gauge>,
    /// Enabled flag per power button, indexed by [`PowerLevel::index`].
    pub buttons: [bool; PowerLevel::COUNT],
    pub slider_label: &'static str,
}

impl DisplayModel {
    /// Serialise for shells on the far side of an FFI or webview boundary.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Map state to presentation.
pub fn render(state: &EngineState, cfg: &EngineConfig) -> DisplayModel {
    match state.mode {
        Mode::Calibration => DisplayModel {
            mode: Mode::Calibration,
            banner: Banner {
                label: "Calibration Mode",
                colour: COLOUR_CALIBRATION,
            },
            accent: COLOUR_CALIBRATION,
            gauge: None,
            buttons: radio_buttons(state.power_level),
            slider_label: "Slide to engage Run Mode",
        },
        Mode::Run => {
            let fraction = if state.full_time > 0 {
                (state.current_time as f64 / state.full_time as f64).clamp(0.0, 1.0)
            } else {
                cfg.empty_fraction
            };
            let tier = GaugeTier::classify(fraction, cfg);
            DisplayModel {
                mode: Mode::Run,
                banner: Banner {
                    label: "Run Mode",
                    colour: COLOUR_RUN,
                },
                accent: COLOUR_RUN,
                gauge: Some(Gauge {
                    fraction,
                    tier: Some(tier),
                    colour: tier.colour(),
                }),
                buttons: radio_buttons(state.power_level),
                slider_label: "Slide to engage Calibration Mode",
            }
        }
        Mode::Error => DisplayModel {
            mode: Mode::Error,
            banner: Banner {
                label: "ERROR",
                colour: COLOUR_ERROR,
            },
            accent: COLOUR_ERROR,
            gauge: Some(Gauge {
                fraction: 0.0,
                tier: None,
                colour: COLOUR_ERROR,
            }),
            buttons: [false; PowerLevel::COUNT],
            slider_label: "ERROR",
        },
    }
}

/// The active level's button is disabled, every other one enabled.
fn radio_buttons(active: PowerLevel) -> [bool; PowerLevel::COUNT] {
    let mut buttons = [true; PowerLevel::COUNT];
    buttons[active.index()] = false;
    buttons
}

// ---------------------------------------------------------------------------
// Mode slider
// ---------------------------------------------------------------------------

/// Whether a slider released at `value` (0–100) asks for a mode switch.
/// The shell returns the slider to 0 either way.
pub fn slider_engages(value: f64, cfg: &EngineConfig) -> bool {
    value > cfg.slider_engage_threshold
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

/// Text for a blocking dialog.  `negative` is `None` for acknowledgements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub title: &'static str,
    pub message: &'static str,
    pub affirmative: &'static str,
    pub negative: Option<&'static str>,
}

/// Confirmation dialog for leaving `mode`.  `None` in Error, which has no
/// slider action.
pub fn mode_switch_prompt(mode: Mode) -> Option<Prompt> {
    let message = match mode {
        Mode::Calibration => {
            "Engaging 'Run Mode'.\n\n\
             Only do this when you are changing to a new gas cylinder.\n\n\
             THIS ACTION CAN NOT BE UNDONE!\n\n\
             Are you sure you wish to continue?"
        }
        Mode::Run => {
            "Engaging 'Calibration Mode' deletes tank information.\n\n\
             Only do this when you are changing to a new gas cylinder.\n\n\
             THIS ACTION CAN NOT BE UNDONE!\n\n\
             Are you sure you wish to continue?"
        }
        Mode::Error => return None,
    };
    Some(Prompt {
        title: "WARNING!",
        message,
        affirmative: "Yes",
        negative: Some("No"),
    })
}

/// Acknowledgement shown on [`EngineEvent::FatalReset`](crate::app::events::EngineEvent::FatalReset).
pub fn fatal_notice() -> Prompt {
    Prompt {
        title: "ERROR",
        message: "A fatal error has occurred.\nAll saved progress has been lost.",
        affirmative: "OK",
        negative: None,
    }
}
