//! This crate adapts a [Pololu Mini Maestro](https://www.pololu.com/category/102/maestro-usb-servo-controllers)
//! servo controller to a generic IO board interface, so that robotics
//! frameworks can address its channels like any other board's pins.
//!
//! The adapter owns the pin capability model for the three Mini Maestro
//! variants (12/18/24 channel) and the translation of generic pin
//! operations into Maestro driver commands. The serial transport itself is
//! a collaborator behind [`driver::Connect`] and [`driver::DriverHandle`].
pub mod board;
pub mod config;
mod constants;
pub mod driver;

use serde::{Deserialize, Serialize};

use constants::{ANALOG_PIN_COUNT, NO_ANALOG_CHANNEL, PWM_PIN_MINI_12, PWM_PIN_MINI_18_24};

/// Operating modes a pin can be switched into.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum PinMode {
    Input = 0,
    Output = 1,
    Analog = 2,
    Pwm = 3,
    Servo = 4,
}

/// Maestro result type
pub type Result<T> = std::result::Result<T, MaestroError>;
/// Maestro error that wraps all underlying errors for consistency
#[derive(Debug, thiserror::Error)]
pub enum MaestroError {
    #[error("pin {pin} does not support {mode:?}")]
    UnsupportedOperation { pin: u8, mode: PinMode },
    #[error("value {value} outside of {min}..={max}")]
    OutOfRange { value: u16, min: u16, max: u16 },
    #[error("connection failure `{0}`")]
    ConnectionFailure(String),
    #[error("driver error `{0}`")]
    DriverError(String),
    #[error("`{0}`")]
    NotFoundError(&'static str),
    #[error("underlying io interrupt {0}")]
    IoError(#[from] std::io::Error),
    #[error("Driver Command Send Error: `{0}`")]
    CommandSendError(#[from] tokio::sync::mpsc::error::SendError<driver::DriverCommand>),
    #[error("Board Event Send Error: `{0}`")]
    EventSendError(#[from] tokio::sync::mpsc::error::SendError<board::BoardEvent>),
    #[error("Driver Reply Recv Error: `{0}`")]
    ReplyRecvError(#[from] tokio::sync::oneshot::error::RecvError),
}

/// A structure representing the current state and configuration of a pin.
///
/// `supported_modes` and `analog_channel` are fixed when the pin table is
/// built; `mode`, `value` and `report` change over the board's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pin {
    pub mode: PinMode,
    pub supported_modes: Vec<PinMode>,
    pub value: u16,
    pub report: bool,
    pub analog_channel: u8,
}

impl Pin {
    #[must_use]
    pub fn supports(&self, mode: PinMode) -> bool {
        self.supported_modes.contains(&mode)
    }
}

/// A structure representing all available pins on a given board.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PinStates {
    pub pins: Vec<Pin>,
}

impl PinStates {
    /// Builds the capability table for a Mini Maestro with `npins` channels.
    ///
    /// Every pin supports [`PinMode::Output`] and [`PinMode::Servo`]. The
    /// single PWM-capable channel sits at index 8 on the Mini Maestro 12
    /// and index 12 on the 18 and 24 channel variants. Pins below index 12
    /// can read analog and carry their index as the analog channel; pins
    /// from 12 upward are digital inputs instead and carry the
    /// no-analog-channel sentinel (127).
    ///
    /// The builder is total: a channel count outside {12, 18, 24} is not
    /// rejected, it simply yields a table with no PWM-capable pin.
    #[must_use]
    pub fn for_channel_count(npins: u8) -> Self {
        let mut pins: Vec<Pin> = Vec::with_capacity(npins as usize);
        for i in 0..npins {
            let mut supported_modes = vec![PinMode::Output, PinMode::Servo];

            if npins == 12 && i == PWM_PIN_MINI_12 {
                supported_modes.push(PinMode::Pwm);
            } else if (npins == 18 || npins == 24) && i == PWM_PIN_MINI_18_24 {
                supported_modes.push(PinMode::Pwm);
            }

            if i < ANALOG_PIN_COUNT {
                supported_modes.push(PinMode::Analog);
            } else {
                supported_modes.push(PinMode::Input);
            }

            pins.push(Pin {
                mode: PinMode::Output,
                supported_modes,
                value: 0,
                report: true,
                analog_channel: if i < ANALOG_PIN_COUNT {
                    i
                } else {
                    NO_ANALOG_CHANNEL
                },
            });
        }
        Self { pins }
    }

    #[must_use]
    pub fn get(&self, pin: u8) -> Option<&Pin> {
        self.pins.get(pin as usize)
    }

    pub(crate) fn get_mut(&mut self, pin: u8) -> Option<&mut Pin> {
        self.pins.get_mut(pin as usize)
    }
}

/// Linearly remaps `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The input bounds must be distinct, `in_min == in_max` divides by zero.
/// All in-crate callers pass distinct constant bounds.
#[must_use]
pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    debug_assert!(in_min != in_max, "input bounds must be distinct");
    out_min + (value - in_min) * (out_max - out_min) / (in_max - in_min)
}
