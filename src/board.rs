//! The Maestro IO board adapter: capability gated pin operations
//! translated into driver commands.

use tokio::sync::mpsc;
use tracing::debug;

use crate::config::BoardOptions;
use crate::constants::{
    ANALOG_VALUE_MAX, DUTY_CYCLE_MAX, PWM_PERIOD, SERVO_DEGREES_MAX, SERVO_PULSE_MAX,
    SERVO_PULSE_MIN,
};
use crate::driver::{Connect, DriverHandle};
use crate::{map_range, MaestroError, Pin, PinMode, PinStates, Result};

/// Lifecycle notifications emitted once each per board, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoardEvent {
    Connect,
    Ready,
}

/// The generic board contract a hardware back end satisfies so that a
/// framework can drive it interchangeably with other boards.
#[allow(async_fn_in_trait)]
pub trait IoBoard {
    fn pins(&self) -> &[Pin];
    async fn analog_read(&mut self, pin: u8) -> Result<u16>;
    async fn analog_write(&mut self, pin: u8, value: u16) -> Result<()>;
    async fn servo_write(&mut self, pin: u8, degrees: u16) -> Result<()>;
    async fn digital_write(&mut self, pin: u8, value: u16) -> Result<()>;
    async fn digital_read(&mut self, pin: u8) -> Result<bool>;
}

/// A Pololu Mini Maestro exposed as a generic IO board.
///
/// The pin capability table is built once at construction and only its
/// `mode`/`value`/`report` fields change afterwards. Every operation
/// validates the pin against its supported modes before any driver
/// command is sent.
#[derive(Debug)]
pub struct MaestroIoBoard {
    pin_state: PinStates,
    driver: DriverHandle,
    event_rx: Option<mpsc::Receiver<BoardEvent>>,
}

impl MaestroIoBoard {
    /// Builds the pin table and establishes the driver connection, by
    /// explicit serial path when `options.path` is set and by mode based
    /// discovery otherwise.
    ///
    /// # Errors
    /// Returns [`MaestroError::ConnectionFailure`] if the connector fails;
    /// construction is aborted and never retried.
    pub async fn connect<C: Connect>(options: BoardOptions, connector: &mut C) -> Result<Self> {
        let pin_state = PinStates::for_channel_count(options.npins);
        let driver = connector.connect(&options.connection()).await?;

        let (event_tx, event_rx) = mpsc::channel(2);
        event_tx.send(BoardEvent::Connect).await?;
        event_tx.send(BoardEvent::Ready).await?;
        debug!(npins = options.npins, "board connected and ready");

        Ok(Self {
            pin_state,
            driver,
            event_rx: Some(event_rx),
        })
    }

    /// Takes the lifecycle event stream. Yields [`BoardEvent::Connect`]
    /// then [`BoardEvent::Ready`], once each; `None` after the first call.
    pub fn events(&mut self) -> Option<mpsc::Receiver<BoardEvent>> {
        self.event_rx.take()
    }

    #[must_use]
    pub fn pins(&self) -> &[Pin] {
        &self.pin_state.pins
    }

    fn require_mode(&self, pin: u8, mode: PinMode) -> Result<&Pin> {
        match self.pin_state.get(pin) {
            Some(p) if p.supports(mode) => Ok(p),
            _ => Err(MaestroError::UnsupportedOperation { pin, mode }),
        }
    }

    /// Reads the raw analog value of a pin.
    ///
    /// # Errors
    /// [`MaestroError::UnsupportedOperation`] unless the pin supports
    /// [`PinMode::Analog`]; otherwise whatever the driver surfaces.
    pub async fn analog_read(&mut self, pin: u8) -> Result<u16> {
        debug!(pin, "asked to do analog read");
        let channel = self.require_mode(pin, PinMode::Analog)?.analog_channel;
        let value = self.driver.analog_read(channel).await?;
        if let Some(p) = self.pin_state.get_mut(pin) {
            p.value = value;
        }
        Ok(value)
    }

    /// Writes an analog value between 0 and 255, remapped onto the
    /// controller's 0..=1024 duty cycle scale with the fixed PWM period.
    ///
    /// # Errors
    /// [`MaestroError::OutOfRange`] for values above 255 and
    /// [`MaestroError::UnsupportedOperation`] unless the pin supports
    /// [`PinMode::Pwm`]. No driver command is sent on failure.
    pub async fn analog_write(&mut self, pin: u8, value: u16) -> Result<()> {
        debug!(pin, value, "asked to do analog write");
        if value > ANALOG_VALUE_MAX {
            return Err(MaestroError::OutOfRange {
                value,
                min: 0,
                max: ANALOG_VALUE_MAX,
            });
        }
        self.require_mode(pin, PinMode::Pwm)?;

        let duty_cycle = map_range(
            f64::from(value),
            0.0,
            f64::from(ANALOG_VALUE_MAX),
            0.0,
            f64::from(DUTY_CYCLE_MAX),
        )
        .round() as u16;
        self.driver.set_pwm(duty_cycle, PWM_PERIOD).await?;

        if let Some(p) = self.pin_state.get_mut(pin) {
            p.value = value;
        }
        Ok(())
    }

    /// Moves a servo to `degrees`, remapped onto the controller's
    /// quarter-microsecond pulse width range (0..=180 onto 640..=2304).
    ///
    /// # Errors
    /// [`MaestroError::OutOfRange`] for degrees above 180;
    /// [`MaestroError::UnsupportedOperation`] unless the pin supports
    /// [`PinMode::Servo`] (every Maestro pin does).
    pub async fn servo_write(&mut self, pin: u8, degrees: u16) -> Result<()> {
        debug!(pin, degrees, "asked to do servo write");
        if degrees > SERVO_DEGREES_MAX {
            return Err(MaestroError::OutOfRange {
                value: degrees,
                min: 0,
                max: SERVO_DEGREES_MAX,
            });
        }
        self.require_mode(pin, PinMode::Servo)?;

        let quarter_us = map_range(
            f64::from(degrees),
            0.0,
            f64::from(SERVO_DEGREES_MAX),
            f64::from(SERVO_PULSE_MIN),
            f64::from(SERVO_PULSE_MAX),
        )
        .round() as u16;
        self.driver.set_target(pin, quarter_us).await?;

        if let Some(p) = self.pin_state.get_mut(pin) {
            p.value = degrees;
        }
        Ok(())
    }

    /// Writes a digital level; any non-zero value is coerced to high.
    ///
    /// # Errors
    /// [`MaestroError::UnsupportedOperation`] unless the pin supports
    /// [`PinMode::Output`] or [`PinMode::Input`].
    pub async fn digital_write(&mut self, pin: u8, value: u16) -> Result<()> {
        debug!(pin, value, "asked to do digital write");
        let writable = self
            .pin_state
            .get(pin)
            .is_some_and(|p| p.supports(PinMode::Output) || p.supports(PinMode::Input));
        if !writable {
            return Err(MaestroError::UnsupportedOperation {
                pin,
                mode: PinMode::Output,
            });
        }

        let level = value != 0;
        self.driver.digital_write(pin, level).await?;

        if let Some(p) = self.pin_state.get_mut(pin) {
            p.value = u16::from(level);
        }
        Ok(())
    }

    /// Reads the digital level of a pin.
    ///
    /// # Errors
    /// [`MaestroError::UnsupportedOperation`] unless the pin supports
    /// [`PinMode::Input`]; otherwise whatever the driver surfaces.
    pub async fn digital_read(&mut self, pin: u8) -> Result<bool> {
        debug!(pin, "asked to do digital read");
        self.require_mode(pin, PinMode::Input)?;
        let level = self.driver.digital_read(pin).await?;
        if let Some(p) = self.pin_state.get_mut(pin) {
            p.value = u16::from(level);
        }
        Ok(level)
    }

    /// Switches a pin's active mode.
    ///
    /// # Errors
    /// [`MaestroError::UnsupportedOperation`] if the pin cannot operate in
    /// `mode`.
    pub fn set_pin_mode(&mut self, pin: u8, mode: PinMode) -> Result<()> {
        self.require_mode(pin, mode)?;
        if let Some(p) = self.pin_state.get_mut(pin) {
            p.mode = mode;
        }
        Ok(())
    }

    /// Enables or disables upstream reporting of a pin's input changes.
    ///
    /// # Errors
    /// [`MaestroError::NotFoundError`] for a pin outside the table.
    pub fn set_report(&mut self, pin: u8, enabled: bool) -> Result<()> {
        let p = self
            .pin_state
            .get_mut(pin)
            .ok_or(MaestroError::NotFoundError("pin outside of the pin table"))?;
        p.report = enabled;
        Ok(())
    }
}

impl IoBoard for MaestroIoBoard {
    fn pins(&self) -> &[Pin] {
        Self::pins(self)
    }

    async fn analog_read(&mut self, pin: u8) -> Result<u16> {
        Self::analog_read(self, pin).await
    }

    async fn analog_write(&mut self, pin: u8, value: u16) -> Result<()> {
        Self::analog_write(self, pin, value).await
    }

    async fn servo_write(&mut self, pin: u8, degrees: u16) -> Result<()> {
        Self::servo_write(self, pin, degrees).await
    }

    async fn digital_write(&mut self, pin: u8, value: u16) -> Result<()> {
        Self::digital_write(self, pin, value).await
    }

    async fn digital_read(&mut self, pin: u8) -> Result<bool> {
        Self::digital_read(self, pin).await
    }
}
