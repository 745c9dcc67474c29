//! The serial driver collaborator interface.
//!
//! The board core never frames Maestro wire bytes itself. It sends
//! [`DriverCommand`]s over a channel to whichever driver task owns the
//! serial connection; reads carry a oneshot reply slot so each request
//! completes exactly once.

use tokio::sync::{mpsc, oneshot};

use crate::config::ConnectOptions;
use crate::Result;

/// Commands issued to the Maestro serial driver.
#[derive(Debug)]
pub enum DriverCommand {
    /// Position a servo channel, pulse width in quarter-microsecond units.
    SetTarget { channel: u8, quarter_us: u16 },
    /// Drive the PWM output. Duty cycle is on the controller's 0..=1024
    /// scale; the period is fixed per board.
    SetPwm { duty_cycle: u16, period: u16 },
    DigitalWrite { channel: u8, level: bool },
    AnalogRead {
        channel: u8,
        reply: oneshot::Sender<Result<u16>>,
    },
    DigitalRead {
        channel: u8,
        reply: oneshot::Sender<Result<bool>>,
    },
}

/// A cloneable handle to a running driver task.
#[derive(Debug, Clone)]
pub struct DriverHandle {
    command_tx: mpsc::Sender<DriverCommand>,
}

impl DriverHandle {
    #[must_use]
    pub fn new(command_tx: mpsc::Sender<DriverCommand>) -> Self {
        Self { command_tx }
    }

    /// Creates a handle together with the receiving end a driver task
    /// consumes.
    #[must_use]
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<DriverCommand>) {
        let (command_tx, command_rx) = mpsc::channel(capacity);
        (Self { command_tx }, command_rx)
    }

    /// # Errors
    /// Returns [`crate::MaestroError::CommandSendError`] if the driver task
    /// has gone away.
    pub async fn set_target(&self, channel: u8, quarter_us: u16) -> Result<()> {
        self.command_tx
            .send(DriverCommand::SetTarget {
                channel,
                quarter_us,
            })
            .await?;
        Ok(())
    }

    /// # Errors
    /// Returns [`crate::MaestroError::CommandSendError`] if the driver task
    /// has gone away.
    pub async fn set_pwm(&self, duty_cycle: u16, period: u16) -> Result<()> {
        self.command_tx
            .send(DriverCommand::SetPwm { duty_cycle, period })
            .await?;
        Ok(())
    }

    /// # Errors
    /// Returns [`crate::MaestroError::CommandSendError`] if the driver task
    /// has gone away.
    pub async fn digital_write(&self, channel: u8, level: bool) -> Result<()> {
        self.command_tx
            .send(DriverCommand::DigitalWrite { channel, level })
            .await?;
        Ok(())
    }

    /// Reads the raw analog value of a channel. Resolves once the driver
    /// answers; driver errors come back through the reply slot unchanged.
    /// # Errors
    /// Channel plumbing failures or a [`crate::MaestroError::DriverError`]
    /// surfaced by the driver.
    pub async fn analog_read(&self, channel: u8) -> Result<u16> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(DriverCommand::AnalogRead { channel, reply })
            .await?;
        rx.await?
    }

    /// Reads the digital level of a channel.
    /// # Errors
    /// Channel plumbing failures or a [`crate::MaestroError::DriverError`]
    /// surfaced by the driver.
    pub async fn digital_read(&self, channel: u8) -> Result<bool> {
        let (reply, rx) = oneshot::channel();
        self.command_tx
            .send(DriverCommand::DigitalRead { channel, reply })
            .await?;
        rx.await?
    }
}

/// Establishes the serial connection to a Maestro, either by opening an
/// explicit device path or by mode based discovery.
///
/// Resolves exactly once per board: with a [`DriverHandle`] once the
/// connection is ready, or with a fatal
/// [`crate::MaestroError::ConnectionFailure`]. No retries happen at this
/// layer.
#[allow(async_fn_in_trait)]
pub trait Connect {
    async fn connect(&mut self, options: &ConnectOptions) -> Result<DriverHandle>;
}
