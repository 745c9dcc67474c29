//! Sweeps a servo on channel 0 back and forth. The driver here just prints
//! the commands it receives; swap in a real Maestro serial driver task to
//! move hardware.
use maestro_io::board::MaestroIoBoard;
use maestro_io::config::{BoardOptions, ConnectOptions};
use maestro_io::driver::{Connect, DriverCommand, DriverHandle};
use maestro_io::Result;

struct PrintDriver;

impl Connect for PrintDriver {
    async fn connect(&mut self, options: &ConnectOptions) -> Result<DriverHandle> {
        println!("connecting with {:?}", options);
        let (handle, mut command_rx) = DriverHandle::channel(16);
        tokio::spawn(async move {
            while let Some(command) = command_rx.recv().await {
                println!("driver <- {:?}", command);
                match command {
                    DriverCommand::AnalogRead { reply, .. } => {
                        let _ = reply.send(Ok(0));
                    }
                    DriverCommand::DigitalRead { reply, .. } => {
                        let _ = reply.send(Ok(false));
                    }
                    _ => {}
                }
            }
        });
        Ok(handle)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let mut board = MaestroIoBoard::connect(BoardOptions::default(), &mut PrintDriver).await?;
    loop {
        for degrees in (0..=180).chain((0..180).rev()) {
            board.servo_write(0, degrees).await?;
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        }
    }
}
