//! Toggles channel 2 once a second.
use maestro_io::board::MaestroIoBoard;
use maestro_io::config::{BoardOptions, ConnectOptions};
use maestro_io::driver::{Connect, DriverCommand, DriverHandle};
use maestro_io::Result;

struct PrintDriver;

impl Connect for PrintDriver {
    async fn connect(&mut self, _options: &ConnectOptions) -> Result<DriverHandle> {
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

    let opts = BoardOptions {
        npins: 12,
        ..BoardOptions::default()
    };
    let mut board = MaestroIoBoard::connect(opts, &mut PrintDriver).await?;

    let mut is_on = true;
    loop {
        println!("{}", is_on);
        board.digital_write(2, u16::from(is_on)).await?;
        is_on = !is_on;
        tokio::time::sleep(std::time::Duration::from_secs(1)).await;
    }
}
