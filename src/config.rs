use serde::{Deserialize, Serialize};

/// How the underlying serial connection to the Maestro is discovered.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SerialMode {
    #[default]
    UsbDualPort,
    UsbChained,
}

/// Construction options for a Maestro IO board.
///
/// Defaults to a Mini Maestro 18 discovered over USB dual port at
/// 115200 baud. Supplying an explicit `path` bypasses discovery.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BoardOptions {
    pub npins: u8,
    pub mode: SerialMode,
    pub path: Option<String>,
    pub baudrate: u32,
}

impl Default for BoardOptions {
    fn default() -> Self {
        Self {
            npins: 18,
            mode: SerialMode::default(),
            path: None,
            baudrate: 115200,
        }
    }
}

/// The resolved connection branch handed to [`crate::driver::Connect`].
///
/// Exactly one branch applies per board: an explicit serial path wins over
/// mode based discovery.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConnectOptions {
    ExplicitPath { path: String, baudrate: u32 },
    Discover { mode: SerialMode },
}

impl BoardOptions {
    #[must_use]
    pub fn connection(&self) -> ConnectOptions {
        match &self.path {
            Some(path) => ConnectOptions::ExplicitPath {
                path: path.clone(),
                baudrate: self.baudrate,
            },
            None => ConnectOptions::Discover { mode: self.mode },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_original_board() {
        let opts = BoardOptions::default();
        assert_eq!(opts.npins, 18);
        assert_eq!(opts.mode, SerialMode::UsbDualPort);
        assert_eq!(opts.path, None);
        assert_eq!(opts.baudrate, 115200);
    }

    #[test]
    fn explicit_path_wins_over_discovery() {
        let opts = BoardOptions {
            path: Some("/dev/ttyACM0".to_string()),
            ..BoardOptions::default()
        };
        assert_eq!(
            opts.connection(),
            ConnectOptions::ExplicitPath {
                path: "/dev/ttyACM0".to_string(),
                baudrate: 115200,
            }
        );
    }

    #[test]
    fn no_path_discovers_by_mode() {
        let opts = BoardOptions {
            mode: SerialMode::UsbChained,
            ..BoardOptions::default()
        };
        assert_eq!(
            opts.connection(),
            ConnectOptions::Discover {
                mode: SerialMode::UsbChained,
            }
        );
    }

    #[test]
    fn options_deserialize_from_json() {
        let opts: BoardOptions =
            serde_json::from_str(r#"{"npins": 12, "mode": "usb_chained", "baudrate": 9600}"#)
                .unwrap();
        assert_eq!(opts.npins, 12);
        assert_eq!(opts.mode, SerialMode::UsbChained);
        assert_eq!(opts.path, None);
        assert_eq!(opts.baudrate, 9600);
    }

    #[test]
    fn empty_json_object_yields_defaults() {
        let opts: BoardOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts, BoardOptions::default());
    }
}
