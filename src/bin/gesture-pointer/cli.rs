use std::path::PathBuf;

use clap::Parser;
use gesture_pointer::gesture_config::TriggerAction;

// Some defaults; some of which can be overriden via CLI args
const CONFIG_FILE_PATH: &str = "./gestures.json";
const SCREEN_WIDTH: u32 = 1920;
const SCREEN_HEIGHT: u32 = 1080;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Where to load gesture config
    #[arg(long = "config", default_value_t = String::from(CONFIG_FILE_PATH))]
    pub config_path: String,

    /// Recorded landmark stream to play back (JSON, or MessagePack if the
    /// file ends in .mp / .msgpack)
    #[arg(long = "recording", required_unless_present = "write_config")]
    pub recording: Option<PathBuf>,

    /// Play the recording again from the start when it ends
    #[arg(long = "loop")]
    pub looping: bool,

    /// Playback speed multiplier
    #[arg(long = "speed", default_value_t = 1.0)]
    pub speed: f32,

    #[arg(long = "screenWidth", default_value_t = SCREEN_WIDTH)]
    pub screen_width: u32,

    #[arg(long = "screenHeight", default_value_t = SCREEN_HEIGHT)]
    pub screen_height: u32,

    /// Override smoothingFactor from the config file
    #[arg(long = "smoothing")]
    pub smoothing: Option<f32>,

    /// Override cooldownMs from the config file
    #[arg(long = "cooldownMs")]
    pub cooldown_ms: Option<u64>,

    /// Override triggerAction from the config file
    #[arg(long = "triggerAction", value_enum)]
    pub trigger_action: Option<TriggerAction>,

    /// Write the effective config to this path and exit
    #[arg(long = "writeConfig")]
    pub write_config: Option<String>,

    #[arg(long = "loglevel", default_value_t = String::from("info"))]
    pub log_level: String,
}
