use clap::Parser;
use std::path::PathBuf;

pub const HELP_KEYS: &str = "\
Key Bindings:
  Space             : Toggle fullscreen
  Esc / q           : Quit
  Left / Right      : Previous / next image
  PageUp / PageDown : Back / forward 10 images
  r / l             : Rotate 90 deg right / left
  s                 : Save rotated image over the file
  Delete            : Delete current file
  0                 : Reset zoom
  Wheel             : Zoom in / out
  Left / Right click: Next / previous image
  Middle click      : Reset zoom
  Drop file or dir  : Browse it
";

#[derive(Parser, Debug)]
#[command(name = "ibadger", version, about = "A minimal image browser", after_help = HELP_KEYS)]
pub struct Cli {
    /// Image file or directory to browse (default: current directory)
    pub path: Option<PathBuf>,
}
