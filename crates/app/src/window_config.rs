//! Window configuration for the desktop app.

use macroquad::window::Conf;
use rcb_app::APP_NAME;

const DEFAULT_WINDOW_WIDTH: i32 = 1152;
const DEFAULT_WINDOW_HEIGHT: i32 = 808;

pub fn build_window_conf() -> Conf {
    Conf {
        window_title: APP_NAME.to_owned(),
        window_width: DEFAULT_WINDOW_WIDTH,
        window_height: DEFAULT_WINDOW_HEIGHT,
        // Request a high-DPI framebuffer so text and tiles track display scale.
        high_dpi: true,
        window_resizable: true,
        ..Default::default()
    }
}
