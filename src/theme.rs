use egui::Color32;

pub const PURPLE:      Color32 = Color32::from_rgb(149, 100, 253);
pub const PURPLE_DARK: Color32 = Color32::from_rgb(123, 79, 217);
pub const YELLOW:      Color32 = Color32::from_rgb(255, 255, 51);

pub const BAR_TRACK:   Color32 = Color32::from_rgba_premultiplied(21, 21, 21, 204);
pub const FRAME_FILL:  Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 77);
pub const DIM_ALPHA:   u8 = 128;

pub const TITLE_SIZE:    f32 = 40.0;
pub const SUBTITLE_SIZE: f32 = 18.0;
pub const LOADING_SIZE:  f32 = 22.0;
pub const ASCII_SIZE:    f32 = 16.0;

pub const BORDER_WIDTH:  f32 = 3.0;
pub const FRAME_PADDING: f32 = 10.0;
pub const STACK_SPACING: f32 = 40.0;
pub const BAR_SIZE:      [f32; 2] = [500.0, 15.0];
pub const CHARACTER_BOX: [u32; 2] = [400, 400];
pub const BACKGROUND_MAX_SIDE: u32 = 8192;

pub const TITLE:        &str = "ONESHOT WORLD MACHINE";
pub const SUBTITLE:     &str = "\"You only have one shot, player.\"";
pub const LOADING_BASE: &str = "Loading the world";
pub const WELCOME:      &str = "Welcome back!";

pub const NIKO_ASCII: &str = "       ／l、
     （ﾟ､ ｡ ７
      l、 ~ヽ
      じしf_,)ノ";
