// Layout and styling defaults for parallel sets scenes

// Margin between the canvas edge and the plotted extent, in pixels
pub const EDGE_MARGIN: f32 = 20.0;

pub const CANVAS_WIDTH_DEFAULT: f32 = 480.0;
pub const CANVAS_HEIGHT_DEFAULT: f32 = 360.0;

// Ribbon fill transparency
pub const RIBBON_ALPHA_DEFAULT: f32 = 0.5;

pub const BAR_FILL_DEFAULT: &str = "grey30";
pub const TEXT_COLOR_DEFAULT: &str = "grey90";
pub const SHADOW_COLOR_DEFAULT: &str = "black";
pub const TEXT_SIZE_DEFAULT: f32 = 10.0;
pub const FONT_DEFAULT: &str = "sans-serif";

// Draw order of the top-level scene groups
pub const RIBBON_ZINDEX: i32 = 0;
pub const BAR_ZINDEX: i32 = 1;
pub const SHADOW_ZINDEX: i32 = 2;
pub const LABEL_ZINDEX: i32 = 3;
