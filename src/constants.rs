//! Shared UI constants such as colors and layout sizes.

pub const BG_DEEPEST: &str = "#09090b";
pub const BG_BASE: &str = "#0a0a0b";
pub const BG_ELEVATED: &str = "#141414";
pub const BG_SURFACE: &str = "#1a1a1a";
pub const BG_HOVER: &str = "#262626";

pub const BORDER_DEFAULT: &str = "#27272a";
pub const BORDER_STRONG: &str = "#3f3f46";

pub const TEXT_PRIMARY: &str = "#fafafa";
pub const TEXT_SECONDARY: &str = "#a1a1aa";
pub const TEXT_MUTED: &str = "#71717a";
pub const TEXT_DIM: &str = "#52525b";

pub const ACCENT: &str = "#10b981";
pub const ACCENT_BRIGHT: &str = "#34d399";
pub const ACCENT_DEEP: &str = "#047857";
pub const ACCENT_SOFT: &str = "rgba(16, 185, 129, 0.12)";
pub const ACCENT_CLIP: &str = "#a855f7";
pub const ERROR: &str = "#ef4444";

pub const TITLE_BAR_HEIGHT: f64 = 40.0;
pub const CHAT_PANEL_WIDTH: f64 = 360.0;
pub const FRAME_GRID_COLUMNS: usize = 3;
pub const TOAST_WIDTH: f64 = 320.0;
