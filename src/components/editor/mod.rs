mod chat_panel;
mod editor_page;
mod frame_grid;
mod video_panel;

pub use chat_panel::ChatPanel;
pub use editor_page::EditorPage;
pub use frame_grid::FrameGrid;
pub use video_panel::VideoPanel;
