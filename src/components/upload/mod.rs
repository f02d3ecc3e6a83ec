mod completion_panel;
mod upload_page;

pub use completion_panel::CompletionPanel;
pub use upload_page::UploadPage;
