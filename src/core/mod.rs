pub mod export;
pub mod frame_extract;
pub mod generation;
pub mod media;
pub mod paths;
pub mod scheduler;
pub mod video_decode;
