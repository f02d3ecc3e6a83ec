mod drop_zone;

pub use drop_zone::{dropped_media, DropZone};
