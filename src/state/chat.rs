//! Chat transcript and canned candidates for the editor.

use std::path::PathBuf;

use crate::core::frame_extract::StillImage;

#[derive(Debug, Clone, PartialEq)]
pub enum CandidateKind {
    Image,
    Video,
}

/// One pre-made result the assistant offers.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub label: String,
    pub kind: CandidateKind,
    /// Where the result notionally lives; recorded on insertion.
    pub source_path: PathBuf,
    pub thumbnail: StillImage,
}

impl Candidate {
    pub fn is_video(&self) -> bool {
        self.kind == CandidateKind::Video
    }
}

/// The set of candidates attached to one assistant turn.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CannedResult {
    pub candidates: Vec<Candidate>,
}

impl CannedResult {
    pub fn get(&self, index: usize) -> Option<&Candidate> {
        self.candidates.get(index)
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChatTurn {
    /// Header showing which frame is being edited. Rendered from the live
    /// frame so it tracks later edits.
    FrameIndicator { frame_index: usize },
    User { text: String },
    Loading,
    Assistant {
        request_id: u64,
        text: String,
        result: CannedResult,
    },
    /// Plain assistant line without candidates (errors, confirmations).
    Note { text: String },
}
