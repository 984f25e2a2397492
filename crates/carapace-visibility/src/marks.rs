//! Monotonic per-face visibility marks.
//!
//! One set-once boolean per face. Marks accumulate across all camera
//! passes and are never reset within a run; concurrent writers racing
//! to mark the same face cannot corrupt state because marking is a
//! single atomic test-and-set. No data travels through the flag, so
//! relaxed ordering suffices.

use std::sync::atomic::{AtomicBool, Ordering};

/// Set-once visibility flags for every face of a mesh.
pub struct VisibilityMarks {
    flags: Vec<AtomicBool>,
}

impl VisibilityMarks {
    /// All faces unseen.
    pub fn new(face_count: usize) -> Self {
        let mut flags = Vec::with_capacity(face_count);
        flags.resize_with(face_count, || AtomicBool::new(false));
        Self { flags }
    }

    /// Number of faces tracked.
    #[inline]
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// True when no faces are tracked.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Marks `face` visible. Returns true when this call was the first
    /// to mark it.
    #[inline]
    pub fn mark(&self, face: usize) -> bool {
        !self.flags[face].swap(true, Ordering::Relaxed)
    }

    /// Whether `face` has been marked visible.
    #[inline]
    pub fn is_visible(&self, face: usize) -> bool {
        self.flags[face].load(Ordering::Relaxed)
    }

    /// Number of faces marked visible so far.
    pub fn count(&self) -> usize {
        self.flags
            .iter()
            .filter(|f| f.load(Ordering::Relaxed))
            .count()
    }

    /// Snapshot as a plain flag vector (the editor's input).
    pub fn to_flags(&self) -> Vec<bool> {
        self.flags
            .iter()
            .map(|f| f.load(Ordering::Relaxed))
            .collect()
    }

    /// Indices of all visible faces, ascending.
    pub fn visible_faces(&self) -> Vec<u32> {
        self.flags
            .iter()
            .enumerate()
            .filter(|(_, f)| f.load(Ordering::Relaxed))
            .map(|(i, _)| i as u32)
            .collect()
    }
}
