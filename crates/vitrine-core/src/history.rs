//! Append-only chain of AI-refined rasters with single-step undo.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// One raster output, created only by a successful capture or refinement.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    pub id: String,
    /// Encoded raster payload (PNG unless a caller chose JPEG).
    pub bytes: Vec<u8>,
    /// Refinement instruction that produced this node; `None` for captures.
    pub instruction: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl GeneratedImage {
    pub fn new(bytes: Vec<u8>, instruction: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            bytes,
            instruction,
            created_at: Utc::now(),
        }
    }
}

/// The refinement chain: an explicit stack plus a cursor.
///
/// The node at index 0 is the single root. The cursor always points at the
/// current node; it only ever moves one step back (undo) or onto a freshly
/// appended node. Appending while the cursor sits before the tail truncates
/// everything beyond the cursor first — there is no redo. Nodes are never
/// removed individually; only the whole chain clears.
#[derive(Debug, Default)]
pub struct RefinementHistory {
    nodes: Vec<GeneratedImage>,
    cursor: usize,
}

impl RefinementHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn current(&self) -> Option<&GeneratedImage> {
        self.nodes.get(self.cursor)
    }

    pub fn root(&self) -> Option<&GeneratedImage> {
        self.nodes.first()
    }

    /// Appends a node and moves the cursor onto it. Forward history left by
    /// an undo is discarded.
    pub fn append(&mut self, image: GeneratedImage) -> &GeneratedImage {
        if !self.nodes.is_empty() {
            self.nodes.truncate(self.cursor + 1);
        }
        self.nodes.push(image);
        self.cursor = self.nodes.len() - 1;
        &self.nodes[self.cursor]
    }

    /// Steps back to the immediate predecessor. A no-op on an empty or
    /// single-node chain.
    pub fn undo(&mut self) -> Option<&GeneratedImage> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.nodes.get(self.cursor)
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.cursor = 0;
    }
}
