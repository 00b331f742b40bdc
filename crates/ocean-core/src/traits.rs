//! Trait interfaces shared across the Ocean crates.
//!
//! - [`Report`] — a serializable report document (every computation's output)

use serde::Serialize;

use crate::artifact::ArtifactKind;

/// A computed report, written as one JSON artifact.
///
/// Reports are value objects: built once by a computation, serialized by the
/// [`ArtifactStore`](crate::artifact::ArtifactStore), and read back only by
/// downstream computations through an [`ArtifactRef`](crate::artifact::ArtifactRef).
pub trait Report: Serialize {
    /// Which artifact this report is recorded as in the manifest.
    const KIND: ArtifactKind;

    /// The report date, used in the default file name of dated kinds.
    fn date(&self) -> Option<&str>;
}
