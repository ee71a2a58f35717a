//! Static detection of AI/ML usage in source code.
//!
//! The matcher applies a fixed set of structural patterns per language and
//! emits typed matches; the detector walks a repository, buckets matches by
//! intent and attaches code snippets.

pub mod detector;
pub mod intent;
pub mod language;
pub mod matcher;
pub mod patterns;
pub mod recovery;

pub use detector::{ComponentDetector, DetectionReport, FileDetection, SkippedFile};
pub use intent::{DetectionBucket, DetectionIntent};
pub use language::Language;
pub use matcher::{DetectionMatch, PatternMatcher};
pub use patterns::CaptureKind;
pub use recovery::NameRecovery;
