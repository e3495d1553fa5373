use crate::anchor::CoordinateSpace;

/// Errors raised while building instances or driving frames.
///
/// All of them are construction-time or integration-time failures; none is
/// recovered from inside a fragment evaluation.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SketchError {
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("configuration mismatch: {0}")]
    ConfigurationMismatch(#[from] Mismatch),

    #[error("instance parameters are stale: advanced for frame {instance_frame}, shading frame {frame}")]
    StaleParameterUse { instance_frame: u64, frame: u64 },

    #[error("elapsed time went backwards: {requested} < {previous}")]
    NonMonotonicTime { previous: f32, requested: f32 },

    #[error("no instance with index {0}")]
    UnknownInstance(usize),

    #[error("invalid color {0:?}")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("viewport {width}px wide cannot hold {instances} instances")]
    ViewportTooSmall { width: u32, instances: usize },
}

/// The ways an instance can disagree with the shading program it feeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Mismatch {
    #[error("anchor set is empty")]
    EmptyAnchorSet,

    #[error("program expects {expected} anchor points, instance has {actual}")]
    PointCount { expected: usize, actual: usize },

    #[error("anchors are in {anchors:?} space but fragments arrive in {fragments:?} space")]
    CoordinateSpace {
        anchors: CoordinateSpace,
        fragments: CoordinateSpace,
    },
}
