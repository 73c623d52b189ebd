pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;
pub mod extensions;
pub mod lesson;

// Re-export key types at crate root for convenience
pub use api::stage::{Stage, StageConfig};
pub use api::types::{PartId, Generation, StageEvent, event_kind};
pub use components::mesh::{Color, Shape, Material, MeshComponent};
pub use components::part::{Part, PartKind};
pub use components::pose::{RootOrientation, ArticulatedPose};
pub use core::scene::Scene;
pub use core::time::FrameClock;
pub use core::rng::Rng;
pub use core::lifecycle::{RenderSurface, SurfaceHost, SurfaceError};
pub use renderer::instance::{MeshInstance, MeshBuffer};
pub use renderer::camera::{Camera3D, CameraUniform};
pub use renderer::traits::{Renderer, FrameData, DrawTiming};
pub use input::queue::{InputEvent, InputQueue};
pub use input::interaction::{InteractionState, DragSensitivity, RotationDelta};
pub use bridge::protocol::ProtocolLayout;
pub use systems::geometry::{build_mouth, MouthModel, AnimatedParts};
pub use systems::lighting::{Light, LightRig};
pub use systems::articulation::{
    ArticulationEngine, ArticulationPhase, ArticulationProfile, Finished,
};
pub use lesson::scoring::{similarity, FeedbackTier, RecognitionResult};
pub use lesson::session::{Lesson, Feedback, SpeechSynthesizer};
pub use lesson::words::{WordDeck, WORDS};

// Extensions: transform hierarchy and wave sampling
pub use extensions::{TransformGraph, LocalTransform, Wave};
