//! Pipeline module - data derivations and prediction requests

pub mod correlation;
pub mod encoding;
pub mod error;
pub mod frequency;
pub mod loader;
pub mod model;
pub mod monthly;
pub mod predict;

pub use correlation::*;
pub use encoding::*;
pub use error::*;
pub use frequency::*;
pub use loader::*;
pub use model::{
    load_model, Activation, CachedLoader, FreshLoader, LayerSpec, ModelArtifact, ModelLoader,
    Regressor, SequentialModel,
};
pub use monthly::*;
pub use predict::*;
