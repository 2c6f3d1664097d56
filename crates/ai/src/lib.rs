//! `sniper-ai`
//!
//! **Responsibility:** anomaly model boundary for transaction screening.
//!
//! - Loads the forest trained offline (this crate never trains).
//! - Turns loose JSON into a fixed-order [`FeatureVector`].
//! - Classifies one row at a time; no HTTP, no global state.

pub mod features;
pub mod isolation_forest;
pub mod loader;
pub mod model;
pub mod result;

pub use features::{FEATURE_COLUMNS, FeatureVector};
pub use isolation_forest::{ForestArtifact, IsolationForest, IsolationTree, ModelMetadata, TreeNode};
pub use loader::{DEFAULT_MODEL_PATH, load_model};
pub use model::{AnomalyModel, SharedModel};
pub use result::{AnomalyLabel, InputError, LoadError, ModelError};
