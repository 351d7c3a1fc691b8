//! The graph interaction engine behind the emotion dome.
//!
//! Data flows one way: seed table → [`model`] validation → [`lattice`] vertex
//! pool → [`layout`] → [`graph`] index. Input events run through the
//! [`state`] machine and come out of [`resolve`] as declarative patches.
//! [`engine::EngineContext`] owns all of it. None of this module touches the
//! DOM.

pub mod engine;
pub mod error;
pub mod graph;
pub mod keys;
pub mod lattice;
pub mod layout;
pub mod model;
pub mod resolve;
pub mod search;
pub mod seed;
pub mod state;

pub use engine::{AudioSink, DomeConfig, EngineContext, PersistedView, RenderSink};
pub use error::{DataIntegrityWarning, EngineError};
pub use model::{Category, CategoryFilter, EmotionNode, NodeId, Rgb};
pub use resolve::{EdgePatch, HighlightFrame, NodePatch};
pub use state::{Event, ViewState};
