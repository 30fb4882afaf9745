//! Multi-pointer gesture recognition and globe navigation.
//!
//! Raw mouse, pointer, touch and wheel events are normalized into a single
//! input model and fed to a set of gesture recognizers. A [`registry::Registry`]
//! arbitrates between recognizers that compete for the same input, and a
//! window controller turns recognized gestures into changes to the host's
//! look-at navigator. The crate runs natively and in the browser; the host is
//! responsible only for forwarding DOM events and drawing frames.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`event`] | DOM event snapshots and the normalized input model |
//! | [`touch`] | Per-contact tracking |
//! | [`state`] | Recognizer state machine |
//! | [`recognizer`] | Shared recognizer bookkeeping and the [`recognizer::Gesture`] hooks |
//! | [`graph`] | Simultaneity and failure-dependency relations |
//! | [`registry`] | Recognizer storage, dispatch, arbitration and timers |
//! | [`click`], [`drag`], [`pan`], [`pinch`], [`rotation`], [`tilt`] | Concrete gestures |
//! | [`controller`] | Window controller contract and host collaborators |
//! | [`basic`] | Default globe navigation controller |
//! | [`geo`] | Points, rays, locations and navigator limits |
//! | [`consts`] | Shared numeric constants (thresholds, timings, zoom) |

pub mod basic;
pub mod click;
pub mod consts;
pub mod controller;
pub mod drag;
pub mod event;
pub mod geo;
pub mod graph;
pub mod pan;
pub mod pinch;
pub mod recognizer;
pub mod registry;
pub mod rotation;
pub mod state;
pub mod tilt;
pub mod touch;
#[cfg(target_arch = "wasm32")]
pub mod web;
