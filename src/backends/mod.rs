// SPDX-License-Identifier: GPL-3.0-only

//! Depth frame sources
//!
//! A source owns a capture thread and invokes a registered per-frame handler
//! with a borrowed [`RawDepthFrame`](crate::depth::RawDepthFrame) view. The
//! only backend shipped here is the synthetic scene generator; a hardware
//! backend would plug into the same handler contract.

pub mod frame_loop;
pub mod synthetic;

pub use frame_loop::{CaptureLoopController, LoopAction};
pub use synthetic::SyntheticDepthSource;
