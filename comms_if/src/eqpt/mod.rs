//! # Equipment Interface
//!
//! This module defines the interface structures which are exchanged with the simulator or the
//! vehicle's equipment.

// -----------------------------------------------------------------------------------------------
// MODULES
// -----------------------------------------------------------------------------------------------

pub mod drive;
pub mod telem;
