//! Applications built on top of the packet lifecycle.

pub mod transfer;
