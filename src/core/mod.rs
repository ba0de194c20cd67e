//! Core pipeline building blocks: identifier derivation, the quicklook
//! stretch and colormap, experimental labeling, and retrieval-model
//! invocation. These are internal primitives consumed by `pipeline`.
pub mod colormap;
pub mod ident;
pub mod labeler;
pub mod retrieval;
pub mod stretch;
