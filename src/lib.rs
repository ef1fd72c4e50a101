//! # lsb-steg
//!
//! Hide text inside the least significant bits of an image's first color
//! channel, optionally protected by a password.
//!
//! ## Modules
//!
//! - [`processing`]: pixel grid view, LSB codec, and cover image I/O
//! - [`encryption`]: PBKDF2 key derivation, AES-256-GCM, and the base64url envelope
//! - [`pipeline`]: hide/reveal combining the two
//! - [`common`]: configuration
//! - [`utils`]: logging setup for binaries
//!
//! ## Example
//! ```ignore
//! let cover = lsb_steg::processing::load_cover("cover.png")?;
//! let stego = lsb_steg::hide_message(&cover, "Hello, World!", Some("pw"))?;
//! lsb_steg::processing::save_cover(&stego, "stego.png")?;
//! ```

pub mod common;
pub mod encryption;
pub mod error;
pub mod pipeline;
pub mod processing;
pub mod utils;

pub use error::{StegError, StegResult};
pub use pipeline::{hide_in_file, hide_message, reveal_from_file, reveal_message, Capacity};
pub use processing::{CoverImage, PixelGrid};
