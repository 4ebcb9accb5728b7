// SPDX-License-Identifier: AGPL-3.0-or-later
//! Renderers for each supported output format

#[cfg(feature = "latex")]
pub mod latex;
#[cfg(feature = "markdown")]
pub mod markdown;
#[cfg(feature = "plaintext")]
pub mod plaintext;

#[cfg(feature = "latex")]
pub use latex::LatexRenderer;
#[cfg(feature = "markdown")]
pub use markdown::MarkdownRenderer;
#[cfg(feature = "plaintext")]
pub use plaintext::PlainTextRenderer;
