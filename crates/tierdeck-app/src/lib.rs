//! TierDeck Application
//!
//! Native shell around the board engine: asset resolution, file and
//! clipboard intake, export writing, and the interactive session driver.

pub mod platform;
pub mod shell;

pub use platform::AssetResolver;
pub use shell::Shell;
