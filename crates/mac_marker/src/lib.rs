// crates/mac_marker/src/lib.rs

//! Canonical spellings of the platform-conditional marker tags used
//! throughout the preprocessor tool-chain.

/// Opens the branch that is live everywhere except on the Mac.
pub const IF_NOT_MAC: &str = "IF-NOT-MAC";

/// Closes an `IF-NOT-MAC` branch.
pub const END_NOT_MAC: &str = "END-NOT-MAC";

/// Opens the Mac-only branch.
pub const IF_MAC: &str = "IF-MAC";

/// Closes an `IF-MAC` branch.
pub const END_MAC: &str = "END-MAC";

/// Switches from a non-Mac branch into the Mac-only alternative.
pub const ELSE_IF_MAC: &str = "ELSE-IF-MAC";

/// Switches from a Mac branch into the everywhere-else alternative.
pub const ELSE_IF_NOT_MAC: &str = "ELSE-IF-NOT-MAC";
