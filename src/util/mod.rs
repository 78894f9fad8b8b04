//! Small shared helpers kept out of component bodies so they stay
//! unit-testable.

pub mod format;
