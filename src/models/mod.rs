//! Typed records for the three sheet-backed feeds plus the joined order
//! entity. Each record declares its own column table next to its
//! constructor; the tests share those tables so a column shift upstream
//! fails loudly.

pub mod gp_record;
pub mod order;
pub mod reserve_order;

pub use gp_record::GpRecord;
pub use order::{CombinedOrder, OrderHeader, OrderLineItem};
pub use reserve_order::ReserveOrder;

use crate::sheets::cell::TEXT_SENTINEL;

/// A required field counts as present when it is neither the text sentinel
/// nor blank after trimming.
pub(crate) fn field_present(value: &str) -> bool {
    value != TEXT_SENTINEL && !value.trim().is_empty()
}
