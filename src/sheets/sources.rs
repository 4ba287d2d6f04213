//! Fixed identifiers for the four upstream sheets. These are constants, not
//! configuration; a column shift upstream is a code change here and in the
//! matching column table.

/// One externally hosted tabular dataset, addressed by spreadsheet id, sheet
/// name and column range.
#[derive(Debug, Clone, Copy)]
pub struct SheetSource {
    pub spreadsheet_id: &'static str,
    pub sheet: &'static str,
    pub range: &'static str,
}

const RESERVE_SPREADSHEET_ID: &str = "1Q-FWc9tnZhhLtn0kpp_9HmvPR9g_8VQOD12WBWPzboM";
const ORDER_SPREADSHEET_ID: &str = "1UhYJoAhHaeqo_0HRzmoBY3FD1VD-Kbw_9iDACk9jEZ0";

/// Reserve/order summary records.
pub const RESERVE_ORDERS: SheetSource = SheetSource {
    spreadsheet_id: RESERVE_SPREADSHEET_ID,
    sheet: "Latam_Reserve",
    range: "A:I",
};

/// Country-wise gross-profit records.
pub const GROSS_PROFIT: SheetSource = SheetSource {
    spreadsheet_id: RESERVE_SPREADSHEET_ID,
    sheet: "Country Wise Highest Selling GP",
    range: "A:G",
};

/// Order headers for the order-analysis feed.
pub const ORDER_HEADERS: SheetSource = SheetSource {
    spreadsheet_id: ORDER_SPREADSHEET_ID,
    sheet: "Order",
    range: "A:G",
};

/// Per-product line items for the order-analysis feed.
pub const ORDER_LINE_ITEMS: SheetSource = SheetSource {
    spreadsheet_id: ORDER_SPREADSHEET_ID,
    sheet: "Orderbyproduct",
    range: "A:D",
};
