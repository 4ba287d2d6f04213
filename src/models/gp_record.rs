use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::sheets::cell::RowReader;
use crate::sheets::envelope::GvizRow;

use super::field_present;

/// Column positions in the gross-profit sheet (range A:G). Column D is
/// unused by this feed.
pub mod col {
    pub const COUNTRY: usize = 0;
    pub const SEGMENT: usize = 1;
    pub const BONHORFFER_CODE: usize = 2;
    pub const EXPORT_VALUE: usize = 4;
    pub const IMPORT_VALUE: usize = 5;
    pub const GP: usize = 6;
}

/// One country-wise gross-profit record.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GpRecord {
    pub country: String,
    pub segment: String,
    pub bonhorffer_code: String,
    pub export_value: Decimal,
    pub import_value: Decimal,
    pub gp: Decimal,
}

impl GpRecord {
    pub fn from_row(row: &GvizRow) -> Self {
        let cells = RowReader::new(row);
        Self {
            country: cells.text(col::COUNTRY),
            segment: cells.text(col::SEGMENT),
            bonhorffer_code: cells.text(col::BONHORFFER_CODE),
            export_value: cells.number(col::EXPORT_VALUE),
            import_value: cells.number(col::IMPORT_VALUE),
            gp: cells.number(col::GP),
        }
    }

    /// Rows need a real country; a literal `country` value is a stray header
    /// row that slipped into the range.
    pub fn has_required_fields(&self) -> bool {
        field_present(&self.country) && !self.country.eq_ignore_ascii_case("country")
    }
}
