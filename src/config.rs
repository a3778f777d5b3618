//! Fixed layout of the SET daily-history workbook and dashboard constants.

/// Worksheet holding the daily rows.
pub const DEFAULT_SHEET: &str = "TRUE";

/// Title rows above the header row.
pub const DEFAULT_SKIP_ROWS: usize = 1;

/// Ticker shown in dashboard titles.
pub const DEFAULT_SYMBOL: &str = "TRUE";

/// Buddhist-era years run this far ahead of Gregorian years.
pub const BUDDHIST_ERA_OFFSET: i32 = 543;

/// Name of the DuckDB table the loaded series is registered as.
pub const PRICES_TABLE: &str = "prices";

/// Number of most recent months offered for paging.
pub const MONTH_WINDOW: usize = 6;

/// Header literal of the date column. Rows whose date cell contains it are
/// repeated headers and are skipped.
pub const DATE_HEADER: &str = "วันที่";

/// Header row of the sheet, in column order.
pub const HEADER_COLUMNS: [&str; 12] = [
    "วันที่",
    "ราคาเปิด",
    "ราคาสูงสุด",
    "ราคาต่ำสุด",
    "ราคาเฉลี่ย",
    "ราคาปิด",
    "เปลี่ยนแปลง",
    "เปลี่ยนแปลง(%)",
    "ปริมาณ(พันหุ้น)",
    "มูลค่า(ล้านบาท)",
    "SET Index",
    "SET เปลี่ยนแปลง(%)",
];

/// Thai month abbreviations and their two-digit month numbers.
pub const MONTH_ABBREVIATIONS: [(&str, &str); 12] = [
    ("ม.ค.", "01"),
    ("ก.พ.", "02"),
    ("มี.ค.", "03"),
    ("เม.ย.", "04"),
    ("พ.ค.", "05"),
    ("มิ.ย.", "06"),
    ("ก.ค.", "07"),
    ("ส.ค.", "08"),
    ("ก.ย.", "09"),
    ("ต.ค.", "10"),
    ("พ.ย.", "11"),
    ("ธ.ค.", "12"),
];

/// Full Thai month names, January first.
pub const MONTH_NAMES: [&str; 12] = [
    "มกราคม",
    "กุมภาพันธ์",
    "มีนาคม",
    "เมษายน",
    "พฤษภาคม",
    "มิถุนายน",
    "กรกฎาคม",
    "สิงหาคม",
    "กันยายน",
    "ตุลาคม",
    "พฤศจิกายน",
    "ธันวาคม",
];

/// SQL type of each `prices` column, in table order.
pub fn price_columns() -> [(&'static str, &'static str); 12] {
    [
        ("date", "DATE"),
        ("open", "DOUBLE"),
        ("high", "DOUBLE"),
        ("low", "DOUBLE"),
        ("average", "DOUBLE"),
        ("close", "DOUBLE"),
        ("change", "DOUBLE"),
        ("change_percent", "DOUBLE"),
        ("volume", "BIGINT"),
        ("turnover", "DOUBLE"),
        ("market_index", "DOUBLE"),
        ("market_index_change_percent", "DOUBLE"),
    ]
}

/// Select list that returns `prices` rows in the shape of
/// [`PriceRecord`](crate::models::PriceRecord).
pub fn price_select() -> Vec<&'static str> {
    vec![
        "strftime(date, '%Y-%m-%d') AS date",
        "open",
        "high",
        "low",
        "average",
        "close",
        "change",
        "change_percent",
        "volume",
        "turnover",
        "market_index",
        "market_index_change_percent",
    ]
}
