//! Number (display) format types

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Built-in format ids and their codes
const BUILTIN_FORMATS: &[(u32, &str)] = &[
    (0, "General"),
    (1, "0"),
    (2, "0.00"),
    (3, "#,##0"),
    (4, "#,##0.00"),
    (9, "0%"),
    (10, "0.00%"),
    (11, "0.00E+00"),
    (12, "# ?/?"),
    (13, "# ??/??"),
    (14, "mm-dd-yy"),
    (15, "d-mmm-yy"),
    (16, "d-mmm"),
    (17, "mmm-yy"),
    (18, "h:mm AM/PM"),
    (19, "h:mm:ss AM/PM"),
    (20, "h:mm"),
    (21, "h:mm:ss"),
    (22, "m/d/yy h:mm"),
    (37, "#,##0 ;(#,##0)"),
    (38, "#,##0 ;[Red](#,##0)"),
    (39, "#,##0.00;(#,##0.00)"),
    (40, "#,##0.00;[Red](#,##0.00)"),
    (45, "mm:ss"),
    (46, "[h]:mm:ss"),
    (47, "mmss.0"),
    (48, "##0.0E+0"),
    (49, "@"),
];

/// Number format for cell display
///
/// The display format never changes the stored value, only how it is rendered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NumberFormat {
    /// General format (default)
    #[default]
    General,

    /// Built-in format by ID
    BuiltIn(u32),

    /// Custom format string
    Custom(String),
}

impl NumberFormat {
    /// 3 - `#,##0`
    pub const ID_NUMBER_SEP: u32 = 3;
    /// 4 - `#,##0.00`
    pub const ID_NUMBER_SEP_DEC2: u32 = 4;
    /// 14 - `mm-dd-yy`
    pub const ID_DATE_SHORT: u32 = 14;
    /// 49 - `@`
    pub const ID_TEXT: u32 = 49;

    /// First id available to custom formats in `styles.xml`
    pub const FIRST_CUSTOM_ID: u32 = 164;

    /// Create a number format from a format code
    ///
    /// Codes that name a built-in format resolve to [`NumberFormat::BuiltIn`], so `"#,##0"`
    /// and `BuiltIn(3)` compare equal after conversion.
    ///
    /// ```
    /// use sheetwright_core::NumberFormat;
    ///
    /// assert_eq!(NumberFormat::from_code("#,##0"), NumberFormat::BuiltIn(3));
    /// assert_eq!(NumberFormat::from_code("General"), NumberFormat::General);
    /// assert_eq!(
    ///     NumberFormat::from_code("0.000"),
    ///     NumberFormat::Custom("0.000".to_string())
    /// );
    /// ```
    pub fn from_code(code: &str) -> Self {
        if code.is_empty() || code.eq_ignore_ascii_case("general") {
            return NumberFormat::General;
        }
        BUILTIN_FORMATS
            .iter()
            .find(|(_, builtin)| *builtin == code)
            .map(|(id, _)| NumberFormat::BuiltIn(*id))
            .unwrap_or_else(|| NumberFormat::Custom(code.to_string()))
    }

    /// Create a format from a `numFmtId`
    ///
    /// Id 0 is `General`; other ids without a known code stay `BuiltIn` so they can be
    /// written back unchanged.
    pub fn from_id(id: u32) -> Self {
        if id == 0 {
            NumberFormat::General
        } else {
            NumberFormat::BuiltIn(id)
        }
    }

    /// Number with thousands separator (`#,##0`)
    pub fn thousands() -> Self {
        NumberFormat::BuiltIn(Self::ID_NUMBER_SEP)
    }

    /// Text format (`@`)
    pub fn text() -> Self {
        NumberFormat::BuiltIn(Self::ID_TEXT)
    }

    /// Whether this is the `General` format
    pub fn is_general(&self) -> bool {
        matches!(self, NumberFormat::General | NumberFormat::BuiltIn(0))
    }

    /// Get the format code
    pub fn format_string(&self) -> &str {
        match self {
            NumberFormat::General => "General",
            NumberFormat::BuiltIn(id) => Self::builtin_format_string(*id),
            NumberFormat::Custom(s) => s,
        }
    }

    fn builtin_format_string(id: u32) -> &'static str {
        BUILTIN_FORMATS
            .iter()
            .find(|(builtin, _)| *builtin == id)
            .map(|(_, code)| *code)
            .unwrap_or("General")
    }

    /// Check if this is a date/time format
    pub fn is_date_format(&self) -> bool {
        match self {
            NumberFormat::BuiltIn(id) => matches!(id, 14..=22 | 45..=47),
            NumberFormat::Custom(s) => {
                // Date/time placeholders outside quoted literals
                let mut in_quotes = false;
                s.chars().any(|c| {
                    if c == '"' {
                        in_quotes = !in_quotes;
                    }
                    !in_quotes && matches!(c.to_ascii_lowercase(), 'y' | 'm' | 'd' | 'h' | 's')
                })
            }
            NumberFormat::General => false,
        }
    }
}
