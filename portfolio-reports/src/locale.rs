use serde::{Deserialize, Serialize};

/// Strings and formats used when turning values into text.
///
/// Defaults match the Arabic UI. Every field can be overridden from the
/// `[locale]` table of the CLI config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Shown for missing values in the preview.
    pub placeholder: String,
    /// Preview glyphs for booleans.
    pub true_glyph: String,
    pub false_glyph: String,
    /// Export words for booleans.
    pub yes: String,
    pub no: String,
    /// Suffix for the "`<n>` items" summary of list values.
    pub items_suffix: String,
    /// `chrono` format for date-only rendering.
    pub date_format: String,
    pub empty_state: String,
    pub preview_title: String,
    pub records_label: String,
    pub records_unit: String,
    pub fields_label: String,
    pub fields_unit: String,
    /// "No constraint" option of choice filters.
    pub any_option: String,
    pub choose_placeholder: String,
    pub search_placeholder: String,
    pub number_placeholder: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            placeholder: "-".to_string(),
            true_glyph: "✓".to_string(),
            false_glyph: "✗".to_string(),
            yes: "نعم".to_string(),
            no: "لا".to_string(),
            items_suffix: "عنصر".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            empty_state: "لا توجد بيانات لعرضها".to_string(),
            preview_title: "معاينة التقرير".to_string(),
            records_label: "إجمالي السجلات".to_string(),
            records_unit: "سجل".to_string(),
            fields_label: "الحقول المعروضة".to_string(),
            fields_unit: "حقل".to_string(),
            any_option: "الكل".to_string(),
            choose_placeholder: "اختر...".to_string(),
            search_placeholder: "ابحث...".to_string(),
            number_placeholder: "أدخل رقم...".to_string(),
        }
    }
}
