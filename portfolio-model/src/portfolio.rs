//! Typed portfolio records: the teacher profile and the evidence bank.

use crate::{BuiltInField, FieldDescriptor, ModelError, ModelResult, Record, RecordSchema};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Treats an explicit `null` like a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One tab of the portfolio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortfolioSection {
    Profile,
    Philosophy,
    Planning,
    Strategies,
    Assessment,
    Remedial,
    Initiatives,
    Evidences,
}

impl PortfolioSection {
    pub const ALL: [PortfolioSection; 8] = [
        PortfolioSection::Profile,
        PortfolioSection::Philosophy,
        PortfolioSection::Planning,
        PortfolioSection::Strategies,
        PortfolioSection::Assessment,
        PortfolioSection::Remedial,
        PortfolioSection::Initiatives,
        PortfolioSection::Evidences,
    ];

    /// Stable key stored in `Evidence::section_key`.
    pub fn key(self) -> &'static str {
        match self {
            Self::Profile => "profile",
            Self::Philosophy => "philosophy",
            Self::Planning => "planning",
            Self::Strategies => "strategies",
            Self::Assessment => "assessment",
            Self::Remedial => "remedial",
            Self::Initiatives => "initiatives",
            Self::Evidences => "evidences",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Profile => "البيانات الشخصية",
            Self::Philosophy => "الفلسفة التعليمية",
            Self::Planning => "التخطيط",
            Self::Strategies => "الاستراتيجيات",
            Self::Assessment => "التقويم والقياس",
            Self::Remedial => "الخطط العلاجية",
            Self::Initiatives => "المبادرات",
            Self::Evidences => "بنك الشواهد",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.key() == key)
    }
}

/// The single profile record backing the portfolio tabs.
///
/// Fields the backend returns but this type does not name are kept in
/// `extra` so a load/save cycle never drops data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TeacherProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub specialization: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub school: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub experience_years: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub qualifications_list: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub philosophy_vision: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub planning_intro: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub strategies_remedial: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TeacherProfile {
    pub const RECORD_TYPE: &'static str = "TeacherProfile";

    /// The schema the backend declares for profiles.
    pub fn schema() -> RecordSchema {
        RecordSchema::new(
            Self::RECORD_TYPE,
            vec![
                FieldDescriptor::text("full_name").with_label("الاسم الكامل"),
                FieldDescriptor::text("specialization").with_label("التخصص"),
                FieldDescriptor::text("school").with_label("اسم المدرسة"),
                FieldDescriptor::text("stage").with_label("المرحلة"),
                FieldDescriptor::number("experience_years").with_label("سنوات الخبرة"),
                FieldDescriptor::array("qualifications_list").with_label("المؤهلات"),
                FieldDescriptor::text("philosophy_vision").with_label("رؤيتي للتعليم ودوري كمعلم"),
                FieldDescriptor::text("planning_intro").with_label("التخطيط"),
                FieldDescriptor::text("strategies_remedial").with_label("الاستراتيجيات"),
            ],
        )
    }

    pub fn from_record(record: Record) -> ModelResult<Self> {
        Ok(serde_json::from_value(record.into_value())?)
    }

    /// The payload sent on create/update. Built-in fields are owned by the
    /// backend and never sent back; the id travels in the URL.
    pub fn to_data(&self) -> ModelResult<Map<String, Value>> {
        let Value::Object(mut map) = serde_json::to_value(self)? else {
            return Err(ModelError::InvalidRecord("profile did not serialize to an object".into()));
        };
        for field in BuiltInField::ALL {
            map.remove(field.name());
        }
        Ok(map)
    }
}

/// Kind of attachment held by an evidence record.
///
/// Serialized with the Arabic labels the backend stores. Unknown labels
/// decode as `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EvidenceType {
    #[default]
    Image,
    Pdf,
    Link,
    Video,
    Text,
    QrCode,
}

impl EvidenceType {
    pub const ALL: [EvidenceType; 6] = [
        EvidenceType::Image,
        EvidenceType::Pdf,
        EvidenceType::Link,
        EvidenceType::Video,
        EvidenceType::Text,
        EvidenceType::QrCode,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "صورة",
            Self::Pdf => "ملف PDF",
            Self::Link => "رابط",
            Self::Video => "فيديو",
            Self::Text => "نص",
            Self::QrCode => "QR Code",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Image => "🖼️",
            Self::Pdf => "📄",
            Self::Link => "🔗",
            Self::Video => "🎥",
            Self::QrCode => "📱",
            Self::Text => "📝",
        }
    }
}

impl From<String> for EvidenceType {
    fn from(label: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|t| t.label() == label)
            .unwrap_or(Self::Text)
    }
}

impl From<EvidenceType> for String {
    fn from(t: EvidenceType) -> Self {
        t.label().to_string()
    }
}

/// A stored evidence-bank entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub section_key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub evidence_type: EvidenceType,
    #[serde(default, deserialize_with = "null_as_default")]
    pub file_url: String,
    /// ISO `YYYY-MM-DD`, or empty when unset.
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub notes: String,
}

impl Evidence {
    pub const RECORD_TYPE: &'static str = "Evidence";

    /// The schema the backend declares for evidence records.
    pub fn schema() -> RecordSchema {
        let types = EvidenceType::ALL.iter().map(|t| t.label().to_string()).collect();
        RecordSchema::new(
            Self::RECORD_TYPE,
            vec![
                FieldDescriptor::text("section_key").with_label("القسم"),
                FieldDescriptor::text("title").with_label("العنوان"),
                FieldDescriptor::text("description").with_label("الوصف"),
                FieldDescriptor::enumeration("evidence_type", types).with_label("نوع الشاهد"),
                FieldDescriptor::text("file_url").with_label("رابط الملف"),
                FieldDescriptor::date("date").with_label("التاريخ"),
                FieldDescriptor::array("tags").with_label("الوسوم"),
                FieldDescriptor::text("notes").with_label("ملاحظات"),
            ],
        )
    }

    pub fn from_record(record: Record) -> ModelResult<Self> {
        Ok(serde_json::from_value(record.into_value())?)
    }

    /// Parsed `date`, `None` when empty or malformed.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }

    pub fn has_attachment(&self) -> bool {
        !self.file_url.is_empty()
    }
}

/// Form state for a new evidence entry. Tags are still the raw
/// comma-separated input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvidenceDraft {
    pub section_key: String,
    pub title: String,
    pub description: String,
    pub evidence_type: EvidenceType,
    pub file_url: String,
    pub date: String,
    pub tags: String,
    pub notes: String,
}

impl EvidenceDraft {
    pub fn new(section: PortfolioSection, title: impl Into<String>) -> Self {
        Self {
            section_key: section.key().to_string(),
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn validate(&self) -> ModelResult<()> {
        if self.title.trim().is_empty() {
            return Err(ModelError::Validation("evidence title is required".into()));
        }
        if self.section_key.trim().is_empty() {
            return Err(ModelError::Validation("evidence section is required".into()));
        }
        if !self.date.is_empty() && NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() {
            return Err(ModelError::Validation(format!(
                "evidence date must be YYYY-MM-DD, got {:?}",
                self.date
            )));
        }
        Ok(())
    }

    /// Validates and converts into the payload stored by the backend.
    pub fn into_data(self) -> ModelResult<Map<String, Value>> {
        self.validate()?;
        let evidence = Evidence {
            id: String::new(),
            section_key: self.section_key,
            title: self.title.trim().to_string(),
            description: self.description,
            evidence_type: self.evidence_type,
            file_url: self.file_url,
            date: self.date,
            tags: parse_tags(&self.tags),
            notes: self.notes,
        };
        let Value::Object(mut map) = serde_json::to_value(evidence)? else {
            return Err(ModelError::InvalidRecord("evidence did not serialize to an object".into()));
        };
        map.remove("id");
        Ok(map)
    }
}

/// Splits comma-separated tag input, trimming and dropping empty entries.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
