use serde::{Deserialize, Deserializer};

use crate::api::ApiError;

/// Accept a JSON string or number (or null) and keep it as text.
/// The content API is not consistent about years, periods and ids.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// The `{success, data, message}` wrapper returned by every endpoint.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> Envelope<T> {
    /// Anything other than `success: true` with a payload is an error.
    pub fn into_result(self) -> Result<T, ApiError> {
        match (self.success, self.data) {
            (true, Some(data)) => Ok(data),
            (true, None) => Err(ApiError::Decode("response has no data".to_string())),
            (false, _) => Err(ApiError::Application(
                self.message
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| "Unknown error".to_string()),
            )),
        }
    }
}

/// Paginated listings nest the list one level deeper (`data.data`).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub last_page: Option<u32>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct CategoryRef {
    #[serde(rename = "nama", default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Author {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Article {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    /// HTML body, only present on the detail endpoint.
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
    #[serde(rename = "kategori_artikel", default)]
    pub category: Option<CategoryRef>,
    #[serde(rename = "user", default)]
    pub author: Option<Author>,
    #[serde(rename = "komentar", default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub views: Option<String>,
}

impl Article {
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().and_then(|c| c.name.as_deref())
    }

    pub fn author_name(&self) -> Option<&str> {
        self.author.as_ref().and_then(|a| a.name.as_deref())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Comment {
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "komentar", default)]
    pub text: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Category {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "total_artikel", default, deserialize_with = "string_or_number")]
    pub article_count: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Speaker {
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "gambar", default)]
    pub photo: Option<String>,
}

/// Status strings the API uses for events.
pub const EVENT_STATUS_OPEN: &str = "Pendaftaran Masih Dibuka";
pub const EVENT_STATUS_ENDED: &str = "Event Sudah Berakhir";

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Event {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "tempat", default)]
    pub place: Option<String>,
    #[serde(rename = "tanggal", default)]
    pub date: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
    #[serde(rename = "pemateri", default)]
    pub speakers: Vec<Speaker>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "cta", default)]
    pub cta_link: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Photo,
    Video,
}

const VIDEO_EXTENSIONS: &[&str] = &[".mp4", ".webm", ".mov"];

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct MediaItem {
    #[serde(rename = "nama", default)]
    pub file_name: String,
    #[serde(rename = "keterangan", default)]
    pub caption: Option<String>,
}

impl MediaItem {
    /// Videos are recognised by file extension only.
    pub fn kind(&self) -> MediaKind {
        let lower = self.file_name.to_lowercase();
        match VIDEO_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
            true => MediaKind::Video,
            false => MediaKind::Photo,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Gallery {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "tempat", default)]
    pub place: Option<String>,
    #[serde(rename = "waktu", default)]
    pub time: Option<String>,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "image_galeri", default)]
    pub media: Vec<MediaItem>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct OrgNode {
    #[serde(default)]
    pub id: u64,
    #[serde(default, deserialize_with = "string_or_number")]
    pub periode: Option<String>,
    /// president / secretary / treasure / deputy
    #[serde(rename = "type", default)]
    pub role: Option<String>,
    #[serde(default)]
    pub nama_lengkap: Option<String>,
    #[serde(default)]
    pub nama: Option<String>,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
    #[serde(default)]
    pub quote: Option<String>,
    #[serde(rename = "jabatan", default)]
    pub position: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(rename = "deskripsi", default)]
    pub description: Option<String>,
}

impl OrgNode {
    pub fn display_name(&self) -> &str {
        self.nama_lengkap
            .as_deref()
            .or(self.nama.as_deref())
            .unwrap_or("-")
    }

    /// Department named in the position, e.g. "Kepala Pendidikan" -> "Pendidikan".
    pub fn department(&self) -> Option<&str> {
        self.position
            .as_deref()
            .and_then(|p| p.split_whitespace().nth(1))
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Member {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "nama", default)]
    pub name: String,
    #[serde(rename = "jabatan", default)]
    pub position: Option<String>,
    #[serde(rename = "departemen", default)]
    pub department: Option<String>,
    #[serde(rename = "foto", default)]
    pub photo: Option<String>,
}

/// Department bucket for members without one.
pub const DEFAULT_DEPARTMENT: &str = "Umum";

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct DepartmentDetail {
    #[serde(rename = "struktur", default)]
    pub head: Option<OrgNode>,
    #[serde(rename = "member", default)]
    pub members: Vec<Member>,
}

impl DepartmentDetail {
    /// Members grouped by department, groups in first-seen order.
    pub fn grouped_members(&self) -> Vec<(String, Vec<&Member>)> {
        let mut groups: Vec<(String, Vec<&Member>)> = Vec::new();
        for member in &self.members {
            let key = member
                .department
                .as_deref()
                .filter(|d| !d.trim().is_empty())
                .unwrap_or(DEFAULT_DEPARTMENT);
            match groups.iter_mut().find(|(name, _)| name == key) {
                Some((_, list)) => list.push(member),
                None => groups.push((key.to_string(), vec![member])),
            }
        }
        groups
    }

    /// Department name shown in the title: second word of the head's position.
    pub fn department_label(&self, fallback: &str) -> String {
        self.head
            .as_ref()
            .and_then(OrgNode::department)
            .unwrap_or(fallback)
            .to_string()
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct PeriodSummary {
    #[serde(default, deserialize_with = "string_or_number")]
    pub periode: Option<String>,
    #[serde(default)]
    pub nama: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Podcast {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "videoId", alias = "video_id", default)]
    pub video_id: Option<String>,
    #[serde(rename = "youtubeUrl", alias = "youtube_url", default)]
    pub youtube_url: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `jenis` value of a deputy poster.
pub const SOTM_DEPUTY: &str = "deputi";
/// `jenis` value of a staff poster.
pub const SOTM_STAFF: &str = "staff";

/// Staff-of-the-month poster shown on the GenBI Point page.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Sotm {
    #[serde(default)]
    pub id: u64,
    #[serde(rename = "jenis", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Payload of `POST /api/komen`.
#[derive(Debug, serde::Serialize, Clone, PartialEq)]
pub struct CommentPayload {
    pub artikel_id: u64,
    pub nama: String,
    pub email: String,
    pub komentar: String,
}
