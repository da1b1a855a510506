use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 上传的附件（完整读入内存后存储）
#[derive(Debug, Clone)]
pub struct Attachment {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl Attachment {
    pub fn info(&self) -> AttachmentInfo {
        AttachmentInfo {
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            size: self.data.len() as i64,
        }
    }
}

/// 附件元信息（不含内容）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/attachment.ts")]
pub struct AttachmentInfo {
    pub file_name: String,
    pub content_type: String,
    pub size: i64,
}

impl AttachmentInfo {
    /// 从存储列组装，文件名缺失视为无附件
    pub fn from_columns(
        file_name: Option<String>,
        content_type: Option<String>,
        data: Option<&[u8]>,
    ) -> Option<Self> {
        let file_name = file_name?;
        let data = data?;
        if data.is_empty() {
            return None;
        }
        Some(Self {
            file_name,
            content_type: content_type.unwrap_or_else(|| "application/octet-stream".to_string()),
            size: data.len() as i64,
        })
    }
}
