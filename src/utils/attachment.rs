//! 附件上传与下载的辅助函数
//!
//! 附件内容完整读入内存后存入数据库，大小与扩展名在读取时校验。

use actix_multipart::Multipart;
use actix_web::{HttpResponse, http::header};
use futures_util::TryStreamExt;
use futures_util::stream::StreamExt;
use std::path::Path;

use crate::config::UploadConfig;
use crate::errors::{AcademyError, Result};
use crate::models::Attachment;

/// 取小写扩展名（含点号），没有扩展名时返回空串
pub fn extension_of(file_name: &str) -> String {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_default()
}

/// 校验文件名与大小
pub fn validate_attachment(file_name: &str, size: usize, config: &UploadConfig) -> Result<()> {
    if file_name.trim().is_empty() {
        return Err(AcademyError::validation("Attachment file name is missing"));
    }
    if size == 0 {
        return Err(AcademyError::validation("Attachment is empty"));
    }
    if size > config.max_size {
        return Err(AcademyError::validation(format!(
            "Attachment exceeds the maximum size of {} bytes",
            config.max_size
        )));
    }
    let extension = extension_of(file_name);
    if !config
        .allowed_types
        .iter()
        .any(|t| t.eq_ignore_ascii_case(&extension))
    {
        return Err(AcademyError::validation(format!(
            "File type not allowed: '{extension}'"
        )));
    }
    Ok(())
}

/// 常见二进制格式的魔术字节校验，文本类与未知格式不检查
pub fn matches_magic_bytes(data: &[u8], extension: &str) -> bool {
    match extension {
        ".pdf" => data.starts_with(b"%PDF"),
        ".png" => data.starts_with(&[0x89, 0x50, 0x4E, 0x47]),
        ".jpg" | ".jpeg" => data.starts_with(&[0xFF, 0xD8, 0xFF]),
        ".zip" | ".docx" | ".xlsx" | ".pptx" | ".odt" => data.starts_with(b"PK\x03\x04"),
        ".doc" | ".xls" | ".ppt" => data.starts_with(&[0xD0, 0xCF, 0x11, 0xE0]),
        _ => true,
    }
}

/// 按扩展名给出下载时使用的 MIME 类型，不信任上传方声明的类型
pub fn content_type_for(file_name: &str) -> &'static str {
    match extension_of(file_name).as_str() {
        ".pdf" => "application/pdf",
        ".txt" => "text/plain; charset=utf-8",
        ".png" => "image/png",
        ".jpg" | ".jpeg" => "image/jpeg",
        ".zip" => "application/zip",
        ".doc" => "application/msword",
        ".docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        _ => "application/octet-stream",
    }
}

/// 从 multipart 表单的 `file` 字段读取唯一附件
pub async fn read_multipart_attachment(
    mut payload: Multipart,
    config: &UploadConfig,
) -> Result<Attachment> {
    let mut attachment: Option<Attachment> = None;

    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AcademyError::validation(format!("Invalid multipart payload: {e}")))?
    {
        let content_disposition = field.content_disposition();
        let name = content_disposition
            .and_then(|cd| cd.get_name())
            .unwrap_or_default()
            .to_string();
        if name != "file" {
            continue;
        }
        if attachment.is_some() {
            return Err(AcademyError::validation(
                "Only one file can be uploaded at a time",
            ));
        }

        let file_name = content_disposition
            .and_then(|cd| cd.get_filename())
            .map(|s| s.to_string())
            .unwrap_or_default();
        let content_type = content_type_for(&file_name).to_string();

        let mut data = Vec::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk
                .map_err(|e| AcademyError::validation(format!("Failed to read upload: {e}")))?;
            if data.len() + chunk.len() > config.max_size {
                return Err(AcademyError::validation(format!(
                    "Attachment exceeds the maximum size of {} bytes",
                    config.max_size
                )));
            }
            data.extend_from_slice(&chunk);
        }

        attachment = Some(Attachment {
            file_name,
            content_type,
            data,
        });
    }

    let attachment =
        attachment.ok_or_else(|| AcademyError::validation("No file found in upload payload"))?;
    validate_attachment(&attachment.file_name, attachment.data.len(), config)?;
    if !matches_magic_bytes(&attachment.data, &extension_of(&attachment.file_name)) {
        return Err(AcademyError::validation(
            "File content does not match its extension",
        ));
    }
    Ok(attachment)
}

/// 附件下载响应，类型由扩展名决定
pub fn attachment_response(attachment: Attachment) -> HttpResponse {
    let file_name = attachment.file_name.replace('"', "");
    HttpResponse::Ok()
        .insert_header((header::CONTENT_TYPE, content_type_for(&file_name)))
        .insert_header((header::X_CONTENT_TYPE_OPTIONS, "nosniff"))
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{file_name}\""),
        ))
        .body(attachment.data)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> UploadConfig {
        UploadConfig {
            max_size: 16,
            allowed_types: vec![".pdf".to_string(), ".txt".to_string()],
        }
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("Report.PDF"), ".pdf");
        assert_eq!(extension_of("noext"), "");
    }

    #[test]
    fn test_validate_attachment() {
        assert!(validate_attachment("a.pdf", 10, &config()).is_ok());
        assert!(validate_attachment("a.pdf", 0, &config()).is_err());
        assert!(validate_attachment("a.pdf", 17, &config()).is_err());
        assert!(validate_attachment("a.exe", 10, &config()).is_err());
        assert!(validate_attachment("", 10, &config()).is_err());
    }

    #[test]
    fn test_magic_bytes() {
        assert!(matches_magic_bytes(b"%PDF-1.7", ".pdf"));
        assert!(!matches_magic_bytes(b"hello", ".pdf"));
        assert!(matches_magic_bytes(b"hello", ".txt"));
    }

    #[test]
    fn test_download_headers() {
        let resp = attachment_response(Attachment {
            file_name: "essay.pdf".to_string(),
            content_type: "application/pdf".to_string(),
            data: b"%PDF".to_vec(),
        });
        assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "application/pdf");
        assert_eq!(
            resp.headers().get(header::CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"essay.pdf\""
        );
    }

    #[test]
    fn test_declared_type_is_not_echoed() {
        let resp = attachment_response(Attachment {
            file_name: "notes.txt".to_string(),
            content_type: "text/html".to_string(),
            data: b"<script>alert(1)</script>".to_vec(),
        });
        assert_eq!(
            resp.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/plain; charset=utf-8"
        );
        assert_eq!(
            resp.headers().get(header::X_CONTENT_TYPE_OPTIONS).unwrap(),
            "nosniff"
        );

        assert_eq!(content_type_for("archive.ZIP"), "application/zip");
        assert_eq!(content_type_for("page.html"), "application/octet-stream");
        assert_eq!(content_type_for("noext"), "application/octet-stream");
    }
}
