//! Extension-based content type detection for stored files.

use std::path::Path;

/// Content type for a filename, by extension. Unknown extensions fall back to
/// `application/octet-stream`.
pub fn content_type_for(name: &str) -> &'static str {
    let extension = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        // Images
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        // Video
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "ogg" => "video/ogg",
        // Audio
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        // Documents
        "pdf" => "application/pdf",
        "doc" => "application/msword",
        "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        "xls" => "application/vnd.ms-excel",
        "xlsx" => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        "ppt" => "application/vnd.ms-powerpoint",
        "pptx" => "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        // Plain text and code
        "txt" | "bat" | "ps1" | "ini" | "cfg" | "log" => "text/plain",
        "xml" => "text/xml",
        "json" => "application/json",
        "js" => "text/javascript",
        "py" => "text/x-python",
        "java" => "text/x-java",
        "c" => "text/x-c",
        "cpp" => "text/x-c++",
        "cs" => "text/x-csharp",
        "html" => "text/html",
        "css" => "text/css",
        "md" => "text/markdown",
        "sh" => "text/x-sh",
        "sql" => "text/x-sql",
        "yaml" | "yml" => "text/yaml",
        // Archives
        "zip" => "application/zip",
        "rar" => "application/x-rar-compressed",
        "7z" => "application/x-7z-compressed",
        _ => "application/octet-stream",
    }
}

/// Whether a detected content type is previewable as text.
pub fn is_text_content_type(content_type: &str) -> bool {
    matches!(
        content_type,
        "text/plain"
            | "text/xml"
            | "application/json"
            | "text/javascript"
            | "text/x-python"
            | "text/x-java"
            | "text/x-c"
            | "text/x-c++"
            | "text/x-csharp"
            | "text/html"
            | "text/css"
            | "text/markdown"
            | "text/x-sh"
            | "text/x-sql"
            | "text/yaml"
    )
}
