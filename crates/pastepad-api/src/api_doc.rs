//! OpenAPI document assembly.

use crate::error::ErrorResponse;
use crate::handlers;
use pastepad_core::models::{
    ClipboardEntry, DbMissingFilePolicy, EntryType, FileMissingDbPolicy, SyncPolicy, SyncReport,
};
use pastepad_core::UploadSettings;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::auth::login,
        handlers::entry_list::list_entries,
        handlers::entry_create::create_text,
        handlers::entry_create::create_markdown,
        handlers::entry_create::create_link,
        handlers::file_upload::upload_file,
        handlers::entry_get::get_entry,
        handlers::entry_get::share_entry,
        handlers::entry_update::update_entry,
        handlers::entry_delete::delete_entry,
        handlers::file_download::download_file,
        handlers::file_info::file_info,
        handlers::text_preview::text_preview,
        handlers::editor_upload::upload_editor_file,
        handlers::editor_upload::serve_editor_file,
        handlers::admin_settings::get_settings,
        handlers::admin_settings::update_password,
        handlers::admin_settings::update_upload_dirs,
        handlers::sync_run::run_sync,
    ),
    components(schemas(
        ClipboardEntry,
        EntryType,
        SyncPolicy,
        SyncReport,
        DbMissingFilePolicy,
        FileMissingDbPolicy,
        UploadSettings,
        ErrorResponse,
        handlers::auth::LoginRequest,
        handlers::auth::LoginResponse,
        handlers::entry_create::CreateInlineEntryRequest,
        handlers::entry_update::UpdateEntryRequest,
        handlers::file_info::FileInfoResponse,
        handlers::text_preview::TextPreviewResponse,
        handlers::editor_upload::EditorUploadResponse,
        handlers::admin_settings::SettingsResponse,
        handlers::admin_settings::UpdatePasswordRequest,
        handlers::admin_settings::UpdateUploadDirsRequest,
        handlers::sync_run::SyncRunResponse,
        handlers::sync_run::SyncFailureResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Admin authentication"),
        (name = "entries", description = "Clipboard entries"),
        (name = "files", description = "File access and editor media"),
        (name = "admin", description = "Settings and reconciliation"),
    ),
    info(
        title = "PastePad API",
        description = "Self-hosted clipboard/paste-bin service"
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_token",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
