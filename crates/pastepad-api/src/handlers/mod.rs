pub mod admin_settings;
pub mod auth;
pub mod editor_upload;
pub mod entry_create;
pub mod entry_delete;
pub mod entry_get;
pub mod entry_list;
pub mod entry_update;
pub mod file_download;
pub mod file_info;
pub mod file_upload;
pub mod health;
pub mod sync_run;
pub mod text_preview;
