pub mod auth_tokens;
pub mod cached_images;
pub mod filter_prefs;
pub mod work_details;
