mod auth;
mod filters;
mod info;
mod programs;
mod record;
mod search;
mod start_date;
mod status;
mod watching;

pub use auth::{cmd_login, cmd_logout, cmd_auth_status};
pub use filters::cmd_filters;
pub use info::cmd_info;
pub use programs::cmd_programs;
pub use record::{cmd_record_add, cmd_record_list, cmd_record_remove};
pub use search::cmd_search;
pub use start_date::{cmd_start_date_clear, cmd_start_date_set};
pub use status::cmd_status;
pub use watching::cmd_watching;
