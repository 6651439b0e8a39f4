pub mod program_service;
pub mod program_service_impl;

pub use program_service::{ProgramError, ProgramService};
pub use program_service_impl::DefaultProgramService;

pub mod record_service;
pub mod record_service_impl;

pub use record_service::{RecordError, RecordService};
pub use record_service_impl::DefaultRecordService;

pub mod library_service;
pub mod library_service_impl;

pub use library_service::{LibraryError, LibraryService};
pub use library_service_impl::DefaultLibraryService;
