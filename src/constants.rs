pub const USER_AGENT: &str = concat!("Kiroku/", env!("CARGO_PKG_VERSION"));

pub mod limits {

    /// Bytes of an error response body kept for diagnostics.
    pub const ERROR_BODY_LIMIT: usize = 8 * 1024;

    pub const DEFAULT_RECORDS_LIMIT: i32 = 20;

    pub const PROGRAMS_PAGE_SIZE: i32 = 256;

    pub const LIBRARY_PAGE_SIZE: i32 = 100;

    pub const MAX_SEARCH_RESULTS: usize = 10;
}
