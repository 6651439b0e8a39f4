pub mod library;
pub mod program;
pub mod record;
pub mod work;

pub use library::LibraryEntry;
pub use program::{Channel, Episode, Program, ProgramWithWork};
pub use record::Record;
pub use work::Work;
