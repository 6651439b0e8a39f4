pub mod anilist;
pub mod annict;
pub mod mal;
pub mod transport;

pub use anilist::{AnilistClient, AnilistMedia};
pub use annict::AnnictClient;
pub use mal::{MalAnime, MalClient};
pub use transport::{HttpTransport, NetworkError};
