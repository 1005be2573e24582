pub mod dates;
pub mod errors;
pub mod genres;
pub mod loader;
pub mod schema;

pub use dates::parse_release_date;
pub use errors::{GenreParseError, ParserError};
pub use genres::parse_genre_names;
pub use loader::{load_movies_csv, parse_movies_csv};
