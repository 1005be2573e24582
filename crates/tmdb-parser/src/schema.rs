pub const TITLE: &str = "title";
pub const BUDGET: &str = "budget";
pub const REVENUE: &str = "revenue";
pub const RUNTIME: &str = "runtime";
pub const RELEASE_DATE: &str = "release_date";
pub const POPULARITY: &str = "popularity";
pub const VOTE_AVERAGE: &str = "vote_average";
pub const VOTE_COUNT: &str = "vote_count";
pub const GENRES: &str = "genres";

/// Column order of the frame produced by the loader.
pub const MOVIE_COLUMNS: [&str; 9] = [
    TITLE,
    BUDGET,
    REVENUE,
    RUNTIME,
    RELEASE_DATE,
    POPULARITY,
    VOTE_AVERAGE,
    VOTE_COUNT,
    GENRES,
];
