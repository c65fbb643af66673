//! The fixed set of books the walkthrough seeds.

use library_db::Book;

pub const GRAIN_OF_WHEAT: &str = "A Grain of Wheat";
pub const NGUGI: &str = "Ngũgĩ wa Thiong'o";
pub const PETALS_OF_BLOOD_ISBN: &str = "978-0141187026";
pub const HISTORICAL_FICTION: &str = "Historical Fiction";

/// The five literal records, in insertion order.
pub fn books() -> Vec<Book> {
    vec![
        Book::new(GRAIN_OF_WHEAT, NGUGI, 1967, HISTORICAL_FICTION, "978-0435909870"),
        Book::new(
            "Petals of Blood",
            NGUGI,
            1977,
            "Political Fiction",
            PETALS_OF_BLOOD_ISBN,
        ),
        Book::new(
            "The River and the Source",
            "Margaret Ogola",
            1994,
            HISTORICAL_FICTION,
            "978-9966464948",
        ),
        Book::new(
            "Dust",
            "Yvonne Adhiambo Owuor",
            2013,
            "Literary Fiction",
            "978-0345802545",
        ),
        Book::new(
            "Weep Not, Child",
            NGUGI,
            1964,
            "Coming-of-Age, Fiction",
            "978-0435908309",
        ),
    ]
}
