//! Canonical book table
//!
//! USFM codes, English titles and canonical numbering for the 66 books,
//! plus the abbreviations the OSIS and SBLGNT sources use for them.

use crate::model::{Book, Testament};

/// One entry of the canon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CanonBook {
    /// USFM/USFX code (`RUT`).
    pub code: &'static str,
    /// English title.
    pub title: &'static str,
    /// 1-based canonical position.
    pub number: u32,
    pub testament: Testament,
    /// OSIS work abbreviation (`Ruth`).
    pub osis: &'static str,
    /// SBLGNT root id (`3Jn`); empty for Old Testament books.
    pub sblgnt: &'static str,
}

macro_rules! canon {
    ($( $number:literal $code:literal $title:literal $testament:ident $osis:literal $sblgnt:literal; )*) => {
        &[$(CanonBook {
            code: $code,
            title: $title,
            number: $number,
            testament: Testament::$testament,
            osis: $osis,
            sblgnt: $sblgnt,
        }),*]
    };
}

/// All 66 books in canonical order.
pub static CANON: &[CanonBook] = canon! {
    1 "GEN" "Genesis" Old "Gen" "";
    2 "EXO" "Exodus" Old "Exod" "";
    3 "LEV" "Leviticus" Old "Lev" "";
    4 "NUM" "Numbers" Old "Num" "";
    5 "DEU" "Deuteronomy" Old "Deut" "";
    6 "JOS" "Joshua" Old "Josh" "";
    7 "JDG" "Judges" Old "Judg" "";
    8 "RUT" "Ruth" Old "Ruth" "";
    9 "1SA" "1 Samuel" Old "1Sam" "";
    10 "2SA" "2 Samuel" Old "2Sam" "";
    11 "1KI" "1 Kings" Old "1Kgs" "";
    12 "2KI" "2 Kings" Old "2Kgs" "";
    13 "1CH" "1 Chronicles" Old "1Chr" "";
    14 "2CH" "2 Chronicles" Old "2Chr" "";
    15 "EZR" "Ezra" Old "Ezra" "";
    16 "NEH" "Nehemiah" Old "Neh" "";
    17 "EST" "Esther" Old "Esth" "";
    18 "JOB" "Job" Old "Job" "";
    19 "PSA" "Psalms" Old "Ps" "";
    20 "PRO" "Proverbs" Old "Prov" "";
    21 "ECC" "Ecclesiastes" Old "Eccl" "";
    22 "SNG" "Song of Songs" Old "Song" "";
    23 "ISA" "Isaiah" Old "Isa" "";
    24 "JER" "Jeremiah" Old "Jer" "";
    25 "LAM" "Lamentations" Old "Lam" "";
    26 "EZK" "Ezekiel" Old "Ezek" "";
    27 "DAN" "Daniel" Old "Dan" "";
    28 "HOS" "Hosea" Old "Hos" "";
    29 "JOL" "Joel" Old "Joel" "";
    30 "AMO" "Amos" Old "Amos" "";
    31 "OBA" "Obadiah" Old "Obad" "";
    32 "JON" "Jonah" Old "Jonah" "";
    33 "MIC" "Micah" Old "Mic" "";
    34 "NAM" "Nahum" Old "Nah" "";
    35 "HAB" "Habakkuk" Old "Hab" "";
    36 "ZEP" "Zephaniah" Old "Zeph" "";
    37 "HAG" "Haggai" Old "Hag" "";
    38 "ZEC" "Zechariah" Old "Zech" "";
    39 "MAL" "Malachi" Old "Mal" "";
    40 "MAT" "Matthew" New "Matt" "Mt";
    41 "MRK" "Mark" New "Mark" "Mk";
    42 "LUK" "Luke" New "Luke" "Lk";
    43 "JHN" "John" New "John" "Jn";
    44 "ACT" "Acts" New "Acts" "Ac";
    45 "ROM" "Romans" New "Rom" "Ro";
    46 "1CO" "1 Corinthians" New "1Cor" "1Co";
    47 "2CO" "2 Corinthians" New "2Cor" "2Co";
    48 "GAL" "Galatians" New "Gal" "Ga";
    49 "EPH" "Ephesians" New "Eph" "Eph";
    50 "PHP" "Philippians" New "Phil" "Php";
    51 "COL" "Colossians" New "Col" "Col";
    52 "1TH" "1 Thessalonians" New "1Thess" "1Th";
    53 "2TH" "2 Thessalonians" New "2Thess" "2Th";
    54 "1TI" "1 Timothy" New "1Tim" "1Ti";
    55 "2TI" "2 Timothy" New "2Tim" "2Ti";
    56 "TIT" "Titus" New "Titus" "Tit";
    57 "PHM" "Philemon" New "Phlm" "Phm";
    58 "HEB" "Hebrews" New "Heb" "Heb";
    59 "JAS" "James" New "Jas" "Jas";
    60 "1PE" "1 Peter" New "1Pet" "1Pe";
    61 "2PE" "2 Peter" New "2Pet" "2Pe";
    62 "1JN" "1 John" New "1John" "1Jn";
    63 "2JN" "2 John" New "2John" "2Jn";
    64 "3JN" "3 John" New "3John" "3Jn";
    65 "JUD" "Jude" New "Jude" "Jud";
    66 "REV" "Revelation" New "Rev" "Re";
};

/// Find a book by USFM code, OSIS abbreviation, SBLGNT id or English
/// title. Case-insensitive.
#[must_use]
pub fn lookup(name: &str) -> Option<&'static CanonBook> {
    let name = name.trim();
    CANON.iter().find(|b| {
        b.code.eq_ignore_ascii_case(name)
            || b.osis.eq_ignore_ascii_case(name)
            || (!b.sblgnt.is_empty() && b.sblgnt.eq_ignore_ascii_case(name))
            || b.title.eq_ignore_ascii_case(name)
    })
}

/// Guess which canonical book a parsed source holds.
///
/// Uses the book id when the parser set one (SBLGNT), otherwise the work
/// segment of the first OSIS verse id (`Ruth.1.1` → `Ruth`).
#[must_use]
pub fn infer(book: &Book) -> Option<&'static CanonBook> {
    if !book.id.is_empty() {
        if let Some(found) = lookup(&book.id) {
            return Some(found);
        }
    }
    let first = book.verses().next()?;
    let work = first.verse_id.split('.').next()?;
    lookup(work)
}

impl CanonBook {
    /// Fill a parsed book's id, title and canonical number.
    pub fn apply_to(&self, book: &mut Book) {
        book.id = self.code.to_string();
        book.title = self.title.to_string();
        book.book_number = self.number;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Chapter, Verse};

    #[test]
    fn test_canon_is_ordered() {
        assert_eq!(CANON.len(), 66);
        for (i, book) in CANON.iter().enumerate() {
            assert_eq!(book.number as usize, i + 1);
        }
        assert_eq!(CANON.iter().filter(|b| b.testament == Testament::New).count(), 27);
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(lookup("rut").unwrap().number, 8);
        assert_eq!(lookup("Ruth").unwrap().code, "RUT");
        assert_eq!(lookup("3Jn").unwrap().code, "3JN");
        assert_eq!(lookup("3John").unwrap().number, 64);
        assert_eq!(lookup("3 John").unwrap().code, "3JN");
        assert!(lookup("Tobit").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn test_infer_from_osis_verse() {
        let mut book = Book::new(Testament::Old);
        let mut chapter = Chapter::new(1);
        chapter.verses.push(Verse::new("Ruth.1.1", 1));
        book.chapters.push(chapter);

        let canon = infer(&book).unwrap();
        canon.apply_to(&mut book);
        assert_eq!(book.id, "RUT");
        assert_eq!(book.title, "Ruth");
        assert_eq!(book.book_number, 8);
    }

    #[test]
    fn test_infer_from_book_id() {
        let book = Book {
            id: "Phm".to_string(),
            ..Book::new(Testament::New)
        };
        assert_eq!(infer(&book).unwrap().code, "PHM");
    }
}
