//! Catalog records
//!
//! A [`CandidateRecord`] is what the listing parser pulls out of one product
//! entry. It becomes an [`AcceptedRecord`] only by passing [`CandidateRecord::accept`],
//! which requires both price and score to be numeric.

/// One catalog entry as extracted from a listing page, before validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateRecord {
    name: String,
    link: String,
    price: String,
    score: String,
}

/// Why a candidate was not accepted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Score text did not parse as a number
    Score,
    /// Price text did not parse as a number
    Price,
}

impl CandidateRecord {
    /// Builds a candidate from raw extracted text.
    ///
    /// `name` and `score` are trimmed. `price` is trimmed and then loses a
    /// single leading `$`. `link` is kept as found.
    pub fn new(
        name: impl AsRef<str>,
        link: impl Into<String>,
        price: impl AsRef<str>,
        score: impl AsRef<str>,
    ) -> Self {
        Self {
            name: name.as_ref().trim().to_string(),
            link: link.into(),
            price: normalize_price(price.as_ref()),
            score: score.as_ref().trim().to_string(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn link(&self) -> &str {
        &self.link
    }

    pub fn price(&self) -> &str {
        &self.price
    }

    pub fn score(&self) -> &str {
        &self.score
    }

    /// Checks the record and returns the reason it was turned down, if any
    ///
    /// Score is checked before price.
    pub fn rejection(&self) -> Option<Rejection> {
        if !is_numeric(&self.score) {
            return Some(Rejection::Score);
        }
        if !is_numeric(&self.price) {
            return Some(Rejection::Price);
        }
        None
    }

    /// Consumes the candidate, yielding an accepted record if both price and
    /// score are numeric.
    ///
    /// # Example
    ///
    /// ```
    /// use cellar_crawl::record::CandidateRecord;
    ///
    /// let good = CandidateRecord::new("Wine A", "/a", "$10.00", "4.5");
    /// assert_eq!(good.accept().unwrap().price(), "10.00");
    ///
    /// let bad = CandidateRecord::new("Bad", "/b", "n/a", "3.0");
    /// assert!(bad.accept().is_err());
    /// ```
    pub fn accept(self) -> Result<AcceptedRecord, (Self, Rejection)> {
        match self.rejection() {
            Some(reason) => Err((self, reason)),
            None => Ok(AcceptedRecord(self)),
        }
    }
}

/// A candidate whose price and score both parsed as numbers
///
/// Fields keep their original text; nothing is reformatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedRecord(CandidateRecord);

impl AcceptedRecord {
    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub fn link(&self) -> &str {
        self.0.link()
    }

    pub fn price(&self) -> &str {
        self.0.price()
    }

    pub fn score(&self) -> &str {
        self.0.score()
    }

    /// Output columns in their fixed order: price, score, name, link
    pub fn columns(&self) -> [&str; 4] {
        [self.price(), self.score(), self.name(), self.link()]
    }
}

/// Header row matching [`AcceptedRecord::columns`]
pub const CSV_HEADER: [&str; 4] = ["price", "score", "name", "link"];

fn normalize_price(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_prefix('$').unwrap_or(trimmed).to_string()
}

fn is_numeric(text: &str) -> bool {
    match text.parse::<f64>() {
        // Out-of-range literals like `1e400` overflow to infinity
        Ok(value) if value.is_infinite() => is_spelled_infinity(text),
        Ok(_) => true,
        Err(_) => false,
    }
}

fn is_spelled_infinity(text: &str) -> bool {
    let unsigned = text.strip_prefix(|c| c == '+' || c == '-').unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}
