pub mod csv;
pub mod json;
pub mod sql;

pub use self::csv::CsvDataExtractor;
pub use self::json::JsonDataExtractor;
pub use self::sql::SqlDataExtractor;

use crate::domain::model::ExtractorKind;
use crate::domain::ports::DataExtractor;

pub fn extractor_for(kind: ExtractorKind) -> Box<dyn DataExtractor> {
    match kind {
        ExtractorKind::Sql => Box::new(SqlDataExtractor),
        ExtractorKind::Json => Box::new(JsonDataExtractor),
        ExtractorKind::Csv => Box::new(CsvDataExtractor),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extractor_for_matches_kind() {
        for kind in [ExtractorKind::Sql, ExtractorKind::Json, ExtractorKind::Csv] {
            assert_eq!(extractor_for(kind).kind(), kind);
        }
    }
}
