use serde::{Deserialize, Serialize};

/// One row of the era report. `era` is `None` for unclassified quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct EraCount {
    pub era: Option<String>,
    pub quote_count: i64,
}
