use sqlx::PgPool;

#[derive(Clone)]
pub struct SqlxQuoteRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxBookRepo {
    pub pool: PgPool,
}

#[derive(Clone)]
pub struct SqlxReviewRepo {
    pub pool: PgPool,
}
