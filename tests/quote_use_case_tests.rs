use async_trait::async_trait;
use chrono::Utc;
use mockall::{mock, predicate::*};
use poets_canvas::{
    entities::{
        option_fields::OptionField,
        quote::{Quote, QuoteChanges, QuoteInsert, QuotePatch, QuoteReplace, QuoteRequest},
        report::EraCount,
    },
    errors::AppError,
    repositories::quote::QuoteRepository,
    use_cases::quote::QuoteHandler,
    wikipedia::client::BioProvider,
};

mock! {
    pub QuoteRepo {}

    #[async_trait]
    impl QuoteRepository for QuoteRepo {
        async fn create_quote(&self, quote: &QuoteInsert) -> Result<Quote, AppError>;
        async fn get_quote_by_id(&self, id: i64) -> Result<Quote, AppError>;
        async fn list_quotes(&self) -> Result<Vec<Quote>, AppError>;
        async fn list_recent_quotes(&self, limit: i64) -> Result<Vec<Quote>, AppError>;
        async fn update_quote(&self, id: i64, changes: &QuoteChanges) -> Result<Quote, AppError>;
        async fn update_author_bio(&self, id: i64, summary: &str) -> Result<Quote, AppError>;
        async fn delete_quote(&self, id: i64) -> Result<(), AppError>;
        async fn count_quotes_by_era(&self) -> Result<Vec<EraCount>, AppError>;
    }
}

mock! {
    pub Bio {}

    #[async_trait]
    impl BioProvider for Bio {
        async fn fetch_summary(&self, author: &str) -> Result<String, AppError>;
    }
}

fn stored_quote(id: i64) -> Quote {
    Quote {
        id,
        text: "A thing of beauty is a joy for ever".into(),
        author: "John Keats".into(),
        era: Some("Romantic".into()),
        author_bio_summary: None,
        date_created: Utc::now(),
    }
}

fn request(text: &str, author: &str, era: Option<&str>) -> QuoteRequest {
    QuoteRequest {
        text: text.into(),
        author: author.into(),
        era: era.map(String::from),
        author_bio_summary: None,
    }
}

#[actix_rt::test]
async fn create_quote_stores_trimmed_fields_and_nulls_blank_era() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_create_quote()
        .withf(|q| q.text == "Hope" && q.author == "Emily Dickinson" && q.era.is_none())
        .times(1)
        .returning(|q| {
            Ok(Quote {
                id: 1,
                text: q.text.clone(),
                author: q.author.clone(),
                era: q.era.clone(),
                author_bio_summary: None,
                date_created: q.date_created,
            })
        });

    let handler = QuoteHandler::new(repo, MockBio::new());
    let quote = handler
        .create_quote(request("  Hope ", "Emily Dickinson ", Some("   ")))
        .await
        .unwrap();

    assert_eq!(quote.era, None);
}

#[actix_rt::test]
async fn create_quote_rejects_blank_author_without_touching_storage() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_create_quote().never();

    let handler = QuoteHandler::new(repo, MockBio::new());
    let err = handler.create_quote(request("Text", "  ", None)).await.unwrap_err();

    match err {
        AppError::ValidationError(fields) => assert_eq!(fields[0].field, "author"),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[actix_rt::test]
async fn create_quote_rejects_overlong_era() {
    let handler = QuoteHandler::new(MockQuoteRepo::new(), MockBio::new());
    let era = "x".repeat(51);

    let err = handler.create_quote(request("Text", "Author", Some(&era))).await.unwrap_err();

    assert!(matches!(err, AppError::ValidationError(ref f) if f[0].field == "era"));
}

#[actix_rt::test]
async fn get_quote_rejects_malformed_id() {
    let handler = QuoteHandler::new(MockQuoteRepo::new(), MockBio::new());

    let err = handler.get_quote("abc").await.unwrap_err();

    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[actix_rt::test]
async fn patch_with_null_era_clears_it_and_keeps_other_fields() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id()
        .with(eq(7))
        .returning(|id| {
            let mut quote = stored_quote(id);
            quote.author_bio_summary = Some("English poet.".into());
            Ok(quote)
        });
    repo.expect_update_quote()
        .withf(|id, c| {
            *id == 7
                && c.era.is_none()
                && c.author == "John Keats"
                && c.author_bio_summary.as_deref() == Some("English poet.")
        })
        .times(1)
        .returning(|id, _| Ok(stored_quote(id)));

    let handler = QuoteHandler::new(repo, MockBio::new());
    let patch = QuotePatch {
        era: OptionField::SetToNull,
        ..Default::default()
    };

    assert!(handler.patch_quote("7", patch).await.is_ok());
}

#[actix_rt::test]
async fn delete_missing_quote_is_not_found() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_delete_quote()
        .with(eq(99))
        .returning(|id| Err(AppError::NotFound(format!("Quote {} not found", id))));

    let handler = QuoteHandler::new(repo, MockBio::new());

    assert!(matches!(handler.delete_quote("99").await, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn fetch_bio_saves_summary_exactly() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id().returning(|id| Ok(stored_quote(id)));
    repo.expect_update_author_bio()
        .with(eq(3), eq("Keats was a poet."))
        .times(1)
        .returning(|id, summary| {
            let mut quote = stored_quote(id);
            quote.author_bio_summary = Some(summary.to_string());
            Ok(quote)
        });

    let mut bio = MockBio::new();
    bio.expect_fetch_summary()
        .with(eq("John Keats"))
        .times(1)
        .returning(|_| Ok("Keats was a poet.".to_string()));

    let handler = QuoteHandler::new(repo, bio);
    let response = handler.fetch_author_bio("3").await.unwrap();

    assert_eq!(response.summary, "Keats was a poet.");
    assert_eq!(response.message, "Successfully fetched and saved bio for John Keats.");
}

#[actix_rt::test]
async fn fetch_bio_without_article_leaves_quote_unchanged() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id().returning(|id| Ok(stored_quote(id)));
    repo.expect_update_author_bio().never();

    let mut bio = MockBio::new();
    bio.expect_fetch_summary()
        .returning(|author| Err(AppError::NotFound(format!("No Wikipedia article found for {}.", author))));

    let handler = QuoteHandler::new(repo, bio);
    let err = handler.fetch_author_bio("3").await.unwrap_err();

    assert_eq!(err.message(), "No Wikipedia article found for John Keats.");
}

#[actix_rt::test]
async fn fetch_bio_propagates_external_failure() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id().returning(|id| Ok(stored_quote(id)));
    repo.expect_update_author_bio().never();

    let mut bio = MockBio::new();
    bio.expect_fetch_summary()
        .returning(|_| Err(AppError::ExternalService("External API error while fetching bio: timeout".into())));

    let handler = QuoteHandler::new(repo, bio);

    assert!(matches!(handler.fetch_author_bio("3").await, Err(AppError::ExternalService(_))));
}

#[actix_rt::test]
async fn fetch_bio_for_unknown_quote_skips_lookup() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id()
        .returning(|id| Err(AppError::NotFound(format!("Quote {} not found", id))));

    let mut bio = MockBio::new();
    bio.expect_fetch_summary().never();

    let handler = QuoteHandler::new(repo, bio);

    assert!(matches!(handler.fetch_author_bio("12").await, Err(AppError::NotFound(_))));
}

#[actix_rt::test]
async fn era_report_is_returned_as_counted() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_count_quotes_by_era().returning(|| {
        Ok(vec![
            EraCount { era: Some("A".into()), quote_count: 2 },
            EraCount { era: Some("B".into()), quote_count: 1 },
            EraCount { era: None, quote_count: 1 },
        ])
    });

    let handler = QuoteHandler::new(repo, MockBio::new());
    let report = handler.era_report().await.unwrap();

    assert_eq!(report.len(), 3);
    assert_eq!(report[0].era.as_deref(), Some("A"));
    assert_eq!(report[0].quote_count, 2);
}

#[actix_rt::test]
async fn update_without_era_or_bio_keeps_fetched_bio() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id().with(eq(1)).returning(|id| {
        let mut quote = stored_quote(id);
        quote.author_bio_summary = Some("Keats was a poet.".into());
        Ok(quote)
    });
    repo.expect_update_quote()
        .withf(|id, c| {
            *id == 1
                && c.text == "edited"
                && c.era.as_deref() == Some("Romantic")
                && c.author_bio_summary.as_deref() == Some("Keats was a poet.")
        })
        .times(1)
        .returning(|id, c| {
            let mut quote = stored_quote(id);
            quote.text = c.text.clone();
            quote.author_bio_summary = c.author_bio_summary.clone();
            Ok(quote)
        });

    let handler = QuoteHandler::new(repo, MockBio::new());
    let replace = QuoteReplace {
        text: "edited".into(),
        author: "John Keats".into(),
        ..Default::default()
    };

    let quote = handler.update_quote("1", replace).await.unwrap();
    assert_eq!(quote.author_bio_summary.as_deref(), Some("Keats was a poet."));
}

#[actix_rt::test]
async fn update_with_explicit_null_bio_clears_it() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_get_quote_by_id().returning(|id| {
        let mut quote = stored_quote(id);
        quote.author_bio_summary = Some("Keats was a poet.".into());
        Ok(quote)
    });
    repo.expect_update_quote()
        .withf(|_, c| c.author_bio_summary.is_none() && c.era.as_deref() == Some("Romantic"))
        .times(1)
        .returning(|id, _| Ok(stored_quote(id)));

    let handler = QuoteHandler::new(repo, MockBio::new());
    let replace = QuoteReplace {
        text: "edited".into(),
        author: "John Keats".into(),
        era: OptionField::Unchanged,
        author_bio_summary: OptionField::SetToNull,
    };

    assert!(handler.update_quote("1", replace).await.is_ok());
}

#[actix_rt::test]
async fn author_is_trimmed_before_length_check() {
    let mut repo = MockQuoteRepo::new();
    repo.expect_create_quote()
        .withf(|q| q.author.len() == 100)
        .times(1)
        .returning(|q| {
            let mut quote = stored_quote(1);
            quote.author = q.author.clone();
            Ok(quote)
        });

    let handler = QuoteHandler::new(repo, MockBio::new());
    let author = format!("  {}  ", "a".repeat(100));

    let quote = handler.create_quote(request("Text", &author, None)).await.unwrap();
    assert_eq!(quote.author.len(), 100);
}
