//! Flattening of an analysis response into display tables.
//!
//! Each projection walks its source array in order and copies the listed
//! fields verbatim into one row per element. A field that is absent yields
//! [`NluError::MissingField`] carrying its full path, e.g.
//! `entities[0].emotion.joy`.

pub mod model;

use tracing::debug;

use crate::error::{NluError, NluResult};
use crate::response::{
    AnalysisResponse, CategoryRecord, ConceptRecord, EmotionRecord, EntityRecord, KeywordRecord,
    SentimentRecord,
};

pub use model::{
    AnalysisTables, CategoryRow, ConceptRow, EmotionScores, EntityRow, KeywordRow, Table, TableRow,
};

/// Flatten a full response into the four tables.
pub fn flatten(response: &AnalysisResponse) -> NluResult<AnalysisTables> {
    let tables = AnalysisTables {
        entities: flatten_entities(source(response.entities.as_deref(), "entities")?)?,
        keywords: flatten_keywords(source(response.keywords.as_deref(), "keywords")?)?,
        concepts: flatten_concepts(source(response.concepts.as_deref(), "concepts")?)?,
        categories: flatten_categories(source(response.categories.as_deref(), "categories")?)?,
    };

    if !response.semantic_roles.is_empty() {
        debug!(
            count = response.semantic_roles.len(),
            "Semantic roles returned but not tabulated"
        );
    }

    debug!(
        entities = tables.entities.len(),
        keywords = tables.keywords.len(),
        concepts = tables.concepts.len(),
        categories = tables.categories.len(),
        "Flattened analysis response"
    );

    Ok(tables)
}

/// Deserialize a raw JSON value into response records, then flatten it.
pub fn flatten_json(value: serde_json::Value) -> NluResult<AnalysisTables> {
    let response: AnalysisResponse = serde_json::from_value(value)?;
    flatten(&response)
}

pub fn flatten_entities(entities: &[EntityRecord]) -> NluResult<Vec<EntityRow>> {
    entities
        .iter()
        .enumerate()
        .map(|(i, entity)| {
            let at = format!("entities[{}]", i);
            let (sentiment_score, sentiment_label) = sentiment(entity.sentiment.as_ref(), &at)?;
            Ok(EntityRow {
                name: field(entity.text.clone(), &at, "text")?,
                entity_type: field(entity.entity_type.clone(), &at, "type")?,
                confidence: field(entity.confidence, &at, "confidence")?,
                sentiment_score,
                sentiment_label,
                relevance: field(entity.relevance, &at, "relevance")?,
                emotion: emotion(entity.emotion.as_ref(), &at)?,
            })
        })
        .collect()
}

pub fn flatten_keywords(keywords: &[KeywordRecord]) -> NluResult<Vec<KeywordRow>> {
    keywords
        .iter()
        .enumerate()
        .map(|(i, keyword)| {
            let at = format!("keywords[{}]", i);
            let (sentiment_score, sentiment_label) = sentiment(keyword.sentiment.as_ref(), &at)?;
            Ok(KeywordRow {
                keyword: field(keyword.text.clone(), &at, "text")?,
                count: field(keyword.count, &at, "count")?,
                sentiment_score,
                sentiment_label,
                relevance: field(keyword.relevance, &at, "relevance")?,
                emotion: emotion(keyword.emotion.as_ref(), &at)?,
            })
        })
        .collect()
}

pub fn flatten_concepts(concepts: &[ConceptRecord]) -> NluResult<Vec<ConceptRow>> {
    concepts
        .iter()
        .enumerate()
        .map(|(i, concept)| {
            let at = format!("concepts[{}]", i);
            Ok(ConceptRow {
                concept: field(concept.text.clone(), &at, "text")?,
                relevance: field(concept.relevance, &at, "relevance")?,
            })
        })
        .collect()
}

pub fn flatten_categories(categories: &[CategoryRecord]) -> NluResult<Vec<CategoryRow>> {
    categories
        .iter()
        .enumerate()
        .map(|(i, category)| {
            let at = format!("categories[{}]", i);
            Ok(CategoryRow {
                category: field(category.label.clone(), &at, "label")?,
                score: field(category.score, &at, "score")?,
            })
        })
        .collect()
}

fn source<'a, T>(array: Option<&'a [T]>, name: &str) -> NluResult<&'a [T]> {
    array.ok_or_else(|| NluError::missing(name))
}

fn field<T>(value: Option<T>, at: &str, name: &str) -> NluResult<T> {
    value.ok_or_else(|| NluError::missing(format!("{}.{}", at, name)))
}

fn sentiment(record: Option<&SentimentRecord>, at: &str) -> NluResult<(f64, String)> {
    let record = field(record, at, "sentiment")?;
    let at = format!("{}.sentiment", at);
    Ok((
        field(record.score, &at, "score")?,
        field(record.label.clone(), &at, "label")?,
    ))
}

fn emotion(record: Option<&EmotionRecord>, at: &str) -> NluResult<EmotionScores> {
    let record = field(record, at, "emotion")?;
    let at = format!("{}.emotion", at);
    Ok(EmotionScores {
        sadness: field(record.sadness, &at, "sadness")?,
        joy: field(record.joy, &at, "joy")?,
        fear: field(record.fear, &at, "fear")?,
        disgust: field(record.disgust, &at, "disgust")?,
        anger: field(record.anger, &at, "anger")?,
    })
}
