//! Flattened table rows.

use serde::{Deserialize, Serialize};

/// The five emotion columns shared by entity and keyword rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmotionScores {
    pub sadness: f64,
    pub joy: f64,
    pub fear: f64,
    pub disgust: f64,
    pub anger: f64,
}

impl EmotionScores {
    fn cells(&self) -> [String; 5] {
        [
            self.sadness.to_string(),
            self.joy.to_string(),
            self.fear.to_string(),
            self.disgust.to_string(),
            self.anger.to_string(),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityRow {
    pub name: String,
    pub entity_type: String,
    pub confidence: f64,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    pub relevance: f64,
    #[serde(flatten)]
    pub emotion: EmotionScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeywordRow {
    pub keyword: String,
    pub count: u64,
    pub sentiment_score: f64,
    pub sentiment_label: String,
    pub relevance: f64,
    #[serde(flatten)]
    pub emotion: EmotionScores,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConceptRow {
    pub concept: String,
    pub relevance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRow {
    pub category: String,
    pub score: f64,
}

/// A row that can be shown in a generic table.
pub trait TableRow {
    const TITLE: &'static str;
    const HEADERS: &'static [&'static str];

    /// Display values, one per header.
    fn cells(&self) -> Vec<String>;
}

impl TableRow for EntityRow {
    const TITLE: &'static str = "Entities";
    const HEADERS: &'static [&'static str] = &[
        "Name",
        "Type",
        "Confidence",
        "Sentiment Score",
        "Label",
        "Relevance",
        "Sadness",
        "Joy",
        "Fear",
        "Disgust",
        "Anger",
    ];

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.name.clone(),
            self.entity_type.clone(),
            self.confidence.to_string(),
            self.sentiment_score.to_string(),
            self.sentiment_label.clone(),
            self.relevance.to_string(),
        ];
        cells.extend(self.emotion.cells());
        cells
    }
}

impl TableRow for KeywordRow {
    const TITLE: &'static str = "Keywords";
    const HEADERS: &'static [&'static str] = &[
        "Keyword",
        "Count",
        "Sentiment Score",
        "Label",
        "Relevance",
        "Sadness",
        "Joy",
        "Fear",
        "Disgust",
        "Anger",
    ];

    fn cells(&self) -> Vec<String> {
        let mut cells = vec![
            self.keyword.clone(),
            self.count.to_string(),
            self.sentiment_score.to_string(),
            self.sentiment_label.clone(),
            self.relevance.to_string(),
        ];
        cells.extend(self.emotion.cells());
        cells
    }
}

impl TableRow for ConceptRow {
    const TITLE: &'static str = "Concepts";
    const HEADERS: &'static [&'static str] = &["Concept", "Relevance"];

    fn cells(&self) -> Vec<String> {
        vec![self.concept.clone(), self.relevance.to_string()]
    }
}

impl TableRow for CategoryRow {
    const TITLE: &'static str = "Categories";
    const HEADERS: &'static [&'static str] = &["Category", "Score"];

    fn cells(&self) -> Vec<String> {
        vec![self.category.clone(), self.score.to_string()]
    }
}

/// The four tables produced from one analysis response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisTables {
    pub entities: Vec<EntityRow>,
    pub keywords: Vec<KeywordRow>,
    pub concepts: Vec<ConceptRow>,
    pub categories: Vec<CategoryRow>,
}

impl AnalysisTables {
    /// Display views in render order: Entities, Keywords, Concepts, Categories.
    pub fn tables(&self) -> Vec<Table> {
        vec![
            Table::from_rows(&self.entities),
            Table::from_rows(&self.keywords),
            Table::from_rows(&self.concepts),
            Table::from_rows(&self.categories),
        ]
    }
}

/// Display view of one table.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub title: &'static str,
    pub headers: &'static [&'static str],
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows<R: TableRow>(rows: &[R]) -> Self {
        Self {
            title: R::TITLE,
            headers: R::HEADERS,
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
