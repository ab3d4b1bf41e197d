//! Headline sentiment for news coverage of a brand or product.

use serde::{Deserialize, Serialize};

use crate::mean;

/// Headline score above which an article counts as positive.
pub const POSITIVE_THRESHOLD: f64 = 0.1;
/// Headline score below which an article counts as negative.
pub const NEGATIVE_THRESHOLD: f64 = -0.1;

/// Word weights for consumer-hardware coverage.
///
/// Keys are lowercase single words. Positive weights in `(0.0, 1.0]`,
/// negative in `[-1.0, 0.0)`.
pub(crate) const LEXICON: &[(&str, f64)] = &[
    // Positive signals
    ("launch", 0.3),
    ("launches", 0.3),
    ("new", 0.1),
    ("best", 0.5),
    ("great", 0.4),
    ("excellent", 0.5),
    ("fast", 0.3),
    ("powerful", 0.4),
    ("record", 0.4),
    ("growth", 0.4),
    ("success", 0.5),
    ("popular", 0.3),
    ("deal", 0.3),
    ("discount", 0.3),
    ("award", 0.5),
    ("innovative", 0.4),
    ("upgrade", 0.3),
    ("improved", 0.3),
    ("recommended", 0.4),
    ("sold-out", 0.4),
    // Negative signals
    ("recall", -0.7),
    ("delay", -0.4),
    ("delayed", -0.4),
    ("shortage", -0.5),
    ("problem", -0.3),
    ("problems", -0.3),
    ("issue", -0.3),
    ("issues", -0.3),
    ("bug", -0.3),
    ("fail", -0.4),
    ("failure", -0.5),
    ("broken", -0.5),
    ("lawsuit", -0.5),
    ("ban", -0.6),
    ("banned", -0.6),
    ("overheating", -0.5),
    ("expensive", -0.2),
    ("worst", -0.6),
    ("cancelled", -0.5),
    ("layoffs", -0.4),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub title: String,
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    #[default]
    Neutral,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewsSentiment {
    pub positive: usize,
    pub negative: usize,
    pub neutral: usize,
    pub average_score: f64,
    pub overall: SentimentLabel,
}

impl NewsSentiment {
    pub fn total(&self) -> usize {
        self.positive + self.negative + self.neutral
    }
}

/// Scores text by summing lexicon weights, clamped to `[-1.0, 1.0]`.
pub fn lexicon_score(text: &str) -> f64 {
    let mut score = 0.0;
    for word in text.split_whitespace() {
        let word = word
            .trim_matches(|c: char| !c.is_alphanumeric() && c != '-')
            .to_lowercase();
        if let Some((_, weight)) = LEXICON.iter().find(|(lex_word, _)| *lex_word == word) {
            score += weight;
        }
    }
    score.clamp(-1.0, 1.0)
}

pub fn label_for(score: f64) -> SentimentLabel {
    if score > POSITIVE_THRESHOLD {
        SentimentLabel::Positive
    } else if score < NEGATIVE_THRESHOLD {
        SentimentLabel::Negative
    } else {
        SentimentLabel::Neutral
    }
}

pub fn analyze_news_sentiment(articles: &[NewsArticle]) -> NewsSentiment {
    if articles.is_empty() {
        return NewsSentiment::default();
    }

    let mut summary = NewsSentiment::default();
    let mut scores = Vec::with_capacity(articles.len());
    for article in articles {
        let text = match article.snippet.as_deref() {
            Some(snippet) => format!("{} {}", article.title, snippet),
            None => article.title.clone(),
        };
        let score = lexicon_score(&text);
        match label_for(score) {
            SentimentLabel::Positive => summary.positive += 1,
            SentimentLabel::Negative => summary.negative += 1,
            SentimentLabel::Neutral => summary.neutral += 1,
        }
        scores.push(score);
    }

    summary.average_score = mean(&scores);
    summary.overall = label_for(summary.average_score);
    summary
}
