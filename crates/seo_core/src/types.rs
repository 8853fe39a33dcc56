use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Placeholder rendered for any metric the provider did not report.
pub const NOT_AVAILABLE: &str = "N/A";

/// Explanation carried by an evaluation that could not be obtained.
pub const ANALYSIS_FAILED: &str = "analysis failed";

/// Text pulled from a rendered article page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleContent {
    pub url: String,
    pub title: String,
    pub subheadings: Vec<String>,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoEvaluation {
    #[serde(rename = "nota_seo")]
    pub score: Option<f64>,
    #[serde(rename = "explicacao")]
    pub explanation: String,
    #[serde(rename = "sugestoes")]
    pub suggestions: Vec<String>,
}

impl SeoEvaluation {
    /// The record substituted when the completion reply is unusable.
    pub fn degraded() -> Self {
        Self {
            score: None,
            explanation: ANALYSIS_FAILED.to_string(),
            suggestions: Vec::new(),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.score.is_none()
    }
}

/// A 0-100 Lighthouse category score, or "N/A" when the category is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryScore {
    Score(u8),
    NotAvailable,
}

impl CategoryScore {
    /// Scales a provider score in [0, 1] to [0, 100], rounding to the nearest integer.
    pub fn from_fraction(fraction: Option<f64>) -> Self {
        match fraction {
            Some(f) if f.is_finite() => Self::Score((f * 100.0).round().clamp(0.0, 100.0) as u8),
            _ => Self::NotAvailable,
        }
    }

    pub fn value(&self) -> Option<u8> {
        match self {
            Self::Score(v) => Some(*v),
            Self::NotAvailable => None,
        }
    }
}

impl Serialize for CategoryScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Score(v) => serializer.serialize_u8(*v),
            Self::NotAvailable => serializer.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Score(u8),
            Label(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Score(v) if v <= 100 => Ok(Self::Score(v)),
            Raw::Score(v) => Err(serde::de::Error::custom(format!("score {} out of range", v))),
            Raw::Label(s) if s == NOT_AVAILABLE => Ok(Self::NotAvailable),
            Raw::Label(s) => Err(serde::de::Error::custom(format!("unexpected score label: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    #[serde(rename = "LCP")]
    pub lcp: String,
    #[serde(rename = "INP")]
    pub inp: String,
    #[serde(rename = "CLS")]
    pub cls: String,
    #[serde(rename = "FCP")]
    pub fcp: String,
    #[serde(rename = "TTFB")]
    pub ttfb: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceTimings {
    #[serde(rename = "FCP")]
    pub fcp: String,
    #[serde(rename = "TotalBlockingTime")]
    pub total_blocking_time: String,
    #[serde(rename = "SpeedIndex")]
    pub speed_index: String,
    #[serde(rename = "LCP")]
    pub lcp: String,
    #[serde(rename = "CLS")]
    pub cls: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub core_web_vitals: CoreWebVitals,
    pub performance: PerformanceTimings,
    pub accessibility: CategoryScore,
    pub best_practices: CategoryScore,
    pub seo: CategoryScore,
}

/// Outcome of a page-performance audit. `NoData` serializes as `{}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PageSpeed {
    Measured(PerformanceMetrics),
    NoData {},
}

impl PageSpeed {
    pub fn no_data() -> Self {
        Self::NoData {}
    }

    pub fn metrics(&self) -> Option<&PerformanceMetrics> {
        match self {
            Self::Measured(m) => Some(m),
            Self::NoData {} => None,
        }
    }
}

/// One analyzed article as persisted in an artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub link: String,
    pub title: String,
    pub subheadings: Vec<String>,
    pub body: String,
    #[serde(flatten)]
    pub evaluation: SeoEvaluation,
    pub page_speed: PageSpeed,
}

impl Report {
    pub fn assemble(content: ArticleContent, evaluation: SeoEvaluation, page_speed: PageSpeed) -> Self {
        Self {
            link: content.url,
            title: content.title,
            subheadings: content.subheadings,
            body: content.body,
            evaluation,
            page_speed,
        }
    }

    /// True when either the evaluation or the performance audit fell back to defaults.
    pub fn is_degraded(&self) -> bool {
        self.evaluation.is_degraded() || self.page_speed.metrics().is_none()
    }
}

/// Contents of a persisted artifact: a single report or a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Artifact {
    Batch(Vec<Report>),
    Single(Report),
}

impl Artifact {
    pub fn reports(&self) -> Vec<&Report> {
        match self {
            Self::Batch(reports) => reports.iter().collect(),
            Self::Single(report) => vec![report],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_content() -> ArticleContent {
        ArticleContent {
            url: "https://example.com/article".to_string(),
            title: "Example".to_string(),
            subheadings: vec!["Intro".to_string(), "Details".to_string()],
            body: "First paragraph.\n\nSecond paragraph.".to_string(),
        }
    }

    fn sample_metrics() -> PerformanceMetrics {
        PerformanceMetrics {
            core_web_vitals: CoreWebVitals {
                lcp: "1.2 s".to_string(),
                inp: NOT_AVAILABLE.to_string(),
                cls: "0.01".to_string(),
                fcp: "0.8 s".to_string(),
                ttfb: "Root document took 120 ms".to_string(),
            },
            performance: PerformanceTimings {
                fcp: "0.8 s".to_string(),
                total_blocking_time: "30 ms".to_string(),
                speed_index: "1.1 s".to_string(),
                lcp: "1.2 s".to_string(),
                cls: "0.01".to_string(),
            },
            accessibility: CategoryScore::Score(91),
            best_practices: CategoryScore::NotAvailable,
            seo: CategoryScore::Score(83),
        }
    }

    #[test]
    fn test_category_score_rounding() {
        assert_eq!(CategoryScore::from_fraction(Some(0.83)), CategoryScore::Score(83));
        assert_eq!(CategoryScore::from_fraction(Some(0.995)), CategoryScore::Score(100));
        assert_eq!(CategoryScore::from_fraction(Some(0.0)), CategoryScore::Score(0));
        assert_eq!(CategoryScore::from_fraction(None), CategoryScore::NotAvailable);
        assert_eq!(CategoryScore::from_fraction(Some(f64::NAN)), CategoryScore::NotAvailable);
    }

    #[test]
    fn test_category_score_serialization() {
        assert_eq!(serde_json::to_value(CategoryScore::Score(83)).unwrap(), json!(83));
        assert_eq!(serde_json::to_value(CategoryScore::NotAvailable).unwrap(), json!("N/A"));
        let parsed: CategoryScore = serde_json::from_value(json!("N/A")).unwrap();
        assert_eq!(parsed, CategoryScore::NotAvailable);
        assert!(serde_json::from_value::<CategoryScore>(json!("bad")).is_err());
        assert!(serde_json::from_value::<CategoryScore>(json!(250)).is_err());
    }

    #[test]
    fn test_no_data_serializes_as_empty_object() {
        assert_eq!(serde_json::to_value(PageSpeed::no_data()).unwrap(), json!({}));
        let parsed: PageSpeed = serde_json::from_value(json!({})).unwrap();
        assert_eq!(parsed, PageSpeed::no_data());
    }

    #[test]
    fn test_report_layout() {
        let report = Report::assemble(sample_content(), SeoEvaluation::degraded(), PageSpeed::no_data());
        let value = serde_json::to_value(&report).unwrap();

        assert_eq!(value["link"], "https://example.com/article");
        assert_eq!(value["title"], "Example");
        assert_eq!(value["nota_seo"], serde_json::Value::Null);
        assert_eq!(value["explicacao"], ANALYSIS_FAILED);
        assert_eq!(value["sugestoes"], json!([]));
        assert_eq!(value["page_speed"], json!({}));
        assert!(report.is_degraded());
    }

    #[test]
    fn test_report_roundtrip_with_metrics() {
        let evaluation = SeoEvaluation {
            score: Some(7.5),
            explanation: "ok".to_string(),
            suggestions: vec!["a".to_string(), "b".to_string(), "c".to_string()],
        };
        let report = Report::assemble(sample_content(), evaluation, PageSpeed::Measured(sample_metrics()));
        assert!(!report.is_degraded());

        let text = serde_json::to_string_pretty(&report).unwrap();
        let parsed: Report = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, report);
        assert_eq!(parsed.page_speed.metrics().unwrap().seo, CategoryScore::Score(83));
    }

    #[test]
    fn test_artifact_shapes() {
        let report = Report::assemble(sample_content(), SeoEvaluation::degraded(), PageSpeed::no_data());

        let single: Artifact = serde_json::from_value(serde_json::to_value(&report).unwrap()).unwrap();
        assert!(matches!(single, Artifact::Single(_)));

        let batch: Artifact = serde_json::from_value(json!([report.clone(), report])).unwrap();
        assert_eq!(batch.reports().len(), 2);
    }
}
