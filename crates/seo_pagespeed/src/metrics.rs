use serde_json::Value;
use seo_core::{CategoryScore, CoreWebVitals, PageSpeed, PerformanceMetrics, PerformanceTimings, NOT_AVAILABLE};

/// Maps a `runPagespeed` response into flat metrics.
///
/// Only `lighthouseResult.audits` and `lighthouseResult.categories` are read.
/// A response without `lighthouseResult` (quota exceeded, bad key, unsupported
/// URL) is reported as [`PageSpeed::NoData`].
pub fn metrics_from_response(response: &Value) -> PageSpeed {
    let Some(lighthouse) = response.get("lighthouseResult") else {
        return PageSpeed::no_data();
    };

    let audits = lighthouse.get("audits").unwrap_or(&Value::Null);
    let categories = lighthouse.get("categories").unwrap_or(&Value::Null);
    let display = |audit: &str| display_value(audits, audit);
    let score = |category: &str| category_score(categories, category);

    PageSpeed::Measured(PerformanceMetrics {
        core_web_vitals: CoreWebVitals {
            lcp: display("largest-contentful-paint"),
            inp: display("interaction-to-next-paint"),
            cls: display("cumulative-layout-shift"),
            fcp: display("first-contentful-paint"),
            ttfb: display("server-response-time"),
        },
        performance: PerformanceTimings {
            fcp: display("first-contentful-paint"),
            total_blocking_time: display("total-blocking-time"),
            speed_index: display("speed-index"),
            lcp: display("largest-contentful-paint"),
            cls: display("cumulative-layout-shift"),
        },
        accessibility: score("accessibility"),
        best_practices: score("best-practices"),
        seo: score("seo"),
    })
}

fn display_value(audits: &Value, audit: &str) -> String {
    audits
        .get(audit)
        .and_then(|a| a.get("displayValue"))
        .and_then(Value::as_str)
        .map(|s| s.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn category_score(categories: &Value, category: &str) -> CategoryScore {
    CategoryScore::from_fraction(
        categories
            .get(category)
            .and_then(|c| c.get("score"))
            .and_then(Value::as_f64),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_lighthouse_result() {
        let response = json!({
            "error": { "code": 429, "message": "Quota exceeded" }
        });
        let page_speed = metrics_from_response(&response);
        assert_eq!(page_speed, PageSpeed::no_data());
        assert_eq!(serde_json::to_value(&page_speed).unwrap(), json!({}));
    }

    #[test]
    fn test_full_response() {
        let response = json!({
            "lighthouseResult": {
                "audits": {
                    "largest-contentful-paint": { "displayValue": "1.9 s" },
                    "cumulative-layout-shift": { "displayValue": "0.002" },
                    "first-contentful-paint": { "displayValue": "0.7 s" },
                    "server-response-time": { "displayValue": "Root document took 210 ms" },
                    "total-blocking-time": { "displayValue": "40 ms" },
                    "speed-index": { "displayValue": "1.4 s" }
                },
                "categories": {
                    "performance": { "score": 0.97 },
                    "accessibility": { "score": 0.9 },
                    "best-practices": { "score": 1.0 },
                    "seo": { "score": 0.83 }
                }
            }
        });

        let page_speed = metrics_from_response(&response);
        let metrics = page_speed.metrics().unwrap();
        assert_eq!(metrics.seo, CategoryScore::Score(83));
        assert_eq!(metrics.accessibility, CategoryScore::Score(90));
        assert_eq!(metrics.best_practices, CategoryScore::Score(100));
        assert_eq!(metrics.core_web_vitals.lcp, "1.9 s");
        assert_eq!(metrics.core_web_vitals.inp, NOT_AVAILABLE);
        assert_eq!(metrics.performance.total_blocking_time, "40 ms");
        assert_eq!(metrics.performance.speed_index, "1.4 s");

        let value = serde_json::to_value(&page_speed).unwrap();
        assert_eq!(value["core_web_vitals"]["TTFB"], "Root document took 210 ms");
        assert_eq!(value["performance"]["TotalBlockingTime"], "40 ms");
        assert_eq!(value["seo"], 83);
    }

    #[test]
    fn test_partial_response_uses_placeholders() {
        let response = json!({
            "lighthouseResult": {
                "categories": {
                    "seo": { "score": null },
                    "accessibility": {}
                }
            }
        });

        let page_speed = metrics_from_response(&response);
        let metrics = page_speed.metrics().unwrap();
        assert_eq!(metrics.seo, CategoryScore::NotAvailable);
        assert_eq!(metrics.accessibility, CategoryScore::NotAvailable);
        assert_eq!(metrics.best_practices, CategoryScore::NotAvailable);
        assert_eq!(metrics.core_web_vitals.fcp, NOT_AVAILABLE);

        let value = serde_json::to_value(&page_speed).unwrap();
        assert_eq!(value["best_practices"], "N/A");
        assert_eq!(value["performance"]["CLS"], "N/A");
    }
}
