//! Optional reference oracle backed by the Wolfram|Alpha query API.
//!
//! The oracle supplies a human-readable "known" answer for comparison only;
//! the computed result never depends on it. Accordingly every failure path
//! (transport error, non-200 status, unparsable payload, no matching field)
//! comes back as a descriptive string, never as an `Err` that could abort a
//! successful numerical computation.

use log::debug;

/// Default query endpoint.
const DEFAULT_ENDPOINT: &str = "http://api.wolframalpha.com/v2/query";

/// Client for the reference oracle.
#[derive(Debug, Clone)]
pub struct OracleClient {
    app_id: String,
    endpoint: String,
}

impl OracleClient {
    pub fn new(app_id: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Override the endpoint; used by tests pointing at a local server.
    pub fn with_endpoint(app_id: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self {
            app_id: app_id.into(),
            endpoint: endpoint.into(),
        }
    }

    /// Ask the oracle for the value of ∫expr over [a, b].
    ///
    /// When singularities are supplied the query is phrased as a sum of
    /// sub-range integrals split at each point, which the oracle handles
    /// better than an integral across a pole. The response XML is scanned for
    /// the first plaintext field containing "≈" or "=".
    pub fn query(&self, expr: &str, a: f64, b: f64, singularities: &[f64]) -> String {
        let input = build_query(expr, a, b, singularities);
        debug!("oracle query: {}", input);

        let response = ureq::get(&self.endpoint)
            .query("input", &input)
            .query("appid", &self.app_id)
            .query("format", "plaintext")
            .query("output", "XML")
            .call();

        let body = match response {
            Ok(r) => match r.into_string() {
                Ok(body) => body,
                Err(e) => return format!("oracle error: unreadable response: {}", e),
            },
            Err(ureq::Error::Status(code, _)) => {
                return format!("oracle error: HTTP {}", code);
            }
            Err(e) => return format!("oracle error: {}", e),
        };

        match extract_result(&body) {
            Some(text) => text,
            None => "oracle error: no numerical result in the response".to_string(),
        }
    }
}

/// Phrase the integration request, splitting at singularities when present.
fn build_query(expr: &str, a: f64, b: f64, singularities: &[f64]) -> String {
    if singularities.is_empty() {
        return format!("integrate {} from {} to {}", expr, a, b);
    }
    let mut bounds = Vec::with_capacity(singularities.len() + 2);
    bounds.push(a);
    bounds.extend(singularities.iter().copied().filter(|&s| a < s && s < b));
    bounds.push(b);
    bounds
        .windows(2)
        .map(|w| format!("integrate {} from {} to {}", expr, w[0], w[1]))
        .collect::<Vec<_>>()
        .join(" + ")
}

/// First plaintext field of the response that carries a value.
fn extract_result(xml: &str) -> Option<String> {
    let doc = roxmltree::Document::parse(xml).ok()?;
    doc.descendants()
        .filter(|node| node.has_tag_name("plaintext"))
        .filter_map(|node| node.text())
        .find(|text| text.contains('≈') || text.contains('='))
        .map(|text| text.trim().to_string())
}
