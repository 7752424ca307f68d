//! Shared helpers for the HTTP tests

#![allow(dead_code)]

use std::path::Path;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use ckd_predictor::features::{FeatureRow, Label, FEATURE_COUNT, FEATURE_LAYOUT};
use ckd_predictor::model::{Classifier, ForestParams, ModelArtifact, RandomForest};
use serde_json::Value;
use tower::ServiceExt;

const SC: usize = 11;
const HEMO: usize = 14;

/// Forest trained on rows where high creatinine and low hemoglobin mean CKD
pub fn fitted_artifact() -> ModelArtifact {
    let mut rows: Vec<FeatureRow> = Vec::new();
    let mut labels = Vec::new();
    for i in 0..80 {
        let ckd = i % 2 == 0;
        let mut row = [0.0; FEATURE_COUNT];
        row[0] = 25.0 + (i % 40) as f64;
        row[SC] = if ckd { 2.5 + (i % 7) as f64 * 0.4 } else { 0.6 + (i % 5) as f64 * 0.1 };
        row[HEMO] = if ckd { 8.5 + (i % 5) as f64 * 0.4 } else { 13.5 + (i % 6) as f64 * 0.4 };
        rows.push(row);
        labels.push(if ckd { Label::Ckd } else { Label::NotCkd });
    }

    let mut forest = RandomForest::new(ForestParams { n_estimators: 30, ..ForestParams::default() });
    forest.fit(&rows, &labels).unwrap();
    ModelArtifact::new(forest, rows.len(), 0)
}

/// CSV with an id column, the 24 features, and the target
pub fn write_dataset(path: &Path, rows: usize) {
    let mut out = String::from("id,");
    out.push_str(&FEATURE_LAYOUT.join(","));
    out.push_str(",classification\n");

    for i in 0..rows {
        let ckd = i % 2 == 0;
        let (rbc, pcc, yes, appet, sc, hemo, class) = if ckd {
            ("abnormal", "present", "yes", "poor", 3.0 + (i % 4) as f64 * 0.5, 9.0 + (i % 3) as f64, "ckd")
        } else {
            ("normal", "notpresent", "no", "good", 0.8 + (i % 3) as f64 * 0.1, 14.0 + (i % 3) as f64, "notckd")
        };
        let cells: Vec<String> = vec![
            i.to_string(),
            (30 + i % 40).to_string(),
            "80".into(),
            "1.020".into(),
            if ckd { "2" } else { "0" }.into(),
            "0".into(),
            rbc.into(),
            "normal".into(),
            pcc.into(),
            "notpresent".into(),
            if ckd { "160" } else { "100" }.into(),
            "40".into(),
            format!("{:.1}", sc),
            "137".into(),
            "4.4".into(),
            format!("{:.1}", hemo),
            "40".into(),
            "7800".into(),
            "5.0".into(),
            yes.into(),
            yes.into(),
            "no".into(),
            appet.into(),
            "no".into(),
            "no".into(),
            class.into(),
        ];
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    // One record with the missing-value sentinel
    out.push_str(&format!("{},?,80,1.020,0,0,normal,normal,notpresent,notpresent,100,40,0.9,137,4.4,15.0,44,7800,5.2,no,no,no,good,no,no,notckd\n", rows));

    std::fs::write(path, out).unwrap();
}

pub async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();

    send(app, request).await
}

pub async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}
