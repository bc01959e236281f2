//! Evaluation API tests.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use common::fixtures;
use common::TestContext;
use recitation_backend::routes::evaluate::MAX_EVALUATION_CHARS;

/// Test a missing last character is scored and reported.
#[tokio::test]
async fn test_evaluate_missing_character() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("锄禾日当午", "锄禾日当", None))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["mode"], "follow");
    assert_eq!(body["score"], 80);
    assert_eq!(body["heard"], "锄禾日当");
    assert_eq!(body["diagnostics"][0]["kind"], "missing");
    assert_eq!(body["diagnostics"][0]["chars"][0], "午");
    assert_eq!(body["messages"][0], "你漏掉了这些字：\"午\"");
    assert_eq!(body["comment"], "很好，再多注意几个小字就更完美啦～");

    let summary = body["summary"].as_str().unwrap();
    assert!(summary.starts_with("我听到的是：锄禾日当\n相似度：80 分"));
    assert!(summary.ends_with("📝 改正建议：\n你漏掉了这些字：\"午\""));
}

/// Test a repeated character is reported as extra.
#[tokio::test]
async fn test_evaluate_extra_character() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("汗滴禾下土", "汗滴禾下土土", Some("recite")))
        .await
        .json();

    assert_eq!(body["mode"], "recite");
    assert_eq!(body["score"], 83);
    assert_eq!(body["diagnostics"].as_array().unwrap().len(), 1);
    assert_eq!(body["diagnostics"][0]["kind"], "extra");
    assert_eq!(body["messages"][0], "这些字是多余的：\"土\"");
    assert!(body["summary"].as_str().unwrap().contains("整体相似度：83 分"));
}

/// Test punctuation and spacing differences are ignored.
#[tokio::test]
async fn test_evaluate_ignores_punctuation() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request(
            "床前明月光，疑是地上霜。",
            "床前明月光 疑是地上霜",
            None,
        ))
        .await
        .json();

    assert_eq!(body["score"], 100);
    assert_eq!(body["similarity"], 1.0);
    assert_eq!(body["diagnostics"][0]["kind"], "fully_correct");
    assert!(!body["summary"].as_str().unwrap().contains("改正建议"));
}

/// Test silence is reported as no speech.
#[tokio::test]
async fn test_evaluate_empty_attempt() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let body: serde_json::Value = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("床前明月光", "", None))
        .await
        .json();

    assert_eq!(body["score"], 0);
    assert_eq!(body["diagnostics"][0]["kind"], "no_speech");
    assert_eq!(body["messages"][0], "你没有说话哦，请再试一次～");
}

/// Test a reference with nothing to compare is rejected.
#[tokio::test]
async fn test_evaluate_empty_reference() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("。，！", "床前明月光", None))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test oversized texts are rejected before scoring.
#[tokio::test]
async fn test_evaluate_rejects_oversized_text() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let long = "春".repeat(MAX_EVALUATION_CHARS + 1);

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request(&long, "春眠不觉晓", None))
        .await;
    response.assert_status_bad_request();

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request("春眠不觉晓", &long, None))
        .await;
    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], "bad_request");
}

/// Test texts at the limit are still evaluated.
#[tokio::test]
async fn test_evaluate_accepts_text_at_limit() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let text = "春，".repeat(MAX_EVALUATION_CHARS);

    let response = server
        .post("/api/evaluate")
        .json(&fixtures::evaluate_request(&text, &text, None))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["score"], 100);
}

/// Test following one line of a stored poem.
#[tokio::test]
async fn test_follow_line() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = ctx.load_document("1.txt", fixtures::SAMPLE_MATERIAL);

    let response = server
        .post(&format!("/api/documents/{}/items/0/follow", id))
        .json(&fixtures::follow_request(1, "疑是地上霜"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["mode"], "follow");
    assert_eq!(body["reference"], "疑是地上霜。");
    assert_eq!(body["score"], 100);
    assert_eq!(body["comment"], "太棒啦，你几乎一字不差！");
}

/// Test following a substituted character.
#[tokio::test]
async fn test_follow_line_substitution() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = ctx.load_document("1.txt", fixtures::SAMPLE_MATERIAL);

    let body: serde_json::Value = server
        .post(&format!("/api/documents/{}/items/0/follow", id))
        .json(&fixtures::follow_request(0, "床前名月光"))
        .await
        .json();

    assert_eq!(body["score"], 80);
    let kinds: Vec<&str> = body["diagnostics"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["kind"].as_str().unwrap())
        .collect();
    assert_eq!(kinds, vec!["missing", "substituted", "extra"]);
    assert_eq!(body["diagnostics"][1]["pairs"][0]["position"], 2);
    assert_eq!(body["messages"][1], "有些字读错了：\"名\"应该是\"明\"");
}

/// Test following a line past the end returns 404.
#[tokio::test]
async fn test_follow_line_out_of_range() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = ctx.load_document("1.txt", fixtures::SAMPLE_MATERIAL);

    let response = server
        .post(&format!("/api/documents/{}/items/0/follow", id))
        .json(&fixtures::follow_request(4, "床前明月光"))
        .await;

    response.assert_status_not_found();
}

/// Test reciting a whole poem with the last two characters dropped.
#[tokio::test]
async fn test_recite_item() {
    let ctx = TestContext::new();
    let server = ctx.server();
    let id = ctx.load_document("1.txt", fixtures::SAMPLE_MATERIAL);

    let response = server
        .post(&format!("/api/documents/{}/items/0/recite", id))
        .json(&fixtures::recite_request("床前明月光疑是地上霜举头望明月低头思"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["mode"], "recite");
    assert_eq!(body["reference"], "床前明月光，疑是地上霜。举头望明月，低头思故乡。");
    assert_eq!(body["score"], 90);
    assert_eq!(body["diagnostics"][0]["kind"], "missing");
    assert_eq!(body["comment"], "不错不错，再熟练一点就完美啦～");
    assert!(!body["summary"].as_str().unwrap().contains("改正建议"));
}

/// Test reciting an item in an unknown document returns 404.
#[tokio::test]
async fn test_recite_unknown_document() {
    let ctx = TestContext::new();
    let server = ctx.server();

    let response = server
        .post(&format!("/api/documents/{}/items/0/recite", uuid::Uuid::new_v4()))
        .json(&fixtures::recite_request("床前明月光"))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
}
