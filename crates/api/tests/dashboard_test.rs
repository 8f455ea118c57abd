//! Dashboard endpoints over HTTP.

mod common;

use axum::http::StatusCode;
use chrono::Duration;
use common::{TestApp, decimal};
use rstest::rstest;
use rust_decimal_macros::dec;
use serde_json::json;

#[tokio::test]
async fn test_summary_for_new_user_is_zero() {
    let app = TestApp::new().await;
    let (token, _) = app.register("empty@example.com").await;

    let (status, body) = app.get("/api/dashboard/summary/", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["total_income"]), dec!(0));
    assert_eq!(decimal(&body["total_expense"]), dec!(0));
    assert_eq!(decimal(&body["current_balance"]), dec!(0));
    assert_eq!(decimal(&body["income_change"]), dec!(0));
    assert_eq!(body["currency"], "UZS");
    assert_eq!(body["recent_transactions"], json!([]));
}

#[tokio::test]
async fn test_summary_mixed_currencies_in_uzs() {
    let app = TestApp::new().await;
    let (token, _) = app.register("mixed@example.com").await;
    let today = app.state.today();

    for (amount, currency) in [
        ("1234", "USD"),
        ("100", "CNY"),
        ("100", "CNY"),
        ("100", "RUB"),
        ("100", "USD"),
        ("300", "USD"),
        ("300", "USD"),
    ] {
        app.add_transaction(&token, "income", amount, currency, today)
            .await;
    }
    app.add_transaction(&token, "expense", "100", "UZS", today).await;
    app.add_transaction(&token, "expense", "100", "UZS", today).await;

    let (status, body) = app.get("/api/dashboard/summary/?currency=UZS", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(decimal(&body["total_income"]), dec!(24536000));
    assert_eq!(decimal(&body["total_expense"]), dec!(200));
    assert_eq!(decimal(&body["current_balance"]), dec!(24535800));
    assert_eq!(decimal(&body["income_change"]), dec!(100));
    assert_eq!(body["recent_transactions"].as_array().unwrap().len(), 5);

    let (_, usd) = app.get("/api/dashboard/summary/?currency=usd", &token).await;
    assert_eq!(usd["currency"], "USD");
    assert_eq!(decimal(&usd["total_income"]), dec!(1962.88));
    assert_eq!(decimal(&usd["total_expense"]), dec!(0.02));
    assert_eq!(decimal(&usd["current_balance"]), dec!(1962.86));
}

#[tokio::test]
async fn test_summary_recent_transactions_shape() {
    let app = TestApp::new().await;
    let (token, _) = app.register("recent@example.com").await;
    let today = app.state.today();

    app.add_transaction(&token, "income", "10", "USD", today - Duration::days(3))
        .await;
    app.add_transaction(&token, "expense", "50000", "UZS", today)
        .await;

    let (_, body) = app.get("/api/dashboard/summary/?currency=USD", &token).await;
    let recent = body["recent_transactions"].as_array().unwrap();
    assert_eq!(recent.len(), 2);

    assert_eq!(recent[0]["type"], "expense");
    assert_eq!(recent[0]["currency"], "USD");
    assert_eq!(recent[0]["original_currency"], "UZS");
    assert_eq!(decimal(&recent[0]["amount"]), dec!(4));
    assert_eq!(decimal(&recent[0]["original_amount"]), dec!(50000));
    assert_eq!(recent[1]["type"], "income");
}

#[rstest]
#[case("/api/dashboard/summary/?currency=GBP")]
#[case("/api/dashboard/summary/?period=14")]
#[case("/api/dashboard/chart-data/?currency=XYZ")]
#[case("/api/dashboard/chart-data/?period=abc")]
#[case("/api/dashboard/category-stats/?period=decade")]
#[case("/api/dashboard/category-stats/?type=transfer")]
#[case("/api/dashboard/category-stats/?currency=JPY")]
#[tokio::test]
async fn test_invalid_parameters_are_rejected(#[case] uri: &str) {
    let app = TestApp::new().await;
    let (token, _) = app.register("bad@example.com").await;

    let (status, body) = app.get(uri, &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_ERROR");
}

#[rstest]
#[case("", 30)]
#[case("?period=7", 7)]
#[case("?period=90", 90)]
#[case("?period=365", 365)]
#[tokio::test]
async fn test_chart_data_has_one_label_per_day(#[case] query: &str, #[case] days: usize) {
    let app = TestApp::new().await;
    let (token, _) = app.register("chart@example.com").await;

    let (status, body) = app
        .get(&format!("/api/dashboard/chart-data/{query}"), &token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["labels"].as_array().unwrap().len(), days);
    assert_eq!(body["income_data"].as_array().unwrap().len(), days);
    assert_eq!(body["expense_data"].as_array().unwrap().len(), days);
}

#[tokio::test]
async fn test_chart_data_buckets_by_day() {
    let app = TestApp::new().await;
    let (token, _) = app.register("buckets@example.com").await;
    let today = app.state.today();

    app.add_transaction(&token, "income", "2", "USD", today).await;
    app.add_transaction(&token, "expense", "5000", "UZS", today).await;
    app.add_transaction(&token, "expense", "1000", "UZS", today - Duration::days(1))
        .await;
    app.add_transaction(&token, "expense", "9999", "UZS", today - Duration::days(10))
        .await;

    let (_, body) = app.get("/api/dashboard/chart-data/?period=7", &token).await;
    let labels = body["labels"].as_array().unwrap();
    assert_eq!(labels[6], today.format("%m-%d").to_string());

    let income = body["income_data"].as_array().unwrap();
    let expense = body["expense_data"].as_array().unwrap();
    assert_eq!(decimal(&income[6]), dec!(25000));
    assert_eq!(decimal(&expense[6]), dec!(5000));
    assert_eq!(decimal(&expense[5]), dec!(1000));
    let week_total: rust_decimal::Decimal = expense.iter().map(decimal).sum();
    assert_eq!(week_total, dec!(6000));
}

#[tokio::test]
async fn test_category_stats_percentages() {
    let app = TestApp::new().await;
    let (token, _) = app.register("stats@example.com").await;
    let today = app.state.today();

    let mut ids = Vec::new();
    for name in ["Food", "Transport"] {
        let (status, body) = app
            .post(
                "/api/categories/",
                &token,
                json!({ "name": name, "type": "expense", "color": "#10B981" }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    for (amount, category) in [("300", &ids[0]), ("100", &ids[0]), ("100", &ids[1])] {
        let (status, _) = app
            .post(
                "/api/transactions/",
                &token,
                json!({
                    "type": "expense",
                    "amount": amount,
                    "category_id": category,
                    "date": today.to_string(),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app
        .get("/api/dashboard/category-stats/?period=year", &token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let stats = body.as_array().unwrap();
    assert_eq!(stats.len(), 2);
    assert_eq!(stats[0]["name"], "Food");
    assert_eq!(stats[0]["count"], 2);
    assert_eq!(stats[0]["color"], "#10b981");
    assert_eq!(decimal(&stats[0]["total"]), dec!(400));
    assert_eq!(decimal(&stats[0]["percentage"]), dec!(80));
    assert_eq!(decimal(&stats[1]["percentage"]), dec!(20));

    let (_, income) = app
        .get("/api/dashboard/category-stats/?type=income", &token)
        .await;
    assert_eq!(income, json!([]));
}

#[tokio::test]
async fn test_dashboard_never_mixes_users() {
    let app = TestApp::new().await;
    let (alice, _) = app.register("alice@example.com").await;
    let (bob, _) = app.register("bob@example.com").await;
    let today = app.state.today();

    app.add_transaction(&alice, "income", "1000", "USD", today).await;

    let (_, body) = app.get("/api/dashboard/summary/", &bob).await;
    assert_eq!(decimal(&body["total_income"]), dec!(0));
    assert_eq!(body["recent_transactions"], json!([]));

    let (_, chart) = app.get("/api/dashboard/chart-data/?period=7", &bob).await;
    let income: rust_decimal::Decimal = chart["income_data"]
        .as_array()
        .unwrap()
        .iter()
        .map(decimal)
        .sum();
    assert_eq!(income, dec!(0));

    let (_, body) = app.get("/api/dashboard/summary/", &alice).await;
    assert_eq!(decimal(&body["total_income"]), dec!(12500000));
}

#[tokio::test]
async fn test_category_stats_never_mix_users() {
    let app = TestApp::new().await;
    let (alice, _) = app.register("alice@example.com").await;
    let (bob, _) = app.register("bob@example.com").await;
    let today = app.state.today();

    let (status, body) = app
        .post(
            "/api/categories/",
            &alice,
            json!({ "name": "Kafe", "type": "expense" }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let kafe = body["id"].as_str().unwrap().to_string();

    for amount in ["250000", "75000"] {
        let (status, _) = app
            .post(
                "/api/transactions/",
                &alice,
                json!({
                    "type": "expense",
                    "amount": amount,
                    "category_id": kafe,
                    "date": today.to_string(),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, stats) = app
        .get("/api/dashboard/category-stats/?period=year", &bob)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats, json!([]));

    let (status, body) = app
        .post(
            "/api/transactions/",
            &bob,
            json!({
                "type": "expense",
                "amount": "1000",
                "category_id": kafe,
                "date": today.to_string(),
            }),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");

    let (_, stats) = app
        .get("/api/dashboard/category-stats/?period=year", &bob)
        .await;
    assert_eq!(stats, json!([]));

    let (_, stats) = app
        .get("/api/dashboard/category-stats/?period=year", &alice)
        .await;
    assert_eq!(stats.as_array().unwrap().len(), 1);
    assert_eq!(stats[0]["count"], 2);
    assert_eq!(decimal(&stats[0]["total"]), dec!(325000));
}
