//! Integration tests for POST /api/v1/profile/otp

mod common;

#[cfg(test)]
mod tests {
    use actix_web::http::{header, StatusCode};
    use actix_web::test;
    use chrono::{Duration, Utc};
    use serde_json::{json, Value};

    use pd_api::create_app;
    use pd_core::{OtpSessionState, OtpSessionStore, SentOtp, User};

    use super::common::TestContext;

    const MOBILE: &str = "09123456789";

    #[actix_web::test]
    async fn test_first_send_calls_provider_and_records_session() {
        let ctx = TestContext::new(false).await;
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
            .set_json(json!({ "mobile": MOBILE }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "success");
        assert!(body["data"]["message"].as_str().unwrap().contains(MOBILE));
        assert!(body["data"]["resend_after"].as_u64().unwrap() <= 60);

        assert_eq!(
            ctx.provider.sent().await,
            vec![SentOtp {
                mobile: MOBILE.to_string(),
                is_resend: true
            }]
        );
        assert!(ctx.sessions.get("sess-1").await.unwrap().otp_last_sent_at.is_some());
    }

    #[actix_web::test]
    async fn test_second_send_within_window_is_throttled() {
        let ctx = TestContext::new(false).await;
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        for expected in [StatusCode::OK, StatusCode::TOO_MANY_REQUESTS] {
            let req = test::TestRequest::post()
                .uri("/api/v1/profile/otp")
                .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
                .set_json(json!({ "mobile": MOBILE }))
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), expected);

            if expected == StatusCode::TOO_MANY_REQUESTS {
                let retry_after: u64 = resp
                    .headers()
                    .get(header::RETRY_AFTER)
                    .unwrap()
                    .to_str()
                    .unwrap()
                    .parse()
                    .unwrap();
                assert!((59..=60).contains(&retry_after));

                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["error"]["code"], "OTP_COOLDOWN");
                assert_eq!(body["error"]["context"]["seconds_left"], retry_after);
            }
        }

        assert_eq!(ctx.provider.send_count().await, 1);
    }

    #[actix_web::test]
    async fn test_cooldown_reports_remaining_seconds() {
        let ctx = TestContext::new(false).await;
        ctx.sessions
            .store("sess-1", &OtpSessionState::sent_at(Utc::now() - Duration::seconds(30)))
            .await
            .unwrap();
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
            .set_json(json!({ "mobile": MOBILE }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(resp.headers().get(header::RETRY_AFTER).unwrap(), "30");
        assert_eq!(ctx.provider.send_count().await, 0);
    }

    #[actix_web::test]
    async fn test_cooldown_is_scoped_to_session() {
        let ctx = TestContext::new(false).await;
        ctx.sessions
            .store("sess-1", &OtpSessionState::sent_at(Utc::now()))
            .await
            .unwrap();
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-2")))
            .set_json(json!({ "mobile": MOBILE }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(ctx.provider.send_count().await, 1);
    }

    #[actix_web::test]
    async fn test_provider_failure_returns_bad_gateway_and_keeps_session() {
        let ctx = TestContext::new(false).await;
        ctx.provider.set_send_failure(true);
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
            .set_json(json!({ "mobile": MOBILE }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "OTP_PROVIDER_ERROR");
        assert!(ctx.sessions.get("sess-1").await.is_none());
    }

    #[actix_web::test]
    async fn test_malformed_mobile_is_rejected_before_sending() {
        let ctx = TestContext::new(false).await;
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
            .insert_header((header::ACCEPT_LANGUAGE, "fa-IR"))
            .set_json(json!({ "mobile": "9123456789" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["fields"]["mobile"][0], "فرمت موبایل صحیح نمی‌باشد.");
        assert_eq!(ctx.provider.send_count().await, 0);
    }

    #[actix_web::test]
    async fn test_mobile_held_by_another_user_is_rejected() {
        let ctx = TestContext::new(false).await;
        ctx.users.insert(User::new("Other", "Admin", MOBILE, "hash")).await;
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
            .set_json(json!({ "mobile": MOBILE }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert!(body["error"]["fields"]["mobile"].is_array());
        assert_eq!(ctx.provider.send_count().await, 0);
    }

    #[actix_web::test]
    async fn test_verified_user_cannot_request_code() {
        let ctx = TestContext::new(true).await;
        let app = test::init_service(create_app(ctx.data.clone(), &ctx.settings)).await;

        let req = test::TestRequest::post()
            .uri("/api/v1/profile/otp")
            .insert_header((header::AUTHORIZATION, ctx.bearer("sess-1")))
            .set_json(json!({ "mobile": MOBILE }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "MOBILE_ALREADY_VERIFIED");
        assert_eq!(ctx.provider.send_count().await, 0);
    }
}
