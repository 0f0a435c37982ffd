#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use base64::{engine::general_purpose, Engine as _};
    use std::sync::Arc;
    use tower::ServiceExt;

    use imprint::api::{build_router, AppState};
    use imprint::common::config::ServerSettings;
    use imprint::{Fingerprinter, ImprintService, RenderPipeline, StegoCodec};

    const BOUNDARY: &str = "imprint-test-boundary";

    fn app_with(settings: ServerSettings) -> Router {
        let service = ImprintService::new(
            Fingerprinter::default(),
            RenderPipeline::default(),
            StegoCodec::new(1000),
        );
        build_router(Arc::new(AppState { service, settings }))
    }

    fn app() -> Router {
        app_with(ServerSettings::default())
    }

    fn create_request(body: serde_json::Value) -> Request<Body> {
        Request::post("/api/v1/imprint")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn parse_request(file: &[u8], password: Option<&str>) -> Request<Body> {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"imprint.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(file);
        body.extend_from_slice(b"\r\n");
        if let Some(password) = password {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"password\"\r\n\r\n{password}\r\n"
                )
                .as_bytes(),
            );
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        Request::post("/api/v1/imprint/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap()
    }

    async fn json_body(response: axum::response::Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create_png(app: Router, text: &str, password: Option<&str>) -> Vec<u8> {
        let response = app
            .oneshot(create_request(serde_json::json!({ "text": text, "password": password })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_create_then_parse() {
        let png = create_png(app(), "Hello, world!", None).await;

        let response = app().oneshot(parse_request(&png, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(json_body(response).await["text"], "Hello, world!");
    }

    #[tokio::test]
    async fn test_password_errors() {
        let png = create_png(app(), "secret", Some("pw")).await;

        let missing = app().oneshot(parse_request(&png, None)).await.unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);
        assert!(json_body(missing).await["error"].is_string());

        let wrong = app().oneshot(parse_request(&png, Some("nope"))).await.unwrap();
        assert_eq!(wrong.status(), StatusCode::FORBIDDEN);

        let right = app().oneshot(parse_request(&png, Some("pw"))).await.unwrap();
        assert_eq!(right.status(), StatusCode::OK);
        assert_eq!(json_body(right).await["text"], "secret");
    }

    #[tokio::test]
    async fn test_json_response_on_request() {
        let request = Request::post("/api/v1/imprint")
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::ACCEPT, "application/json")
            .body(Body::from(
                serde_json::json!({ "text": "as json", "drawers": [{ "kind": "core" }] }).to_string(),
            ))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(body["canvas_size"], 1000);
        assert_eq!(body["hash"].as_str().unwrap().len(), 32);
        let png = general_purpose::STANDARD
            .decode(body["image_base64"].as_str().unwrap())
            .unwrap();

        let parsed = app().oneshot(parse_request(&png, None)).await.unwrap();
        assert_eq!(json_body(parsed).await["text"], "as json");
    }

    #[tokio::test]
    async fn test_unbounded_drawer_overrides_are_rejected() {
        let bodies = [
            serde_json::json!({ "text": "x", "drawers": [{ "kind": "kaleidoscope", "density": 4000000000u64 }] }),
            serde_json::json!({ "text": "x", "drawers": [{ "kind": "crystal", "density": 801 }] }),
            serde_json::json!({ "text": "x", "drawers": [{ "kind": "flow", "line_width": 1e9 }] }),
            serde_json::json!({ "text": "x", "drawers": vec![serde_json::json!({ "kind": "core" }); 9] }),
        ];
        for body in bodies {
            let response = app().oneshot(create_request(body)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
            assert!(json_body(response).await["error"].is_string());
        }
    }

    #[tokio::test]
    async fn test_bounded_drawer_overrides_are_accepted() {
        let body = serde_json::json!({
            "text": "bounded",
            "drawers": [{ "kind": "kaleidoscope", "density": 1000, "line_width": 3.0 }]
        });
        let response = app().oneshot(create_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let response = app()
            .oneshot(create_request(serde_json::json!({ "text": "" })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() {
        let settings = ServerSettings {
            max_text_bytes: 16,
            ..ServerSettings::default()
        };
        let response = app_with(settings)
            .oneshot(create_request(serde_json::json!({ "text": "x".repeat(17) })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_oversized_upload_is_rejected() {
        let settings = ServerSettings {
            max_upload_bytes: 1024,
            ..ServerSettings::default()
        };
        let response = app_with(settings)
            .oneshot(parse_request(&vec![0u8; 4096], None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_non_png_upload_is_rejected() {
        let response = app()
            .oneshot(parse_request(b"GIF89a not really", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_missing_file_field() {
        let body = format!("--{BOUNDARY}--\r\n");
        let request = Request::post("/api/v1/imprint/parse")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={BOUNDARY}"),
            )
            .body(Body::from(body))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_plain_png_without_imprint() {
        let mut png = Vec::new();
        image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            30,
            30,
            image::Rgb([255, 255, 255]),
        ))
        .write_to(&mut std::io::Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .unwrap();

        let response = app().oneshot(parse_request(&png, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
