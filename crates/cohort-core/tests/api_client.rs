//! ApiClient against a wiremock server standing in for the dashboard backend.

use cohort_core::api::{ApiClient, ApiError, Backend};
use cohort_core::uploads::UploadFile;
use cohort_protocol::{DeleteCandidateRequest, DeleteProgramRequest, JobMode, StartJobRequest};
use serde_json::json;
use wiremock::matchers::{body_json, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn client(server: &MockServer) -> ApiClient {
    ApiClient::with_base_url(&server.uri(), None).unwrap()
}

#[tokio::test]
async fn list_programs_decodes_rows() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/programs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {
                "name": "Alpha",
                "total_candidates": 10,
                "female_count": 7,
                "female_percent": 70.0,
                "pwd_count": 1,
                "pwd_percent": 10.0,
                "meets_female_target": true,
                "meets_pwd_target": true
            }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let programs = client(&server).list_programs().await.unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0].name, "Alpha");
    assert_eq!(programs[0].female_count, 7);
}

#[tokio::test]
async fn program_name_is_percent_encoded_in_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/program/Data%20Science"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"Candidate ID": 7, "First Name": "Lerato", "Surname": "Khumalo"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let candidates = client(&server)
        .program_candidates("Data Science")
        .await
        .unwrap();
    assert_eq!(candidates[0].candidate_id(), "7");
    assert_eq!(candidates[0].full_name(), "Lerato Khumalo");
}

#[tokio::test]
async fn error_status_surfaces_json_error_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/program/Ghost"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "Program not found"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).program_candidates("Ghost").await.unwrap_err();
    match err {
        ApiError::Status { status, message } => {
            assert_eq!(status, 404);
            assert_eq!(message, "Program not found");
        }
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn error_status_with_plain_body_keeps_raw_text() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/candidates"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = client(&server).list_candidates().await.unwrap_err();
    assert_eq!(err.status(), Some(502));
    assert_eq!(err.to_string(), "Server returned 502: upstream down");
}

#[tokio::test]
async fn undecodable_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/dashboard/metrics"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client(&server).dashboard_metrics().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let api = ApiClient::with_base_url(&uri, None).unwrap();
    let err = api.list_programs().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport { .. }));
}

#[tokio::test]
async fn delete_candidate_posts_id_and_program() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/candidates/delete"))
        .and(body_json(json!({"candidate_id": "123", "program": "Alpha"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"success": true, "message": "Candidate deleted successfully"}),
        ))
        .expect(1)
        .mount(&server)
        .await;

    let response = client(&server)
        .delete_candidate(&DeleteCandidateRequest {
            candidate_id: "123".to_string(),
            program: "Alpha".to_string(),
        })
        .await
        .unwrap();
    assert!(response.success);
}

#[tokio::test]
async fn delete_with_success_false_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/programs/delete"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": false, "message": "Program is locked"})),
        )
        .mount(&server)
        .await;

    let err = client(&server)
        .delete_program(&DeleteProgramRequest {
            program_name: "Alpha".to_string(),
        })
        .await
        .unwrap_err();
    match err {
        ApiError::Rejected { message } => assert_eq!(message, "Program is locked"),
        other => panic!("expected rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn upload_interview_file_returns_preview() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interview-emails/upload"))
        .and(header_exists("content-type"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job-1",
            "preview_rows": [
                {"index": 0, "name": "Ayanda", "surname": "Zulu", "email": "a@z.org",
                 "decision": "Proceed", "feedback": "Strong interview"}
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let file = UploadFile::new("outcomes.csv", b"Name,Email\n".to_vec()).unwrap();
    let upload = client(&server).upload_interview_file(&file).await.unwrap();
    assert_eq!(upload.job_id, "job-1");
    assert_eq!(upload.preview_rows[0].decision, "Proceed");
}

#[tokio::test]
async fn upload_missing_columns_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interview-emails/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "Missing required columns",
            "missing": ["email", "decision"]
        })))
        .mount(&server)
        .await;

    let file = UploadFile::new("outcomes.csv", Vec::new()).unwrap();
    let err = client(&server).upload_interview_file(&file).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Server returned 400: Missing required columns: email, decision"
    );
}

#[tokio::test]
async fn upload_error_in_ok_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interview-emails/upload"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"error": "Failed to parse file: bad header"})),
        )
        .mount(&server)
        .await;

    let file = UploadFile::new("outcomes.csv", Vec::new()).unwrap();
    let err = client(&server).upload_interview_file(&file).await.unwrap_err();
    match err {
        ApiError::Rejected { message } => {
            assert_eq!(message, "Failed to parse file: bad header")
        }
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn upload_missing_columns_in_ok_body_are_listed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interview-emails/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Missing required columns",
            "missing": ["feedback"]
        })))
        .mount(&server)
        .await;

    let file = UploadFile::new("outcomes.csv", Vec::new()).unwrap();
    let err = client(&server).upload_interview_file(&file).await.unwrap_err();
    assert!(matches!(
        err,
        ApiError::Rejected { ref message } if message == "Missing required columns: feedback"
    ));
}

#[tokio::test]
async fn start_job_error_in_ok_body_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interview-emails/start"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "job_id": "job-1",
            "error": "Invalid or missing job_id"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = StartJobRequest::new("job-1", JobMode::Generate);
    let err = client(&server).start_interview_job(&request).await.unwrap_err();
    match err {
        ApiError::Rejected { message } => assert_eq!(message, "Invalid or missing job_id"),
        other => panic!("expected Rejected, got {:?}", other),
    }
}

#[tokio::test]
async fn start_job_sends_mode_flags() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/interview-emails/start"))
        .and(body_json(json!({
            "job_id": "job-1",
            "send": false,
            "preview_only": true,
            "filter_decisions": ["Proceed"]
        })))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"job_id": "job-1", "status": "started"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let request =
        StartJobRequest::new("job-1", JobMode::PreviewOnly).with_filter(vec!["Proceed".to_string()]);
    let response = client(&server).start_interview_job(&request).await.unwrap();
    assert_eq!(response.status.as_deref(), Some("started"));
}

#[tokio::test]
async fn job_status_passes_job_id_as_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interview-emails/status"))
        .and(query_param("job_id", "job-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "job-1", "total": 2, "processed": 1, "succeeded": 1, "failed": 0,
            "rows": {"0": {"status": "sent", "message": "Sent"}},
            "finished": false
        })))
        .expect(1)
        .mount(&server)
        .await;

    let status = client(&server).interview_job_status("job-1").await.unwrap();
    assert_eq!(status.processed, 1);
    assert!(!status.finished);
}

#[tokio::test]
async fn upload_program_follows_redirect_to_programs() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-program"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/programs"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/programs"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>programs</html>"))
        .mount(&server)
        .await;

    let file = UploadFile::new("alpha.xlsx", vec![1, 2, 3]).unwrap();
    client(&server).upload_program("Alpha", &file).await.unwrap();
}

#[tokio::test]
async fn upload_program_redirect_back_to_form_is_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload-program"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/upload"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>upload</html>"))
        .mount(&server)
        .await;

    let file = UploadFile::new("alpha.csv", vec![]).unwrap();
    let err = client(&server)
        .upload_program("Alpha", &file)
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::Rejected { .. }));
}

#[tokio::test]
async fn missing_email_logs_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interview-emails/logs"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"error": "No logs available"})),
        )
        .mount(&server)
        .await;

    let err = client(&server).download_email_logs().await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("No logs available"));
}

#[tokio::test]
async fn email_logs_download_returns_csv() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/interview-emails/logs"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "text/csv")
                .set_body_string("timestamp,job_id,status\n2024-05-01,job-1,sent\n"),
        )
        .mount(&server)
        .await;

    let csv = client(&server).download_email_logs().await.unwrap();
    assert!(csv.starts_with("timestamp,job_id,status"));
}
