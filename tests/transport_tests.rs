use std::net::TcpListener;

use ingredient_check::{
    dom::document::{Display, Document},
    form::{
        form_data::FormData,
        form_model::{FileUpload, FormField},
    },
    page::{
        controller::{SubmissionController, SubmitEvent},
        error::PageError,
        ui_state::UiState,
    },
    trace::logger::TraceLogger,
    transport::http::{HttpResponse, HttpTransport, Transport, decode_markup},
};

use crate::common::{
    backend::OneShotBackend,
    utils::{ERROR_PARAGRAPH, SCENARIO_A_MARKUP, ids, ingredient_doc},
};

mod common;

// =========================================================================
// Wire format
// =========================================================================

#[test]
fn posts_multipart_form_to_process_path() {
    let backend = OneShotBackend::start(200, "OK", r#""<p>3 matches</p>""#);
    let transport = HttpTransport::new(&backend.base_url).unwrap();

    let data = FormData::capture(&[
        FormField::text("ingredients", "tomato"),
        FormField::file(
            "photo",
            vec![FileUpload::new("label.txt", Some("text/plain"), b"E621".to_vec())],
        ),
    ]);

    let response = transport.post_form("/process", &data).unwrap();
    assert_eq!(response, HttpResponse::new(200, r#""<p>3 matches</p>""#));

    let request = backend.received();
    assert!(request.starts_with("POST /process HTTP/1.1"), "{}", request);
    assert!(
        request.to_lowercase().contains("content-type: multipart/form-data; boundary="),
        "{}",
        request
    );
    assert!(request.contains(r#"name="ingredients""#));
    assert!(request.contains("tomato"));
    assert!(request.contains(r#"name="photo"; filename="label.txt""#));
    assert!(request.contains("E621"));
}

#[test]
fn url_join_handles_slashes() {
    let transport = HttpTransport::new("http://localhost:5000/").unwrap();
    assert_eq!(transport.url_for("/process"), "http://localhost:5000/process");
    assert_eq!(transport.url_for("process"), "http://localhost:5000/process");
}

#[test]
fn unreachable_backend_is_a_transport_error() {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let transport = HttpTransport::new(&format!("http://127.0.0.1:{}", port)).unwrap();

    let result = transport.post_form("/process", &FormData::new());
    assert!(matches!(result, Err(PageError::Transport(_))));
}

// =========================================================================
// Response contract
// =========================================================================

#[test]
fn decode_requires_status_200() {
    for status in [201, 400, 500] {
        let result = decode_markup(HttpResponse::new(status, r#""<p>x</p>""#));
        match result {
            Err(PageError::HttpStatus { status: s, .. }) => assert_eq!(s, status),
            other => panic!("Expected HttpStatus, got {:?}", other),
        }
    }
}

#[test]
fn decode_rejects_non_string_json() {
    for body in ["", "null", "42", r#"["<p>x</p>"]"#, r#"{"error": "No valid text input provided"}"#] {
        assert!(
            matches!(decode_markup(HttpResponse::new(200, body)), Err(PageError::ResponseShape { .. })),
            "body {:?} should be rejected",
            body
        );
    }
}

// =========================================================================
// End to end over a socket
// =========================================================================

#[test]
fn scenario_a_over_http() {
    let backend = OneShotBackend::start(200, "OK", r#""<p>3 matches</p>""#);
    let transport = HttpTransport::new(&backend.base_url).unwrap();
    let mut doc = ingredient_doc("tomato");
    let mut controller = SubmissionController::default();

    let state = controller
        .submit(
            &mut SubmitEvent::new(&ids().form_id),
            &mut doc,
            &transport,
            &TraceLogger::disabled(),
        )
        .unwrap()
        .clone();

    assert!(matches!(state, UiState::Success(_)));
    assert_eq!(doc.inner_html(&ids().results_id).unwrap(), SCENARIO_A_MARKUP);
    assert_eq!(doc.display(&ids().spinner_id).unwrap(), Some(Display::None));
    assert!(backend.received().contains("tomato"));
}

#[test]
fn scenario_b_over_http() {
    let backend = OneShotBackend::start(
        500,
        "Internal Server Error",
        r#"{"error": "An error occurred while communicating with the OpenAI API."}"#,
    );
    let transport = HttpTransport::new(&backend.base_url).unwrap();
    let mut doc = ingredient_doc("tomato");
    let mut controller = SubmissionController::default();

    controller
        .submit(
            &mut SubmitEvent::new(&ids().form_id),
            &mut doc,
            &transport,
            &TraceLogger::disabled(),
        )
        .unwrap();

    assert_eq!(doc.inner_html(&ids().results_id).unwrap(), ERROR_PARAGRAPH);
    assert_eq!(doc.display(&ids().spinner_id).unwrap(), Some(Display::None));
}
