//! Customer Form Submission
//!
//! Posts the customer form and interprets the JSON reply.

use super::{HttpRequest, Transport, CSRF_HEADER};
use crate::error::FormError;
use crate::models::SubmitResponse;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CustomerForm {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerForm {
    pub fn to_request(&self, endpoint: &str, csrf: Option<&str>) -> HttpRequest {
        let request = HttpRequest::post_form(
            endpoint,
            &[("name", self.name.as_str()), ("email", self.email.as_str()), ("phone_number", self.phone.as_str())],
        )
        .header("Accept", "application/json")
        .header("X-Requested-With", "XMLHttpRequest");
        match csrf {
            Some(token) => request.header(CSRF_HEADER, token),
            None => request,
        }
    }
}

/// What the page should do after a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Accepted { message: Option<String>, next_url: Option<String> },
    Rejected { message: String },
}

pub fn interpret(response: SubmitResponse) -> SubmitOutcome {
    if response.success {
        return SubmitOutcome::Accepted { message: response.message, next_url: response.next_url };
    }
    let detail = match (&response.errors, &response.message) {
        (Some(errors), _) => errors.to_string(),
        (None, Some(message)) => message.clone(),
        (None, None) => "submission was rejected".to_string(),
    };
    SubmitOutcome::Rejected { message: format!("Error: {}", detail) }
}

pub async fn submit_customer<T: Transport>(
    transport: &T,
    endpoint: &str,
    form: &CustomerForm,
    csrf: Option<&str>,
) -> Result<SubmitOutcome, FormError> {
    let response = transport.send(form.to_request(endpoint, csrf)).await?;
    // Validation failures come back as JSON with a 4xx status
    match serde_json::from_str::<SubmitResponse>(&response.body) {
        Ok(parsed) => Ok(interpret(parsed)),
        Err(_) if !response.is_success() => Err(FormError::Status(response.status)),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::testing::FakeTransport;

    fn form() -> CustomerForm {
        CustomerForm { name: "Asha".into(), email: "asha@example.com".into(), phone: "9876543210".into() }
    }

    #[test]
    fn test_success_navigates_to_next_url() {
        let transport = FakeTransport::default().reply("/customer/", 200, r#"{"success": true, "next_url": "/x"}"#);
        let outcome = block_on(submit_customer(&transport, "/carify/form/customer/", &form(), Some("tok"))).unwrap();
        assert_eq!(outcome, SubmitOutcome::Accepted { message: None, next_url: Some("/x".into()) });

        let requests = transport.requests.borrow();
        let sent = &requests[0];
        assert_eq!(sent.header_value(CSRF_HEADER), Some("tok"));
        assert_eq!(sent.body.as_deref(), Some("name=Asha&email=asha%40example.com&phone_number=9876543210"));
    }

    #[test]
    fn test_rejection_shows_errors() {
        let transport = FakeTransport::default().reply("/customer/", 400, r#"{"success": false, "errors": {"email": ["invalid"]}}"#);
        let outcome = block_on(submit_customer(&transport, "/carify/form/customer/", &form(), None)).unwrap();
        match outcome {
            SubmitOutcome::Rejected { message } => {
                assert!(message.starts_with("Error: "));
                assert!(message.contains("invalid"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(transport.requests.borrow()[0].header_value(CSRF_HEADER), None);
    }

    #[test]
    fn test_rejection_falls_back_to_message() {
        let outcome = interpret(SubmitResponse { message: Some("Customer ID not found".into()), ..Default::default() });
        assert_eq!(outcome, SubmitOutcome::Rejected { message: "Error: Customer ID not found".into() });
    }

    #[test]
    fn test_non_json_error_page() {
        let transport = FakeTransport::default().reply("/customer/", 500, "<html>Server Error</html>");
        let err = block_on(submit_customer(&transport, "/carify/form/customer/", &form(), None)).unwrap_err();
        assert_eq!(err, FormError::Status(500));
    }

    #[test]
    fn test_transport_failure_propagates() {
        let transport = FakeTransport::default().fail("/customer/", FormError::Timeout(10_000));
        let err = block_on(submit_customer(&transport, "/carify/form/customer/", &form(), None)).unwrap_err();
        assert_eq!(err, FormError::Timeout(10_000));
    }
}
