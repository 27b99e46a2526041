//! Bank Verification

use super::{HttpRequest, Transport, CSRF_HEADER};
use crate::error::FormError;
use crate::models::BankVerifyResponse;

pub async fn verify_bank<T: Transport>(
    transport: &T,
    endpoint: &str,
    account_number: &str,
    ifsc_code: &str,
    csrf: Option<&str>,
) -> Result<BankVerifyResponse, FormError> {
    let mut request = HttpRequest::post_form(endpoint, &[("account_number", account_number), ("ifsc_code", ifsc_code)]);
    if let Some(token) = csrf {
        request = request.header(CSRF_HEADER, token);
    }
    let response = transport.send(request).await?;
    match serde_json::from_str::<BankVerifyResponse>(&response.body) {
        Ok(parsed) => Ok(parsed),
        Err(_) if !response.is_success() => Err(FormError::Status(response.status)),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::testing::FakeTransport;

    #[test]
    fn test_verify_returns_message() {
        let transport = FakeTransport::default()
            .reply("/verify-bank/", 200, r#"{"success": false, "message": "Invalid account details."}"#);
        let reply = block_on(verify_bank(&transport, "/verify-bank/", "0012", "SBIN0000001", Some("tok"))).unwrap();
        assert!(!reply.success);
        assert_eq!(reply.message, "Invalid account details.");

        let requests = transport.requests.borrow();
        let sent = &requests[0];
        assert_eq!(sent.body.as_deref(), Some("account_number=0012&ifsc_code=SBIN0000001"));
        assert_eq!(sent.header_value(CSRF_HEADER), Some("tok"));
    }
}
