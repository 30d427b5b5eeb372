//! Reporting of remote call results for both AWS services.
//!
//! Every subcommand makes exactly one call to AWS, and the result of that
//! call is turned into an `Outcome` here. Failures returned by AWS are never
//! fatal to the process; they're decoded into a readable line by consulting
//! a single table of known error codes.
use quick_xml::events::Event;
use quick_xml::Reader;
use rusoto_core::RusotoError;
use serde::Deserialize;

use std::error::Error;
use std::fmt::Debug;

/// Known remote error codes, as `(code, description)` pairs.
///
/// Rusoto names its typed error variants after these codes with any
/// `Exception` suffix stripped, so lookups accept either spelling.
pub const ERROR_CODES: &[(&str, &str)] = &[
    // glacier
    ("InsufficientCapacityException", "not enough capacity to process the job"),
    ("InvalidParameterValueException", "a parameter of the request is incorrect"),
    ("LimitExceededException", "the request would exceed a service limit"),
    ("MissingParameterValueException", "a required header or parameter is missing"),
    ("PolicyEnforcedException", "the request violates the data retrieval policy"),
    ("RequestTimeoutException", "the upload took too long to complete"),
    ("ResourceNotFoundException", "the vault, job or lock does not exist"),
    ("ServiceUnavailableException", "the service cannot complete the request"),
    // s3
    ("BucketAlreadyExists", "the bucket name is already taken"),
    ("BucketAlreadyOwnedByYou", "the bucket already exists and you own it"),
    ("NoSuchBucket", "the bucket does not exist"),
    ("NoSuchKey", "the object key does not exist"),
];

/// Looks up a known error code, returning the canonical code and description.
pub fn lookup(code: &str) -> Option<(&'static str, &'static str)> {
    ERROR_CODES
        .iter()
        .find(|(known, _)| *known == code || known.trim_end_matches("Exception") == code)
        .copied()
}

/// The printable result of a single remote call.
#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// The call succeeded; contains the rendered response.
    Success(String),
    /// The call failed; contains the decoded error line.
    Failure(String),
}

impl Outcome {
    /// Creates an `Outcome` from the result of a Rusoto call.
    pub fn from_result<T, E>(result: Result<T, RusotoError<E>>) -> Outcome
    where
        T: Debug,
        E: Error + Debug + 'static,
    {
        match result {
            Ok(output) => Outcome::Success(format!("{:#?}", output)),
            Err(err) => Outcome::Failure(describe(&err)),
        }
    }

    /// Creates an `Outcome` from a Rusoto call with an empty response.
    ///
    /// The provided message is used as the text of a successful call.
    pub fn from_unit<E>(result: Result<(), RusotoError<E>>, message: String) -> Outcome
    where
        E: Error + Debug + 'static,
    {
        match result {
            Ok(()) => Outcome::Success(message),
            Err(err) => Outcome::Failure(describe(&err)),
        }
    }

    /// Returns true if the remote call succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    /// Returns the rendered text of this outcome.
    pub fn text(&self) -> &str {
        match self {
            Outcome::Success(text) | Outcome::Failure(text) => text,
        }
    }

    /// Prints this outcome to the terminal.
    pub fn print(&self) {
        if self.is_success() {
            info!("{}", self.text());
        } else {
            error!("{}", self.text());
        }
    }
}

/// Formats a Rusoto error into a single readable line.
///
/// Typed service errors and unparsed error bodies are both checked for a
/// known error code; anything else falls through to the raw message.
pub fn describe<E>(err: &RusotoError<E>) -> String
where
    E: Error + Debug + 'static,
{
    match err {
        RusotoError::Service(service) => {
            // typed errors render as `Variant("message")` under Debug
            let debug = format!("{:?}", service);
            let variant = debug.split('(').next().unwrap_or_default();

            match lookup(variant) {
                Some(known) => format_known(known, &service.to_string()),
                None => service.to_string(),
            }
        }
        RusotoError::Unknown(response) => {
            let body = String::from_utf8_lossy(&response.body);
            match parse_body(&body) {
                Some((code, message)) => match lookup(&code) {
                    Some(known) => format_known(known, &message),
                    None => format!("{}: {}", code, message),
                },
                None if body.trim().is_empty() => {
                    format!("request failed with status {}", response.status)
                }
                None => body.into_owned(),
            }
        }
        _ => err.to_string(),
    }
}

/// Formats a known error code with its description and message.
fn format_known((code, description): (&str, &str), message: &str) -> String {
    format!("{} ({}): {}", code, description, message)
}

/// JSON error body as returned by Glacier.
#[derive(Deserialize)]
struct JsonError {
    #[serde(alias = "Code", alias = "__type")]
    code: String,
    #[serde(default, alias = "Message")]
    message: String,
}

/// Attempts to pull an error code and message from a raw error body.
///
/// S3 errors arrive as XML documents containing `Code` and `Message`
/// nodes, while Glacier errors arrive as JSON objects.
pub fn parse_body(body: &str) -> Option<(String, String)> {
    let body = body.trim();

    if body.starts_with('{') {
        let error: JsonError = serde_json::from_str(body).ok()?;
        return Some((error.code, error.message));
    }

    if !body.starts_with('<') {
        return None;
    }

    // create an XML reader and buffer
    let mut reader = Reader::from_str(body);
    let mut buffer = Vec::new();

    let mut code = None;
    let mut message = String::new();

    loop {
        // parse through each XML node event
        match reader.read_event(&mut buffer) {
            // end, or error, just give up
            Ok(Event::Eof) | Err(_) => break,

            // capture the code and message tags
            Ok(Event::Start(ref e)) if e.name() == b"Code" => {
                code = reader.read_text(b"Code", &mut Vec::new()).ok();
            }
            Ok(Event::Start(ref e)) if e.name() == b"Message" => {
                message = reader
                    .read_text(b"Message", &mut Vec::new())
                    .unwrap_or_default();
            }

            // skip
            _ => (),
        }
        // empty buffers
        buffer.clear();
    }

    code.map(|code| (code, message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusoto_glacier::{CreateVaultError, CreateVaultOutput};
    use rusoto_s3::CreateBucketError;

    #[test]
    fn looking_up_codes() {
        let (code, _) = super::lookup("ResourceNotFound").unwrap();
        assert_eq!(code, "ResourceNotFoundException");

        let (code, _) = super::lookup("ResourceNotFoundException").unwrap();
        assert_eq!(code, "ResourceNotFoundException");

        let (code, _) = super::lookup("NoSuchBucket").unwrap();
        assert_eq!(code, "NoSuchBucket");

        assert!(super::lookup("Teapot").is_none());
    }

    #[test]
    fn describing_glacier_service_errors() {
        let err: RusotoError<CreateVaultError> =
            RusotoError::Service(CreateVaultError::LimitExceeded("too many vaults".into()));

        let line = super::describe(&err);

        assert!(line.starts_with("LimitExceededException ("));
        assert!(line.ends_with("too many vaults"));
    }

    #[test]
    fn describing_s3_service_errors() {
        let err: RusotoError<CreateBucketError> = RusotoError::Service(
            CreateBucketError::BucketAlreadyOwnedByYou("bucket1".into()),
        );

        let line = super::describe(&err);

        assert!(line.starts_with("BucketAlreadyOwnedByYou ("));
        assert!(line.ends_with("bucket1"));
    }

    #[test]
    fn describing_validation_errors() {
        let err: RusotoError<CreateVaultError> =
            RusotoError::Validation("vault name is invalid".into());

        assert!(super::describe(&err).contains("vault name is invalid"));
    }

    #[test]
    fn parsing_xml_bodies() {
        let body = r#"<?xml version="1.0" encoding="UTF-8"?>
            <Error>
                <Code>NoSuchBucket</Code>
                <Message>The specified bucket does not exist</Message>
                <BucketName>bucket1</BucketName>
            </Error>"#;

        let (code, message) = super::parse_body(body).unwrap();

        assert_eq!(code, "NoSuchBucket");
        assert_eq!(message, "The specified bucket does not exist");
    }

    #[test]
    fn parsing_json_bodies() {
        let body = r#"{"code":"ResourceNotFoundException","message":"Vault not found","type":"Client"}"#;

        let (code, message) = super::parse_body(body).unwrap();

        assert_eq!(code, "ResourceNotFoundException");
        assert_eq!(message, "Vault not found");
    }

    #[test]
    fn parsing_opaque_bodies() {
        assert!(super::parse_body("").is_none());
        assert!(super::parse_body("Bad Gateway").is_none());
        assert!(super::parse_body("<html></html>").is_none());
    }

    #[test]
    fn creating_outcomes() {
        let success: Result<_, RusotoError<CreateVaultError>> = Ok(CreateVaultOutput {
            location: Some("/111122223333/vaults/vault1".into()),
        });
        let outcome = Outcome::from_result(success);

        assert!(outcome.is_success());
        assert!(outcome.text().contains("/111122223333/vaults/vault1"));

        let failure: Result<CreateVaultOutput, _> = Err(RusotoError::Service(
            CreateVaultError::ServiceUnavailable("try again".into()),
        ));
        let outcome = Outcome::from_result(failure);

        assert!(!outcome.is_success());
        assert!(outcome.text().starts_with("ServiceUnavailableException"));
    }
}
