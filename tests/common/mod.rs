#![allow(dead_code)]

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use netgate::error::{Error, Result};
use netgate::transport::SoapTransport;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A transport double scripted with queued response bodies. Clones share
/// state, so tests keep a handle for inspection after boxing one into a
/// façade.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<State>,
}

#[derive(Default)]
struct State {
    queue: Mutex<VecDeque<String>>,
    calls: Mutex<Vec<RecordedCall>>,
}

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub soap_action: String,
    pub envelope: String,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_response(&self, raw: impl Into<String>) {
        self.state.queue.lock().unwrap().push_back(raw.into());
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl SoapTransport for MockTransport {
    async fn call(&self, url: &str, soap_action: &str, envelope: &str) -> Result<String> {
        self.state.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            soap_action: soap_action.to_string(),
            envelope: envelope.to_string(),
        });
        self.state
            .queue
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| Error::Transport("no scripted response left".to_string()))
    }
}

/// Wraps an inner payload the way NetGate wraps operation results.
pub fn soap_result(operation: &str, inner: &str) -> String {
    format!(
        r#"<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
<soap:Body><{operation}Response xmlns="https://www.iatspayments.com/NetGate/">
<{operation}V1Result>{inner}</{operation}V1Result>
</{operation}Response></soap:Body></soap:Envelope>"#
    )
}

/// A Success IATSRESPONSE whose PROCESSRESULT holds the given fields.
pub fn process_result(fields: &[(&str, &str)]) -> String {
    let mut inner = String::from("<IATSRESPONSE><STATUS>Success</STATUS><PROCESSRESULT>");
    for (name, value) in fields {
        inner.push_str(&format!("<{name}>{value}</{name}>"));
    }
    inner.push_str("</PROCESSRESULT></IATSRESPONSE>");
    inner
}

pub fn failure_response() -> String {
    "<IATSRESPONSE><STATUS>Failure</STATUS><ERRORS>Bad Credentials</ERRORS></IATSRESPONSE>"
        .to_string()
}

/// The immediate acknowledgment of a batch submission.
pub fn batch_ack(operation: &str, batch_id: &str) -> String {
    soap_result(
        operation,
        &process_result(&[
            ("AUTHORIZATIONRESULT", netgate::process_link::BATCH_PROCESSING),
            ("BATCHID", batch_id),
        ]),
    )
}

/// A completed GetBatchProcessResultFile response carrying `result_text`
/// base64-encoded.
pub fn batch_result_response(batch_id: &str, result_text: &str) -> String {
    let encoded = BASE64.encode(result_text);
    soap_result(
        "GetBatchProcessResultFile",
        &process_result(&[
            ("AUTHORIZATIONRESULT", netgate::process_link::BATCH_DONE),
            ("BATCHID", batch_id),
            ("BATCHPROCESSRESULTFILE", &encoded),
        ]),
    )
}

/// Mirrors how the gateway builds a result file: the submitted rows in
/// order, the sensitive position obfuscated when the row was accepted, and
/// the outcome message appended as a final field. Rows come back
/// CRLF-separated.
pub fn gateway_batch_result(batch_csv: &str, message: &str, mask_index: Option<usize>) -> String {
    batch_csv
        .split('\n')
        .map(|line| {
            let mut fields: Vec<String> = line.split(',').map(str::to_string).collect();
            if let Some(index) = mask_index
                && let Some(field) = fields.get_mut(index)
            {
                *field = obfuscate(field);
            }
            fields.push(message.to_string());
            fields.join(",")
        })
        .collect::<Vec<_>>()
        .join("\r\n")
}

/// Gateway-style obfuscation: everything but the last four digits starred.
pub fn obfuscate(value: &str) -> String {
    if value.len() <= 4 {
        return "*".repeat(value.len());
    }
    let (head, tail) = value.split_at(value.len() - 4);
    format!("{}{tail}", "*".repeat(head.len()))
}

pub fn base64_encode(text: &str) -> String {
    BASE64.encode(text)
}
