use crate::credentials::Credentials;
use crate::error::Result;
use crate::request::Fields;
use crate::transport::SoapTransportBox;
use masking::PeekInterface;
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

/// Namespace of every NetGate operation; doubles as the SOAPAction prefix.
pub(crate) const NAMESPACE: &str = "https://www.iatspayments.com/NetGate/";

/// One dispatcher per façade: holds the credentials and the transport, and
/// turns (operation name, request fields) into exactly one SOAP call.
///
/// The raw response comes back untouched; interpretation belongs to the
/// response handler. No retries happen here since batch operations are only
/// idempotent through per-row unique ids.
pub(crate) struct Api {
    credentials: Credentials,
    transport: SoapTransportBox,
    endpoint: String,
}

impl Api {
    pub(crate) fn new(credentials: Credentials, transport: SoapTransportBox, path: &str) -> Self {
        let endpoint = format!("{}{}", credentials.server().base_url(), path);
        Self {
            credentials,
            transport,
            endpoint,
        }
    }

    pub(crate) fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub(crate) async fn call(&self, operation: &str, fields: Fields) -> Result<String> {
        let merged = self.merge(fields);
        let envelope = build_envelope(operation, &merged)?;
        let action = format!("{NAMESPACE}{operation}");
        debug!(operation, endpoint = %self.endpoint, "dispatching SOAP call");
        self.transport
            .call(&self.endpoint, &action, &envelope)
            .await
    }

    /// Prepends the agent credentials and a default empty `customerIPAddress`
    /// when the caller did not supply one.
    fn merge(&self, fields: Fields) -> Fields {
        let mut merged = vec![
            ("agentCode", self.credentials.agent_code().to_string()),
            ("password", self.credentials.password().peek().clone()),
        ];
        if !fields.iter().any(|(name, _)| *name == "customerIPAddress") {
            merged.push(("customerIPAddress", String::new()));
        }
        merged.extend(fields);
        merged
    }
}

/// Builds the SOAP 1.1 envelope for one operation. Field values go through
/// the XML writer so reserved characters are escaped.
fn build_envelope(operation: &str, fields: &[(&'static str, String)]) -> Result<String> {
    let mut writer = Writer::new(Vec::new());

    let mut envelope = BytesStart::new("soap:Envelope");
    envelope.push_attribute(("xmlns:soap", "http://schemas.xmlsoap.org/soap/envelope/"));
    writer.write_event(Event::Start(envelope))?;
    writer.write_event(Event::Start(BytesStart::new("soap:Body")))?;

    let mut op = BytesStart::new(operation);
    op.push_attribute(("xmlns", NAMESPACE));
    writer.write_event(Event::Start(op))?;
    for (name, value) in fields {
        writer.write_event(Event::Start(BytesStart::new(*name)))?;
        writer.write_event(Event::Text(BytesText::new(value)))?;
        writer.write_event(Event::End(BytesEnd::new(*name)))?;
    }
    writer.write_event(Event::End(BytesEnd::new(operation)))?;

    writer.write_event(Event::End(BytesEnd::new("soap:Body")))?;
    writer.write_event(Event::End(BytesEnd::new("soap:Envelope")))?;
    Ok(String::from_utf8(writer.into_inner())?)
}
