//! In-process exchange driver.
//!
//! Plays the role of the server for the demo: one call runs one exchange to
//! completion, reporting progress over an unbounded channel. The emission
//! order is the contract the UI relies on:
//!
//! - success: `before_request`, swap content, `after_swap`, `after_request`
//! - failure: `before_request`, failure detail, `after_request`
//!
//! The swap step only happens for successful exchanges.

use std::path::Path;

use tokio::sync::mpsc::UnboundedSender;

use crate::config::Config;
use crate::exchange::events::{ElementId, ExchangeEvent, ids};
use crate::message::Message;
use crate::session::Session;

/// A request submitted by one of the page's forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeRequest {
    /// A question for the assistant, from the chat form.
    Chat { elt: ElementId, prompt: String },
    /// File names to index, from the upload form.
    Upload { elt: ElementId, files: Vec<String> },
}

impl ExchangeRequest {
    /// The element that triggered this request.
    pub fn elt(&self) -> &ElementId {
        match self {
            ExchangeRequest::Chat { elt, .. } | ExchangeRequest::Upload { elt, .. } => elt,
        }
    }
}

/// Everything the driver reports while running one exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriverEvent {
    /// A lifecycle event, in dispatch order.
    Lifecycle(ExchangeEvent),

    /// Content for the named region. Always followed by the matching
    /// `after_swap` lifecycle event.
    Swap { target: ElementId, message: Message },

    /// A successful upload replaced the active session with this one.
    SessionEstablished(Session),

    /// Why the exchange failed. Emitted before the final `after_request`.
    Failed { detail: String },
}

const NO_SESSION_DETAIL: &str = "No active session. Please upload documents first.";
const NO_FILES_DETAIL: &str = "No files provided";

/// Checks one file name the way the upload endpoint does.
///
/// Only `.pdf` files are accepted; the extension check is case-insensitive.
pub fn validate_file(name: &str) -> Result<(), String> {
    let is_pdf = Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if is_pdf {
        Ok(())
    } else {
        Err(format!("Unsupported file type: {name}"))
    }
}

/// Runs one exchange to completion, reporting progress on `tx`.
///
/// Send errors are ignored: a dropped receiver means the UI is gone and the
/// rest of the exchange has nowhere to land.
pub async fn run_exchange(
    config: Config,
    session: Option<Session>,
    request: ExchangeRequest,
    tx: UnboundedSender<DriverEvent>,
) {
    let elt = request.elt().clone();
    let _ = tx.send(DriverEvent::Lifecycle(ExchangeEvent::BeforeRequest {
        elt: elt.clone(),
    }));

    if let Some(delay) = config.response_delay() {
        tokio::time::sleep(delay).await;
    }

    match request {
        ExchangeRequest::Chat { prompt, .. } => match session {
            Some(session) => {
                let reply = compose_reply(&prompt, &session);
                tracing::debug!(session = %session.short_id(), "chat exchange answered");
                complete_with_swap(&tx, elt, Message::assistant(reply));
            }
            None => fail(&tx, elt, NO_SESSION_DETAIL.to_string()),
        },
        ExchangeRequest::Upload { files, .. } => match validate_files(&files) {
            Ok(()) => {
                let session = Session::establish(&config.collection_name, files);
                let notice = upload_notice(&config, &session);
                tracing::info!(
                    session = %session.short_id(),
                    documents = session.document_count(),
                    "upload exchange established session"
                );
                let _ = tx.send(DriverEvent::SessionEstablished(session));
                complete_with_swap(&tx, elt, Message::system(notice));
            }
            Err(detail) => fail(&tx, elt, detail),
        },
    }
}

fn validate_files(files: &[String]) -> Result<(), String> {
    if files.is_empty() {
        return Err(NO_FILES_DETAIL.to_string());
    }
    for name in files {
        validate_file(name)?;
    }
    Ok(())
}

fn complete_with_swap(tx: &UnboundedSender<DriverEvent>, elt: ElementId, message: Message) {
    let target = ElementId::from(ids::MESSAGES);
    let _ = tx.send(DriverEvent::Swap {
        target: target.clone(),
        message,
    });
    let _ = tx.send(DriverEvent::Lifecycle(ExchangeEvent::AfterSwap { target }));
    let _ = tx.send(DriverEvent::Lifecycle(ExchangeEvent::AfterRequest {
        elt,
        successful: true,
    }));
}

fn fail(tx: &UnboundedSender<DriverEvent>, elt: ElementId, detail: String) {
    tracing::warn!("exchange failed: {detail}");
    let _ = tx.send(DriverEvent::Failed { detail });
    let _ = tx.send(DriverEvent::Lifecycle(ExchangeEvent::AfterRequest {
        elt,
        successful: false,
    }));
}

fn compose_reply(prompt: &str, session: &Session) -> String {
    let count = session.document_count();
    let noun = if count == 1 { "document" } else { "documents" };
    format!(
        "Searched {count} {noun} in \"{}\" for \"{prompt}\". The demo responder has no model \
         behind it; this is where a retrieval-backed answer would appear.",
        session.collection_name
    )
}

fn upload_notice(config: &Config, session: &Session) -> String {
    let count = session.document_count();
    let noun = if count == 1 { "file" } else { "files" };
    format!(
        "Documents processed successfully. {count} {noun} indexed into \"{}\" \
         (chunk size {}, overlap {}).",
        session.collection_name, config.chunk_size, config.chunk_overlap
    )
}
