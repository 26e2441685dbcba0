//! Shorten form: URL plus optional custom alias.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::api::ShortenerApi;
use crate::api::dto::ShortenResponse;
use crate::ui::notify::{Notification, Notifier};
use crate::ui::state::Refresh;

/// Result of one [`ShortenForm::submit`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing sent: a request was already in flight or the URL was blank.
    Skipped,
    Created(ShortenResponse),
    /// Server or transport failure; the message was shown to the user.
    Failed(String),
}

/// Form state and submission logic.
///
/// The URL field is required; its format is left for the service to judge.
/// Fields are cleared only after a successful create, so a failed attempt can
/// be retried as-is.
///
/// Clones share the same fields and in-flight flag, so a renderer holding a
/// clone sees "Shortening..." while another clone's [`submit`] is awaiting
/// the service.
///
/// [`submit`]: ShortenForm::submit
#[derive(Clone)]
pub struct ShortenForm {
    api: Arc<dyn ShortenerApi>,
    notifier: Arc<dyn Notifier>,
    on_success: Arc<dyn Refresh>,
    fields: Arc<Mutex<Fields>>,
    submitting: Arc<AtomicBool>,
}

#[derive(Debug, Default)]
struct Fields {
    full_url: String,
    custom_alias: String,
}

impl ShortenForm {
    pub fn new(
        api: Arc<dyn ShortenerApi>,
        notifier: Arc<dyn Notifier>,
        on_success: Arc<dyn Refresh>,
    ) -> Self {
        Self {
            api,
            notifier,
            on_success,
            fields: Arc::new(Mutex::new(Fields::default())),
            submitting: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn full_url(&self) -> String {
        self.fields().full_url.clone()
    }

    pub fn custom_alias(&self) -> String {
        self.fields().custom_alias.clone()
    }

    pub fn set_full_url(&self, value: impl Into<String>) {
        self.fields().full_url = value.into();
    }

    pub fn set_custom_alias(&self, value: impl Into<String>) {
        self.fields().custom_alias = value.into();
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    /// Whether the submit control is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_submitting() && !self.fields().full_url.trim().is_empty()
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Shortening..."
        } else {
            "Shorten URL"
        }
    }

    /// Sends the form.
    ///
    /// On success: notify with the new short URL, clear both fields, then run
    /// the parent's refresh exactly once. On failure: notify with the error
    /// message and leave the fields alone.
    pub async fn submit(&self) -> SubmitOutcome {
        let (full_url, alias) = {
            let fields = self.fields();
            if fields.full_url.trim().is_empty() {
                return SubmitOutcome::Skipped;
            }
            let alias = (!fields.custom_alias.is_empty()).then(|| fields.custom_alias.clone());
            (fields.full_url.clone(), alias)
        };
        if self.submitting.swap(true, Ordering::SeqCst) {
            tracing::debug!("Shorten already in flight");
            return SubmitOutcome::Skipped;
        }

        let result = self.api.shorten_url(full_url, alias).await;
        self.submitting.store(false, Ordering::SeqCst);

        match result {
            Ok(created) => {
                self.notifier.notify(Notification::success(
                    "URL shortened successfully",
                    Some(created.short_url.clone()),
                ));
                {
                    let mut fields = self.fields();
                    fields.full_url.clear();
                    fields.custom_alias.clear();
                }
                self.on_success.refresh().await;
                SubmitOutcome::Created(created)
            }
            Err(e) => {
                let message = e.user_message();
                self.notifier.notify(Notification::error(
                    "Error shortening URL",
                    Some(message.clone()),
                ));
                SubmitOutcome::Failed(message)
            }
        }
    }

    fn fields(&self) -> MutexGuard<'_, Fields> {
        self.fields.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
