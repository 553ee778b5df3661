use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use client::{ClientContext, FilePicker, Redirector, SelectedFile, SessionHandle};
use dioxus::prelude::*;

/// The app shell provides a [`ClientContext`] and the [`SessionHandle`] it was
/// built with before mounting any screen.
pub fn use_client() -> ClientContext {
    use_context::<ClientContext>()
}

pub fn use_session() -> SessionHandle {
    use_context::<SessionHandle>()
}

/// Picker backed by the screen's `<input type="file">`.
///
/// The input's change handler [`offer`](Self::offer)s the chosen file; the upload
/// controller then takes it through [`FilePicker::pick`]. An empty slot reads as
/// a dismissed picker.
#[derive(Clone, Default)]
pub struct InputFilePicker {
    chosen: Arc<Mutex<Option<SelectedFile>>>,
}

impl InputFilePicker {
    pub fn offer(&self, file: Option<SelectedFile>) {
        *self.chosen.lock().unwrap_or_else(|e| e.into_inner()) = file;
    }
}

#[async_trait]
impl FilePicker for InputFilePicker {
    async fn pick(&self, _accept: &[&str]) -> Result<Option<SelectedFile>, String> {
        Ok(self.chosen.lock().unwrap_or_else(|e| e.into_inner()).take())
    }
}

/// Sends the webview to the hosted checkout page.
#[derive(Clone, Copy, Default)]
pub struct WebviewRedirector;

impl Redirector for WebviewRedirector {
    fn open(&self, url: &str) {
        let url = url.replace('\\', "\\\\").replace('"', "\\\"");
        let _ = document::eval(&format!(r#"window.location.href = "{url}";"#));
    }
}
