/// System clipboard, or nothing when the platform has none.
pub(crate) struct Clipboard {
    inner: Option<arboard::Clipboard>,
}

impl Clipboard {
    pub fn new() -> Self {
        let inner = match arboard::Clipboard::new() {
            Ok(clipboard) => Some(clipboard),
            Err(err) => {
                tracing::warn!("clipboard unavailable: {err}");
                None
            }
        };
        Self { inner }
    }

    pub fn get(&mut self) -> Option<String> {
        let clipboard = self.inner.as_mut()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!("clipboard read failed: {err}");
                None
            }
        }
    }

    pub fn set(&mut self, text: String) {
        if let Some(clipboard) = self.inner.as_mut()
            && let Err(err) = clipboard.set_text(text)
        {
            tracing::warn!("clipboard write failed: {err}");
        }
    }
}
