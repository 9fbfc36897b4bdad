use parking_lot::Mutex;

/// Emits each distinct warning at most once.
#[derive(Debug, Default)]
pub struct WarnOnce {
    seen: Mutex<Vec<String>>,
}

impl WarnOnce {
    pub fn new() -> Self {
        Self::default()
    }

    /// Warn with `message` unless it was already emitted. Returns whether it was emitted now.
    pub fn warn(&self, message: impl Into<String>) -> bool {
        let message = message.into();

        let mut seen = self.seen.lock();
        if seen.contains(&message) {
            return false;
        }

        #[cfg(feature = "log")]
        log::warn!("{message}");

        seen.push(message);
        true
    }

    /// Every message emitted so far, in order.
    pub fn messages(&self) -> Vec<String> {
        self.seen.lock().clone()
    }
}

#[cfg(test)]
mod test {
    use crate::warn::WarnOnce;

    #[test]
    fn each_message_once() {
        let warnings = WarnOnce::new();

        assert!(warnings.warn("failed to load `@iconify-json/mdi`"));
        assert!(!warnings.warn("failed to load `@iconify-json/mdi`"));
        assert!(warnings.warn("failed to load `@iconify-json/ri`"));

        assert_eq!(
            warnings.messages(),
            vec![
                "failed to load `@iconify-json/mdi`",
                "failed to load `@iconify-json/ri`"
            ]
        );
    }
}
