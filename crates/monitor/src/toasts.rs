//! Mensagens curtas exibidas por alguns segundos.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

pub const TOAST_DURATION: Duration = Duration::from_secs(3);

/// Limite de mensagens simultâneas; as mais antigas saem primeiro.
const MAX_TOASTS: usize = 4;

#[derive(Debug)]
struct Toast {
    text: String,
    shown: Instant,
}

#[derive(Debug, Default)]
pub struct Toasts {
    items: VecDeque<Toast>,
}

impl Toasts {
    pub fn push(&mut self, text: impl Into<String>, now: Instant) {
        if self.items.len() >= MAX_TOASTS {
            self.items.pop_front();
        }
        self.items.push_back(Toast {
            text: text.into(),
            shown: now,
        });
    }

    /// Remove as mensagens expiradas.
    pub fn prune(&mut self, now: Instant) {
        self.items
            .retain(|t| now.saturating_duration_since(t.shown) < TOAST_DURATION);
    }

    pub fn visible(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|t| t.text.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire() {
        let t0 = Instant::now();
        let mut toasts = Toasts::default();
        toasts.push("Status sent successfully.", t0);
        toasts.push("Unable to get location.", t0 + Duration::from_secs(2));

        toasts.prune(t0 + Duration::from_millis(2999));
        assert_eq!(toasts.visible().count(), 2);

        toasts.prune(t0 + TOAST_DURATION);
        assert_eq!(toasts.visible().collect::<Vec<_>>(), vec!["Unable to get location."]);

        toasts.prune(t0 + Duration::from_secs(10));
        assert!(toasts.is_empty());
    }

    #[test]
    fn oldest_toast_is_dropped_when_full() {
        let t0 = Instant::now();
        let mut toasts = Toasts::default();
        for n in 0..=MAX_TOASTS {
            toasts.push(format!("msg {n}"), t0);
        }
        assert_eq!(toasts.visible().count(), MAX_TOASTS);
        assert_eq!(toasts.visible().next(), Some("msg 1"));
    }
}
