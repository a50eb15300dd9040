//! Change broadcast for cart subscribers.

use std::sync::RwLock;

/// Handle returned by [`ChangeBus::subscribe`]; pass it back to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionToken(u64);

type Handler = Box<dyn Fn() + Send + Sync>;

/// Payload-free broadcast list. Delivery order across subscribers is
/// unspecified and must not be relied on.
#[derive(Default)]
pub struct ChangeBus {
    inner: RwLock<Inner>,
}

#[derive(Default)]
struct Inner {
    next_token: u64,
    handlers: Vec<(u64, Handler)>,
}

impl ChangeBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn() + Send + Sync + 'static) -> SubscriptionToken {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        inner.next_token += 1;
        let token = inner.next_token;
        inner.handlers.push((token, Box::new(handler)));
        SubscriptionToken(token)
    }

    /// Returns whether the token was still registered.
    pub fn unsubscribe(&self, token: SubscriptionToken) -> bool {
        let mut inner = self.inner.write().unwrap_or_else(|e| e.into_inner());
        let before = inner.handlers.len();
        inner.handlers.retain(|(t, _)| *t != token.0);
        inner.handlers.len() != before
    }

    /// Invoke every handler synchronously. The list stays locked for the
    /// duration, so handlers must not subscribe or unsubscribe re-entrantly.
    pub fn notify(&self) {
        let inner = self.inner.read().unwrap_or_else(|e| e.into_inner());
        for (_, handler) in &inner.handlers {
            handler();
        }
    }
}
