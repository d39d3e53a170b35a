//! Layout parameter controller.
//!
//! Holds the live style parameters per user. Reads and merges are
//! immediate — the overlay and form must reflect a slider mid-drag — but
//! propagation to the session cache goes through a per-user [`Debouncer`],
//! so a drag burst lands in redis once, with the final value. Debouncers
//! are per user: one user's burst never delays another's pending write.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tracing::error;
use uuid::Uuid;

use crate::document::cache;
use crate::layout::{Debouncer, STYLE_DEBOUNCE};
use crate::models::{StyleParameters, StyleUpdate};

type PropagateFn = dyn Fn(Uuid, StyleParameters) + Send + Sync;

pub struct StyleController {
    delay: Duration,
    propagate: Arc<PropagateFn>,
    current: Mutex<HashMap<Uuid, StyleParameters>>,
    debouncers: Mutex<HashMap<Uuid, Debouncer<StyleParameters>>>,
}

impl StyleController {
    /// Controller with an explicit propagation sink. Tests inject a
    /// collector here; production uses [`StyleController::with_cache`].
    pub fn new(delay: Duration, propagate: impl Fn(Uuid, StyleParameters) + Send + Sync + 'static) -> Self {
        StyleController {
            delay,
            propagate: Arc::new(propagate),
            current: Mutex::new(HashMap::new()),
            debouncers: Mutex::new(HashMap::new()),
        }
    }

    /// Controller whose debounced sink writes to the redis session cache.
    pub fn with_cache(client: redis::Client) -> Self {
        Self::new(STYLE_DEBOUNCE, move |user_id, style| {
            let client = client.clone();
            tokio::spawn(async move {
                if let Err(e) = cache::store_style(&client, user_id, &style).await {
                    error!("failed to propagate style for user {user_id}: {e}");
                }
            });
        })
    }

    /// The live parameters for a user, if this controller has seen them.
    pub fn get(&self, user_id: Uuid) -> Option<StyleParameters> {
        self.current
            .lock()
            .expect("style controller lock poisoned")
            .get(&user_id)
            .cloned()
    }

    /// Installs `style` as the live parameters unless the user already has
    /// live state. Returns the live parameters either way.
    pub fn seed_if_absent(&self, user_id: Uuid, style: StyleParameters) -> StyleParameters {
        self.current
            .lock()
            .expect("style controller lock poisoned")
            .entry(user_id)
            .or_insert(style)
            .clone()
    }

    /// Merges a partial update into the live parameters (seeding from
    /// `base` when the user has none) and schedules debounced propagation.
    /// The returned value is the post-merge state, visible immediately.
    pub fn apply(
        &self,
        user_id: Uuid,
        base: StyleParameters,
        update: StyleUpdate,
    ) -> StyleParameters {
        let merged = {
            let mut current = self.current.lock().expect("style controller lock poisoned");
            let entry = current.entry(user_id).or_insert(base);
            entry.merge(update);
            entry.clone()
        };

        let mut debouncers = self
            .debouncers
            .lock()
            .expect("style controller lock poisoned");
        let debouncer = debouncers.entry(user_id).or_insert_with(|| {
            let propagate = Arc::clone(&self.propagate);
            Debouncer::new(self.delay, move |style| propagate(user_id, style))
        });
        debouncer.push(merged.clone());

        merged
    }

    /// Replaces the live parameters outright and propagates immediately —
    /// a reset is a single deliberate action, not a slider burst. Any
    /// pending debounced value is cancelled so a stale intermediate can
    /// never land after the reset.
    pub fn set(&self, user_id: Uuid, style: StyleParameters) {
        if let Some(debouncer) = self
            .debouncers
            .lock()
            .expect("style controller lock poisoned")
            .get(&user_id)
        {
            debouncer.cancel();
        }
        self.current
            .lock()
            .expect("style controller lock poisoned")
            .insert(user_id, style.clone());
        (self.propagate)(user_id, style);
    }
}
