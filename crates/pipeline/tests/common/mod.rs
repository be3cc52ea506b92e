use std::sync::Arc;
use std::time::Duration;

use giapha_cloud::memory::MemoryObjectStore;
use giapha_core::roles::{PROFILE_STATUS_ACTIVE, ROLE_ADMIN, ROLE_EDITOR, ROLE_MEMBER};
use giapha_db::memory::MemoryStore;
use giapha_db::models::person::NewPerson;
use giapha_events::RecordingNotifier;
use giapha_pipeline::Actor;
use uuid::Uuid;

/// In-memory ports plus a few seeded users.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub objects: Arc<MemoryObjectStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub admin: Actor,
    pub editor: Actor,
    pub member: Actor,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let admin = seed_actor(&store, "admin@giapha.vn", ROLE_ADMIN);
        let editor = seed_actor(&store, "editor@giapha.vn", ROLE_EDITOR);
        let member = seed_actor(&store, "member@giapha.vn", ROLE_MEMBER);
        Self {
            store,
            objects: Arc::new(MemoryObjectStore::new()),
            notifier: Arc::new(RecordingNotifier::new()),
            admin,
            editor,
            member,
        }
    }
}

fn seed_actor(store: &MemoryStore, email: &str, role: &str) -> Actor {
    let profile = store.add_profile(Uuid::new_v4(), email, role, PROFILE_STATUS_ACTIVE);
    Actor {
        id: profile.id,
        email: profile.email,
        role: profile.role,
    }
}

pub fn person(handle: &str, name: &str) -> NewPerson {
    NewPerson {
        handle: handle.to_string(),
        display_name: name.to_string(),
        gender: 1,
        generation: 5,
        birth_year: None,
        birth_month: None,
        birth_day: None,
        death_year: None,
        is_living: true,
        occupation: None,
        current_address: None,
        phone: None,
        email: None,
        notes: None,
    }
}

/// Wait until the notifier has recorded at least `count` messages.
pub async fn wait_for_sent(notifier: &RecordingNotifier, count: usize) {
    for _ in 0..100 {
        if notifier.sent().len() >= count {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("expected {count} notifications, got {}", notifier.sent().len());
}
