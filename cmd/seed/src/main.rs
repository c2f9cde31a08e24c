//! agora/cmd/seed/src/main.rs
//!
//! Development seeding tool: fills the configured database with faked
//! forums, threads, replies, and users so the pages have something to
//! show. Goes through the services, so everything here is validated and
//! sanitized exactly like user input.

use std::sync::Arc;

use anyhow::Context;
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::Name;
use fake::Fake;
use secrecy::ExposeSecret;
use tracing::info;
use tracing_subscriber::EnvFilter;

use configs::AppConfig;
use services::{ForumService, HtmlSanitizer, ReplyService, ThreadService, UserService};
use storage_adapters::SqliteStore;

const FORUMS: &[(&str, &str)] = &[
    ("General", "general"),
    ("Help", "help"),
    ("Off Topic", "off-topic"),
];

const USER_COUNT: usize = 5;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = AppConfig::load().context("loading configuration")?;
    let store = Arc::new(
        SqliteStore::connect(
            config.database.url.expose_secret(),
            config.database.max_connections,
        )
        .await
        .context("opening the database")?,
    );

    let sanitizer = Arc::new(HtmlSanitizer::default_policy());
    let forums = ForumService::new(store.clone());
    let threads = ThreadService::new(store.clone(), store.clone(), sanitizer.clone());
    let replies = ReplyService::new(store.clone(), store.clone(), sanitizer);
    let users = UserService::new(store.clone());

    let mut thread_count = 0;
    let mut reply_count = 0;

    for (number, (name, slug)) in FORUMS.iter().enumerate() {
        let description: String = Sentence(6..12).fake();
        let forum = forums
            .create(name, Some(slug), Some(&description))
            .await
            .context("creating forum")?;

        for t in 0..(4 + number) {
            let title: String = Sentence(3..8).fake();
            let content: String = Paragraph(1..4).fake();
            // Every third thread is posted anonymously.
            let author: Option<String> = if t % 3 == 0 { None } else { Some(Name().fake()) };
            let thread = threads
                .create(forum.id, &title, author.as_deref(), &content)
                .await
                .context("creating thread")?;
            thread_count += 1;

            for r in 0..(t % 4) {
                let body: String = Paragraph(1..3).fake();
                let who: Option<String> = if r % 2 == 0 { Some(Name().fake()) } else { None };
                replies
                    .create(thread.id, who.as_deref(), &body)
                    .await
                    .context("creating reply")?;
                reply_count += 1;
            }
        }
    }

    for i in 0..USER_COUNT {
        // Suffix keeps the generated handles clear of the UNIQUE columns.
        let handle: String = Username().fake();
        let username = format!("{handle}{i}");
        let email = format!("{username}@example.com");
        users
            .create(&email, &username)
            .await
            .context("creating user")?;
    }

    info!(
        "Seeded {} forums, {} threads, {} replies, {} users",
        FORUMS.len(),
        thread_count,
        reply_count,
        USER_COUNT
    );
    store.close().await;
    Ok(())
}
